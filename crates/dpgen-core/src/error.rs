use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a source artifact into a `Definition`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    #[error("invalid DEFINITION in {path}: {reason}")]
    Invalid { path: PathBuf, reason: String },

    #[error("error finding DEFINITION entity in {path}")]
    MissingDefinition { path: PathBuf },

    #[error("{path} is not located under source root {root}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("{path} and {first} both define '{name}'")]
    DuplicateName {
        name: String,
        first: PathBuf,
        path: PathBuf,
    },
}

impl LoadError {
    /// The artifact the error refers to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Syntax { path, .. }
            | LoadError::Invalid { path, .. }
            | LoadError::MissingDefinition { path }
            | LoadError::OutsideRoot { path, .. }
            | LoadError::DuplicateName { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("{definition}: {role} schema has no title")]
    MissingTitle {
        definition: String,
        role: &'static str,
    },

    #[error("{definition}: unresolved schema reference: {reference}")]
    UnresolvedRef {
        definition: String,
        reference: String,
    },

    #[error("{definition}: conflicting schemas registered as component '{component}'")]
    ConflictingSchema {
        definition: String,
        component: String,
    },
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("published document {path} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("failed to serialize document for {path}: {message}")]
    Serialize { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// Any fatal error that aborts a conversion run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
