use std::path::{Path, PathBuf};

use crate::config::DpgenConfig;
use crate::document::ApiDocument;
use crate::error::PipelineError;
use crate::loader::{
    DEFAULT_EXTENSIONS, DefinitionLoader, discover_definitions, ensure_unique_names,
};
use crate::publish::{
    AssumeTracked, CommandHook, DiffPublisher, GitStatus, NoopHook, PublishOutcome,
    ValidationHook, VersionControl,
};
use crate::synthesize::{OpenApiSynthesizer, Synthesizer};

/// One processed definition.
#[derive(Debug, Clone)]
pub struct ReportEntry {
    pub name: String,
    pub source: PathBuf,
    pub outcome: PublishOutcome,
}

/// Outcome of a full conversion run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    /// `true` if any document was written or is untracked.
    pub fn changed(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.changed())
    }

    pub fn changed_entries(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.changed())
    }
}

/// Loader -> synthesizer -> publisher over every artifact under a source root.
pub struct Pipeline {
    synthesizer: Box<dyn Synthesizer>,
    publisher: DiffPublisher,
    extensions: Vec<String>,
}

impl Pipeline {
    pub fn new(publisher: DiffPublisher) -> Self {
        Self {
            synthesizer: Box::new(OpenApiSynthesizer),
            publisher,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Wire up the production collaborators described by `config`.
    pub fn from_config(config: &DpgenConfig) -> Self {
        let vcs: Box<dyn VersionControl> = if config.vcs.enabled {
            Box::new(GitStatus::new(config.vcs.timeout()))
        } else {
            Box::new(AssumeTracked)
        };
        let hook: Box<dyn ValidationHook> =
            match CommandHook::from_argv(&config.hook.command, config.hook.timeout()) {
                Some(hook) => Box::new(hook),
                None => Box::new(NoopHook),
            };

        Self::new(DiffPublisher::new(config.format, vcs, hook))
            .with_extensions(config.extensions.clone())
    }

    pub fn with_synthesizer(mut self, synthesizer: Box<dyn Synthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    /// Process every artifact in path order. Duplicate definition names are
    /// rejected before anything is published. Otherwise the first error aborts
    /// the run; documents already written stay in place.
    pub fn run(
        &self,
        source_root: &Path,
        destination_root: &Path,
    ) -> Result<RunReport, PipelineError> {
        let loader = DefinitionLoader::new(source_root);
        let artifacts = discover_definitions(source_root, &self.extensions)?;
        ensure_unique_names(source_root, &artifacts)?;
        log::debug!(
            "found {} definition(s) under {}",
            artifacts.len(),
            source_root.display()
        );

        let mut report = RunReport::default();
        for artifact in artifacts {
            let definition = loader.load(&artifact)?;
            let document = self.synthesizer.synthesize(&definition)?;
            let outcome = self
                .publisher
                .publish(&definition.name, &document, destination_root)?;
            report.entries.push(ReportEntry {
                name: definition.name,
                source: artifact,
                outcome,
            });
        }
        Ok(report)
    }

    /// Load and synthesize a single artifact without publishing it.
    pub fn preview(&self, source_root: &Path, artifact: &Path) -> Result<ApiDocument, PipelineError> {
        let definition = DefinitionLoader::new(source_root).load(artifact)?;
        Ok(self.synthesizer.synthesize(&definition)?)
    }
}

/// Convert every definition under `source` into `destination` using the
/// default collaborators. Returns `true` if anything was written or is
/// untracked.
pub fn convert_definitions(source: &Path, destination: &Path) -> Result<bool, PipelineError> {
    let report = Pipeline::from_config(&DpgenConfig::default()).run(source, destination)?;
    Ok(report.changed())
}
