//! Conditional publishing of synthesized documents.
//!
//! A document is written only when it differs structurally from the one
//! already on disk. Unchanged files that version control does not know about
//! are still reported, so a gate built on the outcome fails until they are
//! committed.

pub mod hook;
pub mod process;
pub mod vcs;

use std::fs;
use std::path::{Path, PathBuf};

use crate::diff::{Difference, diff};
use crate::document::{ApiDocument, DocumentFormat};
use crate::error::PublishError;

pub use hook::{CommandHook, NoopHook, ValidationHook};
pub use vcs::{AssumeTracked, GitStatus, VersionControl};

/// What happened to one published document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStatus {
    /// Content differed and the file was rewritten.
    Written,
    /// Content matched, but the file is not tracked by version control.
    Untracked,
    /// Content matched and the file is tracked.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub path: PathBuf,
    pub status: PublishStatus,
    pub differences: Vec<Difference>,
}

impl PublishOutcome {
    /// Whether this outcome should fail a "nothing to publish" gate.
    pub fn changed(&self) -> bool {
        matches!(
            self.status,
            PublishStatus::Written | PublishStatus::Untracked
        )
    }
}

/// Compares candidate documents against the published ones and writes only
/// real changes.
pub struct DiffPublisher {
    format: DocumentFormat,
    vcs: Box<dyn VersionControl>,
    hook: Box<dyn ValidationHook>,
}

impl DiffPublisher {
    pub fn new(
        format: DocumentFormat,
        vcs: Box<dyn VersionControl>,
        hook: Box<dyn ValidationHook>,
    ) -> Self {
        Self { format, vcs, hook }
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// `destination_root/<name>.<ext>`, with `name` split on `/`.
    pub fn destination_path(&self, destination_root: &Path, name: &str) -> PathBuf {
        let file = format!("{name}.{}", self.format.extension());
        let mut path = destination_root.to_path_buf();
        path.extend(file.split('/'));
        path
    }

    pub fn publish(
        &self,
        name: &str,
        document: &ApiDocument,
        destination_root: &Path,
    ) -> Result<PublishOutcome, PublishError> {
        let path = self.destination_path(destination_root, name);

        let candidate = serde_json::to_value(document).map_err(|e| PublishError::Serialize {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let published = self.read_published(&path)?;
        let differences = diff(&published, &candidate);

        let status = if !differences.is_empty() {
            log::info!("Exporting {}", path.display());
            for difference in &differences {
                log::debug!("  {difference}");
            }
            self.write(&path, document)?;
            self.hook.run(&path);
            PublishStatus::Written
        } else if self.vcs.is_untracked(&path) {
            log::info!("Untracked {}", path.display());
            PublishStatus::Untracked
        } else {
            log::info!("Skipping {}", path.display());
            PublishStatus::Unchanged
        };

        Ok(PublishOutcome {
            path,
            status,
            differences,
        })
    }

    /// The published document, or an empty mapping when none exists yet.
    fn read_published(&self, path: &Path) -> Result<serde_json::Value, PublishError> {
        if !path.exists() {
            return Ok(serde_json::Value::Object(serde_json::Map::new()));
        }
        let content = fs::read_to_string(path).map_err(|source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.format
            .parse(&content)
            .map_err(|message| PublishError::Malformed {
                path: path.to_path_buf(),
                message,
            })
    }

    fn write(&self, path: &Path, document: &ApiDocument) -> Result<(), PublishError> {
        let rendered = self
            .format
            .render(document)
            .map_err(|message| PublishError::Serialize {
                path: path.to_path_buf(),
                message,
            })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| PublishError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, rendered).map_err(|source| PublishError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_mirrors_name() {
        let publisher = DiffPublisher::new(
            DocumentFormat::Json,
            Box::new(AssumeTracked),
            Box::new(NoopHook),
        );
        assert_eq!(
            publisher.destination_path(Path::new("openapi"), "orders/create"),
            Path::new("openapi").join("orders").join("create.json")
        );
    }

    #[test]
    fn destination_keeps_dots_in_name() {
        let publisher = DiffPublisher::new(
            DocumentFormat::Yaml,
            Box::new(AssumeTracked),
            Box::new(NoopHook),
        );
        assert_eq!(
            publisher.destination_path(Path::new("out"), "v1.2/lookup"),
            Path::new("out").join("v1.2").join("lookup.yaml")
        );
        assert_eq!(
            publisher.destination_path(Path::new("out"), "weather.v2"),
            Path::new("out").join("weather.v2.yaml")
        );
    }
}
