use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::definition::{Definition, RawDefinition};
use crate::error::LoadError;

/// Top-level key every source artifact must declare.
pub const DEFINITION_KEY: &str = "DEFINITION";

/// Source artifact extensions picked up by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Loads definition source artifacts found under a source root.
#[derive(Debug, Clone)]
pub struct DefinitionLoader {
    root: PathBuf,
}

impl DefinitionLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load one artifact, naming it after its location under the root.
    pub fn load(&self, artifact: &Path) -> Result<Definition, LoadError> {
        let name = definition_name(&self.root, artifact)?;
        let raw = read_raw_definition(artifact)?;
        log::debug!("loaded definition {name} from {}", artifact.display());
        Ok(raw.normalize(name))
    }
}

/// Derive a definition name: the path relative to `root`, extension
/// stripped, joined with `/`. `.` components are ignored on both sides.
pub fn definition_name(root: &Path, artifact: &Path) -> Result<String, LoadError> {
    let outside = || LoadError::OutsideRoot {
        path: artifact.to_path_buf(),
        root: root.to_path_buf(),
    };

    let artifact_clean = without_cur_dir(artifact);
    let relative = artifact_clean
        .strip_prefix(without_cur_dir(root))
        .map_err(|_| outside())?;
    let stem = relative.with_extension("");

    let mut parts = Vec::new();
    for component in stem.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }

    if parts.is_empty() {
        return Err(outside());
    }
    Ok(parts.join("/"))
}

fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Fail when two artifacts map to the same definition name, such as
/// `weather.json` and `weather.yaml`. They would publish to the same file.
pub fn ensure_unique_names(root: &Path, artifacts: &[PathBuf]) -> Result<(), LoadError> {
    let mut seen: HashMap<String, &PathBuf> = HashMap::new();
    for artifact in artifacts {
        match seen.entry(definition_name(root, artifact)?) {
            Entry::Occupied(entry) => {
                return Err(LoadError::DuplicateName {
                    name: entry.key().clone(),
                    first: entry.get().to_path_buf(),
                    path: artifact.clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(artifact);
            }
        }
    }
    Ok(())
}

/// Parse an artifact and extract its `DEFINITION` entity.
pub fn read_raw_definition(artifact: &Path) -> Result<RawDefinition, LoadError> {
    let content = fs::read_to_string(artifact).map_err(|source| LoadError::Read {
        path: artifact.to_path_buf(),
        source,
    })?;

    let ext = artifact.extension().and_then(|e| e.to_str()).unwrap_or("yaml");
    let parsed: serde_json::Value = match ext {
        "json" => serde_json::from_str::<serde_json::Value>(&content).map_err(|e| e.to_string()),
        _ => serde_yaml_ng::from_str::<serde_json::Value>(&content).map_err(|e| e.to_string()),
    }
    .map_err(|message| LoadError::Syntax {
        path: artifact.to_path_buf(),
        message,
    })?;

    let serde_json::Value::Object(mut top) = parsed else {
        return Err(LoadError::Invalid {
            path: artifact.to_path_buf(),
            reason: "top level must be a mapping".to_string(),
        });
    };

    let entity = match top.remove(DEFINITION_KEY) {
        None | Some(serde_json::Value::Null) => {
            return Err(LoadError::MissingDefinition {
                path: artifact.to_path_buf(),
            });
        }
        Some(entity) => entity,
    };

    let raw: RawDefinition =
        serde_json::from_value(entity).map_err(|e| LoadError::Invalid {
            path: artifact.to_path_buf(),
            reason: e.to_string(),
        })?;

    if raw.summary.trim().is_empty() {
        return Err(LoadError::Invalid {
            path: artifact.to_path_buf(),
            reason: "summary must not be empty".to_string(),
        });
    }

    Ok(raw)
}

/// Recursively find definition artifacts under `root`, sorted by path.
pub fn discover_definitions<S: AsRef<str>>(
    root: &Path,
    extensions: &[S],
) -> Result<Vec<PathBuf>, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::Read {
            path: root.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "source root is not a directory",
            ),
        });
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| LoadError::Read {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want.as_ref() == ext));
        if matches {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}
