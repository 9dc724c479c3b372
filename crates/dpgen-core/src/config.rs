use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::document::DocumentFormat;
use crate::error::ConfigError;
use crate::loader::DEFAULT_EXTENSIONS;
use crate::publish::hook::DEFAULT_HOOK_COMMAND;

/// Top-level project configuration loaded from `.dpgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DpgenConfig {
    /// Directory holding definition source artifacts.
    pub source: String,
    /// Directory published documents are written to.
    pub destination: String,
    pub format: DocumentFormat,
    /// Source artifact extensions to pick up.
    pub extensions: Vec<String>,
    pub hook: HookConfig,
    pub vcs: VcsConfig,
}

impl Default for DpgenConfig {
    fn default() -> Self {
        Self {
            source: "definitions".to_string(),
            destination: "openapi".to_string(),
            format: DocumentFormat::Json,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            hook: HookConfig::default(),
            vcs: VcsConfig::default(),
        }
    }
}

/// Post-write validation command.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Command argv; the written path is appended. Empty disables the hook.
    pub command: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_HOOK_COMMAND.iter().map(|a| a.to_string()).collect(),
            timeout_secs: 60,
        }
    }
}

impl HookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Version control status lookups.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    pub enabled: bool,
    pub timeout_secs: u64,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_secs: 60,
        }
    }
}

impl VcsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".dpgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DpgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: DpgenConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# dpgen configuration
source: definitions      # directory holding DEFINITION artifacts
destination: openapi     # directory published documents are written to
format: json             # json | yaml

extensions: [yaml, yml, json]

hook:
  # Runs after every write with the written file appended. [] disables it.
  command: [pre-commit, run, --files]
  timeout_secs: 60

vcs:
  # Report unchanged files that git does not track yet.
  enabled: true
  timeout_secs: 60
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DpgenConfig::default();
        assert_eq!(config.source, "definitions");
        assert_eq!(config.destination, "openapi");
        assert_eq!(config.format, DocumentFormat::Json);
        assert_eq!(config.extensions, vec!["yaml", "yml", "json"]);
        assert_eq!(config.hook.command, vec!["pre-commit", "run", "--files"]);
        assert_eq!(config.hook.timeout(), Duration::from_secs(60));
        assert!(config.vcs.enabled);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
source: data_products
destination: docs/openapi
format: yaml
extensions: [json]
hook:
  command: []
  timeout_secs: 5
vcs:
  enabled: false
"#;
        let config: DpgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.source, "data_products");
        assert_eq!(config.destination, "docs/openapi");
        assert_eq!(config.format, DocumentFormat::Yaml);
        assert_eq!(config.extensions, vec!["json"]);
        assert!(config.hook.command.is_empty());
        assert_eq!(config.hook.timeout_secs, 5);
        assert!(!config.vcs.enabled);
        assert_eq!(config.vcs.timeout_secs, 60);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "source: defs\n";
        let config: DpgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.source, "defs");
        // Defaults applied
        assert_eq!(config.destination, "openapi");
        assert_eq!(config.format, DocumentFormat::Json);
    }

    #[test]
    fn test_default_content_parses() {
        let config: DpgenConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.source, "definitions");
        assert_eq!(config.hook.command.len(), 3);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join(CONFIG_FILE_NAME)).unwrap().is_none());
    }
}
