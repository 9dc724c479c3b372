use serde::{Deserialize, Serialize};

/// On-disk encoding of published documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    /// Pretty-print `value`, always ending with a single newline.
    ///
    /// Key order follows the serialized type, so typed documents render
    /// identically on every run.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, String> {
        let mut out = match self {
            DocumentFormat::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string())?,
            DocumentFormat::Yaml => serde_yaml_ng::to_string(value).map_err(|e| e.to_string())?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse a published document into a generic value for diffing.
    pub fn parse(&self, input: &str) -> Result<serde_json::Value, String> {
        match self {
            DocumentFormat::Json => serde_json::from_str(input).map_err(|e| e.to_string()),
            DocumentFormat::Yaml => serde_yaml_ng::from_str(input).map_err(|e| e.to_string()),
        }
    }
}
