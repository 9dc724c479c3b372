use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::{APPLICATION_JSON, MediaType};
use super::schema::SchemaOrRef;

/// A response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    pub fn json(description: &str, schema: SchemaOrRef) -> Self {
        let mut content = IndexMap::new();
        content.insert(
            APPLICATION_JSON.to_string(),
            MediaType {
                schema: Some(schema),
            },
        );
        Self {
            description: description.to_string(),
            content,
        }
    }
}
