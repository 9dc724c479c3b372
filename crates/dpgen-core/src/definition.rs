//! Data product definitions.
//!
//! A [`RawDefinition`] is what a source artifact declares under its
//! `DEFINITION` key. The loader turns it into a [`Definition`] by assigning the
//! canonical name and filling defaults in [`RawDefinition::normalize`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::schema::{Schema, SchemaOrRef};

/// A request or response shape: a JSON Schema object plus the named schemas
/// it references through `#/definitions/...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaShape {
    #[serde(flatten)]
    pub schema: Schema,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SchemaOrRef>,
}

impl SchemaShape {
    /// The component name this shape is published under.
    pub fn title(&self) -> Option<&str> {
        self.schema
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

impl From<Schema> for SchemaShape {
    fn from(schema: Schema) -> Self {
        SchemaShape {
            schema,
            definitions: IndexMap::new(),
        }
    }
}

/// The definition exactly as declared by a source artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefinition {
    pub summary: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub route_description: Option<String>,

    #[serde(default)]
    pub route_summary: Option<String>,

    #[serde(default)]
    pub requires_authorization: bool,

    #[serde(default)]
    pub requires_consent: bool,

    pub request: SchemaShape,

    pub response: SchemaShape,
}

/// The contract for one data product route, with every default resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub summary: String,
    pub description: String,
    pub route_description: String,
    pub route_summary: String,
    pub requires_authorization: bool,
    pub requires_consent: bool,
    pub request: SchemaShape,
    pub response: SchemaShape,
}

impl RawDefinition {
    /// Minimal definition with only the required fields set.
    pub fn new(summary: impl Into<String>, request: SchemaShape, response: SchemaShape) -> Self {
        RawDefinition {
            summary: summary.into(),
            description: None,
            route_description: None,
            route_summary: None,
            requires_authorization: false,
            requires_consent: false,
            request,
            response,
        }
    }

    /// Assign `name` and resolve defaults. Empty strings count as unset.
    pub fn normalize(self, name: impl Into<String>) -> Definition {
        let name = name.into();
        let description = non_empty(self.description).unwrap_or_else(|| self.summary.clone());
        let route_description =
            non_empty(self.route_description).unwrap_or_else(|| self.summary.clone());
        let route_summary = non_empty(self.route_summary).unwrap_or_else(|| name.clone());

        Definition {
            name,
            summary: self.summary,
            description,
            route_description,
            route_summary,
            requires_authorization: self.requires_authorization,
            requires_consent: self.requires_consent,
            request: self.request,
            response: self.response,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
