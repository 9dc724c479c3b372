use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keywords whose values are instance data, never schemas.
const DATA_KEYWORDS: &[&str] = &["const", "default", "enum", "example", "examples"];

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

/// A `$ref` node. Keywords written next to the reference are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub ref_path: String,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref(Reference),
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    pub fn reference(ref_path: impl Into<String>) -> Self {
        SchemaOrRef::Ref(Reference {
            ref_path: ref_path.into(),
            extra: IndexMap::new(),
        })
    }

    /// Visit every `$ref` path reachable from this node, depth first.
    pub fn try_for_each_ref_mut<E, F>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut String) -> Result<(), E>,
    {
        match self {
            SchemaOrRef::Ref(reference) => {
                f(&mut reference.ref_path)?;
                visit_extra_refs(&mut reference.extra, f)
            }
            SchemaOrRef::Schema(schema) => schema.try_for_each_ref_mut(f),
        }
    }
}

impl From<Schema> for SchemaOrRef {
    fn from(schema: Schema) -> Self {
        SchemaOrRef::Schema(Box::new(schema))
    }
}

/// A JSON Schema object.
///
/// Only the keywords that can nest other schemas are modeled explicitly.
/// Everything else is kept in `extra` so shapes pass through synthesis
/// without losing keywords.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    // Object properties
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    // Array items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    // Composition
    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaOrRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaOrRef>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Schema {
    /// A plain schema of the given type with a title.
    pub fn typed(title: &str, schema_type: SchemaType) -> Self {
        Schema {
            title: Some(title.to_string()),
            schema_type: Some(TypeSet::Single(schema_type)),
            ..Schema::default()
        }
    }

    pub fn try_for_each_ref_mut<E, F>(&mut self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&mut String) -> Result<(), E>,
    {
        for prop in self.properties.values_mut() {
            prop.try_for_each_ref_mut(f)?;
        }
        match self.items.as_mut() {
            Some(Items::Single(item)) => item.try_for_each_ref_mut(f)?,
            Some(Items::Tuple(items)) => {
                for item in items {
                    item.try_for_each_ref_mut(f)?;
                }
            }
            None => {}
        }
        for nested in self
            .all_of
            .iter_mut()
            .chain(self.one_of.iter_mut())
            .chain(self.any_of.iter_mut())
        {
            nested.try_for_each_ref_mut(f)?;
        }
        if let Some(AdditionalProperties::Schema(schema)) = self.additional_properties.as_mut() {
            schema.try_for_each_ref_mut(f)?;
        }
        visit_extra_refs(&mut self.extra, f)
    }
}

/// `items` is one schema for every element, or a list for tuple validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    Single(Box<SchemaOrRef>),
    Tuple(Vec<SchemaOrRef>),
}

impl From<SchemaOrRef> for Items {
    fn from(item: SchemaOrRef) -> Self {
        Items::Single(Box::new(item))
    }
}

/// Visit `$ref` strings under keywords the model keeps untyped (`not`,
/// `if`/`then`/`else`, `patternProperties`, ...).
fn visit_extra_refs<E, F>(extra: &mut IndexMap<String, Value>, f: &mut F) -> Result<(), E>
where
    F: FnMut(&mut String) -> Result<(), E>,
{
    for (keyword, value) in extra.iter_mut() {
        visit_value_refs(keyword, value, f)?;
    }
    Ok(())
}

fn visit_value_refs<E, F>(keyword: &str, value: &mut Value, f: &mut F) -> Result<(), E>
where
    F: FnMut(&mut String) -> Result<(), E>,
{
    if DATA_KEYWORDS.contains(&keyword) {
        return Ok(());
    }
    match value {
        Value::String(ref_path) if keyword == "$ref" => f(ref_path),
        Value::Object(map) => {
            for (key, nested) in map.iter_mut() {
                visit_value_refs(key, nested, f)?;
            }
            Ok(())
        }
        Value::Array(items) => {
            for item in items {
                visit_value_refs("", item, f)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}
