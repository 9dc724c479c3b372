use indexmap::IndexMap;

use crate::definition::SchemaShape;
use crate::document::components::{Components, SCHEMA_REF_PREFIX, schema_ref};
use crate::document::schema::{Schema, SchemaOrRef, SchemaType, TypeSet};
use crate::error::SynthesisError;

/// Reference prefix used by shapes for their own nested definitions.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

pub const VALIDATION_ERROR: &str = "ValidationError";
pub const HTTP_VALIDATION_ERROR: &str = "HTTPValidationError";

/// Which side of the operation a shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeRole {
    Request,
    Response,
}

impl ShapeRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeRole::Request => "request",
            ShapeRole::Response => "response",
        }
    }
}

/// Collects component schemas for one document.
pub struct ComponentRegistry<'a> {
    definition: &'a str,
    schemas: IndexMap<String, SchemaOrRef>,
}

impl<'a> ComponentRegistry<'a> {
    pub fn new(definition: &'a str) -> Self {
        Self {
            definition,
            schemas: IndexMap::new(),
        }
    }

    /// Register a schema. Registering an identical schema twice is allowed.
    pub fn insert(&mut self, name: &str, schema: SchemaOrRef) -> Result<(), SynthesisError> {
        match self.schemas.get(name) {
            Some(existing) if *existing != schema => Err(SynthesisError::ConflictingSchema {
                definition: self.definition.to_string(),
                component: name.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.schemas.insert(name.to_string(), schema);
                Ok(())
            }
        }
    }

    /// Hoist a shape and its nested definitions into the components, and
    /// return a reference to the shape.
    pub fn hoist(&mut self, role: ShapeRole, shape: &SchemaShape) -> Result<SchemaOrRef, SynthesisError> {
        let title = shape
            .title()
            .ok_or_else(|| SynthesisError::MissingTitle {
                definition: self.definition.to_string(),
                role: role.as_str(),
            })?
            .to_string();

        for (name, nested) in &shape.definitions {
            let mut nested = nested.clone();
            self.rewrite_refs(&mut nested, shape, &title)?;
            self.insert(name, nested)?;
        }

        let mut root = SchemaOrRef::from(shape.schema.clone());
        self.rewrite_refs(&mut root, shape, &title)?;
        self.insert(&title, root)?;

        Ok(SchemaOrRef::reference(schema_ref(&title)))
    }

    /// Point `#/definitions/X` references at the hoisted component.
    fn rewrite_refs(
        &self,
        schema: &mut SchemaOrRef,
        shape: &SchemaShape,
        title: &str,
    ) -> Result<(), SynthesisError> {
        schema.try_for_each_ref_mut(&mut |ref_path: &mut String| {
            if let Some(name) = ref_path.strip_prefix(DEFINITIONS_REF_PREFIX) {
                if name != title && !shape.definitions.contains_key(name) {
                    return Err(self.unresolved(ref_path));
                }
                *ref_path = schema_ref(name);
            }
            Ok(())
        })
    }

    /// Add the validation error schemas referenced by the 422 response.
    pub fn insert_validation_errors(&mut self) -> Result<SchemaOrRef, SynthesisError> {
        self.insert(VALIDATION_ERROR, validation_error_schema().into())?;
        self.insert(HTTP_VALIDATION_ERROR, http_validation_error_schema().into())?;
        Ok(SchemaOrRef::reference(schema_ref(HTTP_VALIDATION_ERROR)))
    }

    /// Check every remaining reference resolves and produce the components
    /// object, sorted by schema name.
    pub fn finish(mut self) -> Result<Components, SynthesisError> {
        let known: Vec<String> = self.schemas.keys().cloned().collect();
        for schema in self.schemas.values_mut() {
            schema.try_for_each_ref_mut(&mut |ref_path: &mut String| {
                let resolved = ref_path
                    .strip_prefix(SCHEMA_REF_PREFIX)
                    .is_some_and(|name| known.iter().any(|k| k == name));
                if resolved {
                    Ok(())
                } else {
                    Err(SynthesisError::UnresolvedRef {
                        definition: self.definition.to_string(),
                        reference: ref_path.clone(),
                    })
                }
            })?;
        }
        self.schemas.sort_keys();
        Ok(Components {
            schemas: self.schemas,
        })
    }

    fn unresolved(&self, ref_path: &str) -> SynthesisError {
        SynthesisError::UnresolvedRef {
            definition: self.definition.to_string(),
            reference: ref_path.to_string(),
        }
    }
}

fn validation_error_schema() -> Schema {
    let mut loc_items = Schema::default();
    loc_items.any_of = vec![
        Schema {
            schema_type: Some(TypeSet::Single(SchemaType::String)),
            ..Schema::default()
        }
        .into(),
        Schema {
            schema_type: Some(TypeSet::Single(SchemaType::Integer)),
            ..Schema::default()
        }
        .into(),
    ];

    let mut loc = Schema::typed("Location", SchemaType::Array);
    loc.items = Some(SchemaOrRef::from(loc_items).into());

    let mut schema = Schema::typed(VALIDATION_ERROR, SchemaType::Object);
    schema.required = vec!["loc".to_string(), "msg".to_string(), "type".to_string()];
    schema.properties.insert("loc".to_string(), loc.into());
    schema.properties.insert(
        "msg".to_string(),
        Schema::typed("Message", SchemaType::String).into(),
    );
    schema.properties.insert(
        "type".to_string(),
        Schema::typed("Error Type", SchemaType::String).into(),
    );
    schema
}

fn http_validation_error_schema() -> Schema {
    let mut detail = Schema::typed("Detail", SchemaType::Array);
    detail.items = Some(SchemaOrRef::reference(schema_ref(VALIDATION_ERROR)).into());

    let mut schema = Schema::typed(HTTP_VALIDATION_ERROR, SchemaType::Object);
    schema.properties.insert("detail".to_string(), detail.into());
    schema
}
