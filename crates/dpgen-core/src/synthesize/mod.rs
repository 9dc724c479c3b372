pub mod components;
pub mod headers;
pub mod operation_id;

use indexmap::IndexMap;

use crate::definition::Definition;
use crate::document::operation::{HttpMethod, Operation, PathItem};
use crate::document::request_body::RequestBody;
use crate::document::response::Response;
use crate::document::{ApiDocument, Info, OPENAPI_VERSION};
use crate::error::SynthesisError;

use components::{ComponentRegistry, ShapeRole};
use headers::header_parameters;
use operation_id::{normalize_operation_ids, raw_operation_id};

pub use operation_id::strip_method_suffix;

/// Version string written into every document's `info` block.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Name of the handler each definition's route is registered under.
const HANDLER_NAME: &str = "request";

/// Turns a definition into an API description document.
pub trait Synthesizer {
    fn synthesize(&self, definition: &Definition) -> Result<ApiDocument, SynthesisError>;
}

/// Builds OpenAPI 3.0 documents directly from definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenApiSynthesizer;

impl Synthesizer for OpenApiSynthesizer {
    fn synthesize(&self, definition: &Definition) -> Result<ApiDocument, SynthesisError> {
        build_document(definition)
    }
}

/// Build the document for one definition: a single `POST /{name}` operation.
pub fn build_document(definition: &Definition) -> Result<ApiDocument, SynthesisError> {
    let path = format!("/{}", definition.name);

    let mut registry = ComponentRegistry::new(&definition.name);
    let request_schema = registry.hoist(ShapeRole::Request, &definition.request)?;
    let response_schema = registry.hoist(ShapeRole::Response, &definition.response)?;
    let validation_error = registry.insert_validation_errors()?;

    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response::json("Successful Response", response_schema),
    );
    responses.insert(
        "422".to_string(),
        Response::json("Validation Error", validation_error),
    );

    let operation = Operation {
        summary: Some(definition.route_summary.clone()),
        description: Some(definition.route_description.clone()),
        operation_id: Some(raw_operation_id(HANDLER_NAME, &path, HttpMethod::Post)),
        parameters: header_parameters(definition),
        request_body: Some(RequestBody::json(request_schema)),
        responses,
    };

    let mut paths = IndexMap::new();
    paths.insert(path, PathItem::with_operation(HttpMethod::Post, operation));

    let mut document = ApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: definition.summary.clone(),
            description: Some(definition.description.clone()),
            version: DOCUMENT_VERSION.to_string(),
        },
        paths,
        components: Some(registry.finish()?),
    };

    normalize_operation_ids(&mut document);
    Ok(document)
}
