mod common;

use common::*;
use dpgen_core::error::SynthesisError;
use dpgen_core::loader::DefinitionLoader;
use dpgen_core::synthesize::{OpenApiSynthesizer, Synthesizer};
use dpgen_core::{ApiDocument, Definition};
use serde_json::{Value, json};

fn load(relative: &str, content: &str) -> Definition {
    let tmp = tempfile::tempdir().unwrap();
    let artifact = write_file(tmp.path(), relative, content);
    DefinitionLoader::new(tmp.path()).load(&artifact).unwrap()
}

fn synthesize(definition: &Definition) -> ApiDocument {
    OpenApiSynthesizer.synthesize(definition).unwrap()
}

fn header<'a>(operation: &'a Value, name: &str) -> &'a Value {
    operation["parameters"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == name)
        .unwrap_or_else(|| panic!("missing header {name}"))
}

#[test]
fn orders_document_shape() {
    let doc = synthesize(&load("orders/create.yaml", ORDERS_CREATE));
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["openapi"], "3.0.2");
    assert_eq!(value["info"]["title"], "Create order");
    assert_eq!(
        value["info"]["description"],
        "Places a new order for a registered customer."
    );
    assert_eq!(value["info"]["version"], "1.0.0");

    let paths = value["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 1);
    let item = paths["/orders/create"].as_object().unwrap();
    assert_eq!(item.keys().collect::<Vec<_>>(), vec!["post"]);

    let op = &item["post"];
    assert_eq!(op["operationId"], "request_orders_create");
    assert_eq!(op["summary"], "orders/create");
    assert_eq!(op["description"], "Create order");
    assert_eq!(
        op["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/CreateOrderRequest"
    );
    assert_eq!(op["requestBody"]["required"], true);
    assert_eq!(
        op["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/CreateOrderResponse"
    );
    assert_eq!(op["responses"]["200"]["description"], "Successful Response");
    assert_eq!(
        op["responses"]["422"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/HTTPValidationError"
    );
}

#[test]
fn nested_definitions_become_components() {
    let doc = synthesize(&load("orders/create.yaml", ORDERS_CREATE));
    let value = serde_json::to_value(&doc).unwrap();
    let schemas = value["components"]["schemas"].as_object().unwrap();

    assert_eq!(
        schemas.keys().collect::<Vec<_>>(),
        vec![
            "CreateOrderRequest",
            "CreateOrderResponse",
            "HTTPValidationError",
            "OrderLine",
            "ValidationError",
        ]
    );
    assert_eq!(
        schemas["CreateOrderRequest"]["properties"]["lines"]["items"]["$ref"],
        "#/components/schemas/OrderLine"
    );
    // Keywords the document model does not know survive unchanged.
    assert_eq!(schemas["OrderLine"]["properties"]["quantity"]["minimum"], 1);
    assert!(schemas["CreateOrderRequest"].get("definitions").is_none());
}

#[test]
fn authorization_gates_headers() {
    let doc = synthesize(&load("orders/create.yaml", ORDERS_CREATE));
    let value = serde_json::to_value(&doc).unwrap();
    let op = &value["paths"]["/orders/create"]["post"];

    assert_eq!(header(op, "authorization")["required"], true);
    assert_eq!(header(op, "authorization")["in"], "header");
    assert_eq!(header(op, "x-consent-token")["required"], false);
    assert_eq!(header(op, "x-authorization-provider")["required"], false);
    assert!(header(op, "x-authorization-provider")["schema"].get("default").is_none());
}

#[test]
fn consent_gates_headers() {
    let doc = synthesize(&load("weather.json", WEATHER));
    let value = serde_json::to_value(&doc).unwrap();
    let op = &value["paths"]["/weather"]["post"];

    assert_eq!(op["summary"], "Weather now");
    assert_eq!(op["operationId"], "request_weather");
    assert_eq!(header(op, "x-consent-token")["required"], true);
    assert_eq!(header(op, "x-consent-token")["schema"]["title"], "X-Consent-Token");
    assert_eq!(header(op, "authorization")["required"], false);
    assert_eq!(
        value["components"]["schemas"]["WeatherResponse"]["properties"]["conditions"]["enum"],
        json!(["clear", "cloudy", "rain"])
    );
}

#[test]
fn synthesis_is_byte_stable() {
    let def = load("orders/create.yaml", ORDERS_CREATE);
    let first = serde_json::to_string_pretty(&synthesize(&def)).unwrap();
    let second = serde_json::to_string_pretty(&synthesize(&def)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unresolved_reference_fails() {
    let def = load("broken.yaml", UNRESOLVED_REF);
    let err = OpenApiSynthesizer.synthesize(&def).unwrap_err();
    match err {
        SynthesisError::UnresolvedRef {
            definition,
            reference,
        } => {
            assert_eq!(definition, "broken");
            assert_eq!(reference, "#/definitions/Item");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn operation_ids_never_carry_method_suffix() {
    let yaml = "DEFINITION:\n  summary: S\n  request: {title: Req, type: object}\n  response: {title: Resp, type: object}\n";
    for name in ["a", "orders/create", "deeply/nested/route_name"] {
        let doc = synthesize(&load(&format!("{name}.yaml"), yaml));
        let op = doc.paths[&format!("/{name}")].post.as_ref().unwrap();
        let id = op.operation_id.as_deref().unwrap();
        assert!(!id.ends_with("_post"), "{id}");
        assert!(id.starts_with("request_"), "{id}");
    }
}

const ANNOTATED_REFS: &str = r##"DEFINITION:
  summary: Annotated refs
  request:
    title: AnnotatedRequest
    type: object
    properties:
      item:
        $ref: "#/definitions/Item"
        description: The ordered item
      other:
        not:
          $ref: "#/definitions/Item"
      pair:
        type: array
        items:
          - type: string
          - $ref: "#/definitions/Item"
    definitions:
      Item:
        title: Item
        type: object
  response:
    title: AnnotatedResponse
    type: object
"##;

#[test]
fn ref_annotations_pass_through() {
    let doc = synthesize(&load("annotated.yaml", ANNOTATED_REFS));
    let value = serde_json::to_value(&doc).unwrap();
    let properties = &value["components"]["schemas"]["AnnotatedRequest"]["properties"];

    assert_eq!(
        properties["item"],
        json!({ "$ref": "#/components/schemas/Item", "description": "The ordered item" })
    );
}

#[test]
fn refs_under_untyped_keywords_are_rewritten() {
    let doc = synthesize(&load("annotated.yaml", ANNOTATED_REFS));
    let value = serde_json::to_value(&doc).unwrap();
    let properties = &value["components"]["schemas"]["AnnotatedRequest"]["properties"];

    assert_eq!(
        properties["other"],
        json!({ "not": { "$ref": "#/components/schemas/Item" } })
    );
    assert_eq!(
        properties["pair"]["items"],
        json!([{ "type": "string" }, { "$ref": "#/components/schemas/Item" }])
    );
}

#[test]
fn unresolved_reference_under_untyped_keyword_fails() {
    let yaml = r##"DEFINITION:
  summary: Dangling
  request:
    title: DanglingRequest
    type: object
    properties:
      other:
        not:
          $ref: "#/definitions/Missing"
  response:
    title: DanglingResponse
    type: object
"##;
    let err = OpenApiSynthesizer
        .synthesize(&load("dangling.yaml", yaml))
        .unwrap_err();
    assert!(matches!(
        err,
        SynthesisError::UnresolvedRef { ref reference, .. } if reference == "#/definitions/Missing"
    ));
}
