use heck::{ToKebabCase, ToTrainCase};

use crate::definition::Definition;
use crate::document::parameter::{Parameter, ParameterLocation};
use crate::document::schema::{Schema, SchemaType};

pub const CONSENT_TOKEN: &str = "x_consent_token";
pub const AUTHORIZATION: &str = "authorization";
pub const AUTHORIZATION_PROVIDER: &str = "x_authorization_provider";

pub const CONSENT_REQUIRED_DESCRIPTION: &str = "Consent token";
pub const CONSENT_OPTIONAL_DESCRIPTION: &str = "Optional consent token";
pub const AUTHORIZATION_DESCRIPTION: &str = "The login token. Value should be \"Bearer [token]\"";
pub const AUTHORIZATION_PROVIDER_DESCRIPTION: &str =
    "The bare domain of the system that provided the token.";

/// Header parameters for a definition: consent token, authorization and
/// authorization provider, in that order.
pub fn header_parameters(definition: &Definition) -> Vec<Parameter> {
    let consent_description = if definition.requires_consent {
        CONSENT_REQUIRED_DESCRIPTION
    } else {
        CONSENT_OPTIONAL_DESCRIPTION
    };

    vec![
        string_header(CONSENT_TOKEN, consent_description, definition.requires_consent),
        string_header(
            AUTHORIZATION,
            AUTHORIZATION_DESCRIPTION,
            definition.requires_authorization,
        ),
        string_header(
            AUTHORIZATION_PROVIDER,
            AUTHORIZATION_PROVIDER_DESCRIPTION,
            false,
        ),
    ]
}

/// A string header. `field` is the snake_case handler argument name; the
/// wire name is its kebab-case form and the schema title its Train-Case form.
/// Optional headers carry no default value.
fn string_header(field: &str, description: &str, required: bool) -> Parameter {
    Parameter {
        name: field.to_kebab_case(),
        location: ParameterLocation::Header,
        description: Some(description.to_string()),
        required,
        schema: Some(Schema::typed(&field.to_train_case(), SchemaType::String)),
    }
}
