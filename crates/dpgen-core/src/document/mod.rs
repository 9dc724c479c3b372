pub mod components;
pub mod format;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod spec;

pub use format::DocumentFormat;
pub use spec::{ApiDocument, Info};

/// OpenAPI version declared by every synthesized document.
pub const OPENAPI_VERSION: &str = "3.0.2";
