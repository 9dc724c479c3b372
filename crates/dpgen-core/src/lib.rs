pub mod config;
pub mod definition;
pub mod diff;
pub mod document;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod publish;
pub mod synthesize;

pub use definition::{Definition, RawDefinition, SchemaShape};
pub use document::ApiDocument;
pub use pipeline::{Pipeline, RunReport, convert_definitions};
