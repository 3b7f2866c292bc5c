//! Builder configuration and error types

mod errors;
mod options;

pub use errors::BuildError;
pub use options::{BuilderConfig, GeneratorConfig};
