pub mod config;
pub mod core;
pub mod errors;
pub mod pipeline;

// Re-export commonly used items for convenience
pub use config::{ConfigError, Environment, PipelineConfig};
pub use crate::core::*;
pub use errors::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineReport};
