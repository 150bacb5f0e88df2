//! Pipeline error type.
//!
//! Each stage reports its own error enum; [`PipelineError`] collects them so
//! the binary has a single place that turns a failure into exit code 1.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::{SynthesisError, TextError, UploadError};

/// Result type for a pipeline run
pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("Synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl PipelineError {
    /// Name of the stage that produced the error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "validate",
            Self::Text(_) => "read",
            Self::Synthesis(_) => "synthesize",
            Self::Upload(_) => "upload",
        }
    }
}
