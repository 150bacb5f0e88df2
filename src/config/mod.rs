//! Configuration module for the Polly pipeline
//!
//! Configuration comes from environment variables only. The two local file
//! paths default to `speech.txt` and `output.mp3` in the working directory and
//! can be overridden from the command line.
//!
//! # Environment variables
//! - `S3_BUCKET_NAME`: target bucket (required)
//! - `AWS_REGION`: region for Polly and S3 (default `us-east-1`)
//! - `ENVIRONMENT`: `dev`, `beta` or `prod` (default `dev`), selects the object key
//!
//! # Example
//! ```rust,no_run
//! use polly_pipeline::config::PipelineConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::from_env()?;
//! println!("Uploading to s3://{}/{}", config.bucket_name, config.object_key());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable holding the target bucket name.
pub const BUCKET_NAME_VAR: &str = "S3_BUCKET_NAME";
/// Environment variable holding the AWS region.
pub const REGION_VAR: &str = "AWS_REGION";
/// Environment variable selecting the deployment environment.
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "us-east-1";
/// Default input text file, relative to the working directory.
pub const DEFAULT_INPUT_FILE: &str = "speech.txt";
/// Default output audio file, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "output.mp3";

/// Prefix shared by every uploaded object key.
const OBJECT_KEY_PREFIX: &str = "polly-audio";

/// Errors raised while validating process configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "S3_BUCKET_NAME environment variable not set. \
         Set it with: export S3_BUCKET_NAME='your-bucket-name'"
    )]
    MissingBucketName,
}

// =============================================================================
// Deployment environment
// =============================================================================

/// Deployment environment the audio is produced for.
///
/// Each environment owns exactly one object key in the bucket, so a new run
/// overwrites the previous artifact of the same environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Dev,
    Beta,
    Prod,
}

impl Environment {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Beta => "beta",
            Self::Prod => "prod",
        }
    }

    /// Parse from string, with fallback to `Dev` for anything unrecognized.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "beta" => Self::Beta,
            "prod" => Self::Prod,
            _ => Self::Dev,
        }
    }

    /// Object key the synthesized audio is stored under.
    pub fn object_key(&self) -> String {
        format!("{}/{}.mp3", OBJECT_KEY_PREFIX, self.as_str())
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Pipeline configuration
// =============================================================================

/// Validated configuration for a single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub bucket_name: String,
    pub aws_region: String,
    pub environment: Environment,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl PipelineConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails with [`ConfigError::MissingBucketName`] when `S3_BUCKET_NAME` is
    /// unset or empty. Nothing else is touched before this check.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bucket_name = non_empty(BUCKET_NAME_VAR).ok_or(ConfigError::MissingBucketName)?;
        let aws_region = non_empty(REGION_VAR).unwrap_or_else(|| DEFAULT_REGION.to_string());
        let environment = non_empty(ENVIRONMENT_VAR)
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        Ok(Self {
            bucket_name,
            aws_region,
            environment,
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        })
    }

    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Object key derived from the configured environment.
    pub fn object_key(&self) -> String {
        self.environment.object_key()
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
