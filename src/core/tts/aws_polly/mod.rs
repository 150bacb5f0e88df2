//! Amazon Polly TTS provider module.
//!
//! Synthesizes plain text to MP3 with a fixed voice (`Joanna`) on the neural
//! engine, using the AWS SDK for Rust. Request signing, credential discovery
//! and region endpoints are handled by the SDK.
//!
//! # Authentication
//!
//! AWS credentials are resolved by the default provider chain of the shared
//! [`aws_config::SdkConfig`]:
//! 1. Environment variables: `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`
//! 2. Shared config and credentials files (honouring `AWS_PROFILE`)
//! 3. Web identity, container and instance metadata credentials
//!
//! # Example
//!
//! ```rust,ignore
//! use polly_pipeline::core::tts::{PollySynthesizer, synthesize_to_file};
//!
//! let sdk_config = polly_pipeline::core::aws::load_sdk_config("us-east-1").await;
//! let synthesizer = PollySynthesizer::new(&sdk_config);
//! let size = synthesize_to_file(&synthesizer, "Hello from Amazon Polly!", "output.mp3".as_ref()).await?;
//! ```

mod config;
mod provider;


pub use config::{DEFAULT_VOICE, PollyEngine, PollyOutputFormat};
pub use provider::PollySynthesizer;
