//! Object storage upload of synthesized audio.
//!
//! The uploader pushes a local file to `bucket/key` in one request, tagged
//! with a content type and a small set of descriptive metadata entries. An
//! existing object at the same key is always overwritten.

mod credentials;
mod uploader;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::core::tts::{DEFAULT_VOICE, PollyEngine, PollyOutputFormat};

pub use credentials::SdkCredentialProvider;
pub use uploader::ObjectStoreUploader;

/// Value of the `source` metadata entry on every uploaded object.
pub const METADATA_SOURCE: &str = "polly-pipeline";

/// Result type for uploads
pub type UploadResult<T> = Result<T, UploadError>;

/// Errors raised while uploading a local file.
#[derive(Error, Debug)]
pub enum UploadError {
    /// The local file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    ReadLocal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The object key is not a valid object store path
    #[error("Invalid object key '{key}': {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: object_store::path::Error,
    },

    /// The object store client could not be built
    #[error("Failed to create object store client: {0}")]
    Client(#[source] object_store::Error),

    /// The put request failed
    #[error("Upload to {url} failed: {source}")]
    Store {
        url: String,
        #[source]
        source: object_store::Error,
    },
}

/// Content type and user metadata attached to an uploaded object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub source: String,
    pub voice: String,
    pub engine: String,
}

impl ObjectMetadata {
    /// Metadata describing audio produced by the given voice, engine and format.
    pub fn for_audio(voice: &str, engine: PollyEngine, format: PollyOutputFormat) -> Self {
        Self {
            content_type: format.mime_type().to_string(),
            source: METADATA_SOURCE.to_string(),
            voice: voice.to_string(),
            engine: engine.as_str().to_string(),
        }
    }

    /// User metadata entries as `(name, value)` pairs.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("source", self.source.as_str()),
            ("voice", self.voice.as_str()),
            ("engine", self.engine.as_str()),
        ]
    }
}

impl Default for ObjectMetadata {
    fn default() -> Self {
        Self::for_audio(DEFAULT_VOICE, PollyEngine::Neural, PollyOutputFormat::Mp3)
    }
}

/// Build the `s3://bucket/key` URL of an uploaded object.
pub fn object_url(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

/// A destination that accepts a local file under an object key.
#[async_trait]
pub trait AudioUploader: Send + Sync {
    /// Bucket the uploader writes into.
    fn bucket(&self) -> &str;

    /// Upload the content of `local_path` to `key`, replacing any existing object.
    async fn upload(
        &self,
        local_path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> UploadResult<()>;
}
