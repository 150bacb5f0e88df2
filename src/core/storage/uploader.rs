use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_config::SdkConfig;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload, RetryConfig};
use tracing::{debug, error, info};

use super::credentials::SdkCredentialProvider;
use super::{AudioUploader, ObjectMetadata, UploadError, UploadResult, object_url};

/// Upper bound on the time spent on a single upload, retries included.
const UPLOAD_RETRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry policy for S3 puts: one attempt, so a failed upload surfaces
/// immediately instead of after the client's default backoff.
fn upload_retry_config() -> RetryConfig {
    RetryConfig {
        max_retries: 0,
        retry_timeout: UPLOAD_RETRY_TIMEOUT,
        ..Default::default()
    }
}

/// [`AudioUploader`] writing into any [`ObjectStore`] implementation.
///
/// Production runs use [`ObjectStoreUploader::for_s3`]; any other store (such
/// as `object_store::memory::InMemory`) can be wrapped with
/// [`ObjectStoreUploader::new`].
pub struct ObjectStoreUploader {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreUploader {
    pub fn new(bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            bucket: bucket.into(),
            store,
        }
    }

    /// Build an Amazon S3 uploader bound to `bucket`.
    ///
    /// Region, endpoint override and credentials come from `sdk_config`, the
    /// same configuration the Polly client is built from. No request is sent
    /// until the first upload.
    pub fn for_s3(bucket: &str, sdk_config: &SdkConfig) -> UploadResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .with_retry(upload_retry_config());

        if let Some(region) = sdk_config.region() {
            builder = builder.with_region(region.as_ref());
        }
        if let Some(endpoint) = sdk_config.endpoint_url() {
            builder = builder
                .with_endpoint(endpoint)
                .with_allow_http(endpoint.starts_with("http://"));
        }
        if let Some(provider) = sdk_config.credentials_provider() {
            builder = builder.with_credentials(Arc::new(SdkCredentialProvider::new(provider)));
        }

        let store = builder.build().map_err(UploadError::Client)?;

        Ok(Self::new(bucket, Arc::new(store)))
    }

    fn put_options(metadata: &ObjectMetadata) -> PutOptions {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, metadata.content_type.clone().into());
        for (name, value) in metadata.entries() {
            attributes.insert(Attribute::Metadata(name.into()), value.to_string().into());
        }

        PutOptions {
            attributes,
            ..Default::default()
        }
    }
}

#[async_trait]
impl AudioUploader for ObjectStoreUploader {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(
        &self,
        local_path: &Path,
        key: &str,
        metadata: &ObjectMetadata,
    ) -> UploadResult<()> {
        let url = object_url(&self.bucket, key);
        info!(bucket = %self.bucket, key = %key, "Uploading audio to object store");

        let object_path = ObjectPath::parse(key).map_err(|source| UploadError::InvalidKey {
            key: key.to_string(),
            source,
        })?;

        let body = tokio::fs::read(local_path)
            .await
            .map_err(|source| UploadError::ReadLocal {
                path: local_path.to_path_buf(),
                source,
            })?;
        let size = body.len();

        debug!(
            local = %local_path.display(),
            size_bytes = size,
            content_type = %metadata.content_type,
            "Sending put request"
        );

        self.store
            .put_opts(
                &object_path,
                PutPayload::from(Bytes::from(body)),
                Self::put_options(metadata),
            )
            .await
            .map_err(|source| {
                error!(url = %url, error = %source, "Object store put failed");
                UploadError::Store {
                    url: url.clone(),
                    source,
                }
            })?;

        info!(url = %url, size_bytes = size, "Upload successful");
        Ok(())
    }
}
