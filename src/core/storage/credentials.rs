//! Bridge from the AWS SDK credential chain to `object_store`.
//!
//! `object_store` ships its own S3 credential discovery, which does not read
//! shared config profiles or SSO. Wrapping the SDK provider makes uploads use
//! exactly the credentials Polly uses.

use std::sync::Arc;

use async_trait::async_trait;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use object_store::CredentialProvider;
use object_store::aws::AwsCredential;
use tracing::debug;

/// [`CredentialProvider`] that resolves credentials through an AWS SDK
/// provider.
#[derive(Debug, Clone)]
pub struct SdkCredentialProvider {
    inner: SharedCredentialsProvider,
}

impl SdkCredentialProvider {
    pub fn new(inner: SharedCredentialsProvider) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CredentialProvider for SdkCredentialProvider {
    type Credential = AwsCredential;

    async fn get_credential(&self) -> object_store::Result<Arc<AwsCredential>> {
        let credentials = self.inner.provide_credentials().await.map_err(|e| {
            object_store::Error::Generic {
                store: "S3",
                source: Box::new(e),
            }
        })?;

        debug!("Resolved AWS credentials for S3");

        Ok(Arc::new(AwsCredential {
            key_id: credentials.access_key_id().to_string(),
            secret_key: credentials.secret_access_key().to_string(),
            token: credentials.session_token().map(str::to_string),
        }))
    }
}
