//! Shared AWS SDK configuration.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::debug;

/// Load the AWS configuration used by every client of a run.
///
/// Region is fixed to `region`; credentials come from the default provider
/// chain (environment variables, `AWS_PROFILE` and the shared config files,
/// web identity, container and instance metadata). Credentials are resolved
/// lazily, so loading performs no network I/O.
pub async fn load_sdk_config(region: &str) -> SdkConfig {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .load()
        .await;

    debug!(
        region = %region,
        has_credentials = sdk_config.credentials_provider().is_some(),
        "Loaded AWS configuration"
    );

    sdk_config
}
