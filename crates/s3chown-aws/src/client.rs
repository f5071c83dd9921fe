//! AWS client configuration.

use aws_config::{BehaviorVersion, SdkConfig};

use crate::TRACING_TARGET;

/// Loads the ambient AWS configuration.
///
/// Credentials and region resolve through the standard provider chain
/// (environment, shared profile, IMDS). The returned config is reused for
/// the shared client and for every worker-exclusive handle.
pub async fn load_sdk_config() -> SdkConfig {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    tracing::debug!(
        target: TRACING_TARGET,
        region = ?config.region(),
        "Loaded AWS configuration"
    );

    config
}
