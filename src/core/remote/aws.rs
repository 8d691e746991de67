//! AWS implementations of the remote capabilities.
//!
//! Parameters land in SSM Parameter Store; secret references are synthesized
//! from the caller's STS identity. Credentials and region come from the
//! default provider chain (AWS_ACCESS_KEY_ID, AWS_REGION, profiles, ...).

use aws_sdk_ssm::types::ParameterType;
use tracing::trace;

use super::{ParameterKind, ParameterStore, SecretResolver};
use crate::error::{Result, SyncError};

/// SSM Parameter Store client.
pub struct SsmStore {
    client: aws_sdk_ssm::Client,
}

impl SsmStore {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_ssm::Client::new(config),
        }
    }
}

impl ParameterStore for SsmStore {
    async fn put(
        &self,
        name: &str,
        value: &str,
        kind: ParameterKind,
        overwrite: bool,
    ) -> Result<()> {
        let parameter_type = match kind {
            ParameterKind::Plain => ParameterType::String,
            ParameterKind::Secret => ParameterType::SecureString,
        };

        trace!(name, kind = kind.type_name(), "put-parameter");

        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(parameter_type)
            .overwrite(overwrite)
            .send()
            .await
            .map_err(|e| SyncError::RemoteCall(format!("put-parameter {} failed: {}", name, e)))?;

        Ok(())
    }
}

/// Secret-reference resolver backed by STS `GetCallerIdentity`.
pub struct StsSecretResolver {
    client: aws_sdk_sts::Client,
    region: Option<String>,
}

impl StsSecretResolver {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(config),
            region: config.region().map(|r| r.to_string()),
        }
    }
}

impl SecretResolver for StsSecretResolver {
    async fn resolve(&self, name: &str) -> Result<String> {
        let region = self
            .region
            .as_deref()
            .ok_or_else(|| SyncError::RemoteCall("no AWS region configured".into()))?;

        let identity = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| SyncError::RemoteCall(format!("get-caller-identity failed: {}", e)))?;

        let account_id = identity
            .account()
            .ok_or_else(|| SyncError::RemoteCall("caller identity has no account id".into()))?;

        Ok(format!(
            "arn:aws:ssm:{}:{}:parameter{}",
            region, account_id, name
        ))
    }
}
