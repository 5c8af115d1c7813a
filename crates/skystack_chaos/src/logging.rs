//! Experiment logging configuration.
//!
//! Two independent logging channels: cloudwatch (log group) and storage
//! (bucket with an optional key prefix). A disabled channel resolves to
//! absent; an enabled channel either borrows the caller's reference or
//! creates a default resource and takes ownership of it.

use serde_json::{json, Value};
use tracing::info;

use skystack_core::{ProvisioningEngine, ResourceHandle, ResourceKind, ResourceRef};

use crate::error::ChaosResult;

/// Schema version the provisioning collaborator currently accepts.
pub const DEFAULT_LOG_SCHEMA_VERSION: u32 = 2;

/// Retention applied to auto-created log groups.
pub const DEFAULT_LOG_RETENTION_DAYS: u32 = 30;

/// Logging configuration input.
#[derive(Debug, Clone, Default)]
pub struct LogProps {
    log_schema_version: Option<u32>,
    cloudwatch_enabled: bool,
    log_group: Option<ResourceHandle>,
    storage_enabled: bool,
    bucket: Option<ResourceHandle>,
    key_prefix: Option<String>,
}

impl LogProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema_version(mut self, version: u32) -> Self {
        self.log_schema_version = Some(version);
        self
    }

    /// Enable cloudwatch logging; a log group is auto-created unless one is
    /// supplied with [`LogProps::with_log_group`].
    pub fn with_cloudwatch(mut self) -> Self {
        self.cloudwatch_enabled = true;
        self
    }

    pub fn with_log_group(mut self, log_group: ResourceHandle) -> Self {
        self.log_group = Some(log_group);
        self
    }

    /// Enable storage logging; a bucket is auto-created unless one is
    /// supplied with [`LogProps::with_bucket`].
    pub fn with_storage(mut self) -> Self {
        self.storage_enabled = true;
        self
    }

    pub fn with_bucket(mut self, bucket: ResourceHandle) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

/// Storage channel after resolution.
#[derive(Debug, Clone)]
struct StorageChannel {
    bucket: ResourceRef<ResourceHandle>,
    key_prefix: Option<String>,
}

/// Logging configuration with every enabled channel bound to a reference.
#[derive(Debug, Clone)]
pub struct ResolvedLogConfiguration {
    log_schema_version: u32,
    cloudwatch: Option<ResourceRef<ResourceHandle>>,
    storage: Option<StorageChannel>,
}

impl ResolvedLogConfiguration {
    /// Resolve both channels, creating default resources where an enabled
    /// channel has no explicit reference. Runs once per configuration.
    pub fn resolve(engine: &dyn ProvisioningEngine, props: LogProps) -> ChaosResult<Self> {
        let cloudwatch = if !props.cloudwatch_enabled {
            None
        } else if let Some(log_group) = props.log_group {
            Some(ResourceRef::Borrowed(log_group))
        } else {
            let handle = engine.create_resource(
                ResourceKind::LogGroup,
                json!({ "retentionInDays": DEFAULT_LOG_RETENTION_DAYS }),
            )?;
            info!("Created default log group '{}'", handle.name);
            Some(ResourceRef::Owned(handle))
        };

        let storage = if !props.storage_enabled {
            None
        } else {
            let bucket = if let Some(bucket) = props.bucket {
                ResourceRef::Borrowed(bucket)
            } else {
                let handle = engine.create_resource(
                    ResourceKind::Bucket,
                    json!({ "encryption": "managed" }),
                )?;
                info!("Created default bucket '{}'", handle.name);
                ResourceRef::Owned(handle)
            };
            Some(StorageChannel {
                bucket,
                key_prefix: props.key_prefix,
            })
        };

        Ok(Self {
            log_schema_version: props
                .log_schema_version
                .unwrap_or(DEFAULT_LOG_SCHEMA_VERSION),
            cloudwatch,
            storage,
        })
    }

    /// Render the log configuration block.
    ///
    /// Each channel's sub-block is gated on that channel having been
    /// enabled; a disabled channel renders as absent.
    pub fn render(&self) -> Value {
        let mut block = json!({ "logSchemaVersion": self.log_schema_version });

        if let Some(log_group) = &self.cloudwatch {
            block["cloudWatchLogsConfiguration"] =
                json!({ "logGroupArn": log_group.get().arn });
        }

        if let Some(storage) = &self.storage {
            let mut s3 = json!({ "bucketName": storage.bucket.get().name });
            if let Some(prefix) = &storage.key_prefix {
                s3["prefix"] = Value::String(prefix.clone());
            }
            block["s3Configuration"] = s3;
        }

        block
    }

    /// Whether the cloudwatch channel owns an auto-created log group.
    pub fn owns_log_group(&self) -> bool {
        self.cloudwatch.as_ref().is_some_and(ResourceRef::is_owned)
    }

    /// Whether the storage channel owns an auto-created bucket.
    pub fn owns_bucket(&self) -> bool {
        self.storage
            .as_ref()
            .is_some_and(|channel| channel.bucket.is_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skystack_core::RecordingEngine;

    #[test]
    fn test_disabled_channels_resolve_to_absent() {
        let engine = RecordingEngine::new();
        let resolved = ResolvedLogConfiguration::resolve(&engine, LogProps::new()).unwrap();

        assert!(engine.creates().is_empty());
        assert_eq!(resolved.render(), json!({ "logSchemaVersion": 2 }));
    }

    #[test]
    fn test_enabled_channel_with_explicit_reference_is_borrowed() {
        let engine = RecordingEngine::new();
        let props = LogProps::new()
            .with_cloudwatch()
            .with_log_group(ResourceHandle::new("arn:lg", "app-logs"));

        let resolved = ResolvedLogConfiguration::resolve(&engine, props).unwrap();

        assert!(!resolved.owns_log_group());
        assert!(engine.creates().is_empty());
        assert_eq!(
            resolved.render()["cloudWatchLogsConfiguration"],
            json!({ "logGroupArn": "arn:lg" })
        );
    }

    #[test]
    fn test_enabled_channel_without_reference_creates_default() {
        let engine = RecordingEngine::new();
        let resolved =
            ResolvedLogConfiguration::resolve(&engine, LogProps::new().with_cloudwatch())
                .unwrap();

        let creates = engine.creates_of(ResourceKind::LogGroup);
        assert_eq!(creates.len(), 1);
        assert_eq!(creates[0].properties, json!({ "retentionInDays": 30 }));
        assert!(resolved.owns_log_group());
    }

    #[test]
    fn test_storage_channel_renders_prefix() {
        let engine = RecordingEngine::new();
        let props = LogProps::new()
            .with_storage()
            .with_bucket(ResourceHandle::new("arn:bucket", "audit"))
            .with_key_prefix("experiments/");

        let resolved = ResolvedLogConfiguration::resolve(&engine, props).unwrap();

        assert_eq!(
            resolved.render()["s3Configuration"],
            json!({ "bucketName": "audit", "prefix": "experiments/" })
        );
        assert!(!resolved.owns_bucket());
    }

    #[test]
    fn test_default_bucket_uses_managed_encryption() {
        let engine = RecordingEngine::new();
        let resolved =
            ResolvedLogConfiguration::resolve(&engine, LogProps::new().with_storage()).unwrap();

        let creates = engine.creates_of(ResourceKind::Bucket);
        assert_eq!(creates[0].properties, json!({ "encryption": "managed" }));
        assert!(resolved.owns_bucket());
    }
}
