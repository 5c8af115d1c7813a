//! Collaborator interfaces.
//!
//! The construct layer does no provisioning of its own. It renders flat
//! property bags and hands them to a [`ProvisioningEngine`]; access grants
//! go through [`AccessGrants`]. Both collaborators are synchronous from this
//! layer's point of view and return opaque references immediately — the
//! engine performs the actual resource creation later, out of process.
//!
//! Collaborator errors are carried as [`anyhow::Error`] and propagate to the
//! caller unchanged; nothing in this layer catches or translates them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::refs::ResourceHandle;

/// Resource kinds this layer submits to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    User,
    Role,
    LogGroup,
    Bucket,
    ExperimentTemplate,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::User => "user",
            ResourceKind::Role => "role",
            ResourceKind::LogGroup => "log-group",
            ResourceKind::Bucket => "bucket",
            ResourceKind::ExperimentTemplate => "experiment-template",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resource-provisioning collaborator.
///
/// Accepts a flat property bag per resource kind and returns a reference
/// exposing an ARN-like identifier and a resolved name.
pub trait ProvisioningEngine {
    fn create_resource(&self, kind: ResourceKind, properties: Value)
        -> anyhow::Result<ResourceHandle>;
}

/// Grant/access collaborator.
pub trait AccessGrants {
    fn grant(
        &self,
        principal_arn: &str,
        actions: &[&str],
        resource_arns: &[&str],
    ) -> anyhow::Result<GrantResult>;
}

/// Outcome of a grant issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantResult {
    pub principal_arn: String,
    pub actions: Vec<String>,
    pub resource_arns: Vec<String>,
}

/// Deployment environment used for deterministic ARN formatting.
///
/// The import path derives ARNs without any provisioning call; that needs
/// the partition/region/account triple to be explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub partition: String,
    pub region: String,
    pub account: String,
}

impl Environment {
    pub fn new(
        partition: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        Self {
            partition: partition.into(),
            region: region.into(),
            account: account.into(),
        }
    }

    /// Format an ARN from a service, a fixed resource-type segment, and a
    /// resource name.
    pub fn format_arn(&self, service: &str, resource_type: &str, name: &str) -> String {
        format!(
            "arn:{}:{}:{}:{}:{}:{}",
            self.partition, service, self.region, self.account, resource_type, name
        )
    }
}
