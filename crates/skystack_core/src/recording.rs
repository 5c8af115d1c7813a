//! Recording engine for tests.
//!
//! An in-memory implementation of [`ProvisioningEngine`] and [`AccessGrants`]
//! that captures every call and mints deterministic ARNs, so tests can assert
//! on exactly what a construct submitted without any real provisioning.

use std::cell::RefCell;

use anyhow::anyhow;
use serde_json::Value;

use crate::engine::{AccessGrants, GrantResult, ProvisioningEngine, ResourceKind};
use crate::refs::ResourceHandle;

/// Captured create-resource call.
#[derive(Debug, Clone)]
pub struct CapturedCreate {
    pub kind: ResourceKind,
    pub properties: Value,
    pub handle: ResourceHandle,
}

/// Captured grant call.
#[derive(Debug, Clone)]
pub struct CapturedGrant {
    pub principal_arn: String,
    pub actions: Vec<String>,
    pub resource_arns: Vec<String>,
}

/// In-memory recording engine.
///
/// Single-threaded by design, like the layer it stands in for.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    creates: RefCell<Vec<CapturedCreate>>,
    grants: RefCell<Vec<CapturedGrant>>,
    simulate_failure: RefCell<Option<String>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with the given message.
    pub fn fail_with(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.borrow_mut() = Some(message.into());
        self
    }

    /// All captured create calls, in order.
    pub fn creates(&self) -> Vec<CapturedCreate> {
        self.creates.borrow().clone()
    }

    /// Captured creates of one kind.
    pub fn creates_of(&self, kind: ResourceKind) -> Vec<CapturedCreate> {
        self.creates
            .borrow()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }

    /// All captured grant calls, in order.
    pub fn grants(&self) -> Vec<CapturedGrant> {
        self.grants.borrow().clone()
    }

    fn mint_handle(&self, kind: ResourceKind, properties: &Value) -> ResourceHandle {
        let name = properties
            .get("userName")
            .or_else(|| properties.get("roleName"))
            .or_else(|| properties.get("logGroupName"))
            .or_else(|| properties.get("bucketName"))
            .or_else(|| properties.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{}", kind, self.creates.borrow().len() + 1));

        let arn = format!("arn:aws:recording:local:000000000000:{}:{}", kind, name);
        ResourceHandle::new(arn, name)
    }
}

impl ProvisioningEngine for RecordingEngine {
    fn create_resource(
        &self,
        kind: ResourceKind,
        properties: Value,
    ) -> anyhow::Result<ResourceHandle> {
        if let Some(message) = self.simulate_failure.borrow().as_ref() {
            return Err(anyhow!("{}", message));
        }

        let handle = self.mint_handle(kind, &properties);
        self.creates.borrow_mut().push(CapturedCreate {
            kind,
            properties,
            handle: handle.clone(),
        });
        Ok(handle)
    }
}

impl AccessGrants for RecordingEngine {
    fn grant(
        &self,
        principal_arn: &str,
        actions: &[&str],
        resource_arns: &[&str],
    ) -> anyhow::Result<GrantResult> {
        if let Some(message) = self.simulate_failure.borrow().as_ref() {
            return Err(anyhow!("{}", message));
        }

        let captured = CapturedGrant {
            principal_arn: principal_arn.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            resource_arns: resource_arns.iter().map(|a| a.to_string()).collect(),
        };
        self.grants.borrow_mut().push(captured.clone());

        Ok(GrantResult {
            principal_arn: captured.principal_arn,
            actions: captured.actions,
            resource_arns: captured.resource_arns,
        })
    }
}
