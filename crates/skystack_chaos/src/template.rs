//! Experiment template construct: default resolution and rendering.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use skystack_core::{ProvisioningEngine, ResourceHandle, ResourceKind, ResourceRef};

use crate::error::ChaosResult;
use crate::logging::{LogProps, ResolvedLogConfiguration};

/// Service principal an auto-created execution role is scoped to assume.
pub const SERVICE_PRINCIPAL: &str = "chaos-engine";

/// How target accounts are selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccountTargeting {
    MultiAccount,
    SingleAccount,
}

impl AccountTargeting {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountTargeting::MultiAccount => "multi-account",
            AccountTargeting::SingleAccount => "single-account",
        }
    }
}

/// What happens when a target set resolves to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyTargetResolution {
    Fail,
    Skip,
}

impl EmptyTargetResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyTargetResolution::Fail => "fail",
            EmptyTargetResolution::Skip => "skip",
        }
    }
}

/// A named signal that halts a running experiment.
///
/// The alarm is optional: a condition without one means no conditional alarm
/// gating, just the named source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopCondition {
    source: String,
    alarm: Option<ResourceHandle>,
}

impl StopCondition {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alarm: None,
        }
    }

    pub fn with_alarm(mut self, alarm: ResourceHandle) -> Self {
        self.alarm = Some(alarm);
        self
    }
}

/// Input properties for an experiment template.
#[derive(Debug, Clone)]
pub struct ExperimentTemplateProps {
    description: String,
    role: Option<ResourceHandle>,
    stop_conditions: Vec<StopCondition>,
    targets: Vec<Value>,
    actions: Option<Vec<Value>>,
    account_targeting: AccountTargeting,
    empty_target_resolution: EmptyTargetResolution,
    log_configuration: Option<LogProps>,
}

impl ExperimentTemplateProps {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            role: None,
            stop_conditions: Vec::new(),
            targets: Vec::new(),
            actions: None,
            account_targeting: AccountTargeting::SingleAccount,
            empty_target_resolution: EmptyTargetResolution::Fail,
            log_configuration: None,
        }
    }

    /// Supply an execution role; without one a role is auto-created.
    pub fn with_role(mut self, role: ResourceHandle) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_stop_condition(mut self, condition: StopCondition) -> Self {
        self.stop_conditions.push(condition);
        self
    }

    pub fn with_target(mut self, target: Value) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_action(mut self, action: Value) -> Self {
        self.actions.get_or_insert_with(Vec::new).push(action);
        self
    }

    pub fn with_account_targeting(mut self, mode: AccountTargeting) -> Self {
        self.account_targeting = mode;
        self
    }

    pub fn with_empty_target_resolution(mut self, mode: EmptyTargetResolution) -> Self {
        self.empty_target_resolution = mode;
        self
    }

    pub fn with_log_configuration(mut self, log_configuration: LogProps) -> Self {
        self.log_configuration = Some(log_configuration);
        self
    }
}

/// An experiment template with defaults resolved.
///
/// Resolution may create auxiliary resources (role, log group, bucket), each
/// at most once; rendering afterwards is pure and byte-identical across
/// calls.
#[derive(Debug, Clone)]
pub struct ExperimentTemplateConfiguration {
    description: String,
    role: ResourceRef<ResourceHandle>,
    stop_conditions: Vec<StopCondition>,
    targets: Vec<Value>,
    actions: Option<Vec<Value>>,
    account_targeting: AccountTargeting,
    empty_target_resolution: EmptyTargetResolution,
    log_configuration: Option<ResolvedLogConfiguration>,
}

impl ExperimentTemplateConfiguration {
    /// Resolve defaults in a single pass.
    pub fn resolve(
        engine: &dyn ProvisioningEngine,
        props: ExperimentTemplateProps,
    ) -> ChaosResult<Self> {
        let role = match props.role {
            Some(role) => ResourceRef::Borrowed(role),
            None => {
                let handle = engine.create_resource(
                    ResourceKind::Role,
                    json!({ "assumedBy": SERVICE_PRINCIPAL }),
                )?;
                info!("Created default execution role '{}'", handle.name);
                ResourceRef::Owned(handle)
            }
        };

        let log_configuration = props
            .log_configuration
            .map(|log_props| ResolvedLogConfiguration::resolve(engine, log_props))
            .transpose()?;

        Ok(Self {
            description: props.description,
            role,
            stop_conditions: props.stop_conditions,
            targets: props.targets,
            actions: props.actions,
            account_targeting: props.account_targeting,
            empty_target_resolution: props.empty_target_resolution,
            log_configuration,
        })
    }

    /// The resolved execution role.
    pub fn role(&self) -> &ResourceRef<ResourceHandle> {
        &self.role
    }

    /// Render the template property bag submitted to the engine.
    pub fn render(&self) -> Value {
        debug!("Rendering experiment template '{}'", self.description);

        let mut bag = json!({
            "description": self.description,
            "roleArn": self.role.get().arn,
            "stopConditions": render_stop_conditions(&self.stop_conditions),
            "targets": self.targets,
            "experimentOptions": {
                "accountTargeting": self.account_targeting.as_str(),
                "emptyTargetResolutionMode": self.empty_target_resolution.as_str(),
            },
        });

        if let Some(actions) = &self.actions {
            bag["actions"] = Value::Array(actions.clone());
        }
        if let Some(log_configuration) = &self.log_configuration {
            bag["logConfiguration"] = log_configuration.render();
        }

        bag
    }
}

/// Map stop conditions to their rendered form, preserving input order.
fn render_stop_conditions(conditions: &[StopCondition]) -> Value {
    Value::Array(
        conditions
            .iter()
            .map(|condition| {
                let mut rendered = json!({ "source": condition.source });
                if let Some(alarm) = &condition.alarm {
                    rendered["value"] = Value::String(alarm.arn.clone());
                }
                rendered
            })
            .collect(),
    )
}

/// A provisioned experiment template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentTemplate {
    handle: ResourceHandle,
}

impl ExperimentTemplate {
    /// Resolve, render, and submit a template in one pass.
    ///
    /// Auxiliary resources are created during resolution, then exactly one
    /// template create call is issued.
    pub fn new(
        engine: &dyn ProvisioningEngine,
        props: ExperimentTemplateProps,
    ) -> ChaosResult<Self> {
        let configuration = ExperimentTemplateConfiguration::resolve(engine, props)?;
        let properties = configuration.render();
        let handle = engine.create_resource(ResourceKind::ExperimentTemplate, properties)?;
        info!("Created experiment template '{}' ({})", handle.name, handle.arn);

        Ok(Self { handle })
    }

    pub fn arn(&self) -> &str {
        &self.handle.arn
    }

    pub fn name(&self) -> &str {
        &self.handle.name
    }
}
