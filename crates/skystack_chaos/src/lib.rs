//! # skystack_chaos
//!
//! Construct wrapper for a fault-injection **experiment template**.
//!
//! The wrapper resolves defaults — an auto-created execution role and, per
//! logging channel, an auto-created log group or bucket — renders the nested
//! template structure (stop conditions, targets, actions, experiment
//! options, logging sub-configs), and issues exactly one create call against
//! the provisioning engine. Auto-created sub-resources are owned by the
//! configuration; caller-supplied references stay external.
//!
//! ## Example
//!
//! ```rust
//! use skystack_chaos::{ExperimentTemplate, ExperimentTemplateProps, StopCondition};
//! use skystack_core::RecordingEngine;
//!
//! let engine = RecordingEngine::new();
//! let template = ExperimentTemplate::new(
//!     &engine,
//!     ExperimentTemplateProps::new("inject latency into the checkout tier")
//!         .with_stop_condition(StopCondition::new("none")),
//! )
//! .unwrap();
//!
//! assert!(!template.arn().is_empty());
//! ```

pub mod error;
pub mod logging;
pub mod template;

pub use error::{ChaosError, ChaosResult};
pub use logging::{
    LogProps, ResolvedLogConfiguration, DEFAULT_LOG_RETENTION_DAYS, DEFAULT_LOG_SCHEMA_VERSION,
};
pub use template::{
    AccountTargeting, EmptyTargetResolution, ExperimentTemplate,
    ExperimentTemplateConfiguration, ExperimentTemplateProps, StopCondition, SERVICE_PRINCIPAL,
};
