//! Error types for the experiment template construct.

use thiserror::Error;

/// Result type alias for experiment template operations.
pub type ChaosResult<T> = Result<T, ChaosError>;

/// Errors surfaced while building an experiment template.
///
/// This construct performs no field validation of its own; the only failures
/// originate in the provisioning collaborator and pass through unchanged.
#[derive(Error, Debug)]
pub enum ChaosError {
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}
