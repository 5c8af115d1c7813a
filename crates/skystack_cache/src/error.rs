//! Error types for the user construct.

use thiserror::Error;

/// Result type alias for user construct operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur while building a user configuration.
///
/// Validation failures are synchronous and fatal to the construction call;
/// they always fire before any engine call is issued. Engine errors are not
/// translated here and pass through unchanged.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Invalid user name '{name}': {reason}")]
    InvalidUserName { name: String, reason: String },

    #[error("Invalid authentication settings: {0}")]
    InvalidAuthentication(String),

    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}
