//! # skystack_cache
//!
//! Construct wrapper for a managed in-memory database **user** (principal).
//!
//! The wrapper follows the validate → resolve defaults → render → submit
//! pipeline: it checks the principal's name and authentication settings,
//! fills in an auto-generated name and a fully-restrictive access string
//! where the caller left them out, renders the flat property bag, and issues
//! exactly one create call against the provisioning engine.
//!
//! ## Example
//!
//! ```rust
//! use skystack_cache::{AuthenticationType, Principal, User, UserProps};
//! use skystack_core::{NamingContext, RecordingEngine, SecretValue};
//!
//! let engine = RecordingEngine::new();
//! let ctx = NamingContext::new(["Prod"], "AppUser");
//!
//! let user = User::new(
//!     &engine,
//!     &ctx,
//!     UserProps::new(AuthenticationType::Password)
//!         .with_user_name("alice-1")
//!         .with_password(SecretValue::new("s3cret")),
//! )
//! .unwrap();
//!
//! assert_eq!(user.user_name(), "alice-1");
//! ```

pub mod auth;
pub mod error;
pub mod user;

pub use auth::AuthenticationType;
pub use error::{CacheError, CacheResult};
pub use user::{Principal, User, UserConfiguration, UserProps, CONNECT_ACTION, DEFAULT_ACCESS_STRING};
