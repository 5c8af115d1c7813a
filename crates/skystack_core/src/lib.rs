//! # skystack_core
//!
//! Shared substrate for skystack construct wrappers.
//!
//! Construct wrappers translate typed configuration into flat property bags
//! and hand them to a provisioning engine that creates the actual cloud
//! resources out of process. This crate holds the pieces every wrapper
//! needs:
//!
//! - **Deferred values**: names not known until render time, resolved
//!   against an explicit [`NamingContext`]
//! - **Resource references**: [`ResourceRef`] distinguishing auto-created
//!   (owned) from caller-supplied (borrowed) resources
//! - **Secret handles**: [`SecretValue`], unwrapped only at render
//! - **Collaborator interfaces**: [`ProvisioningEngine`] and [`AccessGrants`]
//! - **Recording engine**: an in-memory engine for tests
//!
//! ## Example
//!
//! ```rust
//! use skystack_core::{LazyName, NameRequest, NamingContext};
//!
//! let ctx = NamingContext::new(["Prod", "CacheStack"], "AppUser");
//! let name = LazyName::Deferred(NameRequest::new(40, '-'));
//! assert_eq!(name.resolve(&ctx), "prod-cachestack-appuser");
//! ```

pub mod engine;
pub mod lazy;
pub mod recording;
pub mod refs;
pub mod secret;

pub use engine::{AccessGrants, Environment, GrantResult, ProvisioningEngine, ResourceKind};
pub use lazy::{LazyName, NameRequest, NamingContext};
pub use recording::{CapturedCreate, CapturedGrant, RecordingEngine};
pub use refs::{ResourceHandle, ResourceRef};
pub use secret::SecretValue;
