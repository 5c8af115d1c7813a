//! Authentication modes for database users.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use skystack_core::SecretValue;

/// How a user authenticates against the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationType {
    Password,
    Iam,
}

impl AuthenticationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticationType::Password => "password",
            AuthenticationType::Iam => "iam",
        }
    }
}

impl std::fmt::Display for AuthenticationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render the authentication-mode descriptor.
///
/// `Passwords` appears only when credentials were supplied. This is the one
/// place secrets are unwrapped; everything upstream handles opaque handles.
pub(crate) fn render_authentication_mode(
    authentication_type: AuthenticationType,
    passwords: &[SecretValue],
) -> Value {
    let mut mode = json!({ "Type": authentication_type.as_str() });
    if !passwords.is_empty() {
        mode["Passwords"] = Value::Array(
            passwords
                .iter()
                .map(|p| Value::String(p.unsafe_unwrap().to_string()))
                .collect(),
        );
    }
    mode
}
