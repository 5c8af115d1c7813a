//! Opaque secret handles.

use std::fmt;

/// A secret value carried through configuration without exposing it.
///
/// The raw string is obtainable only through [`SecretValue::unsafe_unwrap`],
/// which render code calls at the last possible moment; nothing else in the
/// pipeline sees the plaintext, and `Debug` output redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue {
    plaintext: String,
}

impl SecretValue {
    pub fn new(plaintext: impl Into<String>) -> Self {
        Self {
            plaintext: plaintext.into(),
        }
    }

    /// Expose the raw secret. Call only when writing the final rendered
    /// property bag.
    pub fn unsafe_unwrap(&self) -> &str {
        &self.plaintext
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(***)")
    }
}
