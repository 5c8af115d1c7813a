//! Resource references and ownership tagging.

use serde::{Deserialize, Serialize};

/// Reference to a resource, tagged with who owns it.
///
/// A configuration that auto-creates a default sub-resource (role, log
/// group, bucket) owns it exclusively; a caller-supplied reference stays
/// external and is only borrowed. The tag makes that distinction explicit
/// instead of leaving it to optional-field presence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceRef<T> {
    /// Created by the configuration during default resolution.
    Owned(T),
    /// Supplied by the caller; ownership stays external.
    Borrowed(T),
}

impl<T> ResourceRef<T> {
    pub fn get(&self) -> &T {
        match self {
            ResourceRef::Owned(inner) | ResourceRef::Borrowed(inner) => inner,
        }
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, ResourceRef::Owned(_))
    }
}

/// Opaque reference returned by the provisioning engine.
///
/// Returned synchronously and immediately usable for ARN-style address
/// formatting; the actual provisioning happens later, out of process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHandle {
    /// ARN-like identifier.
    pub arn: String,
    /// Resolved resource name.
    pub name: String,
}

impl ResourceHandle {
    pub fn new(arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_ownership_tag() {
        let owned = ResourceRef::Owned(ResourceHandle::new("arn:a", "a"));
        let borrowed = ResourceRef::Borrowed(ResourceHandle::new("arn:b", "b"));

        assert!(owned.is_owned());
        assert!(!borrowed.is_owned());
        assert_eq!(owned.get().name, "a");
        assert_eq!(borrowed.get().arn, "arn:b");
    }
}
