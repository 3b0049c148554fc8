//! Immutable snapshot of operating environment facts.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Description of an operating environment: OS name, OS version, and CPU
/// architecture.
///
/// Descriptors are plain data, immutable after construction, and built
/// once by the caller from environment facts (or explicitly in tests).
/// The registry never interprets the fields itself; predicates do.
/// Equality and formatting exist for diagnostics only and play no part in
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    name: String,
    version: String,
    architecture: String,
}

impl PlatformDescriptor {
    /// Create a descriptor from environment facts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDescriptor`] if any field is empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        architecture: impl Into<String>,
    ) -> Result<Self> {
        let descriptor = Self {
            name: name.into(),
            version: version.into(),
            architecture: architecture.into(),
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("version", &self.version),
            ("architecture", &self.architecture),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidDescriptor { field });
            }
        }
        Ok(())
    }

    /// Operating system name, e.g. `"Windows 10"` or `"linux"`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Operating system version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// CPU architecture, e.g. `"amd64"` or `"x86_64"`.
    #[must_use]
    pub fn architecture(&self) -> &str {
        &self.architecture
    }
}

impl std::fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.name, self.version, self.architecture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_valid_fields() {
        let descriptor = PlatformDescriptor::new("Windows 10", "10.0", "amd64").unwrap();
        assert_eq!(descriptor.name(), "Windows 10");
        assert_eq!(descriptor.version(), "10.0");
        assert_eq!(descriptor.architecture(), "amd64");
    }

    #[test]
    fn test_new_accepts_owned_and_borrowed_strings() {
        let from_borrowed = PlatformDescriptor::new("Linux", "6.1", "x86_64").unwrap();
        let from_owned = PlatformDescriptor::new(
            String::from("Linux"),
            String::from("6.1"),
            String::from("x86_64"),
        )
        .unwrap();
        assert_eq!(from_borrowed, from_owned);
    }

    #[test]
    fn test_empty_name_rejected() {
        let error = PlatformDescriptor::new("", "10.0", "amd64").unwrap_err();
        assert!(matches!(error, Error::InvalidDescriptor { field: "name" }));
    }

    #[test]
    fn test_empty_version_rejected() {
        let error = PlatformDescriptor::new("Windows 10", "", "amd64").unwrap_err();
        assert!(matches!(error, Error::InvalidDescriptor { field: "version" }));
    }

    #[test]
    fn test_empty_architecture_rejected() {
        let error = PlatformDescriptor::new("Windows 10", "10.0", "").unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidDescriptor {
                field: "architecture"
            }
        ));
    }

    #[test]
    fn test_display() {
        let descriptor = PlatformDescriptor::new("Mac OS X", "14.2", "aarch64").unwrap();
        assert_eq!(descriptor.to_string(), "Mac OS X 14.2 (aarch64)");
    }

    #[test]
    fn test_equality_and_hash() {
        use std::collections::HashSet;

        let a = PlatformDescriptor::new("Linux", "6.1", "x86_64").unwrap();
        let b = PlatformDescriptor::new("Linux", "6.1", "x86_64").unwrap();
        let c = PlatformDescriptor::new("Linux", "6.1", "aarch64").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        set.insert(c);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serialization_round_trip() {
        let descriptor = PlatformDescriptor::new("Windows 10", "10.0", "amd64").unwrap();
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"name\":\"Windows 10\""));
        assert!(json.contains("\"architecture\":\"amd64\""));

        let restored: PlatformDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, descriptor);
    }
}
