//! CPU architecture predicates.

use platdep_registry::{BoxError, PlatformDescriptor, PlatformPredicate};

fn architecture_in(descriptor: &PlatformDescriptor, aliases: &[&str]) -> bool {
    let architecture = descriptor.architecture().to_ascii_lowercase();
    aliases.iter().any(|alias| architecture == *alias)
}

/// Matches 64-bit x86 descriptors: `amd64`, `x86_64`, or `x64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Amd64Predicate;

impl PlatformPredicate for Amd64Predicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        architecture_in(descriptor, &["amd64", "x86_64", "x64"])
    }
}

/// Matches 32-bit x86 descriptors: exactly `x86`.
#[derive(Debug, Default, Clone, Copy)]
pub struct X86Predicate;

impl PlatformPredicate for X86Predicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        architecture_in(descriptor, &["x86"])
    }
}

/// Matches 64-bit ARM descriptors: `arm64` or `aarch64`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Arm64Predicate;

impl PlatformPredicate for Arm64Predicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        architecture_in(descriptor, &["arm64", "aarch64"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(architecture: &str) -> PlatformDescriptor {
        PlatformDescriptor::new("Linux", "6.1", architecture).unwrap()
    }

    #[test]
    fn test_amd64_matches_all_aliases() {
        let predicate = Amd64Predicate::instantiate().unwrap();
        assert!(predicate.matches(&descriptor("amd64")));
        assert!(predicate.matches(&descriptor("x86_64")));
        assert!(predicate.matches(&descriptor("X86_64")));
        assert!(predicate.matches(&descriptor("x64")));
        assert!(!predicate.matches(&descriptor("x86")));
        assert!(!predicate.matches(&descriptor("aarch64")));
    }

    #[test]
    fn test_x86_matches_exactly() {
        let predicate = X86Predicate::instantiate().unwrap();
        assert!(predicate.matches(&descriptor("x86")));
        assert!(predicate.matches(&descriptor("X86")));
        assert!(!predicate.matches(&descriptor("x86_64")));
        assert!(!predicate.matches(&descriptor("amd64")));
    }

    #[test]
    fn test_arm64_matches_both_spellings() {
        let predicate = Arm64Predicate::instantiate().unwrap();
        assert!(predicate.matches(&descriptor("arm64")));
        assert!(predicate.matches(&descriptor("aarch64")));
        assert!(!predicate.matches(&descriptor("x86_64")));
        assert!(!predicate.matches(&descriptor("armv7l")));
    }
}
