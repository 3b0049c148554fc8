//! Operating system family predicates.

use platdep_registry::{BoxError, PlatformDescriptor, PlatformPredicate};

fn name_has_prefix(descriptor: &PlatformDescriptor, prefix: &str) -> bool {
    descriptor.name().to_ascii_lowercase().starts_with(prefix)
}

/// Matches descriptors whose OS name starts with `windows`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsPredicate;

impl PlatformPredicate for WindowsPredicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        name_has_prefix(descriptor, "windows")
    }
}

/// Matches descriptors whose OS name starts with `linux`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxPredicate;

impl PlatformPredicate for LinuxPredicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        name_has_prefix(descriptor, "linux")
    }
}

/// Matches macOS descriptors under any of their customary names:
/// `Mac OS X`, `macOS`, or `darwin`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacPredicate;

impl PlatformPredicate for MacPredicate {
    fn instantiate() -> Result<Self, BoxError> {
        Ok(Self)
    }

    fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        ["mac os", "macos", "darwin"]
            .iter()
            .any(|prefix| name_has_prefix(descriptor, prefix))
    }
}
