//! Platform predicates and their stable identifiers.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::descriptor::PlatformDescriptor;
use crate::error::BoxError;

/// A pure applicability test over a [`PlatformDescriptor`].
///
/// Predicates are identified by type and constructed at most once per
/// registry (see [`PredicateId`]); the instance is shared across every
/// resolution for the registry's lifetime, so implementations must be
/// stateless or internally synchronized.
pub trait PlatformPredicate: Send + Sync + 'static {
    /// Construct the predicate.
    ///
    /// A failure here never aborts resolution: the registry logs it and
    /// treats every registration requiring this predicate as
    /// non-matching. Callers that want strict validation should
    /// instantiate their predicates eagerly before registering.
    ///
    /// # Errors
    ///
    /// Returns an error if the predicate cannot be constructed.
    fn instantiate() -> std::result::Result<Self, BoxError>
    where
        Self: Sized;

    /// Whether this predicate holds for the given descriptor.
    fn matches(&self, descriptor: &PlatformDescriptor) -> bool;
}

/// Stable handle identifying a predicate type.
///
/// A `PredicateId` couples the predicate's type identity (the cache key)
/// with a constructor for it, so registrations can name predicates as
/// first-class values. Two ids are equal exactly when they identify the
/// same predicate type.
#[derive(Clone, Copy)]
pub struct PredicateId {
    type_id: TypeId,
    name: &'static str,
    construct: fn() -> std::result::Result<Arc<dyn PlatformPredicate>, BoxError>,
}

impl PredicateId {
    /// The identifier for predicate type `P`.
    #[must_use]
    pub fn of<P: PlatformPredicate>() -> Self {
        Self {
            type_id: TypeId::of::<P>(),
            name: std::any::type_name::<P>(),
            construct: || P::instantiate().map(|p| Arc::new(p) as Arc<dyn PlatformPredicate>),
        }
    }

    /// The predicate's type name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub(crate) fn instantiate(&self) -> std::result::Result<Arc<dyn PlatformPredicate>, BoxError> {
        (self.construct)()
    }
}

impl PartialEq for PredicateId {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for PredicateId {}

impl Hash for PredicateId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Debug for PredicateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateId")
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysTrue;

    impl PlatformPredicate for AlwaysTrue {
        fn instantiate() -> std::result::Result<Self, BoxError> {
            Ok(Self)
        }

        fn matches(&self, _descriptor: &PlatformDescriptor) -> bool {
            true
        }
    }

    struct NeverConstructs;

    impl PlatformPredicate for NeverConstructs {
        fn instantiate() -> std::result::Result<Self, BoxError> {
            Err("refusing to construct".into())
        }

        fn matches(&self, _descriptor: &PlatformDescriptor) -> bool {
            unreachable!("instantiate always fails")
        }
    }

    #[test]
    fn test_ids_of_same_type_are_equal() {
        assert_eq!(PredicateId::of::<AlwaysTrue>(), PredicateId::of::<AlwaysTrue>());
    }

    #[test]
    fn test_ids_of_different_types_differ() {
        assert_ne!(
            PredicateId::of::<AlwaysTrue>(),
            PredicateId::of::<NeverConstructs>()
        );
    }

    #[test]
    fn test_hash_follows_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(PredicateId::of::<AlwaysTrue>());
        set.insert(PredicateId::of::<AlwaysTrue>());
        set.insert(PredicateId::of::<NeverConstructs>());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_name_reflects_predicate_type() {
        assert!(PredicateId::of::<AlwaysTrue>().name().contains("AlwaysTrue"));
    }

    #[test]
    fn test_instantiate_constructs_the_predicate() {
        let descriptor = PlatformDescriptor::new("Linux", "6.1", "x86_64").unwrap();
        let predicate = PredicateId::of::<AlwaysTrue>().instantiate().unwrap();
        assert!(predicate.matches(&descriptor));
    }

    #[test]
    fn test_instantiate_propagates_constructor_failure() {
        let error = PredicateId::of::<NeverConstructs>().instantiate().err().unwrap();
        assert_eq!(error.to_string(), "refusing to construct");
    }

    #[test]
    fn test_debug_shows_name() {
        let formatted = format!("{:?}", PredicateId::of::<AlwaysTrue>());
        assert!(formatted.contains("AlwaysTrue"));
    }
}
