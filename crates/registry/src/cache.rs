//! Memoized construction of predicate instances.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::BoxError;
use crate::predicate::{PlatformPredicate, PredicateId};

/// Constructs each predicate lazily, at most once, and shares the
/// instance across every resolution for the owning registry's lifetime.
pub(crate) struct PredicateCache {
    entries: Mutex<HashMap<TypeId, Arc<dyn PlatformPredicate>>>,
}

impl PredicateCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the shared instance for `id`, constructing it on first use.
    ///
    /// The lock is held across construction, so concurrent first use of
    /// the same predicate still constructs exactly once. Predicate
    /// constructors are pure and in-memory. A failed construction is not
    /// cached; a later call retries it.
    pub(crate) fn get(
        &self,
        id: &PredicateId,
    ) -> std::result::Result<Arc<dyn PlatformPredicate>, BoxError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BoxError::from("predicate cache lock poisoned"))?;
        if let Some(predicate) = entries.get(&id.type_id()) {
            return Ok(Arc::clone(predicate));
        }
        let predicate = id.instantiate()?;
        entries.insert(id.type_id(), Arc::clone(&predicate));
        Ok(predicate)
    }
}
