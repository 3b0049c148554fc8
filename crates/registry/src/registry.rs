//! Provider registration and first-match resolution.

use std::any::{Any, TypeId};
use std::sync::Arc;

use tracing::warn;

use crate::cache::PredicateCache;
use crate::descriptor::PlatformDescriptor;
use crate::error::{BoxError, Error, Result};
use crate::predicate::PredicateId;

type ConstructFn = Box<dyn Fn() -> std::result::Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// A provider type that constructs itself, gated by platform predicates.
///
/// [`platform_requirements`](Self::platform_requirements) declares the
/// predicates that must all hold for the provider to apply;
/// [`construct`](Self::construct) builds an instance. The provided type
/// registered through [`PlatformRegistry::register`] is the implementing
/// type itself.
pub trait PlatformDependent: Sized + 'static {
    /// Predicates that must all hold for this provider to apply.
    fn platform_requirements() -> Vec<PredicateId>;

    /// Construct an instance.
    ///
    /// # Errors
    ///
    /// Returns an error when construction fails; the registry surfaces it
    /// as [`Error::Construction`].
    fn construct() -> std::result::Result<Self, BoxError>;
}

/// One provider exposed by a factory object.
///
/// A binding couples the provided type (the factory method's return
/// type), the predicates gating it, and a thunk invoked on the bound
/// factory instance.
pub struct FactoryBinding<F> {
    provided: TypeId,
    type_name: &'static str,
    predicates: Vec<PredicateId>,
    construct: Box<dyn Fn(&F) -> std::result::Result<Box<dyn Any>, BoxError> + Send + Sync>,
}

impl<F> FactoryBinding<F> {
    /// Bind a factory method producing `T`, gated by `predicates`.
    ///
    /// Providers fulfilling an abstraction rather than a concrete type
    /// declare it here, e.g. `FactoryBinding::new::<Box<dyn Watcher>, _>`.
    pub fn new<T, C>(predicates: Vec<PredicateId>, construct: C) -> Self
    where
        T: 'static,
        C: Fn(&F) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            provided: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            predicates,
            construct: Box::new(move |factory| {
                construct(factory).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        }
    }
}

/// A factory object whose methods provide platform-gated instances.
///
/// The instance-bound counterpart of [`StaticProviderFactory`]: every
/// binding's thunk receives the factory registered through
/// [`PlatformRegistry::register_factory`], which is shared by all of its
/// bindings for the registry's lifetime.
pub trait ProviderFactory: Sized + Send + Sync + 'static {
    /// The factory methods this object exposes.
    fn bindings(&self) -> Vec<FactoryBinding<Self>>;
}

/// One provider exposed by a factory type, with no bound instance.
pub struct StaticBinding {
    provided: TypeId,
    type_name: &'static str,
    predicates: Vec<PredicateId>,
    construct: ConstructFn,
}

impl StaticBinding {
    /// Bind a factory function producing `T`, gated by `predicates`.
    pub fn new<T, C>(predicates: Vec<PredicateId>, construct: C) -> Self
    where
        T: 'static,
        C: Fn() -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        Self {
            provided: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            predicates,
            construct: Box::new(move || construct().map(|value| Box::new(value) as Box<dyn Any>)),
        }
    }
}

/// A factory type whose associated functions provide platform-gated
/// instances.
///
/// The unbound counterpart of [`ProviderFactory`]: exactly one of a bound
/// instance or a bare function applies per registration path.
pub trait StaticProviderFactory: 'static {
    /// The factory functions this type exposes.
    fn bindings() -> Vec<StaticBinding>;
}

/// A registered provider: provided type, gating predicates, constructor.
struct Bucket {
    provided: TypeId,
    type_name: &'static str,
    predicates: Vec<PredicateId>,
    construct: ConstructFn,
}

/// Ordered registry of platform-gated providers.
///
/// The registry owns a [`PlatformDescriptor`] fixed at construction, an
/// append-only registration list, and a cache of predicate instances.
/// Resolution scans registrations in registration order and constructs
/// the first whose predicates all hold; nothing is ever replaced,
/// deduplicated, or reordered, so declaration order is the only
/// tie-break.
///
/// Registration takes `&mut self`; resolution takes `&self` and may be
/// invoked concurrently from multiple threads.
pub struct PlatformRegistry {
    descriptor: PlatformDescriptor,
    buckets: Vec<Bucket>,
    cache: PredicateCache,
}

impl PlatformRegistry {
    /// Create a registry resolving against `descriptor`.
    #[must_use]
    pub fn new(descriptor: PlatformDescriptor) -> Self {
        Self {
            descriptor,
            buckets: Vec::new(),
            cache: PredicateCache::new(),
        }
    }

    /// The descriptor this registry resolves against.
    #[must_use]
    pub fn descriptor(&self) -> &PlatformDescriptor {
        &self.descriptor
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Register `P` itself as a provider, constructed by
    /// [`PlatformDependent::construct`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPredicates`] if `P` declares no
    /// requirements.
    pub fn register<P: PlatformDependent>(&mut self) -> Result<()> {
        let bucket = Bucket {
            provided: TypeId::of::<P>(),
            type_name: std::any::type_name::<P>(),
            predicates: P::platform_requirements(),
            construct: Box::new(|| P::construct().map(|p| Box::new(p) as Box<dyn Any>)),
        };
        check_predicates(bucket.type_name, &bucket.predicates)?;
        self.buckets.push(bucket);
        Ok(())
    }

    /// Register every binding of a factory object.
    ///
    /// The factory is shared by all of its bindings; each resolution
    /// invokes the bound method on the same instance. A factory with no
    /// bindings registers nothing. All bindings are validated before any
    /// is appended, so a rejected binding leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPredicates`] if any binding declares no
    /// predicates.
    pub fn register_factory<F: ProviderFactory>(&mut self, factory: F) -> Result<()> {
        let factory = Arc::new(factory);
        let bindings = factory.bindings();
        for binding in &bindings {
            check_predicates(binding.type_name, &binding.predicates)?;
        }
        for binding in bindings {
            let FactoryBinding {
                provided,
                type_name,
                predicates,
                construct,
            } = binding;
            let factory = Arc::clone(&factory);
            self.buckets.push(Bucket {
                provided,
                type_name,
                predicates,
                construct: Box::new(move || construct(factory.as_ref())),
            });
        }
        Ok(())
    }

    /// Register every binding of a factory type.
    ///
    /// Same accumulation rules as
    /// [`register_factory`](Self::register_factory), with no bound
    /// instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPredicates`] if any binding declares no
    /// predicates.
    pub fn register_static_factory<F: StaticProviderFactory>(&mut self) -> Result<()> {
        let bindings = F::bindings();
        for binding in &bindings {
            check_predicates(binding.type_name, &binding.predicates)?;
        }
        for binding in bindings {
            let StaticBinding {
                provided,
                type_name,
                predicates,
                construct,
            } = binding;
            self.buckets.push(Bucket {
                provided,
                type_name,
                predicates,
                construct,
            });
        }
        Ok(())
    }

    /// Whether some registration for `T` qualifies on this platform.
    ///
    /// Performs the same scan as [`resolve`](Self::resolve) but never
    /// constructs a provider. May populate the predicate cache.
    #[must_use]
    pub fn is_resolvable<T: 'static>(&self) -> bool {
        self.find_bucket(TypeId::of::<T>()).is_some()
    }

    /// Construct the first registered provider for `T` whose predicates
    /// all hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedPlatform`] when no registration for
    /// `T` qualifies on this platform, and [`Error::Construction`] when
    /// the qualifying provider's constructor fails.
    pub fn resolve<T: 'static>(&self) -> Result<T> {
        let type_name = std::any::type_name::<T>();
        let bucket = self
            .find_bucket(TypeId::of::<T>())
            .ok_or(Error::UnsupportedPlatform { type_name })?;
        let instance =
            (bucket.construct)().map_err(|source| Error::Construction { type_name, source })?;
        match instance.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(Error::Construction {
                type_name,
                source: BoxError::from("provider constructed a value of an unexpected type"),
            }),
        }
    }

    /// First bucket providing `requested` whose predicates all hold, in
    /// registration order.
    fn find_bucket(&self, requested: TypeId) -> Option<&Bucket> {
        self.buckets
            .iter()
            .filter(|bucket| bucket.provided == requested)
            .find(|bucket| self.satisfied(bucket))
    }

    /// Logical AND over the bucket's predicates, short-circuiting on the
    /// first false. A predicate that fails to instantiate disqualifies
    /// this bucket only; the scan carries on with later registrations.
    fn satisfied(&self, bucket: &Bucket) -> bool {
        bucket.predicates.iter().all(|id| match self.cache.get(id) {
            Ok(predicate) => predicate.matches(&self.descriptor),
            Err(error) => {
                warn!(
                    predicate = id.name(),
                    provider = bucket.type_name,
                    error = %error,
                    "platform predicate failed to instantiate; treating as unsatisfied"
                );
                false
            }
        })
    }
}

fn check_predicates(type_name: &'static str, predicates: &[PredicateId]) -> Result<()> {
    if predicates.is_empty() {
        return Err(Error::MissingPredicates { type_name });
    }
    Ok(())
}

impl std::fmt::Debug for PlatformRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformRegistry")
            .field("descriptor", &self.descriptor)
            .field("registrations", &self.buckets.len())
            .finish()
    }
}
