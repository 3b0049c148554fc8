//! Platform-conditional provider registry.
//!
//! This crate selects, among several competing implementations of a
//! capability, the one applicable to an operating environment (OS family,
//! CPU architecture) and constructs an instance on demand. Providers are
//! registered together with the platform predicates that gate them;
//! resolution scans registrations in registration order and constructs the
//! first whose predicates all hold.
//!
//! # Registration strategies
//!
//! Three entry points feed the registry, all producing the same internal
//! registration shape:
//!
//! - [`PlatformRegistry::register`] — the type constructs itself via
//!   [`PlatformDependent`].
//! - [`PlatformRegistry::register_factory`] — a factory object exposes
//!   instance-bound factory methods via [`ProviderFactory`].
//! - [`PlatformRegistry::register_static_factory`] — a factory type
//!   exposes unbound factory functions via [`StaticProviderFactory`].
//!
//! # Example
//!
//! ```
//! use platdep_registry::{
//!     BoxError, PlatformDependent, PlatformDescriptor, PlatformPredicate,
//!     PlatformRegistry, PredicateId,
//! };
//!
//! struct OnLinux;
//!
//! impl PlatformPredicate for OnLinux {
//!     fn instantiate() -> Result<Self, BoxError> {
//!         Ok(Self)
//!     }
//!
//!     fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
//!         descriptor.name().to_ascii_lowercase().starts_with("linux")
//!     }
//! }
//!
//! struct EpollWatcher;
//!
//! impl PlatformDependent for EpollWatcher {
//!     fn platform_requirements() -> Vec<PredicateId> {
//!         vec![PredicateId::of::<OnLinux>()]
//!     }
//!
//!     fn construct() -> Result<Self, BoxError> {
//!         Ok(Self)
//!     }
//! }
//!
//! # fn main() -> Result<(), platdep_registry::Error> {
//! let descriptor = PlatformDescriptor::new("Linux", "6.1", "x86_64")?;
//! let mut registry = PlatformRegistry::new(descriptor);
//! registry.register::<EpollWatcher>()?;
//!
//! assert!(registry.is_resolvable::<EpollWatcher>());
//! let _watcher = registry.resolve::<EpollWatcher>()?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod descriptor;
mod error;
mod predicate;
mod registry;

pub use descriptor::PlatformDescriptor;
pub use error::{BoxError, Error, Result};
pub use predicate::{PlatformPredicate, PredicateId};
pub use registry::{
    FactoryBinding, PlatformDependent, PlatformRegistry, ProviderFactory, StaticBinding,
    StaticProviderFactory,
};
