//! Error types for descriptor construction, registration, and resolution.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error carried by user-supplied provider constructors and
/// predicate constructors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the registry.
///
/// Descriptor and registration errors fail fast at the call that caused
/// them. At resolution time, [`UnsupportedPlatform`](Error::UnsupportedPlatform)
/// and [`Construction`](Error::Construction) are the two distinct outcomes
/// a caller can match on: nothing registered qualifies for the platform,
/// versus a qualifying provider whose constructor failed. Predicate
/// construction failures never appear here; resolution logs them and
/// treats the affected registration as non-matching.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A platform descriptor field was empty.
    #[error("platform descriptor field '{field}' must not be empty")]
    #[diagnostic(
        code(platdep::registry::invalid_descriptor),
        help("a descriptor carries the OS name, OS version, and CPU architecture; populate all three")
    )]
    InvalidDescriptor {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A registration declared no applicability predicates.
    #[error("registration for type {type_name} declares no platform predicates")]
    #[diagnostic(
        code(platdep::registry::missing_predicates),
        help("gate every provider with at least one platform predicate; an ungated provider would shadow every later registration of the same type")
    )]
    MissingPredicates {
        /// Provided type of the rejected registration.
        type_name: &'static str,
    },

    /// No registered provider qualifies for the current platform.
    #[error("no registered provider for type {type_name} matches the current platform")]
    #[diagnostic(
        code(platdep::registry::unsupported_platform),
        help("register a provider whose predicates hold on this platform, or run on a supported one")
    )]
    UnsupportedPlatform {
        /// The requested type.
        type_name: &'static str,
    },

    /// A qualifying provider was found but its constructor failed.
    #[error("provider for type {type_name} failed to construct")]
    #[diagnostic(
        code(platdep::registry::construction_failed),
        help("the platform matched but the selected provider's constructor returned an error; see the source error for details")
    )]
    Construction {
        /// The requested type.
        type_name: &'static str,
        /// The underlying constructor error.
        #[source]
        source: BoxError,
    },
}
