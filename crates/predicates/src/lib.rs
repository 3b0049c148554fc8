//! Built-in platform predicates for the platdep registry.
//!
//! Covers the common OS families (Windows, Linux, macOS) and CPU
//! architectures (amd64, x86, arm64). All matching is case-insensitive so
//! descriptors built from `os.name`-style facts (`"Windows 10"`,
//! `"Mac OS X"`) and Rust-convention constants (`"windows"`, `"macos"`)
//! behave alike.
//!
//! # Example
//!
//! ```
//! use platdep_predicates::{Amd64Predicate, WindowsPredicate};
//! use platdep_registry::{PlatformDescriptor, PlatformPredicate, PredicateId};
//!
//! let descriptor = PlatformDescriptor::new("Windows 10", "10.0", "amd64")?;
//! let windows = WindowsPredicate::instantiate().unwrap();
//! assert!(windows.matches(&descriptor));
//!
//! // Registrations reference predicates by identifier.
//! let requirements = vec![
//!     PredicateId::of::<WindowsPredicate>(),
//!     PredicateId::of::<Amd64Predicate>(),
//! ];
//! # assert_eq!(requirements.len(), 2);
//! # Ok::<(), platdep_registry::Error>(())
//! ```

mod arch;
mod os;

pub use arch::{Amd64Predicate, Arm64Predicate, X86Predicate};
pub use os::{LinuxPredicate, MacPredicate, WindowsPredicate};
