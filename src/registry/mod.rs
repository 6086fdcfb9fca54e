//! The instance registry: type-class records keyed by marker and capability.
//!
//! Code that is generic over a record type never needs the registry; it is
//! for code that only knows a marker at runtime, and for swapping in a
//! record other than a marker's default (a `MonadPlus` with a different
//! monoid, say).
//!
//! Registries are assembled with a [`RegistryBuilder`] and sealed into an
//! immutable [`InstanceRegistry`], which is safe to share across threads
//! without locking. A process-wide registry is available through [`global`];
//! it can be replaced with [`install_global`] only before its first use.
//!
//! # Examples
//!
//! ```rust
//! use kindred::carrier::VecKind;
//! use kindred::kind::Kind;
//! use kindred::registry::{self, Capability};
//! use kindred::typeclass::Functor;
//!
//! let functor = registry::global()
//!     .require::<VecKind>(Capability::Functor)
//!     .expect("built-in");
//! let doubled = functor.map(|n: i32| n * 2, Kind::from(vec![1, 2]));
//! assert_eq!(doubled.narrow(), vec![2, 4]);
//! ```

mod capability;
mod global;
mod instances;

pub use capability::Capability;
pub use global::{global, install_global};
pub use instances::{InstanceRegistry, Record, RegistryBuilder};
