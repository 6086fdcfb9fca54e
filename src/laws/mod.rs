//! Law checks for type-class records and transformers.
//!
//! Every check takes a record and sample inputs, evaluates both sides of one
//! algebraic law, and compares them through the marker's [`Observe`]
//! implementation. A law that does not hold is reported as
//! [`EngineError::LawViolation`] naming the marker, the law and the check, so
//! property tests can drive these functions with generated inputs and
//! `?`-propagate the first failure.
//!
//! [`claimed_capabilities`] lists the capabilities a registry claims for a
//! marker; each of them is an obligation to pass the matching checks.
//!
//! # Examples
//!
//! ```rust
//! use kindred::carrier::VecKind;
//! use kindred::kind::Kind;
//! use kindred::laws;
//!
//! let sample: Kind<VecKind, i32> = Kind::from(vec![1, 2, 3]);
//! assert_eq!(laws::functor_identity(&VecKind, sample.clone()), Ok(()));
//! assert_eq!(
//!     laws::monad_associativity(
//!         &VecKind,
//!         sample,
//!         |n: i32| Kind::from(vec![n, n + 1]),
//!         |n: i32| Kind::from(vec![n * 10]),
//!     ),
//!     Ok(())
//! );
//! ```

mod algebra;
mod observe;
mod transformer;

pub use algebra::{
    applicative_composition, applicative_homomorphism, applicative_identity,
    applicative_interchange, foldable_consistency, foldable_empty, foldable_unit,
    functor_composition, functor_identity, kind_round_trip, monad_associativity,
    monad_left_identity, monad_plus_associativity, monad_plus_identity, monad_right_identity,
    monad_zero_filter, monad_zero_left_zero, traverse_identity, traverse_naturality,
};
pub use observe::{Comparable, Observe, SEQ_PREFIX};
pub use transformer::{
    option_t_flat_map_associativity, option_t_unit_map, seq_t_flat_map_associativity,
    seq_t_unit_map,
};

use tracing::debug;

use crate::error::EngineError;
use crate::kind::Marker;
use crate::registry::{Capability, InstanceRegistry};

fn verify<F: Marker>(
    holds: bool,
    law: &'static str,
    operation: &'static str
) -> Result<(), EngineError> {
    if holds {
        return Ok(());
    }
    debug!(marker = F::NAME, law, operation, "law violated");
    Err(EngineError::LawViolation {
        marker: F::NAME,
        law,
        operation,
    })
}

/// The capabilities `registry` holds a record for at marker `F`, in
/// hierarchy order.
pub fn claimed_capabilities<F: Marker>(registry: &InstanceRegistry) -> Vec<Capability> {
    registry.capabilities(F::id())
}
