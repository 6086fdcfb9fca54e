//! `MonadZero` type class - monads with an empty value.
//!
//! # Laws
//!
//! ```text
//! flat_map(f, empty) == empty
//! filter(|_| false, m) == empty
//! filter(|_| true, m) == m
//! ```

use super::Monad;
use crate::kind::{Element, Kind};

/// A monad with an absorbing empty value and a filter.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::OptionKind;
/// use kindred::typeclass::{Applicative, MonadZero};
///
/// let kept = OptionKind.filter(|s: &&str| s.starts_with("he"), OptionKind.unit("hello"));
/// assert_eq!(kept.narrow(), Some("hello"));
///
/// let dropped = OptionKind.filter(|s: &&str| !s.starts_with("he"), OptionKind.unit("hello"));
/// assert_eq!(dropped.narrow(), None);
/// ```
pub trait MonadZero: Monad {
    /// The empty carrier.
    fn empty<A: Element>(&self) -> Kind<Self::Marker, A>;

    /// Keeps only the elements satisfying `predicate`.
    fn filter<A, Predicate>(
        &self,
        predicate: Predicate,
        value: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static;

    /// `unit(())` when `condition` holds, `empty` otherwise.
    fn guard(&self, condition: bool) -> Kind<Self::Marker, ()> {
        if condition { self.unit(()) } else { self.empty() }
    }
}
