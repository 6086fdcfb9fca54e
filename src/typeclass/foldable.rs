//! Foldable type class - reducing a carrier to a summary value.
//!
//! # Laws
//!
//! ```text
//! fold_left(z, f, unit(a)) == f(z, a)
//! fold_left(z, f, empty) == z
//! fold_left(z, f, fa) == to_vec(fa).into_iter().fold(z, f)
//! fold_right(z, f, fa) == to_vec(fa).into_iter().rev().fold(z, |b, a| f(a, b))
//! ```

use super::{Instance, Monoid};
use crate::kind::{Element, Kind};

/// A type class for carriers whose elements can be reduced in order.
///
/// Asynchronous carriers block the calling thread until their element is
/// available; infinite carriers never finish folding.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::VecKind;
/// use kindred::kind::Kind;
/// use kindred::typeclass::Foldable;
///
/// let numbers: Kind<VecKind, i32> = Kind::from(vec![1, 2, 3]);
/// assert_eq!(VecKind.fold_left(0, |sum, n| sum + n, numbers.clone()), 6);
/// assert_eq!(
///     VecKind.fold_right(String::new(), |n, text| format!("{text}{n}"), numbers),
///     "321"
/// );
/// ```
pub trait Foldable: Instance {
    /// Reduces from the first element to the last.
    fn fold_left<A, B, Function>(
        &self,
        init: B,
        function: Function,
        value: Kind<Self::Marker, A>,
    ) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B;

    /// Reduces from the last element to the first.
    fn fold_right<A, B, Function>(
        &self,
        init: B,
        function: Function,
        value: Kind<Self::Marker, A>,
    ) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B;

    /// Maps every element into a monoid and combines the results.
    fn fold_map<A, M, Function>(&self, mut function: Function, value: Kind<Self::Marker, A>) -> M
    where
        A: Element,
        M: Monoid,
        Function: FnMut(A) -> M,
    {
        self.fold_left(
            M::empty(),
            |accumulated, element| accumulated.combine(function(element)),
            value,
        )
    }

    /// Collects the elements in order.
    fn to_vec<A: Element>(&self, value: Kind<Self::Marker, A>) -> Vec<A> {
        self.fold_left(
            Vec::new(),
            |mut elements, element| {
                elements.push(element);
                elements
            },
            value,
        )
    }

    /// Counts the elements.
    fn length<A: Element>(&self, value: &Kind<Self::Marker, A>) -> usize {
        self.fold_left(0, |count, _| count + 1, value.clone())
    }

    /// Returns the first element satisfying `predicate`.
    fn find<A, Predicate>(
        &self,
        mut predicate: Predicate,
        value: Kind<Self::Marker, A>,
    ) -> Option<A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool,
    {
        self.fold_left(
            None,
            |found, element| found.or_else(|| predicate(&element).then_some(element)),
            value,
        )
    }
}
