//! Unfoldable type class - building a carrier from a seed.

use super::Instance;
use crate::kind::{Element, Kind};

/// A type class for carriers that can be grown from a seed, the dual of
/// [`Foldable`](super::Foldable).
///
/// `function` returns the next element and the next seed, or `None` to stop.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::VecKind;
/// use kindred::typeclass::Unfoldable;
///
/// let countdown = VecKind.unfold(3, |n: i32| (n > 0).then_some((n, n - 1)));
/// assert_eq!(countdown.narrow(), vec![3, 2, 1]);
/// ```
pub trait Unfoldable: Instance {
    /// Unfolds `seed` until `function` returns `None`.
    fn unfold<S, A, Function>(&self, seed: S, function: Function) -> Kind<Self::Marker, A>
    where
        S: Element,
        A: Element,
        Function: FnMut(S) -> Option<(A, S)> + Send + 'static;

    /// A carrier holding `value` `count` times.
    fn replicate<A: Element>(&self, count: usize, value: A) -> Kind<Self::Marker, A> {
        self.unfold(count, move |remaining| {
            (remaining > 0).then(|| (value.clone(), remaining - 1))
        })
    }
}
