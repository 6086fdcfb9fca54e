//! `MonadPlus` type class - monads with a monoidal combine.
//!
//! # Laws
//!
//! ```text
//! plus(empty, x) == x
//! plus(x, empty) == x
//! plus(plus(a, b), c) == plus(a, plus(b, c))
//! ```
//!
//! The default combine is carrier specific (first present value, list
//! concatenation, first future to complete). [`MonadPlus::plus_using`] takes
//! an explicit [`KindMonoid`] that overrides it.

use super::{KindMonoid, MonadZero};
use crate::kind::{Element, Kind};

/// A monad whose values form a monoid under [`MonadPlus::plus`].
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::VecKind;
/// use kindred::kind::Kind;
/// use kindred::typeclass::{KindMonoid, MonadPlus, MonadZero};
///
/// let joined = VecKind.plus(Kind::from(vec![1, 2]), Kind::from(vec![3]));
/// assert_eq!(joined.narrow(), vec![1, 2, 3]);
///
/// let right_biased: KindMonoid<VecKind, i32> =
///     KindMonoid::new(|| VecKind.empty(), |left, right| VecKind.plus(right, left));
/// let flipped = VecKind.plus_using(&right_biased, Kind::from(vec![1, 2]), Kind::from(vec![3]));
/// assert_eq!(flipped.narrow(), vec![3, 1, 2]);
/// ```
pub trait MonadPlus: MonadZero {
    /// Combines two carriers with the default monoid.
    fn plus<A: Element>(
        &self,
        left: Kind<Self::Marker, A>,
        right: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, A>;

    /// Combines two carriers with an explicit monoid.
    fn plus_using<A: Element>(
        &self,
        monoid: &KindMonoid<Self::Marker, A>,
        left: Kind<Self::Marker, A>,
        right: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, A> {
        monoid.combine(left, right)
    }

    /// Folds any number of carriers with the default monoid, starting from
    /// `empty`.
    fn sum<A, I>(&self, values: I) -> Kind<Self::Marker, A>
    where
        A: Element,
        I: IntoIterator<Item = Kind<Self::Marker, A>>,
    {
        values
            .into_iter()
            .fold(self.empty(), |accumulated, value| self.plus(accumulated, value))
    }

    /// Returns the default monoid as a value.
    fn monoid<A: Element>(&self) -> KindMonoid<Self::Marker, A>
    where
        Self: Clone + Send + Sync + 'static,
    {
        let zero = self.clone();
        let combine = self.clone();
        KindMonoid::new(move || zero.empty(), move |left, right| combine.plus(left, right))
    }
}
