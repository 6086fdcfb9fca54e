//! Traverse type class - mapping with an effect and collecting the effects.
//!
//! # Laws
//!
//! ## Identity
//!
//! Traversing with the identity applicative equals mapping:
//!
//! ```text
//! traverse_a(IdentityKind, |a| unit(f(a)), fa) == unit(map(f, fa))
//! ```
//!
//! ## Naturality
//!
//! For an applicative transformation `t : G ~> H`:
//!
//! ```text
//! t(traverse_a(G, f, fa)) == traverse_a(H, |a| t(f(a)), fa)
//! ```

use super::{Applicative, Foldable, Functor};
use crate::kind::{Element, Kind};

/// A type class for carriers that can be traversed with an applicative
/// effect, turning `F<G<B>>`-shaped work into `G<F<B>>`.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::{OptionKind, VecKind};
/// use kindred::kind::Kind;
/// use kindred::typeclass::Traverse;
///
/// let halves = VecKind.traverse_a(
///     &OptionKind,
///     |n: i32| Kind::from((n % 2 == 0).then_some(n / 2)),
///     Kind::from(vec![2, 4, 6]),
/// );
/// assert_eq!(halves.narrow().map(Kind::narrow), Some(vec![1, 2, 3]));
/// ```
pub trait Traverse: Functor + Foldable {
    /// Maps each element to an effect and combines the effects in element
    /// order.
    fn traverse_a<G, A, B, Function>(
        &self,
        applicative: &G,
        function: Function,
        value: Kind<Self::Marker, A>,
    ) -> Kind<G::Marker, Kind<Self::Marker, B>>
    where
        G: Applicative,
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<G::Marker, B> + Send + 'static;

    /// Turns a carrier of effects inside out.
    fn sequence_a<G, A>(
        &self,
        applicative: &G,
        value: Kind<Self::Marker, Kind<G::Marker, A>>,
    ) -> Kind<G::Marker, Kind<Self::Marker, A>>
    where
        G: Applicative,
        A: Element,
    {
        self.traverse_a(applicative, |effect| effect, value)
    }
}
