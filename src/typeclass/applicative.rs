//! Applicative type class - lifting values and combining independent
//! computations.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! ap(unit(|x| x), v) == v
//! ```
//!
//! ## Homomorphism Law
//!
//! ```text
//! ap(unit(f), unit(x)) == unit(f(x))
//! ```
//!
//! ## Interchange Law
//!
//! ```text
//! ap(u, unit(y)) == ap(unit(|f| f(y)), u)
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! ap(ap(ap(unit(compose), u), v), w) == ap(u, ap(v, w))
//! ```

use super::Functor;
use crate::kind::{Element, Kind};

/// A type class for carriers that can lift plain values and apply lifted
/// functions.
///
/// # Examples
///
/// ```rust
/// use kindred::kind::Kind;
/// use kindred::carrier::OptionKind;
/// use kindred::typeclass::Applicative;
///
/// let double = OptionKind.unit(|x: i32| x * 2);
/// let result = OptionKind.ap(double, OptionKind.unit(21));
/// assert_eq!(result.narrow(), Some(42));
///
/// let sum = OptionKind.map2(Kind::from(Some(1)), Kind::from(Some(2)), |a, b| a + b);
/// assert_eq!(sum.narrow(), Some(3));
/// ```
pub trait Applicative: Functor {
    /// Lifts `value` into the carrier.
    fn unit<A: Element>(&self, value: A) -> Kind<Self::Marker, A>;

    /// Applies every lifted function to every lifted value.
    fn ap<A, B, Function>(
        &self,
        functions: Kind<Self::Marker, Function>,
        value: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Element;

    /// Combines two independent computations with a binary function.
    fn map2<A, B, C, Function>(
        &self,
        first: Kind<Self::Marker, A>,
        second: Kind<Self::Marker, B>,
        function: Function,
    ) -> Kind<Self::Marker, C>
    where
        A: Element,
        B: Element,
        C: Element,
        Function: FnMut(A, B) -> C + Send + 'static;

    /// Pairs two independent computations.
    fn product<A, B>(
        &self,
        first: Kind<Self::Marker, A>,
        second: Kind<Self::Marker, B>,
    ) -> Kind<Self::Marker, (A, B)>
    where
        A: Element,
        B: Element,
    {
        self.map2(first, second, |a, b| (a, b))
    }
}
