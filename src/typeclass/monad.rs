//! Monad type class - sequencing dependent computations.
//!
//! # Laws
//!
//! ## Left Identity Law
//!
//! ```text
//! flat_map(f, unit(a)) == f(a)
//! ```
//!
//! ## Right Identity Law
//!
//! ```text
//! flat_map(unit, m) == m
//! ```
//!
//! ## Associativity Law
//!
//! ```text
//! flat_map(g, flat_map(f, m)) == flat_map(|x| flat_map(g, f(x)), m)
//! ```

use super::Applicative;
use crate::kind::{Element, Kind};

/// A type class for carriers whose next computation may depend on the
/// result of the previous one.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::OptionKind;
/// use kindred::typeclass::{Applicative, Monad};
///
/// let length = OptionKind.flat_map(
///     |text: &str| OptionKind.unit(text.len()),
///     OptionKind.unit("hello"),
/// );
/// assert_eq!(length.narrow(), Some(5));
/// ```
pub trait Monad: Applicative {
    /// Applies `function` to each element and flattens the results, in the
    /// order the carrier produces its elements.
    fn flat_map<A, B, Function>(
        &self,
        function: Function,
        value: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<Self::Marker, B> + Send + 'static;

    /// Removes one level of nesting.
    fn flatten<A: Element>(
        &self,
        nested: Kind<Self::Marker, Kind<Self::Marker, A>>,
    ) -> Kind<Self::Marker, A> {
        self.flat_map(|inner| inner, nested)
    }
}
