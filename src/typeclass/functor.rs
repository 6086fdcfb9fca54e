//! Functor type class - mapping over kinded values.
//!
//! Type-class records in this crate are dictionaries: values with `&self`
//! methods whose associated [`Instance::Marker`] names the carrier family
//! they operate on. Every built-in marker is its own default record, so
//! `OptionKind.map(f, kind)` reads the same as passing the record around.
//!
//! # Laws
//!
//! ## Identity Law
//!
//! ```text
//! map(|x| x, fa) == fa
//! ```
//!
//! ## Composition Law
//!
//! ```text
//! map(|x| g(f(x)), fa) == map(g, map(f, fa))
//! ```
//!
//! # Examples
//!
//! ```rust
//! use kindred::kind::Kind;
//! use kindred::carrier::OptionKind;
//! use kindred::typeclass::Functor;
//!
//! let hello: Kind<OptionKind, &str> = Kind::from(Some("hello"));
//! assert_eq!(OptionKind.map(str::len, hello).narrow(), Some(5));
//!
//! let nothing: Kind<OptionKind, &str> = Kind::from(None);
//! assert_eq!(OptionKind.map(str::len, nothing).narrow(), None);
//! ```

use crate::kind::{Element, Kind, Marker};

/// The root of every type-class record: names the carrier family the record
/// operates on.
pub trait Instance {
    /// The constructor marker this record is keyed by.
    type Marker: Marker;
}

/// A type class for carriers whose contents can be transformed while the
/// structure is preserved.
pub trait Functor: Instance {
    /// Applies `function` to every element of `value`.
    ///
    /// Multi-element carriers call `function` once per element, in element
    /// order, so it is `FnMut`.
    fn map<A, B, Function>(
        &self,
        function: Function,
        value: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static;

    /// Replaces every element with `replacement`.
    fn replace<A, B>(&self, replacement: B, value: Kind<Self::Marker, A>) -> Kind<Self::Marker, B>
    where
        A: Element,
        B: Element,
    {
        self.map(move |_| replacement.clone(), value)
    }

    /// Discards the elements, keeping only the structure.
    fn void<A: Element>(&self, value: Kind<Self::Marker, A>) -> Kind<Self::Marker, ()> {
        self.replace((), value)
    }

    /// Observes each element without changing it.
    fn peek<A, Function>(
        &self,
        mut function: Function,
        value: Kind<Self::Marker, A>,
    ) -> Kind<Self::Marker, A>
    where
        A: Element,
        Function: FnMut(&A) + Send + 'static,
    {
        self.map(
            move |element| {
                function(&element);
                element
            },
            value,
        )
    }
}
