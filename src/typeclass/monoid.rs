//! Semigroups and monoids, for plain values and for kinded values.
//!
//! [`Semigroup`] and [`Monoid`] describe element types with an associative
//! combine (and an identity). [`KindMonoid`] is the value-level counterpart
//! for whole carriers: an explicit zero and combine that
//! [`MonadPlus::plus_using`](super::MonadPlus::plus_using) accepts in place
//! of the carrier's default.
//!
//! # Laws
//!
//! ```text
//! combine(combine(a, b), c) == combine(a, combine(b, c))
//! combine(empty, a) == a == combine(a, empty)
//! ```
//!
//! # Examples
//!
//! ```rust
//! use kindred::typeclass::{Monoid, Semigroup, Sum};
//!
//! assert_eq!(String::from("ab").combine(String::from("cd")), "abcd");
//! assert_eq!(Sum::combine_all(vec![Sum(1), Sum(2), Sum(3)]), Sum(6));
//! ```

use std::ops::Add;
use std::sync::Arc;

use super::Identity;
use crate::kind::{Element, Kind, Marker};

/// A type with an associative binary operation.
pub trait Semigroup: Sized {
    /// Combines two values.
    fn combine(self, other: Self) -> Self;
}

/// A semigroup with an identity element.
pub trait Monoid: Semigroup {
    /// The identity element.
    fn empty() -> Self;

    /// Combines every value of `values`, starting from [`Monoid::empty`].
    fn combine_all<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        values.into_iter().fold(Self::empty(), Self::combine)
    }
}

/// Numeric wrapper combining by addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sum<A>(pub A);

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Semigroup> Semigroup for Option<T> {
    fn combine(self, other: Self) -> Self {
        match (self, other) {
            (Some(left), Some(right)) => Some(left.combine(right)),
            (left @ Some(_), None) => left,
            (None, right) => right,
        }
    }
}

impl<T: Semigroup> Monoid for Option<T> {
    fn empty() -> Self {
        None
    }
}

impl Semigroup for () {
    fn combine(self, _other: Self) -> Self {}
}

impl Monoid for () {
    fn empty() -> Self {}
}

impl<T: Semigroup> Semigroup for Identity<T> {
    fn combine(self, other: Self) -> Self {
        Self(self.0.combine(other.0))
    }
}

impl<T: Monoid> Monoid for Identity<T> {
    fn empty() -> Self {
        Self(T::empty())
    }
}

impl<A: Add<Output = A>> Semigroup for Sum<A> {
    fn combine(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl<A: Add<Output = A> + Default> Monoid for Sum<A> {
    fn empty() -> Self {
        Self(A::default())
    }
}

/// An explicit monoid over kinded values of one marker and element type.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::OptionKind;
/// use kindred::kind::Kind;
/// use kindred::typeclass::KindMonoid;
///
/// // Prefer the right-hand value whenever it is present.
/// let last: KindMonoid<OptionKind, i32> = KindMonoid::new(
///     || Kind::from(None),
///     |left, right| if right.as_carrier().is_some() { right } else { left },
/// );
/// let combined = last.combine(Kind::from(Some(1)), Kind::from(Some(2)));
/// assert_eq!(combined.narrow(), Some(2));
/// ```
pub struct KindMonoid<F: Marker, A: Element> {
    zero: Arc<dyn Fn() -> Kind<F, A> + Send + Sync>,
    combine: Arc<dyn Fn(Kind<F, A>, Kind<F, A>) -> Kind<F, A> + Send + Sync>,
}

impl<F: Marker, A: Element> KindMonoid<F, A> {
    /// Builds a monoid from an identity producer and a combine function.
    pub fn new<Zero, Combine>(zero: Zero, combine: Combine) -> Self
    where
        Zero: Fn() -> Kind<F, A> + Send + Sync + 'static,
        Combine: Fn(Kind<F, A>, Kind<F, A>) -> Kind<F, A> + Send + Sync + 'static,
    {
        Self {
            zero: Arc::new(zero),
            combine: Arc::new(combine),
        }
    }

    /// Builds a monoid whose identity is a fixed value.
    pub fn of<Combine>(zero: Kind<F, A>, combine: Combine) -> Self
    where
        Combine: Fn(Kind<F, A>, Kind<F, A>) -> Kind<F, A> + Send + Sync + 'static,
    {
        Self::new(move || zero.clone(), combine)
    }

    /// The identity value.
    pub fn zero(&self) -> Kind<F, A> {
        (self.zero)()
    }

    /// Combines two values.
    pub fn combine(&self, left: Kind<F, A>, right: Kind<F, A>) -> Kind<F, A> {
        (self.combine)(left, right)
    }

    /// Combines every value, starting from the identity.
    pub fn combine_all<I>(&self, values: I) -> Kind<F, A>
    where
        I: IntoIterator<Item = Kind<F, A>>,
    {
        values
            .into_iter()
            .fold(self.zero(), |accumulated, value| self.combine(accumulated, value))
    }
}

impl<F: Marker, A: Element> Clone for KindMonoid<F, A> {
    fn clone(&self) -> Self {
        Self {
            zero: Arc::clone(&self.zero),
            combine: Arc::clone(&self.combine),
        }
    }
}
