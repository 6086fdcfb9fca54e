//! Identity wrapper type - the identity functor.
//!
//! `Identity` adds no effect at all, which makes it:
//!
//! - the base case for transformer stacks
//! - the simplest model for checking type-class laws
//! - the applicative that turns `traverse_a` into plain `map`

/// The identity functor - wraps a value without adding any behavior.
///
/// # Examples
///
/// ```rust
/// use kindred::typeclass::Identity;
///
/// let wrapped = Identity::new(42);
/// assert_eq!(wrapped.into_inner(), 42);
/// assert_eq!(Identity(42).0, 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Creates a new `Identity` wrapping the given value.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Consumes the `Identity` and returns the inner value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Returns a reference to the inner value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self(value)
    }
}
