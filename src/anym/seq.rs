use std::fmt;
use std::marker::PhantomData;

use super::Monadic;
use super::erased::Core;
use crate::comprehender::{Lineage, Reify};
use crate::error::EngineError;
use crate::kind::Element;

/// A carrier of zero or more `A`: a vector, a stream.
///
/// Binding flattens every produced carrier in order; value carriers
/// contribute their element if present.
///
/// # Examples
///
/// ```rust
/// use kindred::anym::AnyM;
///
/// let evens = AnyM::from_iterable(1..=6)
///     .filter(|n: &i32| n % 2 == 0)
///     .flat_map(|n: i32| vec![n, -n]);
/// assert_eq!(evens.to_vec(), Ok(vec![2, -2, 4, -4, 6, -6]));
/// ```
pub struct AnyMSeq<A: Element> {
    pub(super) core: Core,
    element: PhantomData<fn() -> A>,
}

impl<A: Element> AnyMSeq<A> {
    pub(super) const fn from_core(core: Core) -> Self {
        Self {
            core,
            element: PhantomData,
        }
    }

    /// Always [`Lineage::Sequence`].
    pub fn lineage(&self) -> Lineage {
        self.core.lineage()
    }

    /// The name of the wrapped carrier.
    pub fn carrier_name(&self) -> &'static str {
        self.core.carrier_name()
    }

    /// Transforms every element.
    #[must_use]
    pub fn map<B, Function>(self, function: Function) -> AnyMSeq<B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        AnyMSeq::from_core(self.core.map(function, "AnyMSeq::map"))
    }

    /// Runs `consumer` on every element without changing it.
    #[must_use]
    pub fn peek<Consumer>(self, mut consumer: Consumer) -> Self
    where
        Consumer: FnMut(&A) + Send + 'static,
    {
        self.map(move |element| {
            consumer(&element);
            element
        })
    }

    /// Binds every element and flattens the results in order.
    #[must_use]
    pub fn flat_map<R, Function>(self, function: Function) -> AnyMSeq<R::Element>
    where
        R: Monadic,
        Function: FnMut(A) -> R + Send + 'static,
    {
        AnyMSeq::from_core(self.core.flat_map(function, "AnyMSeq::flat_map"))
    }

    /// Keeps the elements satisfying `predicate`.
    #[must_use]
    pub fn filter<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        Self::from_core(self.core.filter(predicate))
    }

    /// A single-element carrier of the same family.
    pub fn unit<B: Element>(&self, value: B) -> AnyMSeq<B> {
        AnyMSeq::from_core(self.core.unit(value))
    }

    /// An empty carrier of the same family.
    pub fn empty<B: Element>(&self) -> AnyMSeq<B> {
        AnyMSeq::from_core(self.core.empty())
    }

    /// The typed carrier.
    ///
    /// # Errors
    ///
    /// The first deferred failure, or [`EngineError::KindMismatch`] when `C`
    /// is not this carrier's family.
    pub fn unwrap<C: Reify<Element = A>>(self) -> Result<C, EngineError> {
        self.core.unwrap()
    }

    /// Every element, in order. Blocks for asynchronous carriers.
    ///
    /// # Errors
    ///
    /// The first deferred failure, including one travelling inside a stream.
    pub fn to_vec(self) -> Result<Vec<A>, EngineError> {
        self.core.to_vec("AnyMSeq::to_vec")
    }
}

impl<A: Element> fmt::Debug for AnyMSeq<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.core, formatter)
    }
}
