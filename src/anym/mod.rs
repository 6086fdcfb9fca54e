//! `AnyM`: one monadic surface over every carrier a comprehender drives.
//!
//! An [`AnyM`] hides its carrier's type behind an erased value and the
//! [`Comprehender`](crate::comprehender::Comprehender) resolved for it, and
//! keeps the carrier's cardinality visible in its variant:
//!
//! - [`AnyMValue`]: at most one element (`Option`, `Identity`, `Task`)
//! - [`AnyMSeq`]: zero or more elements (`Vec`, `VecDeque`, streams)
//!
//! Operations never fail eagerly. A failure (an unknown carrier produced by
//! a bound function, an identity filtered to nothing, an empty sequence
//! collapsed into a value) poisons the value, and the consuming accessors
//! `unwrap`, `to_vec` and `get` report it.
//!
//! # Examples
//!
//! ```rust
//! use kindred::anym::AnyM;
//!
//! fn describe(monad: AnyM<i32>) -> Result<Vec<String>, kindred::EngineError> {
//!     monad.map(|n| n * 10).map(|n| format!("#{n}")).to_vec()
//! }
//!
//! assert_eq!(describe(AnyM::from_optional(Some(4)).into()), Ok(vec!["#40".to_string()]));
//! assert_eq!(describe(AnyM::from_iterable([1, 2]).into()).map(|v| v.len()), Ok(2));
//! ```

mod erased;
mod monadic;
mod seq;
mod value;

#[cfg(feature = "async")]
use futures::{FutureExt, Stream, StreamExt, stream::BoxStream};

pub use monadic::Monadic;
pub use seq::AnyMSeq;
pub use value::AnyMValue;

use self::erased::Core;
#[cfg(feature = "async")]
use crate::carrier::Task;
use crate::comprehender::{
    Dispatch, Dynamic, IdentityComprehender, Lineage, Opaque, OptionComprehender, Reify,
    VecComprehender, erase,
};
#[cfg(feature = "async")]
use crate::comprehender::{StreamComprehender, TaskComprehender};
use crate::error::EngineError;
use crate::kind::Element;
use crate::typeclass::Identity;

/// A carrier of `A` of either lineage.
pub enum AnyM<A: Element> {
    /// At most one element.
    Value(AnyMValue<A>),
    /// Zero or more elements.
    Seq(AnyMSeq<A>),
}

impl<A: Element> AnyM<A> {
    /// Wraps an option.
    pub fn from_optional(value: Option<A>) -> AnyMValue<A> {
        AnyMValue::from_core(Core::new(OptionComprehender, Box::new(value.map(erase))))
    }

    /// Wraps a plain value in an identity carrier, which has no empty state.
    pub fn from_value(value: A) -> AnyMValue<A> {
        AnyMValue::from_core(Core::new(IdentityComprehender, Box::new(Identity(erase(value)))))
    }

    /// Collects an iterable into a vector carrier.
    pub fn from_iterable<I>(elements: I) -> AnyMSeq<A>
    where
        I: IntoIterator<Item = A>,
    {
        let erased: Vec<Dynamic> = elements.into_iter().map(erase).collect();
        AnyMSeq::from_core(Core::new(VecComprehender, Box::new(erased)))
    }

    /// Wraps a future as a shared [`Task`]. Nothing is polled until the
    /// result is consumed.
    #[cfg(feature = "async")]
    pub fn from_future<F>(future: F) -> AnyMValue<A>
    where
        F: Future<Output = A> + Send + 'static,
    {
        let task = Task::from_future(future.map(erase));
        AnyMValue::from_core(Core::new(TaskComprehender, Box::new(task)))
    }

    /// Wraps a stream.
    #[cfg(feature = "async")]
    pub fn from_publisher<S>(elements: S) -> AnyMSeq<A>
    where
        S: Stream<Item = A> + Send + 'static,
    {
        let erased: BoxStream<'static, Dynamic> = elements.map(erase).boxed();
        AnyMSeq::from_core(Core::new(StreamComprehender, Box::new(erased)))
    }

    /// Wraps any erased carrier `dispatch` can resolve, directly or through
    /// a declared ancestor. The variant follows the comprehender's lineage.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownCarrier`] when nothing handles the carrier.
    pub fn from_carrier(dispatch: &Dispatch, carrier: Opaque) -> Result<Self, EngineError> {
        let core = Core::resolve(dispatch, carrier, "AnyM::from_carrier")?;
        Ok(match core.lineage() {
            Lineage::Value => Self::Value(AnyMValue::from_core(core)),
            Lineage::Sequence => Self::Seq(AnyMSeq::from_core(core)),
        })
    }

    /// The carrier's lineage.
    pub fn lineage(&self) -> Lineage {
        match self {
            Self::Value(value) => value.lineage(),
            Self::Seq(sequence) => sequence.lineage(),
        }
    }

    /// The name of the wrapped carrier.
    pub fn carrier_name(&self) -> &'static str {
        match self {
            Self::Value(value) => value.carrier_name(),
            Self::Seq(sequence) => sequence.carrier_name(),
        }
    }

    /// Transforms every element.
    #[must_use]
    pub fn map<B, Function>(self, function: Function) -> AnyM<B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        match self {
            Self::Value(value) => AnyM::Value(value.map(function)),
            Self::Seq(sequence) => AnyM::Seq(sequence.map(function)),
        }
    }

    /// Runs `consumer` on every element without changing it.
    #[must_use]
    pub fn peek<Consumer>(self, consumer: Consumer) -> Self
    where
        Consumer: FnMut(&A) + Send + 'static,
    {
        match self {
            Self::Value(value) => Self::Value(value.peek(consumer)),
            Self::Seq(sequence) => Self::Seq(sequence.peek(consumer)),
        }
    }

    /// Binds every element, with the lineage's cardinality rule.
    #[must_use]
    pub fn flat_map<R, Function>(self, function: Function) -> AnyM<R::Element>
    where
        R: Monadic,
        Function: FnMut(A) -> R + Send + 'static,
    {
        match self {
            Self::Value(value) => AnyM::Value(value.flat_map(function)),
            Self::Seq(sequence) => AnyM::Seq(sequence.flat_map(function)),
        }
    }

    /// Keeps the elements satisfying `predicate`.
    #[must_use]
    pub fn filter<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        match self {
            Self::Value(value) => Self::Value(value.filter(predicate)),
            Self::Seq(sequence) => Self::Seq(sequence.filter(predicate)),
        }
    }

    /// A carrier of the same family holding `value`.
    pub fn unit<B: Element>(&self, value: B) -> AnyM<B> {
        match self {
            Self::Value(current) => AnyM::Value(current.unit(value)),
            Self::Seq(current) => AnyM::Seq(current.unit(value)),
        }
    }

    /// An empty carrier of the same family.
    pub fn empty<B: Element>(&self) -> AnyM<B> {
        match self {
            Self::Value(current) => AnyM::Value(current.empty()),
            Self::Seq(current) => AnyM::Seq(current.empty()),
        }
    }

    /// The typed carrier.
    ///
    /// # Errors
    ///
    /// The first deferred failure, or [`EngineError::KindMismatch`] when `C`
    /// is not this carrier's family.
    pub fn unwrap<C: Reify<Element = A>>(self) -> Result<C, EngineError> {
        match self {
            Self::Value(value) => value.unwrap(),
            Self::Seq(sequence) => sequence.unwrap(),
        }
    }

    /// Every element, in order. Blocks for asynchronous carriers.
    ///
    /// # Errors
    ///
    /// The first deferred failure.
    pub fn to_vec(self) -> Result<Vec<A>, EngineError> {
        match self {
            Self::Value(value) => value.to_vec(),
            Self::Seq(sequence) => sequence.to_vec(),
        }
    }
}

impl<A: Element> std::fmt::Debug for AnyM<A> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => formatter.debug_tuple("Value").field(value).finish(),
            Self::Seq(sequence) => formatter.debug_tuple("Seq").field(sequence).finish(),
        }
    }
}

impl<A: Element> From<AnyMValue<A>> for AnyM<A> {
    fn from(value: AnyMValue<A>) -> Self {
        Self::Value(value)
    }
}

impl<A: Element> From<AnyMSeq<A>> for AnyM<A> {
    fn from(sequence: AnyMSeq<A>) -> Self {
        Self::Seq(sequence)
    }
}

// The erased carrier is owned, not shared.
static_assertions::assert_impl_all!(AnyM<i32>: Send);
static_assertions::assert_not_impl_any!(AnyM<i32>: Sync);

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn from_carrier_picks_the_lineage() {
        let dispatch = Dispatch::builder().build();
        let value = AnyM::<i32>::from_carrier(&dispatch, Box::new(Some(erase(1)))).ok();
        let sequence = AnyM::<i32>::from_carrier(&dispatch, Box::new(vec![erase(1)])).ok();
        assert_eq!(value.map(|any| any.lineage()), Some(Lineage::Value));
        assert_eq!(sequence.map(|any| any.lineage()), Some(Lineage::Sequence));
    }

    #[rstest]
    fn from_carrier_prepares_inherited_carriers() {
        let dispatch = Dispatch::builder().build();
        let deque: Opaque = Box::new(VecDeque::from([erase(1), erase(2)]));
        let any = AnyM::<i32>::from_carrier(&dispatch, deque).map(|any| any.map(|n| n + 1));
        assert_eq!(any.and_then(AnyM::to_vec), Ok(vec![2, 3]));
    }

    #[rstest]
    fn from_carrier_rejects_unknown_carriers() {
        let dispatch = Dispatch::builder().build();
        let result = AnyM::<i32>::from_carrier(&dispatch, Box::new(7_u8));
        assert!(matches!(
            result,
            Err(EngineError::UnknownCarrier { operation: "AnyM::from_carrier", .. })
        ));
    }

    #[rstest]
    fn the_enum_delegates_to_its_variant() {
        let any: AnyM<i32> = AnyM::from_iterable(vec![1, 2, 3]).into();
        let result = any.filter(|n| *n != 2).flat_map(|n: i32| Some(n * 2));
        assert_eq!(result.unwrap::<Vec<i32>>(), Ok(vec![2, 6]));
    }
}
