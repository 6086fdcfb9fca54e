use std::fmt;
use std::marker::PhantomData;

use super::Monadic;
use super::erased::Core;
use crate::comprehender::{Lineage, Reify};
use crate::error::EngineError;
use crate::kind::Element;

/// A carrier of at most one `A`: an option, an identity, a future.
///
/// Binding a function that returns a sequence keeps the sequence's first
/// element and fails with [`EngineError::NoElement`] when it is empty.
/// Failures are deferred: they poison the value and are reported by
/// [`unwrap`](Self::unwrap), [`get`](Self::get) and [`to_vec`](Self::to_vec).
///
/// # Examples
///
/// ```rust
/// use kindred::anym::AnyM;
///
/// let length = AnyM::from_optional(Some("hello"))
///     .flat_map(|text: &str| vec![text.len(), 0])
///     .map(|n: usize| n * 2);
/// assert_eq!(length.unwrap::<Option<usize>>(), Ok(Some(10)));
/// ```
pub struct AnyMValue<A: Element> {
    pub(super) core: Core,
    element: PhantomData<fn() -> A>,
}

impl<A: Element> AnyMValue<A> {
    pub(super) const fn from_core(core: Core) -> Self {
        Self {
            core,
            element: PhantomData,
        }
    }

    /// Always [`Lineage::Value`].
    pub fn lineage(&self) -> Lineage {
        self.core.lineage()
    }

    /// The name of the wrapped carrier.
    pub fn carrier_name(&self) -> &'static str {
        self.core.carrier_name()
    }

    /// Transforms the element.
    #[must_use]
    pub fn map<B, Function>(self, function: Function) -> AnyMValue<B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        AnyMValue::from_core(self.core.map(function, "AnyMValue::map"))
    }

    /// Runs `consumer` on the element without changing it.
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

    /// Binds the element to another carrier, collapsing sequences to their
    /// first element.
    #[must_use]
    pub fn flat_map<R, Function>(self, function: Function) -> AnyMValue<R::Element>
    where
        R: Monadic,
        Function: FnMut(A) -> R + Send + 'static,
    {
        AnyMValue::from_core(self.core.flat_map(function, "AnyMValue::flat_map"))
    }

    /// Empties the carrier when `predicate` rejects the element.
    #[must_use]
    pub fn filter<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        Self::from_core(self.core.filter(predicate))
    }

    /// A carrier of the same family holding `value`.
    pub fn unit<B: Element>(&self, value: B) -> AnyMValue<B> {
        AnyMValue::from_core(self.core.unit(value))
    }

    /// An empty carrier of the same family.
    pub fn empty<B: Element>(&self) -> AnyMValue<B> {
        AnyMValue::from_core(self.core.empty())
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

    /// The element. Blocks for asynchronous carriers.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoElement`] when the carrier is empty, or the first
    /// deferred failure.
    pub fn get(self) -> Result<A, EngineError> {
        let marker = self.carrier_name();
        self.to_vec()?.into_iter().next().ok_or(EngineError::NoElement {
            marker,
            operation: "AnyMValue::get",
        })
    }

    /// The element, if any, as a vector. Blocks for asynchronous carriers.
    ///
    /// # Errors
    ///
    /// The first deferred failure.
    pub fn to_vec(self) -> Result<Vec<A>, EngineError> {
        self.core.to_vec("AnyMValue::to_vec")
    }
}

impl<A: Element> fmt::Debug for AnyMValue<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.core, formatter)
    }
}

#[cfg(test)]
mod tests {
    use crate::anym::AnyM;
    use crate::comprehender::Lineage;
    use crate::error::EngineError;
    use crate::registry::Capability;
    use crate::typeclass::Identity;
    use rstest::rstest;

    #[rstest]
    #[case(Some("hello"), Some(5))]
    #[case(None, None)]
    fn map_over_options(#[case] input: Option<&'static str>, #[case] expected: Option<usize>) {
        let mapped = AnyM::from_optional(input).map(str::len);
        assert_eq!(mapped.unwrap::<Option<usize>>(), Ok(expected));
    }

    #[rstest]
    fn options_are_values() {
        assert_eq!(AnyM::from_optional(Some(1)).lineage(), Lineage::Value);
    }

    #[rstest]
    fn flat_map_collapses_sequences_to_the_first_element() {
        let result = AnyM::from_optional(Some(3)).flat_map(|n: i32| vec![n, n + 1]);
        assert_eq!(result.get(), Ok(3));
    }

    #[rstest]
    fn flat_map_into_an_empty_sequence_fails() {
        let result = AnyM::from_optional(Some(3)).flat_map(|_: i32| Vec::<i32>::new());
        assert!(matches!(result.get(), Err(EngineError::NoElement { marker: "Vec", .. })));
    }

    #[rstest]
    fn filter_empties_rejected_values() {
        let kept = AnyM::from_optional(Some("hello")).filter(|text| text.starts_with("he"));
        let rejected = AnyM::from_optional(Some("hello")).filter(|text| !text.starts_with("he"));
        assert_eq!(kept.unwrap::<Option<&str>>(), Ok(Some("hello")));
        assert_eq!(rejected.unwrap::<Option<&str>>(), Ok(None));
    }

    #[rstest]
    fn identity_filter_reports_the_missing_zero() {
        let rejected = AnyM::from_value(1).filter(|n| *n > 1);
        assert!(matches!(
            rejected.unwrap::<Identity<i32>>(),
            Err(EngineError::MissingInstance { capability: Capability::MonadZero, .. })
        ));
    }

    #[rstest]
    fn unit_and_empty_keep_the_family() {
        let source = AnyM::from_optional(Some(1));
        assert_eq!(source.unit("x").unwrap::<Option<&str>>(), Ok(Some("x")));
        assert_eq!(source.empty::<i32>().unwrap::<Option<i32>>(), Ok(None));
    }

    #[rstest]
    fn unwrapping_as_another_family_is_a_mismatch() {
        let result = AnyM::from_optional(Some(1)).unwrap::<Vec<i32>>();
        assert_eq!(
            result,
            Err(EngineError::KindMismatch {
                expected: "Vec",
                found: "Option",
                operation: "AnyM::unwrap",
            })
        );
    }

    #[rstest]
    fn peek_observes_without_changing() {
        let (sender, receiver) = std::sync::mpsc::channel();
        let value = AnyM::from_value(4).peek(move |n| sender.send(*n).unwrap_or_default());
        assert_eq!(value.get(), Ok(4));
        assert_eq!(receiver.try_recv().ok(), Some(4));
    }

    #[cfg(feature = "async")]
    #[rstest]
    fn futures_bind_to_futures() {
        use crate::carrier::Task;

        let length =
            AnyM::from_future(async { "hello" }).flat_map(|text: &str| Task::ready(text.len()));
        let task = length.unwrap::<Task<Result<usize, EngineError>>>();
        assert_eq!(task.map(Task::block), Ok(Ok(5)));
    }
}
