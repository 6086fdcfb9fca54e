//! `SeqT` - a lazy sequence inside any outer monad.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::debug;

use super::Outer;
use crate::anym::{AnyMSeq, AnyMValue};
use crate::carrier::{Extent, OptionKind, Seq, VecKind, shared, window};
use crate::error::EngineError;
use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{Foldable, Monoid};

/// An outer carrier of sequences, operated on as one carrier of `A`.
///
/// `SeqT<M, A>` wraps `Kind<M::Marker, Seq<A>>`. Element-wise operations are
/// applied to each inner sequence lazily. Operations that must see a whole
/// inner return a `Result` and refuse inners not known to be finite;
/// binding and windowing also need the outer record to be [`Foldable`].
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::VecKind;
/// use kindred::kind::Kind;
/// use kindred::transformer::SeqT;
///
/// let batches = SeqT::from_vecs(VecKind, Kind::from(vec![vec![3, 1, 2], vec![], vec![5, 4]]));
/// let sorted = batches.sorted().map(|values| values.on_empty(0).to_vecs());
/// assert_eq!(sorted.map(|kind| kind.narrow()), Ok(vec![vec![1, 2, 3], vec![0], vec![4, 5]]));
/// ```
pub struct SeqT<M: Outer, A: Element> {
    run: Kind<M::Marker, Seq<A>>,
    monad: M,
}

// =============================================================================
// Construction
// =============================================================================

impl<M: Outer, A: Element> SeqT<M, A> {
    /// Wraps an outer carrier of sequences.
    pub const fn new(monad: M, run: Kind<M::Marker, Seq<A>>) -> Self {
        Self { run, monad }
    }

    /// The outer unit of a single-element sequence.
    pub fn unit(monad: M, value: A) -> Self {
        let run = monad.unit(Seq::of(value));
        Self::new(monad, run)
    }

    /// The outer unit of an empty sequence.
    pub fn empty(monad: M) -> Self {
        let run = monad.unit(Seq::empty());
        Self::new(monad, run)
    }

    /// Makes every outer element a single-element sequence.
    pub fn lift(monad: M, outer: Kind<M::Marker, A>) -> Self {
        let run = monad.map(Seq::of, outer);
        Self::new(monad, run)
    }

    /// The outer unit of a sequence replaying `iterable`.
    pub fn from_iterable<I>(monad: M, iterable: I) -> Self
    where
        I: IntoIterator<Item = A> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        let run = monad.unit(Seq::from_iterable(iterable));
        Self::new(monad, run)
    }

    /// Turns every outer vector into an inner sequence.
    pub fn from_vecs(monad: M, outer: Kind<M::Marker, Vec<A>>) -> Self {
        let run = monad.map(Seq::from_vec, outer);
        Self::new(monad, run)
    }

    /// The wrapped outer carrier.
    pub fn run(self) -> Kind<M::Marker, Seq<A>> {
        self.run
    }

    /// The outer monad record.
    pub const fn monad(&self) -> &M {
        &self.monad
    }

    /// Materialises every inner sequence. Never completes for an infinite
    /// inner.
    pub fn to_vecs(self) -> Kind<M::Marker, Vec<A>> {
        self.monad.map(|inner: Seq<A>| inner.to_vec(), self.run)
    }

    /// Applies `function` to every inner sequence.
    fn map_inner<B, Function>(self, function: Function) -> SeqT<M, B>
    where
        B: Element,
        Function: FnMut(Seq<A>) -> Seq<B> + Send + 'static,
    {
        let run = self.monad.map(function, self.run);
        SeqT::new(self.monad, run)
    }
}

// =============================================================================
// Monadic Operations
// =============================================================================

impl<M: Outer, A: Element> SeqT<M, A> {
    /// Transforms every element.
    #[must_use]
    pub fn map<B, Function>(self, function: Function) -> SeqT<M, B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        let function = shared(function);
        self.map_inner(move |inner| {
            let function = Arc::clone(&function);
            inner.map(move |element| (&mut *function.lock())(element))
        })
    }

    /// Runs `consumer` on every element as it is traversed.
    #[must_use]
    pub fn peek<Consumer>(self, consumer: Consumer) -> Self
    where
        Consumer: FnMut(&A) + Send + 'static,
    {
        let consumer = shared(consumer);
        self.map_inner(move |inner| {
            let consumer = Arc::clone(&consumer);
            inner.peek(move |element| (&mut *consumer.lock())(element))
        })
    }

    /// Keeps the elements satisfying `predicate`.
    #[must_use]
    pub fn filter<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.map_inner(move |inner| {
            let predicate = Arc::clone(&predicate);
            inner.filter(move |element| (&mut *predicate.lock())(element))
        })
    }

    /// Drops the elements satisfying `predicate`.
    #[must_use]
    pub fn filter_not<Predicate>(self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.filter(move |element| !predicate(element))
    }

    /// Replaces every element with the inner sequence `function` returns.
    #[must_use]
    pub fn flat_map_inner<B, Function>(self, function: Function) -> SeqT<M, B>
    where
        B: Element,
        Function: FnMut(A) -> Seq<B> + Send + 'static,
    {
        let function = shared(function);
        self.map_inner(move |inner| {
            let function = Arc::clone(&function);
            inner.flat_map(move |element| (&mut *function.lock())(element))
        })
    }

    /// Binds every element to another transformer over the same outer monad.
    ///
    /// The outer shape of `self` is kept. Each inner element is replaced, as
    /// it is traversed, by the concatenated inner sequences of the
    /// transformer `function` returns for it; an empty outer there
    /// contributes nothing. Binding stays lazy, so infinite inners on either
    /// side can still be limited. Traversal blocks on asynchronous outers of
    /// the returned transformers.
    #[must_use]
    pub fn flat_map<B, Function>(self, function: Function) -> SeqT<M, B>
    where
        M: Foldable,
        B: Element,
        Function: FnMut(A) -> SeqT<M, B> + Send + 'static,
    {
        let monad = self.monad.clone();
        let function = shared(function);
        self.map_inner(move |inner| {
            let monad = monad.clone();
            let function = Arc::clone(&function);
            inner.flat_map(move |element| {
                let bound = (&mut *function.lock())(element).run;
                monad.fold_left(
                    Seq::empty(),
                    |collected: Seq<B>, more: Seq<B>| collected.concat(&more),
                    bound,
                )
            })
        })
    }

    /// Pairs every inner of `self` with every inner of `other`, in the outer
    /// monad's binding order, zipping elements positionally.
    #[must_use]
    pub fn zip<B: Element>(self, other: SeqT<M, B>) -> SeqT<M, (A, B)> {
        let monad = self.monad.clone();
        let right = other.run;
        let run = self.monad.flat_map(
            move |left: Seq<A>| monad.map(move |inner: Seq<B>| left.zip(&inner), right.clone()),
            self.run,
        );
        SeqT::new(self.monad, run)
    }

    /// [`zip`](Self::zip) followed by `function` on each pair.
    #[must_use]
    pub fn zip_with<B, C, Function>(self, other: SeqT<M, B>, mut function: Function) -> SeqT<M, C>
    where
        B: Element,
        C: Element,
        Function: FnMut(A, B) -> C + Send + 'static,
    {
        self.zip(other).map(move |(left, right)| function(left, right))
    }

    /// Zips three transformers.
    #[must_use]
    pub fn zip3<B, C>(self, second: SeqT<M, B>, third: SeqT<M, C>) -> SeqT<M, (A, B, C)>
    where
        B: Element,
        C: Element,
    {
        self.zip(second)
            .zip(third)
            .map(|((first, second), third)| (first, second, third))
    }

    /// Zips four transformers.
    #[must_use]
    pub fn zip4<B, C, D>(
        self,
        second: SeqT<M, B>,
        third: SeqT<M, C>,
        fourth: SeqT<M, D>,
    ) -> SeqT<M, (A, B, C, D)>
    where
        B: Element,
        C: Element,
        D: Element,
    {
        self.zip3(second, third)
            .zip(fourth)
            .map(|((first, second, third), fourth)| (first, second, third, fourth))
    }

    /// Zips every inner with a replay of `iterable`.
    #[must_use]
    pub fn zip_iterable<B, I>(self, iterable: I) -> SeqT<M, (A, B)>
    where
        B: Element,
        I: IntoIterator<Item = B> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        let other = Seq::from_iterable(iterable);
        self.map_inner(move |inner| inner.zip(&other))
    }

    /// Pairs every element with its position in its inner sequence.
    #[must_use]
    pub fn zip_with_index(self) -> SeqT<M, (A, usize)> {
        self.map_inner(|inner| inner.zip_with_index())
    }

    /// Reduces every inner sequence from the left.
    pub fn fold_left<B, Function>(self, init: B, function: Function) -> Kind<M::Marker, B>
    where
        B: Element,
        Function: FnMut(B, A) -> B + Send + 'static,
    {
        let function = shared(function);
        self.monad.map(
            move |inner: Seq<A>| {
                let mut function = function.lock();
                inner.iter().fold(init.clone(), |accumulated, element| {
                    (&mut *function)(accumulated, element)
                })
            },
            self.run,
        )
    }

    /// Combines every inner sequence with its monoid.
    pub fn sum(self) -> Kind<M::Marker, A>
    where
        A: Monoid,
    {
        self.monad.map(|inner: Seq<A>| A::combine_all(inner.iter()), self.run)
    }

    /// Lifts a plain function into one over transformers.
    pub fn lift_fn<B, Function>(function: Function) -> impl Fn(Self) -> SeqT<M, B>
    where
        B: Element,
        Function: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        move |transformer: Self| {
            let function = Arc::clone(&function);
            transformer.map(move |element| function(element))
        }
    }
}

// =============================================================================
// Per-Inner Sequence Operations
// =============================================================================

impl<M: Outer, A: Element> SeqT<M, A> {
    /// Running accumulations from the left, per inner, starting with `seed`.
    #[must_use]
    pub fn scan_left<B, Function>(self, seed: B, function: Function) -> SeqT<M, B>
    where
        B: Element,
        Function: FnMut(B, &A) -> B + Send + 'static,
    {
        let function = shared(function);
        self.map_inner(move |inner| {
            let function = Arc::clone(&function);
            inner.scan_left(seed.clone(), move |accumulated, element| {
                (&mut *function.lock())(accumulated, element)
            })
        })
    }

    /// Running monoidal sums, per inner, starting with the monoid's empty.
    #[must_use]
    pub fn scan_left_monoid(self) -> Self
    where
        A: Monoid,
    {
        self.scan_left(A::empty(), |accumulated: A, element: &A| {
            accumulated.combine(element.clone())
        })
    }

    /// Folds each run of adjacent elements with `operator` while `predicate`
    /// holds for the value merged so far and the next element, per inner.
    #[must_use]
    pub fn combine<Predicate, Operator>(self, predicate: Predicate, operator: Operator) -> Self
    where
        Predicate: FnMut(&A, &A) -> bool + Send + 'static,
        Operator: FnMut(A, A) -> A + Send + 'static,
    {
        let predicate = shared(predicate);
        let operator = shared(operator);
        self.map_inner(move |inner| {
            let (predicate, operator) = (Arc::clone(&predicate), Arc::clone(&operator));
            inner.merge_adjacent(
                move |merged, next| (&mut *predicate.lock())(merged, next),
                move |left, right| (&mut *operator.lock())(left, right),
            )
        })
    }

    /// Drops repeated elements within each inner.
    #[must_use]
    pub fn distinct(self) -> Self
    where
        A: Hash + Eq,
    {
        self.map_inner(|inner| inner.distinct())
    }

    /// Elements before the first that fails `predicate`, per inner.
    #[must_use]
    pub fn take_while<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.map_inner(move |inner| {
            let predicate = Arc::clone(&predicate);
            inner.take_while(move |element| (&mut *predicate.lock())(element))
        })
    }

    /// Elements before the first that satisfies `predicate`, per inner.
    #[must_use]
    pub fn take_until<Predicate>(self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.take_while(move |element| !predicate(element))
    }

    /// Elements from the first that fails `predicate` on, per inner.
    #[must_use]
    pub fn drop_while<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.map_inner(move |inner| {
            let predicate = Arc::clone(&predicate);
            inner.drop_while(move |element| (&mut *predicate.lock())(element))
        })
    }

    /// Elements from the first that satisfies `predicate` on, per inner.
    #[must_use]
    pub fn drop_until<Predicate>(self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.drop_while(move |element| !predicate(element))
    }

    /// All but the first `count` elements of each inner.
    #[must_use]
    pub fn skip(self, count: usize) -> Self {
        self.map_inner(move |inner| inner.skip(count))
    }

    /// At most `count` elements of each inner.
    #[must_use]
    pub fn limit(self, count: usize) -> Self {
        self.map_inner(move |inner| inner.limit(count))
    }

    /// Elements at positions `from..until` of each inner.
    #[must_use]
    pub fn slice(self, from: usize, until: usize) -> Self {
        self.map_inner(move |inner| inner.slice(from, until))
    }

    /// Places `separator` between consecutive elements of each inner.
    #[must_use]
    pub fn intersperse(self, separator: A) -> Self {
        self.map_inner(move |inner| inner.intersperse(separator.clone()))
    }

    /// Replaces every empty inner with `value` alone.
    #[must_use]
    pub fn on_empty(self, value: A) -> Self {
        self.map_inner(move |inner| inner.on_empty(value.clone()))
    }

    /// Replaces every empty inner with the value `supplier` produces.
    #[must_use]
    pub fn on_empty_get<Supplier>(self, supplier: Supplier) -> Self
    where
        Supplier: Fn() -> A + Send + Sync + 'static,
    {
        let supplier = Arc::new(supplier);
        self.map_inner(move |inner| {
            let supplier = Arc::clone(&supplier);
            inner.on_empty_get(move || supplier())
        })
    }

    /// Elements as `Ok`; every empty inner becomes a single `Err` from
    /// `supplier`.
    #[must_use]
    pub fn on_empty_throw<E, Supplier>(self, supplier: Supplier) -> SeqT<M, Result<A, E>>
    where
        E: Element,
        Supplier: Fn() -> E + Send + Sync + 'static,
    {
        let supplier = Arc::new(supplier);
        self.map_inner(move |inner| {
            let supplier = Arc::clone(&supplier);
            inner.on_empty_try(move || supplier())
        })
    }

    /// Repeats each inner while `predicate` holds for its elements.
    #[must_use]
    pub fn cycle_while<Predicate>(self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.map_inner(move |inner| {
            let predicate = Arc::clone(&predicate);
            inner.cycle_while(move |element| (&mut *predicate.lock())(element))
        })
    }

    /// Repeats each inner until `predicate` holds for one of its elements.
    #[must_use]
    pub fn cycle_until<Predicate>(self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.cycle_while(move |element| !predicate(element))
    }
}

// =============================================================================
// Whole-Inner Operations
// =============================================================================

impl<M, A> SeqT<M, A>
where
    M: Outer + Foldable,
    A: Element,
{
    /// Fails with the error `refusal` builds unless every inner is known to
    /// be finite. Inners whose extent stays unknown after resolution are
    /// refused along with infinite ones.
    ///
    /// Blocks on asynchronous outers, since every inner has to be inspected.
    fn ensure_finite(
        &self,
        operation: &'static str,
        refusal: fn(&'static str, &'static str) -> EngineError,
    ) -> Result<(), EngineError> {
        let unbounded = self.monad.fold_left(
            None,
            |found: Option<Extent>, inner: Seq<A>| {
                found.or_else(|| {
                    Some(inner.resolved_extent()).filter(|extent| *extent != Extent::Finite)
                })
            },
            self.run.clone(),
        );
        match unbounded {
            Some(extent) => {
                debug!(
                    outer = <M::Marker as Marker>::NAME,
                    operation,
                    ?extent,
                    "refused inner sequence not known to be finite"
                );
                Err(refusal(<M::Marker as Marker>::NAME, operation))
            }
            None => Ok(()),
        }
    }

    fn unorderable(marker: &'static str, operation: &'static str) -> EngineError {
        EngineError::UnorderableInfinite { marker, operation }
    }

    fn uncyclable(marker: &'static str, operation: &'static str) -> EngineError {
        EngineError::CycleOnInfinite { marker, operation }
    }

    fn checked<B, Function>(
        self,
        operation: &'static str,
        function: Function,
    ) -> Result<SeqT<M, B>, EngineError>
    where
        B: Element,
        Function: FnMut(Seq<A>) -> Seq<B> + Send + 'static,
    {
        self.ensure_finite(operation, Self::unorderable)?;
        Ok(self.map_inner(function))
    }

    /// Each inner repeated `times` times.
    ///
    /// # Errors
    ///
    /// [`EngineError::CycleOnInfinite`] if any inner is not known to be finite.
    pub fn cycle(self, times: usize) -> Result<Self, EngineError> {
        self.ensure_finite("SeqT::cycle", Self::uncyclable)?;
        Ok(self.map_inner(move |inner| inner.cycle(times)))
    }

    /// The monoidal sum of each inner, repeated `times` times.
    ///
    /// # Errors
    ///
    /// [`EngineError::CycleOnInfinite`] if any inner is not known to be finite.
    pub fn cycle_combined(self, times: usize) -> Result<Self, EngineError>
    where
        A: Monoid,
    {
        self.ensure_finite("SeqT::cycle_combined", Self::uncyclable)?;
        Ok(self.map_inner(move |inner| inner.cycle_combined(times)))
    }

    /// Each inner sorted by the natural order.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn sorted(self) -> Result<Self, EngineError>
    where
        A: Ord,
    {
        self.checked("SeqT::sorted", |inner| inner.sorted())
    }

    /// Each inner sorted by the key `key` extracts, stably.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn sorted_by_key<K, Key>(self, key: Key) -> Result<Self, EngineError>
    where
        K: Ord,
        Key: Fn(&A) -> K + Send + Sync + 'static,
    {
        let key = Arc::new(key);
        self.checked("SeqT::sorted_by_key", move |inner| {
            let key = Arc::clone(&key);
            inner.sorted_by_key(move |element| key(element))
        })
    }

    /// Each inner sorted by `comparator`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn sorted_by<Comparator>(self, comparator: Comparator) -> Result<Self, EngineError>
    where
        Comparator: Fn(&A, &A) -> Ordering + Send + Sync + 'static,
    {
        let comparator = Arc::new(comparator);
        self.checked("SeqT::sorted_by", move |inner| {
            let comparator = Arc::clone(&comparator);
            inner.sorted_by(move |left, right| comparator(left, right))
        })
    }

    /// Each inner randomly permuted.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn shuffle(self) -> Result<Self, EngineError> {
        self.checked("SeqT::shuffle", |inner| inner.shuffle())
    }

    /// Each inner permuted as determined by `seed`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn shuffle_seeded(self, seed: u64) -> Result<Self, EngineError> {
        self.checked("SeqT::shuffle_seeded", move |inner| inner.shuffle_seeded(seed))
    }

    /// Each inner reversed.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn reverse(self) -> Result<Self, EngineError> {
        self.checked("SeqT::reverse", |inner| inner.reverse())
    }

    /// Running accumulations from the right, per inner, ending with `seed`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn scan_right<B, Function>(
        self,
        seed: B,
        function: Function,
    ) -> Result<SeqT<M, B>, EngineError>
    where
        B: Element,
        Function: FnMut(&A, B) -> B + Send + 'static,
    {
        let function = shared(function);
        self.checked("SeqT::scan_right", move |inner| {
            let function = Arc::clone(&function);
            inner.scan_right(seed.clone(), move |element, accumulated| {
                (&mut *function.lock())(element, accumulated)
            })
        })
    }

    /// Running monoidal sums from the right, per inner, ending with the
    /// monoid's empty.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn scan_right_monoid(self) -> Result<Self, EngineError>
    where
        A: Monoid,
    {
        self.scan_right(A::empty(), |element: &A, accumulated: A| {
            element.clone().combine(accumulated)
        })
    }

    /// The elements of each inner grouped by the key `classifier` assigns,
    /// groups ordered by the first appearance of their key.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn grouped_by<K, Classifier>(
        self,
        classifier: Classifier,
    ) -> Result<SeqT<M, (K, Vec<A>)>, EngineError>
    where
        K: Element + Hash + Eq,
        Classifier: Fn(&A) -> K + Send + Sync + 'static,
    {
        let classifier = Arc::new(classifier);
        self.checked("SeqT::grouped_by", move |inner| {
            let classifier = Arc::clone(&classifier);
            inner.grouped_by(move |element| classifier(element))
        })
    }

    /// All but the last `count` elements of each inner.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn skip_last(self, count: usize) -> Result<Self, EngineError> {
        self.checked("SeqT::skip_last", move |inner| inner.skip_last(count))
    }

    /// At most the last `count` elements of each inner.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn limit_last(self, count: usize) -> Result<Self, EngineError> {
        self.checked("SeqT::limit_last", move |inner| inner.limit_last(count))
    }
}

// =============================================================================
// Windowing
// =============================================================================

impl<M, A> SeqT<M, A>
where
    M: Outer + Foldable,
    A: Element,
{
    /// Splits the concatenation of every inner, in outer order, into
    /// batches, and re-wraps them as a single outer element. An empty outer
    /// stays empty.
    fn windowed<Split>(
        self,
        operation: &'static str,
        split: Split,
    ) -> Result<SeqT<M, Vec<A>>, EngineError>
    where
        Split: FnOnce(Vec<A>) -> Vec<Vec<A>>,
    {
        self.ensure_finite(operation, Self::unorderable)?;
        if self.monad.length(&self.run) == 0 {
            return Ok(self.map_inner(|_| Seq::empty()));
        }
        let concatenated = self.monad.fold_left(
            Vec::new(),
            |mut elements, inner: Seq<A>| {
                elements.extend(inner.iter());
                elements
            },
            self.run,
        );
        let run = self.monad.unit(Seq::from_vec(split(concatenated)));
        Ok(SeqT::new(self.monad, run))
    }

    /// Overlapping windows of `size` elements, one element apart.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn sliding(self, size: usize) -> Result<SeqT<M, Vec<A>>, EngineError> {
        self.sliding_by(size, 1)
    }

    /// Windows of `size` elements whose starts are `increment` apart.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn sliding_by(self, size: usize, increment: usize) -> Result<SeqT<M, Vec<A>>, EngineError> {
        self.windowed("SeqT::sliding_by", |elements| window::sliding(&elements, size, increment))
    }

    /// Consecutive batches of `size` elements.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn grouped(self, size: usize) -> Result<SeqT<M, Vec<A>>, EngineError> {
        self.windowed("SeqT::grouped", |elements| window::grouped(&elements, size))
    }

    /// Batches each closed by an element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn grouped_until<Predicate>(
        self,
        predicate: Predicate,
    ) -> Result<SeqT<M, Vec<A>>, EngineError>
    where
        Predicate: FnMut(&A) -> bool,
    {
        self.windowed("SeqT::grouped_until", |elements| window::grouped_until(elements, predicate))
    }

    /// Batches extended while `predicate` holds.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn grouped_while<Predicate>(
        self,
        mut predicate: Predicate,
    ) -> Result<SeqT<M, Vec<A>>, EngineError>
    where
        Predicate: FnMut(&A) -> bool,
    {
        self.windowed("SeqT::grouped_while", |elements| {
            window::grouped_until(elements, |element| !predicate(element))
        })
    }

    /// Batches closed when `predicate` holds for the batch so far and its
    /// newest element.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnorderableInfinite`] if any inner is not known to be finite.
    pub fn grouped_statefully_until<Predicate>(
        self,
        predicate: Predicate,
    ) -> Result<SeqT<M, Vec<A>>, EngineError>
    where
        Predicate: FnMut(&[A], &A) -> bool,
    {
        self.windowed("SeqT::grouped_statefully_until", |elements| {
            window::grouped_statefully_until(elements, predicate)
        })
    }
}

// =============================================================================
// Erased Construction
// =============================================================================

impl<A: Element> SeqT<OptionKind, A> {
    /// Lifts the value an erased single-value carrier holds, if any.
    ///
    /// # Errors
    ///
    /// Whatever reading `anym` fails with.
    pub fn from_anym_value(anym: AnyMValue<A>) -> Result<Self, EngineError> {
        let value = anym.to_vec()?.into_iter().next();
        Ok(Self::lift(OptionKind, Kind::from(value)))
    }
}

impl<A: Element> SeqT<VecKind, A> {
    /// Lifts every element of an erased sequence carrier.
    ///
    /// # Errors
    ///
    /// Whatever reading `anym` fails with.
    pub fn from_anym_seq(anym: AnyMSeq<A>) -> Result<Self, EngineError> {
        Ok(Self::lift(VecKind, Kind::from(anym.to_vec()?)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<M: Outer, A: Element> Clone for SeqT<M, A> {
    fn clone(&self) -> Self {
        Self {
            run: self.run.clone(),
            monad: self.monad.clone(),
        }
    }
}

impl<M: Outer, A: Element> fmt::Debug for SeqT<M, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SeqT")
            .field("outer", &<M::Marker as Marker>::NAME)
            .finish_non_exhaustive()
    }
}
