//! [`Seq<A>`], a lazy replayable sequence, and its marker [`SeqKind`].
//!
//! A `Seq` holds a factory of iterators rather than an iterator, so every
//! traversal starts from the beginning and clones share the factory. This is
//! what makes it a carrier: it can be cloned, stored inside other carriers and
//! observed any number of times, and it may be infinite.
//!
//! Operations that must see every element before emitting one (sorting,
//! reversing, shuffling, right scans, windowing) collect the underlying
//! iteration. On an infinite sequence those never terminate, which is why the
//! transformers check [`Seq::is_infinite`] before calling them.
//!
//! # Examples
//!
//! ```rust
//! use kindred::carrier::Seq;
//!
//! let naturals = Seq::iterate(0_u64, |n| n + 1);
//! assert!(naturals.is_infinite());
//!
//! let evens = naturals.filter(|n| n % 2 == 0).limit(3);
//! assert_eq!(evens.to_vec(), vec![0, 2, 4]);
//! // Replayable: a second traversal starts over.
//! assert_eq!(evens.to_vec(), vec![0, 2, 4]);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::convert::identity;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};

use super::window;
use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{
    Applicative, Foldable, Functor, Instance, Monad, MonadPlus, MonadZero, Monoid, Unfoldable,
};

/// One traversal of a [`Seq`].
pub type Elements<A> = Box<dyn Iterator<Item = A> + Send>;

type Source<A> = Arc<dyn Fn() -> Elements<A> + Send + Sync>;

type Resolver = Arc<dyn Fn() -> Extent + Send + Sync>;

/// What is known about the length of a [`Seq`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extent {
    /// Every traversal ends.
    Finite,
    /// No traversal ends.
    Infinite,
    /// Nothing is known yet, e.g. after `take_while` or `flat_map`.
    Unknown,
}

impl Extent {
    fn from_size_hint((lower, upper): (usize, Option<usize>)) -> Self {
        if lower == usize::MAX {
            Self::Infinite
        } else if upper.is_some() {
            Self::Finite
        } else {
            Self::Unknown
        }
    }

    /// Extent of two sequences traversed one after the other.
    const fn then(self, other: Self) -> Self {
        match (self, other) {
            (Self::Infinite, _) | (_, Self::Infinite) => Self::Infinite,
            (Self::Finite, Self::Finite) => Self::Finite,
            _ => Self::Unknown,
        }
    }

    /// Extent of two sequences traversed in lockstep.
    const fn shortest(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite, _) | (_, Self::Finite) => Self::Finite,
            (Self::Infinite, Self::Infinite) => Self::Infinite,
            _ => Self::Unknown,
        }
    }

    /// Extent after an operation that may stop early.
    const fn bounded(self) -> Self {
        match self {
            Self::Finite => Self::Finite,
            _ => Self::Unknown,
        }
    }
}

pub(crate) fn shared<F>(function: F) -> Arc<Mutex<F>> {
    Arc::new(Mutex::new(function))
}

/// A lazy, replayable, possibly infinite sequence.
///
/// Besides its iterator factory a `Seq` carries its [`Extent`]. An `Unknown`
/// extent may come with a resolver that settles it from the sequences it was
/// built from; see [`Seq::resolved_extent`].
pub struct Seq<A> {
    source: Source<A>,
    extent: Extent,
    resolver: Option<Resolver>,
}

impl<A> Clone for Seq<A> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            extent: self.extent,
            resolver: self.resolver.clone(),
        }
    }
}

impl<A: Element> Default for Seq<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: Element> FromIterator<A> for Seq<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iterable: I) -> Self {
        Self::from_vec(iterable.into_iter().collect())
    }
}

impl<A: Element> From<Vec<A>> for Seq<A> {
    fn from(values: Vec<A>) -> Self {
        Self::from_vec(values)
    }
}

impl<A: Element + fmt::Debug> fmt::Debug for Seq<A> {
    /// Prints at most the first eight elements.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        let mut elements = self.iter();
        let mut list = formatter.debug_list();
        list.entries(elements.by_ref().take(PREVIEW));
        if elements.next().is_some() {
            list.finish_non_exhaustive()
        } else {
            list.finish()
        }
    }
}

impl<A: Element> Seq<A> {
    /// Builds a sequence from an iterator factory, called once per traversal.
    pub fn from_fn<S>(extent: Extent, source: S) -> Self
    where
        S: Fn() -> Elements<A> + Send + Sync + 'static,
    {
        Self {
            source: Arc::new(source),
            extent,
            resolver: None,
        }
    }

    /// The sequence with no elements.
    pub fn empty() -> Self {
        Self::from_fn(Extent::Finite, || Box::new(std::iter::empty()))
    }

    /// The sequence holding exactly `value`.
    pub fn of(value: A) -> Self {
        Self::from_fn(Extent::Finite, move || Box::new(std::iter::once(value.clone())))
    }

    /// A finite sequence over `values`.
    pub fn from_vec(values: Vec<A>) -> Self {
        let values: Arc<[A]> = values.into();
        Self::from_fn(Extent::Finite, move || {
            let values = Arc::clone(&values);
            Box::new((0..values.len()).map(move |index| values[index].clone()))
        })
    }

    /// A sequence replaying a cloneable iterable.
    ///
    /// The extent is read from the iterator's size hint.
    pub fn from_iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = A> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        let extent = Extent::from_size_hint(iterable.clone().into_iter().size_hint());
        Self::from_fn(extent, move || Box::new(iterable.clone().into_iter()))
    }

    /// The infinite sequence `seed, step(seed), step(step(seed)), ...`.
    pub fn iterate<Step>(seed: A, step: Step) -> Self
    where
        Step: Fn(&A) -> A + Send + Sync + 'static,
    {
        let step = Arc::new(step);
        Self::from_fn(Extent::Infinite, move || {
            let step = Arc::clone(&step);
            Box::new(std::iter::successors(Some(seed.clone()), move |previous| {
                Some(step(previous))
            }))
        })
    }

    /// The infinite sequence of values produced by `supplier`.
    pub fn generate<Supplier>(supplier: Supplier) -> Self
    where
        Supplier: Fn() -> A + Send + Sync + 'static,
    {
        let supplier = Arc::new(supplier);
        Self::from_fn(Extent::Infinite, move || {
            let supplier = Arc::clone(&supplier);
            Box::new(std::iter::repeat_with(move || supplier()))
        })
    }

    /// The infinite sequence repeating `value`.
    pub fn repeat(value: A) -> Self {
        Self::from_fn(Extent::Infinite, move || Box::new(std::iter::repeat(value.clone())))
    }

    /// Starts a new traversal.
    pub fn iter(&self) -> Elements<A> {
        (self.source)()
    }

    /// What is known about this sequence's length.
    pub const fn extent(&self) -> Extent {
        self.extent
    }

    /// The extent, with `Unknown` settled where the parts this sequence was
    /// built from can be inspected.
    ///
    /// Settling a `flat_map` over a finite source calls the bound function
    /// once per source element, without traversing what it returns.
    pub fn resolved_extent(&self) -> Extent {
        match (&self.resolver, self.extent) {
            (Some(resolver), Extent::Unknown) => resolver(),
            (_, extent) => extent,
        }
    }

    /// Whether traversals of this sequence never end, as far as can be told
    /// without traversing it.
    pub fn is_infinite(&self) -> bool {
        self.resolved_extent() == Extent::Infinite || self.iter().size_hint().0 == usize::MAX
    }

    /// Whether every traversal of this sequence is known to end.
    pub fn is_finite(&self) -> bool {
        self.resolved_extent() == Extent::Finite
    }

    /// Whether the first traversal yields nothing.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// The first element, if any.
    pub fn first(&self) -> Option<A> {
        self.iter().next()
    }

    /// Collects one traversal. Never returns for an infinite sequence.
    pub fn to_vec(&self) -> Vec<A> {
        self.iter().collect()
    }

    fn settled_by<P>(mut self, resolver: P) -> Self
    where
        P: Fn() -> Extent + Send + Sync + 'static,
    {
        if self.extent == Extent::Unknown {
            self.resolver = Some(Arc::new(resolver));
        }
        self
    }

    /// Gives `derived`, whose extent is `rule` of this one's, a resolver when
    /// this sequence has one.
    fn inherit<B: Element>(&self, rule: fn(Extent) -> Extent, derived: Seq<B>) -> Seq<B> {
        if self.resolver.is_none() {
            return derived;
        }
        let parent = self.clone();
        derived.settled_by(move || rule(parent.resolved_extent()))
    }

    /// Like [`inherit`](Self::inherit) for a sequence built from two.
    fn inherit_pair<B, C>(
        &self,
        other: &Seq<B>,
        rule: fn(Extent, Extent) -> Extent,
        derived: Seq<C>,
    ) -> Seq<C>
    where
        B: Element,
        C: Element,
    {
        if self.resolver.is_none() && other.resolver.is_none() {
            return derived;
        }
        let (left, right) = (self.clone(), other.clone());
        derived.settled_by(move || rule(left.resolved_extent(), right.resolved_extent()))
    }

    fn derive<B, Transform>(&self, rule: fn(Extent) -> Extent, transform: Transform) -> Seq<B>
    where
        B: Element,
        Transform: Fn(Elements<A>) -> Elements<B> + Send + Sync + 'static,
    {
        let source = Arc::clone(&self.source);
        self.inherit(rule, Seq::from_fn(rule(self.extent), move || transform(source())))
    }

    /// Collects every traversal before handing it to `transform`.
    fn materialised<B, Transform>(&self, transform: Transform) -> Seq<B>
    where
        B: Element,
        Transform: Fn(Vec<A>) -> Vec<B> + Send + Sync + 'static,
    {
        self.derive(identity, move |elements| {
            Box::new(transform(elements.collect()).into_iter())
        })
    }

    /// Applies `function` to every element, lazily.
    pub fn map<B, Function>(&self, function: Function) -> Seq<B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        let function = shared(function);
        self.derive(identity, move |elements| {
            let function = Arc::clone(&function);
            Box::new(elements.map(move |element| (&mut *function.lock())(element)))
        })
    }

    /// Runs `action` on every element as it is traversed.
    pub fn peek<Action>(&self, action: Action) -> Self
    where
        Action: FnMut(&A) + Send + 'static,
    {
        let action = shared(action);
        self.derive(identity, move |elements| {
            let action = Arc::clone(&action);
            Box::new(elements.inspect(move |element| (&mut *action.lock())(element)))
        })
    }

    /// Replaces every element with the sequence `function` returns for it.
    pub fn flat_map<B, Function>(&self, function: Function) -> Seq<B>
    where
        B: Element,
        Function: FnMut(A) -> Seq<B> + Send + 'static,
    {
        let function = shared(function);
        let extent = match self.extent {
            Extent::Infinite => Extent::Infinite,
            _ => Extent::Unknown,
        };
        let source = Arc::clone(&self.source);
        let traversal = Arc::clone(&function);
        let bound = Seq::from_fn(extent, move || {
            let function = Arc::clone(&traversal);
            Box::new(source().flat_map(move |element| (&mut *function.lock())(element).iter()))
        });
        let parent = self.clone();
        bound.settled_by(move || match parent.resolved_extent() {
            Extent::Finite => {
                let mut settled = Extent::Finite;
                for element in parent.iter() {
                    let produced = (&mut *function.lock())(element);
                    settled = settled.then(produced.resolved_extent());
                    if settled == Extent::Infinite {
                        break;
                    }
                }
                settled
            }
            extent => extent,
        })
    }

    /// Keeps the elements satisfying `predicate`.
    pub fn filter<Predicate>(&self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.derive(identity, move |elements| {
            let predicate = Arc::clone(&predicate);
            Box::new(elements.filter(move |element| (&mut *predicate.lock())(element)))
        })
    }

    /// Elements for which `predicate` does not hold.
    pub fn filter_not<Predicate>(&self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.filter(move |element| !predicate(element))
    }

    /// Folds each run of adjacent elements with `operator` while `predicate`
    /// holds for the value merged so far and the next element.
    pub fn merge_adjacent<Predicate, Operator>(
        &self,
        predicate: Predicate,
        operator: Operator,
    ) -> Self
    where
        Predicate: FnMut(&A, &A) -> bool + Send + 'static,
        Operator: FnMut(A, A) -> A + Send + 'static,
    {
        let predicate = shared(predicate);
        let operator = shared(operator);
        self.derive(Extent::bounded, move |elements| {
            let predicate = Arc::clone(&predicate);
            let operator = Arc::clone(&operator);
            let mut elements = elements.peekable();
            Box::new(std::iter::from_fn(move || {
                let mut merged = elements.next()?;
                while let Some(next) =
                    elements.next_if(|next| (&mut *predicate.lock())(&merged, next))
                {
                    merged = (&mut *operator.lock())(merged, next);
                }
                Some(merged)
            }))
        })
    }

    /// This sequence followed by `other`.
    pub fn concat(&self, other: &Self) -> Self {
        let tail = other.clone();
        let source = Arc::clone(&self.source);
        let joined = Self::from_fn(self.extent.then(other.extent), move || {
            Box::new(source().chain(tail.iter()))
        });
        self.inherit_pair(other, Extent::then, joined)
    }

    /// Pairs elements positionally, stopping at the shorter sequence.
    pub fn zip<B: Element>(&self, other: &Seq<B>) -> Seq<(A, B)> {
        let right = other.clone();
        let source = Arc::clone(&self.source);
        let zipped = Seq::from_fn(self.extent.shortest(other.extent), move || {
            Box::new(source().zip(right.iter()))
        });
        self.inherit_pair(other, Extent::shortest, zipped)
    }

    /// Triples elements positionally, stopping at the shortest sequence.
    pub fn zip3<B: Element, C: Element>(&self, second: &Seq<B>, third: &Seq<C>) -> Seq<(A, B, C)> {
        self.zip(second)
            .zip(third)
            .map(|((first, second), third)| (first, second, third))
    }

    /// Pairs every element with its position.
    pub fn zip_with_index(&self) -> Seq<(A, usize)> {
        self.derive(identity, |elements| {
            Box::new(elements.enumerate().map(|(index, element)| (element, index)))
        })
    }

    /// Running accumulation from the left, starting with `seed` itself.
    pub fn scan_left<B, Function>(&self, seed: B, function: Function) -> Seq<B>
    where
        B: Element,
        Function: FnMut(B, &A) -> B + Send + 'static,
    {
        let function = shared(function);
        self.derive(identity, move |elements| {
            let function = Arc::clone(&function);
            let first = std::iter::once(seed.clone());
            Box::new(first.chain(elements.scan(seed.clone(), move |accumulated, element| {
                *accumulated = (&mut *function.lock())(accumulated.clone(), &element);
                Some(accumulated.clone())
            })))
        })
    }

    /// Running accumulation from the right, ending with `seed` itself.
    ///
    /// For `[1, 2, 3]`, `0` and `+` this is `[6, 5, 3, 0]`.
    pub fn scan_right<B, Function>(&self, seed: B, function: Function) -> Seq<B>
    where
        B: Element,
        Function: FnMut(&A, B) -> B + Send + 'static,
    {
        let function = shared(function);
        self.materialised(move |elements| {
            let mut function = function.lock();
            let mut accumulated = seed.clone();
            let mut scanned = VecDeque::with_capacity(elements.len() + 1);
            scanned.push_front(accumulated.clone());
            for element in elements.iter().rev() {
                accumulated = (&mut *function)(element, accumulated);
                scanned.push_front(accumulated.clone());
            }
            scanned.into()
        })
    }

    /// Drops repeated elements, keeping first occurrences.
    pub fn distinct(&self) -> Self
    where
        A: Hash + Eq,
    {
        self.derive(identity, |elements| {
            let mut seen = FxHashSet::default();
            Box::new(elements.filter(move |element| seen.insert(element.clone())))
        })
    }

    /// Sorts by the natural order, stably.
    pub fn sorted(&self) -> Self
    where
        A: Ord,
    {
        self.materialised(|mut elements| {
            elements.sort();
            elements
        })
    }

    /// Sorts by the key `key` extracts, stably.
    pub fn sorted_by_key<K, Key>(&self, key: Key) -> Self
    where
        K: Ord,
        Key: Fn(&A) -> K + Send + Sync + 'static,
    {
        self.materialised(move |mut elements| {
            elements.sort_by_key(&key);
            elements
        })
    }

    /// Sorts by `comparator`, stably.
    pub fn sorted_by<Comparator>(&self, comparator: Comparator) -> Self
    where
        Comparator: Fn(&A, &A) -> Ordering + Send + Sync + 'static,
    {
        self.materialised(move |mut elements| {
            elements.sort_by(&comparator);
            elements
        })
    }

    /// The elements in reverse order.
    pub fn reverse(&self) -> Self {
        self.materialised(|mut elements| {
            elements.reverse();
            elements
        })
    }

    /// A random permutation, fixed at the time of the call so that every
    /// traversal replays the same order.
    pub fn shuffle(&self) -> Self {
        self.shuffle_seeded(rand::random())
    }

    /// The permutation determined by `seed`.
    pub fn shuffle_seeded(&self, seed: u64) -> Self {
        self.materialised(move |mut elements| {
            elements.shuffle(&mut StdRng::seed_from_u64(seed));
            elements
        })
    }

    /// Elements up to, not including, the first that fails `predicate`.
    pub fn take_while<Predicate>(&self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.derive(Extent::bounded, move |elements| {
            let predicate = Arc::clone(&predicate);
            Box::new(elements.take_while(move |element| (&mut *predicate.lock())(element)))
        })
    }

    /// Elements up to, not including, the first that satisfies `predicate`.
    pub fn take_until<Predicate>(&self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.take_while(move |element| !predicate(element))
    }

    /// Elements from the first that fails `predicate` on.
    pub fn drop_while<Predicate>(&self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.derive(identity, move |elements| {
            let predicate = Arc::clone(&predicate);
            Box::new(elements.skip_while(move |element| (&mut *predicate.lock())(element)))
        })
    }

    /// Elements from the first that satisfies `predicate` on.
    pub fn drop_until<Predicate>(&self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.drop_while(move |element| !predicate(element))
    }

    /// All but the first `count` elements.
    pub fn skip(&self, count: usize) -> Self {
        self.derive(identity, move |elements| Box::new(elements.skip(count)))
    }

    /// At most the first `count` elements.
    pub fn limit(&self, count: usize) -> Self {
        self.derive(|_| Extent::Finite, move |elements| Box::new(elements.take(count)))
    }

    /// Elements at positions `from..until`.
    pub fn slice(&self, from: usize, until: usize) -> Self {
        self.skip(from).limit(until.saturating_sub(from))
    }

    /// All but the last `count` elements.
    pub fn skip_last(&self, count: usize) -> Self {
        self.materialised(move |mut elements| {
            elements.truncate(elements.len().saturating_sub(count));
            elements
        })
    }

    /// At most the last `count` elements.
    pub fn limit_last(&self, count: usize) -> Self {
        self.materialised(move |mut elements| {
            let start = elements.len().saturating_sub(count);
            elements.split_off(start)
        })
    }

    /// Places `separator` between consecutive elements.
    pub fn intersperse(&self, separator: A) -> Self {
        self.derive(identity, move |elements| {
            let separator = separator.clone();
            Box::new(elements.enumerate().flat_map(move |(index, element)| {
                let leading = (index > 0).then(|| separator.clone());
                leading.into_iter().chain(std::iter::once(element))
            }))
        })
    }

    /// This sequence, or `value` alone when it is empty.
    pub fn on_empty(&self, value: A) -> Self {
        self.on_empty_get(move || value.clone())
    }

    /// This sequence, or the value `supplier` produces when it is empty.
    pub fn on_empty_get<Supplier>(&self, supplier: Supplier) -> Self
    where
        Supplier: Fn() -> A + Send + Sync + 'static,
    {
        self.derive(identity, move |elements| {
            let mut elements = elements.peekable();
            if elements.peek().is_none() {
                Box::new(std::iter::once(supplier()))
            } else {
                Box::new(elements)
            }
        })
    }

    /// Elements as `Ok`, or a single `Err` from `supplier` when empty.
    pub fn on_empty_try<E, Supplier>(&self, supplier: Supplier) -> Seq<Result<A, E>>
    where
        E: Element,
        Supplier: Fn() -> E + Send + Sync + 'static,
    {
        self.derive(identity, move |elements| {
            let mut elements = elements.peekable();
            if elements.peek().is_none() {
                Box::new(std::iter::once(Err(supplier())))
            } else {
                Box::new(elements.map(Ok))
            }
        })
    }

    /// The sequence repeated `times` times.
    pub fn cycle(&self, times: usize) -> Self {
        let source = Arc::clone(&self.source);
        let cycled = Self::from_fn(self.extent, move || {
            let source = Arc::clone(&source);
            Box::new((0..times).flat_map(move |_| source()))
        });
        self.inherit(identity, cycled)
    }

    /// The sequence repeated forever, or empty if it is empty.
    pub fn cycle_forever(&self) -> Self {
        fn forever(extent: Extent) -> Extent {
            match extent {
                Extent::Finite | Extent::Infinite => Extent::Infinite,
                Extent::Unknown => Extent::Unknown,
            }
        }
        let source = Arc::clone(&self.source);
        let cycled = Self::from_fn(forever(self.extent), move || {
            if source().next().is_none() {
                return Box::new(std::iter::empty());
            }
            let source = Arc::clone(&source);
            Box::new(std::iter::repeat(()).flat_map(move |()| source()))
        });
        self.inherit(forever, cycled)
    }

    /// Repeats the sequence while `predicate` holds for each element.
    pub fn cycle_while<Predicate>(&self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.cycle_forever().take_while(predicate)
    }

    /// Repeats the sequence until `predicate` holds for an element.
    pub fn cycle_until<Predicate>(&self, predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.cycle_forever().take_until(predicate)
    }

    /// The monoidal sum of the sequence, repeated `times` times.
    pub fn cycle_combined(&self, times: usize) -> Self
    where
        A: Monoid,
    {
        self.materialised(move |elements| {
            let combined = A::combine_all(elements);
            vec![combined; times]
        })
    }

    /// Overlapping windows; see [`Seq::sliding_by`].
    pub fn sliding(&self, size: usize) -> Seq<Vec<A>> {
        self.sliding_by(size, 1)
    }

    /// Windows of `size` elements whose starts are `increment` apart.
    pub fn sliding_by(&self, size: usize, increment: usize) -> Seq<Vec<A>> {
        self.materialised(move |elements| window::sliding(&elements, size, increment))
    }

    /// Consecutive batches of `size` elements.
    pub fn grouped(&self, size: usize) -> Seq<Vec<A>> {
        self.materialised(move |elements| window::grouped(&elements, size))
    }

    /// Elements grouped by the key `classifier` assigns, groups ordered by
    /// the first appearance of their key.
    pub fn grouped_by<K, Classifier>(&self, classifier: Classifier) -> Seq<(K, Vec<A>)>
    where
        K: Element + Hash + Eq,
        Classifier: Fn(&A) -> K + Send + Sync + 'static,
    {
        self.materialised(move |elements| {
            let mut positions: FxHashMap<K, usize> = FxHashMap::default();
            let mut groups: Vec<(K, Vec<A>)> = Vec::new();
            for element in elements {
                let key = classifier(&element);
                if let Some(&position) = positions.get(&key) {
                    groups[position].1.push(element);
                } else {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, vec![element]));
                }
            }
            groups
        })
    }

    /// Batches each closed by an element satisfying `predicate`.
    pub fn grouped_until<Predicate>(&self, predicate: Predicate) -> Seq<Vec<A>>
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.materialised(move |elements| {
            let mut predicate = predicate.lock();
            window::grouped_until(elements, |element| (&mut *predicate)(element))
        })
    }

    /// Batches extended while `predicate` holds.
    pub fn grouped_while<Predicate>(&self, mut predicate: Predicate) -> Seq<Vec<A>>
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.grouped_until(move |element| !predicate(element))
    }

    /// Batches closed when `predicate` holds for the batch and its newest
    /// element.
    pub fn grouped_statefully_until<Predicate>(&self, predicate: Predicate) -> Seq<Vec<A>>
    where
        Predicate: FnMut(&[A], &A) -> bool + Send + 'static,
    {
        let predicate = shared(predicate);
        self.materialised(move |elements| {
            let mut predicate = predicate.lock();
            window::grouped_statefully_until(elements, |batch, element| {
                (&mut *predicate)(batch, element)
            })
        })
    }
}

/// Constructor marker for [`Seq<_>`], and its default type-class record.
///
/// `ap`, `map2` and `flat_map` are lazy; the folds traverse once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SeqKind;

impl Marker for SeqKind {
    type Carrier<A: Element> = Seq<A>;
    const NAME: &'static str = "Seq";
}

impl<A: Element> From<Seq<A>> for Kind<SeqKind, A> {
    fn from(carrier: Seq<A>) -> Self {
        Self::widen(carrier)
    }
}

impl Instance for SeqKind {
    type Marker = Self;
}

impl Functor for SeqKind {
    fn map<A, B, Function>(&self, function: Function, value: Kind<Self, A>) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        Kind::widen(value.narrow().map(function))
    }
}

impl Applicative for SeqKind {
    fn unit<A: Element>(&self, value: A) -> Kind<Self, A> {
        Kind::widen(Seq::of(value))
    }

    fn ap<A, B, Function>(
        &self,
        functions: Kind<Self, Function>,
        value: Kind<Self, A>,
    ) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Element,
    {
        let values = value.narrow();
        Kind::widen(functions.narrow().flat_map(move |function| values.map(function)))
    }

    fn map2<A, B, C, Function>(
        &self,
        first: Kind<Self, A>,
        second: Kind<Self, B>,
        function: Function,
    ) -> Kind<Self, C>
    where
        A: Element,
        B: Element,
        C: Element,
        Function: FnMut(A, B) -> C + Send + 'static,
    {
        let function = shared(function);
        let second = second.narrow();
        Kind::widen(first.narrow().flat_map(move |left| {
            let function = Arc::clone(&function);
            second.map(move |right| (&mut *function.lock())(left.clone(), right))
        }))
    }
}

impl Monad for SeqKind {
    fn flat_map<A, B, Function>(
        &self,
        mut function: Function,
        value: Kind<Self, A>,
    ) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<Self, B> + Send + 'static,
    {
        Kind::widen(value.narrow().flat_map(move |element| function(element).narrow()))
    }
}

impl MonadZero for SeqKind {
    fn empty<A: Element>(&self) -> Kind<Self, A> {
        Kind::widen(Seq::empty())
    }

    fn filter<A, Predicate>(&self, predicate: Predicate, value: Kind<Self, A>) -> Kind<Self, A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        Kind::widen(value.narrow().filter(predicate))
    }
}

impl MonadPlus for SeqKind {
    /// Concatenation.
    fn plus<A: Element>(&self, left: Kind<Self, A>, right: Kind<Self, A>) -> Kind<Self, A> {
        Kind::widen(left.narrow().concat(right.as_carrier()))
    }
}

impl Foldable for SeqKind {
    fn fold_left<A, B, Function>(&self, init: B, function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B,
    {
        value.narrow().iter().fold(init, function)
    }

    fn fold_right<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B,
    {
        value
            .narrow()
            .to_vec()
            .into_iter()
            .rev()
            .fold(init, |accumulated, element| function(element, accumulated))
    }
}

impl Unfoldable for SeqKind {
    /// Lazy: `function` runs as the result is traversed, once per element
    /// per traversal.
    fn unfold<S, A, Function>(&self, seed: S, function: Function) -> Kind<Self, A>
    where
        S: Element,
        A: Element,
        Function: FnMut(S) -> Option<(A, S)> + Send + 'static,
    {
        let function = shared(function);
        Kind::widen(Seq::from_fn(Extent::Unknown, move || {
            let function = Arc::clone(&function);
            let mut state = Some(seed.clone());
            Box::new(std::iter::from_fn(move || {
                let (element, next) = (&mut *function.lock())(state.take()?)?;
                state = Some(next);
                Some(element)
            }))
        }))
    }
}
