//! `OptionT` - an optional value inside any outer monad.

use std::fmt;
use std::sync::Arc;

use super::Outer;
use crate::kind::{Element, Kind, Marker};

/// An outer carrier of optional values, operated on as a carrier of `A`.
///
/// `OptionT<M, A>` wraps `Kind<M::Marker, Option<A>>`. An absent inner value
/// short-circuits the rest of a chain for its outer element only.
///
/// # Examples
///
/// ```rust
/// use kindred::carrier::OptionKind;
/// use kindred::kind::Kind;
/// use kindred::transformer::OptionT;
///
/// let parsed = OptionT::new(OptionKind, Kind::from(Some(Some("42"))))
///     .flat_map_inner(|text: &str| text.parse::<i32>().ok())
///     .map(|n| n + 1);
/// assert_eq!(parsed.run().narrow(), Some(Some(43)));
/// ```
pub struct OptionT<M: Outer, A: Element> {
    run: Kind<M::Marker, Option<A>>,
    monad: M,
}

impl<M: Outer, A: Element> OptionT<M, A> {
    /// Wraps an outer carrier of options.
    pub const fn new(monad: M, run: Kind<M::Marker, Option<A>>) -> Self {
        Self { run, monad }
    }

    /// The outer unit of a present `value`.
    pub fn unit(monad: M, value: A) -> Self {
        let run = monad.unit(Some(value));
        Self::new(monad, run)
    }

    /// The outer unit of an absent value.
    pub fn empty(monad: M) -> Self {
        let run = monad.unit(None);
        Self::new(monad, run)
    }

    /// Makes every outer element present.
    pub fn lift(monad: M, outer: Kind<M::Marker, A>) -> Self {
        let run = monad.map(Some, outer);
        Self::new(monad, run)
    }

    /// The outer unit of `value`.
    pub fn from_option(monad: M, value: Option<A>) -> Self {
        let run = monad.unit(value);
        Self::new(monad, run)
    }

    /// The wrapped outer carrier.
    pub fn run(self) -> Kind<M::Marker, Option<A>> {
        self.run
    }

    /// The outer monad record.
    pub const fn monad(&self) -> &M {
        &self.monad
    }

    fn map_inner<B, Function>(self, function: Function) -> OptionT<M, B>
    where
        B: Element,
        Function: FnMut(Option<A>) -> Option<B> + Send + 'static,
    {
        let run = self.monad.map(function, self.run);
        OptionT::new(self.monad, run)
    }

    /// Transforms every present value.
    #[must_use]
    pub fn map<B, Function>(self, mut function: Function) -> OptionT<M, B>
    where
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        self.map_inner(move |value| value.map(&mut function))
    }

    /// Runs `consumer` on every present value.
    #[must_use]
    pub fn peek<Consumer>(self, mut consumer: Consumer) -> Self
    where
        Consumer: FnMut(&A) + Send + 'static,
    {
        self.map_inner(move |value| value.inspect(&mut consumer))
    }

    /// Empties every value `predicate` rejects.
    #[must_use]
    pub fn filter<Predicate>(self, mut predicate: Predicate) -> Self
    where
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        self.map_inner(move |value| value.filter(&mut predicate))
    }

    /// Binds every present value to another transformer over the same outer
    /// monad; absent values stay absent without calling `function`.
    #[must_use]
    pub fn flat_map<B, Function>(self, mut function: Function) -> OptionT<M, B>
    where
        B: Element,
        Function: FnMut(A) -> OptionT<M, B> + Send + 'static,
    {
        let monad = self.monad.clone();
        let run = self.monad.flat_map(
            move |value: Option<A>| match value {
                Some(present) => function(present).run,
                None => monad.unit(None),
            },
            self.run,
        );
        OptionT::new(self.monad, run)
    }

    /// Binds every present value to a plain option.
    #[must_use]
    pub fn flat_map_inner<B, Function>(self, mut function: Function) -> OptionT<M, B>
    where
        B: Element,
        Function: FnMut(A) -> Option<B> + Send + 'static,
    {
        self.map_inner(move |value| value.and_then(&mut function))
    }

    /// Fills every absent value with `value`.
    #[must_use]
    pub fn on_empty(self, value: A) -> Self {
        self.map_inner(move |current| current.or_else(|| Some(value.clone())))
    }

    /// Fills every absent value with what `supplier` produces.
    #[must_use]
    pub fn on_empty_get<Supplier>(self, mut supplier: Supplier) -> Self
    where
        Supplier: FnMut() -> A + Send + 'static,
    {
        self.map_inner(move |current| current.or_else(|| Some(supplier())))
    }

    /// Replaces every absent value with the outer carrier `alternative`
    /// produces.
    #[must_use]
    pub fn or_else<Alternative>(self, mut alternative: Alternative) -> Self
    where
        Alternative: FnMut() -> Self + Send + 'static,
    {
        let monad = self.monad.clone();
        let run = self.monad.flat_map(
            move |value: Option<A>| match value {
                Some(present) => monad.unit(Some(present)),
                None => alternative().run,
            },
            self.run,
        );
        Self::new(self.monad, run)
    }

    /// Pairs every present value with every present value of `other`, in
    /// the outer monad's binding order.
    #[must_use]
    pub fn zip<B: Element>(self, other: OptionT<M, B>) -> OptionT<M, (A, B)> {
        let monad = self.monad.clone();
        let right = other.run;
        let run = self.monad.flat_map(
            move |left: Option<A>| monad.map(
                move |value: Option<B>| left.clone().zip(value),
                right.clone(),
            ),
            self.run,
        );
        OptionT::new(self.monad, run)
    }

    /// Collapses every inner option into a plain outer value.
    pub fn fold<B, Present, Absent>(
        self,
        mut present: Present,
        mut absent: Absent,
    ) -> Kind<M::Marker, B>
    where
        B: Element,
        Present: FnMut(A) -> B + Send + 'static,
        Absent: FnMut() -> B + Send + 'static,
    {
        self.monad.map(
            move |value: Option<A>| match value {
                Some(element) => present(element),
                None => absent(),
            },
            self.run,
        )
    }

    /// Lifts a plain function into one over transformers.
    pub fn lift_fn<B, Function>(function: Function) -> impl Fn(Self) -> OptionT<M, B>
    where
        B: Element,
        Function: Fn(A) -> B + Send + Sync + 'static,
    {
        let function = Arc::new(function);
        move |transformer: Self| {
            let function = Arc::clone(&function);
            transformer.map(move |value| function(value))
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<M: Outer, A: Element> Clone for OptionT<M, A> {
    fn clone(&self) -> Self {
        Self {
            run: self.run.clone(),
            monad: self.monad.clone(),
        }
    }
}

impl<M, A> PartialEq for OptionT<M, A>
where
    M: Outer,
    A: Element,
    Kind<M::Marker, Option<A>>: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.run == other.run
    }
}

impl<M, A> fmt::Debug for OptionT<M, A>
where
    M: Outer,
    A: Element,
    Kind<M::Marker, Option<A>>: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("OptionT")
            .field("outer", &<M::Marker as Marker>::NAME)
            .field("run", &self.run)
            .finish()
    }
}
