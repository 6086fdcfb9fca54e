//! `Vec<A>` as a carrier.
//!
//! `ap` and `map2` take the cartesian product in row-major order (every
//! function or left element against every right element, left outermost).

use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{
    Applicative, Foldable, Functor, Instance, Monad, MonadPlus, MonadZero, Traverse, Unfoldable,
};

/// Constructor marker for `Vec<_>`, and its default type-class record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VecKind;

impl Marker for VecKind {
    type Carrier<A: Element> = Vec<A>;
    const NAME: &'static str = "Vec";
}

impl<A: Element> From<Vec<A>> for Kind<VecKind, A> {
    fn from(carrier: Vec<A>) -> Self {
        Self::widen(carrier)
    }
}

impl Instance for VecKind {
    type Marker = Self;
}

impl Functor for VecKind {
    #[inline]
    fn map<A, B, Function>(&self, function: Function, value: Kind<Self, A>) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        Kind::widen(value.narrow().into_iter().map(function).collect())
    }
}

impl Applicative for VecKind {
    #[inline]
    fn unit<A: Element>(&self, value: A) -> Kind<Self, A> {
        Kind::widen(vec![value])
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
        let mut result = Vec::with_capacity(functions.as_carrier().len() * values.len());
        for mut function in functions.narrow() {
            result.extend(values.iter().cloned().map(&mut function));
        }
        Kind::widen(result)
    }

    fn map2<A, B, C, Function>(
        &self,
        first: Kind<Self, A>,
        second: Kind<Self, B>,
        mut function: Function,
    ) -> Kind<Self, C>
    where
        A: Element,
        B: Element,
        C: Element,
        Function: FnMut(A, B) -> C + Send + 'static,
    {
        let second = second.narrow();
        let mut result = Vec::with_capacity(first.as_carrier().len() * second.len());
        for left in first.narrow() {
            for right in &second {
                result.push(function(left.clone(), right.clone()));
            }
        }
        Kind::widen(result)
    }
}

impl Monad for VecKind {
    #[inline]
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
        Kind::widen(
            value
                .narrow()
                .into_iter()
                .flat_map(|element| function(element).narrow())
                .collect(),
        )
    }
}

impl MonadZero for VecKind {
    #[inline]
    fn empty<A: Element>(&self) -> Kind<Self, A> {
        Kind::widen(Vec::new())
    }

    fn filter<A, Predicate>(&self, mut predicate: Predicate, value: Kind<Self, A>) -> Kind<Self, A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let mut elements = value.narrow();
        elements.retain(|element| predicate(element));
        Kind::widen(elements)
    }
}

impl MonadPlus for VecKind {
    /// Concatenation.
    fn plus<A: Element>(&self, left: Kind<Self, A>, right: Kind<Self, A>) -> Kind<Self, A> {
        let mut elements = left.narrow();
        elements.extend(right.narrow());
        Kind::widen(elements)
    }
}

impl Foldable for VecKind {
    fn fold_left<A, B, Function>(&self, init: B, function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B,
    {
        value.narrow().into_iter().fold(init, function)
    }

    fn fold_right<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B,
    {
        value
            .narrow()
            .into_iter()
            .rev()
            .fold(init, |accumulated, element| function(element, accumulated))
    }

    fn length<A: Element>(&self, value: &Kind<Self, A>) -> usize {
        value.as_carrier().len()
    }
}

impl Traverse for VecKind {
    fn traverse_a<G, A, B, Function>(
        &self,
        applicative: &G,
        mut function: Function,
        value: Kind<Self, A>,
    ) -> Kind<G::Marker, Kind<Self, B>>
    where
        G: Applicative,
        A: Element,
        B: Element,
        Function: FnMut(A) -> Kind<G::Marker, B> + Send + 'static,
    {
        let start = applicative.unit(Vec::with_capacity(value.as_carrier().len()));
        let collected = value.narrow().into_iter().fold(start, |accumulated, element| {
            applicative.map2(accumulated, function(element), |mut elements: Vec<B>, next| {
                elements.push(next);
                elements
            })
        });
        applicative.map(Kind::<Self, B>::widen, collected)
    }
}

impl Unfoldable for VecKind {
    fn unfold<S, A, Function>(&self, seed: S, mut function: Function) -> Kind<Self, A>
    where
        S: Element,
        A: Element,
        Function: FnMut(S) -> Option<(A, S)> + Send + 'static,
    {
        let mut elements = Vec::new();
        let mut state = seed;
        while let Some((element, next)) = function(state) {
            elements.push(element);
            state = next;
        }
        Kind::widen(elements)
    }
}
