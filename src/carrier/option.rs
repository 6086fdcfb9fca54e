//! `Option<A>` as a carrier.

use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{
    Applicative, Foldable, Functor, Instance, Monad, MonadPlus, MonadZero, Traverse, Unfoldable,
};

/// Constructor marker for `Option<_>`, and its default type-class record.
///
/// `plus` keeps the first present value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OptionKind;

impl Marker for OptionKind {
    type Carrier<A: Element> = Option<A>;
    const NAME: &'static str = "Option";
}

impl<A: Element> From<Option<A>> for Kind<OptionKind, A> {
    fn from(carrier: Option<A>) -> Self {
        Self::widen(carrier)
    }
}

impl Instance for OptionKind {
    type Marker = Self;
}

impl Functor for OptionKind {
    #[inline]
    fn map<A, B, Function>(&self, function: Function, value: Kind<Self, A>) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        Kind::widen(value.narrow().map(function))
    }
}

impl Applicative for OptionKind {
    #[inline]
    fn unit<A: Element>(&self, value: A) -> Kind<Self, A> {
        Kind::widen(Some(value))
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
        Kind::widen(match (functions.narrow(), value.narrow()) {
            (Some(mut function), Some(element)) => Some(function(element)),
            _ => None,
        })
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
        let mut function = function;
        Kind::widen(
            first
                .narrow()
                .zip(second.narrow())
                .map(|(left, right)| function(left, right)),
        )
    }
}

impl Monad for OptionKind {
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
        Kind::widen(value.narrow().and_then(|element| function(element).narrow()))
    }
}

impl MonadZero for OptionKind {
    #[inline]
    fn empty<A: Element>(&self) -> Kind<Self, A> {
        Kind::widen(None)
    }

    #[inline]
    fn filter<A, Predicate>(&self, mut predicate: Predicate, value: Kind<Self, A>) -> Kind<Self, A>
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        Kind::widen(value.narrow().filter(|element| predicate(element)))
    }
}

impl MonadPlus for OptionKind {
    #[inline]
    fn plus<A: Element>(&self, left: Kind<Self, A>, right: Kind<Self, A>) -> Kind<Self, A> {
        Kind::widen(left.narrow().or_else(|| right.narrow()))
    }
}

impl Foldable for OptionKind {
    fn fold_left<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B,
    {
        match value.narrow() {
            Some(element) => function(init, element),
            None => init,
        }
    }

    fn fold_right<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B,
    {
        match value.narrow() {
            Some(element) => function(element, init),
            None => init,
        }
    }
}

impl Traverse for OptionKind {
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
        match value.narrow() {
            Some(element) => {
                applicative.map(|result| Kind::<Self, B>::widen(Some(result)), function(element))
            }
            None => applicative.unit(Kind::widen(None)),
        }
    }
}

impl Unfoldable for OptionKind {
    /// Keeps only the first step of the unfold.
    fn unfold<S, A, Function>(&self, seed: S, mut function: Function) -> Kind<Self, A>
    where
        S: Element,
        A: Element,
        Function: FnMut(S) -> Option<(A, S)> + Send + 'static,
    {
        Kind::widen(function(seed).map(|(element, _)| element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::VecKind;
    use rstest::rstest;

    fn kind(value: Option<i32>) -> Kind<OptionKind, i32> {
        Kind::from(value)
    }

    #[rstest]
    fn map_over_present_value() {
        let hello: Kind<OptionKind, &str> = Kind::from(Some("hello"));
        assert_eq!(OptionKind.map(str::len, hello).narrow(), Some(5));
    }

    #[rstest]
    fn map_over_absent_value() {
        let nothing: Kind<OptionKind, &str> = Kind::from(None);
        assert_eq!(OptionKind.map(str::len, nothing).narrow(), None);
    }

    #[rstest]
    #[case(Some(3), Some(4), Some(7))]
    #[case(None, Some(4), None)]
    #[case(Some(3), None, None)]
    fn map2_requires_both(
        #[case] first: Option<i32>,
        #[case] second: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(OptionKind.map2(kind(first), kind(second), |a, b| a + b).narrow(), expected);
    }

    #[rstest]
    fn ap_applies_present_function() {
        let function = OptionKind.unit(|n: i32| n * 2);
        assert_eq!(OptionKind.ap(function, kind(Some(4))).narrow(), Some(8));
    }

    #[rstest]
    fn flat_map_short_circuits_on_none() {
        let result = OptionKind.flat_map(|n: i32| kind(Some(n + 1)), kind(None));
        assert_eq!(result.narrow(), None);
    }

    #[rstest]
    #[case(Some(1), Some(2), Some(1))]
    #[case(None, Some(2), Some(2))]
    #[case(Some(1), None, Some(1))]
    #[case(None, None, None)]
    fn plus_keeps_first_present(
        #[case] left: Option<i32>,
        #[case] right: Option<i32>,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(OptionKind.plus(kind(left), kind(right)).narrow(), expected);
    }

    #[rstest]
    fn fold_left_of_present_applies_once() {
        assert_eq!(OptionKind.fold_left(10, |sum, n| sum + n, kind(Some(5))), 15);
        assert_eq!(OptionKind.fold_left(10, |sum, n| sum + n, kind(None)), 10);
    }

    #[rstest]
    fn traverse_into_vec() {
        let result = OptionKind.traverse_a(
            &VecKind,
            |n: i32| Kind::from(vec![n, n * 10]),
            kind(Some(2)),
        );
        let unwrapped: Vec<Option<i32>> = result.narrow().into_iter().map(Kind::narrow).collect();
        assert_eq!(unwrapped, vec![Some(2), Some(20)]);
    }

    #[rstest]
    fn traverse_of_none_is_unit_none() {
        let result = OptionKind.traverse_a(&VecKind, |n: i32| Kind::from(vec![n]), kind(None));
        let unwrapped: Vec<Option<i32>> = result.narrow().into_iter().map(Kind::narrow).collect();
        assert_eq!(unwrapped, vec![None]);
    }

    #[rstest]
    fn unfold_takes_first_step() {
        let result = OptionKind.unfold(1, |n: i32| (n < 5).then_some((n, n + 1)));
        assert_eq!(result.narrow(), Some(1));
    }
}
