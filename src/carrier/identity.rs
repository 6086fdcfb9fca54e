//! [`Identity<A>`] as a carrier.

use crate::kind::{Element, Kind, Marker};
use crate::typeclass::{Applicative, Foldable, Functor, Identity, Instance, Monad, Traverse};

/// Constructor marker for [`Identity<_>`], and its default type-class record.
///
/// Identity has exactly one element, so it has no `MonadZero`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdentityKind;

impl Marker for IdentityKind {
    type Carrier<A: Element> = Identity<A>;
    const NAME: &'static str = "Identity";
}

impl<A: Element> From<Identity<A>> for Kind<IdentityKind, A> {
    fn from(carrier: Identity<A>) -> Self {
        Self::widen(carrier)
    }
}

impl Instance for IdentityKind {
    type Marker = Self;
}

impl Functor for IdentityKind {
    #[inline]
    fn map<A, B, Function>(&self, mut function: Function, value: Kind<Self, A>) -> Kind<Self, B>
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        Kind::widen(Identity(function(value.narrow().into_inner())))
    }
}

impl Applicative for IdentityKind {
    #[inline]
    fn unit<A: Element>(&self, value: A) -> Kind<Self, A> {
        Kind::widen(Identity(value))
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
        let mut function = functions.narrow().into_inner();
        Kind::widen(Identity(function(value.narrow().into_inner())))
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
        Kind::widen(Identity(function(
            first.narrow().into_inner(),
            second.narrow().into_inner(),
        )))
    }
}

impl Monad for IdentityKind {
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
        function(value.narrow().into_inner())
    }
}

impl Foldable for IdentityKind {
    fn fold_left<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(B, A) -> B,
    {
        function(init, value.narrow().into_inner())
    }

    fn fold_right<A, B, Function>(&self, init: B, mut function: Function, value: Kind<Self, A>) -> B
    where
        A: Element,
        Function: FnMut(A, B) -> B,
    {
        function(value.narrow().into_inner(), init)
    }

    fn length<A: Element>(&self, _value: &Kind<Self, A>) -> usize {
        1
    }
}

impl Traverse for IdentityKind {
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
        applicative.map(
            |result| Kind::<Self, B>::widen(Identity(result)),
            function(value.narrow().into_inner()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carrier::VecKind;
    use rstest::rstest;

    #[rstest]
    fn flat_map_is_plain_application() {
        let result = IdentityKind.flat_map(|n: i32| IdentityKind.unit(n * 3), IdentityKind.unit(4));
        assert_eq!(result.narrow(), Identity(12));
    }

    #[rstest]
    fn map2_combines_both_values() {
        let result = IdentityKind.map2(
            IdentityKind.unit(2_usize),
            IdentityKind.unit("x"),
            |n, s: &str| s.repeat(n),
        );
        assert_eq!(result.narrow().into_inner(), "xx");
    }

    #[rstest]
    fn foldable_sees_one_element() {
        assert_eq!(IdentityKind.to_vec(IdentityKind.unit('a')), vec!['a']);
        assert_eq!(IdentityKind.length(&IdentityKind.unit('a')), 1);
    }

    #[rstest]
    fn traverse_distributes_over_vec() {
        let result = IdentityKind.traverse_a(
            &VecKind,
            |n: i32| Kind::from(vec![n, -n]),
            IdentityKind.unit(5),
        );
        let unwrapped: Vec<i32> =
            result.narrow().into_iter().map(|kind| kind.narrow().into_inner()).collect();
        assert_eq!(unwrapped, vec![5, -5]);
    }
}
