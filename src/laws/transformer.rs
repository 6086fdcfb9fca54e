//! Laws a transformer keeps over any outer monad.

use super::{Comparable, Observe, verify};
use crate::carrier::Seq;
use crate::error::EngineError;
use crate::kind::{Element, Kind};
use crate::transformer::{OptionT, Outer, SeqT};
use crate::typeclass::Foldable;

fn same<M: Outer, A: Comparable>(left: &Kind<M::Marker, A>, right: &Kind<M::Marker, A>) -> bool
where
    M::Marker: Observe,
{
    <M::Marker as Observe>::observe(left) == <M::Marker as Observe>::observe(right)
}

fn pure<M: Outer, A: Element>(monad: &M, elements: Vec<A>) -> SeqT<M, A> {
    SeqT::new(monad.clone(), monad.unit(Seq::from_vec(elements)))
}

/// `SeqT::unit(a).map(f) == SeqT::unit(f(a))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when mapping through the outer layer
/// changes anything but the element.
pub fn seq_t_unit_map<M, A, B, F>(monad: &M, value: A, function: F) -> Result<(), EngineError>
where
    M: Outer,
    M::Marker: Observe,
    A: Element,
    B: Comparable,
    F: Fn(A) -> B + Clone + Send + 'static,
{
    let mapped = SeqT::unit(monad.clone(), value.clone()).map(function.clone()).to_vecs();
    let expected = SeqT::unit(monad.clone(), function(value)).to_vecs();
    verify::<M::Marker>(
        same::<M, _>(&mapped, &expected),
        "transformer unit preservation",
        "laws::seq_t_unit_map",
    )
}

/// `m.flat_map(f).flat_map(g) == m.flat_map(|a| f(a).flat_map(g))` for
/// transformers whose outer and inner layers are both built with `unit`.
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the two groupings disagree.
pub fn seq_t_flat_map_associativity<M, A, B, C, F, G>(
    monad: &M,
    elements: Vec<A>,
    first: F,
    second: G,
) -> Result<(), EngineError>
where
    M: Outer + Foldable,
    M::Marker: Observe,
    A: Element,
    B: Element,
    C: Comparable,
    F: Fn(A) -> Vec<B> + Clone + Send + Sync + 'static,
    G: Fn(B) -> Vec<C> + Clone + Send + Sync + 'static,
{
    let lift_first = {
        let monad = monad.clone();
        move |element: A| pure(&monad, first(element))
    };
    let lift_second = {
        let monad = monad.clone();
        move |element: B| pure(&monad, second(element))
    };

    let chained = pure(monad, elements.clone())
        .flat_map(lift_first.clone())
        .flat_map(lift_second.clone())
        .to_vecs();
    let nested = pure(monad, elements)
        .flat_map(move |element| lift_first(element).flat_map(lift_second.clone()))
        .to_vecs();
    verify::<M::Marker>(
        same::<M, _>(&chained, &nested),
        "transformer associativity",
        "laws::seq_t_flat_map_associativity",
    )
}

/// `OptionT::unit(a).map(f) == OptionT::unit(f(a))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when mapping through the outer layer
/// changes anything but the element.
pub fn option_t_unit_map<M, A, B, F>(monad: &M, value: A, function: F) -> Result<(), EngineError>
where
    M: Outer,
    M::Marker: Observe,
    A: Element,
    B: Comparable,
    F: Fn(A) -> B + Clone + Send + 'static,
{
    let mapped = OptionT::unit(monad.clone(), value.clone()).map(function.clone()).run();
    let expected = OptionT::unit(monad.clone(), function(value)).run();
    verify::<M::Marker>(
        same::<M, _>(&mapped, &expected),
        "transformer unit preservation",
        "laws::option_t_unit_map",
    )
}

/// `m.flat_map(f).flat_map(g) == m.flat_map(|a| f(a).flat_map(g))` for an
/// `OptionT` built with `unit` on both layers.
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the two groupings disagree.
pub fn option_t_flat_map_associativity<M, A, B, C, F, G>(
    monad: &M,
    value: Option<A>,
    first: F,
    second: G,
) -> Result<(), EngineError>
where
    M: Outer,
    M::Marker: Observe,
    A: Element,
    B: Element,
    C: Comparable,
    F: Fn(A) -> Option<B> + Clone + Send + Sync + 'static,
    G: Fn(B) -> Option<C> + Clone + Send + Sync + 'static,
{
    let lift_first = {
        let monad = monad.clone();
        move |element: A| OptionT::from_option(monad.clone(), first(element))
    };
    let lift_second = {
        let monad = monad.clone();
        move |element: B| OptionT::from_option(monad.clone(), second(element))
    };

    let chained = OptionT::from_option(monad.clone(), value.clone())
        .flat_map(lift_first.clone())
        .flat_map(lift_second.clone())
        .run();
    let nested = OptionT::from_option(monad.clone(), value)
        .flat_map(move |element| lift_first(element).flat_map(lift_second.clone()))
        .run();
    verify::<M::Marker>(
        same::<M, _>(&chained, &nested),
        "transformer associativity",
        "laws::option_t_flat_map_associativity",
    )
}
