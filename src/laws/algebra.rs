//! Laws of the type-class hierarchy, one check per law.

use super::{Comparable, Observe, verify};
use crate::carrier::{IdentityKind, OptionKind, VecKind};
use crate::error::EngineError;
use crate::kind::{Element, Kind, Marker};
use crate::transformer::Outer;
use crate::typeclass::{Applicative, Foldable, Functor, Monad, MonadPlus, MonadZero, Traverse};

fn same<F: Observe, A: Comparable>(left: &Kind<F, A>, right: &Kind<F, A>) -> bool {
    F::observe(left) == F::observe(right)
}

// =============================================================================
// Functor
// =============================================================================

/// `map(id, x) == x`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn functor_identity<R, A>(record: &R, value: Kind<R::Marker, A>) -> Result<(), EngineError>
where
    R: Functor,
    R::Marker: Observe,
    A: Comparable,
{
    let mapped = record.map(|element: A| element, value.clone());
    verify::<R::Marker>(same(&mapped, &value), "functor identity", "laws::functor_identity")
}

/// `map(g . f, x) == map(g, map(f, x))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn functor_composition<R, A, B, C, F, G>(
    record: &R,
    value: Kind<R::Marker, A>,
    first: F,
    second: G,
) -> Result<(), EngineError>
where
    R: Functor,
    R::Marker: Observe,
    A: Element,
    B: Element,
    C: Comparable,
    F: Fn(A) -> B + Clone + Send + 'static,
    G: Fn(B) -> C + Clone + Send + 'static,
{
    let composed = {
        let (first, second) = (first.clone(), second.clone());
        record.map(move |element| second(first(element)), value.clone())
    };
    let chained = record.map(second, record.map(first, value));
    verify::<R::Marker>(
        same(&composed, &chained),
        "functor composition",
        "laws::functor_composition",
    )
}

// =============================================================================
// Applicative
// =============================================================================

/// `ap(unit(id), x) == x`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn applicative_identity<R, A>(record: &R, value: Kind<R::Marker, A>) -> Result<(), EngineError>
where
    R: Applicative,
    R::Marker: Observe,
    A: Comparable,
{
    let applied = record.ap(record.unit(|element: A| element), value.clone());
    verify::<R::Marker>(
        same(&applied, &value),
        "applicative identity",
        "laws::applicative_identity",
    )
}

/// `ap(unit(f), unit(a)) == unit(f(a))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn applicative_homomorphism<R, A, B, F>(
    record: &R,
    value: A,
    function: F,
) -> Result<(), EngineError>
where
    R: Applicative,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    F: FnMut(A) -> B + Element,
{
    let applied = record.ap(record.unit(function.clone()), record.unit(value.clone()));
    let mut direct = function;
    let expected = record.unit(direct(value));
    verify::<R::Marker>(
        same(&applied, &expected),
        "applicative homomorphism",
        "laws::applicative_homomorphism",
    )
}

/// `ap(u, unit(y)) == ap(unit(|f| f(y)), u)`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `functions`.
pub fn applicative_interchange<R, A, B, F>(
    record: &R,
    functions: Kind<R::Marker, F>,
    value: A,
) -> Result<(), EngineError>
where
    R: Applicative,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    F: FnMut(A) -> B + Element,
{
    let left = record.ap(functions.clone(), record.unit(value.clone()));
    let right = record.ap(record.unit(move |mut function: F| function(value.clone())), functions);
    verify::<R::Marker>(
        same(&left, &right),
        "applicative interchange",
        "laws::applicative_interchange",
    )
}

/// `ap(ap(map(compose, u), v), w) == ap(u, ap(v, w))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for the inputs.
pub fn applicative_composition<R, A, B, C, F, G>(
    record: &R,
    outer: Kind<R::Marker, G>,
    inner: Kind<R::Marker, F>,
    value: Kind<R::Marker, A>,
) -> Result<(), EngineError>
where
    R: Applicative,
    R::Marker: Observe,
    A: Element,
    B: Element,
    C: Comparable,
    F: FnMut(A) -> B + Element,
    G: FnMut(B) -> C + Element,
{
    let compose = |second: G| {
        move |first: F| {
            let mut second = second.clone();
            let mut first = first;
            move |element: A| second(first(element))
        }
    };
    let composed = record.ap(
        record.ap(record.map(compose, outer.clone()), inner.clone()),
        value.clone(),
    );
    let nested = record.ap(outer, record.ap(inner, value));
    verify::<R::Marker>(
        same(&composed, &nested),
        "applicative composition",
        "laws::applicative_composition",
    )
}

// =============================================================================
// Monad
// =============================================================================

/// `flat_map(f, unit(a)) == f(a)`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn monad_left_identity<R, A, B, F>(record: &R, value: A, function: F) -> Result<(), EngineError>
where
    R: Monad,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    F: FnMut(A) -> Kind<R::Marker, B> + Clone + Send + 'static,
{
    let bound = record.flat_map(function.clone(), record.unit(value.clone()));
    let mut direct = function;
    let expected = direct(value);
    verify::<R::Marker>(same(&bound, &expected), "monad left identity", "laws::monad_left_identity")
}

/// `flat_map(unit, m) == m`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn monad_right_identity<R, A>(record: &R, value: Kind<R::Marker, A>) -> Result<(), EngineError>
where
    R: Outer,
    R::Marker: Observe,
    A: Comparable,
{
    let outer = record.clone();
    let bound = record.flat_map(move |element: A| outer.unit(element), value.clone());
    verify::<R::Marker>(same(&bound, &value), "monad right identity", "laws::monad_right_identity")
}

/// `flat_map(g, flat_map(f, m)) == flat_map(|a| flat_map(g, f(a)), m)`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn monad_associativity<R, A, B, C, F, G>(
    record: &R,
    value: Kind<R::Marker, A>,
    first: F,
    second: G,
) -> Result<(), EngineError>
where
    R: Outer,
    R::Marker: Observe,
    A: Element,
    B: Element,
    C: Comparable,
    F: FnMut(A) -> Kind<R::Marker, B> + Clone + Send + 'static,
    G: FnMut(B) -> Kind<R::Marker, C> + Clone + Send + 'static,
{
    let chained = record.flat_map(second.clone(), record.flat_map(first.clone(), value.clone()));
    let nested = {
        let inner = record.clone();
        let mut first = first;
        record.flat_map(move |element| inner.flat_map(second.clone(), first(element)), value)
    };
    verify::<R::Marker>(same(&chained, &nested), "monad associativity", "laws::monad_associativity")
}

// =============================================================================
// MonadZero and MonadPlus
// =============================================================================

/// `flat_map(f, empty) == empty`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when binding `empty` produces anything.
pub fn monad_zero_left_zero<R, A, B, F>(record: &R, function: F) -> Result<(), EngineError>
where
    R: MonadZero,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    F: FnMut(A) -> Kind<R::Marker, B> + Send + 'static,
{
    let bound = record.flat_map(function, record.empty::<A>());
    verify::<R::Marker>(
        same(&bound, &record.empty()),
        "monad zero absorption",
        "laws::monad_zero_left_zero",
    )
}

/// `filter(|_| true, m) == m` and `filter(|_| false, m) == empty`
///
/// # Errors
///
/// [`EngineError::LawViolation`] naming whichever identity failed.
pub fn monad_zero_filter<R, A>(record: &R, value: Kind<R::Marker, A>) -> Result<(), EngineError>
where
    R: MonadZero,
    R::Marker: Observe,
    A: Comparable,
{
    let kept = record.filter(|_: &A| true, value.clone());
    verify::<R::Marker>(
        same(&kept, &value),
        "monad zero filter identity",
        "laws::monad_zero_filter",
    )?;
    let dropped = record.filter(|_: &A| false, value);
    verify::<R::Marker>(
        same(&dropped, &record.empty()),
        "monad zero filter absorption",
        "laws::monad_zero_filter",
    )
}

/// `plus(empty, x) == x` and `plus(x, empty) == x`
///
/// # Errors
///
/// [`EngineError::LawViolation`] naming whichever side failed.
pub fn monad_plus_identity<R, A>(record: &R, value: Kind<R::Marker, A>) -> Result<(), EngineError>
where
    R: MonadPlus,
    R::Marker: Observe,
    A: Comparable,
{
    let left = record.plus(record.empty(), value.clone());
    verify::<R::Marker>(
        same(&left, &value),
        "monad plus left identity",
        "laws::monad_plus_identity",
    )?;
    let right = record.plus(value.clone(), record.empty());
    verify::<R::Marker>(
        same(&right, &value),
        "monad plus right identity",
        "laws::monad_plus_identity",
    )
}

/// `plus(plus(a, b), c) == plus(a, plus(b, c))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for the inputs.
pub fn monad_plus_associativity<R, A>(
    record: &R,
    first: Kind<R::Marker, A>,
    second: Kind<R::Marker, A>,
    third: Kind<R::Marker, A>,
) -> Result<(), EngineError>
where
    R: MonadPlus,
    R::Marker: Observe,
    A: Comparable,
{
    let left = record.plus(record.plus(first.clone(), second.clone()), third.clone());
    let right = record.plus(first, record.plus(second, third));
    verify::<R::Marker>(
        same(&left, &right),
        "monad plus associativity",
        "laws::monad_plus_associativity",
    )
}

// =============================================================================
// Foldable and Traverse
// =============================================================================

/// `fold_left(init, f, unit(a)) == f(init, a)`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the fold disagrees with one step of
/// `function`.
pub fn foldable_unit<R, A, B, F>(
    record: &R,
    value: A,
    init: B,
    function: F,
) -> Result<(), EngineError>
where
    R: Applicative + Foldable,
    A: Element,
    B: Clone + PartialEq,
    F: FnMut(B, A) -> B + Clone,
{
    let folded = record.fold_left(init.clone(), function.clone(), record.unit(value.clone()));
    let mut direct = function;
    verify::<R::Marker>(folded == direct(init, value), "foldable unit", "laws::foldable_unit")
}

/// `fold_left(init, f, empty) == init`
///
/// Never returns for carriers whose `empty` never completes.
///
/// # Errors
///
/// [`EngineError::LawViolation`] when folding nothing changes `init`.
pub fn foldable_empty<R, A, B, F>(record: &R, init: B, function: F) -> Result<(), EngineError>
where
    R: MonadZero + Foldable,
    A: Element,
    B: Clone + PartialEq,
    F: FnMut(B, A) -> B,
{
    let folded = record.fold_left(init.clone(), function, record.empty::<A>());
    verify::<R::Marker>(folded == init, "foldable empty", "laws::foldable_empty")
}

/// `fold_left` agrees with folding `to_vec`, and `length` with its length.
///
/// # Errors
///
/// [`EngineError::LawViolation`] naming whichever agreement failed.
pub fn foldable_consistency<R, A, B, F>(
    record: &R,
    value: Kind<R::Marker, A>,
    init: B,
    function: F,
) -> Result<(), EngineError>
where
    R: Foldable,
    A: Element,
    B: Clone + PartialEq,
    F: FnMut(B, A) -> B + Clone,
{
    let elements = record.to_vec(value.clone());
    verify::<R::Marker>(
        record.length(&value) == elements.len(),
        "foldable length",
        "laws::foldable_consistency",
    )?;
    let folded = record.fold_left(init.clone(), function.clone(), value);
    let expected = elements.into_iter().fold(init, function);
    verify::<R::Marker>(folded == expected, "foldable order", "laws::foldable_consistency")
}

/// `traverse_a(Identity, |a| unit(f(a)), x) == unit(map(f, x))`
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn traverse_identity<R, A, B, F>(
    record: &R,
    value: Kind<R::Marker, A>,
    function: F,
) -> Result<(), EngineError>
where
    R: Traverse,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    F: Fn(A) -> B + Clone + Send + 'static,
{
    let lifted = function.clone();
    let traversed = record
        .traverse_a(&IdentityKind, move |element| IdentityKind.unit(lifted(element)), value.clone())
        .narrow()
        .into_inner();
    let mapped = record.map(function, value);
    verify::<R::Marker>(same(&traversed, &mapped), "traverse identity", "laws::traverse_identity")
}

/// `t(traverse_a(Option, k, x)) == traverse_a(Vec, t . k, x)` for the
/// applicative transformation `t` taking an option to a vector of at most
/// one element.
///
/// # Errors
///
/// [`EngineError::LawViolation`] when the law does not hold for `value`.
pub fn traverse_naturality<R, A, B, K>(
    record: &R,
    value: Kind<R::Marker, A>,
    effect: K,
) -> Result<(), EngineError>
where
    R: Traverse,
    R::Marker: Observe,
    A: Element,
    B: Comparable,
    K: FnMut(A) -> Option<B> + Clone + Send + 'static,
{
    let observe_all = |kinds: Vec<Kind<R::Marker, B>>| {
        kinds.iter().map(<R::Marker as Observe>::observe).collect::<Vec<_>>()
    };

    let mut through_option = effect.clone();
    let transformed: Vec<_> = record
        .traverse_a(&OptionKind, move |element| Kind::from(through_option(element)), value.clone())
        .narrow()
        .into_iter()
        .collect();

    let mut through_vec = effect;
    let direct = record
        .traverse_a(
            &VecKind,
            move |element| Kind::from(through_vec(element).into_iter().collect::<Vec<_>>()),
            value,
        )
        .narrow();

    verify::<R::Marker>(
        observe_all(transformed) == observe_all(direct),
        "traverse naturality",
        "laws::traverse_naturality",
    )
}

// =============================================================================
// Kind encoding
// =============================================================================

/// `narrow(widen(c)) == c`, and the same through a runtime-tagged
/// [`DynKind`](crate::kind::DynKind).
///
/// # Errors
///
/// [`EngineError::LawViolation`] when a round trip changes the carrier, or
/// the `KindMismatch` the runtime narrowing raised.
pub fn kind_round_trip<F, A>(carrier: F::Carrier<A>) -> Result<(), EngineError>
where
    F: Marker,
    A: Element,
    F::Carrier<A>: PartialEq,
{
    let widened: Kind<F, A> = Kind::widen(carrier.clone());
    verify::<F>(widened.clone().narrow() == carrier, "kind round trip", "laws::kind_round_trip")?;
    let restored = widened.erase().narrow::<F, A>()?;
    verify::<F>(restored.narrow() == carrier, "erased kind round trip", "laws::kind_round_trip")
}
