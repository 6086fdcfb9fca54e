//! Runtime dispatch of monadic operations over type-erased carriers.
//!
//! A [`Comprehender`] knows how to `map`, `flat_map` and `filter` one
//! concrete carrier whose elements have been erased to [`Dynamic`]. A
//! [`Dispatch`] table picks the comprehender for a carrier by its runtime
//! type, falling back to declared ancestors, and resolves cross-type
//! `flat_map`s where the function returns a different carrier than the one
//! being bound.
//!
//! This is the machinery behind [`AnyM`](crate::anym::AnyM); most code
//! should use that façade rather than comprehenders directly.
//!
//! # Erased representation
//!
//! | Carrier            | Erased form                        | Lineage  |
//! |--------------------|------------------------------------|----------|
//! | `Option<A>`        | `Option<Dynamic>`                  | value    |
//! | `Identity<A>`      | `Identity<Dynamic>`                | value    |
//! | `Task<A>`          | `Task<Dynamic>`                    | value    |
//! | `Vec<A>`           | `Vec<Dynamic>`                     | sequence |
//! | `BoxStream<'_, A>` | `BoxStream<'static, Dynamic>`      | sequence |
//!
//! Engine errors raised inside an asynchronous carrier, where they cannot be
//! returned, travel as erased [`EngineError`] elements and surface when the
//! carrier is turned back into a typed one with [`Reify`].

mod builtin;
mod dispatch;
mod reify;

use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use builtin::{IdentityComprehender, OptionComprehender, VecComprehender};
#[cfg(feature = "async")]
pub use builtin::{StreamComprehender, TaskComprehender};
pub use dispatch::{Dispatch, DispatchBuilder, Resolution, Upcast};
pub use reify::Reify;

use crate::error::EngineError;
use crate::kind::Element;

/// An element with its type erased.
pub type Dynamic = Arc<dyn Any + Send + Sync>;

/// A carrier with its type erased.
pub type Opaque = Box<dyn Any + Send>;

/// A function over erased elements.
pub type DynFunction = Box<dyn FnMut(Dynamic) -> Dynamic + Send>;

/// A binding function from an erased element to an erased carrier.
pub type DynBind = Box<dyn FnMut(Dynamic) -> Opaque + Send>;

/// A predicate over erased elements.
pub type DynPredicate = Box<dyn FnMut(&Dynamic) -> bool + Send>;

/// Erases an element.
pub fn erase<A: Element>(value: A) -> Dynamic {
    Arc::new(value)
}

/// Whether an erased element is an engine error travelling in-band.
pub fn is_error(value: &Dynamic) -> bool {
    value.is::<EngineError>()
}

/// Recovers a typed element.
///
/// # Errors
///
/// The in-band [`EngineError`] when `value` is one, or
/// [`EngineError::KindMismatch`] when it holds another type.
pub fn recover<A: Element>(value: Dynamic, operation: &'static str) -> Result<A, EngineError> {
    if TypeId::of::<A>() != TypeId::of::<EngineError>()
        && let Some(error) = value.downcast_ref::<EngineError>()
    {
        return Err(error.clone());
    }
    value
        .downcast::<A>()
        .map(|shared| Arc::try_unwrap(shared).unwrap_or_else(|shared| (*shared).clone()))
        .map_err(|_| EngineError::KindMismatch {
            expected: type_name::<A>(),
            found: "another element type",
            operation,
        })
}

/// Takes an erased carrier apart.
///
/// # Errors
///
/// [`EngineError::KindMismatch`] when `carrier` is not a `C`.
pub fn unbox<C: Any>(
    carrier: Opaque,
    expected: &'static str,
    operation: &'static str,
) -> Result<C, EngineError> {
    carrier
        .downcast::<C>()
        .map(|carrier| *carrier)
        .map_err(|_| EngineError::KindMismatch {
            expected,
            found: "another carrier",
            operation,
        })
}

/// Whether a carrier holds at most one element or any number of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lineage {
    /// Zero or one element: options, identities, futures.
    Value,
    /// Zero or more elements: vectors, streams.
    Sequence,
}

/// Identity of an erased carrier type.
///
/// Keys compare by type alone; the name is for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct CarrierKey {
    type_id: TypeId,
    name: &'static str,
}

impl CarrierKey {
    /// The key of carrier type `C`.
    pub fn of<C: Any>(name: &'static str) -> Self {
        Self {
            type_id: TypeId::of::<C>(),
            name,
        }
    }

    /// The carrier's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The carrier's `TypeId`.
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl PartialEq for CarrierKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CarrierKey {}

impl Hash for CarrierKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl fmt::Display for CarrierKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// Monadic operations over one erased carrier type.
///
/// Implementations are stateless and shared; every operation consumes the
/// carrier it is given and returns a new one of the same type.
pub trait Comprehender: Send + Sync + 'static {
    /// The erased carrier type this comprehender handles.
    fn target(&self) -> CarrierKey;

    /// Whether the carrier is value-like or sequence-like.
    fn lineage(&self) -> Lineage;

    /// A carrier holding `value`.
    fn of(&self, value: Dynamic) -> Opaque;

    /// A carrier holding nothing.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingInstance`] for carriers that cannot be empty.
    fn empty(&self) -> Result<Opaque, EngineError>;

    /// Applies `function` to every element.
    ///
    /// # Errors
    ///
    /// [`EngineError::KindMismatch`] when `carrier` is not of the target type.
    fn map(&self, carrier: Opaque, function: DynFunction) -> Result<Opaque, EngineError>;

    /// Binds every element to the carrier `function` returns, converting
    /// foreign carriers through `dispatch`.
    ///
    /// # Errors
    ///
    /// [`EngineError::KindMismatch`] for a carrier of another type, plus
    /// whatever resolving a foreign result raises.
    fn flat_map(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        function: DynBind,
    ) -> Result<Opaque, EngineError>;

    /// Keeps the elements satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// As for [`flat_map`](Self::flat_map).
    fn filter(
        &self,
        dispatch: &Dispatch,
        carrier: Opaque,
        predicate: DynPredicate,
    ) -> Result<Opaque, EngineError> {
        filter_via_flat_map(self, dispatch, carrier, predicate)
    }

    /// Every element of `carrier`, in order. May block.
    ///
    /// # Errors
    ///
    /// [`EngineError::KindMismatch`] when `carrier` is not of the target type.
    fn elements(&self, carrier: Opaque) -> Result<Vec<Dynamic>, EngineError>;

    /// A carrier holding `elements`; value carriers keep the first.
    ///
    /// # Errors
    ///
    /// As for [`empty`](Self::empty) when `elements` is empty.
    fn of_all(&self, elements: Vec<Dynamic>) -> Result<Opaque, EngineError>;

    /// Converts `carrier`, produced by a function bound over a `target`
    /// carrier, into `target`'s carrier type.
    ///
    /// By default a value carrier becomes `target.of` its element (or
    /// `target.empty`); a sequence becomes all of its elements in a sequence
    /// target, and its first element in a value target.
    ///
    /// # Errors
    ///
    /// [`EngineError::NoElement`] when an empty sequence is collapsed into a
    /// value target.
    fn resolve_for_cross_type_flat_map(
        &self,
        target: &dyn Comprehender,
        carrier: Opaque,
    ) -> Result<Opaque, EngineError> {
        let elements = self.elements(carrier)?;
        match (self.lineage(), target.lineage()) {
            (_, Lineage::Sequence) => target.of_all(elements),
            (Lineage::Value, Lineage::Value) => match elements.into_iter().next() {
                Some(element) => Ok(target.of(element)),
                None => target.empty(),
            },
            (Lineage::Sequence, Lineage::Value) => elements
                .into_iter()
                .next()
                .map(|element| target.of(element))
                .ok_or(EngineError::NoElement {
                    marker: self.target().name(),
                    operation: "resolve_for_cross_type_flat_map",
                }),
        }
    }
}

/// `filter` expressed as a `flat_map` to `of` or `empty`, for carriers
/// without a native one.
///
/// The comprehender must be registered in `dispatch`.
///
/// # Errors
///
/// [`EngineError::UnknownCarrier`] when it is not, otherwise as for
/// [`Comprehender::flat_map`].
pub fn filter_via_flat_map<C: Comprehender + ?Sized>(
    comprehender: &C,
    dispatch: &Dispatch,
    carrier: Opaque,
    mut predicate: DynPredicate,
) -> Result<Opaque, EngineError> {
    let own = dispatch.comprehender_for(comprehender.target())?;
    comprehender.flat_map(
        dispatch,
        carrier,
        Box::new(move |element| {
            if predicate(&element) {
                own.of(element)
            } else {
                own.empty().unwrap_or_else(|error| own.of(erase(error)))
            }
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn recover_round_trips_elements() {
        assert_eq!(recover::<i32>(erase(5), "test"), Ok(5));
    }

    #[rstest]
    fn recover_rejects_other_types() {
        assert!(matches!(
            recover::<String>(erase(5), "test"),
            Err(EngineError::KindMismatch { operation: "test", .. })
        ));
    }

    #[rstest]
    fn recover_surfaces_in_band_errors() {
        let error = EngineError::NoElement {
            marker: "Vec",
            operation: "resolve_for_cross_type_flat_map",
        };
        assert_eq!(recover::<i32>(erase(error.clone()), "test"), Err(error));
    }

    #[rstest]
    fn carrier_keys_compare_by_type() {
        assert_eq!(CarrierKey::of::<Vec<Dynamic>>("Vec"), CarrierKey::of::<Vec<Dynamic>>("List"));
        assert_ne!(CarrierKey::of::<Vec<Dynamic>>("Vec"), CarrierKey::of::<Option<Dynamic>>("Vec"));
    }
}
