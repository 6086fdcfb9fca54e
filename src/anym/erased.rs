//! The erased state shared by both `AnyM` variants.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::comprehender::{Comprehender, Dispatch, Dynamic, Lineage, Opaque, Reify, erase, recover};
use crate::error::EngineError;
use crate::kind::Element;

use super::Monadic;

/// An erased carrier, the comprehender that drives it and the dispatch table
/// used for cross-type binds.
///
/// A failed operation poisons the carrier; later operations are skipped and
/// the failure is reported by the consuming accessors.
pub(super) struct Core {
    carrier: Result<Opaque, EngineError>,
    comprehender: Arc<dyn Comprehender>,
    dispatch: Dispatch,
}

impl Core {
    pub(super) fn new<C: Comprehender>(comprehender: C, carrier: Opaque) -> Self {
        Self {
            carrier: Ok(carrier),
            comprehender: Arc::new(comprehender),
            dispatch: Dispatch::global().clone(),
        }
    }

    /// Resolves the comprehender for `carrier` in `dispatch` and converts the
    /// carrier into that comprehender's target type.
    pub(super) fn resolve(
        dispatch: &Dispatch,
        carrier: Opaque,
        operation: &'static str,
    ) -> Result<Self, EngineError> {
        let resolution = dispatch.resolve(&carrier, operation)?;
        let carrier = resolution.prepare(carrier)?;
        Ok(Self {
            carrier: Ok(carrier),
            comprehender: Arc::clone(resolution.comprehender()),
            dispatch: dispatch.clone(),
        })
    }

    fn with(&self, carrier: Result<Opaque, EngineError>) -> Self {
        Self {
            carrier,
            comprehender: Arc::clone(&self.comprehender),
            dispatch: self.dispatch.clone(),
        }
    }

    pub(super) fn lineage(&self) -> Lineage {
        self.comprehender.lineage()
    }

    pub(super) fn carrier_name(&self) -> &'static str {
        self.comprehender.target().name()
    }

    pub(super) fn map<A, B, Function>(self, mut function: Function, operation: &'static str) -> Self
    where
        A: Element,
        B: Element,
        Function: FnMut(A) -> B + Send + 'static,
    {
        let comprehender = &self.comprehender;
        let carrier = self.carrier.and_then(|carrier| {
            comprehender.map(
                carrier,
                Box::new(move |element: Dynamic| match recover::<A>(element, operation) {
                    Ok(value) => erase(function(value)),
                    Err(error) => erase(error),
                }),
            )
        });
        Self { carrier, ..self }
    }

    pub(super) fn flat_map<A, R, Function>(
        self,
        mut function: Function,
        operation: &'static str,
    ) -> Self
    where
        A: Element,
        R: Monadic,
        Function: FnMut(A) -> R + Send + 'static,
    {
        let own = Arc::clone(&self.comprehender);
        let (comprehender, dispatch) = (&self.comprehender, &self.dispatch);
        let carrier = self.carrier.and_then(|carrier| {
            comprehender.flat_map(
                dispatch,
                carrier,
                Box::new(move |element: Dynamic| {
                    recover::<A>(element, operation)
                        .and_then(|value| function(value).into_opaque())
                        .unwrap_or_else(|error| own.of(erase(error)))
                }),
            )
        });
        Self { carrier, ..self }
    }

    /// Elements of another type than `A`, including in-band errors, are kept.
    pub(super) fn filter<A, Predicate>(self, mut predicate: Predicate) -> Self
    where
        A: Element,
        Predicate: FnMut(&A) -> bool + Send + 'static,
    {
        let (comprehender, dispatch) = (&self.comprehender, &self.dispatch);
        let carrier = self.carrier.and_then(|carrier| {
            comprehender.filter(
                dispatch,
                carrier,
                Box::new(move |element: &Dynamic| {
                    element.downcast_ref::<A>().is_none_or(&mut predicate)
                }),
            )
        });
        Self { carrier, ..self }
    }

    pub(super) fn unit<B: Element>(&self, value: B) -> Self {
        self.with(Ok(self.comprehender.of(erase(value))))
    }

    pub(super) fn empty(&self) -> Self {
        self.with(self.comprehender.empty())
    }

    /// Rebuilds the carrier as `C`, refusing up front when `C` is not the
    /// comprehender's target.
    pub(super) fn unwrap<C: Reify>(self) -> Result<C, EngineError> {
        let carrier = self.carrier?;
        let (wanted, held) = (C::carrier_key(), self.comprehender.target());
        if wanted != held {
            debug!(
                expected = wanted.name(),
                found = held.name(),
                "refused to unwrap as another carrier"
            );
            return Err(EngineError::KindMismatch {
                expected: wanted.name(),
                found: held.name(),
                operation: "AnyM::unwrap",
            });
        }
        C::reify(carrier)
    }

    pub(super) fn to_vec<A: Element>(self, operation: &'static str) -> Result<Vec<A>, EngineError> {
        let comprehender = &self.comprehender;
        self.carrier
            .and_then(|carrier| comprehender.elements(carrier))?
            .into_iter()
            .map(|element| recover(element, operation))
            .collect()
    }

    pub(super) fn into_opaque(self) -> Result<Opaque, EngineError> {
        self.carrier
    }
}

impl fmt::Debug for Core {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AnyM")
            .field("carrier", &self.carrier_name())
            .field("lineage", &self.lineage())
            .field("failed", &self.carrier.as_ref().err())
            .finish()
    }
}
