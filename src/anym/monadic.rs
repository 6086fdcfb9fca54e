use std::collections::VecDeque;

use super::{AnyM, AnyMSeq, AnyMValue};
#[cfg(feature = "async")]
use crate::carrier::Task;
use crate::comprehender::{Dynamic, Opaque, erase};
use crate::error::EngineError;
use crate::kind::Element;
use crate::typeclass::Identity;

/// Values a function bound with `AnyM::flat_map` may return.
///
/// Results of a different carrier family than the one being bound are
/// converted by the bound carrier's cross-type policy, so an `Option` bound
/// to a `Vec` works and a `Vec` bound to an `Option` keeps its first element.
pub trait Monadic: Send + 'static {
    /// The element type.
    type Element: Element;

    /// The erased carrier.
    ///
    /// # Errors
    ///
    /// The failure recorded by an `AnyM` whose carrier was poisoned.
    fn into_opaque(self) -> Result<Opaque, EngineError>;
}

impl<A: Element> Monadic for Option<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        Ok(Box::new(self.map(erase)))
    }
}

impl<A: Element> Monadic for Vec<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        Ok(Box::new(self.into_iter().map(erase).collect::<Vec<Dynamic>>()))
    }
}

impl<A: Element> Monadic for VecDeque<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        Ok(Box::new(self.into_iter().map(erase).collect::<VecDeque<Dynamic>>()))
    }
}

impl<A: Element> Monadic for Identity<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        Ok(Box::new(Identity(erase(self.into_inner()))))
    }
}

#[cfg(feature = "async")]
impl<A: Element> Monadic for Task<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        Ok(Box::new(Task::from_future(futures::FutureExt::map(self, erase))))
    }
}

impl<A: Element> Monadic for AnyMValue<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        self.core.into_opaque()
    }
}

impl<A: Element> Monadic for AnyMSeq<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        self.core.into_opaque()
    }
}

impl<A: Element> Monadic for AnyM<A> {
    type Element = A;

    fn into_opaque(self) -> Result<Opaque, EngineError> {
        match self {
            Self::Value(value) => value.into_opaque(),
            Self::Seq(sequence) => sequence.into_opaque(),
        }
    }
}
