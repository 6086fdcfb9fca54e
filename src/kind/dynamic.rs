//! Runtime-tagged kinds.
//!
//! A [`DynKind`] is a [`Kind`] whose marker has been moved from the type into
//! a runtime tag. It is what registries and heterogeneous collections hold;
//! getting a typed kind back goes through [`DynKind::narrow`], which checks
//! the tag and the element type.

use std::any::{Any, type_name};

use super::{Element, Kind, Marker, MarkerId};
use crate::error::EngineError;

/// A kinded value with its marker checked at runtime.
///
/// # Examples
///
/// ```rust
/// use kindred::kind::Kind;
/// use kindred::carrier::{OptionKind, VecKind};
///
/// let erased = Kind::<OptionKind, i32>::from(Some(1)).erase();
/// assert!(erased.is::<OptionKind>());
/// assert!(erased.clone_narrow::<VecKind, i32>().is_err());
/// assert_eq!(erased.narrow::<OptionKind, i32>().map(|kind| kind.narrow()), Ok(Some(1)));
/// ```
pub struct DynKind {
    marker: MarkerId,
    element: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

impl DynKind {
    /// Erases the marker of `kind` into a runtime tag.
    pub fn erase<F: Marker, A: Element>(kind: Kind<F, A>) -> Self {
        Self {
            marker: F::id(),
            element: type_name::<A>(),
            value: Box::new(kind.narrow()),
        }
    }

    /// Builds a tagged kind from an untyped value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidKind`] when `value` is not an
    /// `F::Carrier<A>`.
    pub fn from_any<F: Marker, A: Element>(
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<Self, EngineError> {
        if value.is::<F::Carrier<A>>() {
            Ok(Self {
                marker: F::id(),
                element: type_name::<A>(),
                value,
            })
        } else {
            Err(EngineError::InvalidKind {
                marker: F::NAME,
                operation: "DynKind::from_any",
            })
        }
    }

    /// The marker this value was tagged with.
    #[inline]
    pub const fn marker(&self) -> MarkerId {
        self.marker
    }

    /// The element type name this value was tagged with.
    #[inline]
    pub const fn element(&self) -> &'static str {
        self.element
    }

    /// Returns `true` when this value was tagged with `F`.
    #[inline]
    pub fn is<F: Marker>(&self) -> bool {
        self.marker == F::id()
    }

    /// Recovers the typed kind.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::KindMismatch`] when the marker or the element
    /// type differs from the one the value was erased with.
    pub fn narrow<F: Marker, A: Element>(self) -> Result<Kind<F, A>, EngineError> {
        self.check_marker::<F>()?;
        let element = self.element;
        self.value
            .downcast::<F::Carrier<A>>()
            .map(|carrier| Kind::widen(*carrier))
            .map_err(|_| EngineError::KindMismatch {
                expected: type_name::<A>(),
                found: element,
                operation: "DynKind::narrow",
            })
    }

    /// Recovers a copy of the typed kind, leaving this value intact.
    ///
    /// # Errors
    ///
    /// Same as [`DynKind::narrow`].
    pub fn clone_narrow<F: Marker, A: Element>(&self) -> Result<Kind<F, A>, EngineError> {
        self.check_marker::<F>()?;
        self.value
            .downcast_ref::<F::Carrier<A>>()
            .map(|carrier| Kind::widen(carrier.clone()))
            .ok_or(EngineError::KindMismatch {
                expected: type_name::<A>(),
                found: self.element,
                operation: "DynKind::clone_narrow",
            })
    }

    fn check_marker<F: Marker>(&self) -> Result<(), EngineError> {
        if self.is::<F>() {
            Ok(())
        } else {
            Err(EngineError::KindMismatch {
                expected: F::NAME,
                found: self.marker.name(),
                operation: "DynKind::narrow",
            })
        }
    }
}

impl std::fmt::Debug for DynKind {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("DynKind")
            .field("marker", &self.marker.name())
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}
