//! Error types raised by the engine itself.
//!
//! Carrier-native failures (a `None`, an `Err` element, a future that never
//! completes) are never translated: they pass through every operation
//! unchanged. The variants below are the failures the engine introduces on
//! its own, and every one of them names the marker (or carrier) involved and
//! the operation that raised it.
//!
//! # Examples
//!
//! ```rust
//! use kindred::{EngineError, ErrorCategory};
//!
//! let error = EngineError::NoElement {
//!     marker: "Vec",
//!     operation: "AnyMValue::flat_map",
//! };
//! assert_eq!(error.category(), ErrorCategory::Semantic);
//! assert_eq!(
//!     format!("{error}"),
//!     "Vec::AnyMValue::flat_map: no element to collapse to a single value"
//! );
//! ```

use crate::registry::Capability;

/// The family an [`EngineError`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A `Kind` was built or taken apart with the wrong marker.
    Structural,
    /// A registry or dispatch table had no answer.
    Registry,
    /// An operation was asked for something its input cannot provide.
    Semantic,
    /// A law check failed.
    TestTime,
}

/// Failures introduced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A kinded value was narrowed with a marker or element type other than
    /// the one it was widened with.
    KindMismatch {
        /// The marker (or element type) the caller asked for.
        expected: &'static str,
        /// The marker (or element type) actually carried.
        found: &'static str,
        /// The operation that detected the mismatch.
        operation: &'static str,
    },
    /// An absent or foreign value was offered to `widen`.
    InvalidKind {
        /// The marker the value was supposed to belong to.
        marker: &'static str,
        /// The operation that rejected it.
        operation: &'static str,
    },
    /// No record was registered for the marker at the requested capability.
    MissingInstance {
        /// The marker that was looked up.
        marker: &'static str,
        /// The capability that was requested.
        capability: Capability,
        /// The operation that required it.
        operation: &'static str,
    },
    /// No comprehender handles the carrier, directly or through an ancestor.
    UnknownCarrier {
        /// The carrier's type name.
        carrier: &'static str,
        /// The operation that needed a comprehender.
        operation: &'static str,
    },
    /// A second comprehender was offered for a carrier that already has one.
    DuplicateComprehender {
        /// The carrier's name.
        carrier: &'static str,
        /// The operation that rejected the registration.
        operation: &'static str,
    },
    /// A sequence was collapsed to a single value but had no elements.
    NoElement {
        /// The marker of the empty sequence.
        marker: &'static str,
        /// The operation that attempted the collapse.
        operation: &'static str,
    },
    /// `cycle` was applied to an infinite inner sequence.
    CycleOnInfinite {
        /// The marker of the outer carrier.
        marker: &'static str,
        /// The operation that was refused.
        operation: &'static str,
    },
    /// An operation that has to observe the whole sequence (sorting,
    /// shuffling, reversing, windowing) was applied to an infinite inner.
    UnorderableInfinite {
        /// The marker of the outer carrier.
        marker: &'static str,
        /// The operation that was refused.
        operation: &'static str,
    },
    /// An algebraic law did not hold for an instance.
    LawViolation {
        /// The marker whose instance was checked.
        marker: &'static str,
        /// The law that failed, e.g. `"functor identity"`.
        law: &'static str,
        /// The check that observed the failure.
        operation: &'static str,
    },
}

impl EngineError {
    /// Returns the category this error belongs to.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::KindMismatch { .. } | Self::InvalidKind { .. } => ErrorCategory::Structural,
            Self::MissingInstance { .. }
            | Self::UnknownCarrier { .. }
            | Self::DuplicateComprehender { .. } => ErrorCategory::Registry,
            Self::NoElement { .. }
            | Self::CycleOnInfinite { .. }
            | Self::UnorderableInfinite { .. } => ErrorCategory::Semantic,
            Self::LawViolation { .. } => ErrorCategory::TestTime,
        }
    }

    /// Returns the name of the operation that raised this error.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::KindMismatch { operation, .. }
            | Self::InvalidKind { operation, .. }
            | Self::MissingInstance { operation, .. }
            | Self::UnknownCarrier { operation, .. }
            | Self::DuplicateComprehender { operation, .. }
            | Self::NoElement { operation, .. }
            | Self::CycleOnInfinite { operation, .. }
            | Self::UnorderableInfinite { operation, .. }
            | Self::LawViolation { operation, .. } => operation,
        }
    }

    /// Returns the marker or carrier name this error is about.
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::KindMismatch { expected, .. } => expected,
            Self::UnknownCarrier { carrier, .. } | Self::DuplicateComprehender { carrier, .. } => {
                carrier
            }
            Self::InvalidKind { marker, .. }
            | Self::MissingInstance { marker, .. }
            | Self::NoElement { marker, .. }
            | Self::CycleOnInfinite { marker, .. }
            | Self::UnorderableInfinite { marker, .. }
            | Self::LawViolation { marker, .. } => marker,
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KindMismatch {
                expected,
                found,
                operation,
            } => write!(
                formatter,
                "{expected}::{operation}: kind mismatch, found {found}"
            ),
            Self::InvalidKind { marker, operation } => write!(
                formatter,
                "{marker}::{operation}: value is not a carrier of this kind"
            ),
            Self::MissingInstance {
                marker,
                capability,
                operation,
            } => write!(
                formatter,
                "{marker}::{operation}: no {capability} instance registered"
            ),
            Self::UnknownCarrier { carrier, operation } => write!(
                formatter,
                "{carrier}::{operation}: no comprehender registered for carrier"
            ),
            Self::DuplicateComprehender { carrier, operation } => write!(
                formatter,
                "{carrier}::{operation}: a comprehender is already registered"
            ),
            Self::NoElement { marker, operation } => write!(
                formatter,
                "{marker}::{operation}: no element to collapse to a single value"
            ),
            Self::CycleOnInfinite { marker, operation } => write!(
                formatter,
                "{marker}::{operation}: cannot cycle an infinite sequence"
            ),
            Self::UnorderableInfinite { marker, operation } => write!(
                formatter,
                "{marker}::{operation}: cannot materialise an infinite sequence"
            ),
            Self::LawViolation {
                marker,
                law,
                operation,
            } => write!(formatter, "{marker}::{operation}: {law} law violated"),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn kind_mismatch_display_names_both_sides() {
        let error = EngineError::KindMismatch {
            expected: "Option",
            found: "Vec",
            operation: "narrow",
        };
        assert_eq!(
            format!("{error}"),
            "Option::narrow: kind mismatch, found Vec"
        );
    }

    #[rstest]
    fn missing_instance_display_names_capability() {
        let error = EngineError::MissingInstance {
            marker: "Identity",
            capability: Capability::MonadZero,
            operation: "require",
        };
        assert_eq!(
            format!("{error}"),
            "Identity::require: no MonadZero instance registered"
        );
    }

    #[rstest]
    #[case(
        EngineError::InvalidKind { marker: "Option", operation: "try_widen" },
        ErrorCategory::Structural
    )]
    #[case(
        EngineError::UnknownCarrier { carrier: "String", operation: "resolve" },
        ErrorCategory::Registry
    )]
    #[case(
        EngineError::CycleOnInfinite { marker: "Vec", operation: "cycle" },
        ErrorCategory::Semantic
    )]
    #[case(
        EngineError::LawViolation {
            marker: "Vec",
            law: "monad left identity",
            operation: "check_monad_laws",
        },
        ErrorCategory::TestTime
    )]
    fn category_matches_variant(#[case] error: EngineError, #[case] expected: ErrorCategory) {
        assert_eq!(error.category(), expected);
    }

    #[rstest]
    fn every_error_carries_marker_and_operation() {
        let error = EngineError::UnorderableInfinite {
            marker: "Task",
            operation: "SeqT::sorted",
        };
        assert_eq!(error.marker(), "Task");
        assert_eq!(error.operation(), "SeqT::sorted");
    }

    #[rstest]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<EngineError>();
    }
}
