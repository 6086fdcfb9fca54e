//! Property-based tests for the kind encoding.
//!
//! - **Round Trip**: `narrow(widen(c)) == c`, also through `DynKind`
//! - **Tag Check**: narrowing a `DynKind` with the wrong marker or element
//!   type is a `KindMismatch`, never a reinterpretation

#![cfg(feature = "laws")]

use kindred::carrier::{IdentityKind, OptionKind, VecKind};
use kindred::kind::{DynKind, Kind, narrow, widen};
use kindred::laws;
use kindred::typeclass::Identity;
use kindred::{EngineError, ErrorCategory};
use proptest::prelude::*;
use rstest::rstest;

proptest! {
    #[test]
    fn prop_option_round_trip(value in any::<Option<String>>()) {
        prop_assert_eq!(laws::kind_round_trip::<OptionKind, String>(value), Ok(()));
    }

    #[test]
    fn prop_vec_round_trip(values in prop::collection::vec(any::<u16>(), 0..30)) {
        prop_assert_eq!(laws::kind_round_trip::<VecKind, u16>(values), Ok(()));
    }

    #[test]
    fn prop_identity_round_trip(value in any::<(i32, bool)>()) {
        prop_assert_eq!(
            laws::kind_round_trip::<IdentityKind, (i32, bool)>(Identity(value)),
            Ok(())
        );
    }

    /// `widen(narrow(k)) == k` for any kind
    #[test]
    fn prop_widen_after_narrow(values in prop::collection::vec(any::<i32>(), 0..30)) {
        let kind: Kind<VecKind, i32> = Kind::from(values);
        prop_assert_eq!(widen::<VecKind, i32>(narrow(kind.clone())), kind);
    }

    #[test]
    fn prop_wrong_element_type_is_rejected(values in prop::collection::vec(any::<i32>(), 0..10)) {
        let erased = Kind::<VecKind, i32>::from(values).erase();
        let result = erased.narrow::<VecKind, i64>();
        prop_assert!(matches!(
            result,
            Err(EngineError::KindMismatch { operation: "DynKind::narrow", .. })
        ), "expected KindMismatch from DynKind::narrow, got {:?}", result);
    }
}

#[rstest]
fn wrong_marker_is_a_structural_failure() {
    let erased = Kind::<OptionKind, i32>::from(Some(1)).erase();
    let error = erased.clone_narrow::<VecKind, i32>().err();
    assert_eq!(
        error,
        Some(EngineError::KindMismatch {
            expected: "Vec",
            found: "Option",
            operation: "DynKind::narrow",
        })
    );
    assert_eq!(error.map(|failure| failure.category()), Some(ErrorCategory::Structural));
}

#[rstest]
fn foreign_values_cannot_become_kinds() {
    let result = DynKind::from_any::<VecKind, i32>(Box::new("not a vector"));
    assert!(matches!(result, Err(EngineError::InvalidKind { marker: "Vec", .. })));
}

#[rstest]
fn absent_carriers_cannot_be_widened() {
    let result = Kind::<OptionKind, i32>::try_widen(None);
    assert!(matches!(result, Err(EngineError::InvalidKind { marker: "Option", .. })));
}
