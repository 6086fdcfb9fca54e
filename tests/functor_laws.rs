//! Property-based tests for Functor laws.
//!
//! This module verifies that every built-in Functor record satisfies the
//! required laws:
//!
//! - **Identity Law**: `map(|x| x, fa) == fa`
//! - **Composition Law**: `map(|x| g(f(x)), fa) == map(g, map(f, fa))`
//!
//! Each law is evaluated by the checks in `kindred::laws`, which report a
//! `LawViolation` naming the marker and the law.

#![cfg(all(feature = "laws", feature = "async"))]

use kindred::carrier::{IdentityKind, OptionKind, Seq, SeqKind, Task, TaskKind, VecKind};
use kindred::kind::Kind;
use kindred::laws;
use kindred::typeclass::Identity;
use proptest::prelude::*;

fn increment(n: i32) -> i32 {
    n.wrapping_add(1)
}

fn describe(n: i32) -> String {
    format!("<{n}>")
}

// =============================================================================
// Value Carriers
// =============================================================================

proptest! {
    /// Identity Law for Option<i32>
    #[test]
    fn prop_option_identity_law(value in any::<Option<i32>>()) {
        prop_assert_eq!(laws::functor_identity(&OptionKind, Kind::from(value)), Ok(()));
    }

    /// Composition Law for Option<i32>: increment then describe
    #[test]
    fn prop_option_composition_law(value in any::<Option<i32>>()) {
        prop_assert_eq!(
            laws::functor_composition(&OptionKind, Kind::from(value), increment, describe),
            Ok(())
        );
    }

    /// Identity Law for Identity<String>
    #[test]
    fn prop_identity_identity_law(value in any::<String>()) {
        prop_assert_eq!(laws::functor_identity(&IdentityKind, Kind::from(Identity(value))), Ok(()));
    }

    /// Composition Law for Identity<i32>
    #[test]
    fn prop_identity_composition_law(value in any::<i32>()) {
        prop_assert_eq!(
            laws::functor_composition(
                &IdentityKind,
                Kind::from(Identity(value)),
                increment,
                describe,
            ),
            Ok(())
        );
    }

    /// Identity Law for a completed Task<i32>
    #[test]
    fn prop_task_identity_law(value in any::<i32>()) {
        prop_assert_eq!(laws::functor_identity(&TaskKind, Kind::from(Task::ready(value))), Ok(()));
    }

    /// Composition Law for a completed Task<i32>
    #[test]
    fn prop_task_composition_law(value in any::<i32>()) {
        prop_assert_eq!(
            laws::functor_composition(
                &TaskKind,
                Kind::from(Task::ready(value)),
                increment,
                describe,
            ),
            Ok(())
        );
    }
}

// =============================================================================
// Sequence Carriers
// =============================================================================

proptest! {
    /// Identity Law for Vec<i32>
    #[test]
    fn prop_vec_identity_law(values in prop::collection::vec(any::<i32>(), 0..50)) {
        prop_assert_eq!(laws::functor_identity(&VecKind, Kind::from(values)), Ok(()));
    }

    /// Composition Law for Vec<i32>
    #[test]
    fn prop_vec_composition_law(values in prop::collection::vec(any::<i32>(), 0..50)) {
        prop_assert_eq!(
            laws::functor_composition(&VecKind, Kind::from(values), increment, describe),
            Ok(())
        );
    }

    /// Identity Law for a finite Seq<i32>
    #[test]
    fn prop_seq_identity_law(values in prop::collection::vec(any::<i32>(), 0..50)) {
        prop_assert_eq!(
            laws::functor_identity(&SeqKind, Kind::from(Seq::from_vec(values))),
            Ok(())
        );
    }

    /// Composition Law for an infinite Seq<i32>, observed on a prefix
    #[test]
    fn prop_infinite_seq_composition_law(seed in any::<i32>()) {
        let naturals = Seq::iterate(seed, |n| n.wrapping_add(1));
        prop_assert_eq!(
            laws::functor_composition(&SeqKind, Kind::from(naturals), increment, describe),
            Ok(())
        );
    }
}

#[test]
fn pending_tasks_satisfy_identity() {
    assert_eq!(laws::functor_identity(&TaskKind, Kind::from(Task::<i32>::never())), Ok(()));
}
