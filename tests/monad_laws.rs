//! Property-based tests for Monad laws.
//!
//! - **Left Identity**: `flat_map(f, unit(a)) == f(a)`
//! - **Right Identity**: `flat_map(unit, m) == m`
//! - **Associativity**: `flat_map(g, flat_map(f, m)) == flat_map(|x| flat_map(g, f(x)), m)`

#![cfg(all(feature = "laws", feature = "async"))]

use kindred::carrier::{IdentityKind, OptionKind, Seq, SeqKind, Task, TaskKind, VecKind};
use kindred::kind::Kind;
use kindred::laws;
use kindred::typeclass::{Applicative, Identity, MonadZero};
use proptest::prelude::*;

// =============================================================================
// Option
// =============================================================================

fn halve(n: i32) -> Kind<OptionKind, i32> {
    Kind::from((n % 2 == 0).then_some(n / 2))
}

fn label(n: i32) -> Kind<OptionKind, String> {
    Kind::from((n > 0).then(|| format!("+{n}")))
}

proptest! {
    #[test]
    fn prop_option_left_identity_law(value in any::<i32>()) {
        prop_assert_eq!(laws::monad_left_identity(&OptionKind, value, halve), Ok(()));
    }

    #[test]
    fn prop_option_right_identity_law(value in any::<Option<i32>>()) {
        prop_assert_eq!(laws::monad_right_identity(&OptionKind, Kind::from(value)), Ok(()));
    }

    #[test]
    fn prop_option_associativity_law(value in any::<Option<i32>>()) {
        prop_assert_eq!(
            laws::monad_associativity(&OptionKind, Kind::from(value), halve, label),
            Ok(())
        );
    }
}

// =============================================================================
// Vec and Seq
// =============================================================================

fn spread(n: i32) -> Kind<VecKind, i32> {
    Kind::from(vec![n, n.wrapping_neg()])
}

fn repeat(n: i32) -> Kind<VecKind, i32> {
    Kind::from(vec![n; usize::from(n.unsigned_abs() % 3 == 0)])
}

fn spread_lazily(n: i32) -> Kind<SeqKind, i32> {
    Kind::from(Seq::from_vec(vec![n, n.wrapping_neg()]))
}

fn countdown(n: i32) -> Kind<SeqKind, u8> {
    Kind::from(Seq::from_vec((0..n.unsigned_abs() % 4).map(|step| step as u8).collect()))
}

proptest! {
    #[test]
    fn prop_vec_left_identity_law(value in any::<i32>()) {
        prop_assert_eq!(laws::monad_left_identity(&VecKind, value, spread), Ok(()));
    }

    #[test]
    fn prop_vec_right_identity_law(values in prop::collection::vec(any::<i32>(), 0..30)) {
        prop_assert_eq!(laws::monad_right_identity(&VecKind, Kind::from(values)), Ok(()));
    }

    #[test]
    fn prop_vec_associativity_law(values in prop::collection::vec(any::<i32>(), 0..30)) {
        prop_assert_eq!(
            laws::monad_associativity(&VecKind, Kind::from(values), spread, repeat),
            Ok(())
        );
    }

    #[test]
    fn prop_seq_left_identity_law(value in any::<i32>()) {
        prop_assert_eq!(laws::monad_left_identity(&SeqKind, value, countdown), Ok(()));
    }

    #[test]
    fn prop_seq_right_identity_law(values in prop::collection::vec(any::<i32>(), 0..30)) {
        prop_assert_eq!(
            laws::monad_right_identity(&SeqKind, Kind::from(Seq::from_vec(values))),
            Ok(())
        );
    }

    #[test]
    fn prop_seq_associativity_law(values in prop::collection::vec(any::<i32>(), 0..30)) {
        prop_assert_eq!(
            laws::monad_associativity(
                &SeqKind,
                Kind::from(Seq::from_vec(values)),
                spread_lazily,
                countdown,
            ),
            Ok(())
        );
    }

    #[test]
    fn prop_infinite_seq_right_identity_law(seed in any::<i32>()) {
        let naturals = Seq::iterate(seed, |n| n.wrapping_add(1));
        prop_assert_eq!(laws::monad_right_identity(&SeqKind, Kind::from(naturals)), Ok(()));
    }
}

// =============================================================================
// Identity and Task
// =============================================================================

proptest! {
    #[test]
    fn prop_identity_laws(value in any::<i32>()) {
        let double = |n: i32| IdentityKind.unit(n.wrapping_mul(2));
        let show = |n: i32| IdentityKind.unit(n.to_string());
        prop_assert_eq!(laws::monad_left_identity(&IdentityKind, value, double), Ok(()));
        prop_assert_eq!(
            laws::monad_right_identity(&IdentityKind, Kind::from(Identity(value))),
            Ok(())
        );
        prop_assert_eq!(
            laws::monad_associativity(&IdentityKind, Kind::from(Identity(value)), double, show),
            Ok(())
        );
    }

    #[test]
    fn prop_task_laws(value in any::<i32>()) {
        let double = |n: i32| Kind::<TaskKind, i32>::from(Task::ready(n.wrapping_mul(2)));
        let show = |n: i32| TaskKind.unit(n.to_string());
        prop_assert_eq!(laws::monad_left_identity(&TaskKind, value, double), Ok(()));
        prop_assert_eq!(
            laws::monad_right_identity(&TaskKind, Kind::from(Task::ready(value))),
            Ok(())
        );
        prop_assert_eq!(
            laws::monad_associativity(&TaskKind, Kind::from(Task::ready(value)), double, show),
            Ok(())
        );
    }

    /// A bound function that never completes leaves the whole chain pending
    #[test]
    fn prop_task_associativity_with_a_pending_step(value in any::<i32>()) {
        let stall = |_: i32| TaskKind.empty::<i32>();
        let show = |n: i32| TaskKind.unit(n.to_string());
        prop_assert_eq!(
            laws::monad_associativity(&TaskKind, Kind::from(Task::ready(value)), stall, show),
            Ok(())
        );
    }
}
