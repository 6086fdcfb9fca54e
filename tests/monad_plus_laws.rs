//! Property-based tests for `MonadZero` and `MonadPlus` laws.
//!
//! - **Left Zero**: `flat_map(f, empty) == empty`
//! - **Filter Identities**: `filter(|_| true, m) == m`, `filter(|_| false, m) == empty`
//! - **Plus Identity**: `plus(empty, x) == x == plus(x, empty)`
//! - **Plus Associativity**: `plus(plus(a, b), c) == plus(a, plus(b, c))`

#![cfg(all(feature = "laws", feature = "async"))]

use kindred::carrier::{OptionKind, Seq, SeqKind, Task, TaskKind, VecKind};
use kindred::kind::Kind;
use kindred::laws;
use kindred::typeclass::{Applicative, MonadZero};
use proptest::prelude::*;

fn small_vec() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..10)
}

// =============================================================================
// MonadZero
// =============================================================================

proptest! {
    #[test]
    fn prop_option_zero_laws(value in any::<Option<i32>>()) {
        prop_assert_eq!(
            laws::monad_zero_left_zero(&OptionKind, |n: i32| OptionKind.unit(n.to_string())),
            Ok(())
        );
        prop_assert_eq!(laws::monad_zero_filter(&OptionKind, Kind::from(value)), Ok(()));
    }

    #[test]
    fn prop_vec_zero_laws(values in small_vec()) {
        prop_assert_eq!(
            laws::monad_zero_left_zero(&VecKind, |n: i32| Kind::from(vec![n, n])),
            Ok(())
        );
        prop_assert_eq!(laws::monad_zero_filter(&VecKind, Kind::from(values)), Ok(()));
    }

    #[test]
    fn prop_seq_zero_laws(values in small_vec()) {
        prop_assert_eq!(
            laws::monad_zero_left_zero(&SeqKind, |n: i32| Kind::from(Seq::repeat(n))),
            Ok(())
        );
        prop_assert_eq!(
            laws::monad_zero_filter(&SeqKind, Kind::from(Seq::from_vec(values))),
            Ok(())
        );
    }

    /// `empty` never completes, and neither does anything bound to it or
    /// filtered out.
    #[test]
    fn prop_task_zero_laws(value in any::<i32>()) {
        prop_assert_eq!(
            laws::monad_zero_left_zero(&TaskKind, |n: i32| TaskKind.unit(n)),
            Ok(())
        );
        prop_assert_eq!(laws::monad_zero_filter(&TaskKind, Kind::from(Task::ready(value))), Ok(()));
    }
}

// =============================================================================
// MonadPlus
// =============================================================================

proptest! {
    #[test]
    fn prop_option_plus_laws(
        a in any::<Option<i32>>(),
        b in any::<Option<i32>>(),
        c in any::<Option<i32>>(),
    ) {
        prop_assert_eq!(laws::monad_plus_identity(&OptionKind, Kind::from(a)), Ok(()));
        prop_assert_eq!(
            laws::monad_plus_associativity(
                &OptionKind,
                Kind::from(a),
                Kind::from(b),
                Kind::from(c),
            ),
            Ok(())
        );
    }

    #[test]
    fn prop_vec_plus_laws(a in small_vec(), b in small_vec(), c in small_vec()) {
        prop_assert_eq!(laws::monad_plus_identity(&VecKind, Kind::from(a.clone())), Ok(()));
        prop_assert_eq!(
            laws::monad_plus_associativity(&VecKind, Kind::from(a), Kind::from(b), Kind::from(c)),
            Ok(())
        );
    }

    #[test]
    fn prop_seq_plus_laws(a in small_vec(), b in small_vec(), c in small_vec()) {
        let lazy = |values: Vec<i32>| -> Kind<SeqKind, i32> { Kind::from(Seq::from_vec(values)) };
        prop_assert_eq!(laws::monad_plus_identity(&SeqKind, lazy(a.clone())), Ok(()));
        prop_assert_eq!(
            laws::monad_plus_associativity(&SeqKind, lazy(a), lazy(b), lazy(c)),
            Ok(())
        );
    }

    /// Completed tasks race left to right.
    #[test]
    fn prop_task_plus_laws(a in any::<i32>(), b in any::<i32>(), c in any::<i32>()) {
        let ready = |value: i32| Kind::<TaskKind, i32>::from(Task::ready(value));
        prop_assert_eq!(laws::monad_plus_identity(&TaskKind, ready(a)), Ok(()));
        prop_assert_eq!(laws::monad_plus_identity(&TaskKind, TaskKind.empty::<i32>()), Ok(()));
        prop_assert_eq!(
            laws::monad_plus_associativity(&TaskKind, ready(a), ready(b), ready(c)),
            Ok(())
        );
    }
}

#[test]
fn infinite_sequences_keep_their_prefix_under_plus() {
    assert_eq!(
        laws::monad_plus_identity(&SeqKind, Kind::from(Seq::iterate(0_u64, |n| n + 1))),
        Ok(())
    );
}
