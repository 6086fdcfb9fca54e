//! Property-based tests for transformer laws.
//!
//! For every transformer and every built-in outer monad:
//!
//! - **Unit Preservation**: `T::unit(a).map(f) == T::unit(f(a))`
//! - **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
//!   when both layers are built with `unit`

#![cfg(all(feature = "laws", feature = "async"))]

use kindred::carrier::{IdentityKind, OptionKind, SeqKind, TaskKind, VecKind};
use kindred::laws;
use proptest::prelude::*;

fn describe(n: i32) -> String {
    format!("{n:+}")
}

fn neighbours(n: i32) -> Vec<i32> {
    vec![n.wrapping_sub(1), n.wrapping_add(1)]
}

fn digits(n: i32) -> Vec<u32> {
    n.unsigned_abs().to_string().chars().filter_map(|digit| digit.to_digit(10)).collect()
}

fn halve(n: i32) -> Option<i32> {
    (n % 2 == 0).then_some(n / 2)
}

fn positive(n: i32) -> Option<u32> {
    u32::try_from(n).ok().filter(|value| *value > 0)
}

// =============================================================================
// SeqT
// =============================================================================

proptest! {
    #[test]
    fn prop_seq_t_unit_preservation(value in any::<i32>()) {
        prop_assert_eq!(laws::seq_t_unit_map(&OptionKind, value, describe), Ok(()));
        prop_assert_eq!(laws::seq_t_unit_map(&VecKind, value, describe), Ok(()));
        prop_assert_eq!(laws::seq_t_unit_map(&IdentityKind, value, describe), Ok(()));
        prop_assert_eq!(laws::seq_t_unit_map(&SeqKind, value, describe), Ok(()));
        prop_assert_eq!(laws::seq_t_unit_map(&TaskKind, value, describe), Ok(()));
    }

    #[test]
    fn prop_seq_t_associativity(values in prop::collection::vec(any::<i32>(), 0..8)) {
        prop_assert_eq!(
            laws::seq_t_flat_map_associativity(&OptionKind, values.clone(), neighbours, digits),
            Ok(())
        );
        prop_assert_eq!(
            laws::seq_t_flat_map_associativity(&VecKind, values.clone(), neighbours, digits),
            Ok(())
        );
        prop_assert_eq!(
            laws::seq_t_flat_map_associativity(&IdentityKind, values.clone(), neighbours, digits),
            Ok(())
        );
        prop_assert_eq!(
            laws::seq_t_flat_map_associativity(&SeqKind, values.clone(), neighbours, digits),
            Ok(())
        );
        prop_assert_eq!(
            laws::seq_t_flat_map_associativity(&TaskKind, values, neighbours, digits),
            Ok(())
        );
    }
}

// =============================================================================
// OptionT
// =============================================================================

proptest! {
    #[test]
    fn prop_option_t_unit_preservation(value in any::<i32>()) {
        prop_assert_eq!(laws::option_t_unit_map(&OptionKind, value, describe), Ok(()));
        prop_assert_eq!(laws::option_t_unit_map(&VecKind, value, describe), Ok(()));
        prop_assert_eq!(laws::option_t_unit_map(&IdentityKind, value, describe), Ok(()));
        prop_assert_eq!(laws::option_t_unit_map(&SeqKind, value, describe), Ok(()));
        prop_assert_eq!(laws::option_t_unit_map(&TaskKind, value, describe), Ok(()));
    }

    #[test]
    fn prop_option_t_associativity(value in any::<Option<i32>>()) {
        prop_assert_eq!(
            laws::option_t_flat_map_associativity(&OptionKind, value, halve, positive),
            Ok(())
        );
        prop_assert_eq!(
            laws::option_t_flat_map_associativity(&VecKind, value, halve, positive),
            Ok(())
        );
        prop_assert_eq!(
            laws::option_t_flat_map_associativity(&IdentityKind, value, halve, positive),
            Ok(())
        );
        prop_assert_eq!(
            laws::option_t_flat_map_associativity(&TaskKind, value, halve, positive),
            Ok(())
        );
    }
}
