//! Property-based tests for tableau maintenance
//!
//! Tests:
//! - Value updates keep rows balanced
//! - Rejected rows leave the tableau untouched
//! - Base variables stay unique

use super::{system_strategy, test_config};
use fixplex::{Fixplex, FixplexConfig, RowId};
use fixplex_math::Word4;
use num_traits::Zero;
use proptest::prelude::*;

fn row_sums(fx: &Fixplex<Word4>) -> Vec<Word4> {
    (0..fx.num_rows())
        .map(|i| {
            fx.row_terms(RowId::new(i))
                .iter()
                .fold(Word4::zero(), |acc, e| acc + e.coeff * fx.value(e.var))
        })
        .collect()
}

proptest! {
    /// Rows stay balanced under arbitrary updates of non-base variables
    #[test]
    fn updates_keep_rows_balanced(
        sys in system_strategy(),
        updates in prop::collection::vec((0usize..6, 1u64..16), 1..10)
    ) {
        let mut fx = sys.build(test_config());
        for (var, delta) in updates {
            if var >= fx.num_vars() || fx.is_base(var) {
                continue;
            }
            prop_assert!(fx.update_value(var, Word4::new(delta)).is_ok());
            prop_assert!(row_sums(&fx).iter().all(|s| s.is_zero()));
        }
        prop_assert!(fx.well_formed(), "broken tableau:\n{}", fx);
    }

    /// Rows over arbitrary variables are either accepted in solved form or
    /// rejected without side effects
    #[test]
    fn add_row_is_atomic(
        rows in prop::collection::vec(
            (0usize..5, prop::collection::vec((0usize..5, 0u64..16), 1..4)),
            1..6
        )
    ) {
        let mut fx = Fixplex::<Word4>::with_config(FixplexConfig::default().with_invariant_checks(true));
        fx.ensure_var(4);
        for (base, terms) in rows {
            let terms: Vec<_> = terms.into_iter().map(|(v, c)| (v, Word4::new(c))).collect();
            let before = fx.to_string();
            let num_rows = fx.num_rows();
            match fx.add_row(base, &terms) {
                Ok(row) => {
                    prop_assert_eq!(fx.base_row(base), Some(row));
                    prop_assert_eq!(fx.num_rows(), num_rows + 1);
                }
                Err(_) => {
                    prop_assert_eq!(fx.num_rows(), num_rows);
                    prop_assert_eq!(fx.to_string(), before);
                }
            }
            prop_assert!(fx.well_formed(), "broken tableau:\n{}", fx);
        }
    }

    /// Each row has its own base variable
    #[test]
    fn bases_are_unique(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        let _ = fx.make_feasible();
        let mut bases: Vec<_> = (0..fx.num_rows()).map(|i| fx.row_base(RowId::new(i))).collect();
        bases.sort_unstable();
        bases.dedup();
        prop_assert_eq!(bases.len(), fx.num_rows());
        prop_assert!(bases.iter().all(|&b| fx.is_base(b)));
    }
}
