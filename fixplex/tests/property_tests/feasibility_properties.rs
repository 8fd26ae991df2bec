//! Property-based tests for feasibility checks
//!
//! Tests:
//! - Satisfiable results are models of the input rows and bounds
//! - Infeasible results are confirmed by exhaustive search
//! - Checks never break tableau invariants
//! - Repeated checks are stable

use super::{System, system_strategy, test_config};
use fixplex::{Feasibility, Fixplex, PivotStrategy};
use fixplex_math::Word4;
use proptest::prelude::*;

fn values(fx: &Fixplex<Word4>, sys: &System) -> Vec<Word4> {
    (0..sys.num_vars()).map(|v| fx.value(v)).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A satisfiable verdict comes with a model of the input system
    #[test]
    fn sat_is_a_model(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        let result = fx.make_feasible();
        prop_assert!(result.is_ok());
        if result.unwrap() == Feasibility::Satisfiable {
            let model = values(&fx, &sys);
            prop_assert!(sys.satisfies_rows(&model), "rows violated:\n{}", fx);
            prop_assert!(sys.satisfies_bounds(&model), "bounds violated:\n{}", fx);
        }
    }

    /// An infeasible verdict is never contradicted by enumeration
    #[test]
    fn infeasible_is_sound(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        if let Ok(Feasibility::Infeasible(var)) = fx.make_feasible() {
            prop_assert!(!sys.has_solution(), "v{} reported infeasible:\n{}", var, fx);
            prop_assert_eq!(fx.infeasible_var(), Some(var));
            prop_assert!(fx.infeasible_row_terms().is_some());
        }
    }

    /// Tableau invariants hold after every check
    #[test]
    fn check_preserves_invariants(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        prop_assert!(fx.well_formed());
        let _ = fx.make_feasible();
        prop_assert!(fx.well_formed(), "broken tableau:\n{}", fx);
    }

    /// Rows always hold, whatever the verdict
    #[test]
    fn rows_hold_for_any_verdict(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        let _ = fx.make_feasible();
        prop_assert!(sys.satisfies_rows(&values(&fx, &sys)));
    }

    /// A satisfiable tableau stays satisfiable without pivoting again
    #[test]
    fn sat_is_stable(sys in system_strategy()) {
        let mut fx = sys.build(test_config());
        if let Ok(Feasibility::Satisfiable) = fx.make_feasible() {
            let pivots = fx.stats().pivots;
            prop_assert_eq!(fx.make_feasible(), Ok(Feasibility::Satisfiable));
            prop_assert_eq!(fx.stats().pivots, pivots);
        }
    }

    /// Every selection strategy gives sound verdicts
    #[test]
    fn strategies_are_sound(sys in system_strategy(), seed in any::<u64>()) {
        for strategy in [PivotStrategy::GreatestError, PivotStrategy::LeastError] {
            let config = test_config().with_pivot_strategy(strategy).with_random_seed(seed);
            let mut fx = sys.build(config);
            match fx.make_feasible() {
                Ok(Feasibility::Satisfiable) => {
                    let model = values(&fx, &sys);
                    prop_assert!(sys.satisfies_rows(&model) && sys.satisfies_bounds(&model));
                }
                Ok(Feasibility::Infeasible(_)) => prop_assert!(!sys.has_solution()),
                Ok(Feasibility::Unknown) => {}
                Err(e) => prop_assert!(false, "{:?}: {}", strategy, e),
            }
        }
    }
}
