//! Property-based tests for fixplex
//!
//! Random tableaux over 4-bit words are small enough to be checked against
//! exhaustive enumeration.

mod feasibility_properties;
mod tableau_properties;

use fixplex::{Fixplex, FixplexConfig, Numeral, VarId};
use fixplex_math::Word4;
use num_traits::Zero;
use proptest::prelude::*;

/// Definitional system: row `j` defines variable `inputs + j` with an odd
/// coefficient in terms of inputs and earlier definitions.
#[derive(Debug, Clone)]
pub struct System {
    pub inputs: usize,
    pub rows: Vec<(u64, Vec<(VarId, u64)>)>,
    pub bounds: Vec<(u64, u64)>,
}

impl System {
    pub fn num_vars(&self) -> usize {
        self.inputs + self.rows.len()
    }

    pub fn row_terms(&self, j: usize) -> Vec<(VarId, Word4)> {
        let (a, terms) = &self.rows[j];
        let mut row = vec![(self.inputs + j, Word4::new(*a))];
        row.extend(terms.iter().map(|&(v, c)| (v, Word4::new(c))));
        row
    }

    /// Complete an input assignment by solving each definition in order.
    pub fn extend(&self, inputs: &[Word4]) -> Vec<Word4> {
        let mut values = inputs.to_vec();
        for (a, terms) in &self.rows {
            let rest = terms
                .iter()
                .fold(Word4::zero(), |acc, &(v, c)| acc + Word4::new(c) * values[v]);
            let odd_inverse = Word4::new(*a).inverse().unwrap_or_default();
            values.push(-rest * odd_inverse);
        }
        values
    }

    pub fn satisfies_rows(&self, values: &[Word4]) -> bool {
        (0..self.rows.len()).all(|j| {
            self.row_terms(j)
                .iter()
                .fold(Word4::zero(), |acc, &(v, c)| acc + c * values[v])
                .is_zero()
        })
    }

    pub fn satisfies_bounds(&self, values: &[Word4]) -> bool {
        self.bounds.iter().zip(values).all(|(&(lo, hi), &v)| {
            fixplex_math::interval::contains(v, Word4::new(lo), Word4::new(hi))
        })
    }

    /// Exhaustively search for an in-bounds solution.
    pub fn has_solution(&self) -> bool {
        let total = 16usize.pow(self.inputs as u32);
        (0..total).any(|mut code| {
            let inputs: Vec<Word4> = (0..self.inputs)
                .map(|_| {
                    let digit = code % 16;
                    code /= 16;
                    Word4::new(digit as u64)
                })
                .collect();
            self.satisfies_bounds(&self.extend(&inputs))
        })
    }

    pub fn build(&self, config: FixplexConfig) -> Fixplex<Word4> {
        let mut fx = Fixplex::with_config(config);
        for j in 0..self.rows.len() {
            fx.add_row(self.inputs + j, &self.row_terms(j))
                .expect("definitional rows are accepted");
        }
        for (v, &(lo, hi)) in self.bounds.iter().enumerate() {
            fx.set_bounds(v, Word4::new(lo), Word4::new(hi))
                .expect("bounds on fresh tableau");
        }
        fx
    }
}

pub fn test_config() -> FixplexConfig {
    FixplexConfig::default()
        .with_max_iterations(500)
        .with_blands_rule_threshold(50)
        .with_invariant_checks(true)
}

pub fn system_strategy() -> impl Strategy<Value = System> {
    (1usize..=3, 1usize..=3).prop_flat_map(|(inputs, num_rows)| {
        let rows: Vec<_> = (0..num_rows)
            .map(|j| {
                (
                    (0u64..8).prop_map(|k| 2 * k + 1),
                    prop::collection::vec((0..inputs + j, 0u64..16), 1..=3),
                )
            })
            .collect();
        let bounds = prop::collection::vec((0u64..16, 0u64..16), inputs + num_rows);
        (Just(inputs), rows, bounds).prop_map(|(inputs, rows, bounds)| System {
            inputs,
            rows,
            bounds,
        })
    })
}
