//! Fuzz target for the fixed-width tableau
//!
//! Drives a tableau with arbitrary rows, bounds and value updates, and
//! checks that it stays well formed and that satisfiable verdicts are models.

#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fixplex::{Feasibility, Fixplex, FixplexConfig, RowId};
use fixplex_math::Word8;
use libfuzzer_sys::fuzz_target;
use num_traits::Zero;

const NUM_VARS: u8 = 8;

#[derive(Debug, Arbitrary)]
enum Op {
    AddRow { base: u8, terms: Vec<(u8, u8)> },
    SetBounds { var: u8, lo: u8, hi: u8 },
    SetValue { var: u8, value: u8 },
    Check,
}

fn check_model(fx: &Fixplex<Word8>) {
    for i in 0..fx.num_rows() {
        let row = RowId::new(i);
        let sum = fx
            .row_terms(row)
            .iter()
            .fold(Word8::zero(), |acc, e| acc + e.coeff * fx.value(e.var));
        assert!(sum.is_zero(), "{row} evaluates to {sum}");
    }
    for v in 0..fx.num_vars() {
        assert!(fx.in_bounds(v), "v{v} out of bounds");
    }
}

fuzz_target!(|data: &[u8]| {
    let mut unstructured = Unstructured::new(data);
    let ops: Vec<Op> = match unstructured.arbitrary() {
        Ok(ops) => ops,
        Err(_) => return,
    };

    let config = FixplexConfig::default()
        .with_max_iterations(1000)
        .with_invariant_checks(true);
    let mut fx = Fixplex::<Word8>::with_config(config);

    for op in ops.into_iter().take(64) {
        match op {
            Op::AddRow { base, terms } => {
                let terms: Vec<_> = terms
                    .into_iter()
                    .take(6)
                    .map(|(v, c)| ((v % NUM_VARS) as usize, Word8::new(c as u64)))
                    .collect();
                let _ = fx.add_row((base % NUM_VARS) as usize, &terms);
            }
            Op::SetBounds { var, lo, hi } => {
                let var = (var % NUM_VARS) as usize;
                fx.set_bounds(var, Word8::new(lo as u64), Word8::new(hi as u64))
                    .expect("set_bounds never fails");
            }
            Op::SetValue { var, value } => {
                let var = (var % NUM_VARS) as usize;
                if var < fx.num_vars() && !fx.is_base(var) {
                    fx.set_value(var, Word8::new(value as u64))
                        .expect("non-base assignment");
                }
            }
            Op::Check => match fx.make_feasible() {
                Ok(Feasibility::Satisfiable) => check_model(&fx),
                Ok(_) => {}
                Err(e) => panic!("tableau error: {e}"),
            },
        }
        assert!(fx.well_formed(), "broken tableau:\n{fx}");
    }
});
