//! Property-based tests for the sparse matrix
//!
//! Tests:
//! - Row operations agree with dense arithmetic
//! - Columns mirror the non-zero row entries

use fixplex_math::{RowId, SparseMatrix, Word4};
use num_traits::Zero;
use proptest::prelude::*;

const VARS: usize = 6;

fn dense(m: &SparseMatrix<Word4>, row: RowId) -> Vec<Word4> {
    let mut out = vec![Word4::zero(); VARS];
    for e in m.row_entries(row) {
        out[e.var] = e.coeff;
    }
    out
}

fn columns_consistent(m: &SparseMatrix<Word4>) -> bool {
    (0..VARS).all(|v| {
        let from_rows = (0..m.num_rows())
            .filter(|&r| m.coeff(RowId::new(r), v).is_some())
            .count();
        from_rows == m.column_size(v) && m.col_entries(v).count() == from_rows
    })
}

fn row_strategy() -> impl Strategy<Value = Vec<(usize, u64)>> {
    prop::collection::vec((0..VARS, 0u64..16), 0..8)
}

proptest! {
    /// `dst += factor * src` matches the dense computation
    #[test]
    fn add_matches_dense(a in row_strategy(), b in row_strategy(), factor in 0u64..16) {
        let mut m = SparseMatrix::<Word4>::new();
        m.ensure_var(VARS - 1);
        let (r0, r1) = (m.mk_row(), m.mk_row());
        for &(v, c) in &a {
            m.add_var(r0, Word4::new(c), v);
        }
        for &(v, c) in &b {
            m.add_var(r1, Word4::new(c), v);
        }
        let expected: Vec<_> = dense(&m, r0)
            .into_iter()
            .zip(dense(&m, r1))
            .map(|(x, y)| x + Word4::new(factor) * y)
            .collect();
        m.add(r0, Word4::new(factor), r1);
        prop_assert_eq!(dense(&m, r0), expected);
        prop_assert!(m.row_entries(r0).iter().all(|e| !e.coeff.is_zero()));
        prop_assert!(m.row_entries(r0).windows(2).all(|p| p[0].var < p[1].var));
        prop_assert!(columns_consistent(&m));
    }

    /// Scaling matches the dense computation and drops cancelled terms
    #[test]
    fn mul_matches_dense(a in row_strategy(), factor in 0u64..16) {
        let mut m = SparseMatrix::<Word4>::new();
        m.ensure_var(VARS - 1);
        let r = m.mk_row();
        for &(v, c) in &a {
            m.add_var(r, Word4::new(c), v);
        }
        let expected: Vec<_> = dense(&m, r).into_iter().map(|x| x * Word4::new(factor)).collect();
        m.mul(r, Word4::new(factor));
        prop_assert_eq!(dense(&m, r), expected);
        prop_assert!(m.row_entries(r).iter().all(|e| !e.coeff.is_zero()));
        prop_assert!(columns_consistent(&m));
    }
}
