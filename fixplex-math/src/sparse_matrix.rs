//! Sparse matrix of linear equations over fixed-width numerals.
//!
//! Each row is an equation `Σ coeff·var = 0` stored as a vector of entries
//! sorted by variable. For every variable the matrix also maintains its
//! column: the sorted list of rows in which it has a non-zero coefficient.
//!
//! Zero coefficients are never stored; every mutation that cancels a term
//! removes it from both the row and the column.

use smallvec::SmallVec;

use crate::numeral::Numeral;

/// Variable identifier.
pub type VarId = usize;

/// Row identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowId(usize);

impl RowId {
    /// Create a row identifier from its index.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Index of the row.
    #[must_use]
    pub const fn id(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A term of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEntry<N> {
    /// Variable of the term.
    pub var: VarId,
    /// Non-zero coefficient.
    pub coeff: N,
}

/// An occurrence of a variable in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColEntry<N> {
    /// Row containing the variable.
    pub row: RowId,
    /// Non-zero coefficient of the variable in that row.
    pub coeff: N,
}

type Column = SmallVec<[RowId; 4]>;

/// Sparse row/column store.
#[derive(Debug, Clone, Default)]
pub struct SparseMatrix<N> {
    rows: Vec<Vec<RowEntry<N>>>,
    columns: Vec<Column>,
}

impl<N: Numeral> SparseMatrix<N> {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Remove all rows and columns.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.columns.clear();
    }

    /// Make sure column storage exists for `var`.
    pub fn ensure_var(&mut self, var: VarId) {
        if var >= self.columns.len() {
            self.columns.resize_with(var + 1, Column::new);
        }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of variables with column storage.
    pub fn num_vars(&self) -> usize {
        self.columns.len()
    }

    /// Create a new, empty row.
    pub fn mk_row(&mut self) -> RowId {
        self.rows.push(Vec::new());
        RowId(self.rows.len() - 1)
    }

    /// Entries of a row, sorted by variable.
    pub fn row_entries(&self, row: RowId) -> &[RowEntry<N>] {
        &self.rows[row.0]
    }

    /// Number of terms in a row.
    pub fn row_size(&self, row: RowId) -> usize {
        self.rows[row.0].len()
    }

    /// Coefficient of `var` in `row`, if non-zero.
    pub fn coeff(&self, row: RowId, var: VarId) -> Option<N> {
        let entries = &self.rows[row.0];
        entries
            .binary_search_by_key(&var, |e| e.var)
            .ok()
            .map(|pos| entries[pos].coeff)
    }

    /// Occurrences of `var`, in ascending row order.
    pub fn col_entries(&self, var: VarId) -> impl Iterator<Item = ColEntry<N>> + '_ {
        self.columns
            .get(var)
            .map(|col| col.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |&row| self.coeff(row, var).map(|coeff| ColEntry { row, coeff }))
    }

    /// Number of rows containing `var`.
    pub fn column_size(&self, var: VarId) -> usize {
        self.columns.get(var).map_or(0, |col| col.len())
    }

    /// Add `coeff·var` to `row`.
    pub fn add_var(&mut self, row: RowId, coeff: N, var: VarId) {
        if coeff.is_zero() {
            return;
        }
        self.ensure_var(var);
        let entries = &mut self.rows[row.0];
        match entries.binary_search_by_key(&var, |e| e.var) {
            Ok(pos) => {
                let sum = entries[pos].coeff + coeff;
                if sum.is_zero() {
                    entries.remove(pos);
                    Self::column_remove(&mut self.columns[var], row);
                } else {
                    entries[pos].coeff = sum;
                }
            }
            Err(pos) => {
                entries.insert(pos, RowEntry { var, coeff });
                Self::column_insert(&mut self.columns[var], row);
            }
        }
    }

    /// Multiply every coefficient of `row` by `factor`.
    ///
    /// An even factor may cancel terms; they are removed.
    pub fn mul(&mut self, row: RowId, factor: N) {
        if factor == N::one() {
            return;
        }
        let entries = std::mem::take(&mut self.rows[row.0]);
        let mut scaled = Vec::with_capacity(entries.len());
        for entry in entries {
            let coeff = entry.coeff * factor;
            if coeff.is_zero() {
                Self::column_remove(&mut self.columns[entry.var], row);
            } else {
                scaled.push(RowEntry {
                    var: entry.var,
                    coeff,
                });
            }
        }
        self.rows[row.0] = scaled;
    }

    /// `dst += factor·src`. The rows must differ.
    pub fn add(&mut self, dst: RowId, factor: N, src: RowId) {
        assert_ne!(dst, src, "cannot add a row to itself");
        if factor.is_zero() {
            return;
        }
        let lhs = std::mem::take(&mut self.rows[dst.0]);
        let rhs = &self.rows[src.0];
        let mut merged = Vec::with_capacity(lhs.len() + rhs.len());
        let mut added: SmallVec<[VarId; 8]> = SmallVec::new();
        let mut cancelled: SmallVec<[VarId; 8]> = SmallVec::new();

        let mut i = 0;
        let mut j = 0;
        while i < lhs.len() || j < rhs.len() {
            let take_lhs = j == rhs.len() || (i < lhs.len() && lhs[i].var < rhs[j].var);
            let take_rhs = i == lhs.len() || (j < rhs.len() && rhs[j].var < lhs[i].var);
            if take_lhs {
                merged.push(lhs[i]);
                i += 1;
            } else if take_rhs {
                let coeff = rhs[j].coeff * factor;
                if !coeff.is_zero() {
                    merged.push(RowEntry {
                        var: rhs[j].var,
                        coeff,
                    });
                    added.push(rhs[j].var);
                }
                j += 1;
            } else {
                let coeff = lhs[i].coeff + rhs[j].coeff * factor;
                if coeff.is_zero() {
                    cancelled.push(lhs[i].var);
                } else {
                    merged.push(RowEntry {
                        var: lhs[i].var,
                        coeff,
                    });
                }
                i += 1;
                j += 1;
            }
        }

        self.rows[dst.0] = merged;
        for var in added {
            Self::column_insert(&mut self.columns[var], dst);
        }
        for var in cancelled {
            Self::column_remove(&mut self.columns[var], dst);
        }
    }

    fn column_insert(column: &mut Column, row: RowId) {
        if let Err(pos) = column.binary_search(&row) {
            column.insert(pos, row);
        }
    }

    fn column_remove(column: &mut Column, row: RowId) {
        if let Ok(pos) = column.binary_search(&row) {
            column.remove(pos);
        }
    }
}
