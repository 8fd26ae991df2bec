//! Error types for tableau operations.

use fixplex_math::{RowId, VarId};
use thiserror::Error;

/// Contract violations surfaced by the tableau.
///
/// The recoverable outcomes of a feasibility check are reported through
/// [`crate::Feasibility`]; these errors only describe calls that break a
/// precondition or an internal invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixplexError {
    /// The operation requires a non-base variable.
    #[error("variable v{var} is basic in row {row}")]
    BaseVariable {
        /// The offending variable.
        var: VarId,
        /// Row in which it is basic.
        row: RowId,
    },

    /// The proposed base variable of a new row is already basic.
    #[error("variable v{var} is already basic in row {row}")]
    AlreadyBase {
        /// The proposed base variable.
        var: VarId,
        /// Row in which it is basic.
        row: RowId,
    },

    /// The proposed base variable has no coefficient in the (reduced) row.
    #[error("base variable v{var} has a zero coefficient")]
    ZeroBaseCoefficient {
        /// The proposed base variable.
        var: VarId,
    },

    /// A basic variable of an existing row occurs in a new row with fewer
    /// trailing zeros than its defining coefficient.
    #[error("row cannot be reduced exactly against the definition of v{var}")]
    NonExactReduction {
        /// The colliding basic variable.
        var: VarId,
    },

    /// The base coefficient has more trailing zeros than another coefficient
    /// of its row or column.
    #[error("coefficient of v{var} does not have minimal trailing zeros")]
    NonMinimalBaseCoefficient {
        /// The proposed base variable.
        var: VarId,
    },

    /// A base value could not be recovered by exact division.
    #[error("base coefficient of row {row} does not divide the row value")]
    NonExactDivision {
        /// The row whose balance equation has no solution.
        row: RowId,
    },

    /// A well-formedness self-check failed.
    #[error("tableau invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for tableau operations.
pub type Result<T> = std::result::Result<T, FixplexError>;
