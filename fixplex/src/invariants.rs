//! Runtime well-formedness checks for the tableau.

use fixplex_math::{Numeral, RowId};

use crate::error::{FixplexError, Result};
use crate::tableau::Fixplex;

/// Check that every row is balanced and its cached value is current.
pub fn check_row_equations<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    for (i, info) in fx.rows.iter().enumerate() {
        let row = RowId::new(i);
        let mut sum = N::zero();
        let mut rest = N::zero();
        for entry in fx.matrix.row_entries(row) {
            let term = entry.coeff * fx.vars[entry.var].value;
            sum += term;
            if entry.var != info.base {
                rest += term;
            }
        }
        if !sum.is_zero() {
            return Err(format!("{row} evaluates to {sum}, not 0"));
        }
        if rest != info.value {
            return Err(format!("{row} caches value {} but evaluates to {rest}", info.value));
        }
    }
    Ok(())
}

/// Check that each row has exactly one base variable, registered both ways.
pub fn check_base_registry<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    for (i, info) in fx.rows.iter().enumerate() {
        let row = RowId::new(i);
        if fx.vars[info.base].base_row != Some(row) {
            return Err(format!("base v{} of {row} is not registered", info.base));
        }
        if fx.matrix.coeff(row, info.base) != Some(info.base_coeff) {
            return Err(format!("stale base coefficient {} in {row}", info.base_coeff));
        }
    }
    for (var, info) in fx.vars.iter().enumerate() {
        if let Some(row) = info.base_row
            && fx.rows.get(row.id()).map(|r| r.base) != Some(var)
        {
            return Err(format!("v{var} claims {row} but is not its base"));
        }
    }
    Ok(())
}

/// Check that base variables occur only in their own row.
pub fn check_tableau_form<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    for (var, info) in fx.vars.iter().enumerate() {
        let Some(row) = info.base_row else { continue };
        if let Some(other) = fx.matrix.col_entries(var).find(|e| e.row != row) {
            return Err(format!("base v{var} of {row} also occurs in {}", other.row));
        }
    }
    Ok(())
}

/// Check that every base coefficient has the fewest trailing zeros of its
/// row.
pub fn check_parity_minimality<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    for (i, info) in fx.rows.iter().enumerate() {
        let row = RowId::new(i);
        let tz = info.base_coeff.trailing_zeros();
        if let Some(entry) = fx
            .matrix
            .row_entries(row)
            .iter()
            .find(|e| e.coeff.trailing_zeros() < tz)
        {
            return Err(format!(
                "{row}: coefficient {} of v{} has fewer trailing zeros than base coefficient {}",
                entry.coeff, entry.var, info.base_coeff
            ));
        }
    }
    Ok(())
}

/// Check that every out-of-bounds variable is a queued base variable.
pub fn check_patch_queue<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    for var in 0..fx.vars.len() {
        if fx.in_bounds(var) {
            continue;
        }
        // Non-base values are only moved out of bounds by direct assignment
        // and are fixed up when a check starts.
        if fx.is_base(var) && !fx.to_patch.contains(var) {
            return Err(format!("out-of-bounds base v{var} is not queued"));
        }
    }
    if let Some(var) = fx.to_patch.iter().find(|&v| v >= fx.vars.len() || !fx.is_base(v)) {
        return Err(format!("queued v{var} is not a base variable"));
    }
    Ok(())
}

/// Run every check.
pub fn check_all<N: Numeral>(fx: &Fixplex<N>) -> std::result::Result<(), String> {
    check_base_registry(fx)?;
    check_tableau_form(fx)?;
    check_row_equations(fx)?;
    check_parity_minimality(fx)?;
    check_patch_queue(fx)?;
    Ok(())
}

impl<N: Numeral> Fixplex<N> {
    /// Check every structural invariant of the tableau.
    pub fn well_formed(&self) -> bool {
        check_all(self).is_ok()
    }

    pub(crate) fn check_well_formed(&self) -> Result<()> {
        check_all(self).map_err(FixplexError::InvariantViolation)
    }
}
