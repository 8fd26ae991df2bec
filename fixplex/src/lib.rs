//! Fixplex - simplex over fixed-width modular arithmetic
//!
//! A tableau of linear equations over `Z/2^w` whose variables carry cyclic
//! (wrap-around) bounds. [`Fixplex::make_feasible`] searches for an
//! assignment that satisfies every equation and every bound by repeatedly
//! pivoting out-of-bounds base variables, the way a bit-vector theory solver
//! propagates word-level constraints.
//!
//! The search is incomplete: it reports [`Feasibility::Satisfiable`] with a
//! model, [`Feasibility::Infeasible`] with a witness row whose bounds cannot
//! be met, or [`Feasibility::Unknown`] when it runs out of pivots or budget.
//!
//! # Examples
//!
//! ```
//! use fixplex::{Feasibility, Fixplex};
//! use fixplex_math::Word4;
//!
//! let mut fx = Fixplex::<Word4>::new();
//! let (x, y) = (0, 1);
//! // x + y = 0 (mod 16)
//! fx.add_row(x, &[(x, Word4::new(1)), (y, Word4::new(1))])?;
//! fx.set_bounds(y, Word4::new(1), Word4::new(3))?;
//!
//! assert_eq!(fx.make_feasible()?, Feasibility::Satisfiable);
//! assert_eq!(fx.value(x) + fx.value(y), Word4::new(0));
//! assert!(fx.bounds(y).contains(fx.value(y)));
//! # Ok::<(), fixplex::FixplexError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
mod feasibility;
pub mod invariants;
pub mod patch_queue;
mod pivot;
pub mod resource;
pub mod stats;
mod tableau;

pub use config::{FixplexConfig, PivotStrategy};
pub use error::{FixplexError, Result};
pub use feasibility::Feasibility;
pub use resource::{CancelHandle, LimitStatus, ResourceLimits, ResourceManager};
pub use stats::FixplexStats;
pub use tableau::Fixplex;

pub use fixplex_math::{ModInterval, Numeral, RowEntry, RowId, VarId};
