//! Fixplex Math - numerals and sparse matrices for the fixed-width tableau
//!
//! This crate provides the arithmetic substrate consumed by the `fixplex`
//! tableau:
//! - [`Numeral`]: wrap-around arithmetic modulo `2^w` on top of the
//!   `num-traits` identities and wrapping operations, with overflow-aware
//!   signed operations, modular inverses and exact division
//! - [`Word`]: a `W`-bit implementation of [`Numeral`] for `1 <= W <= 64`
//! - [`ModInterval`]: cyclic intervals used as variable bounds
//! - [`SparseMatrix`]: rows of sparse linear equations with column indices
//!
//! # Examples
//!
//! ```
//! use fixplex_math::{ModInterval, Numeral, Word4};
//!
//! let three = Word4::new(3);
//! assert_eq!(three.inverse(), Some(Word4::new(11)));
//! assert_eq!(Word4::new(6).div_exact(Word4::new(2)), Some(Word4::new(3)));
//!
//! let wrapped = ModInterval::new(Word4::new(14), Word4::new(2));
//! assert!(wrapped.contains(Word4::new(15)));
//! assert!(!wrapped.contains(Word4::new(5)));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod interval;
pub mod numeral;
pub mod sparse_matrix;

pub use interval::ModInterval;
pub use numeral::{Numeral, Word, Word4, Word8, Word16, Word32, Word64};
pub use sparse_matrix::{ColEntry, RowEntry, RowId, SparseMatrix, VarId};
