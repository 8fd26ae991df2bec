//! Property-based tests for fixplex-math

mod interval_properties;
mod numeral_properties;
mod sparse_matrix_properties;
