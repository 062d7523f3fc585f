//! dense-matrix: a small, self-contained dense `f64` matrix.
//!
//! The crate provides one owning, resizable matrix type with elementwise
//! arithmetic, matrix products, tolerant equality, transpose, and the
//! cofactor family (determinant, cofactor matrix, inverse) computed by
//! recursive Laplace expansion.
//!
//! Every fallible operation returns a [`Result`] carrying a [`MatrixError`],
//! which [`MatrixError::kind`] maps onto invalid-argument, out-of-range and
//! logic errors. Enable the `serde` feature to (de)serialize matrices.
pub mod error;
pub mod math;

pub use error::{ErrorKind, MatrixError, Result};
pub use math::{Matrix, ACCURACY};
