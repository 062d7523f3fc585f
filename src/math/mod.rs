//! The dense `Matrix` type and its operations.
//!
//! Storage, resizing and element access live in `matrix`, arithmetic and the
//! operator impls in `ops`, and the determinant family in `linalg`.
pub mod linalg;
pub mod matrix;
pub mod ops;

pub use matrix::{Matrix, ACCURACY};
