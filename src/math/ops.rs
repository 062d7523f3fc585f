//! Elementwise arithmetic, matrix product and the `std::ops` operator impls.
//!
//! The in-place methods validate before touching the receiver. The out-of-place
//! forms clone the left operand and apply the in-place method to the copy, so
//! operands are never modified. Operator traits cannot return a `Result`; they
//! panic with the error message on a shape mismatch, just like indexing does.
//! Use the `checked_*` methods to handle mismatches without panicking.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use log::debug;

use crate::error::{MatrixError, Result};
use crate::math::Matrix;

impl Matrix {
    /// Adds `other` element by element.
    pub fn sum_matrix(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape(other)?;
        for (a, b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a += b;
        }
        Ok(())
    }

    /// Subtracts `other` element by element.
    pub fn sub_matrix(&mut self, other: &Matrix) -> Result<()> {
        self.check_same_shape(other)?;
        for (a, b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a -= b;
        }
        Ok(())
    }

    /// Scales every element by `num`.
    pub fn mul_number(&mut self, num: f64) {
        for a in self.as_mut_slice().iter_mut() {
            *a *= num;
        }
    }

    /// Replaces `self` with the product `self * other`.
    ///
    /// Requires `self.cols() == other.rows()`; the result is
    /// `self.rows() x other.cols()`.
    pub fn mul_matrix(&mut self, other: &Matrix) -> Result<()> {
        if self.cols() != other.rows() {
            return Err(MatrixError::IncompatibleMultiplication {
                left: self.shape(),
                right: other.shape(),
            });
        }

        debug!(
            "Multiplying {}x{} by {}x{}",
            self.rows(),
            self.cols(),
            other.rows(),
            other.cols()
        );

        let mut result = Matrix::zeros(self.rows(), other.cols());
        for i in 0..self.rows() {
            for j in 0..other.cols() {
                let mut acc = 0.0;
                for k in 0..self.cols() {
                    acc += self.as_slice()[self.offset(i, k)] * other.as_slice()[other.offset(k, j)];
                }
                let dst = result.offset(i, j);
                result.as_mut_slice()[dst] = acc;
            }
        }
        *self = result;
        Ok(())
    }

    pub fn checked_add(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.sum_matrix(other)?;
        Ok(result)
    }

    pub fn checked_sub(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.sub_matrix(other)?;
        Ok(result)
    }

    pub fn checked_mul(&self, other: &Matrix) -> Result<Matrix> {
        let mut result = self.clone();
        result.mul_matrix(other)?;
        Ok(result)
    }

    pub fn scaled(&self, num: f64) -> Matrix {
        let mut result = self.clone();
        result.mul_number(num);
        result
    }

    fn check_same_shape(&self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(MatrixError::DimensionMismatch {
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }
}

fn unwrap_or_panic<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// Implements a binary operator for every owned/borrowed operand pairing by
/// delegating to a checked method.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<'a, 'b> $trait<&'b Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix {
                unwrap_or_panic(self.$checked(rhs))
            }
        }

        impl<'b> $trait<&'b Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: &'b Matrix) -> Matrix {
                (&self).$method(rhs)
            }
        }

        impl<'a> $trait<Matrix> for &'a Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                self.$method(&rhs)
            }
        }

        impl $trait<Matrix> for Matrix {
            type Output = Matrix;

            fn $method(self, rhs: Matrix) -> Matrix {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, checked_add);
impl_binary_op!(Sub, sub, checked_sub);
impl_binary_op!(Mul, mul, checked_mul);

macro_rules! impl_assign_op {
    ($trait:ident, $method:ident, $inplace:ident) => {
        impl<'b> $trait<&'b Matrix> for Matrix {
            fn $method(&mut self, rhs: &'b Matrix) {
                unwrap_or_panic(self.$inplace(rhs))
            }
        }

        impl $trait<Matrix> for Matrix {
            fn $method(&mut self, rhs: Matrix) {
                unwrap_or_panic(self.$inplace(&rhs))
            }
        }
    };
}

impl_assign_op!(AddAssign, add_assign, sum_matrix);
impl_assign_op!(SubAssign, sub_assign, sub_matrix);
impl_assign_op!(MulAssign, mul_assign, mul_matrix);

impl<'a> Mul<f64> for &'a Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f64) -> Matrix {
        self.scaled(rhs)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(mut self, rhs: f64) -> Matrix {
        self.mul_number(rhs);
        self
    }
}

impl<'b> Mul<&'b Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: &'b Matrix) -> Matrix {
        rhs.scaled(self)
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        rhs * self
    }
}

impl MulAssign<f64> for Matrix {
    fn mul_assign(&mut self, rhs: f64) {
        self.mul_number(rhs);
    }
}

impl<'a> Neg for &'a Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self.scaled(-1.0)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        self * -1.0
    }
}
