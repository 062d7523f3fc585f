//! Transpose, minors, cofactor expansion and adjugate-based inversion.
//!
//! The determinant is computed by recursive Laplace expansion along the first
//! row. This costs O(n!) and is only meant for small matrices.

use log::{debug, trace};

use crate::error::{MatrixError, Result};
use crate::math::{Matrix, ACCURACY};

/// `+1` for even, `-1` for odd positions in a cofactor expansion.
#[inline]
fn sign(index: usize) -> f64 {
    if index % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

impl Matrix {
    /// Returns the `cols x rows` transpose. Does not modify `self`.
    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols(), self.rows());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let dst = result.offset(j, i);
                result.as_mut_slice()[dst] = self.as_slice()[self.offset(i, j)];
            }
        }
        result
    }

    /// Submatrix with row `deleted_row` and column `deleted_col` removed.
    ///
    /// Only called by the cofactor expansion, which guarantees in-range
    /// indices on a matrix of at least 2x2.
    pub(crate) fn minor(&self, deleted_row: usize, deleted_col: usize) -> Matrix {
        debug_assert!(self.rows() >= 2 && self.cols() >= 2);
        debug_assert!(deleted_row < self.rows() && deleted_col < self.cols());

        let mut data = Vec::with_capacity((self.rows() - 1) * (self.cols() - 1));
        for i in (0..self.rows()).filter(|&i| i != deleted_row) {
            let row = self.row_slice(i);
            data.extend_from_slice(&row[..deleted_col]);
            data.extend_from_slice(&row[deleted_col + 1..]);
        }
        Matrix::from_raw(self.rows() - 1, self.cols() - 1, data)
    }

    /// Determinant by cofactor expansion along row 0.
    ///
    /// Entries of row 0 whose magnitude does not exceed [`ACCURACY`] are
    /// treated as zero and their minors are never evaluated.
    pub fn determinant(&self) -> Result<f64> {
        self.check_square()?;
        trace!("Expanding determinant of {}x{} matrix", self.rows(), self.cols());

        if self.rows() == 1 {
            return Ok(self.as_slice()[0]);
        }

        let mut result = 0.0;
        for (j, &value) in self.as_slice()[..self.cols()].iter().enumerate() {
            if value.abs() > ACCURACY {
                result += value * self.minor(0, j).determinant()? * sign(j);
            }
        }
        Ok(result)
    }

    /// Matrix of cofactors, `(-1)^(i+j) * det(minor(i, j))`.
    ///
    /// The cofactor matrix of a 1x1 matrix is `[[1.0]]`.
    pub fn calc_complements(&self) -> Result<Matrix> {
        self.check_square()?;

        let mut result = Matrix::zeros(self.rows(), self.cols());
        if self.rows() == 1 {
            result.as_mut_slice()[0] = 1.0;
            return Ok(result);
        }

        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let dst = result.offset(i, j);
                result.as_mut_slice()[dst] = self.minor(i, j).determinant()? * sign(i + j);
            }
        }
        Ok(result)
    }

    /// Inverse via the adjugate: `adj(A) / det(A)`.
    pub fn inverse_matrix(&self) -> Result<Matrix> {
        let determinant = self.determinant()?;
        if determinant.abs() < ACCURACY {
            debug!("Refusing to invert singular matrix (det = {:e})", determinant);
            return Err(MatrixError::Singular { determinant });
        }

        debug!(
            "Inverting {}x{} matrix with det = {}",
            self.rows(),
            self.cols(),
            determinant
        );
        let mut result = self.calc_complements()?.transpose();
        result.mul_number(1.0 / determinant);
        Ok(result)
    }

    fn check_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }
}
