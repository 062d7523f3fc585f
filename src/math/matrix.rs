use std::fmt;
use std::ops::{Index, IndexMut};

use log::debug;

use crate::error::{MatrixError, Result};

/// Absolute tolerance used by every floating-point comparison in the crate.
pub const ACCURACY: f64 = 1e-7;

/// Side length of the matrix produced by [`Matrix::default`].
const DEFAULT_SIZE: usize = 3;

/// Dense, resizable matrix of `f64` stored row-major in one buffer.
///
/// A live matrix always has at least one row and one column. The only
/// exception is the value left behind by [`Matrix::take`], which is `0x0`
/// with no storage.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatrix"))]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-filled `rows x cols` matrix.
    ///
    /// Fails with [`MatrixError::InvalidDimensions`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dimensions(rows, cols)?;
        Ok(Self::zeros(rows, cols))
    }

    /// Creates a zero-filled `size x size` matrix.
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    /// Creates the `size x size` identity matrix.
    pub fn identity(size: usize) -> Result<Self> {
        let mut result = Self::square(size)?;
        for i in 0..size {
            result.data[i * size + i] = 1.0;
        }
        Ok(result)
    }

    /// Builds a matrix from a row-major buffer.
    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        check_dimensions(rows, cols)?;
        if data.len() != rows * cols {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Builds a matrix from a list of equally long rows.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |row| row.as_ref().len());
        check_dimensions(nrows, ncols)?;

        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            data.extend_from_slice(row.as_ref());
        }
        Self::from_shape_vec((nrows, ncols), data)
    }

    /// Unchecked zero-filled constructor for results whose shape is derived
    /// from an existing matrix.
    pub(crate) fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Wraps an existing buffer without validation. Callers must guarantee
    /// `data.len() == rows * cols`; the check only runs in debug builds.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Moves the contents out, leaving `self` as an empty `0x0` matrix.
    ///
    /// Only [`Matrix::set_dimension`] brings a moved-from matrix back to life.
    /// [`Matrix::set_rows`] and [`Matrix::set_cols`] keep the other dimension
    /// at `0` and therefore fail with `InvalidDimensions`.
    pub fn take(&mut self) -> Matrix {
        std::mem::replace(
            self,
            Matrix {
                rows: 0,
                cols: 0,
                data: Vec::new(),
            },
        )
    }

    /// Makes `self` a deep copy of `other`, reusing the buffer when the shapes
    /// already agree.
    pub fn assign_from(&mut self, other: &Matrix) {
        if std::ptr::eq(self, other) {
            return;
        }
        if self.shape() == other.shape() {
            self.data.copy_from_slice(&other.data);
        } else {
            self.rows = other.rows;
            self.cols = other.cols;
            self.data = other.data.clone();
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` only for a matrix that has been moved out of with [`Matrix::take`].
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    #[inline]
    pub(crate) fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Borrows row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row_slice(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index out of bounds");
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    /// Reads the element at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check_index(row, col)?;
        Ok(self.data[self.offset(row, col)])
    }

    /// Mutable handle to the element at `(row, col)`.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        self.check_index(row, col)?;
        let offset = self.offset(row, col);
        Ok(&mut self.data[offset])
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        self.set_dimension(rows, self.cols)
    }

    pub fn set_cols(&mut self, cols: usize) -> Result<()> {
        self.set_dimension(self.rows, cols)
    }

    /// Resizes to `rows x cols`, keeping the overlapping top-left block.
    ///
    /// Cells outside the old extent are zero; cells outside the new extent are
    /// dropped. Nothing changes if validation fails.
    pub fn set_dimension(&mut self, rows: usize, cols: usize) -> Result<()> {
        check_dimensions(rows, cols)?;
        if (rows, cols) == self.shape() {
            return Ok(());
        }

        debug!(
            "Resizing matrix from {}x{} to {}x{}",
            self.rows, self.cols, rows, cols
        );

        let mut result = Self::zeros(rows, cols);
        let keep_rows = self.rows.min(rows);
        let keep_cols = self.cols.min(cols);
        for i in 0..keep_rows {
            let src = self.offset(i, 0);
            let dst = result.offset(i, 0);
            result.data[dst..dst + keep_cols].copy_from_slice(&self.data[src..src + keep_cols]);
        }
        *self = result;
        Ok(())
    }

    /// Tolerant equality: same shape and no pair of elements differing by
    /// more than [`ACCURACY`]. A pair involving NaN never counts as a
    /// difference. Never fails.
    pub fn eq_matrix(&self, other: &Matrix) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.shape() != other.shape() {
            return false;
        }
        !self
            .data
            .iter()
            .zip(other.data.iter())
            .any(|(a, b)| (a - b).abs() > ACCURACY)
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatrixError::InvalidDimensions { rows, cols });
    }
    Ok(())
}

impl Default for Matrix {
    /// A zero-filled 3x3 matrix.
    fn default() -> Self {
        Self::zeros(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.eq_matrix(other)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        let (row, col) = index;
        if let Err(err) = self.check_index(row, col) {
            panic!("{}", err);
        }
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let (row, col) = index;
        match self.get_mut(row, col) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for (idx, value) in self.row_slice(row).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

/// Wire form used to validate deserialized matrices.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatrix> for Matrix {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        Matrix::from_shape_vec((raw.rows, raw.cols), raw.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_new_is_zero_filled() {
        let m = Matrix::new(2, 3).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.as_slice().len(), 6);
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        for (rows, cols) in [(0, 3), (3, 0), (0, 0)] {
            let err = Matrix::new(rows, cols).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
        assert!(Matrix::square(0).is_err());
    }

    #[test]
    fn test_default_is_3x3() {
        let m = Matrix::default();
        assert_eq!(m.shape(), (3, 3));
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, MatrixError::ShapeMismatch { .. }));

        let empty: [Vec<f64>; 0] = [];
        let err = Matrix::from_rows(&empty).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = a.clone();
        a[(0, 0)] = 10.0;
        assert_eq!(b[(0, 0)], 1.0);
    }

    #[test]
    fn test_take_leaves_empty() {
        let mut a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let b = a.take();
        assert_eq!(b.shape(), (2, 2));
        assert_eq!(b[(1, 0)], 3.0);
        assert_eq!(a.shape(), (0, 0));
        assert!(a.is_empty());
        assert!(a.as_slice().is_empty());

        // A moved-from matrix can be revived by resizing.
        a.set_dimension(1, 1).unwrap();
        assert_eq!(a.as_slice(), &[0.0]);
    }

    #[test]
    fn test_assign_from() {
        let mut a = Matrix::new(1, 1).unwrap();
        let b = Matrix::from_rows(&[[1.0, 2.0, 3.0]]).unwrap();
        a.assign_from(&b);
        assert_eq!(a.shape(), (1, 3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut m = Matrix::new(2, 2).unwrap();
        assert_eq!(m.get(2, 0).unwrap_err().kind(), ErrorKind::OutOfRange);
        assert_eq!(m.get(0, 2).unwrap_err().kind(), ErrorKind::OutOfRange);
        *m.get_mut(1, 1).unwrap() = 5.0;
        assert_eq!(m.get(1, 1).unwrap(), 5.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_panics_out_of_range() {
        let m = Matrix::new(2, 2).unwrap();
        let _ = m[(0, 5)];
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        m.set_dimension(3, 3).unwrap();
        let expected =
            Matrix::from_rows(&[[1.0, 2.0, 0.0], [3.0, 4.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        assert_eq!(m, expected);

        m.set_dimension(1, 1).unwrap();
        assert_eq!(m.as_slice(), &[1.0]);
    }

    #[test]
    fn test_set_rows_and_cols() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        m.set_cols(3).unwrap();
        assert_eq!(m.row_slice(1), &[3.0, 4.0, 0.0]);
        m.set_rows(1).unwrap();
        assert_eq!(m.shape(), (1, 3));
        assert_eq!(m.row_slice(0), &[1.0, 2.0, 0.0]);
    }

    #[test]
    fn test_resize_invalid_keeps_state() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        assert!(m.set_rows(0).is_err());
        assert!(m.set_cols(0).is_err());
        assert_eq!(m.shape(), (1, 2));
        assert_eq!(m.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_equality_tolerance() {
        let a = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        let close = Matrix::from_rows(&[[1.0 + 1e-8, 2.0 - 1e-8]]).unwrap();
        let far = Matrix::from_rows(&[[1.0 + 1e-6, 2.0]]).unwrap();
        assert!(a.eq_matrix(&a));
        assert_eq!(a, close);
        assert_ne!(a, far);
        assert_ne!(a, a.transpose());
    }

    #[test]
    fn test_equality_ignores_nan_pairs() {
        let nan = Matrix::from_rows(&[[f64::NAN, 2.0]]).unwrap();
        let one = Matrix::from_rows(&[[1.0, 2.0]]).unwrap();
        assert!(nan.eq_matrix(&one));
        assert_eq!(one, nan);

        let far = Matrix::from_rows(&[[f64::NAN, 3.0]]).unwrap();
        assert_ne!(nan, far);
    }

    #[test]
    fn test_moved_from_resize_needs_both_dimensions() {
        let mut m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        let _ = m.take();
        assert_eq!(m.set_rows(2).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(m.set_cols(2).unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert!(m.is_empty());

        m.set_dimension(2, 2).unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.5]]).unwrap();
        assert_eq!(m.to_string(), "[[1, 2],\n [3, 4.5]]");
    }
}
