use thiserror::Error;

/// Coarse classification of a [`MatrixError`].
///
/// Every failure the crate reports falls in exactly one of these buckets, so
/// callers can branch on the kind without matching each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A requested dimension or buffer shape is not acceptable.
    InvalidArgument,
    /// An element index lies outside the matrix.
    OutOfRange,
    /// The operation is algebraically undefined for its operands.
    LogicError,
}

/// Errors raised by [`Matrix`](crate::Matrix) operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("invalid matrix dimensions {rows}x{cols}: rows and cols must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("different dimensions of matrices: {}x{} and {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error(
        "incompatible dimensions for multiplication: {}x{} by {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    IncompatibleMultiplication {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("determinant is zero ({determinant:e}), matrix has no inverse")]
    Singular { determinant: f64 },
}

impl MatrixError {
    /// Maps the variant onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::InvalidDimensions { .. } | MatrixError::ShapeMismatch { .. } => {
                ErrorKind::InvalidArgument
            }
            MatrixError::OutOfRange { .. } => ErrorKind::OutOfRange,
            MatrixError::DimensionMismatch { .. }
            | MatrixError::IncompatibleMultiplication { .. }
            | MatrixError::NotSquare { .. }
            | MatrixError::Singular { .. } => ErrorKind::LogicError,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;
