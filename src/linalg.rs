//! Matrix primitives and direct solvers of linear systems.
//!
//! All routines are generic over the scalar type and work with `nalgebra`
//! dynamic matrices. Singularity is decided by comparing the magnitude of the
//! determinant or of a pivot with [`PIVOT_EPSILON`].
//!
//! The determinant uses recursive cofactor expansion, which is exponential in
//! the dimension. This is intended for the small systems (n <= 5) that the
//! crate targets and is not suitable for large matrices.

mod determinant;
mod elimination;
mod inverse;
mod matrix;

pub use determinant::*;
pub use elimination::*;
pub use inverse::*;
pub use matrix::*;

use thiserror::Error;

/// Threshold under which a determinant or a pivot is considered zero.
pub const PIVOT_EPSILON: f64 = 1e-10;

/// Error of a linear-algebra operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// Operands have incompatible dimensions. Shapes are `(rows, columns)`.
    #[error("shape mismatch: {left:?} and {right:?}")]
    ShapeMismatch {
        /// Shape of the left operand.
        left: (usize, usize),
        /// Shape of the right operand.
        right: (usize, usize),
    },
    /// The operation requires a square matrix.
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
    /// Rows of the input have different lengths.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        /// Zero-based index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The matrix is singular (or numerically so) and has no inverse.
    #[error("matrix is singular")]
    Singular,
    /// The system has no unique solution because a pivot vanished.
    #[error("system has no unique solution (zero pivot in column {column})")]
    NoUniqueSolution {
        /// Zero-based column whose pivot vanished.
        column: usize,
    },
    /// A diagonal entry is zero, so the iterative update is undefined.
    #[error("zero on the diagonal in row {row}")]
    ZeroDiagonal {
        /// Zero-based row index.
        row: usize,
    },
}
