//! Error types for vector, matrix and solver operations.
//!
//! Every precondition violation is reported through [`LinalgError`]. The
//! variants fall into two families: illegal arguments (bad dimensions,
//! mismatched operands, band violations) and out-of-range element indices.

use thiserror::Error;

/// Errors that can occur in vector, matrix and solver operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    /// A dimension is zero or negative where at least 1 is required.
    #[error("invalid {what}: {value} (must be >= 1)")]
    InvalidDimension {
        /// Which dimension was rejected ("rows", "columns", "size", ...)
        what: &'static str,
        /// The rejected value
        value: i64,
    },

    /// Operand sizes do not match.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Actual size provided
        got: usize,
    },

    /// The banded interpretation needs at least as many rows as stored bands.
    #[error("bandwidth {bandwidth} exceeds row count {rows}")]
    BandwidthExceedsRows {
        /// True dimension of the banded matrix
        rows: usize,
        /// Number of stored diagonals
        bandwidth: usize,
    },

    /// A write targets an entry outside the stored band.
    #[error("entry ({row}, {col}) lies outside a band of width {bandwidth}")]
    OutsideBand {
        /// Row of the rejected entry
        row: usize,
        /// Column of the rejected entry
        col: usize,
        /// Number of stored diagonals
        bandwidth: usize,
    },

    /// Any other illegal argument.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human readable reason
        reason: &'static str,
    },

    /// An element index lies outside the live range.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The rejected index
        index: usize,
        /// Live length at the time of access
        len: usize,
    },

    /// The dense reference solver met a zero pivot.
    #[error("matrix is singular or nearly singular")]
    SingularMatrix,
}

/// A specialized `Result` type for linear algebra operations.
pub type Result<T> = std::result::Result<T, LinalgError>;

impl LinalgError {
    /// Returns `true` for every illegal-argument condition.
    ///
    /// This is everything except `IndexOutOfBounds` and `SingularMatrix`.
    pub fn is_illegal_argument(&self) -> bool {
        matches!(
            self,
            LinalgError::InvalidDimension { .. }
                | LinalgError::DimensionMismatch { .. }
                | LinalgError::BandwidthExceedsRows { .. }
                | LinalgError::OutsideBand { .. }
                | LinalgError::InvalidArgument { .. }
        )
    }

    /// Returns `true` if this is an out-of-range element access.
    pub fn is_index_error(&self) -> bool {
        matches!(self, LinalgError::IndexOutOfBounds { .. })
    }

    /// Returns `true` if this is a shape-related error.
    ///
    /// This includes `InvalidDimension`, `DimensionMismatch` and
    /// `BandwidthExceedsRows`.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            LinalgError::InvalidDimension { .. }
                | LinalgError::DimensionMismatch { .. }
                | LinalgError::BandwidthExceedsRows { .. }
        )
    }
}

/// Validate that a dimension is at least 1.
pub(crate) fn require_positive(what: &'static str, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(LinalgError::InvalidDimension { what, value: 0 });
    }
    Ok(value)
}

/// Validate a signed size coming from an untyped source.
pub(crate) fn require_non_negative(what: &'static str, value: i64) -> Result<usize> {
    usize::try_from(value).map_err(|_| LinalgError::InvalidDimension { what, value })
}
