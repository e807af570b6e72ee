//! Core traits for linear algebra operations
//!
//! This module defines the scalar abstraction used by [`Vector`](crate::Vector),
//! [`DenseMatrix`](crate::DenseMatrix) and
//! [`BandedSymmetricMatrix`](crate::BandedSymmetricMatrix).

use num_traits::{Float, NumAssign};
use std::fmt::Debug;

/// Trait for real scalar types that can be stored in vectors and matrices.
///
/// The banded LDLT solver relies on an ordering of the scalars (pivot signs,
/// pruning threshold), so only real floating point types implement it.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for all containers)
/// - `f32` (for memory-constrained applications)
pub trait RealField: Float + NumAssign + Send + Sync + Debug + Default + 'static {
    /// Magnitude below which a band multiplier is treated as structurally zero
    const PRUNING_TOLERANCE: Self;

    /// Smallest pivot magnitude accepted by the dense LU reference solver
    const SINGULAR_TOLERANCE: Self;

    /// Check if this is approximately zero
    #[inline]
    fn is_zero_approx(&self, tol: Self) -> bool {
        self.abs() < tol
    }
}

impl RealField for f64 {
    const PRUNING_TOLERANCE: Self = 1e-12;
    const SINGULAR_TOLERANCE: Self = 1e-30;
}

impl RealField for f32 {
    const PRUNING_TOLERANCE: Self = 1e-12;
    const SINGULAR_TOLERANCE: Self = 1e-30;
}
