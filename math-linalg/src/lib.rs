//! Dense linear algebra with a banded LDLT solver
//!
//! This crate provides resizable vectors and matrices together with an
//! in-place solver for symmetric positive definite banded systems.
//!
//! # Features
//!
//! - **Vector**: resizable buffer with element-wise arithmetic, dot product and norms
//! - **DenseMatrix**: row-major matrix with transpose and multiply
//! - **BandedSymmetricMatrix**: compressed `(row, offset)` storage of a symmetric band
//! - **Banded LDLT**: square-root-free Cholesky with adaptive pruning of
//!   negligible couplings, for one or many right-hand sides
//! - **LU**: dense reference solver with partial pivoting
//! - **Generic Scalar Types**: Works with f64 and f32
//!
//! # Example
//!
//! ```
//! use math_audio_linalg::{BandedSymmetricMatrix, Vector};
//!
//! // 4x4 tridiagonal system: 4 on the diagonal, -1 next to it
//! let mut a = BandedSymmetricMatrix::from_diagonals(&[vec![4.0_f64; 4], vec![-1.0; 3]])?;
//! let mut x = Vector::from_vec(vec![1.0; 4]);
//!
//! a.solve_ldlt(&mut x)?;
//! assert!((x[0] - 4.0 / 11.0).abs() < 1e-12);
//! # Ok::<(), math_audio_linalg::LinalgError>(())
//! ```

pub mod blas_helpers;
pub mod direct;
pub mod error;
pub mod matrix;
pub mod traits;
pub mod vector;

// Re-export main types
pub use error::{LinalgError, Result};
pub use matrix::{BandedSymmetricMatrix, DenseMatrix};
pub use traits::RealField;
pub use vector::Vector;

// Re-export solvers
pub use direct::{LdltConfig, LdltFactorization, LuFactorization, lu_factorize, lu_solve};
