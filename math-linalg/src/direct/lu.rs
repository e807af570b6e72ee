//! LU decomposition solver
//!
//! LU factorization with partial pivoting for general dense systems. It is
//! the O(n³) reference the banded LDLT solver is checked against.

use crate::error::{LinalgError, Result};
use crate::matrix::DenseMatrix;
use crate::traits::RealField;
use crate::vector::Vector;

/// LU factorization result
///
/// Stores L and U factors along with pivot information
#[derive(Debug, Clone)]
pub struct LuFactorization<T: RealField> {
    /// Combined L and U matrices (L is unit lower triangular, stored below diagonal)
    lu: DenseMatrix<T>,
    /// Row permutation: row `i` of `lu` is row `pivots[i]` of the input
    pivots: Vec<usize>,
}

impl<T: RealField> LuFactorization<T> {
    /// Matrix dimension
    pub fn dimension(&self) -> usize {
        self.lu.rows()
    }

    /// Solve Ax = b using the pre-computed LU factorization
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>> {
        let n = self.dimension();
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: b.len(),
            });
        }

        // Row i of the factors came from row pivots[i] of A, so x = P b
        let mut x: Vector<T> = self.pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution: Ly = Pb
        for i in 0..n {
            for j in 0..i {
                let l_ij = self.lu[(i, j)];
                x[i] = x[i] - l_ij * x[j];
            }
        }

        // Backward substitution: Ux = y
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let u_ij = self.lu[(i, j)];
                x[i] = x[i] - u_ij * x[j];
            }
            let u_ii = self.lu[(i, i)];
            if u_ii.is_zero_approx(T::SINGULAR_TOLERANCE) {
                return Err(LinalgError::SingularMatrix);
            }
            x[i] /= u_ii;
        }

        Ok(x)
    }
}

/// Compute LU factorization with partial pivoting
pub fn lu_factorize<T: RealField>(a: &DenseMatrix<T>) -> Result<LuFactorization<T>> {
    let n = a.rows();
    if n != a.cols() {
        return Err(LinalgError::DimensionMismatch {
            expected: n,
            got: a.cols(),
        });
    }

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Find pivot
        let mut max_val = lu[(k, k)].abs();
        let mut max_row = k;

        for i in (k + 1)..n {
            let val = lu[(i, k)].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < T::SINGULAR_TOLERANCE {
            return Err(LinalgError::SingularMatrix);
        }

        if max_row != k {
            for j in 0..n {
                let tmp = lu[(k, j)];
                lu[(k, j)] = lu[(max_row, j)];
                lu[(max_row, j)] = tmp;
            }
            pivots.swap(k, max_row);
        }

        // Compute multipliers and eliminate
        let pivot = lu[(k, k)];
        for i in (k + 1)..n {
            let mult = lu[(i, k)] / pivot;
            lu[(i, k)] = mult;

            for j in (k + 1)..n {
                let update = mult * lu[(k, j)];
                lu[(i, j)] -= update;
            }
        }
    }

    Ok(LuFactorization { lu, pivots })
}

/// Solve Ax = b using LU decomposition
///
/// This is a convenience function that combines factorization and solve.
pub fn lu_solve<T: RealField>(a: &DenseMatrix<T>, b: &Vector<T>) -> Result<Vector<T>> {
    let factorization = lu_factorize(a)?;
    factorization.solve(b)
}
