//! Compressed banded symmetric matrix
//!
//! A symmetric matrix of dimension `n` with bandwidth `w` stores only the
//! main diagonal and the `w - 1` super-diagonals. True entry `(i, j)` with
//! `j >= i` and `j - i < w` lives at compressed position `(i, j - i)`, so the
//! diagonal is always offset 0 of its row. Entries further from the diagonal
//! are implicitly zero; sub-diagonal entries follow from symmetry.
//!
//! ```text
//!   true matrix (n = 4, w = 2)        compressed storage
//!   | a b . . |                       | a b |
//!   | b c d . |                       | c d |
//!   | . d e f |                       | e f |
//!   | . . f g |                       | g 0 |
//! ```
//!
//! Offsets past the last column (`i + offset >= n`) exist in storage but do
//! not correspond to any true entry.

use super::dense::DenseMatrix;
use super::storage::RowStorage;
use crate::direct::ldlt::{self, LdltConfig, LdltFactorization};
use crate::error::{LinalgError, Result};
use crate::traits::RealField;
use crate::vector::Vector;
use std::ops::{Index, IndexMut};

/// Symmetric banded matrix in compressed `(row, offset)` storage
#[derive(Debug, Clone, PartialEq)]
pub struct BandedSymmetricMatrix<T: RealField = f64> {
    storage: RowStorage<T>,
}

impl<T: RealField> BandedSymmetricMatrix<T> {
    /// Create a zero matrix of the given dimension and bandwidth
    ///
    /// Any shape can be allocated; the solver rejects `bandwidth > dimension`
    /// and `bandwidth == 0`.
    pub fn new(dimension: usize, bandwidth: usize) -> Self {
        Self {
            storage: RowStorage::new(dimension, bandwidth),
        }
    }

    /// Build from diagonals: `diagonals[0]` is the main diagonal and
    /// `diagonals[k]` the k-th super-diagonal, of length `dimension - k`
    pub fn from_diagonals(diagonals: &[Vec<T>]) -> Result<Self> {
        let dimension = diagonals.first().map_or(0, Vec::len);
        let mut m = Self::new(dimension, diagonals.len());

        for (offset, diagonal) in diagonals.iter().enumerate() {
            let expected = dimension.saturating_sub(offset);
            if diagonal.len() != expected {
                return Err(LinalgError::DimensionMismatch {
                    expected,
                    got: diagonal.len(),
                });
            }
            for (i, &value) in diagonal.iter().enumerate() {
                m.storage.set(i, offset, value);
            }
        }

        Ok(m)
    }

    /// Compress the upper band of a square dense matrix
    ///
    /// Only entries with `0 <= j - i < bandwidth` are read; the rest of the
    /// matrix is assumed to be symmetric and zero outside the band.
    pub fn from_dense(dense: &DenseMatrix<T>, bandwidth: usize) -> Result<Self> {
        let n = dense.rows();
        if dense.cols() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: n,
                got: dense.cols(),
            });
        }

        let mut m = Self::new(n, bandwidth);
        for i in 0..n {
            let upper = (i + bandwidth).min(n);
            for j in i..upper {
                m.storage.set(i, j - i, dense[(i, j)]);
            }
        }
        Ok(m)
    }

    /// Expand into the full symmetric dense matrix
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let n = self.dimension();
        let mut dense = DenseMatrix::new(n, n);
        for i in 0..n {
            let upper = (i + self.bandwidth()).min(n);
            for j in i..upper {
                let value = self.storage.get(i, j - i);
                dense[(i, j)] = value;
                dense[(j, i)] = value;
            }
        }
        dense
    }

    /// True dimension `n` of the `n x n` matrix
    pub fn dimension(&self) -> usize {
        self.storage.rows()
    }

    /// Number of stored diagonals, main diagonal included
    pub fn bandwidth(&self) -> usize {
        self.storage.cols()
    }

    /// Compressed read at `(row, offset)`, i.e. true entry `(row, row + offset)`
    pub fn get(&self, row: usize, offset: usize) -> T {
        self.storage.get(row, offset)
    }

    /// Compressed write at `(row, offset)`
    pub fn set(&mut self, row: usize, offset: usize, value: T) {
        self.storage.set(row, offset, value);
    }

    /// Stored band of `row`: diagonal first, then the super-diagonal entries
    pub fn band(&self, row: usize) -> &[T] {
        self.storage.row(row)
    }

    /// Mutable band of `row`
    pub fn band_mut(&mut self, row: usize) -> &mut [T] {
        self.storage.row_mut(row)
    }

    /// Read the true entry `(i, j)`, zero outside the band
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below `dimension()`.
    pub fn entry(&self, i: usize, j: usize) -> T {
        let n = self.dimension();
        assert!(i < n && j < n, "entry ({i}, {j}) outside a {n}x{n} matrix");
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        if hi - lo < self.bandwidth() {
            self.storage.get(lo, hi - lo)
        } else {
            T::zero()
        }
    }

    /// Write the true entry `(i, j)`; its mirror `(j, i)` shares the slot
    pub fn set_entry(&mut self, i: usize, j: usize, value: T) -> Result<()> {
        let n = self.dimension();
        if i >= n || j >= n {
            return Err(LinalgError::IndexOutOfBounds {
                index: i.max(j),
                len: n,
            });
        }
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        if hi - lo >= self.bandwidth() {
            return Err(LinalgError::OutsideBand {
                row: i,
                col: j,
                bandwidth: self.bandwidth(),
            });
        }
        self.storage.set(lo, hi - lo, value);
        Ok(())
    }

    /// Zero every stored entry
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    pub(crate) fn storage(&self) -> &RowStorage<T> {
        &self.storage
    }

    pub(crate) fn storage_mut(&mut self) -> &mut RowStorage<T> {
        &mut self.storage
    }

    /// Solve `A x = rhs` in place with the default [`LdltConfig`]
    ///
    /// On return `rhs` holds the solution and `self` holds the LDLT factors:
    /// D at offset 0 of each row and the strict upper part of Lᵀ at offsets
    /// 1.. . The matrix must not be reused as the original system afterwards.
    ///
    /// No pivoting is done; the result is only meaningful for symmetric
    /// positive definite input.
    pub fn solve_ldlt(&mut self, rhs: &mut Vector<T>) -> Result<()> {
        self.solve_ldlt_with(rhs, &LdltConfig::default())
    }

    /// [`solve_ldlt`](Self::solve_ldlt) with an explicit configuration
    pub fn solve_ldlt_with(&mut self, rhs: &mut Vector<T>, config: &LdltConfig<T>) -> Result<()> {
        ldlt::check_system(self.dimension(), self.bandwidth(), rhs.len())?;
        let bounds = ldlt::decompose(&mut self.storage, config);
        ldlt::substitute(&self.storage, &bounds.lower, rhs.as_mut_slice());
        Ok(())
    }

    /// Solve for every column of `rhs` at once, reusing one factorization
    ///
    /// Each column of `rhs` is an independent right-hand side and is replaced
    /// by its solution. `self` is overwritten with the factors as in
    /// [`solve_ldlt`](Self::solve_ldlt).
    pub fn solve_ldlt_columns(&mut self, rhs: &mut DenseMatrix<T>) -> Result<()> {
        self.solve_ldlt_columns_with(rhs, &LdltConfig::default())
    }

    /// [`solve_ldlt_columns`](Self::solve_ldlt_columns) with an explicit configuration
    pub fn solve_ldlt_columns_with(
        &mut self,
        rhs: &mut DenseMatrix<T>,
        config: &LdltConfig<T>,
    ) -> Result<()> {
        ldlt::check_system(self.dimension(), self.bandwidth(), rhs.rows())?;
        let bounds = ldlt::decompose(&mut self.storage, config);
        ldlt::substitute_columns(&self.storage, &bounds.lower, rhs.storage_mut());
        Ok(())
    }

    /// Factor the matrix once and keep the factors for repeated solves
    pub fn factorize(self, config: &LdltConfig<T>) -> Result<LdltFactorization<T>> {
        LdltFactorization::new(self, config)
    }
}

impl<T: RealField> Index<(usize, usize)> for BandedSymmetricMatrix<T> {
    type Output = T;

    /// Compressed `(row, offset)` addressing
    fn index(&self, (row, offset): (usize, usize)) -> &T {
        &self.storage.row(row)[offset]
    }
}

impl<T: RealField> IndexMut<(usize, usize)> for BandedSymmetricMatrix<T> {
    fn index_mut(&mut self, (row, offset): (usize, usize)) -> &mut T {
        self.storage.get_mut(row, offset)
    }
}
