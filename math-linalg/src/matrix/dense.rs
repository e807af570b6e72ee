//! General dense matrix
//!
//! `(r, c)` addresses the true entry at row `r`, column `c`. Resizing always
//! reallocates and zero-fills; unlike [`Vector`], no content survives.

use super::storage::RowStorage;
use crate::blas_helpers::{axpy, inner_product};
use crate::error::{LinalgError, Result, require_positive};
use crate::traits::RealField;
use crate::vector::Vector;
use ndarray::Array2;
use std::ops::{Index, IndexMut};

/// Resizable dense row-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: RealField = f64> {
    storage: RowStorage<T>,
}

impl<T: RealField> DenseMatrix<T> {
    /// Create a zero-filled matrix
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            storage: RowStorage::new(rows, cols),
        }
    }

    /// Create an identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m.storage.set(i, i, T::one());
        }
        m
    }

    /// Build a matrix from a list of equally long rows
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(LinalgError::DimensionMismatch {
                    expected: cols,
                    got: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            storage: RowStorage::from_row_major(rows.len(), cols, values),
        })
    }

    /// Copy the contents of an ndarray matrix
    pub fn from_array(array: &Array2<T>) -> Self {
        let (rows, cols) = array.dim();
        let values = array.iter().copied().collect();
        Self {
            storage: RowStorage::from_row_major(rows, cols, values),
        }
    }

    /// Copy into an ndarray matrix
    pub fn to_array(&self) -> Array2<T> {
        Array2::from_shape_fn((self.rows(), self.cols()), |(r, c)| self.storage.get(r, c))
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.storage.rows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.storage.cols()
    }

    /// Reallocate with a new row count (content is zeroed)
    pub fn set_rows(&mut self, rows: usize) -> Result<()> {
        require_positive("rows", rows)?;
        let cols = self.cols();
        self.storage.alloc(rows, cols);
        Ok(())
    }

    /// Reallocate with a new column count (content is zeroed)
    pub fn set_columns(&mut self, cols: usize) -> Result<()> {
        require_positive("columns", cols)?;
        let rows = self.rows();
        self.storage.alloc(rows, cols);
        Ok(())
    }

    /// Reallocate to a new shape (content is zeroed)
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        require_positive("rows", rows)?;
        require_positive("columns", cols)?;
        self.storage.alloc(rows, cols);
        Ok(())
    }

    /// Zero every entry
    pub fn clear(&mut self) {
        self.storage.clear();
    }

    /// Row `r` as a slice of `cols()` entries
    pub fn row(&self, r: usize) -> &[T] {
        self.storage.row(r)
    }

    /// Row `r` as a mutable slice
    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        self.storage.row_mut(r)
    }

    /// Row-major view of all entries
    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub(crate) fn storage_mut(&mut self) -> &mut RowStorage<T> {
        &mut self.storage
    }

    /// Write the transpose into `into`, reallocating it if its shape differs
    pub fn transpose_into(&self, into: &mut DenseMatrix<T>) {
        let (rows, cols) = (self.rows(), self.cols());
        if !into.storage.has_shape(cols, rows) {
            into.storage.alloc(cols, rows);
        }

        for i in 0..rows {
            for (j, &value) in self.storage.row(i).iter().enumerate() {
                into.storage.set(j, i, value);
            }
        }
    }

    /// Return the transpose as a new matrix
    pub fn transpose(&self) -> DenseMatrix<T> {
        let mut result = DenseMatrix::new(self.cols(), self.rows());
        self.transpose_into(&mut result);
        result
    }

    /// Matrix product `self * b` written into `into`
    ///
    /// `into` is reallocated to `(self.rows(), b.cols())` if its shape differs.
    pub fn multiply_into(&self, b: &DenseMatrix<T>, into: &mut DenseMatrix<T>) -> Result<()> {
        if b.rows() != self.cols() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.cols(),
                got: b.rows(),
            });
        }

        let (rows, inner, cols) = (self.rows(), self.cols(), b.cols());
        if !into.storage.has_shape(rows, cols) {
            into.storage.alloc(rows, cols);
        }

        for i in 0..rows {
            let row = self.storage.row(i);
            for j in 0..cols {
                let mut s = T::zero();
                for k in 0..inner {
                    s += row[k] * b.storage.get(k, j);
                }
                into.storage.set(i, j, s);
            }
        }

        Ok(())
    }

    /// Matrix product `self * b` as a new matrix
    pub fn multiply(&self, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
        let mut result = DenseMatrix::new(self.rows(), b.cols());
        self.multiply_into(b, &mut result)?;
        Ok(result)
    }

    /// Matrix-vector product: y = A * x
    pub fn matvec(&self, x: &Vector<T>) -> Result<Vector<T>> {
        if x.len() != self.cols() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.cols(),
                got: x.len(),
            });
        }

        Ok((0..self.rows())
            .map(|i| inner_product(self.storage.row(i), x.as_slice()))
            .collect())
    }

    /// Copy column `c` into a vector
    pub fn column(&self, c: usize) -> Vector<T> {
        (0..self.rows()).map(|r| self.storage.get(r, c)).collect()
    }

    /// Add `alpha * other` to this matrix
    pub fn add_scaled(&mut self, alpha: T, other: &DenseMatrix<T>) -> Result<()> {
        if !other.storage.has_shape(self.rows(), self.cols()) {
            return Err(LinalgError::DimensionMismatch {
                expected: self.rows() * self.cols(),
                got: other.rows() * other.cols(),
            });
        }
        for r in 0..self.rows() {
            axpy(alpha, other.storage.row(r), self.storage.row_mut(r));
        }
        Ok(())
    }
}

impl<T: RealField> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.storage.row(r)[c]
    }
}

impl<T: RealField> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut T {
        self.storage.get_mut(r, c)
    }
}
