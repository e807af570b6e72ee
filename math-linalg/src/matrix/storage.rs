//! Contiguous row-major storage with a row offset table
//!
//! Layout:
//! - `values`: `rows * cols` scalars, row after row
//! - `row_offsets`: index into `values` where each row starts
//!
//! The offset table is rebuilt on every reallocation so that row lookups
//! never recompute `r * cols`.

use crate::traits::RealField;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RowStorage<T: RealField> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
    row_offsets: Vec<usize>,
}

impl<T: RealField> RowStorage<T> {
    /// Allocate zero-filled storage
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        let mut storage = Self {
            rows: 0,
            cols: 0,
            values: Vec::new(),
            row_offsets: Vec::new(),
        };
        storage.alloc(rows, cols);
        storage
    }

    /// Take ownership of a row-major buffer
    pub(crate) fn from_row_major(rows: usize, cols: usize, values: Vec<T>) -> Self {
        assert_eq!(
            values.len(),
            rows * cols,
            "row-major buffer must hold rows * cols values"
        );
        Self {
            rows,
            cols,
            values,
            row_offsets: Self::offsets(rows, cols),
        }
    }

    fn offsets(rows: usize, cols: usize) -> Vec<usize> {
        (0..rows).map(|r| r * cols).collect()
    }

    /// Reallocate to a new shape; previous content is discarded
    pub(crate) fn alloc(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        self.values = vec![T::zero(); rows * cols];
        self.row_offsets = Self::offsets(rows, cols);
    }

    #[inline]
    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub(crate) fn has_shape(&self, rows: usize, cols: usize) -> bool {
        self.rows == rows && self.cols == cols
    }

    #[inline]
    pub(crate) fn row_range(&self, row: usize) -> Range<usize> {
        let start = self.row_offsets[row];
        start..start + self.cols
    }

    #[inline]
    pub(crate) fn row(&self, row: usize) -> &[T] {
        &self.values[self.row_range(row)]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [T] {
        let range = self.row_range(row);
        &mut self.values[range]
    }

    #[inline]
    pub(crate) fn get(&self, row: usize, col: usize) -> T {
        self.row(row)[col]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.row_mut(row)[col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: T) {
        self.row_mut(row)[col] = value;
    }

    /// Borrow row `target` mutably together with row `source`
    ///
    /// # Panics
    ///
    /// Panics if `target == source`.
    pub(crate) fn row_pair_mut(&mut self, target: usize, source: usize) -> (&mut [T], &[T]) {
        assert_ne!(target, source, "row pair must name two distinct rows");
        let target_range = self.row_range(target);
        let source_range = self.row_range(source);

        if target_range.start < source_range.start {
            let (head, tail) = self.values.split_at_mut(source_range.start);
            (&mut head[target_range], &tail[..self.cols])
        } else {
            let (head, tail) = self.values.split_at_mut(target_range.start);
            (&mut tail[..self.cols], &head[source_range])
        }
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn clear(&mut self) {
        self.values.fill(T::zero());
    }

    #[cfg(test)]
    pub(crate) fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }
}
