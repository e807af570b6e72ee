//! Resizable dense vector
//!
//! A [`Vector`] owns a buffer of `capacity` scalars of which the leading
//! `len` are live. The reserve tail lets [`Vector::set_size`] grow or shrink
//! without reallocating as long as the new length stays within
//! `[capacity / 2, capacity]`.

use crate::blas_helpers::{add_inplace, inner_product, scale_inplace, sub_inplace, vector_norm};
use crate::error::{LinalgError, Result, require_non_negative};
use crate::traits::RealField;
use ndarray::Array1;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

/// Resizable vector of real scalars
///
/// Used as right-hand side and solution container by the banded LDLT solver.
#[derive(Debug)]
pub struct Vector<T: RealField = f64> {
    /// Backing buffer; its length is the capacity
    values: Vec<T>,
    /// Number of live elements
    len: usize,
}

impl<T: RealField> Vector<T> {
    /// Create a zero-filled vector of the given size
    pub fn new(size: usize) -> Self {
        Self {
            values: vec![T::zero(); size],
            len: size,
        }
    }

    /// Create a zero-filled vector from a signed size
    ///
    /// Negative sizes are rejected with [`LinalgError::InvalidDimension`].
    pub fn try_new(size: i64) -> Result<Self> {
        let size = require_non_negative("vector size", size)?;
        Ok(Self::new(size))
    }

    /// Wrap an existing buffer; capacity equals its length
    pub fn from_vec(values: Vec<T>) -> Self {
        let len = values.len();
        Self { values, len }
    }

    /// Copy the contents of an ndarray vector
    pub fn from_array(array: &Array1<T>) -> Self {
        Self::from_vec(array.to_vec())
    }

    /// Copy the live elements into an ndarray vector
    pub fn to_array(&self) -> Array1<T> {
        Array1::from_vec(self.as_slice().to_vec())
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the vector holds no live elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated capacity (always >= `len`)
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Live elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.values[..self.len]
    }

    /// Live elements as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values[..self.len]
    }

    /// Iterate over the live elements
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Change the logical size.
    ///
    /// When `capacity / 2 <= new_len <= capacity` the buffer is reused: the
    /// leading elements stay in place regardless of `preserve`, and a newly
    /// exposed tail is zeroed if `zero_init` is set (otherwise it keeps
    /// whatever the reserve held). Any other size reallocates to exactly
    /// `new_len`, copying the leading elements if `preserve` is set.
    pub fn set_size(&mut self, new_len: usize, preserve: bool, zero_init: bool) {
        let capacity = self.capacity();

        if new_len >= capacity / 2 && new_len <= capacity {
            if zero_init && new_len > self.len {
                self.values[self.len..new_len].fill(T::zero());
            }
            self.len = new_len;
            return;
        }

        // A fresh buffer is zeroed either way; `zero_init` only matters on reuse.
        let mut values = vec![T::zero(); new_len];
        if preserve {
            let keep = self.len.min(new_len);
            values[..keep].copy_from_slice(&self.values[..keep]);
        }

        self.values = values;
        self.len = new_len;
    }

    /// Zero every live element
    pub fn clear(&mut self) {
        self.as_mut_slice().fill(T::zero());
    }

    /// Bounds-checked read
    pub fn get(&self, index: usize) -> Result<T> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(LinalgError::IndexOutOfBounds {
                index,
                len: self.len,
            })
    }

    /// Bounds-checked mutable access
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(LinalgError::IndexOutOfBounds { index, len })
    }

    /// Bounds-checked write
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    fn check_same_len(&self, other: &Vector<T>) -> Result<()> {
        if self.len != other.len {
            return Err(LinalgError::DimensionMismatch {
                expected: self.len,
                got: other.len,
            });
        }
        Ok(())
    }

    /// Element-wise sum, checked
    pub fn try_add(&self, other: &Vector<T>) -> Result<Vector<T>> {
        let mut result = self.clone();
        result.try_add_assign(other)?;
        Ok(result)
    }

    /// Element-wise in-place sum, checked
    pub fn try_add_assign(&mut self, other: &Vector<T>) -> Result<()> {
        self.check_same_len(other)?;
        add_inplace(self.as_mut_slice(), other.as_slice());
        Ok(())
    }

    /// Element-wise difference, checked
    pub fn try_sub(&self, other: &Vector<T>) -> Result<Vector<T>> {
        let mut result = self.clone();
        result.try_sub_assign(other)?;
        Ok(result)
    }

    /// Element-wise in-place difference, checked
    pub fn try_sub_assign(&mut self, other: &Vector<T>) -> Result<()> {
        self.check_same_len(other)?;
        sub_inplace(self.as_mut_slice(), other.as_slice());
        Ok(())
    }

    /// Multiply by a scalar, returning a new vector
    pub fn scaled(&self, factor: T) -> Vector<T> {
        let mut result = self.clone();
        result.scale(factor);
        result
    }

    /// Multiply by a scalar in-place
    pub fn scale(&mut self, factor: T) {
        scale_inplace(self.as_mut_slice(), factor);
    }

    /// Dot product, checked
    pub fn dot(&self, other: &Vector<T>) -> Result<T> {
        self.check_same_len(other)?;
        Ok(inner_product(self.as_slice(), other.as_slice()))
    }

    /// Euclidean norm over all live elements
    pub fn norm(&self) -> T {
        vector_norm(self.as_slice())
    }

    /// Euclidean norm over the first `dims` elements
    pub fn norm_leading(&self, dims: usize) -> Result<T> {
        if dims > self.len {
            return Err(LinalgError::InvalidArgument {
                reason: "norm dimension count exceeds vector length",
            });
        }
        Ok(vector_norm(&self.values[..dims]))
    }
}

impl<T: RealField> Clone for Vector<T> {
    /// Deep copy of the live elements; the copy has no reserve.
    fn clone(&self) -> Self {
        Self::from_vec(self.as_slice().to_vec())
    }
}

impl<T: RealField> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: RealField> From<Vec<T>> for Vector<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

impl<T: RealField> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: RealField> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: RealField> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

// Operator forms panic on mismatched lengths, like ndarray's arithmetic.

impl<T: RealField> Add for &Vector<T> {
    type Output = Vector<T>;

    fn add(self, rhs: &Vector<T>) -> Vector<T> {
        self.try_add(rhs).unwrap_or_else(|e| panic!("Vector addition: {e}"))
    }
}

impl<T: RealField> AddAssign<&Vector<T>> for Vector<T> {
    fn add_assign(&mut self, rhs: &Vector<T>) {
        if let Err(e) = self.try_add_assign(rhs) {
            panic!("Vector addition: {e}");
        }
    }
}

impl<T: RealField> Sub for &Vector<T> {
    type Output = Vector<T>;

    fn sub(self, rhs: &Vector<T>) -> Vector<T> {
        self.try_sub(rhs)
            .unwrap_or_else(|e| panic!("Vector subtraction: {e}"))
    }
}

impl<T: RealField> SubAssign<&Vector<T>> for Vector<T> {
    fn sub_assign(&mut self, rhs: &Vector<T>) {
        if let Err(e) = self.try_sub_assign(rhs) {
            panic!("Vector subtraction: {e}");
        }
    }
}

impl<T: RealField> Mul<T> for &Vector<T> {
    type Output = Vector<T>;

    fn mul(self, factor: T) -> Vector<T> {
        self.scaled(factor)
    }
}

impl<T: RealField> MulAssign<T> for Vector<T> {
    fn mul_assign(&mut self, factor: T) {
        self.scale(factor);
    }
}

/// `&a * &b` is the dot product
impl<T: RealField> Mul for &Vector<T> {
    type Output = T;

    fn mul(self, rhs: &Vector<T>) -> T {
        self.dot(rhs)
            .unwrap_or_else(|e| panic!("Vector dot product: {e}"))
    }
}
