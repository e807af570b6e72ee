//! Level-1 kernels on contiguous slices
//!
//! These are the inner loops shared by [`Vector`](crate::Vector) arithmetic,
//! the dense matrix product and the multi right-hand-side LDLT substitution.
//! Callers are responsible for length checks; the kernels only assert them.

use crate::traits::RealField;

/// Compute inner product (x, y) = Σ x_i * y_i
#[inline]
pub fn inner_product<T: RealField>(x: &[T], y: &[T]) -> T {
    assert_eq!(
        x.len(),
        y.len(),
        "Vector lengths must match for inner product"
    );
    let mut sum = T::zero();
    for (xi, yi) in x.iter().zip(y.iter()) {
        sum += *xi * *yi;
    }
    sum
}

/// Compute vector 2-norm: ||x||_2 = sqrt(Σ x_i^2)
#[inline]
pub fn vector_norm<T: RealField>(x: &[T]) -> T {
    vector_norm_sqr(x).sqrt()
}

/// Compute vector norm squared: ||x||_2^2 = Σ x_i^2
///
/// More efficient than computing norm and squaring when the square root isn't needed.
#[inline]
pub fn vector_norm_sqr<T: RealField>(x: &[T]) -> T {
    let mut sum = T::zero();
    for xi in x.iter() {
        sum += *xi * *xi;
    }
    sum
}

/// Compute axpy: y = α * x + y
#[inline]
pub fn axpy<T: RealField>(alpha: T, x: &[T], y: &mut [T]) {
    assert_eq!(x.len(), y.len(), "Vector lengths must match for axpy");
    for (xi, yi) in x.iter().zip(y.iter_mut()) {
        *yi += alpha * *xi;
    }
}

/// Element-wise y = y + x
#[inline]
pub fn add_inplace<T: RealField>(y: &mut [T], x: &[T]) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi += *xi;
    }
}

/// Element-wise y = y - x
#[inline]
pub fn sub_inplace<T: RealField>(y: &mut [T], x: &[T]) {
    for (yi, xi) in y.iter_mut().zip(x.iter()) {
        *yi -= *xi;
    }
}

/// Compute vector scale in-place: x = α * x
#[inline]
pub fn scale_inplace<T: RealField>(x: &mut [T], alpha: T) {
    for xi in x.iter_mut() {
        *xi *= alpha;
    }
}

/// Divide every entry in-place: x = x / d
#[inline]
pub fn divide_inplace<T: RealField>(x: &mut [T], d: T) {
    for xi in x.iter_mut() {
        *xi /= d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inner_product_real() {
        let x = [1.0_f64, 2.0, 3.0];
        let y = [4.0_f64, 5.0, 6.0];

        let ip = inner_product(&x, &y);
        assert_relative_eq!(ip, 1.0 * 4.0 + 2.0 * 5.0 + 3.0 * 6.0, epsilon = 1e-10);
    }

    #[test]
    #[should_panic(expected = "Vector lengths must match")]
    fn test_inner_product_length_mismatch() {
        let _ = inner_product(&[1.0_f64, 2.0], &[1.0_f64]);
    }

    #[test]
    fn test_vector_norm_real() {
        let x = [3.0_f64, 4.0];

        let norm = vector_norm(&x);
        assert_relative_eq!(norm, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_vector_norm_zero() {
        let x = [0.0_f64, 0.0, 0.0];

        let norm = vector_norm(&x);
        assert_relative_eq!(norm, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_vector_norm_sqr() {
        let x = [3.0_f32, 4.0];

        let norm_sqr = vector_norm_sqr(&x);
        assert_relative_eq!(norm_sqr, 25.0, epsilon = 1e-6);
    }

    #[test]
    fn test_axpy() {
        let alpha = 2.0_f64;
        let x = [1.0_f64, 2.0, 3.0];
        let mut y = [1.0_f64, 1.0, 1.0];

        axpy(alpha, &x, &mut y);

        assert_relative_eq!(y[0], 3.0, epsilon = 1e-10);
        assert_relative_eq!(y[1], 5.0, epsilon = 1e-10);
        assert_relative_eq!(y[2], 7.0, epsilon = 1e-10);
    }

    #[test]
    fn test_add_sub_inplace() {
        let mut y = [1.0_f64, 2.0, 3.0];
        add_inplace(&mut y, &[1.0, 1.0, 1.0]);
        assert_eq!(y, [2.0, 3.0, 4.0]);

        sub_inplace(&mut y, &[2.0, 2.0, 2.0]);
        assert_eq!(y, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_scale_and_divide_inplace() {
        let mut x = [1.0_f64, 2.0, 3.0];

        scale_inplace(&mut x, 0.5);
        assert_relative_eq!(x[0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(x[2], 1.5, epsilon = 1e-10);

        divide_inplace(&mut x, 0.5);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-10);
    }
}
