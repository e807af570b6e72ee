//! Banded LDLT solver
//!
//! Square-root-free Cholesky factorization A = L D Lᵀ of a symmetric
//! positive definite matrix in compressed banded storage, followed by
//! forward substitution, diagonal scaling and back substitution.
//!
//! The factorization tracks, for every row `i`, a lower working bound
//! `lower[i]`: the smallest row `j` whose coupling `(j, i)` is still
//! considered non-negligible. It starts at `max(0, i - bandwidth + 1)` and
//! moves up whenever a multiplier `L(j, i)` computed at the current bound is
//! below the pruning tolerance. Inner loops start at that bound, so systems
//! whose active bandwidth is narrower than the allocated one are cheaper to
//! factor and solve.
//!
//! Cost is O(n·w²) for the factorization (less when pruning kicks in) and
//! O(n·w) per right-hand-side column for the substitution.

use crate::blas_helpers::{axpy, divide_inplace};
use crate::error::{LinalgError, Result};
use crate::matrix::storage::RowStorage;
use crate::matrix::{BandedSymmetricMatrix, DenseMatrix};
use crate::traits::RealField;
use crate::vector::Vector;

/// LDLT solver configuration
#[derive(Debug, Clone)]
pub struct LdltConfig<T> {
    /// Skip couplings whose multiplier falls below `pruning_tolerance`
    pub prune: bool,
    /// Multiplier magnitude treated as structurally zero
    pub pruning_tolerance: T,
}

impl<T: RealField> Default for LdltConfig<T> {
    fn default() -> Self {
        Self {
            prune: true,
            pruning_tolerance: T::PRUNING_TOLERANCE,
        }
    }
}

/// Per-row lower bounds discovered while factoring
#[derive(Debug)]
pub(crate) struct LowerBounds {
    pub(crate) lower: Vec<usize>,
    pub(crate) pruned: usize,
}

pub(crate) fn check_shape(rows: usize, bandwidth: usize) -> Result<()> {
    if bandwidth == 0 {
        return Err(LinalgError::InvalidDimension {
            what: "bandwidth",
            value: 0,
        });
    }
    if rows < bandwidth {
        return Err(LinalgError::BandwidthExceedsRows { rows, bandwidth });
    }
    Ok(())
}

fn check_rhs(rows: usize, rhs_rows: usize) -> Result<()> {
    if rhs_rows != rows {
        return Err(LinalgError::DimensionMismatch {
            expected: rows,
            got: rhs_rows,
        });
    }
    Ok(())
}

/// Validate a system before anything is overwritten
pub(crate) fn check_system(rows: usize, bandwidth: usize, rhs_rows: usize) -> Result<()> {
    check_shape(rows, bandwidth)?;
    check_rhs(rows, rhs_rows)
}

/// Factor `a` in place
///
/// On return offset 0 of row `i` holds `D(i)` and offset `k >= 1` holds
/// `L(i + k, i)`. The shape must have passed [`check_shape`].
pub(crate) fn decompose<T: RealField>(
    a: &mut RowStorage<T>,
    config: &LdltConfig<T>,
) -> LowerBounds {
    let rows = a.rows();
    let cols = a.cols();

    let mut lower: Vec<usize> = (0..rows)
        .map(|i| if i < cols { 0 } else { i + 1 - cols })
        .collect();
    // scratch[j] = D(j) * L(i, j) for the row being factored
    let mut scratch = vec![T::zero(); rows];
    let mut pruned = 0usize;
    let mut non_positive = 0usize;

    for i in 0..rows {
        let mut pivot = a.get(i, 0);

        for j in lower[i]..i {
            let m = a.get(j, i - j);
            scratch[j] = a.get(j, 0) * m;
            pivot -= scratch[j] * m;
        }

        a.set(i, 0, pivot);
        if pivot <= T::zero() {
            non_positive += 1;
        }

        let upper = (i + cols).min(rows);
        for j in (i + 1)..upper {
            let start = lower[i].max(lower[j]);

            let mut m = a.get(i, j - i);
            for k in start..i {
                m -= a.get(k, j - k) * scratch[k];
            }
            m /= pivot;
            a.set(i, j - i, m);

            // Only the row currently sitting at its bound may move; a gap
            // further down keeps the coupling alive.
            if config.prune && m.abs() < config.pruning_tolerance && lower[j] == i {
                lower[j] = i + 1;
                pruned += 1;
            }
        }
    }

    if non_positive > 0 {
        log::warn!(
            "LDLT: {} non-positive pivot(s), matrix is not positive definite",
            non_positive
        );
    }
    log::debug!(
        "LDLT factorization: {} rows, bandwidth {}, {} coupling(s) pruned",
        rows,
        cols,
        pruned
    );

    LowerBounds { lower, pruned }
}

/// Solve with factors produced by [`decompose`], one right-hand side
pub(crate) fn substitute<T: RealField>(factors: &RowStorage<T>, lower: &[usize], rhs: &mut [T]) {
    let rows = factors.rows();
    let cols = factors.cols();

    // L y = b
    for i in 0..rows {
        let mut acc = rhs[i];
        for j in lower[i]..i {
            acc -= factors.get(j, i - j) * rhs[j];
        }
        rhs[i] = acc;
    }

    // D z = y
    for i in 0..rows {
        rhs[i] /= factors.get(i, 0);
    }

    // Lᵀ x = z
    for i in (0..rows).rev() {
        let band = factors.row(i);
        let upper = (i + cols).min(rows);
        let mut acc = rhs[i];
        for j in (i + 1)..upper {
            acc -= band[j - i] * rhs[j];
        }
        rhs[i] = acc;
    }
}

/// Solve with factors produced by [`decompose`], every column of `rhs` at once
pub(crate) fn substitute_columns<T: RealField>(
    factors: &RowStorage<T>,
    lower: &[usize],
    rhs: &mut RowStorage<T>,
) {
    let rows = factors.rows();
    let cols = factors.cols();

    for i in 0..rows {
        for j in lower[i]..i {
            let m = factors.get(j, i - j);
            let (target, source) = rhs.row_pair_mut(i, j);
            axpy(-m, source, target);
        }
    }

    for i in 0..rows {
        divide_inplace(rhs.row_mut(i), factors.get(i, 0));
    }

    for i in (0..rows).rev() {
        let upper = (i + cols).min(rows);
        for j in (i + 1)..upper {
            let m = factors.get(i, j - i);
            let (target, source) = rhs.row_pair_mut(i, j);
            axpy(-m, source, target);
        }
    }
}

/// LDLT factorization result
///
/// Keeps the factored band together with the lower bounds discovered during
/// the factorization so that any number of right-hand sides can be solved
/// without refactoring.
#[derive(Debug, Clone)]
pub struct LdltFactorization<T: RealField> {
    /// D on offset 0, strict upper part of Lᵀ on offsets 1..
    factors: BandedSymmetricMatrix<T>,
    /// First row still coupled to each row
    lower_bounds: Vec<usize>,
    /// Number of couplings dropped by pruning
    pruned: usize,
}

impl<T: RealField> LdltFactorization<T> {
    pub(crate) fn new(
        mut matrix: BandedSymmetricMatrix<T>,
        config: &LdltConfig<T>,
    ) -> Result<Self> {
        check_shape(matrix.dimension(), matrix.bandwidth())?;
        let bounds = decompose(matrix.storage_mut(), config);
        Ok(Self {
            factors: matrix,
            lower_bounds: bounds.lower,
            pruned: bounds.pruned,
        })
    }

    /// Dimension of the factored system
    pub fn dimension(&self) -> usize {
        self.factors.dimension()
    }

    /// Bandwidth of the factored system
    pub fn bandwidth(&self) -> usize {
        self.factors.bandwidth()
    }

    /// Lower working bound of every row after pruning
    pub fn lower_bounds(&self) -> &[usize] {
        &self.lower_bounds
    }

    /// Number of couplings dropped by pruning
    pub fn pruned_entries(&self) -> usize {
        self.pruned
    }

    /// The diagonal factor D
    pub fn diagonal(&self) -> Vector<T> {
        (0..self.dimension()).map(|i| self.factors.get(i, 0)).collect()
    }

    /// Borrow the packed factors
    pub fn factors(&self) -> &BandedSymmetricMatrix<T> {
        &self.factors
    }

    /// Give back the packed factors
    pub fn into_factors(self) -> BandedSymmetricMatrix<T> {
        self.factors
    }

    /// Solve A x = b using the pre-computed factorization
    pub fn solve(&self, b: &Vector<T>) -> Result<Vector<T>> {
        let mut x = b.clone();
        self.solve_in_place(&mut x)?;
        Ok(x)
    }

    /// Overwrite `rhs` with the solution of A x = rhs
    pub fn solve_in_place(&self, rhs: &mut Vector<T>) -> Result<()> {
        check_rhs(self.dimension(), rhs.len())?;
        substitute(self.factors.storage(), &self.lower_bounds, rhs.as_mut_slice());
        Ok(())
    }

    /// Overwrite every column of `rhs` with its solution
    pub fn solve_columns(&self, rhs: &mut DenseMatrix<T>) -> Result<()> {
        check_rhs(self.dimension(), rhs.rows())?;
        substitute_columns(
            self.factors.storage(),
            &self.lower_bounds,
            rhs.storage_mut(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn diagonal_only(n: usize, bandwidth: usize) -> BandedSymmetricMatrix<f64> {
        let mut m = BandedSymmetricMatrix::new(n, bandwidth);
        for i in 0..n {
            m.set(i, 0, (i + 1) as f64);
        }
        m
    }

    #[test]
    fn test_default_config() {
        let config: LdltConfig<f64> = LdltConfig::default();
        assert!(config.prune);
        assert_eq!(config.pruning_tolerance, 1e-12);
    }

    #[test]
    fn test_initial_lower_bounds_without_pruning() {
        let config = LdltConfig {
            prune: false,
            pruning_tolerance: 1e-12,
        };
        let f = diagonal_only(6, 3).factorize(&config).unwrap();
        assert_eq!(f.lower_bounds(), &[0, 0, 0, 1, 2, 3]);
        assert_eq!(f.pruned_entries(), 0);
    }

    #[test]
    fn test_bandwidth_one_never_couples() {
        let f = diagonal_only(5, 1).factorize(&LdltConfig::default()).unwrap();
        assert_eq!(f.lower_bounds(), &[0, 1, 2, 3, 4]);
        assert_eq!(f.pruned_entries(), 0);

        let b = Vector::from_vec(vec![1.0, 4.0, 9.0, 8.0, 10.0]);
        let x = f.solve(&b).unwrap();
        for i in 0..5 {
            assert_relative_eq!(x[i], b[i] / (i + 1) as f64, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zero_band_is_pruned_to_diagonal() {
        let f = diagonal_only(6, 3).factorize(&LdltConfig::default()).unwrap();
        assert_eq!(f.lower_bounds(), &[0, 1, 2, 3, 4, 5]);
        // Every stored coupling (i, j) with i < j < i + 3 was dropped.
        assert_eq!(f.pruned_entries(), 9);
    }

    #[test]
    fn test_pruning_stops_at_live_coupling() {
        // Row 3 couples to row 1 but not to row 2.
        let mut m: BandedSymmetricMatrix = BandedSymmetricMatrix::new(4, 3);
        for i in 0..4 {
            m.set(i, 0, 4.0);
        }
        m.set_entry(1, 3, -1.0).unwrap();

        let f = m.factorize(&LdltConfig::default()).unwrap();
        // lower[3] starts at 1 and stays there: the (1, 3) multiplier is live.
        assert_eq!(f.lower_bounds()[3], 1);
        assert_eq!(f.lower_bounds()[2], 2);
    }

    #[test]
    fn test_factorization_reuse() {
        let m = BandedSymmetricMatrix::from_diagonals(&[vec![4.0; 4], vec![-1.0; 3]]).unwrap();
        let dense = m.to_dense();
        let f = m.factorize(&LdltConfig::default()).unwrap();

        for b in [vec![1.0, 0.0, 0.0, 0.0], vec![1.0, 2.0, 3.0, 4.0]] {
            let b = Vector::from_vec(b);
            let x = f.solve(&b).unwrap();
            let r = &dense.matvec(&x).unwrap() - &b;
            assert!(r.norm() < 1e-12);
        }

        assert!(f.solve(&Vector::new(3)).is_err());
        assert!(f.solve_columns(&mut DenseMatrix::new(2, 2)).is_err());
    }

    #[test]
    fn test_diagonal_holds_d() {
        let m = BandedSymmetricMatrix::from_diagonals(&[vec![4.0; 3], vec![-1.0; 2]]).unwrap();
        let f = m.factorize(&LdltConfig::default()).unwrap();
        let d = f.diagonal();
        assert_relative_eq!(d[0], 4.0, epsilon = 1e-14);
        assert_relative_eq!(d[1], 3.75, epsilon = 1e-14);
        assert_relative_eq!(d[2], 4.0 - 1.0 / 3.75, epsilon = 1e-14);
        assert_relative_eq!(f.factors().get(1, 1), -1.0 / 3.75, epsilon = 1e-14);
        assert_eq!(f.into_factors().dimension(), 3);
    }

    #[test]
    fn test_factorize_rejects_bad_shapes() {
        let err = BandedSymmetricMatrix::<f64>::new(2, 3)
            .factorize(&LdltConfig::default())
            .unwrap_err();
        assert!(matches!(err, LinalgError::BandwidthExceedsRows { .. }));

        let err = BandedSymmetricMatrix::<f64>::new(2, 0)
            .factorize(&LdltConfig::default())
            .unwrap_err();
        assert!(err.is_dimension_error());
    }

    #[test]
    fn test_indefinite_input_still_returns() {
        // No pivoting and no definiteness check: the caller owns that contract.
        let mut m: BandedSymmetricMatrix = BandedSymmetricMatrix::new(2, 1);
        m.set(0, 0, -2.0);
        m.set(1, 0, 1.0);
        let mut b = Vector::from_vec(vec![4.0, 3.0]);
        m.solve_ldlt(&mut b).unwrap();
        assert_eq!(b.as_slice(), &[-2.0, 3.0]);
    }

    #[test]
    fn test_f32_solve() {
        let mut m =
            BandedSymmetricMatrix::from_diagonals(&[vec![2.0_f32; 3], vec![0.5; 2]]).unwrap();
        let dense = m.to_dense();
        let b = Vector::from_vec(vec![1.0_f32, 1.0, 1.0]);
        let mut x = b.clone();
        m.solve_ldlt(&mut x).unwrap();
        let r = &dense.matvec(&x).unwrap() - &b;
        assert!(r.norm() < 1e-5);
    }
}
