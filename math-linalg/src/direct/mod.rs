//! Direct solvers for linear systems
//!
//! This module provides direct (non-iterative) solvers:
//! - [`LdltFactorization`]: banded LDLT for symmetric positive definite systems
//! - [`lu_solve`]: dense LU decomposition with partial pivoting

pub(crate) mod ldlt;
mod lu;

pub use ldlt::{LdltConfig, LdltFactorization};
pub use lu::{LuFactorization, lu_factorize, lu_solve};
