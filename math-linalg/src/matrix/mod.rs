//! Dense and banded matrix structures
//!
//! Both matrix types share the same row-major storage with a row offset
//! table, but they interpret it differently:
//! - [`DenseMatrix`]: `(r, c)` is the true entry
//! - [`BandedSymmetricMatrix`]: `(r, offset)` is the true entry `(r, r + offset)`

mod banded;
mod dense;
pub(crate) mod storage;

pub use banded::BandedSymmetricMatrix;
pub use dense::DenseMatrix;
