//! Dense numeric kernels with LAPACK-shaped contracts
//!
//! Every routine is generic over [`Element`](crate::dtype::Element) so the
//! real and complex variants share one implementation. Buffers are
//! column-major. Status semantics mirror LAPACK info codes: an illegal
//! argument is a fatal [`Error`](crate::error::Error); a numerically
//! degenerate outcome (singular pivot, failed positive-definiteness, rank
//! deficiency) is a recoverable [`Degeneracy`] the caller may fall back
//! from.

pub mod blas;
pub mod cholesky;
pub mod cond;
pub mod lu;
pub mod qr;
pub mod svd;
pub mod triangular;

use crate::error::Error;
use thiserror::Error as ThisError;

/// Machine epsilon for the working precision
pub const EPS: f64 = f64::EPSILON;

/// Recoverable numeric degeneracies, the analogue of a positive LAPACK
/// info code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// A non-positive pivot during Cholesky
    NotPositiveDefinite,
    /// Effective rank below the requested one during least squares
    RankDeficient,
}

/// Kernel failure: either fatal (propagates and aborts the tree run) or a
/// degeneracy the caller is expected to interpret
#[derive(Debug, ThisError)]
pub enum KernelError {
    /// Unrecoverable failure
    #[error(transparent)]
    Fatal(#[from] Error),
    /// Recoverable numeric condition
    #[error("degenerate numeric condition: {0:?}")]
    Degenerate(Degeneracy),
}

/// Result of a kernel call that can degrade recoverably
pub type KernelResult<T> = std::result::Result<T, KernelError>;

/// Whether a solve applies the matrix or its conjugate transpose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trans {
    /// Solve with the matrix as stored
    No,
    /// Solve with the conjugate transpose
    Conj,
}
