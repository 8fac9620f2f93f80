//! Error types for numdag

use crate::graph::NodeKind;
use thiserror::Error;

/// Result type alias using numdag's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions that abort a whole tree evaluation.
///
/// Recoverable numeric conditions (singular pivots, rank deficiency,
/// failed positive-definiteness, bad condition estimates) never appear
/// here: they are interpreted at the point of detection and advance a
/// fallback cascade or produce a sentinel result instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Operand shapes do not conform for an operation
    #[error("Shapes do not conform for '{op}': [{lhs_rows}x{lhs_cols}] vs [{rhs_rows}x{rhs_cols}]")]
    ShapeMismatch {
        /// The operation name
        op: &'static str,
        /// Left-hand side rows
        lhs_rows: usize,
        /// Left-hand side cols
        lhs_cols: usize,
        /// Right-hand side rows
        rhs_rows: usize,
        /// Right-hand side cols
        rhs_cols: usize,
    },

    /// Operation requires a square matrix
    #[error("Operation '{op}' requires a square matrix, got [{rows}x{cols}]")]
    NotSquare {
        /// The operation name
        op: &'static str,
        /// Row count
        rows: usize,
        /// Column count
        cols: usize,
    },

    /// A terminal kind has no runner or conversion for an operation
    #[error("Unsupported terminal kind {kind:?} for operation '{op}'")]
    UnsupportedKind {
        /// The offending kind
        kind: NodeKind,
        /// The operation name
        op: &'static str,
    },

    /// Requested promotion would narrow precision or drop the imaginary part
    #[error("Cannot convert {from:?} to {to:?}: conversion would narrow")]
    NarrowingConversion {
        /// Source kind
        from: NodeKind,
        /// Target kind
        to: NodeKind,
    },

    /// Invalid argument provided at node construction or dispatch
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Kernel call rejected its arguments (negative dimension, bad leading
    /// dimension); equivalent of a negative LAPACK info code
    #[error("Illegal kernel argument in '{kernel}': {reason}")]
    IllegalKernelArgument {
        /// The kernel name
        kernel: &'static str,
        /// Reason for rejection
        reason: String,
    },

    /// A kernel demanded finite input and found Inf/NaN
    #[error("Non-finite value in input to '{op}'")]
    NonFiniteInput {
        /// The operation name
        op: &'static str,
    },

    /// An iterative factorization failed to converge
    #[error("Kernel '{kernel}' failed to converge")]
    ConvergenceFailure {
        /// The kernel name
        kernel: &'static str,
    },

    /// Register reference count decremented below zero
    #[error("Register reference count underflow")]
    RegisterUnderflow,

    /// A select index points past the producer's register slots
    #[error("Result index {index} out of range: node produced {len} result(s)")]
    ResultIndexOutOfRange {
        /// The requested slot
        index: usize,
        /// Number of slots produced
        len: usize,
    },

    /// Internal consistency failure that should be unreachable
    #[error("Internal error: {0}")]
    Internal(String),
}
