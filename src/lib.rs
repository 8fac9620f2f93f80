//! # numdag
//!
//! **A DAG-based expression evaluator for linear algebra.**
//!
//! Client code builds a directed acyclic graph of operator nodes over
//! terminal data nodes (real/complex scalars, dense, diagonal and sparse
//! matrices) and evaluates it to a single terminal result. Evaluation
//! linearizes the DAG into a dependency-respecting execution list, then
//! dispatches each node once to a type-specialized runner; shared
//! subexpressions are computed once and read from their node's register
//! by every consumer.
//!
//! ## Operators
//!
//! - **Elementwise**: PLUS, NEGATE
//! - **Structure**: TRANSPOSE, CTRANSPOSE, SUMROWS, SUMCOLS
//! - **Products and norms**: MTIMES, NORM2
//! - **Factorizations**: LU, QR, SVD (multi-output, via SELECTRESULT)
//! - **Solves**: INV, PINV, and the cascading MLDIVIDE left-division,
//!   which probes triangular / Hermitian / general structure and falls
//!   back through Cholesky, LU, QR least squares and an SVD minimum-norm
//!   solve, each gated by a reciprocal condition estimate
//!
//! ## Quick Start
//!
//! ```rust
//! use numdag::graph::{run_tree, Node};
//! use numdag::terminal::{DenseMatrix, Terminal};
//!
//! # fn main() -> numdag::error::Result<()> {
//! let a = Node::term(Terminal::RealDense(DenseMatrix::from_vec(
//!     vec![4.0, 2.0, 2.0, 3.0],
//!     2,
//!     2,
//! )?));
//! let b = Node::term(Terminal::RealDense(DenseMatrix::from_vec(
//!     vec![6.0, 5.0],
//!     2,
//!     1,
//! )?));
//! let x = run_tree(&Node::mldivide(a, b))?;
//! assert_eq!(x.rows(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! Evaluation is strictly single-threaded and synchronous; registers use
//! plain `Rc`/`Cell` reference counts, never atomics.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub(crate) mod convert;
pub mod dtype;
pub mod error;
pub mod fuzzy;
pub mod graph;
pub(crate) mod kernel;
pub(crate) mod runners;
pub mod terminal;

pub use dtype::{Complex64, Element};
pub use error::{Error, Result};
pub use graph::{run_tree, ExecutionList, Node, NodeKind};
pub use terminal::Terminal;
