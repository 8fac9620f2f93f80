//! Per-operator runners
//!
//! A runner receives its node's result cache plus already-materialized
//! argument terminals, computes in the widest argument domain, and pushes
//! one or more owning result terminals. Scalar-shaped input takes a
//! closed-form path that never touches the matrix kernels.

pub mod inv;
pub mod lu;
pub mod mldivide;
pub mod mtimes;
pub mod negate;
pub mod norm2;
pub mod pinv;
pub mod plus;
pub mod qr;
pub mod selectresult;
pub mod sum;
pub mod svd;
pub mod transpose;

use crate::convert;
use crate::dtype::Complex64;
use crate::graph::register::RegContainer;
use crate::terminal::{DenseMatrix, Terminal};
use std::rc::Rc;

/// True for any `1x1`-shaped terminal, scalar variant or not
fn is_scalar_shape(t: &Terminal) -> bool {
    t.rows() == 1 && t.cols() == 1
}

fn push(regs: &RegContainer, t: Terminal) {
    regs.push(Rc::new(t));
}

fn push_real_dense(regs: &RegContainer, data: Vec<f64>, rows: usize, cols: usize) -> crate::error::Result<()> {
    push(regs, Terminal::RealDense(DenseMatrix::from_vec(data, rows, cols)?));
    Ok(())
}

fn push_complex_dense(
    regs: &RegContainer,
    data: Vec<Complex64>,
    rows: usize,
    cols: usize,
) -> crate::error::Result<()> {
    push(regs, Terminal::ComplexDense(DenseMatrix::from_vec(data, rows, cols)?));
    Ok(())
}

/// Scalar payload helpers shared by the runners
fn scalar_of(t: &Terminal) -> Option<Complex64> {
    if is_scalar_shape(t) {
        convert::as_complex_scalar(t)
    } else {
        None
    }
}
