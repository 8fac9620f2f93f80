//! NORM2: scalar magnitude, vector 2-norm, or largest singular value

use super::{push, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::{Error, Result};
use crate::graph::register::RegContainer;
use crate::kernel::{blas, svd};
use crate::terminal::Terminal;

/// Push the 2-norm of the argument as a real scalar
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if !v.is_finite() {
            return Err(Error::NonFiniteInput { op: "norm2" });
        }
        push(regs, Terminal::RealScalar(v.abs()));
        return Ok(());
    }
    let norm = if a.is_complex() {
        compute::<Complex64>(a.rows(), a.cols(), &convert::to_complex_dense(a)?.data())?
    } else {
        compute::<f64>(a.rows(), a.cols(), &convert::to_real_dense(a)?.data())?
    };
    push(regs, Terminal::RealScalar(norm));
    Ok(())
}

fn compute<T: Element>(rows: usize, cols: usize, data: &[T]) -> Result<f64> {
    if !blas::all_finite(data) {
        return Err(Error::NonFiniteInput { op: "norm2" });
    }
    if rows == 1 || cols == 1 {
        return Ok(blas::nrm2(data));
    }
    let (_, s, _) = svd::jacobi_svd(rows, cols, data)?;
    Ok(s.first().copied().unwrap_or(0.0))
}
