//! SVD: singular value decomposition, results pushed U, S, V
//!
//! U is `m x m`, S is an `m x n` real diagonal terminal, V is `n x n`
//! (not transposed), so `U * S * V^H` reconstructs the input.

use super::{push, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::kernel::svd::{complete_basis, jacobi_svd};
use crate::terminal::{DenseMatrix, DiagonalMatrix, Terminal};

/// Factor the argument; pushes U, S, V
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        // u carries the phase so the reconstruction law holds for any sign
        let mag = v.abs();
        let u = if mag == 0.0 {
            Complex64::ONE
        } else {
            v * Complex64::from(1.0 / mag)
        };
        if a.is_complex() {
            push(regs, Terminal::ComplexScalar(u));
        } else {
            push(regs, Terminal::RealScalar(u.re));
        }
        push(regs, Terminal::RealScalar(mag));
        push(regs, Terminal::RealScalar(1.0));
        return Ok(());
    }
    let (m, n) = (a.rows(), a.cols());
    if a.is_complex() {
        let (u, s, v) = factor::<Complex64>(m, n, &convert::to_complex_dense(a)?.data())?;
        push(regs, Terminal::ComplexDense(DenseMatrix::from_vec(u, m, m)?));
        push(regs, Terminal::RealDiagonal(DiagonalMatrix::from_vec(s, m, n)?));
        push(regs, Terminal::ComplexDense(DenseMatrix::from_vec(v, n, n)?));
    } else {
        let (u, s, v) = factor::<f64>(m, n, &convert::to_real_dense(a)?.data())?;
        push(regs, Terminal::RealDense(DenseMatrix::from_vec(u, m, m)?));
        push(regs, Terminal::RealDiagonal(DiagonalMatrix::from_vec(s, m, n)?));
        push(regs, Terminal::RealDense(DenseMatrix::from_vec(v, n, n)?));
    }
    Ok(())
}

fn factor<T: Element>(m: usize, n: usize, data: &[T]) -> Result<(Vec<T>, Vec<f64>, Vec<T>)> {
    let (u_thin, s, v_thin) = jacobi_svd(m, n, data)?;
    let k = m.min(n);
    let u = complete_basis(m, k, &u_thin);
    let v = complete_basis(n, k, &v_thin);
    Ok((u, s, v))
}
