//! QR: Householder decomposition, results pushed Q then R

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::kernel::qr::{assemble_q, geqrf};
use crate::terminal::Terminal;

/// Factor the argument; pushes Q then R
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        push(regs, Terminal::RealScalar(1.0));
        if a.is_complex() {
            push(regs, Terminal::ComplexScalar(v));
        } else {
            push(regs, Terminal::RealScalar(v.re));
        }
        return Ok(());
    }
    let (m, n) = (a.rows(), a.cols());
    if a.is_complex() {
        let (q, r) = factor::<Complex64>(m, n, convert::to_complex_dense(a)?.data().to_vec())?;
        push_complex_dense(regs, q, m, m)?;
        push_complex_dense(regs, r, m, n)
    } else {
        let (q, r) = factor::<f64>(m, n, convert::to_real_dense(a)?.data().to_vec())?;
        push_real_dense(regs, q, m, m)?;
        push_real_dense(regs, r, m, n)
    }
}

/// Full-size factors: Q is `m x m` unitary, R is `m x n` upper trapezoidal
fn factor<T: Element>(m: usize, n: usize, mut work: Vec<T>) -> Result<(Vec<T>, Vec<T>)> {
    let refl = geqrf(m, n, &mut work)?;
    let q = assemble_q(m, &work, &refl);
    let mut r = vec![T::zero(); m * n];
    for j in 0..n {
        for i in 0..=j.min(m - 1) {
            r[i + j * m] = work[i + j * m];
        }
    }
    Ok((q, r))
}
