//! PINV: Moore-Penrose pseudo-inverse through the SVD
//!
//! Unlike INV, a zero scalar pseudo-inverts to exactly zero with no
//! diagnostic; that is the defining property, not a degenerate case.

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::kernel::svd::jacobi_svd;
use crate::kernel::EPS;
use crate::terminal::Terminal;

/// Pseudo-invert the argument through its SVD
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if a.is_complex() {
            let out = if v.abs() == 0.0 { Complex64::ZERO } else { v.recip() };
            push(regs, Terminal::ComplexScalar(out));
        } else {
            let out = if v.re == 0.0 { 0.0 } else { 1.0 / v.re };
            push(regs, Terminal::RealScalar(out));
        }
        return Ok(());
    }
    let (m, n) = (a.rows(), a.cols());
    if a.is_complex() {
        let out = pseudo_invert::<Complex64>(m, n, &convert::to_complex_dense(a)?.data())?;
        push_complex_dense(regs, out, n, m)
    } else {
        let out = pseudo_invert::<f64>(m, n, &convert::to_real_dense(a)?.data())?;
        push_real_dense(regs, out, n, m)
    }
}

/// `pinv(a) = v * diag(1/s) * u^H` over the singular values above the
/// `max(m, n) * eps * s_max` cutoff
fn pseudo_invert<T: Element>(m: usize, n: usize, data: &[T]) -> Result<Vec<T>> {
    let (u, s, v) = jacobi_svd(m, n, data)?;
    let k = m.min(n);
    let smax = s.first().copied().unwrap_or(0.0);
    let cutoff = (m.max(n) as f64) * EPS * smax;
    let mut x = vec![T::zero(); n * m];
    for l in 0..k {
        if s[l] <= cutoff || s[l] == 0.0 {
            continue;
        }
        let inv = T::from_real(1.0 / s[l]);
        for j in 0..m {
            let uc = u[j + l * m].conj() * inv;
            for i in 0..n {
                let vi = v[i + l * n];
                x[i + j * n] += vi * uc;
            }
        }
    }
    Ok(x)
}
