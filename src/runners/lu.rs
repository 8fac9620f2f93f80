//! LU: partial-pivot decomposition, results pushed L then U

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::kernel::lu::{getrf, unpack_lu};
use crate::terminal::Terminal;

/// Factor the argument; pushes L then U
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if v.abs() == 0.0 {
            log::warn!("lu: scalar input is zero, factorization is singular");
        }
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
        let (l, u) = factor::<Complex64>(m, n, convert::to_complex_dense(a)?.data().to_vec())?;
        push_complex_dense(regs, l, m, m.min(n))?;
        push_complex_dense(regs, u, m.min(n), n)
    } else {
        let (l, u) = factor::<f64>(m, n, convert::to_real_dense(a)?.data().to_vec())?;
        push_real_dense(regs, l, m, m.min(n))?;
        push_real_dense(regs, u, m.min(n), n)
    }
}

/// The permutation is folded into L so that `l * u` reconstructs the input
fn factor<T: Element>(m: usize, n: usize, mut work: Vec<T>) -> Result<(Vec<T>, Vec<T>)> {
    let (ipiv, zero_pivot) = getrf(m, n, &mut work)?;
    if let Some(col) = zero_pivot {
        log::warn!("lu: exact zero pivot in column {col}, matrix is singular");
    }
    Ok(unpack_lu(m, n, &work, &ipiv))
}
