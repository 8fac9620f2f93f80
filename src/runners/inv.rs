//! INV: matrix inverse through LU
//!
//! A singular input is a recoverable condition by convention: the runner
//! warns and produces a +infinity-filled result rather than aborting the
//! tree run.

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::{Error, Result};
use crate::graph::register::RegContainer;
use crate::kernel::lu::{getrf, getrs};
use crate::kernel::{blas, cond, Trans};
use crate::terminal::Terminal;

/// Invert a square argument; singular input warns and fills with +Inf
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if v.abs() == 0.0 {
            log::warn!("inv: scalar input is zero, result is +Inf");
            if a.is_complex() {
                push(regs, Terminal::ComplexScalar(Complex64::new(f64::INFINITY, 0.0)));
            } else {
                push(regs, Terminal::RealScalar(f64::INFINITY));
            }
        } else if a.is_complex() {
            push(regs, Terminal::ComplexScalar(v.recip()));
        } else {
            push(regs, Terminal::RealScalar(1.0 / v.re));
        }
        return Ok(());
    }
    let (m, n) = (a.rows(), a.cols());
    if m != n {
        return Err(Error::NotSquare {
            op: "inv",
            rows: m,
            cols: n,
        });
    }
    if a.is_complex() {
        let out = invert::<Complex64>(n, convert::to_complex_dense(a)?.data().to_vec())?;
        push_complex_dense(regs, out, n, n)
    } else {
        let out = invert::<f64>(n, convert::to_real_dense(a)?.data().to_vec())?;
        push_real_dense(regs, out, n, n)
    }
}

fn invert<T: Element>(n: usize, mut work: Vec<T>) -> Result<Vec<T>> {
    let anorm = blas::onenorm(n, n, &work);
    let (ipiv, zero_pivot) = getrf(n, n, &mut work)?;
    let singular = match zero_pivot {
        Some(_) => true,
        None => {
            let rcond = cond::gecon(n, &work, &ipiv, anorm)?;
            1.0 + rcond == 1.0
        }
    };
    if singular {
        log::warn!("inv: matrix is singular to working precision, result is +Inf");
        return Ok(vec![T::from_real(f64::INFINITY); n * n]);
    }
    let mut x = vec![T::zero(); n * n];
    for k in 0..n {
        x[k + k * n] = T::one();
    }
    getrs(n, n, &work, &ipiv, Trans::No, &mut x)?;
    Ok(x)
}
