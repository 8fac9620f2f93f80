//! MTIMES: matrix product with scalar scaling fast paths

use super::{is_scalar_shape, push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::{Complex64, Element};
use crate::error::{Error, Result};
use crate::graph::register::RegContainer;
use crate::kernel::blas;
use crate::terminal::Terminal;

/// Multiply two terminals, scaling when either side is scalar-shaped
pub fn run(regs: &RegContainer, a: &Terminal, b: &Terminal) -> Result<()> {
    let complex = a.is_complex() || b.is_complex();

    if let (Some(x), Some(y)) = (scalar_of(a), scalar_of(b)) {
        let p = x * y;
        if complex {
            push(regs, Terminal::ComplexScalar(p));
        } else {
            push(regs, Terminal::RealScalar(p.re));
        }
        return Ok(());
    }

    // scalar * matrix scales elementwise
    if is_scalar_shape(a) || is_scalar_shape(b) {
        let (s, m) = if is_scalar_shape(a) { (a, b) } else { (b, a) };
        let (rows, cols) = (m.rows(), m.cols());
        if complex {
            let sv = convert::as_complex_scalar(s).ok_or(Error::UnsupportedKind {
                kind: s.kind(),
                op: "mtimes",
            })?;
            let md = convert::to_complex_dense(m)?;
            let out = md.data().iter().map(|&v| v * sv).collect();
            return push_complex_dense(regs, out, rows, cols);
        }
        let sv = convert::as_real_scalar(s).ok_or(Error::UnsupportedKind {
            kind: s.kind(),
            op: "mtimes",
        })?;
        let md = convert::to_real_dense(m)?;
        let out = md.data().iter().map(|&v| v * sv).collect();
        return push_real_dense(regs, out, rows, cols);
    }

    if a.cols() != b.rows() {
        return Err(Error::ShapeMismatch {
            op: "mtimes",
            lhs_rows: a.rows(),
            lhs_cols: a.cols(),
            rhs_rows: b.rows(),
            rhs_cols: b.cols(),
        });
    }
    let (m, k, n) = (a.rows(), a.cols(), b.cols());
    if complex {
        let out = product::<Complex64>(m, k, n, &convert::to_complex_dense(a)?.data(), &convert::to_complex_dense(b)?.data())?;
        push_complex_dense(regs, out, m, n)
    } else {
        let out = product::<f64>(m, k, n, &convert::to_real_dense(a)?.data(), &convert::to_real_dense(b)?.data())?;
        push_real_dense(regs, out, m, n)
    }
}

fn product<T: Element>(m: usize, k: usize, n: usize, a: &[T], b: &[T]) -> Result<Vec<T>> {
    let mut c = vec![T::zero(); m * n];
    blas::gemm(m, n, k, a, b, &mut c)?;
    Ok(c)
}
