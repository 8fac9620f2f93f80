//! PLUS: elementwise addition with scalar broadcast

use super::{is_scalar_shape, push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::graph::register::RegContainer;
use crate::terminal::Terminal;

/// Add two terminals, broadcasting a scalar over a matrix
pub fn run(regs: &RegContainer, a: &Terminal, b: &Terminal) -> Result<()> {
    if let (Some(x), Some(y)) = (scalar_of(a), scalar_of(b)) {
        let s = x + y;
        if a.is_complex() || b.is_complex() {
            push(regs, Terminal::ComplexScalar(s));
        } else {
            push(regs, Terminal::RealScalar(s.re));
        }
        return Ok(());
    }

    let (rows, cols) = broadcast_shape(a, b)?;
    if a.is_complex() || b.is_complex() {
        let out = add_dense(
            rows,
            cols,
            &convert::to_complex_dense(a)?.data(),
            is_scalar_shape(a),
            &convert::to_complex_dense(b)?.data(),
            is_scalar_shape(b),
        );
        push_complex_dense(regs, out, rows, cols)
    } else {
        let out = add_dense(
            rows,
            cols,
            &convert::to_real_dense(a)?.data(),
            is_scalar_shape(a),
            &convert::to_real_dense(b)?.data(),
            is_scalar_shape(b),
        );
        push_real_dense(regs, out, rows, cols)
    }
}

fn broadcast_shape(a: &Terminal, b: &Terminal) -> Result<(usize, usize)> {
    if is_scalar_shape(a) {
        return Ok((b.rows(), b.cols()));
    }
    if is_scalar_shape(b) || (a.rows() == b.rows() && a.cols() == b.cols()) {
        return Ok((a.rows(), a.cols()));
    }
    Err(Error::ShapeMismatch {
        op: "plus",
        lhs_rows: a.rows(),
        lhs_cols: a.cols(),
        rhs_rows: b.rows(),
        rhs_cols: b.cols(),
    })
}

fn add_dense<T: Element>(
    rows: usize,
    cols: usize,
    a: &[T],
    a_scalar: bool,
    b: &[T],
    b_scalar: bool,
) -> Vec<T> {
    let len = rows * cols;
    let mut out = Vec::with_capacity(len);
    for i in 0..len {
        let x = if a_scalar { a[0] } else { a[i] };
        let y = if b_scalar { b[0] } else { b[i] };
        out.push(x + y);
    }
    out
}
