//! TRANSPOSE and CTRANSPOSE

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::Element;
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::terminal::Terminal;

/// Transpose the argument, conjugating when `conjugate` is set
pub fn run(regs: &RegContainer, a: &Terminal, conjugate: bool) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if a.is_complex() {
            let out = if conjugate { v.conj() } else { v };
            push(regs, Terminal::ComplexScalar(out));
        } else {
            push(regs, Terminal::RealScalar(v.re));
        }
        return Ok(());
    }
    let (rows, cols) = (a.rows(), a.cols());
    if a.is_complex() {
        let m = convert::to_complex_dense(a)?;
        let out = transpose_dense(rows, cols, &m.data(), conjugate);
        push_complex_dense(regs, out, cols, rows)
    } else {
        let m = convert::to_real_dense(a)?;
        let out = transpose_dense(rows, cols, &m.data(), conjugate);
        push_real_dense(regs, out, cols, rows)
    }
}

fn transpose_dense<T: Element>(rows: usize, cols: usize, a: &[T], conjugate: bool) -> Vec<T> {
    // a vector transposes by reinterpreting the shape; the buffer is
    // already in the right order
    if rows == 1 || cols == 1 {
        return if conjugate {
            a.iter().map(|v| v.conj()).collect()
        } else {
            a.to_vec()
        };
    }
    let mut out = vec![T::zero(); rows * cols];
    for j in 0..cols {
        for i in 0..rows {
            let v = a[i + j * rows];
            out[j + i * cols] = if conjugate { v.conj() } else { v };
        }
    }
    out
}
