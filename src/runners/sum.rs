//! SUMROWS and SUMCOLS: axis reductions by explicit accumulation

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::dtype::Element;
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::terminal::Terminal;

/// The reduction axis, named for the extent that survives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Accumulate across each row, producing an `m x 1` column
    Rows,
    /// Accumulate down each column, producing a `1 x n` row
    Cols,
}

/// Reduce the argument along `axis` by explicit accumulation
pub fn run(regs: &RegContainer, a: &Terminal, axis: Axis) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if a.is_complex() {
            push(regs, Terminal::ComplexScalar(v));
        } else {
            push(regs, Terminal::RealScalar(v.re));
        }
        return Ok(());
    }
    let (m, n) = (a.rows(), a.cols());
    let (rows, cols) = match axis {
        Axis::Rows => (m, 1),
        Axis::Cols => (1, n),
    };
    if a.is_complex() {
        let out = reduce(m, n, &convert::to_complex_dense(a)?.data(), axis);
        push_complex_dense(regs, out, rows, cols)
    } else {
        let out = reduce(m, n, &convert::to_real_dense(a)?.data(), axis);
        push_real_dense(regs, out, rows, cols)
    }
}

fn reduce<T: Element>(m: usize, n: usize, a: &[T], axis: Axis) -> Vec<T> {
    match axis {
        Axis::Rows => {
            let mut out = vec![T::zero(); m];
            for j in 0..n {
                for i in 0..m {
                    out[i] += a[i + j * m];
                }
            }
            out
        }
        Axis::Cols => {
            let mut out = vec![T::zero(); n];
            for j in 0..n {
                for i in 0..m {
                    out[j] += a[i + j * m];
                }
            }
            out
        }
    }
}
