//! NEGATE: elementwise negation

use super::{push, push_complex_dense, push_real_dense, scalar_of};
use crate::convert;
use crate::error::Result;
use crate::graph::register::RegContainer;
use crate::terminal::Terminal;

/// Negate every element of the argument
pub fn run(regs: &RegContainer, a: &Terminal) -> Result<()> {
    if let Some(v) = scalar_of(a) {
        if a.is_complex() {
            push(regs, Terminal::ComplexScalar(-v));
        } else {
            push(regs, Terminal::RealScalar(-v.re));
        }
        return Ok(());
    }
    let (rows, cols) = (a.rows(), a.cols());
    if a.is_complex() {
        let m = convert::to_complex_dense(a)?;
        let out = m.data().iter().map(|&v| -v).collect();
        push_complex_dense(regs, out, rows, cols)
    } else {
        let m = convert::to_real_dense(a)?;
        let out = m.data().iter().map(|&v| -v).collect();
        push_real_dense(regs, out, rows, cols)
    }
}
