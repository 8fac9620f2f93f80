//! Widening conversions that materialize terminals as dense matrices
//!
//! Runners are implemented for dense (and scalar) combinations; anything
//! else is promoted here first. Promoted copies allocate their buffers
//! through a [`Register`](crate::graph::register::Register) so the data
//! lives exactly as long as the terminals referencing it.

use crate::dtype::{promotion, Complex64};
use crate::error::{Error, Result};
use crate::graph::register::RegisterHandle;
use crate::graph::NodeKind;
use crate::terminal::{DenseMatrix, Storage, Terminal};

/// Widen `t` to a real dense matrix.
///
/// Fails with [`Error::NarrowingConversion`] for complex input; taking a
/// real part is an explicit operation, never promotion.
pub fn to_real_dense(t: &Terminal) -> Result<DenseMatrix<f64>> {
    if !promotion::can_convert(t.kind(), NodeKind::RealDense) {
        return Err(Error::NarrowingConversion {
            from: t.kind(),
            to: NodeKind::RealDense,
        });
    }
    let (rows, cols) = (t.rows(), t.cols());
    let handle: RegisterHandle<f64> = RegisterHandle::allocate(rows * cols);
    {
        let mut buf = handle.data_mut();
        match t {
            Terminal::RealScalar(v) => buf[0] = *v,
            Terminal::IntegerScalar(v) => buf[0] = f64::from(*v),
            Terminal::RealDense(m) | Terminal::Logical(m) => buf.copy_from_slice(&m.data()),
            Terminal::RealDiagonal(m) => {
                for (k, &v) in m.data().iter().enumerate() {
                    buf[k + k * rows] = v;
                }
            }
            Terminal::RealSparse(m) => {
                let vals = m.data();
                for j in 0..cols {
                    for p in m.col_ptr()[j]..m.col_ptr()[j + 1] {
                        buf[m.row_idx()[p] + j * rows] = vals[p];
                    }
                }
            }
            // excluded by the can_convert gate above
            _ => {
                return Err(Error::Internal(format!(
                    "conversion table admitted {} to RealDense",
                    t.kind()
                )))
            }
        }
    }
    DenseMatrix::new(rows, cols, Storage::Reg(handle))
}

/// Widen `t` to a complex dense matrix. Every terminal kind converts.
pub fn to_complex_dense(t: &Terminal) -> Result<DenseMatrix<Complex64>> {
    let (rows, cols) = (t.rows(), t.cols());
    let handle: RegisterHandle<Complex64> = RegisterHandle::allocate(rows * cols);
    {
        let mut buf = handle.data_mut();
        match t {
            Terminal::RealScalar(v) => buf[0] = Complex64::new(*v, 0.0),
            Terminal::ComplexScalar(v) => buf[0] = *v,
            Terminal::IntegerScalar(v) => buf[0] = Complex64::new(f64::from(*v), 0.0),
            Terminal::RealDense(m) | Terminal::Logical(m) => {
                for (dst, &v) in buf.iter_mut().zip(m.data().iter()) {
                    *dst = Complex64::new(v, 0.0);
                }
            }
            Terminal::ComplexDense(m) => buf.copy_from_slice(&m.data()),
            Terminal::RealDiagonal(m) => {
                for (k, &v) in m.data().iter().enumerate() {
                    buf[k + k * rows] = Complex64::new(v, 0.0);
                }
            }
            Terminal::ComplexDiagonal(m) => {
                for (k, &v) in m.data().iter().enumerate() {
                    buf[k + k * rows] = v;
                }
            }
            Terminal::RealSparse(m) => {
                let vals = m.data();
                for j in 0..cols {
                    for p in m.col_ptr()[j]..m.col_ptr()[j + 1] {
                        buf[m.row_idx()[p] + j * rows] = Complex64::new(vals[p], 0.0);
                    }
                }
            }
            Terminal::ComplexSparse(m) => {
                let vals = m.data();
                for j in 0..cols {
                    for p in m.col_ptr()[j]..m.col_ptr()[j + 1] {
                        buf[m.row_idx()[p] + j * rows] = vals[p];
                    }
                }
            }
        }
    }
    DenseMatrix::new(rows, cols, Storage::Reg(handle))
}

/// Scalar payload of a `1x1`-shaped real-domain terminal, if any
pub fn as_real_scalar(t: &Terminal) -> Option<f64> {
    match t {
        Terminal::RealScalar(v) => Some(*v),
        Terminal::IntegerScalar(v) => Some(f64::from(*v)),
        Terminal::RealDense(m) if m.is_scalar_shape() => Some(m.get(0, 0)),
        Terminal::Logical(m) if m.is_scalar_shape() => Some(m.get(0, 0)),
        Terminal::RealDiagonal(m) if m.rows() == 1 && m.cols() == 1 => Some(m.get(0, 0)),
        Terminal::RealSparse(m) if m.rows() == 1 && m.cols() == 1 => Some(m.get(0, 0)),
        _ => None,
    }
}

/// Scalar payload of any `1x1`-shaped terminal, widened to complex
pub fn as_complex_scalar(t: &Terminal) -> Option<Complex64> {
    if let Some(v) = as_real_scalar(t) {
        return Some(Complex64::new(v, 0.0));
    }
    match t {
        Terminal::ComplexScalar(v) => Some(*v),
        Terminal::ComplexDense(m) if m.is_scalar_shape() => Some(m.get(0, 0)),
        Terminal::ComplexDiagonal(m) if m.rows() == 1 && m.cols() == 1 => Some(m.get(0, 0)),
        Terminal::ComplexSparse(m) if m.rows() == 1 && m.cols() == 1 => Some(m.get(0, 0)),
        _ => None,
    }
}
