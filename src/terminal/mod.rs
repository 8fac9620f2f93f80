//! Terminal (leaf) values: scalars and the matrix storage classes
//!
//! Every terminal carries a shape; scalars are `1x1`. Column-major layout
//! throughout, matching the dense kernels in [`crate::kernel`].

pub mod dense;
pub mod diagonal;
pub mod sparse;
pub mod storage;

pub use dense::DenseMatrix;
pub use diagonal::DiagonalMatrix;
pub use sparse::SparseMatrix;
pub use storage::{AccessMode, DataRef, Storage};

use crate::dtype::Complex64;
use crate::fuzzy;
use crate::graph::node::NodeKind;

/// A leaf value in an expression tree
#[derive(Debug, Clone)]
pub enum Terminal {
    /// Real scalar, shape `1x1`
    RealScalar(f64),
    /// Complex scalar, shape `1x1`
    ComplexScalar(Complex64),
    /// Integer scalar, shape `1x1`; promoted to real before arithmetic
    IntegerScalar(i32),
    /// Real dense matrix
    RealDense(DenseMatrix<f64>),
    /// Complex dense matrix
    ComplexDense(DenseMatrix<Complex64>),
    /// Real diagonal matrix
    RealDiagonal(DiagonalMatrix<f64>),
    /// Complex diagonal matrix
    ComplexDiagonal(DiagonalMatrix<Complex64>),
    /// Real sparse matrix (CSC)
    RealSparse(SparseMatrix<f64>),
    /// Complex sparse matrix (CSC)
    ComplexSparse(SparseMatrix<Complex64>),
    /// Logical matrix, stored as 0.0/1.0 dense values
    Logical(DenseMatrix<f64>),
}

impl Terminal {
    /// Kind tag for dispatch and promotion
    pub fn kind(&self) -> NodeKind {
        match self {
            Terminal::RealScalar(_) => NodeKind::RealScalar,
            Terminal::ComplexScalar(_) => NodeKind::ComplexScalar,
            Terminal::IntegerScalar(_) => NodeKind::IntegerScalar,
            Terminal::RealDense(_) => NodeKind::RealDense,
            Terminal::ComplexDense(_) => NodeKind::ComplexDense,
            Terminal::RealDiagonal(_) => NodeKind::RealDiagonal,
            Terminal::ComplexDiagonal(_) => NodeKind::ComplexDiagonal,
            Terminal::RealSparse(_) => NodeKind::RealSparse,
            Terminal::ComplexSparse(_) => NodeKind::ComplexSparse,
            Terminal::Logical(_) => NodeKind::Logical,
        }
    }

    /// Row count; scalars report 1
    pub fn rows(&self) -> usize {
        match self {
            Terminal::RealScalar(_) | Terminal::ComplexScalar(_) | Terminal::IntegerScalar(_) => 1,
            Terminal::RealDense(m) => m.rows(),
            Terminal::ComplexDense(m) => m.rows(),
            Terminal::RealDiagonal(m) => m.rows(),
            Terminal::ComplexDiagonal(m) => m.rows(),
            Terminal::RealSparse(m) => m.rows(),
            Terminal::ComplexSparse(m) => m.rows(),
            Terminal::Logical(m) => m.rows(),
        }
    }

    /// Column count; scalars report 1
    pub fn cols(&self) -> usize {
        match self {
            Terminal::RealScalar(_) | Terminal::ComplexScalar(_) | Terminal::IntegerScalar(_) => 1,
            Terminal::RealDense(m) => m.cols(),
            Terminal::ComplexDense(m) => m.cols(),
            Terminal::RealDiagonal(m) => m.cols(),
            Terminal::ComplexDiagonal(m) => m.cols(),
            Terminal::RealSparse(m) => m.cols(),
            Terminal::ComplexSparse(m) => m.cols(),
            Terminal::Logical(m) => m.cols(),
        }
    }

    /// Stored element count: `rows*cols` for dense, diagonal length for
    /// diagonal, nonzero count for sparse, 1 for scalars
    pub fn datalen(&self) -> usize {
        match self {
            Terminal::RealScalar(_) | Terminal::ComplexScalar(_) | Terminal::IntegerScalar(_) => 1,
            Terminal::RealDense(m) => m.datalen(),
            Terminal::ComplexDense(m) => m.datalen(),
            Terminal::RealDiagonal(m) => m.datalen(),
            Terminal::ComplexDiagonal(m) => m.datalen(),
            Terminal::RealSparse(m) => m.datalen(),
            Terminal::ComplexSparse(m) => m.datalen(),
            Terminal::Logical(m) => m.datalen(),
        }
    }

    /// True for the three scalar variants
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Terminal::RealScalar(_) | Terminal::ComplexScalar(_) | Terminal::IntegerScalar(_)
        )
    }

    /// True when the stored domain is complex
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            Terminal::ComplexScalar(_)
                | Terminal::ComplexDense(_)
                | Terminal::ComplexDiagonal(_)
                | Terminal::ComplexSparse(_)
        )
    }

    /// Value-equal copy with freshly owned buffers
    pub fn deep_copy(&self) -> Terminal {
        match self {
            Terminal::RealScalar(v) => Terminal::RealScalar(*v),
            Terminal::ComplexScalar(v) => Terminal::ComplexScalar(*v),
            Terminal::IntegerScalar(v) => Terminal::IntegerScalar(*v),
            Terminal::RealDense(m) => Terminal::RealDense(m.deep_copy()),
            Terminal::ComplexDense(m) => Terminal::ComplexDense(m.deep_copy()),
            Terminal::RealDiagonal(m) => Terminal::RealDiagonal(m.deep_copy()),
            Terminal::ComplexDiagonal(m) => Terminal::ComplexDiagonal(m.deep_copy()),
            Terminal::RealSparse(m) => Terminal::RealSparse(m.deep_copy()),
            Terminal::ComplexSparse(m) => Terminal::ComplexSparse(m.deep_copy()),
            Terminal::Logical(m) => Terminal::Logical(m.deep_copy()),
        }
    }

    /// Materialise every element at full shape in the complex domain.
    /// Used by value comparisons across storage classes.
    pub fn to_complex_values(&self) -> Vec<Complex64> {
        fn fill_real(rows: usize, cols: usize, get: impl Fn(usize, usize) -> f64) -> Vec<Complex64> {
            let mut out = Vec::with_capacity(rows * cols);
            for j in 0..cols {
                for i in 0..rows {
                    out.push(Complex64::new(get(i, j), 0.0));
                }
            }
            out
        }
        match self {
            Terminal::RealScalar(v) => vec![Complex64::new(*v, 0.0)],
            Terminal::ComplexScalar(v) => vec![*v],
            Terminal::IntegerScalar(v) => vec![Complex64::new(f64::from(*v), 0.0)],
            Terminal::RealDense(m) => m.data().iter().map(|&v| Complex64::new(v, 0.0)).collect(),
            Terminal::ComplexDense(m) => m.data().to_vec(),
            Terminal::RealDiagonal(m) => fill_real(m.rows(), m.cols(), |i, j| m.get(i, j)),
            Terminal::ComplexDiagonal(m) => {
                let (rows, cols) = (m.rows(), m.cols());
                let mut out = vec![Complex64::ZERO; rows * cols];
                for (k, &v) in m.data().iter().enumerate() {
                    out[k + k * rows] = v;
                }
                out
            }
            Terminal::RealSparse(m) => fill_real(m.rows(), m.cols(), |i, j| m.get(i, j)),
            Terminal::ComplexSparse(m) => {
                let (rows, cols) = (m.rows(), m.cols());
                let mut out = vec![Complex64::ZERO; rows * cols];
                let vals = m.data();
                for j in 0..cols {
                    for p in m.col_ptr()[j]..m.col_ptr()[j + 1] {
                        out[m.row_idx()[p] + j * rows] = vals[p];
                    }
                }
                out
            }
            Terminal::Logical(m) => m.data().iter().map(|&v| Complex64::new(v, 0.0)).collect(),
        }
    }

    /// Tolerance-based value equality across storage classes. Shapes must
    /// match; elements compare in the complex domain after densification.
    pub fn maths_equals(&self, other: &Terminal, maxabs: f64, maxrel: f64) -> bool {
        if self.rows() != other.rows() || self.cols() != other.cols() {
            return false;
        }
        fuzzy::array_fuzzy_equals_complex(
            &self.to_complex_values(),
            &other.to_complex_values(),
            maxabs,
            maxrel,
        )
    }
}

/// Strict equality: same kind, same shape, bitwise-identical payload
impl PartialEq for Terminal {
    fn eq(&self, other: &Terminal) -> bool {
        match (self, other) {
            (Terminal::RealScalar(a), Terminal::RealScalar(b)) => a.to_bits() == b.to_bits(),
            (Terminal::ComplexScalar(a), Terminal::ComplexScalar(b)) => {
                a.re.to_bits() == b.re.to_bits() && a.im.to_bits() == b.im.to_bits()
            }
            (Terminal::IntegerScalar(a), Terminal::IntegerScalar(b)) => a == b,
            (Terminal::RealDense(a), Terminal::RealDense(b))
            | (Terminal::Logical(a), Terminal::Logical(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && fuzzy::array_bit_equals(&a.data(), &b.data())
            }
            (Terminal::ComplexDense(a), Terminal::ComplexDense(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && fuzzy::array_bit_equals_complex(&a.data(), &b.data())
            }
            (Terminal::RealDiagonal(a), Terminal::RealDiagonal(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && fuzzy::array_bit_equals(&a.data(), &b.data())
            }
            (Terminal::ComplexDiagonal(a), Terminal::ComplexDiagonal(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && fuzzy::array_bit_equals_complex(&a.data(), &b.data())
            }
            (Terminal::RealSparse(a), Terminal::RealSparse(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && a.col_ptr() == b.col_ptr()
                    && a.row_idx() == b.row_idx()
                    && fuzzy::array_bit_equals(&a.data(), &b.data())
            }
            (Terminal::ComplexSparse(a), Terminal::ComplexSparse(b)) => {
                a.rows() == b.rows()
                    && a.cols() == b.cols()
                    && a.col_ptr() == b.col_ptr()
                    && a.row_idx() == b.row_idx()
                    && fuzzy::array_bit_equals_complex(&a.data(), &b.data())
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_shape_is_one_by_one() {
        let t = Terminal::RealScalar(3.5);
        assert_eq!(t.rows(), 1);
        assert_eq!(t.cols(), 1);
        assert_eq!(t.datalen(), 1);
        assert!(t.is_scalar());
    }

    #[test]
    fn diagonal_densifies_with_zero_fill() {
        let d = DiagonalMatrix::from_vec(vec![1.0, 2.0], 2, 3).unwrap();
        let t = Terminal::RealDiagonal(d);
        let v = t.to_complex_values();
        assert_eq!(v.len(), 6);
        assert_eq!(v[0], Complex64::new(1.0, 0.0));
        assert_eq!(v[3], Complex64::new(2.0, 0.0));
        assert_eq!(v[1], Complex64::ZERO);
        assert_eq!(v[2], Complex64::ZERO);
    }

    #[test]
    fn maths_equals_crosses_storage_classes() {
        let d = Terminal::RealDiagonal(DiagonalMatrix::from_vec(vec![1.0, 2.0], 2, 2).unwrap());
        let full =
            Terminal::RealDense(DenseMatrix::from_vec(vec![1.0, 0.0, 0.0, 2.0], 2, 2).unwrap());
        assert!(d.maths_equals(&full, 1e-14, 1e-14));
        assert_ne!(d, full);
    }

    #[test]
    fn strict_eq_is_bitwise() {
        let a = Terminal::RealScalar(0.0);
        let b = Terminal::RealScalar(-0.0);
        assert_ne!(a, b);
        assert!(a.maths_equals(&b, 1e-14, 1e-14));
    }

    #[test]
    fn sparse_round_trips_dense_values() {
        let dense = DenseMatrix::from_vec(vec![1.0, 0.0, 0.0, 2.0, 0.0, 3.0], 2, 3).unwrap();
        let sp = SparseMatrix::from_dense(&dense).unwrap();
        assert_eq!(sp.datalen(), 3);
        assert_eq!(sp.get(0, 0), 1.0);
        assert_eq!(sp.get(1, 0), 0.0);
        assert_eq!(sp.get(0, 1), 2.0);
        assert_eq!(sp.get(1, 2), 3.0);
        let t = Terminal::RealSparse(sp);
        let full = Terminal::RealDense(dense);
        assert!(t.maths_equals(&full, 1e-14, 1e-14));
    }
}
