//! Dense matrix terminals (column-major)

use super::storage::{AccessMode, DataRef, Storage};
use crate::dtype::Element;
use crate::error::{Error, Result};
use std::rc::Rc;

/// Dense matrix with column-major logical layout: element `(i, j)` lives
/// at `data[i + j * rows]`.
#[derive(Debug, Clone)]
pub struct DenseMatrix<T: Element> {
    rows: usize,
    cols: usize,
    data: Storage<T>,
}

impl<T: Element> DenseMatrix<T> {
    /// Wrap a storage buffer; `data.len()` must equal `rows * cols`
    pub fn new(rows: usize, cols: usize, data: Storage<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument {
                arg: "rows/cols",
                reason: format!("dense matrix dimensions must be nonzero, got [{rows}x{cols}]"),
            });
        }
        if data.len() != rows * cols {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!(
                    "dense buffer length {} does not match [{rows}x{cols}]",
                    data.len()
                ),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Owning matrix over a column-major vector
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, Storage::Owned(data))
    }

    /// Viewing matrix over externally owned column-major data
    pub fn from_view(data: Rc<[T]>, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, Storage::View(data))
    }

    /// Build from row-major nested slices (test/client convenience)
    pub fn from_rows(rows_data: &[Vec<T>]) -> Result<Self> {
        let rows = rows_data.len();
        let cols = rows_data.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 || rows_data.iter().any(|r| r.len() != cols) {
            return Err(Error::InvalidArgument {
                arg: "rows_data",
                reason: "rows must be nonempty and of equal length".to_string(),
            });
        }
        let mut data = vec![T::zero(); rows * cols];
        for (i, row) in rows_data.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                data[i + j * rows] = v;
            }
        }
        Self::from_vec(data, rows, cols)
    }

    /// Row count
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Logical data length, `rows * cols`
    pub fn datalen(&self) -> usize {
        self.rows * self.cols
    }

    /// Buffer access mode
    pub fn access(&self) -> AccessMode {
        self.data.access()
    }

    /// Borrow the column-major buffer
    pub fn data(&self) -> DataRef<'_, T> {
        self.data.data()
    }

    /// Element at `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data.data()[i + j * self.rows]
    }

    /// True for a 1x1 matrix (scalar in matrix clothing)
    pub fn is_scalar_shape(&self) -> bool {
        self.rows == 1 && self.cols == 1
    }

    /// True for a single row or single column
    pub fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Value-equal, reference-distinct copy with its own buffer
    pub fn deep_copy(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.deep_copy(),
        }
    }
}
