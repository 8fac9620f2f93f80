//! Diagonal matrix terminals

use super::storage::{AccessMode, DataRef, Storage};
use crate::dtype::Element;
use crate::error::{Error, Result};

/// Diagonal matrix storing only the `min(rows, cols)` diagonal values
#[derive(Debug, Clone)]
pub struct DiagonalMatrix<T: Element> {
    rows: usize,
    cols: usize,
    data: Storage<T>,
}

impl<T: Element> DiagonalMatrix<T> {
    /// Wrap a storage buffer; `data.len()` must equal `min(rows, cols)`
    pub fn new(rows: usize, cols: usize, data: Storage<T>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument {
                arg: "rows/cols",
                reason: format!("diagonal matrix dimensions must be nonzero, got [{rows}x{cols}]"),
            });
        }
        if data.len() != rows.min(cols) {
            return Err(Error::InvalidArgument {
                arg: "data",
                reason: format!(
                    "diagonal buffer length {} does not match min({rows}, {cols})",
                    data.len()
                ),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Owning diagonal matrix over the diagonal values
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols, Storage::Owned(data))
    }

    /// Row count
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Logical data length, `min(rows, cols)`
    pub fn datalen(&self) -> usize {
        self.rows.min(self.cols)
    }

    /// Buffer access mode
    pub fn access(&self) -> AccessMode {
        self.data.access()
    }

    /// Borrow the diagonal values
    pub fn data(&self) -> DataRef<'_, T> {
        self.data.data()
    }

    /// Element at `(i, j)`: zero off the stored diagonal
    pub fn get(&self, i: usize, j: usize) -> T {
        if i == j && i < self.datalen() {
            self.data.data()[i]
        } else {
            T::zero()
        }
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
