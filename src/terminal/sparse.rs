//! Sparse matrix terminals in compressed-sparse-column (CSC) form

use super::dense::DenseMatrix;
use super::storage::{AccessMode, DataRef, Storage};
use crate::dtype::Element;
use crate::error::{Error, Result};

/// CSC sparse matrix: `col_ptr` has `cols + 1` entries, `row_idx` and the
/// value buffer have `nnz = col_ptr[cols]` entries each, row indices are
/// strictly increasing within a column.
#[derive(Debug, Clone)]
pub struct SparseMatrix<T: Element> {
    rows: usize,
    cols: usize,
    col_ptr: Vec<usize>,
    row_idx: Vec<usize>,
    data: Storage<T>,
}

impl<T: Element> SparseMatrix<T> {
    /// Wrap CSC buffers, validating the structural invariants
    pub fn new(
        rows: usize,
        cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        data: Storage<T>,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument {
                arg: "rows/cols",
                reason: format!("sparse matrix dimensions must be nonzero, got [{rows}x{cols}]"),
            });
        }
        if col_ptr.len() != cols + 1 || col_ptr[0] != 0 {
            return Err(Error::InvalidArgument {
                arg: "col_ptr",
                reason: format!("column pointer must have {} entries starting at 0", cols + 1),
            });
        }
        if col_ptr.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidArgument {
                arg: "col_ptr",
                reason: "column pointer must be non-decreasing".to_string(),
            });
        }
        let nnz = col_ptr[cols];
        if row_idx.len() != nnz || data.len() != nnz {
            return Err(Error::InvalidArgument {
                arg: "row_idx/data",
                reason: format!("row index and value buffers must both have {nnz} entries"),
            });
        }
        for c in 0..cols {
            let seg = &row_idx[col_ptr[c]..col_ptr[c + 1]];
            if seg.iter().any(|&r| r >= rows) || seg.windows(2).any(|w| w[0] >= w[1]) {
                return Err(Error::InvalidArgument {
                    arg: "row_idx",
                    reason: format!("row indices in column {c} must be strictly increasing and < {rows}"),
                });
            }
        }
        Ok(Self {
            rows,
            cols,
            col_ptr,
            row_idx,
            data,
        })
    }

    /// Owning CSC matrix
    pub fn from_csc(
        rows: usize,
        cols: usize,
        col_ptr: Vec<usize>,
        row_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        Self::new(rows, cols, col_ptr, row_idx, Storage::Owned(values))
    }

    /// Compress a dense matrix, dropping exact zeros
    pub fn from_dense(dense: &DenseMatrix<T>) -> Result<Self> {
        let (rows, cols) = (dense.rows(), dense.cols());
        let src = dense.data();
        let mut col_ptr = Vec::with_capacity(cols + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        col_ptr.push(0);
        for j in 0..cols {
            for i in 0..rows {
                let v = src[i + j * rows];
                if !v.is_zero() {
                    row_idx.push(i);
                    values.push(v);
                }
            }
            col_ptr.push(values.len());
        }
        drop(src);
        Self::from_csc(rows, cols, col_ptr, row_idx, values)
    }

    /// Row count
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Logical data length, `col_ptr[cols]` (stored nonzeros)
    pub fn datalen(&self) -> usize {
        self.col_ptr[self.cols]
    }

    /// Column pointer array
    pub fn col_ptr(&self) -> &[usize] {
        &self.col_ptr
    }

    /// Row index array
    pub fn row_idx(&self) -> &[usize] {
        &self.row_idx
    }

    /// Buffer access mode
    pub fn access(&self) -> AccessMode {
        self.data.access()
    }

    /// Borrow the stored nonzero values
    pub fn data(&self) -> DataRef<'_, T> {
        self.data.data()
    }

    /// Element at `(i, j)`: zero unless stored
    pub fn get(&self, i: usize, j: usize) -> T {
        let seg = &self.row_idx[self.col_ptr[j]..self.col_ptr[j + 1]];
        match seg.binary_search(&i) {
            Ok(pos) => self.data.data()[self.col_ptr[j] + pos],
            Err(_) => T::zero(),
        }
    }

    /// Value-equal, reference-distinct copy with its own buffers
    pub fn deep_copy(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            col_ptr: self.col_ptr.clone(),
            row_idx: self.row_idx.clone(),
            data: self.data.deep_copy(),
        }
    }
}
