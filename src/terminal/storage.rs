//! Buffer storage for matrix terminals
//!
//! A terminal either views externally owned memory or owns its buffer.
//! Owned buffers come in two flavours: a plain vector, or a slice of a
//! reference-counted lazy [`Register`](crate::graph::register::Register)
//! (how promotion temporaries are allocated).

use crate::dtype::Element;
use crate::graph::register::RegisterHandle;
use std::cell::Ref;
use std::ops::Deref;
use std::rc::Rc;

/// Whether a terminal must free its buffer on destruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// The terminal owns the buffer and frees it when dropped
    Owner,
    /// The buffer belongs to the client; the terminal only reads it
    Viewer,
}

/// Backing buffer of a matrix terminal
#[derive(Debug, Clone)]
pub enum Storage<T: Element> {
    /// Buffer owned directly by the terminal
    Owned(Vec<T>),
    /// Externally owned buffer, shared read-only
    View(Rc<[T]>),
    /// Buffer owned by a reference-counted register
    Reg(RegisterHandle<T>),
}

impl<T: Element> Storage<T> {
    /// Access mode of this buffer
    pub fn access(&self) -> AccessMode {
        match self {
            Storage::Owned(_) | Storage::Reg(_) => AccessMode::Owner,
            Storage::View(_) => AccessMode::Viewer,
        }
    }

    /// Borrow the buffer contents
    pub fn data(&self) -> DataRef<'_, T> {
        match self {
            Storage::Owned(v) => DataRef::Slice(v),
            Storage::View(v) => DataRef::Slice(v),
            Storage::Reg(h) => DataRef::Cell(h.data()),
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Storage::Owned(v) => v.len(),
            Storage::View(v) => v.len(),
            Storage::Reg(h) => h.register().len(),
        }
    }

    /// True for a zero-length buffer
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy into a plain vector
    pub fn to_vec(&self) -> Vec<T> {
        self.data().to_vec()
    }

    /// Structural copy into an independently owned buffer
    pub fn deep_copy(&self) -> Storage<T> {
        Storage::Owned(self.to_vec())
    }
}

/// Borrowed view of a storage buffer, dereferencing to `[T]`
pub enum DataRef<'a, T: Element> {
    /// Direct slice borrow
    Slice(&'a [T]),
    /// Borrow routed through a register's interior cell
    Cell(Ref<'a, [T]>),
}

impl<T: Element> Deref for DataRef<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        match self {
            DataRef::Slice(s) => s,
            DataRef::Cell(r) => r,
        }
    }
}
