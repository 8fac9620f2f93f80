//! Reference-counted lazy result buffers and per-node result caches
//!
//! A [`Register`] is a manually reference-counted holder for one numeric
//! buffer. The buffer does not exist until the first `inc_ref` and is
//! released when the count returns to zero; decrementing past zero is a
//! fatal invariant violation. Promotion temporaries allocate through
//! registers so their lifetimes are pinned to the references that need
//! them.
//!
//! A [`RegContainer`] is the simple append-only result list carried by
//! every expression node: one slot per produced output, pushed in the
//! operator's documented order.

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::terminal::Terminal;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

/// Lazily allocated, manually reference-counted numeric buffer.
///
/// Counts are plain [`Cell`]s, never atomics; the evaluator is strictly
/// single-threaded.
#[derive(Debug)]
pub struct Register<T: Element> {
    len: usize,
    refs: Cell<i64>,
    buf: RefCell<Option<Box<[T]>>>,
}

impl<T: Element> Register<T> {
    /// Create an unallocated register for a buffer of `len` elements
    pub fn new(len: usize) -> Self {
        Self {
            len,
            refs: Cell::new(0),
            buf: RefCell::new(None),
        }
    }

    /// Buffer length in elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when `len() == 0`
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current reference count
    pub fn ref_count(&self) -> i64 {
        self.refs.get()
    }

    /// True while the backing buffer exists
    pub fn is_allocated(&self) -> bool {
        self.buf.borrow().is_some()
    }

    /// Take a reference; the zero-filled buffer is allocated on the 0 -> 1
    /// transition.
    pub fn inc_ref(&self) -> i64 {
        if self.refs.get() == 0 {
            *self.buf.borrow_mut() = Some(vec![T::zero(); self.len].into_boxed_slice());
        }
        self.refs.set(self.refs.get() + 1);
        self.refs.get()
    }

    /// Release a reference; the buffer is freed when the count reaches
    /// zero. Decrementing below zero is fatal.
    pub fn dec_ref(&self) -> Result<i64> {
        if self.refs.get() < 1 {
            return Err(Error::RegisterUnderflow);
        }
        self.refs.set(self.refs.get() - 1);
        if self.refs.get() == 0 {
            *self.buf.borrow_mut() = None;
        }
        Ok(self.refs.get())
    }

    /// Borrow the buffer contents; empty slice while unallocated
    pub fn data(&self) -> Ref<'_, [T]> {
        Ref::map(self.buf.borrow(), |b| match b {
            Some(buf) => &buf[..],
            None => &[],
        })
    }

    /// Mutably borrow the buffer contents; empty slice while unallocated
    pub fn data_mut(&self) -> RefMut<'_, [T]> {
        RefMut::map(self.buf.borrow_mut(), |b| match b {
            Some(buf) => &mut buf[..],
            None => &mut [],
        })
    }
}

/// One live reference to a shared [`Register`].
///
/// Creating a handle takes a reference (allocating on the first), cloning
/// takes another, and dropping releases it, freeing the buffer when the
/// last handle goes away.
#[derive(Debug)]
pub struct RegisterHandle<T: Element> {
    reg: Rc<Register<T>>,
}

impl<T: Element> RegisterHandle<T> {
    /// Take a reference on `reg`
    pub fn new(reg: Rc<Register<T>>) -> Self {
        reg.inc_ref();
        Self { reg }
    }

    /// Allocate a fresh register of `len` elements and hold its first
    /// reference
    pub fn allocate(len: usize) -> Self {
        Self::new(Rc::new(Register::new(len)))
    }

    /// The underlying register
    pub fn register(&self) -> &Register<T> {
        &self.reg
    }

    /// Borrow the buffer contents
    pub fn data(&self) -> Ref<'_, [T]> {
        self.reg.data()
    }

    /// Mutably borrow the buffer contents
    pub fn data_mut(&self) -> RefMut<'_, [T]> {
        self.reg.data_mut()
    }
}

impl<T: Element> Clone for RegisterHandle<T> {
    fn clone(&self) -> Self {
        Self::new(Rc::clone(&self.reg))
    }
}

impl<T: Element> Drop for RegisterHandle<T> {
    fn drop(&mut self) {
        if self.reg.dec_ref().is_err() {
            // A handle always owns one reference, so underflow here means
            // the count was tampered with externally.
            log::error!("register reference count underflow on handle drop");
        }
    }
}

/// Append-only list of computed result terminals on an expression node.
///
/// Slots are written exactly once per fresh execution list; re-dispatch of
/// an already-populated node is a no-op read.
#[derive(Debug, Default)]
pub struct RegContainer {
    slots: RefCell<Vec<Rc<Terminal>>>,
}

impl RegContainer {
    /// Empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result terminal
    pub fn push(&self, t: Rc<Terminal>) {
        self.slots.borrow_mut().push(t);
    }

    /// Fetch result slot `i`
    pub fn get(&self, i: usize) -> Option<Rc<Terminal>> {
        self.slots.borrow().get(i).cloned()
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// True before the node has been evaluated
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    /// Drop all results, making the node eligible for re-evaluation
    pub fn clear(&self) {
        self.slots.borrow_mut().clear();
    }
}
