//! Views over a module's linear memory.
//!
//! A host runtime hands out byte windows over linear memory that stay bound
//! to the backing store they were created from. Growing the memory replaces
//! that store, and old windows keep pointing at the detached one. A
//! [`MemoryView`] caches one window together with the identity of its
//! backing store and rebuilds it lazily when the identity changes.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;
use ybridge_types::{BridgeError, Result};

/// Size of one linear-memory page (64 KiB).
pub const PAGE_SIZE: usize = 65_536;

/// A writable byte window over linear memory.
pub trait MemoryWindow {
    /// Length of the window in bytes.
    fn byte_len(&self) -> usize;

    /// Copy `bytes` to `[offset, offset + bytes.len())`.
    fn write(&self, offset: usize, bytes: &[u8]) -> Result<()>;
}

/// A growable linear memory owned by the host runtime.
pub trait LinearMemory {
    /// Identity of the current backing store.
    type Backing: PartialEq;
    type View: MemoryWindow;

    fn backing(&self) -> Self::Backing;

    /// A fresh window over the current backing store.
    fn view(&self) -> Self::View;
}

/// Bounds check shared by window implementations.
pub fn check_bounds(offset: usize, len: usize, size: usize) -> Result<()> {
    match offset.checked_add(len) {
        Some(end) if end <= size => Ok(()),
        _ => Err(BridgeError::OutOfBounds { offset, len, size }),
    }
}

/// Lazily refreshed window cache.
pub struct MemoryView<M: LinearMemory> {
    cached: Option<(M::Backing, M::View)>,
    refreshes: u64,
}

impl<M: LinearMemory> MemoryView<M> {
    pub fn new() -> Self {
        Self {
            cached: None,
            refreshes: 0,
        }
    }

    /// Window over `memory`'s current backing store, rebuilt if the cached
    /// one was taken from a store that has since been replaced.
    pub fn acquire(&mut self, memory: &M) -> &M::View {
        let current = memory.backing();
        let stale = self
            .cached
            .as_ref()
            .map_or(true, |(backing, _)| *backing != current);
        if stale {
            self.refreshes += 1;
            trace!(refreshes = self.refreshes, "rebuilding linear memory view");
            self.cached = None;
        }
        let (_, view) = self.cached.get_or_insert_with(|| (current, memory.view()));
        view
    }

    /// Number of times a window has been (re)built.
    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }
}

impl<M: LinearMemory> Default for MemoryView<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct Buffer {
    bytes: RefCell<Vec<u8>>,
}

/// Page-granular growable memory for hosts without a wasm engine.
///
/// Growing moves the contents into a new buffer and leaves the old one
/// detached (zero length), so stale windows fail instead of writing into
/// memory the module can no longer see.
#[derive(Debug)]
pub struct GrowableMemory {
    buffer: Rc<Buffer>,
    generation: u64,
    max_pages: Option<u32>,
}

impl GrowableMemory {
    pub fn new(pages: u32) -> Self {
        Self::with_maximum(pages, None)
    }

    pub fn with_maximum(pages: u32, max_pages: Option<u32>) -> Self {
        Self {
            buffer: Rc::new(Buffer {
                bytes: RefCell::new(vec![0; pages as usize * PAGE_SIZE]),
            }),
            generation: 0,
            max_pages,
        }
    }

    pub fn pages(&self) -> u32 {
        (self.byte_len() / PAGE_SIZE) as u32
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.bytes.borrow().len()
    }

    /// Grow by `delta` pages. Returns the previous page count, or `None`
    /// when the maximum would be exceeded.
    pub fn grow(&mut self, delta: u32) -> Option<u32> {
        let previous = self.pages();
        let target = previous.checked_add(delta)?;
        if self.max_pages.is_some_and(|max| target > max) {
            return None;
        }
        if delta == 0 {
            return Some(previous);
        }
        let mut bytes = std::mem::take(&mut *self.buffer.bytes.borrow_mut());
        bytes.resize(target as usize * PAGE_SIZE, 0);
        self.buffer = Rc::new(Buffer {
            bytes: RefCell::new(bytes),
        });
        self.generation += 1;
        trace!(previous, target, "grew linear memory");
        Some(previous)
    }

    /// Copy `len` bytes starting at `offset`, or `None` if out of range.
    pub fn read(&self, offset: usize, len: usize) -> Option<Vec<u8>> {
        let bytes = self.buffer.bytes.borrow();
        let end = offset.checked_add(len)?;
        bytes.get(offset..end).map(<[u8]>::to_vec)
    }
}

impl LinearMemory for GrowableMemory {
    type Backing = u64;
    type View = GrowableView;

    fn backing(&self) -> u64 {
        self.generation
    }

    fn view(&self) -> GrowableView {
        GrowableView {
            buffer: Rc::clone(&self.buffer),
        }
    }
}

/// Window onto one backing buffer of a [`GrowableMemory`].
#[derive(Debug, Clone)]
pub struct GrowableView {
    buffer: Rc<Buffer>,
}

impl MemoryWindow for GrowableView {
    fn byte_len(&self) -> usize {
        self.buffer.bytes.borrow().len()
    }

    fn write(&self, offset: usize, bytes: &[u8]) -> Result<()> {
        let mut target = self.buffer.bytes.borrow_mut();
        check_bounds(offset, bytes.len(), target.len())?;
        target[offset..offset + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }
}
