//! Chunked slab allocator that hands out stable handles.
//!
//! Tree nodes refer to each other through `Handle`s instead of pointers, so parent and child links
//! can point at each other without forming an ownership cycle.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// Default number of slots allocated per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// A stable reference to an object stored in an `Arena<T>`.
///
/// A handle stays valid until the object it refers to is freed. Freed slots are reused, so a
/// stale handle may later refer to a different object.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({}:{})", self.chunk_index, self.block_index)
    }
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator for a single type of object.
///
/// Objects live in fixed-capacity chunks so growing the arena never moves existing objects.
/// Vacant slots form an intrusive free list threaded through the chunks, and the most recently
/// freed slot is reused first.
///
/// # Examples
///
/// ```
/// use red_black_paths::arena::Arena;
///
/// let mut arena = Arena::new(16);
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), Some(2));
/// assert!(arena.is_empty());
/// ```
pub struct Arena<T> {
    free_head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    len: usize,
    capacity: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>` holding at most `chunk_size` objects per chunk. A
    /// `chunk_size` of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use red_black_paths::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new(1024);
    /// assert_eq!(arena.chunk_size(), 1024);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        Arena {
            free_head: None,
            chunks: Vec::new(),
            chunk_size: chunk_size.max(1),
            len: 0,
            capacity: 0,
        }
    }

    fn block(&self, handle: Handle) -> Option<&Block<T>> {
        self.chunks
            .get(handle.chunk_index)
            .and_then(|chunk| chunk.get(handle.block_index))
    }

    fn block_mut(&mut self, handle: Handle) -> Option<&mut Block<T>> {
        self.chunks
            .get_mut(handle.chunk_index)
            .and_then(|chunk| chunk.get_mut(handle.block_index))
    }

    /// Stores `value` and returns a handle to it.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;

        if let Some(handle) = self.free_head.take() {
            let slot = &mut self.chunks[handle.chunk_index][handle.block_index];
            match mem::replace(slot, Block::Occupied(value)) {
                Block::Vacant(next) => self.free_head = next,
                Block::Occupied(_) => unreachable!("Expected a vacant block on the free list."),
            }
            return handle;
        }

        if self.len > self.capacity {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }

        let chunk_index = self.chunks.len() - 1;
        let last_chunk = &mut self.chunks[chunk_index];
        last_chunk.push(Block::Occupied(value));
        Handle {
            chunk_index,
            block_index: last_chunk.len() - 1,
        }
    }

    /// Frees the object `handle` refers to and returns it. Returns `None` if the handle is out of
    /// bounds or already vacant.
    pub fn free(&mut self, handle: Handle) -> Option<T> {
        let next = self.free_head;
        let slot = self.block_mut(handle)?;
        if let Block::Vacant(_) = slot {
            return None;
        }

        match mem::replace(slot, Block::Vacant(next)) {
            Block::Occupied(value) => {
                self.free_head = Some(handle);
                self.len -= 1;
                Some(value)
            },
            Block::Vacant(_) => None,
        }
    }

    /// Returns a reference to the object `handle` refers to, if it is live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.block(handle)? {
            Block::Occupied(value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the object `handle` refers to, if it is live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.block_mut(handle)? {
            Block::Occupied(value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Drops every object and releases all chunks.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.free_head = None;
        self.len = 0;
        self.capacity = 0;
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl<T> Index<Handle> for Arena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Expected a live arena handle.")
    }
}

impl<T> IndexMut<Handle> for Arena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Expected a live arena handle.")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, Handle};

    fn handle(chunk_index: usize, block_index: usize) -> Handle {
        Handle {
            chunk_index,
            block_index,
        }
    }

    #[test]
    fn test_allocate_sequential() {
        let mut arena = Arena::new(1024);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(0, 2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = Arena::new(2);
        assert_eq!(arena.allocate(0), handle(0, 0));
        assert_eq!(arena.allocate(0), handle(0, 1));
        assert_eq!(arena.allocate(0), handle(1, 0));
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = Arena::new(1024);
        let first = arena.allocate(0);
        arena.allocate(1);
        assert_eq!(arena.free(first), Some(0));
        assert_eq!(arena.allocate(2), first);
        assert_eq!(arena[first], 2);
    }

    #[test]
    fn test_free_reuses_most_recent_first() {
        let mut arena = Arena::new(2);
        let a = arena.allocate(0);
        let b = arena.allocate(1);
        let c = arena.allocate(2);
        arena.free(a);
        arena.free(c);
        assert_eq!(arena.allocate(3), c);
        assert_eq!(arena.allocate(4), a);
        assert_eq!(arena.allocate(5), handle(1, 1));
        assert_eq!(arena[b], 1);
    }

    #[test]
    fn test_free_full_chunks_then_grow() {
        let mut arena = Arena::new(1);
        let a = arena.allocate(0);
        arena.free(a);
        assert_eq!(arena.allocate(1), a);
        assert_eq!(arena.allocate(2), handle(1, 0));
    }

    #[test]
    fn test_free_invalid_block() {
        let mut arena: Arena<u32> = Arena::new(1024);
        assert_eq!(arena.free(handle(0, 0)), None);
    }

    #[test]
    fn test_free_vacant_block() {
        let mut arena = Arena::new(1024);
        let entry = arena.allocate(0);
        assert_eq!(arena.free(entry), Some(0));
        assert_eq!(arena.free(entry), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = Arena::new(1024);
        arena.allocate(0);
        assert_eq!(arena.get(handle(0, 1)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = Arena::new(1024);
        let entry = arena.allocate(0);
        if let Some(value) = arena.get_mut(entry) {
            *value = 1;
        }
        assert_eq!(arena.get(entry), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = Arena::new(4);
        let entry = arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.get(entry), None);
        assert_eq!(arena.allocate(2), handle(0, 0));
    }

    #[test]
    #[should_panic]
    fn test_index_vacant_block() {
        let mut arena = Arena::new(1024);
        let entry = arena.allocate(0);
        arena.free(entry);
        let value: u32 = arena[entry];
        assert_eq!(value, 0);
    }
}
