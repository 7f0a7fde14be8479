//! Chunk records and the arena that owns them

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

/// Index of a chunk inside its buffer's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkId(usize);

/// One link of the chain
///
/// Holds the characters with global index in `offset..offset + length` in
/// `chars[..length]`. The array never grows; a full chunk gets a successor.
#[derive(Debug, Clone)]
pub(crate) struct Chunk {
    pub chars: Box<[char]>,
    pub length: usize,
    pub offset: usize,
    pub previous: Option<ChunkId>,
}

impl Chunk {
    pub fn new(capacity: usize, offset: usize, previous: Option<ChunkId>) -> Self {
        Self {
            chars: vec!['\0'; capacity].into_boxed_slice(),
            length: 0,
            offset,
            previous,
        }
    }

    pub fn capacity(&self) -> usize {
        self.chars.len()
    }

    /// Unused room at the end of the chunk
    pub fn spare(&self) -> usize {
        self.chars.len() - self.length
    }

    /// Global index one past the last character
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn live(&self) -> &[char] {
        &self.chars[..self.length]
    }

    /// Swap in a new array of `capacity`, keeping the live characters
    pub fn resize(&mut self, capacity: usize) {
        let mut chars = vec!['\0'; capacity].into_boxed_slice();
        chars[..self.length].copy_from_slice(&self.chars[..self.length]);
        self.chars = chars;
    }
}

/// Slot storage for chunks, recycling unlinked slots
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    slots: Vec<Chunk>,
    free: Vec<ChunkId>,
}

impl Arena {
    pub fn alloc(&mut self, chunk: Chunk) -> ChunkId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = chunk;
                id
            }
            None => {
                self.slots.push(chunk);
                ChunkId(self.slots.len() - 1)
            }
        }
    }

    /// Return a slot to the free list and drop its characters
    pub fn release(&mut self, id: ChunkId) {
        self.slots[id.0] = Chunk::new(0, 0, None);
        self.free.push(id);
    }

    /// Number of chunks currently linked into a chain
    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}

impl Index<ChunkId> for Arena {
    type Output = Chunk;

    fn index(&self, id: ChunkId) -> &Chunk {
        &self.slots[id.0]
    }
}

impl IndexMut<ChunkId> for Arena {
    fn index_mut(&mut self, id: ChunkId) -> &mut Chunk {
        &mut self.slots[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_released_slots_are_reused() {
        let mut arena = Arena::default();
        let a = arena.alloc(Chunk::new(4, 0, None));
        let b = arena.alloc(Chunk::new(4, 0, Some(a)));
        assert_eq!(arena.live_count(), 2);

        arena.release(a);
        assert_eq!(arena.live_count(), 1);
        assert_eq!(arena[a].capacity(), 0);

        let c = arena.alloc(Chunk::new(8, 4, Some(b)));
        assert_eq!(c, a);
        assert_eq!(arena[c].capacity(), 8);
    }

    #[test]
    fn test_resize_keeps_live_characters() {
        let mut chunk = Chunk::new(2, 0, None);
        chunk.chars[0] = 'h';
        chunk.chars[1] = 'i';
        chunk.length = 2;

        chunk.resize(6);
        assert_eq!(chunk.capacity(), 6);
        assert_eq!(chunk.spare(), 4);
        assert_eq!(chunk.live(), &['h', 'i']);
        assert_eq!(chunk.end(), 2);
    }
}
