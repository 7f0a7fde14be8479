//! Chunk chain bookkeeping: construction, append, indexing and sizing

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::chunk::{Arena, Chunk, ChunkId};
use crate::error::TextError;

/// Capacity of a buffer created with [`TextBuffer::new`]
pub const DEFAULT_CAPACITY: usize = 16;

/// Upper bound on the size of a chunk allocated for growth
///
/// Keeps single allocations small on a device with a fragmented heap while
/// still letting growth roughly double the buffer each time.
pub const MAX_CHUNK_SIZE: usize = 8000;

/// Default ceiling on the total length of a buffer
pub const DEFAULT_MAX_CAPACITY: usize = i32::MAX as usize;

/// Text buffer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBufferConfig {
    /// Characters the first chunk can hold before a second one is needed
    pub initial_capacity: usize,
    /// Largest length the buffer may ever reach
    pub max_capacity: usize,
}

impl Default for TextBufferConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// Growable text stored as a backward-linked chain of chunks
///
/// Lengths and indices count `char`s, not bytes.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub(crate) arena: Arena,
    /// Chunk holding the end of the text
    pub(crate) head: ChunkId,
    pub(crate) max_capacity: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer with [`DEFAULT_CAPACITY`]
    pub fn new() -> Self {
        Self::with_config(TextBufferConfig::default())
    }

    /// Create an empty buffer whose first chunk holds `capacity` characters
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TextBufferConfig {
            initial_capacity: capacity,
            ..TextBufferConfig::default()
        })
    }

    /// Create an empty buffer from a configuration
    ///
    /// An initial capacity above the maximum is clamped to the maximum.
    pub fn with_config(config: TextBufferConfig) -> Self {
        let capacity = config.initial_capacity.min(config.max_capacity);
        let mut arena = Arena::default();
        let head = arena.alloc(Chunk::new(capacity, 0, None));
        Self {
            arena,
            head,
            max_capacity: config.max_capacity,
        }
    }

    /// Number of characters in the buffer
    pub fn len(&self) -> usize {
        self.arena[self.head].end()
    }

    /// Whether the buffer holds no characters
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest length this buffer may reach
    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Characters the buffer can hold before it must allocate another chunk
    pub fn capacity(&self) -> usize {
        let head = &self.arena[self.head];
        head.offset + head.capacity()
    }

    /// Resize the head chunk so the total capacity becomes `capacity`
    ///
    /// Fails with [`TextError::ArgumentOutOfRange`] when `capacity` is below
    /// the current length or above the maximum capacity.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), TextError> {
        if capacity > self.max_capacity || capacity < self.len() {
            return Err(TextError::ArgumentOutOfRange);
        }
        if capacity != self.capacity() {
            let head = &mut self.arena[self.head];
            let size = capacity - head.offset;
            head.resize(size);
        }
        Ok(())
    }

    /// Grow (padding with `'\0'`) or truncate the text to `length` characters
    pub fn set_len(&mut self, length: usize) -> Result<(), TextError> {
        if length > self.max_capacity {
            return Err(TextError::ArgumentOutOfRange);
        }
        let current = self.len();
        if length > current {
            return self.append_repeated('\0', length - current);
        }
        if length == current {
            return Ok(());
        }
        if length == 0 {
            self.clear();
            return Ok(());
        }

        // New head is the chunk holding the last kept character
        let (keep, index) = self.locate(length - 1);
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            if id == keep {
                break;
            }
            cursor = self.arena[id].previous;
            self.arena.release(id);
        }
        self.arena[keep].length = index + 1;
        self.head = keep;
        Ok(())
    }

    /// Drop all text, keeping the head chunk's storage
    pub fn clear(&mut self) {
        let mut cursor = self.arena[self.head].previous;
        while let Some(id) = cursor {
            cursor = self.arena[id].previous;
            self.arena.release(id);
        }
        let head = &mut self.arena[self.head];
        head.length = 0;
        head.offset = 0;
        head.previous = None;
    }

    /// Append a string
    pub fn append(&mut self, value: &str) -> Result<(), TextError> {
        self.append_iter(value.chars(), value.chars().count())
    }

    /// Append a single character
    pub fn append_char(&mut self, c: char) -> Result<(), TextError> {
        self.append_iter(core::iter::once(c), 1)
    }

    /// Append `c` repeated `count` times
    pub fn append_repeated(&mut self, c: char, count: usize) -> Result<(), TextError> {
        self.append_iter(core::iter::repeat(c).take(count), count)
    }

    /// Character at `index`
    pub fn char_at(&self, index: usize) -> Result<char, TextError> {
        if index >= self.len() {
            return Err(TextError::IndexOutOfRange);
        }
        let (id, at) = self.locate(index);
        Ok(self.arena[id].chars[at])
    }

    /// Overwrite the character at `index`
    pub fn set_char(&mut self, index: usize, c: char) -> Result<(), TextError> {
        if index >= self.len() {
            return Err(TextError::IndexOutOfRange);
        }
        let (id, at) = self.locate(index);
        self.arena[id].chars[at] = c;
        Ok(())
    }

    /// Copy `length` characters starting at `start` into a new `String`
    pub fn substring(&self, start: usize, length: usize) -> Result<String, TextError> {
        self.check_range(start, length)?;
        Ok(self.copy_range(start, length).into_iter().collect())
    }

    /// Iterate the characters from first to last
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let mut order = self.chain();
        order.reverse();
        order
            .into_iter()
            .flat_map(move |id| self.arena[id].live().iter().copied())
    }

    /// Fill the head, then link one successor sized for the rest
    ///
    /// `count` must be the exact number of items `chars` yields.
    pub(crate) fn append_iter<I>(&mut self, chars: I, count: usize) -> Result<(), TextError>
    where
        I: Iterator<Item = char>,
    {
        if count == 0 {
            return Ok(());
        }
        self.check_growth(count)?;

        let mut chars = chars;
        let head = &mut self.arena[self.head];
        let fits = head.spare().min(count);
        let start = head.length;
        for (slot, c) in head.chars[start..start + fits].iter_mut().zip(&mut chars) {
            *slot = c;
        }
        head.length += fits;

        let overflow = count - fits;
        if overflow > 0 {
            self.expand_by_block(overflow);
            let head = &mut self.arena[self.head];
            for (slot, c) in head.chars[..overflow].iter_mut().zip(&mut chars) {
                *slot = c;
            }
            head.length = overflow;
        }
        Ok(())
    }

    /// Make a new, empty head chunk able to take at least `minimum` characters
    ///
    /// Growth follows the current length (so the buffer roughly doubles)
    /// capped at [`MAX_CHUNK_SIZE`], but never below what is needed.
    pub(crate) fn expand_by_block(&mut self, minimum: usize) {
        let length = self.len();
        let size = minimum.max(length.min(MAX_CHUNK_SIZE));

        let head = &mut self.arena[self.head];
        if head.length == 0 {
            // An empty head can simply take the bigger array
            head.chars = vec!['\0'; size].into_boxed_slice();
            return;
        }
        let id = self.arena.alloc(Chunk::new(size, length, Some(self.head)));
        trace!("text buffer: new chunk of {} at offset {}", size, length);
        self.head = id;
    }

    /// Chunk holding global `index` and the position inside it
    ///
    /// `index == len()` resolves to the end of the head chunk.
    pub(crate) fn locate(&self, index: usize) -> (ChunkId, usize) {
        let mut id = self.head;
        loop {
            let chunk = &self.arena[id];
            match chunk.previous {
                Some(previous) if chunk.offset > index => id = previous,
                _ => return (id, index - chunk.offset),
            }
        }
    }

    /// Chunk ids from head to tail
    pub(crate) fn chain(&self) -> Vec<ChunkId> {
        let mut ids = Vec::new();
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            ids.push(id);
            cursor = self.arena[id].previous;
        }
        ids
    }

    /// Copy global range `start..start + length` out of the chain
    pub(crate) fn copy_range(&self, start: usize, length: usize) -> Vec<char> {
        let end = start + length;
        let mut out = vec!['\0'; length];
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            let chunk = &self.arena[id];
            if chunk.end() <= start {
                break;
            }
            let from = start.max(chunk.offset);
            let to = end.min(chunk.end());
            if from < to {
                out[from - start..to - start]
                    .copy_from_slice(&chunk.chars[from - chunk.offset..to - chunk.offset]);
            }
            cursor = chunk.previous;
        }
        out
    }

    /// Reject growth by `additional` characters past the maximum capacity
    pub(crate) fn check_growth(&self, additional: usize) -> Result<(), TextError> {
        match self.len().checked_add(additional) {
            Some(total) if total <= self.max_capacity => Ok(()),
            _ => Err(TextError::CapacityExceeded),
        }
    }

    /// Validate that `start..start + length` lies inside the text
    pub(crate) fn check_range(&self, start: usize, length: usize) -> Result<usize, TextError> {
        match start.checked_add(length) {
            Some(end) if end <= self.len() => Ok(end),
            _ => Err(TextError::ArgumentOutOfRange),
        }
    }
}

impl From<&str> for TextBuffer {
    fn from(value: &str) -> Self {
        let count = value.chars().count();
        let mut arena = Arena::default();
        let mut chunk = Chunk::new(count.max(DEFAULT_CAPACITY), 0, None);
        for (slot, c) in chunk.chars.iter_mut().zip(value.chars()) {
            *slot = c;
        }
        chunk.length = count;
        let head = arena.alloc(chunk);
        Self {
            arena,
            head,
            max_capacity: DEFAULT_MAX_CAPACITY.max(count),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.chain().into_iter().rev() {
            for &c in self.arena[id].live() {
                fmt::Write::write_char(f, c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map_err(|_| fmt::Error)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.append_char(c).map_err(|_| fmt::Error)
    }
}

impl PartialEq<str> for TextBuffer {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.chars().eq(other.chars())
    }
}
