//! In-place edits: insert, remove and replace

use alloc::vec::Vec;

use crate::buffer::{TextBuffer, DEFAULT_CAPACITY};
use crate::chunk::{Chunk, ChunkId};
use crate::error::TextError;

impl TextBuffer {
    /// Insert `value` repeated `count` times before character `index`
    ///
    /// `index == len()` appends. Fails with [`TextError::IndexOutOfRange`]
    /// past the end and [`TextError::CapacityExceeded`] when the result
    /// would be longer than the maximum capacity.
    pub fn insert(&mut self, index: usize, value: &str, count: usize) -> Result<(), TextError> {
        let chars: Vec<char> = value.chars().collect();
        self.insert_chars(index, &chars, count)
    }

    /// Insert `value` once before character `index`
    pub fn insert_str(&mut self, index: usize, value: &str) -> Result<(), TextError> {
        self.insert(index, value, 1)
    }

    /// Remove `length` characters starting at `start`
    ///
    /// Chunks are compacted in place; nothing is reallocated.
    pub fn remove(&mut self, start: usize, length: usize) -> Result<(), TextError> {
        let end = self.check_range(start, length)?;
        if length == 0 {
            return Ok(());
        }
        if length == self.len() {
            self.clear();
            return Ok(());
        }

        let mut successor: Option<ChunkId> = None;
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            let chunk = &mut self.arena[id];
            let previous = chunk.previous;
            let (offset, used) = (chunk.offset, chunk.length);

            if offset + used <= start {
                // Everything from here back precedes the removed range
                break;
            }
            if offset >= end {
                chunk.offset -= length;
                successor = Some(id);
                cursor = previous;
                continue;
            }

            let from = start.max(offset) - offset;
            let to = end.min(offset + used) - offset;
            chunk.chars.copy_within(to..used, from);
            chunk.length = used - (to - from);
            chunk.offset = offset.min(start);

            match successor {
                Some(next) if chunk.length == 0 => {
                    self.arena[next].previous = previous;
                    self.arena.release(id);
                }
                _ => successor = Some(id),
            }
            cursor = previous;
        }
        Ok(())
    }

    /// Replace every occurrence of `old` with `new` inside `start..start + count`
    ///
    /// Matches are found left to right and never overlap: after a match the
    /// scan resumes behind it. An empty `new` deletes the matches. All
    /// matches are spliced in one pass over the span they cover.
    pub fn replace(&mut self, old: &str, new: &str, start: usize, count: usize) -> Result<(), TextError> {
        if old.is_empty() {
            return Err(TextError::EmptyPattern);
        }
        self.check_range(start, count)?;

        let pattern: Vec<char> = old.chars().collect();
        let replacement: Vec<char> = new.chars().collect();
        let window = self.copy_range(start, count);
        let matches = find_matches(&window, &pattern);
        let (first, last) = match (matches.first(), matches.last()) {
            (Some(&first), Some(&last)) => (first, last + pattern.len()),
            _ => return Ok(()),
        };

        if replacement.len() == pattern.len() {
            for &at in &matches {
                self.overwrite(start + at, &replacement);
            }
            return Ok(());
        }

        let removed = matches.len() * pattern.len();
        let added = matches
            .len()
            .checked_mul(replacement.len())
            .ok_or(TextError::CapacityExceeded)?;
        if added > removed {
            self.check_growth(added - removed)?;
        }

        let mut spliced = Vec::with_capacity(last - first - removed + added);
        let mut cursor = first;
        for &at in &matches {
            spliced.extend_from_slice(&window[cursor..at]);
            spliced.extend_from_slice(&replacement);
            cursor = at + pattern.len();
        }

        self.remove(start + first, last - first)?;
        self.insert_chars(start + first, &spliced, 1)
    }

    /// Replace every occurrence of `old` with `new` in the whole text
    pub fn replace_all(&mut self, old: &str, new: &str) -> Result<(), TextError> {
        let length = self.len();
        self.replace(old, new, 0, length)
    }

    /// Replace every `old` character with `new` inside `start..start + count`
    pub fn replace_char(&mut self, old: char, new: char, start: usize, count: usize) -> Result<(), TextError> {
        let end = self.check_range(start, count)?;
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            let chunk = &mut self.arena[id];
            if chunk.end() <= start {
                break;
            }
            let from = start.max(chunk.offset) - chunk.offset;
            let to = end.min(chunk.end()).saturating_sub(chunk.offset);
            for c in chunk.chars[from..to.max(from)].iter_mut() {
                if *c == old {
                    *c = new;
                }
            }
            cursor = chunk.previous;
        }
        Ok(())
    }

    pub(crate) fn insert_chars(&mut self, index: usize, value: &[char], count: usize) -> Result<(), TextError> {
        let length = self.len();
        if index > length {
            return Err(TextError::IndexOutOfRange);
        }
        if value.is_empty() || count == 0 {
            return Ok(());
        }
        let total = value
            .len()
            .checked_mul(count)
            .ok_or(TextError::CapacityExceeded)?;
        self.check_growth(total)?;

        if index == length {
            for _ in 0..count {
                self.append_iter(value.iter().copied(), value.len())?;
            }
            return Ok(());
        }

        let (id, mut at) = self.make_room(index, total);
        let chunk = &mut self.arena[id];
        for _ in 0..count {
            chunk.chars[at..at + value.len()].copy_from_slice(value);
            at += value.len();
        }
        Ok(())
    }

    /// Open a gap of `count` characters before `index` (which must be < len)
    ///
    /// Returns the chunk holding the gap and where it starts. The gap is
    /// always contiguous inside that one chunk. Small chunks with enough
    /// spare room shift their tail right; anything else is split, with a
    /// fresh chunk taking the gap plus whichever side of the split is
    /// shorter so the copy stays small.
    fn make_room(&mut self, index: usize, count: usize) -> (ChunkId, usize) {
        let (id, at) = self.locate(index);

        // Everything after the split chunk moves up by `count`
        let mut successor = None;
        let mut cursor = Some(self.head);
        while let Some(current) = cursor {
            if current == id {
                break;
            }
            let chunk = &mut self.arena[current];
            chunk.offset += count;
            successor = Some(current);
            cursor = chunk.previous;
        }

        let chunk = &mut self.arena[id];
        if chunk.length <= 2 * DEFAULT_CAPACITY && chunk.spare() >= count {
            chunk.chars.copy_within(at..chunk.length, at + count);
            chunk.length += count;
            return (id, at);
        }

        trace!("text buffer: splitting chunk to open a gap of {}", count);
        let prefix = at;
        let suffix = chunk.length - at;
        if prefix <= suffix {
            // [prefix | gap] goes in front, the chunk keeps its suffix
            let mut fresh = Chunk::new(prefix + count, chunk.offset, chunk.previous);
            fresh.chars[..prefix].copy_from_slice(&chunk.chars[..prefix]);
            fresh.length = prefix + count;

            chunk.chars.copy_within(prefix..chunk.length, 0);
            chunk.length = suffix;
            chunk.offset += prefix + count;

            let fresh_id = self.arena.alloc(fresh);
            self.arena[id].previous = Some(fresh_id);
            (fresh_id, prefix)
        } else {
            // [gap | suffix] goes behind, the chunk keeps its prefix
            let mut fresh = Chunk::new(count + suffix, chunk.offset + prefix, Some(id));
            fresh.chars[count..count + suffix].copy_from_slice(&chunk.chars[prefix..chunk.length]);
            fresh.length = count + suffix;
            chunk.length = prefix;

            let fresh_id = self.arena.alloc(fresh);
            match successor {
                Some(next) => self.arena[next].previous = Some(fresh_id),
                None => self.head = fresh_id,
            }
            (fresh_id, 0)
        }
    }

    /// Overwrite `value.len()` characters starting at global `index`
    fn overwrite(&mut self, index: usize, value: &[char]) {
        let end = index + value.len();
        let mut cursor = Some(self.head);
        while let Some(id) = cursor {
            let chunk = &mut self.arena[id];
            if chunk.end() <= index {
                break;
            }
            let from = index.max(chunk.offset);
            let to = end.min(chunk.end());
            if from < to {
                chunk.chars[from - chunk.offset..to - chunk.offset]
                    .copy_from_slice(&value[from - index..to - index]);
            }
            cursor = chunk.previous;
        }
    }
}

/// Start offsets of non-overlapping `pattern` matches, left to right
fn find_matches(text: &[char], pattern: &[char]) -> Vec<usize> {
    let mut matches = Vec::new();
    let mut at = 0;
    while at + pattern.len() <= text.len() {
        if text[at..at + pattern.len()] == *pattern {
            matches.push(at);
            at += pattern.len();
        } else {
            at += 1;
        }
    }
    matches
}
