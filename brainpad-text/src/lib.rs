//! Chunked text builder
//!
//! [`TextBuffer`] assembles text the way a string builder does, but stores
//! it as a chain of fixed-capacity chunks instead of one contiguous array.
//! Appending never copies what is already there: when the newest chunk is
//! full a fresh one is linked in front of it. Index, insert, remove and
//! replace walk the chain from the newest chunk back toward the oldest.
//!
//! ```text
//!   head                                    tail
//! ┌──────────────┐ previous ┌──────────┐ previous ┌──────────┐
//! │ offset 24    │ ───────► │ offset 8 │ ───────► │ offset 0 │
//! │ "ld!"        │          │ "...wor" │          │ "Hello, "│
//! └──────────────┘          └──────────┘          └──────────┘
//! ```
//!
//! Chunks live in an arena owned by the buffer and refer to each other by
//! index, so there is exactly one handle to the text and no way to hold on
//! to a stale chunk across a mutation.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

mod buffer;
mod chunk;
mod edit;
mod error;

pub use buffer::{TextBuffer, TextBufferConfig, DEFAULT_CAPACITY, DEFAULT_MAX_CAPACITY, MAX_CHUNK_SIZE};
pub use error::TextError;
