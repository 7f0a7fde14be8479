//! BrainPad display stack
//!
//! This crate provides:
//! - [`Framebuffer`]: the 128x64 1-bit-per-pixel frame, packed in the
//!   SSD1306's page layout with the I2C data-control byte in front
//! - Rasterizers drawing into it: points, lines, circles, rectangles,
//!   transformed bitmap images and a 5x8 bitmap font
//! - [`Ssd1306`]: brings up the OLED controller and flushes frames to it
//!   over any [`RegisterBus`](brainpad_hal::RegisterBus)
//! - An `embedded-graphics` `DrawTarget` for the framebuffer, so the wider
//!   embedded-graphics ecosystem can render into the same frame
//!
//! # Coordinates
//!
//! All drawing takes signed coordinates. Anything landing off the panel is
//! dropped silently: shapes near the edge are clipped, never rejected.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod error;
pub mod font;
pub mod framebuffer;
mod graphics;
pub mod image;
mod raster;
pub mod ssd1306;
mod text;

// Re-export key types
pub use error::{DisplayError, ImageError};
pub use framebuffer::{bit_address, BitAddress, Framebuffer, DATA_CONTROL, HEIGHT, VRAM_LEN, WIDTH};
pub use image::{Image, Transform};
pub use ssd1306::{DisplayConfig, DisplayState, Ssd1306};
