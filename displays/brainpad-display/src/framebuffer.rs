//! Packed 1-bit framebuffer
//!
//! The frame is stored exactly as the SSD1306 wants it on the wire in
//! horizontal addressing mode: eight pages of 128 column bytes, each byte
//! holding eight vertically stacked pixels with bit 0 at the top. Byte 0 is
//! the I2C data-control marker, so a flush is a single write of the whole
//! array.
//!
//! ```text
//!   vram[0]            = 0x40
//!   vram[1 + x + 128*p] = pixels (x, 8p..8p+7), LSB = row 8p
//! ```

/// Panel width in pixels
pub const WIDTH: i32 = 128;

/// Panel height in pixels
pub const HEIGHT: i32 = 64;

/// Control byte that marks the rest of a transaction as display data
pub const DATA_CONTROL: u8 = 0x40;

/// Frame length in bytes, including the leading [`DATA_CONTROL`] byte
pub const VRAM_LEN: usize = 1 + (WIDTH as usize) * (HEIGHT as usize) / 8;

/// Location of one pixel inside the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitAddress {
    /// Byte index into [`Framebuffer::vram`]
    pub byte: usize,
    /// Single-bit mask within that byte
    pub mask: u8,
}

/// Map a pixel coordinate to its frame location
///
/// Returns `None` for anything off the panel. Every drawing primitive goes
/// through here, which is what keeps writes inside the pixel area.
pub fn bit_address(x: i32, y: i32) -> Option<BitAddress> {
    if !(0..WIDTH).contains(&x) || !(0..HEIGHT).contains(&y) {
        return None;
    }
    let (x, y) = (x as usize, y as usize);
    Some(BitAddress {
        byte: 1 + x + (y / 8) * WIDTH as usize,
        mask: 1 << (y % 8),
    })
}

/// 128x64 monochrome frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    vram: [u8; VRAM_LEN],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// A blank frame
    pub const fn new() -> Self {
        let mut vram = [0u8; VRAM_LEN];
        vram[0] = DATA_CONTROL;
        Self { vram }
    }

    /// The whole frame, header byte included, ready to go on the wire
    pub fn vram(&self) -> &[u8] {
        &self.vram
    }

    /// Turn a pixel on or off; off-panel coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(BitAddress { byte, mask }) = bit_address(x, y) {
            if on {
                self.vram[byte] |= mask;
            } else {
                self.vram[byte] &= !mask;
            }
        }
    }

    /// Turn a pixel on
    pub fn draw_point(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, true);
    }

    /// Turn a pixel off
    pub fn clear_point(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, false);
    }

    /// Current state of a pixel; off-panel reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        bit_address(x, y).is_some_and(|a| self.vram[a.byte] & a.mask != 0)
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.vram.fill(0);
        self.vram[0] = DATA_CONTROL;
    }

    /// Turn off every pixel in a rectangle
    ///
    /// The full panel takes the fast path through [`clear`](Self::clear).
    pub fn clear_region(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if (x, y, width, height) == (0, 0, WIDTH, HEIGHT) {
            self.clear();
        } else {
            self.paint(x, y, width, height, false);
        }
    }

    /// Turn on every pixel in a rectangle
    pub fn fill_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.paint(x, y, width, height, true);
    }

    /// Set a solid block; non-positive dimensions draw nothing
    pub(crate) fn paint(&mut self, x: i32, y: i32, width: i32, height: i32, on: bool) {
        // Pixels outside the panel would be dropped anyway
        let rows = y.max(0)..y.saturating_add(height).min(HEIGHT);
        let columns = x.max(0)..x.saturating_add(width).min(WIDTH);
        for py in rows {
            for px in columns.clone() {
                self.set_pixel(px, py, on);
            }
        }
    }

    /// Count of lit pixels
    pub fn lit_pixels(&self) -> u32 {
        self.vram[1..].iter().map(|b| b.count_ones()).sum()
    }
}
