//! Text rendering with the built-in 5x8 font

use crate::font::{self, ADVANCE_X, ADVANCE_Y, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::Framebuffer;

impl Framebuffer {
    /// Render `text` with its top-left corner at (`x`, `y`)
    ///
    /// Every glyph column is stretched `h_scale` pixels wide and every row
    /// `v_scale` pixels tall. Glyph cells overwrite what was underneath, lit
    /// and unlit pixels alike, and the spacing column after each glyph is
    /// cleared.
    ///
    /// - `'\n'` moves down one line and keeps the column
    /// - `'\r'` returns to column `x`
    /// - other control characters are skipped
    /// - characters the font lacks print as blanks
    ///
    /// A zero scale draws nothing. Returns the cursor after the last
    /// character; it saturates at the `i32` limits instead of wrapping.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, h_scale: u8, v_scale: u8) -> (i32, i32) {
        if h_scale == 0 || v_scale == 0 {
            return (x, y);
        }
        let (hs, vs) = (i32::from(h_scale), i32::from(v_scale));
        let (mut cx, mut cy) = (x, y);

        for c in text.chars() {
            match c {
                '\n' => cy = cy.saturating_add(ADVANCE_Y * vs),
                '\r' => cx = x,
                c if c.is_ascii_control() && c != '\u{7f}' => {}
                c => {
                    self.draw_glyph(cx, cy, font::glyph(c), hs, vs);
                    cx = cx.saturating_add(ADVANCE_X * hs);
                }
            }
        }

        (cx, cy)
    }

    fn draw_glyph(&mut self, x: i32, y: i32, columns: &[u8; 5], hs: i32, vs: i32) {
        for (col, bits) in (0..).zip(columns.iter()) {
            for row in 0..GLYPH_HEIGHT {
                let on = bits & (1 << row) != 0;
                self.paint(x.saturating_add(col * hs), y.saturating_add(row * vs), hs, vs, on);
            }
        }
        self.paint(x.saturating_add(GLYPH_WIDTH * hs), y, hs, GLYPH_HEIGHT * vs, false);
    }
}
