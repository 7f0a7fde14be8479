//! embedded-graphics integration
//!
//! Lets embedded-graphics primitives, fonts and images render straight
//! into a [`Framebuffer`]. Off-panel pixels are dropped the same way the
//! native primitives drop them.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        match color {
            BinaryColor::Off => Framebuffer::clear(self),
            BinaryColor::On => self.fill_rectangle(0, 0, WIDTH, HEIGHT),
        }
        Ok(())
    }
}
