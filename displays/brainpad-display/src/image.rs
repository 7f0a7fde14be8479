//! Bitmap images and blit transforms

use crate::error::ImageError;
use crate::framebuffer::Framebuffer;

/// A borrowed 1-bit image
///
/// Pixels are stored row-major, one byte each; a byte equal to `1` is lit
/// and anything else is unlit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image<'a> {
    width: usize,
    height: usize,
    data: &'a [u8],
}

impl<'a> Image<'a> {
    /// Wrap `data` as a `width` x `height` image
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroSize);
        }
        let expected = width.checked_mul(height).ok_or(ImageError::DataLength {
            expected: usize::MAX,
            actual: data.len(),
        })?;
        if data.len() != expected {
            return Err(ImageError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the source pixel at (`x`, `y`) is lit
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        x < self.width && self.data.get(y * self.width + x) == Some(&1)
    }
}

/// How an image is oriented when drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    #[default]
    None,
    FlipHorizontal,
    FlipVertical,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl Transform {
    /// Destination of source pixel (`xd`, `yd`) for an image of size
    /// `width` x `height` placed at (`x`, `y`)
    ///
    /// Mirrored axes are measured from `x + width` / `y + height`, so a
    /// flipped image lands one pixel further right or down than its
    /// unflipped bounding box. Coordinates saturate at the `i32` limits,
    /// which are off the panel either way.
    pub fn destination(self, x: i32, y: i32, width: i32, height: i32, xd: i32, yd: i32) -> (i32, i32) {
        match self {
            Transform::None => (x.saturating_add(xd), y.saturating_add(yd)),
            Transform::FlipHorizontal => (x.saturating_add(width - xd), y.saturating_add(yd)),
            Transform::FlipVertical => (x.saturating_add(xd), y.saturating_add(height - yd)),
            Transform::Rotate90 => (x.saturating_add(width - yd), y.saturating_add(xd)),
            Transform::Rotate180 => (x.saturating_add(width - xd), y.saturating_add(height - yd)),
            Transform::Rotate270 => (x.saturating_add(yd), y.saturating_add(height - xd)),
        }
    }
}

impl Framebuffer {
    /// Blit `image` at (`x`, `y`) with `transform` applied
    ///
    /// Unlit source pixels clear their destination.
    pub fn draw_image(&mut self, x: i32, y: i32, image: &Image<'_>, transform: Transform) {
        let width = i32::try_from(image.width).unwrap_or(i32::MAX);
        let height = i32::try_from(image.height).unwrap_or(i32::MAX);
        for (yd, row) in (0..height).zip(image.data.chunks_exact(image.width)) {
            for (xd, &value) in (0..width).zip(row) {
                let (px, py) = transform.destination(x, y, width, height, xd, yd);
                self.set_pixel(px, py, value == 1);
            }
        }
    }
}
