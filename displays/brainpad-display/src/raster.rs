//! Shape rasterizers
//!
//! Integer-only outlines drawn pixel by pixel through
//! [`Framebuffer::set_pixel`], so they clip at the panel edge for free.
//! Each shape has a `draw_*` and a `clear_*` form sharing one routine.

use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};

impl Framebuffer {
    /// Draw a line, both endpoints included
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.line(x0, y0, x1, y1, true);
    }

    /// Erase a line, both endpoints included
    pub fn clear_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.line(x0, y0, x1, y1, false);
    }

    /// Draw a circle outline
    pub fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        self.circle(cx, cy, radius, true);
    }

    /// Erase a circle outline
    pub fn clear_circle(&mut self, cx: i32, cy: i32, radius: i32) {
        self.circle(cx, cy, radius, false);
    }

    /// Draw a rectangle outline
    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.rectangle(x, y, width, height, true);
    }

    /// Erase a rectangle outline
    pub fn clear_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.rectangle(x, y, width, height, false);
    }

    /// Bresenham with doubled deltas. The longer axis drives the loop;
    /// a 45 degree line counts as x-major.
    ///
    /// Endpoints may lie anywhere in `i32`, so the walk runs in `i64` and
    /// only visits the steps whose major coordinate is on the panel.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let dx = (x1 - x0).abs() << 1;
        let dy = (y1 - y0).abs() << 1;
        let step_x = if x1 < x0 { -1 } else { 1 };
        let step_y = if y1 < y0 { -1 } else { 1 };

        if dx >= dy {
            let walk = Walk {
                start: x0,
                end: x1,
                step: step_x,
                minor: y0,
                minor_step: step_y,
                major_delta: dx,
                minor_delta: dy,
            };
            walk.run(i64::from(WIDTH), |x, y| self.set_pixel(x, y, on));
        } else {
            let walk = Walk {
                start: y0,
                end: y1,
                step: step_y,
                minor: x0,
                minor_step: step_x,
                major_delta: dy,
                minor_delta: dx,
            };
            walk.run(i64::from(HEIGHT), |y, x| self.set_pixel(x, y, on));
        }
    }

    /// Midpoint circle: the four cardinal points, then one octant mirrored
    /// eight ways.
    fn circle(&mut self, cx: i32, cy: i32, radius: i32, on: bool) {
        if radius <= 0 {
            return;
        }
        let (ox, oy, r) = (i64::from(cx), i64::from(cy), i64::from(radius));
        if ox + r < 0 || ox - r >= i64::from(WIDTH) || oy + r < 0 || oy - r >= i64::from(HEIGHT) {
            return;
        }

        let mut f = 1 - i64::from(radius);
        let mut ddf_x = 1;
        let mut ddf_y = -2 * i64::from(radius);
        let mut x = 0;
        let mut y = radius;

        let mut plot = |dx: i32, dy: i32| self.set_pixel(cx.saturating_add(dx), cy.saturating_add(dy), on);

        plot(0, radius);
        plot(0, -radius);
        plot(radius, 0);
        plot(-radius, 0);

        while x < y {
            if f >= 0 {
                y -= 1;
                ddf_y += 2;
                f += ddf_y;
            }
            x += 1;
            ddf_x += 2;
            f += ddf_x;

            plot(x, y);
            plot(-x, y);
            plot(x, -y);
            plot(-x, -y);
            plot(y, x);
            plot(-y, x);
            plot(y, -x);
            plot(-y, -x);
        }
    }

    /// Top and bottom runs cover `x..x+width`; the sides close the corners
    /// at `x + width - 1` and `y + height - 1`. Runs are cut to the panel
    /// before looping.
    fn rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, on: bool) {
        if width <= 0 || height <= 0 {
            return;
        }

        let right = x.saturating_add(width - 1);
        let bottom = y.saturating_add(height - 1);
        for i in x.max(0)..=right.min(WIDTH - 1) {
            self.set_pixel(i, y, on);
            self.set_pixel(i, bottom, on);
        }
        for i in y.max(0)..=bottom.min(HEIGHT - 1) {
            self.set_pixel(x, i, on);
            self.set_pixel(right, i, on);
        }
    }
}

/// One Bresenham pass along its major axis
///
/// After `k` steps the error term has absorbed `k * minor_delta`, and it
/// stays inside a window `major_delta` wide, so the number of minor steps
/// taken so far is `(major_delta / 2 + k * minor_delta) / major_delta`.
/// That lets the pass start at the first on-panel step instead of at the
/// endpoint.
struct Walk {
    start: i64,
    end: i64,
    step: i64,
    minor: i64,
    minor_step: i64,
    major_delta: i64,
    minor_delta: i64,
}

impl Walk {
    fn run(&self, limit: i64, mut plot: impl FnMut(i32, i32)) {
        let steps = (self.end - self.start).abs();
        let (first, last) = if self.step > 0 {
            ((-self.start).max(0), steps.min(limit - 1 - self.start))
        } else {
            ((self.start - (limit - 1)).max(0), steps.min(self.start))
        };

        for k in first..=last {
            let major = self.start + k * self.step;
            let minor = self.minor + self.minor_step * self.minor_steps(k);
            // major is on the panel; minor lies between two i32 endpoints
            if let (Ok(major), Ok(minor)) = (i32::try_from(major), i32::try_from(minor)) {
                plot(major, minor);
            }
        }
    }

    fn minor_steps(&self, k: i64) -> i64 {
        if self.major_delta == 0 {
            return 0;
        }
        let taken = (i128::from(self.major_delta / 2) + i128::from(k) * i128::from(self.minor_delta))
            / i128::from(self.major_delta);
        i64::try_from(taken).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use crate::framebuffer::{Framebuffer, HEIGHT, WIDTH};
    use proptest::prelude::*;

    fn lit(fb: &Framebuffer) -> std::vec::Vec<(i32, i32)> {
        let mut out = std::vec::Vec::new();
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                if fb.pixel(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn test_horizontal_line_exact() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 10, 0);
        let expected: std::vec::Vec<_> = (0..=10).map(|x| (x, 0)).collect();
        assert_eq!(lit(&fb), expected);
    }

    #[test]
    fn test_vertical_line_reversed() {
        let mut fb = Framebuffer::new();
        fb.draw_line(3, 9, 3, 2);
        let expected: std::vec::Vec<_> = (2..=9).map(|y| (3, y)).collect();
        assert_eq!(lit(&fb), expected);
    }

    #[test]
    fn test_diagonal_line() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 5, 5);
        let expected: std::vec::Vec<_> = (0..=5).map(|i| (i, i)).collect();
        assert_eq!(lit(&fb), expected);
    }

    #[test]
    fn test_single_point_line() {
        let mut fb = Framebuffer::new();
        fb.draw_line(7, 7, 7, 7);
        assert_eq!(lit(&fb), [(7, 7)]);
    }

    #[test]
    fn test_steep_line_one_pixel_per_row() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 3, 20);
        let pixels = lit(&fb);
        assert_eq!(pixels.len(), 21);
        for y in 0..=20 {
            assert_eq!(pixels.iter().filter(|p| p.1 == y).count(), 1);
        }
    }

    #[test]
    fn test_clear_line_erases() {
        let mut fb = Framebuffer::new();
        fb.draw_line(0, 0, 30, 12);
        fb.clear_line(0, 0, 30, 12);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_line_clips_at_edge() {
        let mut fb = Framebuffer::new();
        fb.draw_line(120, 10, 140, 10);
        assert_eq!(fb.lit_pixels(), 8);
    }

    #[test]
    fn test_circle_cardinal_points() {
        let mut fb = Framebuffer::new();
        fb.draw_circle(50, 30, 5);
        assert!(fb.pixel(50, 35));
        assert!(fb.pixel(50, 25));
        assert!(fb.pixel(55, 30));
        assert!(fb.pixel(45, 30));
        assert!(!fb.pixel(50, 30));
    }

    #[test]
    fn test_circle_is_symmetric() {
        let mut fb = Framebuffer::new();
        fb.draw_circle(40, 30, 9);
        for (x, y) in lit(&fb) {
            let (dx, dy) = (x - 40, y - 30);
            assert!(fb.pixel(40 - dx, 30 + dy));
            assert!(fb.pixel(40 + dx, 30 - dy));
            assert!(fb.pixel(40 + dy, 30 + dx));
        }
    }

    #[test]
    fn test_circle_non_positive_radius() {
        let mut fb = Framebuffer::new();
        fb.draw_circle(50, 30, 0);
        fb.draw_circle(50, 30, -4);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_rectangle_outline() {
        let mut fb = Framebuffer::new();
        fb.draw_rectangle(10, 10, 5, 4);
        // 2 * 5 + 2 * 4 - 4 shared corners
        assert_eq!(fb.lit_pixels(), 14);
        assert!(fb.pixel(10, 10));
        assert!(fb.pixel(14, 13));
        assert!(!fb.pixel(11, 11));
        assert!(!fb.pixel(15, 10));
    }

    #[test]
    fn test_rectangle_non_positive_is_noop() {
        let mut fb = Framebuffer::new();
        fb.draw_rectangle(10, 10, -5, 4);
        fb.draw_rectangle(10, 10, 5, -4);
        fb.draw_rectangle(10, 10, 0, 5);
        fb.draw_rectangle(10, 10, 5, 0);
        fb.draw_rectangle(10, 10, 0, 0);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_one_pixel_rectangle() {
        let mut fb = Framebuffer::new();
        fb.draw_rectangle(10, 10, 1, 1);
        assert_eq!(lit(&fb), [(10, 10)]);
    }

    #[test]
    fn test_shapes_near_i32_limits_are_dropped() {
        let mut fb = Framebuffer::new();
        fb.draw_rectangle(i32::MAX - 1, 0, 5, 5);
        fb.draw_rectangle(0, i32::MIN, 5, 5);
        fb.draw_circle(i32::MAX - 2, 10, 5);
        fb.draw_circle(10, i32::MIN + 2, 5);
        fb.draw_circle(i32::MIN, i32::MIN, i32::MAX);
        fb.draw_line(i32::MAX - 5, 0, i32::MAX, 3);
        assert_eq!(fb.lit_pixels(), 0);
    }

    #[test]
    fn test_rectangle_wider_than_i32_range_clips() {
        let mut fb = Framebuffer::new();
        fb.draw_rectangle(-10, 5, i32::MAX, 10);
        // top and bottom rows only; both sides are off the panel
        assert_eq!(fb.lit_pixels(), 2 * 128);
        assert!(fb.pixel(0, 5));
        assert!(fb.pixel(127, 14));
        assert!(!fb.pixel(0, 6));
    }

    #[test]
    fn test_line_spanning_i32_range() {
        let mut fb = Framebuffer::new();
        fb.draw_line(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(fb.lit_pixels(), 128);

        fb.clear();
        fb.draw_line(0, i32::MAX, 0, i32::MIN);
        assert_eq!(fb.lit_pixels(), 64);

        fb.clear();
        fb.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        let expected: std::vec::Vec<_> = (0..64).map(|i| (i, i)).collect();
        assert_eq!(lit(&fb), expected);
    }

    #[test]
    fn test_clear_rectangle_keeps_interior() {
        let mut fb = Framebuffer::new();
        fb.fill_rectangle(0, 0, 6, 6);
        fb.clear_rectangle(0, 0, 6, 6);
        assert_eq!(fb.lit_pixels(), 16);
        assert!(fb.pixel(1, 1));
    }

    /// Step-by-step Bresenham, one pixel per iteration
    fn incremental_line(x0: i32, y0: i32, x1: i32, y1: i32) -> Framebuffer {
        let mut fb = Framebuffer::new();
        let (mut dx, mut dy) = (x1 - x0, y1 - y0);
        let step_x = if dx < 0 { -1 } else { 1 };
        let step_y = if dy < 0 { -1 } else { 1 };
        dx = dx.abs() << 1;
        dy = dy.abs() << 1;
        let (mut x, mut y) = (x0, y0);
        fb.draw_point(x, y);
        if dx >= dy {
            let mut fraction = dy - (dx >> 1);
            while x != x1 {
                if fraction >= 0 {
                    y += step_y;
                    fraction -= dx;
                }
                x += step_x;
                fraction += dy;
                fb.draw_point(x, y);
            }
        } else {
            let mut fraction = dx - (dy >> 1);
            while y != y1 {
                if fraction >= 0 {
                    x += step_x;
                    fraction -= dy;
                }
                y += step_y;
                fraction += dx;
                fb.draw_point(x, y);
            }
        }
        fb
    }

    proptest! {
        #[test]
        fn prop_line_matches_incremental_walk(
            x0 in -400i32..400, y0 in -300i32..300, x1 in -400i32..400, y1 in -300i32..300
        ) {
            let mut fb = Framebuffer::new();
            fb.draw_line(x0, y0, x1, y1);
            let reference = incremental_line(x0, y0, x1, y1);
            prop_assert_eq!(fb.vram(), reference.vram());
        }

        #[test]
        fn prop_line_contains_endpoints(
            x0 in 0i32..128, y0 in 0i32..64, x1 in 0i32..128, y1 in 0i32..64
        ) {
            let mut fb = Framebuffer::new();
            fb.draw_line(x0, y0, x1, y1);
            prop_assert!(fb.pixel(x0, y0));
            prop_assert!(fb.pixel(x1, y1));
            let major = (x1 - x0).abs().max((y1 - y0).abs());
            prop_assert_eq!(fb.lit_pixels(), major as u32 + 1);
        }
    }
}
