//! Compile-time drawing surface for the built-in faces.
//!
//! Every method is a `const fn`, so frames are rasterised by the compiler
//! and land in flash as plain byte arrays. Pixels outside the canvas are
//! clipped silently.

use super::{FRAME_BYTES, FRAME_HEIGHT, FRAME_WIDTH};

const W: i32 = FRAME_WIDTH as i32;
const H: i32 = FRAME_HEIGHT as i32;
const ROW_BYTES: usize = (FRAME_WIDTH as usize).div_ceil(8);

/// A 128×64 1-bpp frame, packed row-major with the MSB as the leftmost pixel.
#[derive(Clone, Copy)]
pub(crate) struct Canvas {
    bytes: [u8; FRAME_BYTES],
}

impl Canvas {
    pub(crate) const fn new() -> Self {
        Self {
            bytes: [0; FRAME_BYTES],
        }
    }

    pub(crate) const fn into_bytes(self) -> [u8; FRAME_BYTES] {
        self.bytes
    }

    /// Filled circle.
    pub(crate) const fn disc(mut self, cx: i32, cy: i32, r: i32) -> Self {
        self.ellipse_px(cx, cy, r, r, true);
        self
    }

    /// Filled axis-aligned ellipse with radii `rx`, `ry`.
    pub(crate) const fn ellipse(mut self, cx: i32, cy: i32, rx: i32, ry: i32) -> Self {
        self.ellipse_px(cx, cy, rx, ry, true);
        self
    }

    /// Circle outline `thickness` pixels wide, drawn inwards from `r`.
    pub(crate) const fn ring(mut self, cx: i32, cy: i32, r: i32, thickness: i32) -> Self {
        self.ring_px(cx, cy, r, thickness, -r);
        self
    }

    /// Lower half of a circle outline: a smile.
    pub(crate) const fn smile(mut self, cx: i32, cy: i32, r: i32, thickness: i32) -> Self {
        self.ring_px(cx, cy, r, thickness, 0);
        self
    }

    /// Filled rectangle, corners inclusive.
    pub(crate) const fn rect(mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        self.rect_px(x0, y0, x1, y1, true);
        self
    }

    /// Clears a rectangle, corners inclusive.
    pub(crate) const fn erase(mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        self.rect_px(x0, y0, x1, y1, false);
        self
    }

    /// Straight line, `thickness` pixels square per step.
    pub(crate) const fn line(mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: i32) -> Self {
        // Bresenham over the integer grid.
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.rect_px(x, y, x + thickness - 1, y + thickness - 1, true);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        self
    }

    // ── Pixel plumbing ───────────────────────────────────────────────

    const fn put(&mut self, x: i32, y: i32, on: bool) {
        if x < 0 || y < 0 || x >= W || y >= H {
            return;
        }
        let index = y as usize * ROW_BYTES + x as usize / 8;
        let mask = 0x80u8 >> (x as usize % 8);
        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
    }

    const fn rect_px(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        let mut y = y0;
        while y <= y1 {
            let mut x = x0;
            while x <= x1 {
                self.put(x, y, on);
                x += 1;
            }
            y += 1;
        }
    }

    const fn ellipse_px(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, on: bool) {
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let limit = rx2 * ry2 + if rx2 > ry2 { rx2 } else { ry2 };
        let mut dy = -ry;
        while dy <= ry {
            let mut dx = -rx;
            while dx <= rx {
                if dx * dx * ry2 + dy * dy * rx2 <= limit {
                    self.put(cx + dx, cy + dy, on);
                }
                dx += 1;
            }
            dy += 1;
        }
    }

    const fn ring_px(&mut self, cx: i32, cy: i32, r: i32, thickness: i32, from_dy: i32) {
        let outer = r * r + r;
        let inner_r = r - thickness;
        let inner = inner_r * inner_r + inner_r;
        let mut dy = from_dy;
        while dy <= r {
            let mut dx = -r;
            while dx <= r {
                let d = dx * dx + dy * dy;
                if d <= outer && d > inner {
                    self.put(cx + dx, cy + dy, true);
                }
                dx += 1;
            }
            dy += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(bytes: &[u8; FRAME_BYTES], x: usize, y: usize) -> bool {
        bytes[y * ROW_BYTES + x / 8] & (0x80 >> (x % 8)) != 0
    }

    #[test]
    fn new_canvas_is_dark() {
        assert!(Canvas::new().into_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn leftmost_pixel_is_msb() {
        let bytes = Canvas::new().rect(0, 0, 0, 0).into_bytes();
        assert_eq!(bytes[0], 0x80);
        let bytes = Canvas::new().rect(127, 63, 127, 63).into_bytes();
        assert_eq!(bytes[FRAME_BYTES - 1], 0x01);
    }

    #[test]
    fn drawing_is_clipped() {
        let bytes = Canvas::new().rect(-10, -10, 200, 200).into_bytes();
        assert!(bytes.iter().all(|&b| b == 0xFF));
    }

    #[test]
    fn erase_clears_pixels() {
        let bytes = Canvas::new().rect(0, 0, 15, 0).erase(8, 0, 15, 0).into_bytes();
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(bytes[1], 0x00);
    }

    #[test]
    fn disc_covers_centre_not_corners() {
        let bytes = Canvas::new().disc(20, 20, 5).into_bytes();
        assert!(lit(&bytes, 20, 20));
        assert!(lit(&bytes, 25, 20));
        assert!(!lit(&bytes, 25, 25));
    }

    #[test]
    fn ring_is_hollow() {
        let bytes = Canvas::new().ring(64, 32, 10, 2).into_bytes();
        assert!(lit(&bytes, 74, 32));
        assert!(!lit(&bytes, 64, 32));
    }

    #[test]
    fn smile_is_lower_half_only() {
        let bytes = Canvas::new().smile(64, 32, 10, 2).into_bytes();
        assert!(lit(&bytes, 64, 42));
        assert!(!lit(&bytes, 64, 22));
    }

    #[test]
    fn line_hits_both_ends() {
        let bytes = Canvas::new().line(3, 60, 40, 5, 1).into_bytes();
        assert!(lit(&bytes, 3, 60));
        assert!(lit(&bytes, 40, 5));
    }
}
