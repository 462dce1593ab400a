use crate::paint::Rgba8;

use super::Image;

/// Fixed-size drawing target for one game.
///
/// Created once by the loop controller and kept for the life of the process.
/// Only the loop writes to it, during a tick; collaborators reach it through
/// the `DrawCtx` they are handed.
pub struct RenderSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl RenderSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba8::TRANSPARENT; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major, `width * 4` bytes per row.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    pub fn clear(&mut self, color: Rgba8) {
        self.pixels.fill(color);
    }

    /// Blends `color` over the rectangle, clipped to the surface.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba8) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else { return };
        for py in y0..y1 {
            for px in x0..x1 {
                let i = self.index(px, py);
                self.pixels[i] = color.over(self.pixels[i]);
            }
        }
    }

    /// Draws `image` with its top-left corner at `(x, y)`.
    ///
    /// Source pixels are composited over what is already there, so later draws
    /// occlude earlier ones where both are opaque.
    pub fn draw_image(&mut self, image: &Image, x: i32, y: i32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, image.width(), image.height()) else {
            return;
        };

        let src = image.pixels();
        let src_w = image.width() as i64;

        for py in y0..y1 {
            let sy = py as i64 - y as i64;
            for px in x0..x1 {
                let sx = px as i64 - x as i64;
                let s = src[(sy * src_w + sx) as usize];
                if s.a == 0 {
                    continue;
                }
                let i = self.index(px, py);
                self.pixels[i] = s.over(self.pixels[i]);
            }
        }
    }

    /// Blends `color` scaled by an 8-bit coverage mask (glyph bitmaps).
    pub(crate) fn draw_coverage(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        coverage: &[u8],
        color: Rgba8,
    ) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else { return };

        for py in y0..y1 {
            let cy = py as i64 - y as i64;
            for px in x0..x1 {
                let cx = px as i64 - x as i64;
                let Some(&c) = coverage.get((cy * w as i64 + cx) as usize) else { continue };
                if c == 0 {
                    continue;
                }
                let a = (color.a as u32 * c as u32 / 255) as u8;
                let i = self.index(px, py);
                self.pixels[i] = color.with_alpha(a).over(self.pixels[i]);
            }
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Intersects a rectangle with the surface bounds.
    ///
    /// Returns the half-open pixel range `[x0, x1) x [y0, y1)`, or `None` when
    /// nothing is visible.
    fn clip(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (x as i64).max(0);
        let y0 = (y as i64).max(0);
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::rgb(255, 0, 0);
    const BLUE: Rgba8 = Rgba8::rgb(0, 0, 255);

    #[test]
    fn new_surface_is_transparent() {
        let s = RenderSurface::new(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert!(s.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
        assert_eq!(s.as_bytes().len(), 48);
    }

    #[test]
    fn draw_image_places_pixels() {
        let mut s = RenderSurface::new(4, 4);
        s.draw_image(&Image::filled(2, 2, RED), 1, 1);
        assert_eq!(s.pixel(0, 0), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.pixel(1, 1), Some(RED));
        assert_eq!(s.pixel(2, 2), Some(RED));
        assert_eq!(s.pixel(3, 3), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn draw_image_clips_negative_origin() {
        let mut s = RenderSurface::new(4, 4);
        s.draw_image(&Image::filled(3, 3, RED), -2, -2);
        assert_eq!(s.pixel(0, 0), Some(RED));
        assert_eq!(s.pixel(1, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn draw_image_fully_outside_is_noop() {
        let mut s = RenderSurface::new(4, 4);
        s.draw_image(&Image::filled(3, 3, RED), 10, 0);
        s.draw_image(&Image::filled(3, 3, RED), i32::MIN, i32::MIN);
        assert!(s.pixels().iter().all(|p| *p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn later_draws_occlude_earlier_ones() {
        let mut s = RenderSurface::new(2, 1);
        s.draw_image(&Image::filled(2, 1, RED), 0, 0);
        s.draw_image(&Image::filled(1, 1, BLUE), 1, 0);
        assert_eq!(s.pixel(0, 0), Some(RED));
        assert_eq!(s.pixel(1, 0), Some(BLUE));
    }

    #[test]
    fn transparent_image_pixels_leave_background() {
        let mut s = RenderSurface::new(2, 1);
        s.clear(BLUE);
        s.draw_image(&Image::filled(2, 1, Rgba8::TRANSPARENT), 0, 0);
        assert_eq!(s.pixel(0, 0), Some(BLUE));
    }

    #[test]
    fn fill_rect_clips() {
        let mut s = RenderSurface::new(3, 3);
        s.fill_rect(2, 2, 5, 5, RED);
        assert_eq!(s.pixel(2, 2), Some(RED));
        assert_eq!(s.pixel(1, 1), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn coverage_scales_alpha() {
        let mut s = RenderSurface::new(2, 1);
        s.clear(Rgba8::BLACK);
        s.draw_coverage(0, 0, 2, 1, &[0, 255], Rgba8::WHITE);
        assert_eq!(s.pixel(0, 0), Some(Rgba8::BLACK));
        assert_eq!(s.pixel(1, 0), Some(Rgba8::WHITE));
    }
}
