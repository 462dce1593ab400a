use std::fmt;

use crate::paint::Rgba8;

/// Decoded RGBA image, the asset type handed out by resource providers.
#[derive(Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl Image {
    /// Wraps row-major pixels. Returns `None` when the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self { width, height, pixels })
    }

    /// Image of a single flat color.
    pub fn filled(width: u32, height: u32, color: Rgba8) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Converts a decoded `image` buffer.
    pub fn from_rgba_image(img: ::image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img
            .into_raw()
            .chunks_exact(4)
            .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
            .collect();
        Self { width, height, pixels }
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

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
