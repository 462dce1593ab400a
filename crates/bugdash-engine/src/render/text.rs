use std::fmt;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle as GlyphStyle};

use crate::paint::Rgba8;

use super::RenderSurface;

/// Error returned by [`Font::from_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// A parsed TrueType/OpenType font.
pub struct Font {
    inner: fontdue::Font,
}

impl Font {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Width of `text` laid out at `size` px on a single line.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.layout(text, size)
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0, f32::max)
    }

    fn ascent(&self, size: f32) -> f32 {
        self.inner
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size)
    }

    fn layout(&self, text: &str, size: f32) -> Layout {
        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.inner], &GlyphStyle::new(text, size, 0));
        layout
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").finish_non_exhaustive()
    }
}

/// Horizontal anchoring of the text origin.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// How a line of text is painted.
#[derive(Debug, Copy, Clone)]
pub struct TextStyle {
    /// Pixel size.
    pub size: f32,
    pub fill: Rgba8,
    /// One-pixel outline drawn beneath the fill.
    pub outline: Option<Rgba8>,
    pub align: TextAlign,
}

impl TextStyle {
    pub fn new(size: f32, fill: Rgba8) -> Self {
        Self {
            size,
            fill,
            outline: None,
            align: TextAlign::Left,
        }
    }

    pub fn outline(mut self, color: Rgba8) -> Self {
        self.outline = Some(color);
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }
}

const OUTLINE_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl RenderSurface {
    /// Draws one line of text whose baseline starts at `(x, baseline)`,
    /// adjusted by `style.align`.
    pub fn draw_text(&mut self, font: &Font, text: &str, x: f32, baseline: f32, style: &TextStyle) {
        let layout = font.layout(text, style.size);
        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return;
        }

        let width = glyphs
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0, f32::max);
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        let top = baseline - font.ascent(style.size);

        for glyph in glyphs {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.inner.rasterize_config(glyph.key);
            let gx = (left + glyph.x).round() as i32;
            let gy = (top + glyph.y).round() as i32;
            let (w, h) = (metrics.width as u32, metrics.height as u32);

            if let Some(outline) = style.outline {
                for (dx, dy) in OUTLINE_OFFSETS {
                    self.draw_coverage(gx + dx, gy + dy, w, h, &coverage, outline);
                }
            }
            self.draw_coverage(gx, gy, w, h, &coverage, style.fill);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let err = Font::from_bytes(b"not a font").unwrap_err();
        assert!(err.to_string().starts_with("font load error"));
    }

    #[test]
    fn style_builder_sets_fields() {
        let style = TextStyle::new(20.0, Rgba8::BLACK)
            .outline(Rgba8::from_hex(0xcccccc))
            .align(TextAlign::Center);
        assert_eq!(style.align, TextAlign::Center);
        assert_eq!(style.outline, Some(Rgba8::rgb(0xcc, 0xcc, 0xcc)));
    }
}
