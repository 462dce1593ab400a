use bytemuck::{Pod, Zeroable};

/// Straight-alpha sRGB color, one byte per channel.
///
/// Layout matches `wgpu::TextureFormat::Rgba8UnormSrgb`, so a `&[Rgba8]` can be
/// uploaded with `bytemuck::cast_slice`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque color from a `0xRRGGBB` literal.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Same color with alpha replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Composites `self` over `dst` (Porter-Duff source-over, straight alpha).
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            255 => return self,
            0 => return dst,
            _ => {}
        }

        let sa = self.a as u32;
        let da = dst.a as u32 * (255 - sa) / 255;
        let out_a = sa + da;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        let mix = |s: u8, d: u8| -> u8 { ((s as u32 * sa + d as u32 * da) / out_a) as u8 };

        Self::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            out_a as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_hex_splits_channels() {
        assert_eq!(Rgba8::from_hex(0x556B2F), Rgba8::rgb(0x55, 0x6B, 0x2F));
    }

    #[test]
    fn opaque_source_replaces_destination() {
        let red = Rgba8::rgb(255, 0, 0);
        assert_eq!(red.over(Rgba8::WHITE), red);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        assert_eq!(Rgba8::TRANSPARENT.over(Rgba8::WHITE), Rgba8::WHITE);
    }

    #[test]
    fn half_alpha_over_opaque_mixes() {
        let out = Rgba8::new(255, 255, 255, 128).over(Rgba8::BLACK);
        assert_eq!(out.a, 255);
        assert!(out.r >= 127 && out.r <= 129, "r = {}", out.r);
    }

    #[test]
    fn layout_is_four_bytes() {
        let px = [Rgba8::new(1, 2, 3, 4)];
        let bytes: &[u8] = bytemuck::cast_slice(&px);
        assert_eq!(bytes, &[1, 2, 3, 4]);
    }
}
