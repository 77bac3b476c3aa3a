//! RGBA colors with CSS output

/// 8-bit RGB with float alpha, matching CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);

    /// Opaque color from 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear blend toward `other` (t clamped to [0, 1])
    pub fn mix(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a.max(0.0))
        }
    }
}

/// Palette shared by the scenes
pub mod palette {
    use super::Color;

    pub const NIGHT: Color = Color::hex(0x020617);
    pub const SLATE_900: Color = Color::hex(0x0f172a);
    pub const SLATE_800: Color = Color::hex(0x1e293b);
    pub const SLATE_600: Color = Color::hex(0x4b5563);
    pub const SLATE_500: Color = Color::hex(0x64748b);
    pub const GRAY_200: Color = Color::hex(0xe5e7eb);
    pub const GRAY_400: Color = Color::hex(0x9ca3af);
    pub const ION_GLOW: Color = Color::rgba(248, 250, 252, 0.9);
    pub const OUTLINE: Color = Color::rgba(148, 163, 184, 0.8);
    pub const ELECTRON_CORE: Color = Color::hex(0xe0f2fe);
    pub const ELECTRON_GLOW: Color = Color::rgba(56, 189, 248, 0.95);
    pub const ELECTRON_HALO: Color = Color::rgba(8, 47, 73, 0.5);
    pub const AMBER: Color = Color::hex(0xfacc15);
    pub const HEAT: Color = Color::hex(0xf97316);
    pub const GREEN: Color = Color::hex(0x22c55e);
    pub const CARBON: Color = Color::hex(0x111827);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        let c = Color::hex(0x38bdf8);
        assert_eq!((c.r, c.g, c.b), (0x38, 0xbd, 0xf8));
        assert_eq!(c.to_css(), "#38bdf8");
    }

    #[test]
    fn test_rgba_css() {
        assert_eq!(Color::rgba(8, 47, 73, 0.5).to_css(), "rgba(8, 47, 73, 0.500)");
    }

    #[test]
    fn test_mix() {
        let c = Color::hex(0x000000).mix(Color::hex(0xffffff), 0.5);
        assert_eq!((c.r, c.g, c.b), (128, 128, 128));
        assert_eq!(Color::BLACK.mix(Color::hex(0xffffff), 4.0).r, 255);
    }
}
