use palette::{FromColor, LinSrgba, Srgba};

/// Linear, premultiplied RGBA. Shells that composite in linear space take
/// shadow and fill colors in this form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorLinPremul {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Alias for the premultiplied linear color type, for a friendlier name in APIs.
pub type Color = ColorLinPremul;

impl ColorLinPremul {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Create from sRGB u8 RGBA array.
    #[inline]
    pub fn from_srgba_u8(c: [u8; 4]) -> Self {
        Self::from_srgba(c[0], c[1], c[2], c[3] as f32 / 255.0)
    }

    /// Create from sRGB u8 RGB with float alpha (CSS-like rgba).
    #[inline]
    pub fn from_srgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        let s = Srgba::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a);
        let lin: LinSrgba = LinSrgba::from_color(s);
        Self {
            r: lin.red * lin.alpha,
            g: lin.green * lin.alpha,
            b: lin.blue * lin.alpha,
            a: lin.alpha,
        }
    }

    /// Convert back to sRGB u8 RGBA array (unpremultiplied).
    #[inline]
    pub fn to_srgba_u8(&self) -> [u8; 4] {
        let (r, g, b) = if self.a > 0.0001 {
            (self.r / self.a, self.g / self.a, self.b / self.a)
        } else {
            (0.0, 0.0, 0.0)
        };

        let lin = LinSrgba::new(r, g, b, self.a);
        let srgb: Srgba = Srgba::from_color(lin);

        [
            (srgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
            (srgb.alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premultiplies_by_alpha() {
        let c = ColorLinPremul::from_srgba(255, 255, 255, 0.5);
        assert!((c.a - 0.5).abs() < 1e-6);
        assert!((c.r - 0.5).abs() < 1e-4);
    }

    #[test]
    fn srgb_round_trip_is_stable_for_opaque_colors() {
        let c = ColorLinPremul::from_srgba_u8([12, 200, 99, 255]);
        assert_eq!(c.to_srgba_u8(), [12, 200, 99, 255]);
    }

    #[test]
    fn out_of_range_alpha_is_clamped() {
        assert_eq!(ColorLinPremul::from_srgba(0, 0, 0, 3.0).a, 1.0);
        assert!(ColorLinPremul::from_srgba(0, 0, 0, f32::NAN).is_transparent());
    }
}
