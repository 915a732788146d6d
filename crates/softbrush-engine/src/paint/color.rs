use thiserror::Error;

/// Premultiplied RGBA color with `f32` channels in `[0, 1]`.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
///
/// Rationale:
/// - Additive accumulation and source-over blending are plain multiply-adds.
/// - Matches the pixel layout of [`RgbaSurface`](crate::raster::RgbaSurface).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

/// Failure to parse a `#rrggbb` / `#rrggbbaa` color literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color literal must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color literal must have 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in color literal {0:?}")]
    BadDigit(String),
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn black() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    #[inline]
    pub const fn white() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Creates a premultiplied color from straight-alpha bytes (`0`–`255`).
    #[inline]
    pub fn from_straight_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (straight alpha) into a premultiplied color.
    pub fn from_hex(literal: &str) -> Result<Self, ColorParseError> {
        let digits = literal
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(literal.to_owned()))?;

        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(ColorParseError::BadLength(digits.chars().count()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::BadDigit(literal.to_owned()))
        };

        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::from_straight_u8(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// Scales every channel by `k` (coverage applied to a premultiplied color).
    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self { r: self.r * k, g: self.g * k, b: self.b * k, a: self.a * k }
    }

    /// Component-wise linear interpolation between two premultiplied colors.
    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Clamps all channels to [0, 1] and enforces premultiplication.
    #[inline]
    pub fn clamped(self) -> Self {
        let a = self.a.clamp(0.0, 1.0);

        // Clamp premultiplied rgb so it cannot exceed alpha.
        let r = self.r.clamp(0.0, a);
        let g = self.g.clamp(0.0, a);
        let b = self.b.clamp(0.0, a);

        Self { r, g, b, a }
    }
}
