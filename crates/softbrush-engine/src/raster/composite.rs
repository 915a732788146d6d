/// Pixel-combination rule used when a context writes a source into its target.
///
/// Both operators work on premultiplied 8-bit channels.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum CompositeOp {
    /// Source-over: `dst = src + dst * (1 - src_alpha)`.
    #[default]
    Over,
    /// Additive accumulation: `dst = min(src + dst, 1)`.
    Add,
}

impl CompositeOp {
    /// Combines one premultiplied channel.
    ///
    /// `src_alpha` is the source pixel's alpha; for the alpha channel itself
    /// pass the same value as `src`.
    #[inline]
    pub fn blend_channel(self, src: u8, src_alpha: u8, dst: u8) -> u8 {
        match self {
            CompositeOp::Over => src.saturating_add(mul_div_255(dst, 255 - src_alpha)),
            CompositeOp::Add => src.saturating_add(dst),
        }
    }
}

/// `a * b / 255`, rounded to nearest.
#[inline]
pub(crate) fn mul_div_255(a: u8, b: u8) -> u8 {
    let p = a as u32 * b as u32 + 128;
    ((p + (p >> 8)) >> 8) as u8
}

/// Quantizes a unit float into a byte, clamping out-of-range values.
#[inline]
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
