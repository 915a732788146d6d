use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::{Pod, Zeroable};

use crate::coords::RectI;
use crate::paint::Color;

use super::composite::{unit_to_u8, CompositeOp};
use super::SurfaceError;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 1 << 15;

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity + dimensions of a surface at a point in time.
///
/// Holders use this to notice that the surface they were drawing for has been
/// swapped or resized, without keeping a borrow alive.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SurfaceToken {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

impl SurfaceToken {
    #[inline]
    pub fn same_dimensions(self, other: SurfaceToken) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Pixel storage a [`Context`](super::Context) can draw into.
pub trait RasterTarget {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn token(&self) -> SurfaceToken;

    /// Resets every pixel to fully transparent.
    fn clear(&mut self);

    /// Combines a premultiplied `src` into pixel `(x, y)` using `op`.
    ///
    /// Callers guarantee `x < width` and `y < height`.
    fn blend_pixel(&mut self, x: u32, y: u32, src: Color, op: CompositeOp);

    /// Whole-surface rectangle.
    #[inline]
    fn bounds(&self) -> RectI {
        RectI::new(0, 0, self.width() as i32, self.height() as i32)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<usize, SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::ZeroSized { width, height });
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SurfaceError::TooLarge { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(SurfaceError::TooLarge { width, height })
}

#[inline]
fn next_id() -> u64 {
    NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed)
}

// ── AlphaSurface ──────────────────────────────────────────────────────────

/// Single-channel 8-bit coverage surface (A8).
///
/// `0` is no coverage, `255` is full coverage.
#[derive(Debug)]
pub struct AlphaSurface {
    id: u64,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl AlphaSurface {
    /// Allocates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            id: next_id(),
            width,
            height,
            data: vec![0; len],
        })
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw coverage byte at `(x, y)`, or `None` outside the surface.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }
}

impl Clone for AlphaSurface {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            width: self.width,
            height: self.height,
            data: self.data.clone(),
        }
    }
}

impl RasterTarget for AlphaSurface {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn token(&self) -> SurfaceToken {
        SurfaceToken { id: self.id, width: self.width, height: self.height }
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, src: Color, op: CompositeOp) {
        let idx = y as usize * self.width as usize + x as usize;
        let a = unit_to_u8(src.a);
        self.data[idx] = op.blend_channel(a, a, self.data[idx]);
    }
}

// ── RgbaSurface ───────────────────────────────────────────────────────────

/// Premultiplied RGBA8 pixel.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PremulRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl PremulRgba8 {
    pub const TRANSPARENT: PremulRgba8 = PremulRgba8 { r: 0, g: 0, b: 0, a: 0 };

    /// Quantizes a premultiplied float color.
    #[inline]
    pub fn from_color(c: Color) -> Self {
        let c = c.clamped();
        Self {
            r: unit_to_u8(c.r),
            g: unit_to_u8(c.g),
            b: unit_to_u8(c.b),
            a: unit_to_u8(c.a),
        }
    }

    /// Straight-alpha bytes, for export to formats that do not premultiply.
    #[inline]
    pub fn to_straight(self) -> [u8; 4] {
        if self.a == 0 {
            return [0, 0, 0, 0];
        }
        let un = |c: u8| ((c as u32 * 255 + self.a as u32 / 2) / self.a as u32).min(255) as u8;
        [un(self.r), un(self.g), un(self.b), self.a]
    }
}

/// Premultiplied RGBA8 surface, row-major, no padding between rows.
#[derive(Debug)]
pub struct RgbaSurface {
    id: u64,
    width: u32,
    height: u32,
    pixels: Vec<PremulRgba8>,
}

impl RgbaSurface {
    /// Allocates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            id: next_id(),
            width,
            height,
            pixels: vec![PremulRgba8::TRANSPARENT; len],
        })
    }

    #[inline]
    pub fn pixels(&self) -> &[PremulRgba8] {
        &self.pixels
    }

    /// The pixel buffer viewed as `width * height * 4` bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        if x < self.width && y < self.height {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// True when every pixel is fully transparent.
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| *p == PremulRgba8::TRANSPARENT)
    }
}

impl Clone for RgbaSurface {
    fn clone(&self) -> Self {
        Self {
            id: next_id(),
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

impl RasterTarget for RgbaSurface {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn token(&self) -> SurfaceToken {
        SurfaceToken { id: self.id, width: self.width, height: self.height }
    }

    fn clear(&mut self) {
        self.pixels.fill(PremulRgba8::TRANSPARENT);
    }

    #[inline]
    fn blend_pixel(&mut self, x: u32, y: u32, src: Color, op: CompositeOp) {
        let idx = y as usize * self.width as usize + x as usize;
        let s = PremulRgba8::from_color(src);
        let d = self.pixels[idx];
        self.pixels[idx] = PremulRgba8 {
            r: op.blend_channel(s.r, s.a, d.r),
            g: op.blend_channel(s.g, s.a, d.g),
            b: op.blend_channel(s.b, s.a, d.b),
            a: op.blend_channel(s.a, s.a, d.a),
        };
    }
}
