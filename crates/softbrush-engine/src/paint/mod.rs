//! Paint model shared between brushes and the raster context.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - paint sources (solid, radial gradient)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, ColorParseError};
pub use gradient::{ColorStop, RadialGradient};

/// Paint source for filling geometry.
///
/// A context evaluates the source once per covered pixel, at the pixel center.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    RadialGradient(RadialGradient),
}

impl Paint {
    /// Premultiplied color of this source at `(x, y)` in buffer pixels.
    #[inline]
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::RadialGradient(g) => g.color_at(x, y),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::black())
    }
}
