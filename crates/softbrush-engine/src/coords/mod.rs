//! Coordinate and geometry types shared by the brush and raster layers.
//!
//! Canonical buffer space:
//! - Pixels (one unit = one surface pixel)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Pixel `(px, py)` covers `[px, px + 1) x [py, py + 1)`; its center sits at
//! `(px + 0.5, py + 0.5)`.

mod rect;
mod vec2;

pub use rect::RectI;
pub use vec2::Vec2;
