//! CPU raster core.
//!
//! This module is responsible for:
//! - owning pixel storage (`AlphaSurface` for masks, `RgbaSurface` for previews)
//! - the named compositing operators used to combine a source with a destination
//! - a drawing `Context` bound to one surface, with a save/restore state stack

mod composite;
mod context;
mod error;
mod surface;

pub use composite::CompositeOp;
pub use context::{Context, GraphicsState, StateGuard};
pub use error::SurfaceError;
pub use surface::{AlphaSurface, PremulRgba8, RasterTarget, RgbaSurface, SurfaceToken, MAX_DIMENSION};
