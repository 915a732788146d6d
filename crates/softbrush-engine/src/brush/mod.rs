//! Brush stroke pipeline.
//!
//! Per pointer-move event a brush:
//! 1) interpolates sample points between the previous and current pointer position
//! 2) stamps a soft disk into its gesture-long mask at every sample
//! 3) grows the gesture's dirty rectangle to cover each stamp
//! 4) clears the preview and recomposites the whole mask in the stroke color
//!
//! Pointer dispatch and committing the preview to a canvas belong to callers.

mod compositor;
mod dirty;
mod interpolate;
mod session;
mod soft;
mod stamp;

pub use compositor::composite_preview;
pub use dirty::{stamp_bounds, DirtyTracker};
pub use interpolate::{interpolate, step_count, PathSamples};
pub use session::StrokeSession;
pub use soft::SoftBrush;
pub use stamp::{soft_falloff, stamp, SOFT_FALLOFF_STOPS};

use crate::coords::{RectI, Vec2};
use crate::paint::Color;
use crate::raster::{Context, RgbaSurface};

/// Inputs for one pointer-move event of a gesture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StrokeArgs {
    /// Pointer position at the previous event (or the press position).
    pub last_position: Vec2,
    /// Pointer position at this event.
    pub current_position: Vec2,
    /// Color the preview is painted in.
    pub stroke_color: Color,
}

impl StrokeArgs {
    #[inline]
    pub const fn new(last_position: Vec2, current_position: Vec2, stroke_color: Color) -> Self {
        Self { last_position, current_position, stroke_color }
    }
}

/// Contract implemented by paint brushes.
///
/// A brush receives every move event of a gesture in order, followed by one
/// `on_release`. It draws into the preview context and reports which part of
/// the preview must be redrawn.
pub trait PaintBrush {
    /// Human-readable name shown in brush pickers.
    fn name(&self) -> &str;

    /// Sort key for brush pickers; brushes are listed in ascending order.
    fn priority(&self) -> i32 {
        0
    }

    /// Handles one pointer-move event. Returns the region of the preview that
    /// changed; [`RectI::EMPTY`] means nothing to redraw.
    fn on_move(&mut self, g: &mut Context<RgbaSurface>, args: &StrokeArgs) -> RectI;

    /// Ends the gesture. Must be safe to call when no gesture is active.
    fn on_release(&mut self) {}
}
