use crate::coords::RectI;
use crate::raster::{AlphaSurface, Context, RgbaSurface};

use super::{PaintBrush, StrokeArgs, StrokeSession};

/// Round brush with a feathered edge whose opacity builds up where stamps
/// overlap.
#[derive(Debug, Default)]
pub struct SoftBrush {
    session: StrokeSession,
}

impl SoftBrush {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a gesture is in progress.
    #[inline]
    pub fn is_stroking(&self) -> bool {
        self.session.is_active()
    }

    /// Coverage accumulated by the current gesture.
    #[inline]
    pub fn mask(&self) -> Option<&AlphaSurface> {
        self.session.mask()
    }
}

impl PaintBrush for SoftBrush {
    fn name(&self) -> &str {
        "Soft"
    }

    fn priority(&self) -> i32 {
        -90
    }

    fn on_move(&mut self, g: &mut Context<RgbaSurface>, args: &StrokeArgs) -> RectI {
        self.session.on_move(g, args)
    }

    fn on_release(&mut self) {
        self.session.on_release();
    }
}
