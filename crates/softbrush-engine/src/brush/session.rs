use crate::coords::RectI;
use crate::raster::{AlphaSurface, CompositeOp, Context, GraphicsState, RasterTarget, SurfaceToken};

use super::{composite_preview, interpolate, stamp, DirtyTracker, StrokeArgs};

/// Gesture-long resources: the coverage mask, its additive context, the
/// preview surface the mask was sized for, and the stamps' running bounds.
#[derive(Debug)]
struct MaskLayer {
    ctx: Context<AlphaSurface>,
    preview: SurfaceToken,
    dirty: DirtyTracker,
}

/// Accumulated state of one stroke gesture.
///
/// Lifecycle:
/// - idle until the first [`on_move`](Self::on_move), which allocates the mask
/// - every move stamps into the mask and recomposites the preview
/// - [`on_release`](Self::on_release) drops the mask and returns to idle
///
/// The mask only ever gains coverage while the gesture is active.
#[derive(Debug, Default)]
pub struct StrokeSession {
    layer: Option<MaskLayer>,
}

impl StrokeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// True between the first successful move and release.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.layer.is_some()
    }

    /// The accumulated coverage mask, if a gesture is active.
    #[inline]
    pub fn mask(&self) -> Option<&AlphaSurface> {
        self.layer.as_ref().map(|l| l.ctx.target())
    }

    /// Union of every stamp's bounds since the gesture started.
    #[inline]
    pub fn dirty(&self) -> RectI {
        self.layer.as_ref().map_or(RectI::EMPTY, |l| l.dirty.rect())
    }

    /// Handles one pointer-move event.
    ///
    /// Brush radius is half of `g`'s current line width and sample spacing is
    /// half the radius, both read fresh on every call. Returns the cumulative
    /// dirty rectangle for the gesture, or [`RectI::EMPTY`] when the mask
    /// could not be allocated (the preview is still cleared in that case).
    pub fn on_move<P: RasterTarget>(&mut self, g: &mut Context<P>, args: &StrokeArgs) -> RectI {
        let Some(layer) = self.ensure_layer(g.target().token()) else {
            g.clear();
            return RectI::EMPTY;
        };

        let radius = g.line_width() / 2.0;
        let spacing = radius * 0.5;

        for p in interpolate(args.last_position, args.current_position, spacing) {
            stamp(&mut layer.ctx, p, radius);
            layer.dirty.add_stamp(p, radius);
        }

        composite_preview(g, layer.ctx.target(), args.stroke_color);

        layer.dirty.rect()
    }

    /// Ends the gesture, releasing the mask. No-op when idle.
    pub fn on_release(&mut self) {
        if let Some(layer) = self.layer.take() {
            let mask = layer.ctx.target();
            log::debug!(
                "stroke released: mask {}x{} dropped, dirty {:?}",
                mask.width(),
                mask.height(),
                layer.dirty.rect()
            );
        }
    }

    /// Returns the layer for `preview`, allocating or reallocating the mask
    /// as needed. `None` when the mask could not be allocated.
    fn ensure_layer(&mut self, preview: SurfaceToken) -> Option<&mut MaskLayer> {
        if let Some(layer) = &self.layer {
            if !layer.preview.same_dimensions(preview) {
                log::debug!(
                    "preview resized {}x{} -> {}x{}; reinitializing mask",
                    layer.preview.width,
                    layer.preview.height,
                    preview.width,
                    preview.height
                );
                self.layer = None;
            }
        }

        if self.layer.is_none() {
            let mask = match AlphaSurface::new(preview.width, preview.height) {
                Ok(mask) => mask,
                Err(err) => {
                    log::warn!("skipping brush preview: {err}");
                    return None;
                }
            };
            let state = GraphicsState {
                operator: CompositeOp::Add,
                ..GraphicsState::default()
            };
            log::debug!("stroke mask allocated: {}x{}", preview.width, preview.height);
            self.layer = Some(MaskLayer {
                ctx: Context::with_state(mask, state),
                preview,
                dirty: DirtyTracker::new(),
            });
        }

        let layer = self.layer.as_mut()?;
        if layer.preview.id != preview.id {
            log::debug!(
                "preview surface changed ({} -> {}) with equal size; keeping mask",
                layer.preview.id,
                preview.id
            );
            layer.preview = preview;
        }
        Some(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::raster::{RgbaSurface, MAX_DIMENSION};

    fn preview(w: u32, h: u32, line_width: f32) -> Context<RgbaSurface> {
        let mut ctx = Context::new(RgbaSurface::new(w, h).unwrap());
        ctx.set_line_width(line_width);
        ctx
    }

    fn args(from: (f32, f32), to: (f32, f32)) -> StrokeArgs {
        StrokeArgs::new(Vec2::new(from.0, from.1), Vec2::new(to.0, to.1), Color::black())
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn first_move_allocates_mask_sized_to_preview() {
        let mut s = StrokeSession::new();
        assert!(!s.is_active());
        let mut g = preview(40, 30, 8.0);
        s.on_move(&mut g, &args((10.0, 10.0), (12.0, 10.0)));
        assert!(s.is_active());
        let mask = s.mask().unwrap();
        assert_eq!((mask.width(), mask.height()), (40, 30));
    }

    #[test]
    fn release_returns_to_idle() {
        let mut s = StrokeSession::new();
        let mut g = preview(16, 16, 4.0);
        s.on_move(&mut g, &args((8.0, 8.0), (8.0, 8.0)));
        s.on_release();
        assert!(!s.is_active());
        assert!(s.mask().is_none());
        assert!(s.dirty().is_empty());
    }

    #[test]
    fn release_when_idle_is_noop() {
        let mut s = StrokeSession::new();
        s.on_release();
        s.on_release();
        assert!(!s.is_active());
        assert_eq!(s.dirty(), RectI::EMPTY);
    }

    #[test]
    fn release_twice_after_gesture_is_noop() {
        let mut s = StrokeSession::new();
        let mut g = preview(16, 16, 4.0);
        s.on_move(&mut g, &args((2.0, 2.0), (9.0, 9.0)));
        s.on_release();
        s.on_release();
        assert!(!s.is_active());
    }

    // ── dirty rect ────────────────────────────────────────────────────────

    #[test]
    fn horizontal_segment_scenario() {
        let mut s = StrokeSession::new();
        let mut g = preview(64, 64, 20.0);
        let dirty = s.on_move(&mut g, &args((0.0, 0.0), (20.0, 0.0)));
        assert_eq!(dirty, RectI::new(-11, -11, 42, 22));
    }

    #[test]
    fn dirty_rect_is_cumulative_across_moves() {
        let mut s = StrokeSession::new();
        let mut g = preview(100, 100, 10.0);
        let first = s.on_move(&mut g, &args((10.0, 10.0), (20.0, 10.0)));
        let second = s.on_move(&mut g, &args((20.0, 10.0), (20.0, 60.0)));
        assert!(second.contains_rect(first));
        assert_eq!(second, RectI::new(4, 4, 22, 62));
    }

    // ── accumulation ──────────────────────────────────────────────────────

    #[test]
    fn stationary_moves_double_mask_alpha() {
        let mut s = StrokeSession::new();
        let mut g = preview(32, 32, 20.0);
        let a = args((16.0, 16.0), (16.0, 16.0));

        s.on_move(&mut g, &a);
        let once = s.mask().unwrap().data().to_vec();
        let preview_once = g.target().pixel(16, 16).unwrap();

        s.on_move(&mut g, &a);
        let twice = s.mask().unwrap().data();
        for (x, y) in once.iter().zip(twice) {
            assert_eq!(*y, x.saturating_mul(2));
        }
        let preview_twice = g.target().pixel(16, 16).unwrap();
        assert!(preview_twice.a > preview_once.a);
    }

    #[test]
    fn mask_is_monotonic_across_moves() {
        let mut s = StrokeSession::new();
        let mut g = preview(48, 48, 12.0);
        let path = [(5.0, 5.0), (20.0, 8.0), (30.0, 30.0), (12.0, 40.0), (12.0, 40.0)];

        let mut prev = vec![0u8; 48 * 48];
        for w in path.windows(2) {
            s.on_move(&mut g, &args(w[0], w[1]));
            let now = s.mask().unwrap().data();
            assert!(prev.iter().zip(now).all(|(p, n)| n >= p));
            prev = now.to_vec();
        }
    }

    #[test]
    fn new_gesture_starts_from_empty_mask() {
        let mut s = StrokeSession::new();
        let mut g = preview(32, 32, 10.0);
        s.on_move(&mut g, &args((5.0, 5.0), (5.0, 5.0)));
        s.on_release();

        s.on_move(&mut g, &args((25.0, 25.0), (25.0, 25.0)));
        assert_eq!(s.mask().unwrap().alpha(5, 5), Some(0));
        assert_eq!(s.dirty(), RectI::new(19, 19, 12, 12));
    }

    #[test]
    fn line_width_is_read_live_on_each_move() {
        let mut s = StrokeSession::new();
        let mut g = preview(64, 64, 4.0);
        let small = s.on_move(&mut g, &args((32.0, 32.0), (32.0, 32.0)));
        assert_eq!(small, RectI::new(29, 29, 6, 6));

        g.set_line_width(20.0);
        let big = s.on_move(&mut g, &args((32.0, 32.0), (32.0, 32.0)));
        assert_eq!(big, RectI::new(21, 21, 22, 22));
    }

    // ── preview target changes ────────────────────────────────────────────

    /// Preview whose reported size no mask can match.
    struct OversizedPreview {
        cleared: bool,
    }

    impl RasterTarget for OversizedPreview {
        fn width(&self) -> u32 {
            MAX_DIMENSION + 1
        }

        fn height(&self) -> u32 {
            4
        }

        fn token(&self) -> SurfaceToken {
            SurfaceToken { id: 0, width: self.width(), height: self.height() }
        }

        fn clear(&mut self) {
            self.cleared = true;
        }

        fn blend_pixel(&mut self, _x: u32, _y: u32, _src: Color, _op: CompositeOp) {
            panic!("nothing may be composited without a mask");
        }
    }

    #[test]
    fn unallocatable_mask_clears_preview_and_returns_empty() {
        let mut s = StrokeSession::new();
        let mut g = Context::new(OversizedPreview { cleared: false });
        g.set_line_width(8.0);

        let dirty = s.on_move(&mut g, &args((1.0, 1.0), (3.0, 2.0)));
        assert_eq!(dirty, RectI::EMPTY);
        assert!(g.target().cleared);
        assert!(!s.is_active());
        assert_eq!(s.dirty(), RectI::EMPTY);
    }

    #[test]
    fn huge_line_width_does_not_overflow() {
        let mut s = StrokeSession::new();
        let mut g = preview(4, 4, 5.0e9);
        let dirty = s.on_move(&mut g, &args((2.0, 2.0), (2.0, 2.0)));
        assert!(dirty.contains_rect(g.target().bounds()));
        assert!(s.mask().unwrap().data().iter().all(|&a| a > 0));
    }

    #[test]
    fn far_off_canvas_pointer_does_not_overflow() {
        let mut s = StrokeSession::new();
        let mut g = preview(4, 4, 8.0);
        let near = s.on_move(&mut g, &args((2.0, 2.0), (2.0, 2.0)));
        let far = s.on_move(&mut g, &args((3.0e9, 0.0), (3.0e9, 0.0)));
        assert!(far.contains_rect(near));
        assert_eq!(far, near);
        assert!(g.target().pixel(2, 2).unwrap().a > 0);
    }

    #[test]
    fn resized_preview_reinitializes_mask() {
        let mut s = StrokeSession::new();
        let mut small = preview(16, 16, 6.0);
        s.on_move(&mut small, &args((8.0, 8.0), (8.0, 8.0)));

        let mut large = preview(64, 32, 6.0);
        let dirty = s.on_move(&mut large, &args((40.0, 20.0), (40.0, 20.0)));
        let mask = s.mask().unwrap();
        assert_eq!((mask.width(), mask.height()), (64, 32));
        assert_eq!(mask.alpha(8, 8), Some(0));
        assert_eq!(dirty, RectI::new(36, 16, 8, 8));
    }

    #[test]
    fn swapped_preview_of_same_size_keeps_mask() {
        let mut s = StrokeSession::new();
        let mut a = preview(16, 16, 6.0);
        s.on_move(&mut a, &args((8.0, 8.0), (8.0, 8.0)));
        let before = s.mask().unwrap().alpha(8, 8).unwrap();

        let mut b = preview(16, 16, 6.0);
        s.on_move(&mut b, &args((8.0, 8.0), (8.0, 8.0)));
        assert!(s.mask().unwrap().alpha(8, 8).unwrap() > before);
        assert!(!b.target().is_clear());
    }
}
