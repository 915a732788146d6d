use core::ops::{Deref, DerefMut};

use crate::coords::{RectI, Vec2};
use crate::paint::{Color, Paint};

use super::{AlphaSurface, CompositeOp, RasterTarget};

/// Drawing parameters a [`Context`] applies to every operation.
///
/// Defaults: opaque black source, source-over compositing, 2px line width.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Source sampled for each covered pixel.
    pub source: Paint,

    /// How the source is combined with the target.
    pub operator: CompositeOp,

    /// Nominal stroke width in pixels. Brushes derive their radius from it.
    pub line_width: f32,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            source: Paint::default(),
            operator: CompositeOp::Over,
            line_width: 2.0,
        }
    }
}

/// A drawing context bound to one target surface.
///
/// The context owns its target. Drawing state is changed through setters and
/// scoped with [`save`](Self::save), which returns a guard that restores the
/// previous state when dropped:
///
/// ```ignore
/// {
///     let mut g = ctx.save();
///     g.set_source(Paint::RadialGradient(grad));
///     g.fill_circle(center, radius);
/// } // source + operator restored here
/// ```
#[derive(Debug)]
pub struct Context<S: RasterTarget> {
    target: S,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl<S: RasterTarget> Context<S> {
    /// Binds a context with default state to `target`.
    pub fn new(target: S) -> Self {
        Self::with_state(target, GraphicsState::default())
    }

    pub fn with_state(target: S, state: GraphicsState) -> Self {
        Self {
            target,
            state,
            saved: Vec::new(),
        }
    }

    #[inline]
    pub fn target(&self) -> &S {
        &self.target
    }

    /// Unbinds the context and returns its target.
    #[inline]
    pub fn into_target(self) -> S {
        self.target
    }

    // ── state ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &GraphicsState {
        &self.state
    }

    #[inline]
    pub fn set_source(&mut self, source: Paint) {
        self.state.source = source;
    }

    #[inline]
    pub fn set_source_color(&mut self, color: Color) {
        self.state.source = Paint::Solid(color);
    }

    #[inline]
    pub fn operator(&self) -> CompositeOp {
        self.state.operator
    }

    #[inline]
    pub fn set_operator(&mut self, op: CompositeOp) {
        self.state.operator = op;
    }

    #[inline]
    pub fn line_width(&self) -> f32 {
        self.state.line_width
    }

    #[inline]
    pub fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    /// Number of states currently pushed by live [`StateGuard`]s.
    #[inline]
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Pushes a copy of the current state; the returned guard pops it on drop.
    pub fn save(&mut self) -> StateGuard<'_, S> {
        self.saved.push(self.state.clone());
        StateGuard { ctx: self }
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Resets the whole target to transparent, regardless of operator.
    pub fn clear(&mut self) {
        self.target.clear();
    }

    /// Fills a disk with the current source.
    ///
    /// A pixel is covered when its center lies strictly inside the circle.
    /// Non-finite or non-positive radii draw nothing.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }

        let bounds = RectI::covering(
            center.x - radius,
            center.y - radius,
            center.x + radius + 1.0,
            center.y + radius + 1.0,
        );
        let Some(span) = bounds.intersect(self.target.bounds()) else {
            return;
        };

        let r2 = radius * radius;
        let op = self.state.operator;
        for py in span.y..span.bottom() {
            let cy = py as f32 + 0.5;
            let dy = cy - center.y;
            for px in span.x..span.right() {
                let cx = px as f32 + 0.5;
                let dx = cx - center.x;
                if dx * dx + dy * dy >= r2 {
                    continue;
                }
                let src = self.state.source.color_at(cx, cy);
                self.target.blend_pixel(px as u32, py as u32, src, op);
            }
        }
    }

    /// Paints the current source through `mask`, placed with its top-left at
    /// `origin` (integer pixels). Each mask byte scales the source's coverage.
    pub fn mask_surface(&mut self, mask: &AlphaSurface, origin: (i32, i32)) {
        let placed = RectI::new(origin.0, origin.1, mask.width() as i32, mask.height() as i32);
        let Some(span) = placed.intersect(self.target.bounds()) else {
            return;
        };

        let op = self.state.operator;
        for py in span.y..span.bottom() {
            for px in span.x..span.right() {
                let mx = (px - origin.0) as u32;
                let my = (py - origin.1) as u32;
                let a = mask.alpha(mx, my).unwrap_or(0);
                if a == 0 {
                    continue;
                }
                let src = self
                    .state
                    .source
                    .color_at(px as f32 + 0.5, py as f32 + 0.5);
                let src = if a == 255 { src } else { src.scaled(a as f32 / 255.0) };
                self.target.blend_pixel(px as u32, py as u32, src, op);
            }
        }
    }

    /// Fills the whole target with the current source.
    pub fn paint(&mut self) {
        let b = self.target.bounds();
        let op = self.state.operator;
        for py in 0..b.height {
            for px in 0..b.width {
                let src = self
                    .state
                    .source
                    .color_at(px as f32 + 0.5, py as f32 + 0.5);
                self.target.blend_pixel(px as u32, py as u32, src, op);
            }
        }
    }
}

/// Scope guard returned by [`Context::save`].
///
/// Dereferences to the context; dropping it restores the state that was
/// current when the guard was created.
pub struct StateGuard<'a, S: RasterTarget> {
    ctx: &'a mut Context<S>,
}

impl<S: RasterTarget> Deref for StateGuard<'_, S> {
    type Target = Context<S>;

    #[inline]
    fn deref(&self) -> &Context<S> {
        &*self.ctx
    }
}

impl<S: RasterTarget> DerefMut for StateGuard<'_, S> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Context<S> {
        &mut *self.ctx
    }
}

impl<S: RasterTarget> Drop for StateGuard<'_, S> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}
