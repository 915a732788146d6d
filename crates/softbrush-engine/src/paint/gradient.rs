use crate::coords::Vec2;

use super::Color;

/// A single gradient stop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Concentric radial gradient in buffer pixel space.
///
/// Semantics:
/// - `t = 0` at `center`, `t = 1` at distance `radius`.
/// - Stops define premultiplied colors and must be sorted by `t`.
/// - Between stops colors interpolate linearly; `t` outside [0, 1] clamps to
///   the edge stops.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, stops: Vec<ColorStop>) -> Self {
        Self {
            center,
            radius,
            stops,
        }
    }

    /// Returns true when the gradient definition is structurally usable.
    pub fn is_valid(&self) -> bool {
        self.center.is_finite()
            && self.radius.is_finite()
            && self.radius > 0.0
            && self.stops.len() >= 2
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.windows(2).all(|w| w[0].t <= w[1].t)
    }

    /// Color at gradient parameter `t`.
    pub fn sample(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Color::transparent(),
        };

        let t = t.clamp(0.0, 1.0);
        if t <= first.t {
            return first.color;
        }
        if t >= last.t {
            return last.color;
        }

        // First stop strictly past `t`; its predecessor is at or before `t`.
        let hi = self
            .stops
            .partition_point(|s| s.t <= t)
            .clamp(1, self.stops.len() - 1);
        let a = self.stops[hi - 1];
        let b = self.stops[hi];

        let span = b.t - a.t;
        if span <= f32::EPSILON {
            return b.color;
        }
        a.color.lerp(b.color, (t - a.t) / span)
    }

    /// Color at `(x, y)` in buffer pixels.
    #[inline]
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        if self.radius <= 0.0 {
            return self.stops.last().map(|s| s.color).unwrap_or_default();
        }
        let d = self.center.distance(Vec2::new(x, y));
        self.sample(d / self.radius)
    }
}
