use crate::coords::Vec2;
use crate::paint::{Color, ColorStop, Paint, RadialGradient};
use crate::raster::{CompositeOp, Context, RasterTarget};

/// Alpha falloff of one soft stamp as `(t, alpha)` pairs, `t = 0` at the
/// center and `t = 1` at the rim.
///
/// Peak alpha is 0.4; the curve drops steeply over the last tenth of the radius.
pub const SOFT_FALLOFF_STOPS: [(f32, f32); 7] = [
    (0.0, 0.4),
    (0.1, 0.35),
    (0.25, 0.3),
    (0.5, 0.2),
    (0.92, 0.015),
    (0.97, 0.005),
    (1.0, 0.0),
];

/// Builds the white, alpha-only radial gradient for a stamp at `center`.
pub fn soft_falloff(center: Vec2, radius: f32) -> RadialGradient {
    let stops = SOFT_FALLOFF_STOPS
        .iter()
        .map(|&(t, a)| ColorStop::new(t, Color::from_straight(1.0, 1.0, 1.0, a)))
        .collect();
    RadialGradient::new(center, radius, stops)
}

/// Adds one soft disk of `radius` centered at `center` into the target.
///
/// The source and operator are only changed inside a saved scope, so the
/// context's state is the same before and after the call.
pub fn stamp<S: RasterTarget>(ctx: &mut Context<S>, center: Vec2, radius: f32) {
    if !radius.is_finite() || radius <= 0.0 {
        return;
    }

    let mut g = ctx.save();
    g.set_source(Paint::RadialGradient(soft_falloff(center, radius)));
    g.set_operator(CompositeOp::Add);
    g.fill_circle(center, radius);
}
