//! End-to-end gestures through the public brush API.

use softbrush_engine::brush::{PaintBrush, SoftBrush, StrokeArgs};
use softbrush_engine::coords::{RectI, Vec2};
use softbrush_engine::logging::{init_logging, LoggingConfig};
use softbrush_engine::paint::Color;
use softbrush_engine::raster::{Context, PremulRgba8, RgbaSurface};

fn setup(w: u32, h: u32, line_width: f32) -> (SoftBrush, Context<RgbaSurface>) {
    init_logging(LoggingConfig::for_tests());
    let mut g = Context::new(RgbaSurface::new(w, h).unwrap());
    g.set_line_width(line_width);
    (SoftBrush::new(), g)
}

/// Replays a polyline as one move event per segment and returns each event's dirty rect.
fn drag(brush: &mut SoftBrush, g: &mut Context<RgbaSurface>, path: &[(f32, f32)], color: Color) -> Vec<RectI> {
    path.windows(2)
        .map(|w| {
            let args = StrokeArgs::new(Vec2::new(w[0].0, w[0].1), Vec2::new(w[1].0, w[1].1), color);
            brush.on_move(g, &args)
        })
        .collect()
}

#[test]
fn documented_segment_produces_expected_dirty_rect() {
    let (mut brush, mut g) = setup(64, 64, 20.0);
    let rects = drag(&mut brush, &mut g, &[(0.0, 0.0), (20.0, 0.0)], Color::black());
    assert_eq!(rects, vec![RectI::new(-11, -11, 42, 22)]);
}

#[test]
fn dirty_rects_grow_monotonically_over_a_gesture() {
    let (mut brush, mut g) = setup(200, 120, 16.0);
    let path = [(20.0, 20.0), (60.0, 30.0), (90.0, 90.0), (150.0, 40.0), (150.0, 40.0)];
    let rects = drag(&mut brush, &mut g, &path, Color::black());
    for w in rects.windows(2) {
        assert!(w[1].contains_rect(w[0]), "{:?} does not contain {:?}", w[1], w[0]);
    }
}

#[test]
fn preview_only_shows_stroke_color() {
    let (mut brush, mut g) = setup(64, 64, 24.0);
    let blue = Color::from_straight_u8(0, 0, 255, 255);
    drag(&mut brush, &mut g, &[(32.0, 32.0), (32.0, 32.0)], blue);

    let px = g.target().pixel(32, 32).unwrap();
    assert!(px.a > 0);
    assert_eq!((px.r, px.g), (0, 0));
    assert_eq!(px.b, px.a);
    assert_eq!(g.target().pixel(0, 0), Some(PremulRgba8::TRANSPARENT));
}

#[test]
fn second_stationary_event_is_denser() {
    let (mut brush, mut g) = setup(64, 64, 40.0);
    let args = StrokeArgs::new(Vec2::new(32.0, 32.0), Vec2::new(32.0, 32.0), Color::black());

    brush.on_move(&mut g, &args);
    let first_mask = brush.mask().unwrap().data().to_vec();
    let first_preview: Vec<u8> = g.target().pixels().iter().map(|p| p.a).collect();

    brush.on_move(&mut g, &args);
    let second_mask = brush.mask().unwrap().data();
    let second_preview: Vec<u8> = g.target().pixels().iter().map(|p| p.a).collect();

    for (a, b) in first_mask.iter().zip(second_mask) {
        assert_eq!(*b, a.saturating_mul(2));
    }
    assert!(second_preview.iter().zip(&first_preview).all(|(b, a)| b >= a));
    assert!(
        second_preview.iter().map(|&a| a as u32).sum::<u32>()
            > first_preview.iter().map(|&a| a as u32).sum::<u32>()
    );
}

#[test]
fn release_then_new_gesture_starts_clean() {
    let (mut brush, mut g) = setup(64, 64, 10.0);
    drag(&mut brush, &mut g, &[(10.0, 10.0), (50.0, 10.0)], Color::black());
    brush.on_release();
    assert!(!brush.is_stroking());

    let rects = drag(&mut brush, &mut g, &[(30.0, 50.0), (30.0, 50.0)], Color::black());
    assert_eq!(rects, vec![RectI::new(24, 44, 12, 12)]);
    assert_eq!(brush.mask().unwrap().alpha(30, 10), Some(0));
    // The first gesture's pixels vanish from the preview once it is recomposited.
    assert_eq!(g.target().pixel(30, 10), Some(PremulRgba8::TRANSPARENT));
}

#[test]
fn release_without_gesture_is_harmless() {
    let mut brush = SoftBrush::new();
    brush.on_release();
    brush.on_release();
    assert!(!brush.is_stroking());
}
