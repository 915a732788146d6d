use crate::coords::{RectI, Vec2};

/// Padded pixel bounds of one stamp: the disk's box grown by one pixel on
/// every side, snapped outward to whole pixels.
#[inline]
pub fn stamp_bounds(center: Vec2, radius: f32) -> RectI {
    let pad = radius + 1.0;
    RectI::covering(
        center.x - pad,
        center.y - pad,
        center.x + pad,
        center.y + pad,
    )
}

/// Running union of stamp bounds for one gesture.
///
/// Only grows between [`reset`](Self::reset) calls.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DirtyTracker {
    rect: RectI,
}

impl DirtyTracker {
    #[inline]
    pub const fn new() -> Self {
        Self { rect: RectI::EMPTY }
    }

    #[inline]
    pub fn rect(&self) -> RectI {
        self.rect
    }

    #[inline]
    pub fn add_rect(&mut self, rect: RectI) {
        self.rect = self.rect.union(rect);
    }

    #[inline]
    pub fn add_stamp(&mut self, center: Vec2, radius: f32) {
        self.add_rect(stamp_bounds(center, radius));
    }

    #[inline]
    pub fn reset(&mut self) {
        self.rect = RectI::EMPTY;
    }
}
