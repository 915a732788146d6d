/// Integer-aligned, axis-aligned rectangle in buffer pixels (top-left origin).
///
/// A rectangle with a non-positive width or height is empty. All empty
/// rectangles behave as the identity for [`union`](Self::union), so a running
/// union can start from [`RectI::EMPTY`] without dragging the origin in.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct RectI {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Float coordinates are clamped to `±COORD_LIMIT` before conversion, so edge
/// differences stay well inside `i32`.
const COORD_LIMIT: f32 = (1 << 29) as f32;

impl RectI {
    pub const EMPTY: RectI = RectI::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Smallest integer rectangle covering the float box `[left, right) x
    /// [top, bottom)`: the near edges are floored, the far edges ceiled.
    /// NaN edges collapse to zero.
    pub fn covering(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let snap = |v: f32, round: fn(f32) -> f32| round(v.clamp(-COORD_LIMIT, COORD_LIMIT)) as i32;
        let x0 = snap(left, f32::floor);
        let y0 = snap(top, f32::floor);
        let x1 = snap(right, f32::ceil);
        let y1 = snap(bottom, f32::ceil);
        Self::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    /// Exclusive right edge.
    #[inline]
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    #[inline]
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Smallest rectangle containing both inputs. Empty inputs are ignored.
    #[inline]
    pub fn union(self, other: RectI) -> RectI {
        if self.is_empty() {
            return if other.is_empty() { RectI::EMPTY } else { other };
        }
        if other.is_empty() {
            return self;
        }

        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        RectI::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    #[inline]
    pub fn intersect(self, other: RectI) -> Option<RectI> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        let w = x1.saturating_sub(x0);
        let h = y1.saturating_sub(y0);

        if w <= 0 || h <= 0 {
            None
        } else {
            Some(RectI::new(x0, y0, w, h))
        }
    }

    /// True when every pixel of `other` lies inside `self`. Empty `other` is
    /// contained by anything.
    #[inline]
    pub const fn contains_rect(self, other: RectI) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right() <= self.right()
                && other.bottom() <= self.bottom())
    }
}
