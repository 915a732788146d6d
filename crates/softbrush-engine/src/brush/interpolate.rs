use core::iter::FusedIterator;

use crate::coords::Vec2;

/// Number of segments a path of length `distance` is split into.
///
/// `max(1, ceil(distance / spacing))`. Degenerate inputs (non-finite values,
/// non-positive spacing) fall back to a single segment.
pub fn step_count(distance: f32, spacing: f32) -> u32 {
    if !distance.is_finite() || !spacing.is_finite() || spacing <= 0.0 {
        return 1;
    }
    let steps = (distance / spacing).ceil();
    if steps >= u32::MAX as f32 {
        u32::MAX - 1
    } else {
        (steps as u32).max(1)
    }
}

/// Evenly spaced sample points from `from` to `to`, both included.
///
/// Always yields `steps + 1 >= 2` points, so a stationary pointer still
/// produces stamps. Clone the iterator to walk the same path again.
pub fn interpolate(from: Vec2, to: Vec2, spacing: f32) -> PathSamples {
    let steps = step_count(from.distance(to), spacing);
    PathSamples {
        from,
        to,
        steps,
        front: 0,
        back: steps + 1,
    }
}

/// Iterator returned by [`interpolate`].
#[derive(Debug, Clone, PartialEq)]
pub struct PathSamples {
    from: Vec2,
    to: Vec2,
    steps: u32,
    /// Next index yielded from the front.
    front: u32,
    /// One past the next index yielded from the back.
    back: u32,
}

impl PathSamples {
    #[inline]
    fn point(&self, i: u32) -> Vec2 {
        if i >= self.steps {
            self.to
        } else {
            self.from.lerp(self.to, i as f32 / self.steps as f32)
        }
    }
}

impl Iterator for PathSamples {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.front >= self.back {
            return None;
        }
        let p = self.point(self.front);
        self.front += 1;
        Some(p)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.back - self.front) as usize;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for PathSamples {
    fn next_back(&mut self) -> Option<Vec2> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.point(self.back))
    }
}

impl ExactSizeIterator for PathSamples {}

impl FusedIterator for PathSamples {}
