//! Integer pixel geometry for monitor rectangles.

/// A point in root-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A rectangle in root-window coordinates.
///
/// Width and height are never negative. A rectangle with zero width or
/// height is degenerate and contains no point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left coordinate.
    pub x: i32,
    /// Top coordinate.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        debug_assert!(w >= 0 && h >= 0);
        Rect { x, y, w, h }
    }

    /// Check whether a point is inside this rectangle.
    ///
    /// Containment is half-open: `x ∈ [self.x, self.x + self.w)` and
    /// likewise for `y`. Degenerate rectangles contain nothing.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }
}

/// Overlap of the half-open intervals `[a_pos, a_pos + a_len)` and
/// `[b_pos, b_pos + b_len)`.
///
/// Identical intervals count as overlapping even when zero-length, so two
/// disabled outputs parked at the same origin compare equal.
pub fn overlap_1d(a_pos: i32, a_len: i32, b_pos: i32, b_len: i32) -> bool {
    (a_pos == b_pos && a_len == b_len)
        || (a_pos + a_len).min(b_pos + b_len) - a_pos.max(b_pos) > 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_half_open() {
        let r = Rect::new(10, 20, 100, 50);
        assert!(r.contains(Point::new(10, 20)));
        assert!(r.contains(Point::new(109, 69)));
        assert!(!r.contains(Point::new(110, 20)));
        assert!(!r.contains(Point::new(10, 70)));
        assert!(!r.contains(Point::new(9, 20)));
    }

    #[test]
    fn test_degenerate_contains_nothing() {
        let flat = Rect::new(0, 0, 0, 1080);
        let thin = Rect::new(0, 0, 1920, 0);
        assert!(!flat.contains(Point::new(0, 0)));
        assert!(!thin.contains(Point::new(0, 0)));
        assert!(!thin.contains(Point::new(100, 0)));
    }

    #[test]
    fn test_overlap_1d() {
        assert!(overlap_1d(0, 100, 50, 100));
        assert!(overlap_1d(50, 100, 0, 100));
        assert!(!overlap_1d(0, 100, 100, 100));
        assert!(!overlap_1d(0, 100, 200, 50));
    }

    #[test]
    fn test_overlap_1d_identical_zero_length() {
        // The equality short-circuit, not the general arithmetic, must
        // catch identical zero-length intervals.
        assert!(overlap_1d(5, 0, 5, 0));
        assert!(!overlap_1d(5, 0, 6, 0));
        // A zero-length interval never overlaps a longer one, even at the
        // same position.
        assert!(!overlap_1d(5, 0, 5, 10));
    }
}
