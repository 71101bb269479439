//! Integer rectangles.
//!
//! Edges are computed with saturating arithmetic so rectangles built from
//! arbitrary caller coordinates never overflow.

/// An axis-aligned rectangle with a signed origin and size.
///
/// A rectangle with `w <= 0` or `h <= 0` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

/// Narrows a wide coordinate, clamping to the `i32` range.
#[must_use]
pub fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Rect {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Creates a rectangle spanning two inclusive corners.
    ///
    /// Spans wider than `i32::MAX` are clamped.
    #[must_use]
    pub const fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            w: x2.saturating_sub(x1).saturating_add(1),
            h: y2.saturating_sub(y1).saturating_add(1),
        }
    }

    /// Exclusive right edge.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    fn right_wide(&self) -> i64 {
        i64::from(self.x) + i64::from(self.w)
    }

    fn bottom_wide(&self) -> i64 {
        i64::from(self.y) + i64::from(self.h)
    }

    /// Inclusive bottom-right corner.
    #[must_use]
    pub const fn last_corner(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.w.saturating_sub(1)),
            self.y.saturating_add(self.h.saturating_sub(1)),
        )
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Whether `other` lies entirely inside `self`.
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.right_wide() <= self.right_wide()
                && other.bottom_wide() <= self.bottom_wide())
    }

    /// Intersection of two rectangles, `None` when they do not overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = self.right_wide().min(other.right_wide()) - i64::from(x);
        let h = self.bottom_wide().min(other.bottom_wide()) - i64::from(y);

        (w > 0 && h > 0).then(|| Self::new(x, y, saturate(w), saturate(h)))
    }

    /// Multiplies origin and size by an integer factor, saturating.
    #[must_use]
    pub const fn scaled(self, factor: i32) -> Self {
        Self {
            x: self.x.saturating_mul(factor),
            y: self.y.saturating_mul(factor),
            w: self.w.saturating_mul(factor),
            h: self.h.saturating_mul(factor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10, 20, 5, 6);
        assert_eq!(rect.right(), 15);
        assert_eq!(rect.bottom(), 26);
        assert_eq!(rect.last_corner(), (14, 25));
    }

    #[test]
    fn test_empty() {
        assert!(Rect::ZERO.is_empty());
        assert!(Rect::new(0, 0, -3, 4).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 4, 4)), None);
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Rect::new(1, 2, 3, 4).scaled(3), Rect::new(3, 6, 9, 12));
    }

    #[test]
    fn test_extreme_corners_saturate() {
        let rect = Rect::from_corners(0, 0, i32::MAX, i32::MAX);
        assert_eq!((rect.w, rect.h), (i32::MAX, i32::MAX));
        assert_eq!(rect.right(), i32::MAX);

        let wide = Rect::from_corners(i32::MIN, 0, i32::MAX, 0);
        assert_eq!(wide.w, i32::MAX);
        assert_eq!(wide.last_corner().1, 0);

        assert_eq!(
            Rect::new(i32::MAX / 2 + 10, 0, 4, 4).scaled(2),
            Rect::new(i32::MAX, 0, 8, 8)
        );
    }

    #[test]
    fn test_intersect_extreme_sizes() {
        let screen = Rect::new(0, 0, 320, 240);
        let huge = Rect::new(10, 10, i32::MAX, i32::MAX);
        assert_eq!(huge.intersect(&screen), Some(Rect::new(10, 10, 310, 230)));

        let span = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
        assert_eq!(span.intersect(&screen), None);
        assert_eq!(huge.intersect(&huge), Some(huge));
    }

    #[test]
    fn test_contains() {
        let rect = Rect::new(0, 0, 2, 2);
        assert!(rect.contains_rect(&Rect::new(0, 0, 2, 2)));
        assert!(!rect.contains_rect(&Rect::new(1, 1, 2, 2)));
    }

    proptest! {
        #[test]
        fn prop_intersection_inside_both(
            ax in -50i32..50, ay in -50i32..50, aw in 0i32..60, ah in 0i32..60,
            bx in -50i32..50, by in -50i32..50, bw in 0i32..60, bh in 0i32..60,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            if let Some(i) = a.intersect(&b) {
                prop_assert!(a.contains_rect(&i));
                prop_assert!(b.contains_rect(&i));
                prop_assert_eq!(a.intersect(&b), b.intersect(&a));
            }
        }
    }
}
