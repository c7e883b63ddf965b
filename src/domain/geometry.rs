//! Geometric types for preview-space regions and coordinates

use serde::{Deserialize, Serialize};

/// A pixel position in preview space
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to the non-negative quadrant
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }
}

/// Corners of a rectangle: (left, top) is the first corner, (right, bottom) the far one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from coordinates
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Get the width of the rectangle
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    /// Get the height of the rectangle
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Check if this rectangle contains a point
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }
}

/// Grow the far corner of `rect` until width equals height.
///
/// The first corner never moves and the far corner is only ever pushed
/// outward, so dragging can't make the opposite edge retreat past the anchor.
pub fn enforce_square(rect: Rect) -> Rect {
    let width = rect.width();
    let height = rect.height();

    let mut squared = rect;
    if width > height {
        squared.bottom = rect.top + width;
    } else if height > width {
        squared.right = rect.left + height;
    }
    squared
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_rect_grows_downward() {
        let squared = enforce_square(Rect::new(10, 10, 50, 30));
        assert_eq!(squared, Rect::new(10, 10, 50, 50));
    }

    #[test]
    fn tall_rect_grows_rightward() {
        let squared = enforce_square(Rect::new(5, 0, 15, 40));
        assert_eq!(squared, Rect::new(5, 0, 45, 40));
    }

    #[test]
    fn square_rect_is_unchanged() {
        let rect = Rect::new(3, 4, 13, 14);
        assert_eq!(enforce_square(rect), rect);
    }

    #[test]
    fn enforce_square_is_idempotent_and_keeps_anchor() {
        for (w, h) in [(1, 7), (9, 2), (4, 4), (120, 33), (0, 5)] {
            let rect = Rect::new(17, 23, 17 + w, 23 + h);
            let once = enforce_square(rect);
            let twice = enforce_square(once);

            assert_eq!(once, twice);
            assert_eq!(once.top_left(), rect.top_left());
            assert_eq!(once.width(), once.height());
            assert!(once.right >= rect.right && once.bottom >= rect.bottom);
        }
    }

    #[test]
    fn contains_point_excludes_far_edges() {
        let rect = Rect::new(0, 0, 10, 10);
        assert!(rect.contains_point(Point::new(0, 0)));
        assert!(rect.contains_point(Point::new(9, 9)));
        assert!(!rect.contains_point(Point::new(10, 5)));
        assert!(!rect.contains_point(Point::new(5, 10)));
    }

    #[test]
    fn clamped_point_is_non_negative() {
        assert_eq!(Point::new(-4, 7).clamped(), Point::new(0, 7));
        assert_eq!(Point::new(3, -1).clamped(), Point::new(3, 0));
    }
}
