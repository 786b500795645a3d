/// Axis-aligned rectangle used by every physical thing in the game.
///
/// Coordinates follow screen conventions: `x` grows to the right, `y` grows
/// downward, so `top() < bottom()` for any rectangle with a positive height.
///
/// Positions are `f32` because velocities are fractional (gravity adds 0.35
/// per tick). The SDL frontend rounds to integer pixels only when painting.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    // Snapping setters move the rectangle and keep its size.

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Standard AABB overlap test.
    ///
    /// Two rectangles do NOT intersect when one lies entirely on one side of
    /// the other. Touching edges count as separated, so a player standing
    /// exactly on a platform (`bottom == top`) is not intersecting it.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.right() <= other.left()
            || self.left() >= other.right()
            || self.bottom() <= other.top()
            || self.top() >= other.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 50.0);

        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_snapping_keeps_size() {
        let mut rect = Rect::new(0.0, 0.0, 30.0, 50.0);

        rect.set_right(100.0);
        assert_eq!(rect.x, 70.0);
        assert_eq!(rect.width, 30.0);

        rect.set_bottom(570.0);
        assert_eq!(rect.y, 520.0);
        assert_eq!(rect.bottom(), 570.0);

        rect.set_left(5.0);
        rect.set_top(6.0);
        assert_eq!((rect.x, rect.y), (5.0, 6.0));
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let b = Rect::new(16.0, 16.0, 32.0, 32.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a)); // Symmetric
    }

    #[test]
    fn test_intersects_touching_edges() {
        let a = Rect::new(0.0, 0.0, 32.0, 32.0);
        let beside = Rect::new(32.0, 0.0, 32.0, 32.0);
        let below = Rect::new(0.0, 32.0, 32.0, 32.0);

        assert!(!a.intersects(&beside));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_intersects_contained() {
        let large = Rect::new(0.0, 0.0, 100.0, 100.0);
        let small = Rect::new(25.0, 25.0, 50.0, 50.0);

        assert!(large.intersects(&small));
        assert!(small.intersects(&large));
    }

    #[test]
    fn test_translated_leaves_original() {
        let rect = Rect::new(1.0, 1.0, 2.0, 2.0);
        let moved = rect.translated(0.0, 2.0);

        assert_eq!(rect.y, 1.0);
        assert_eq!(moved.y, 3.0);
        assert_eq!(moved.height, 2.0);
    }
}
