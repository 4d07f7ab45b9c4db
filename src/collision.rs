//! Overlap tests used by the per-frame collision pass.
//!
//! Everything is brute force: callers loop over every pair they care about.
//! Both tests are strict, so shapes that merely touch do not collide.

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Circle given by its centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }

    /// Closest-point test against a rectangle.
    pub fn overlaps_rect(&self, rect: &Rect) -> bool {
        let nearest_x = self.x.clamp(rect.x, rect.right());
        let nearest_y = self.y.clamp(rect.y, rect.bottom());
        let dx = self.x - nearest_x;
        let dy = self.y - nearest_y;
        dx * dx + dy * dy < self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_overlap_when_interiors_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 6.0, 12.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn circle_hits_rect_edge() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(Circle::new(12.0, 5.0, 5.0).overlaps_rect(&rect));
        assert!(!Circle::new(16.0, 5.0, 5.0).overlaps_rect(&rect));
    }

    #[test]
    fn circle_near_corner_uses_distance_not_box() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Inside the bounding box of the circle but > radius from the corner.
        assert!(!Circle::new(14.0, 14.0, 5.0).overlaps_rect(&rect));
        assert!(Circle::new(13.0, 13.0, 5.0).overlaps_rect(&rect));
    }

    #[test]
    fn circle_centre_inside_rect() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(Circle::new(5.0, 5.0, 1.0).overlaps_rect(&rect));
    }
}
