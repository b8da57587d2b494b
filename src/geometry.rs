//! Axis-aligned layout primitives in CSS pixels.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Edges follow `DOMRect` naming: `right`/`bottom` are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Two rectangles overlap only if both their x and y intervals share a
    /// region of non-zero length. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    /// True when `self` lies fully inside `[0, bounds.width] x [0, bounds.height]`.
    pub fn within(&self, bounds: Size) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right <= bounds.width && self.bottom <= bounds.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_requires_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 15.0, 15.0)));
        // x intervals intersect, y intervals do not
        assert!(!a.overlaps(&Rect::new(5.0, 20.0, 15.0, 30.0)));
        // contained
        assert!(a.overlaps(&Rect::new(2.0, 2.0, 3.0, 3.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 20.0)));
    }

    #[test]
    fn test_from_origin_size() {
        let r = Rect::from_origin_size(Point::new(3.0, 4.0), Size::new(10.0, 20.0));
        assert_eq!(r, Rect::new(3.0, 4.0, 13.0, 24.0));
        assert!((r.width() - 10.0).abs() < 1e-9);
        assert!((r.height() - 20.0).abs() < 1e-9);
        assert!(r.within(Size::new(13.0, 24.0)));
        assert!(!r.within(Size::new(12.0, 24.0)));
    }
}
