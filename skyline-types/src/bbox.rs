use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box.
///
/// Wraps `geo::Rect`, so `min <= max` always holds on both axes. A box whose
/// minimum equals its maximum on both axes stands for a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2D {
    /// The underlying geometric rectangle
    pub rect: Rect,
}

impl BoundingBox2D {
    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use skyline_types::bbox::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::new(0.0, 0.0, 4.0, 2.0);
    /// assert_eq!(bbox.area(), 8.0);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: min_x, y: min_y },
                geo::coord! { x: max_x, y: max_y },
            ),
        }
    }

    /// Create a degenerate bounding box covering exactly one point.
    pub fn from_point(point: &Point) -> Self {
        Self::new(point.x(), point.y(), point.x(), point.y())
    }

    /// Create a bounding box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    /// Bounding box of a set of points, or `None` when the set is empty.
    pub fn enclosing(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self::from_point(first);
        for point in &points[1..] {
            bbox = Self::new(
                bbox.min_x().min(point.x()),
                bbox.min_y().min(point.y()),
                bbox.max_x().max(point.x()),
                bbox.max_y().max(point.y()),
            );
        }
        Some(bbox)
    }

    pub fn min_x(&self) -> f64 {
        self.rect.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.rect.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.rect.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.rect.max().y
    }

    pub fn width(&self) -> f64 {
        self.max_x() - self.min_x()
    }

    pub fn height(&self) -> f64 {
        self.max_y() - self.min_y()
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True when the box has collapsed to a single point.
    pub fn is_point(&self) -> bool {
        self.rect.min() == self.rect.max()
    }

    /// The four corners in `(min_x, min_y)`, `(min_x, max_y)`, `(max_x, min_y)`,
    /// `(max_x, max_y)` order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.min_x(), self.min_y()),
            Point::new(self.min_x(), self.max_y()),
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
        ]
    }

    /// Check if a point is contained within this bounding box (edges included).
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x() >= self.min_x()
            && point.x() <= self.max_x()
            && point.y() >= self.min_y()
            && point.y() <= self.max_y()
    }

    /// Check if `other` lies entirely within this bounding box.
    pub fn contains_bbox(&self, other: &BoundingBox2D) -> bool {
        other.min_x() >= self.min_x()
            && other.max_x() <= self.max_x()
            && other.min_y() >= self.min_y()
            && other.max_y() <= self.max_y()
    }

    /// Check if this bounding box intersects with another.
    ///
    /// Boxes are disjoint only when they are separated on some axis, so boxes
    /// that merely touch intersect.
    pub fn intersects(&self, other: &BoundingBox2D) -> bool {
        !(self.max_x() < other.min_x()
            || self.min_x() > other.max_x()
            || self.max_y() < other.min_y()
            || self.min_y() > other.max_y())
    }

    /// The overlapping part of two boxes, or `None` when they are disjoint.
    pub fn intersection(&self, other: &BoundingBox2D) -> Option<BoundingBox2D> {
        if !self.intersects(other) {
            return None;
        }
        Some(Self::new(
            self.min_x().max(other.min_x()),
            self.min_y().max(other.min_y()),
            self.max_x().min(other.max_x()),
            self.max_y().min(other.max_y()),
        ))
    }
}

impl From<Rect> for BoundingBox2D {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}
