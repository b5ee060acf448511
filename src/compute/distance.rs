//! Point and rectangle distances to the reference set.
//!
//! The aggregate distance of a rectangle is the sum, over every reference
//! point, of the minimum distance from that reference point to the rectangle.
//! No point inside the rectangle can have a smaller aggregate distance, which
//! makes it an admissible priority key for best-first search.

use crate::compute::validation::validate_reference_points;
use crate::error::{Result, SkylineError};
use geo::{Distance, Euclidean, Point};
use skyline_types::BoundingBox2D;

/// Euclidean distance between two points.
pub fn point_distance(a: &Point, b: &Point) -> f64 {
    Euclidean.distance(*a, *b)
}

/// Squared Euclidean distance between two points.
pub fn squared_distance(a: &Point, b: &Point) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// Minimum distance from `point` to any location in `rect`.
///
/// Zero when the point is inside the rectangle or on its boundary. When the
/// point is aligned with the rectangle on one axis the result is the distance
/// to the near edge; otherwise it is the distance to the nearest corner.
///
/// # Examples
///
/// ```
/// use spatial_skyline::compute::distance::min_distance;
/// use skyline_types::BoundingBox2D;
/// use geo::Point;
///
/// let rect = BoundingBox2D::new(0.0, 0.0, 2.0, 2.0);
/// assert_eq!(min_distance(&rect, &Point::new(2.0, 1.0)), 0.0);
/// assert_eq!(min_distance(&rect, &Point::new(1.0, 5.0)), 3.0);
/// assert_eq!(min_distance(&rect, &Point::new(5.0, 6.0)), 5.0);
/// ```
pub fn min_distance(rect: &BoundingBox2D, point: &Point) -> f64 {
    let (x, y) = (point.x(), point.y());
    let within_x = x >= rect.min_x() && x <= rect.max_x();
    let within_y = y >= rect.min_y() && y <= rect.max_y();

    match (within_x, within_y) {
        (true, true) => 0.0,
        (true, false) => (y - rect.min_y()).abs().min((y - rect.max_y()).abs()),
        (false, true) => (x - rect.min_x()).abs().min((x - rect.max_x()).abs()),
        (false, false) => {
            let corner_x = if x < rect.min_x() {
                rect.min_x()
            } else {
                rect.max_x()
            };
            let corner_y = if y < rect.min_y() {
                rect.min_y()
            } else {
                rect.max_y()
            };
            point_distance(point, &Point::new(corner_x, corner_y))
        }
    }
}

/// The immutable, non-empty set of reference points for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    points: Vec<Point>,
    mbr: BoundingBox2D,
}

impl ReferenceSet {
    /// Build a reference set, rejecting empty input and non-finite coordinates.
    pub fn new(points: Vec<Point>) -> Result<Self> {
        validate_reference_points(&points)?;
        let mbr = BoundingBox2D::enclosing(&points).ok_or(SkylineError::NoReferencePoints)?;
        Ok(Self { points, mbr })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of Euclidean distances from `point` to every reference point.
    pub fn aggregate_point(&self, point: &Point) -> f64 {
        self.points.iter().map(|q| point_distance(q, point)).sum()
    }

    /// Sum of minimum distances from `rect` to every reference point.
    ///
    /// A lower bound on [`aggregate_point`](Self::aggregate_point) for every
    /// point inside `rect`.
    pub fn aggregate_rect(&self, rect: &BoundingBox2D) -> f64 {
        self.points.iter().map(|q| min_distance(rect, q)).sum()
    }

    /// Per-reference distance vector of `point`, in reference order.
    pub fn distance_vector(&self, point: &Point) -> Vec<f64> {
        self.points.iter().map(|q| point_distance(q, point)).collect()
    }

    pub fn bounding_box(&self) -> BoundingBox2D {
        self.mbr
    }
}
