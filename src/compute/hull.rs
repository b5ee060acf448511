//! Convex hull of the reference set and hull membership tests.
//!
//! A data point inside the convex hull of the reference points cannot be
//! dominated by any other point, so hull membership lets the search accept a
//! candidate without consulting the dominance regions.

use crate::error::{Result, SkylineError};
use geo::{ConvexHull, Intersects, LineString, MultiPoint, Point, Polygon};
use skyline_types::BoundingBox2D;

/// Default allowed deviation, in degrees, of the subtended-angle sum from 360.
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 1e-5;

/// Ordered convex hull vertices of `points`, without the closing vertex.
///
/// Fewer than three input points are returned unchanged, since no polygon
/// exists for them.
///
/// # Examples
///
/// ```rust
/// use spatial_skyline::compute::hull::hull_vertices;
/// use geo::Point;
///
/// let points = vec![
///     Point::new(0.0, 0.0),
///     Point::new(4.0, 0.0),
///     Point::new(2.0, 1.0), // interior
///     Point::new(2.0, 4.0),
/// ];
/// assert_eq!(hull_vertices(&points).len(), 3);
/// ```
pub fn hull_vertices(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let hull = MultiPoint::new(points.to_vec()).convex_hull();
    let mut vertices: Vec<Point> = hull.exterior().points().collect();
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    vertices
}

/// Membership oracle over an already computed hull polygon.
#[derive(Debug, Clone)]
pub struct ConvexHullOracle {
    vertices: Vec<Point>,
    polygon: Option<Polygon>,
    tolerance_degrees: f64,
}

impl ConvexHullOracle {
    /// Build an oracle from ordered hull vertices.
    ///
    /// One or two vertices are accepted; membership then falls back to exact
    /// coordinate matching.
    pub fn new(vertices: Vec<Point>, tolerance_degrees: f64) -> Result<Self> {
        if vertices.is_empty() {
            return Err(SkylineError::NoReferencePoints);
        }
        if !(tolerance_degrees.is_finite() && tolerance_degrees > 0.0) {
            return Err(SkylineError::InvalidConfig(format!(
                "hull tolerance must be finite and positive, got: {}",
                tolerance_degrees
            )));
        }
        let polygon = if vertices.len() < 3 {
            log::warn!(
                "Degenerate reference hull with {} vertices; hull membership is exact match only",
                vertices.len()
            );
            None
        } else {
            let ring: LineString = vertices.iter().map(|p| p.0).collect();
            Some(Polygon::new(ring, Vec::new()))
        };
        Ok(Self {
            vertices,
            polygon,
            tolerance_degrees,
        })
    }

    /// Extract the hull of `points` and build an oracle over it.
    pub fn from_points(points: &[Point], tolerance_degrees: f64) -> Result<Self> {
        Self::new(hull_vertices(points), tolerance_degrees)
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// True when the hull has fewer than three vertices.
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Whether `point` lies inside the hull or on its boundary.
    pub fn contains_point(&self, point: &Point) -> bool {
        if self.is_degenerate() {
            return self.vertices.iter().any(|v| v == point);
        }

        let n = self.vertices.len();
        let mut angle_sum = 0.0;
        for i in 0..n {
            let a = &self.vertices[i];
            if a == point {
                return true;
            }
            let b = &self.vertices[(i + 1) % n];
            angle_sum += subtended_angle(point, a, b);
        }
        (angle_sum - 360.0).abs() < self.tolerance_degrees
    }

    /// Whether all four corners of `rect` are inside the hull.
    ///
    /// Sufficient for the whole rectangle because the hull is convex.
    pub fn contains_rect(&self, rect: &BoundingBox2D) -> bool {
        if rect.is_point() {
            return self.contains_point(&Point::from(rect.rect.min()));
        }
        rect.corners().iter().all(|corner| self.contains_point(corner))
    }

    /// Whether `rect` shares at least one location with the hull.
    ///
    /// Hull locations are never dominated, so a rectangle meeting the hull
    /// always holds undominated space.
    pub fn intersects_rect(&self, rect: &BoundingBox2D) -> bool {
        match &self.polygon {
            Some(polygon) => polygon.intersects(&rect.rect),
            None => self.vertices.iter().any(|v| rect.contains_point(v)),
        }
    }
}

/// Angle in degrees at `p` between the rays towards `a` and `b`.
fn subtended_angle(p: &Point, a: &Point, b: &Point) -> f64 {
    let (ux, uy) = (a.x() - p.x(), a.y() - p.y());
    let (vx, vy) = (b.x() - p.x(), b.y() - p.y());
    let norms = ux.hypot(uy) * vx.hypot(vy);
    if norms == 0.0 {
        return 0.0;
    }
    let cos = ((ux * vx + uy * vy) / norms).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}
