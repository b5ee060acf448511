//! Dominance regions of accepted skyline points.
//!
//! For an anchor `s` and reference points `q1..qn`, the circle around `qi`
//! through `s` holds every location strictly closer to `qi` than `s` is. A
//! location outside (or on) every circle is at least as far as `s` from all
//! reference points, i.e. dominated by `s`.

use crate::compute::distance::{min_distance, point_distance, squared_distance};
use crate::config::RectDominance;
use geo::Point;
use skyline_types::BoundingBox2D;
use smallvec::SmallVec;

/// A circle around a reference point passing through an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    radius_sq: f64,
}

impl Circle {
    /// Circle centered at `center` whose boundary passes through `boundary`.
    pub fn through(center: Point, boundary: &Point) -> Self {
        Self {
            center,
            radius: point_distance(&center, boundary),
            radius_sq: squared_distance(&center, boundary),
        }
    }

    /// Strict interior test; boundary points are outside.
    pub fn strictly_contains(&self, point: &Point) -> bool {
        squared_distance(point, &self.center) < self.radius_sq
    }
}

/// Line `a*x + b*y + c = 0`. Non-vertical lines are kept with `b == -1`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    fn through(p1: &Point, p2: &Point) -> Self {
        let dx = p2.x() - p1.x();
        if dx == 0.0 {
            return Self::vertical(p1);
        }
        let slope = (p2.y() - p1.y()) / dx;
        Self::with_slope(slope, p1)
    }

    fn with_slope(slope: f64, point: &Point) -> Self {
        Self {
            a: slope,
            b: -1.0,
            c: point.y() - slope * point.x(),
        }
    }

    fn vertical(point: &Point) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: -point.x(),
        }
    }

    fn distance_to(&self, point: &Point) -> f64 {
        (self.a * point.x() + self.b * point.y() + self.c).abs() / self.a.hypot(self.b)
    }

    /// `None` for parallel or coincident lines.
    fn intersection(&self, other: &Line) -> Option<Point> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let x = (self.b * other.c - other.b * self.c) / det;
        let y = (other.a * self.c - self.a * other.c) / det;
        (x.is_finite() && y.is_finite()).then(|| Point::new(x, y))
    }
}

fn within(value: f64, bound1: f64, bound2: f64) -> bool {
    value >= bound1.min(bound2) && value <= bound1.max(bound2)
}

/// The space dominated by one accepted skyline point.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct DominanceRegion {
    anchor: Point,
    circles: SmallVec<[Circle; 8]>,
}

impl DominanceRegion {
    /// One circle per center, each passing through `anchor`.
    pub fn new(anchor: Point, centers: &[Point]) -> Self {
        let circles = centers
            .iter()
            .map(|center| Circle::through(*center, &anchor))
            .collect();
        Self { anchor, circles }
    }

    pub fn anchor(&self) -> &Point {
        &self.anchor
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    /// True when `point` lies outside or on every circle.
    pub fn point_is_dominated(&self, point: &Point) -> bool {
        !self.circles.iter().any(|circle| circle.strictly_contains(point))
    }

    /// Whether every location of `rect` is dominated, using `test`.
    pub fn rect_is_dominated(&self, rect: &BoundingBox2D, test: RectDominance) -> bool {
        match test {
            RectDominance::NearestEdge => self.nearest_edge_dominated(rect),
            RectDominance::Exact => self
                .circles
                .iter()
                .all(|circle| min_distance(rect, &circle.center) >= circle.radius),
        }
    }

    /// Corner test plus a crossing test on the edge joining the two corners
    /// nearest the anchor. Other edges are not inspected.
    fn nearest_edge_dominated(&self, rect: &BoundingBox2D) -> bool {
        let mut corners = rect.corners();
        if !corners.iter().all(|corner| self.point_is_dominated(corner)) {
            return false;
        }

        corners.sort_by(|a, b| {
            squared_distance(&self.anchor, a).total_cmp(&squared_distance(&self.anchor, b))
        });
        let (near, next) = (corners[0], corners[1]);
        let edge = Line::through(&near, &next);

        for circle in &self.circles {
            if circle.radius == 0.0 {
                continue;
            }
            let probe = if edge.a == 0.0 {
                Line::vertical(&circle.center)
            } else {
                Line::with_slope(edge.b / edge.a, &circle.center)
            };
            let Some(crossing) = edge.intersection(&probe) else {
                continue;
            };
            if edge.distance_to(&circle.center) <= circle.radius
                && within(crossing.x(), near.x(), next.x())
                && within(crossing.y(), near.y(), next.y())
            {
                return false;
            }
        }
        true
    }

    /// Bounding rectangle of the union of all circles.
    pub fn bounding_rect(&self) -> BoundingBox2D {
        if self.circles.is_empty() {
            return BoundingBox2D::from_point(&self.anchor);
        }
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for circle in &self.circles {
            min_x = min_x.min(circle.center.x() - circle.radius);
            min_y = min_y.min(circle.center.y() - circle.radius);
            max_x = max_x.max(circle.center.x() + circle.radius);
            max_y = max_y.max(circle.center.y() + circle.radius);
        }
        BoundingBox2D::new(min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_line_intersection() {
        let horizontal = Line::through(&Point::new(0.0, 1.0), &Point::new(5.0, 1.0));
        let vertical = Line::vertical(&Point::new(2.0, 7.0));
        assert_eq!(horizontal.intersection(&vertical), Some(Point::new(2.0, 1.0)));

        let parallel = Line::through(&Point::new(0.0, 3.0), &Point::new(5.0, 3.0));
        assert_eq!(horizontal.intersection(&parallel), None);
        let vertical2 = Line::vertical(&Point::new(4.0, 0.0));
        assert_eq!(vertical.intersection(&vertical2), None);
    }

    #[test]
    fn test_line_distance() {
        let diagonal = Line::through(&Point::new(0.0, 0.0), &Point::new(1.0, 1.0));
        let d = diagonal.distance_to(&Point::new(0.0, 2.0));
        assert!((d - 2.0_f64.sqrt()).abs() < 1e-12);
        let vertical = Line::vertical(&Point::new(3.0, 0.0));
        assert_eq!(vertical.distance_to(&Point::new(-1.0, 8.0)), 4.0);
    }

    #[test]
    fn test_anchor_dominates_itself() {
        let anchor = Point::new(0.3, 0.7);
        let region = DominanceRegion::new(anchor, &[Point::new(0.1, 0.2), Point::new(0.9, 0.4)]);
        assert!(region.point_is_dominated(&anchor));
    }

    #[test]
    fn test_point_dominance() {
        let region = DominanceRegion::new(Point::new(2.0, 2.0), &square());
        assert!(region.point_is_dominated(&Point::new(10.0, 10.0)));
        assert!(region.point_is_dominated(&Point::new(-5.0, -5.0)));
        assert!(!region.point_is_dominated(&Point::new(1.0, 1.0)));
        assert!(!region.point_is_dominated(&Point::new(3.0, 2.5)));
    }

    #[test]
    fn test_point_dominance_matches_distance_vectors() {
        let refs = square();
        let anchor = Point::new(5.0, 1.0);
        let region = DominanceRegion::new(anchor, &refs);
        for candidate in [
            Point::new(6.0, 1.0),
            Point::new(5.0, 3.0),
            Point::new(9.0, -2.0),
            Point::new(2.0, 2.0),
        ] {
            let oracle = refs
                .iter()
                .all(|q| point_distance(q, &anchor) <= point_distance(q, &candidate));
            assert_eq!(region.point_is_dominated(&candidate), oracle, "{:?}", candidate);
        }
    }

    #[test]
    fn test_bounding_rect() {
        let region = DominanceRegion::new(Point::new(0.0, 3.0), &[Point::new(0.0, 0.0)]);
        assert_eq!(region.bounding_rect(), BoundingBox2D::new(-3.0, -3.0, 3.0, 3.0));

        let region = DominanceRegion::new(Point::new(2.0, 2.0), &square());
        let r = 8.0_f64.sqrt();
        let mbr = region.bounding_rect();
        assert!((mbr.min_x() + r).abs() < 1e-12);
        assert!((mbr.max_y() - (4.0 + r)).abs() < 1e-12);
    }

    #[test]
    fn test_rect_dominated_far_away() {
        let region = DominanceRegion::new(Point::new(2.0, 2.0), &square());
        let far = BoundingBox2D::new(20.0, 20.0, 25.0, 30.0);
        assert!(region.rect_is_dominated(&far, RectDominance::NearestEdge));
        assert!(region.rect_is_dominated(&far, RectDominance::Exact));
    }

    #[test]
    fn test_rect_with_undominated_corner() {
        let region = DominanceRegion::new(Point::new(2.0, 2.0), &square());
        let rect = BoundingBox2D::new(1.0, 1.0, 30.0, 30.0);
        assert!(!region.rect_is_dominated(&rect, RectDominance::NearestEdge));
        assert!(!region.rect_is_dominated(&rect, RectDominance::Exact));
    }

    #[test]
    fn test_rect_crossed_on_nearest_edge() {
        // Single circle centered at the origin with radius 5. The rectangle's
        // corners are all outside it, but its bottom edge cuts through it.
        let region = DominanceRegion::new(Point::new(0.0, -5.0), &[Point::new(0.0, 0.0)]);
        let rect = BoundingBox2D::new(-6.0, 4.0, 6.0, 10.0);
        for corner in rect.corners() {
            assert!(region.point_is_dominated(&corner));
        }
        assert!(!region.rect_is_dominated(&rect, RectDominance::Exact));
        assert!(!region.rect_is_dominated(&rect, RectDominance::NearestEdge));
    }

    #[test]
    fn test_nearest_edge_misses_crossing_on_other_edge() {
        // The anchor sits below the rectangle, so the bottom edge is the one
        // inspected; the circle only pokes through the left edge.
        let region = DominanceRegion::new(Point::new(3.0, -4.0), &[Point::new(0.0, 0.0)]);
        assert_eq!(region.circles()[0].radius, 5.0);
        let rect = BoundingBox2D::new(4.0, -6.0, 10.0, 6.0);
        for corner in rect.corners() {
            assert!(region.point_is_dominated(&corner));
        }
        assert!(!region.rect_is_dominated(&rect, RectDominance::Exact));
        assert!(region.rect_is_dominated(&rect, RectDominance::NearestEdge));
    }

    #[test]
    fn test_vertical_nearest_edge() {
        // Anchor to the left: nearest edge is the rectangle's left side.
        let region = DominanceRegion::new(Point::new(-5.0, 0.0), &[Point::new(0.0, 0.0)]);
        let crossing = BoundingBox2D::new(4.0, -6.0, 10.0, 6.0);
        assert!(!region.rect_is_dominated(&crossing, RectDominance::NearestEdge));
        let clear = BoundingBox2D::new(6.0, -6.0, 10.0, 6.0);
        assert!(region.rect_is_dominated(&clear, RectDominance::NearestEdge));
        assert!(region.rect_is_dominated(&clear, RectDominance::Exact));
    }

    #[test]
    fn test_zero_radius_circle_is_no_violation() {
        let anchor = Point::new(0.0, 0.0);
        let region = DominanceRegion::new(anchor, &[anchor, Point::new(10.0, 0.0)]);
        assert_eq!(region.circles()[0].radius, 0.0);
        let rect = BoundingBox2D::new(-3.0, 0.0, -1.0, 2.0);
        assert!(region.rect_is_dominated(&rect, RectDominance::NearestEdge));
        assert!(region.rect_is_dominated(&rect, RectDominance::Exact));
    }
}
