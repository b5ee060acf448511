//! The shrinking search boundary.

use skyline_types::BoundingBox2D;

/// Rectangle outside of which no undiscovered skyline point can lie.
///
/// Starts as the data bounding box and is replaced by its intersection with
/// each new dominance region's bounding rectangle, so it only ever shrinks.
/// An exhausted box (empty intersection) intersects nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruningBox {
    bounds: Option<BoundingBox2D>,
}

impl PruningBox {
    pub fn new(initial: BoundingBox2D) -> Self {
        Self {
            bounds: Some(initial),
        }
    }

    /// A box that intersects nothing.
    pub fn exhausted() -> Self {
        Self { bounds: None }
    }

    /// Current bounds, `None` once the box is exhausted.
    pub fn bounds(&self) -> Option<&BoundingBox2D> {
        self.bounds.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.bounds.is_none()
    }

    /// Whether `rect` overlaps the box; touching counts.
    pub fn intersects(&self, rect: &BoundingBox2D) -> bool {
        self.bounds.is_some_and(|bounds| bounds.intersects(rect))
    }

    /// Replace the box with its intersection with `rect`.
    pub fn shrink(&mut self, rect: &BoundingBox2D) {
        self.bounds = self.bounds.and_then(|bounds| bounds.intersection(rect));
    }

    /// Whether this box lies within `other`.
    pub fn is_within(&self, other: &PruningBox) -> bool {
        match (self.bounds, other.bounds) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(inner), Some(outer)) => outer.contains_bbox(&inner),
        }
    }
}
