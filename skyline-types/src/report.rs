use crate::bbox::BoundingBox2D;
use crate::stats::SearchStats;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Summary of one prepared and executed skyline query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryReport {
    /// Number of data points indexed
    pub data_points: usize,
    /// Number of reference (query) points
    pub reference_points: usize,
    /// Maximum entries per R-tree node
    pub fan_out: usize,
    /// Number of convex hull vertices of the reference set
    pub hull_vertices: usize,
    /// Index nodes: one per internal node plus one per leaf entry
    pub index_nodes: usize,
    /// Bounding box of the data points, `None` for an empty data set
    pub data_mbr: Option<BoundingBox2D>,
    /// Bounding box of the reference points
    pub reference_mbr: BoundingBox2D,
    /// Time spent extracting the hull
    pub hull_time: Duration,
    /// Time spent in the branch-and-bound loop
    pub search_time: Duration,
    /// Search counters
    pub stats: SearchStats,
}

impl QueryReport {
    pub fn data_mbr_area(&self) -> f64 {
        self.data_mbr.map_or(0.0, |mbr| mbr.area())
    }

    pub fn reference_mbr_area(&self) -> f64 {
        self.reference_mbr.area()
    }

    /// Reference MBR area as a fraction of the data MBR area.
    ///
    /// `None` when the data MBR has no area.
    pub fn reference_coverage(&self) -> Option<f64> {
        let data_area = self.data_mbr_area();
        (data_area > 0.0).then(|| self.reference_mbr_area() / data_area)
    }
}
