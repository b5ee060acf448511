//! Geometry behind the skyline search: distances, hull membership, dominance,
//! pruning, and input validation.

pub mod distance;
pub mod dominance;
pub mod hull;
pub mod pruning;
pub mod validation;

pub use distance::{ReferenceSet, min_distance, point_distance};
pub use dominance::{Circle, DominanceRegion};
pub use hull::{ConvexHullOracle, hull_vertices};
pub use pruning::PruningBox;
