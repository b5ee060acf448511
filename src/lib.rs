//! Spatial skyline queries with branch-and-bound search over an R*-tree.
//!
//! A data point is in the spatial skyline of a set of reference points when no
//! other data point is at least as close to every reference point and strictly
//! closer to one of them.
//!
//! ```rust
//! use spatial_skyline::{Point, SkylineBuilder};
//!
//! let query = SkylineBuilder::new()
//!     .data_points([Point::new(2.0, 2.0), Point::new(10.0, 10.0), Point::new(-5.0, -5.0)])
//!     .reference_points([
//!         Point::new(0.0, 0.0),
//!         Point::new(4.0, 0.0),
//!         Point::new(4.0, 4.0),
//!         Point::new(0.0, 4.0),
//!     ])
//!     .build()?;
//!
//! let skyline = query.run()?;
//! assert_eq!(skyline.ids(), vec![0]);
//! # Ok::<(), spatial_skyline::SkylineError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod index;
pub mod search;

pub use builder::{SkylineBuilder, SkylineQuery};
pub use config::{Config, DominanceBasis, FanOut, IndexBuild, RectDominance};
pub use error::{Result, SkylineError};

pub use geo::{Point, Rect};

pub use compute::{
    ConvexHullOracle, DominanceRegion, PruningBox, ReferenceSet, hull_vertices, min_distance,
    point_distance,
};
pub use index::{DataIndex, IndexedPoint};
pub use search::{Scheduler, SkylinePoint, SkylineResult};

pub use skyline_types::{BoundingBox2D, QueryReport, SearchStats};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Result, SkylineBuilder, SkylineError, SkylineQuery, SkylineResult};

    pub use geo::{Point, Rect};

    pub use crate::{BoundingBox2D, Config, DominanceBasis, FanOut, IndexBuild, RectDominance};

    pub use crate::{QueryReport, SearchStats};
}
