//! # skyline-types
//!
//! Plain data types shared by the spatial skyline engine:
//!
//! - **Bounding boxes**: `BoundingBox2D`, an axis-aligned rectangle over `geo::Rect`
//! - **Statistics**: `SearchStats`, counters gathered by one search
//! - **Reports**: `QueryReport`, the per-query summary
//!
//! All types are serializable with Serde.
//!
//! ## Examples
//!
//! ```rust
//! use skyline_types::bbox::BoundingBox2D;
//! use geo::Point;
//!
//! let data_mbr = BoundingBox2D::new(-5.0, -5.0, 10.0, 10.0);
//! assert!(data_mbr.contains_point(&Point::new(2.0, 2.0)));
//! ```

pub mod bbox;
pub mod report;
pub mod stats;

pub use bbox::BoundingBox2D;
pub use report::QueryReport;
pub use stats::SearchStats;
