//! Query builder and prepared queries.
//!
//! [`SkylineBuilder`] validates input, extracts the reference hull, and builds
//! the data index once. The resulting [`SkylineQuery`] can be run any number
//! of times.

use crate::compute::distance::ReferenceSet;
use crate::compute::hull::ConvexHullOracle;
use crate::compute::validation::validate_points;
use crate::config::{Config, DominanceBasis};
use crate::error::{Result, SkylineError};
use crate::index::DataIndex;
use crate::search::{Scheduler, SkylineResult};
use geo::Point;
use skyline_types::{QueryReport, SearchStats};
use std::time::{Duration, Instant};

/// Builder for skyline queries.
#[derive(Debug, Default)]
pub struct SkylineBuilder {
    data: Vec<Point>,
    references: Vec<Point>,
    config: Config,
}

impl SkylineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add data points; their ids are their positions in insertion order.
    pub fn data_points<I: IntoIterator<Item = Point>>(mut self, points: I) -> Self {
        self.data.extend(points);
        self
    }

    pub fn data_point(mut self, point: Point) -> Self {
        self.data.push(point);
        self
    }

    pub fn reference_points<I: IntoIterator<Item = Point>>(mut self, points: I) -> Self {
        self.references.extend(points);
        self
    }

    pub fn reference_point(mut self, point: Point) -> Self {
        self.references.push(point);
        self
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validate input and prepare the query.
    ///
    /// Fails with [`SkylineError::NoReferencePoints`] for an empty reference
    /// set, [`SkylineError::InvalidInput`] for non-finite coordinates, and
    /// [`SkylineError::InvalidConfig`] for an invalid configuration.
    pub fn build(self) -> Result<SkylineQuery> {
        self.config.validate().map_err(SkylineError::InvalidConfig)?;
        let references = ReferenceSet::new(self.references)?;
        validate_points(&self.data)?;

        let started = Instant::now();
        let hull =
            ConvexHullOracle::from_points(references.points(), self.config.hull_tolerance_degrees)?;
        let hull_time = started.elapsed();

        let basis = match self.config.dominance_basis {
            DominanceBasis::ReferencePoints => references.clone(),
            DominanceBasis::HullVertices => ReferenceSet::new(hull.vertices().to_vec())?,
        };

        let index = DataIndex::build(&self.data, &self.config);

        log::debug!(
            "Prepared skyline query: {} data points, {} reference points, {} hull vertices, {} basis points",
            index.len(),
            references.len(),
            hull.vertices().len(),
            basis.len()
        );

        Ok(SkylineQuery {
            config: self.config,
            references,
            basis,
            hull,
            index,
            hull_time,
        })
    }
}

/// A validated query with its hull and data index built.
#[derive(Debug)]
pub struct SkylineQuery {
    config: Config,
    references: ReferenceSet,
    basis: ReferenceSet,
    hull: ConvexHullOracle,
    index: DataIndex,
    hull_time: Duration,
}

impl SkylineQuery {
    /// Run the search to completion.
    pub fn run(&self) -> Result<SkylineResult> {
        self.scheduler().run()
    }

    /// Run the search and summarise it.
    pub fn run_with_report(&self) -> Result<(SkylineResult, QueryReport)> {
        let started = Instant::now();
        let result = self.run()?;
        let report = self.report(result.stats.clone(), started.elapsed());
        Ok((result, report))
    }

    /// A fresh scheduler for stepping through the search manually.
    pub fn scheduler(&self) -> Scheduler<'_> {
        Scheduler::new(
            &self.index,
            &self.basis,
            &self.hull,
            self.config.rect_dominance,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn references(&self) -> &ReferenceSet {
        &self.references
    }

    /// Points that define priorities and dominance circles.
    pub fn basis(&self) -> &ReferenceSet {
        &self.basis
    }

    pub fn hull(&self) -> &ConvexHullOracle {
        &self.hull
    }

    pub fn index(&self) -> &DataIndex {
        &self.index
    }

    fn report(&self, stats: SearchStats, search_time: Duration) -> QueryReport {
        QueryReport {
            data_points: self.index.len(),
            reference_points: self.references.len(),
            fan_out: self.index.fan_out(),
            hull_vertices: self.hull.vertices().len(),
            index_nodes: self.index.node_count(),
            data_mbr: self.index.bounding_rect(),
            reference_mbr: self.references.bounding_box(),
            hull_time: self.hull_time,
            search_time,
            stats,
        }
    }
}
