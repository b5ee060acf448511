//! Best-first branch-and-bound search for the spatial skyline.
//!
//! Index entries are dequeued in order of their aggregate distance lower
//! bound. An entry survives when it intersects the pruning box and is either
//! inside the reference hull or not dominated by any accepted point. Surviving
//! leaves join the skyline; surviving internal nodes are expanded.

use crate::compute::distance::ReferenceSet;
use crate::compute::dominance::DominanceRegion;
use crate::compute::hull::ConvexHullOracle;
use crate::compute::pruning::PruningBox;
use crate::config::RectDominance;
use crate::error::{Result, SkylineError};
use crate::index::{DataIndex, IndexNode, IndexedPoint};
use geo::Point;
use rstar::{ParentNode, RTreeNode};
use serde::{Deserialize, Serialize};
use skyline_types::{BoundingBox2D, SearchStats};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// An accepted skyline point with its position in the input data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkylinePoint {
    pub id: usize,
    pub point: Point,
}

/// Outcome of one search, in acceptance order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkylineResult {
    pub points: Vec<SkylinePoint>,
    pub stats: SearchStats,
}

impl SkylineResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Data ids of the skyline, sorted ascending.
    pub fn ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.points.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.points.iter().any(|p| p.point == *point)
    }
}

#[derive(Debug, Clone, Copy)]
enum Payload<'a> {
    Leaf(&'a IndexedPoint),
    Internal(&'a ParentNode<IndexedPoint>),
}

impl Payload<'_> {
    fn rect(&self) -> BoundingBox2D {
        match self {
            Payload::Leaf(item) => item.rect(),
            Payload::Internal(node) => node.rect(),
        }
    }
}

struct QueueEntry<'a> {
    priority: f64,
    sequence: u64,
    payload: Payload<'a>,
}

impl PartialEq for QueueEntry<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry<'_> {}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on priority, then first-in first-out.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Branch-and-bound state for a single skyline search.
///
/// Borrows the index, the dominance basis, and the hull oracle for the
/// duration of the search. Drive it with [`run`](Self::run), or one dequeue
/// at a time with [`step`](Self::step).
pub struct Scheduler<'a> {
    basis: &'a ReferenceSet,
    hull: &'a ConvexHullOracle,
    rect_dominance: RectDominance,
    queue: BinaryHeap<QueueEntry<'a>>,
    pruning: PruningBox,
    regions: Vec<DominanceRegion>,
    skyline: Vec<SkylinePoint>,
    sequence: u64,
    stats: SearchStats,
}

impl<'a> Scheduler<'a> {
    /// Seed a search with the index root.
    ///
    /// `basis` supplies priorities and dominance circles; `hull` answers the
    /// membership short-circuit.
    pub fn new(
        index: &'a DataIndex,
        basis: &'a ReferenceSet,
        hull: &'a ConvexHullOracle,
        rect_dominance: RectDominance,
    ) -> Self {
        let mut scheduler = Self {
            basis,
            hull,
            rect_dominance,
            queue: BinaryHeap::new(),
            pruning: PruningBox::exhausted(),
            regions: Vec::new(),
            skyline: Vec::new(),
            sequence: 0,
            stats: SearchStats::new(),
        };

        match index.root() {
            Some(root) => {
                let rect = root.rect();
                scheduler.pruning = PruningBox::new(rect);
                scheduler.push(Payload::Internal(root), &rect);
            }
            None => log::warn!("Skyline search over an empty data set"),
        }
        scheduler
    }

    /// Process one dequeued entry. Returns whether entries remain queued.
    pub fn step(&mut self) -> Result<bool> {
        let Some(entry) = self.queue.pop() else {
            return Ok(false);
        };
        let rect = entry.payload.rect();
        log::trace!(
            "Dequeued #{} priority={:.6} rect={:?}",
            entry.sequence,
            entry.priority,
            rect.rect
        );

        if !self.pruning.intersects(&rect) {
            self.stats.record_box_prune();
        } else if !self.is_promising(&rect) {
            self.stats.record_dominance_prune();
        } else {
            self.stats.record_visit();
            match entry.payload {
                Payload::Leaf(item) => self.accept(item),
                Payload::Internal(node) => self.expand(node, &rect)?,
            }
        }
        Ok(!self.queue.is_empty())
    }

    /// Run to completion and return the skyline.
    pub fn run(mut self) -> Result<SkylineResult> {
        while self.step()? {}
        log::info!(
            "Skyline search finished: {} points, {} nodes visited, {} dominance checks",
            self.skyline.len(),
            self.stats.nodes_visited,
            self.stats.dominance_checks
        );
        Ok(self.finish())
    }

    /// Hand over the skyline and counters accumulated so far.
    pub fn finish(self) -> SkylineResult {
        SkylineResult {
            points: self.skyline,
            stats: self.stats,
        }
    }

    pub fn pruning_box(&self) -> &PruningBox {
        &self.pruning
    }

    pub fn skyline(&self) -> &[SkylinePoint] {
        &self.skyline
    }

    pub fn regions(&self) -> &[DominanceRegion] {
        &self.regions
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    fn push(&mut self, payload: Payload<'a>, rect: &BoundingBox2D) {
        let priority = self.basis.aggregate_rect(rect);
        self.queue.push(QueueEntry {
            priority,
            sequence: self.sequence,
            payload,
        });
        self.sequence += 1;
        self.stats.record_push(self.queue.len());
    }

    fn is_promising(&mut self, rect: &BoundingBox2D) -> bool {
        // Hull locations are undominated, so a node meeting the hull is kept
        // whatever the rectangle test would say.
        let meets_hull = if rect.is_point() {
            self.hull.contains_rect(rect)
        } else {
            self.hull.intersects_rect(rect)
        };
        if meets_hull {
            self.stats.record_hull_short_circuit();
            return true;
        }

        self.stats.record_dominance_check();
        let dominated = if rect.is_point() {
            let point = Point::from(rect.rect.min());
            self.regions.iter().any(|r| r.point_is_dominated(&point))
        } else {
            self.regions
                .iter()
                .any(|r| r.rect_is_dominated(rect, self.rect_dominance))
        };
        !dominated
    }

    fn accept(&mut self, item: &IndexedPoint) {
        let region = DominanceRegion::new(item.point, self.basis.points());
        self.pruning.shrink(&region.bounding_rect());
        log::debug!(
            "Accepted point {} at ({}, {}); pruning box now {:?}",
            item.id,
            item.point.x(),
            item.point.y(),
            self.pruning.bounds().map(|b| b.rect)
        );

        self.regions.push(region);
        self.skyline.push(SkylinePoint {
            id: item.id,
            point: item.point,
        });
        self.stats.record_accept();
    }

    fn expand(
        &mut self,
        node: &'a ParentNode<IndexedPoint>,
        rect: &BoundingBox2D,
    ) -> Result<()> {
        for child in node.children() {
            let payload = match child {
                RTreeNode::Leaf(item) => Payload::Leaf(item),
                RTreeNode::Parent(parent) => Payload::Internal(parent),
            };
            let child_rect = payload.rect();
            if !rect.contains_bbox(&child_rect) {
                return Err(SkylineError::MalformedIndex(format!(
                    "child envelope {:?} escapes parent envelope {:?}",
                    child_rect.rect, rect.rect
                )));
            }

            if !self.pruning.intersects(&child_rect) {
                self.stats.record_box_prune();
                continue;
            }
            if !self.is_promising(&child_rect) {
                self.stats.record_dominance_prune();
                continue;
            }
            self.push(payload, &child_rect);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::hull::DEFAULT_ANGLE_TOLERANCE;
    use crate::config::Config;

    struct Fixture {
        index: DataIndex,
        refs: ReferenceSet,
        hull: ConvexHullOracle,
    }

    impl Fixture {
        fn new(data: &[Point], refs: Vec<Point>) -> Self {
            let refs = ReferenceSet::new(refs).unwrap();
            let hull =
                ConvexHullOracle::from_points(refs.points(), DEFAULT_ANGLE_TOLERANCE).unwrap();
            Self {
                index: DataIndex::build(data, &Config::default()),
                refs,
                hull,
            }
        }

        fn scheduler(&self, mode: RectDominance) -> Scheduler<'_> {
            Scheduler::new(&self.index, &self.refs, &self.hull, mode)
        }
    }

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ]
    }

    #[test]
    fn test_queue_entry_order() {
        let item = IndexedPoint::new(0, Point::new(0.0, 0.0));
        let mut heap = BinaryHeap::new();
        for (priority, sequence) in [(2.0, 0), (1.0, 1), (1.0, 2), (0.5, 3)] {
            heap.push(QueueEntry {
                priority,
                sequence,
                payload: Payload::Leaf(&item),
            });
        }
        let order: Vec<u64> = std::iter::from_fn(|| heap.pop().map(|e| e.sequence)).collect();
        assert_eq!(order, vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_square_references_keep_center() {
        let data = [
            Point::new(2.0, 2.0),
            Point::new(10.0, 10.0),
            Point::new(-5.0, -5.0),
        ];
        let fixture = Fixture::new(&data, square());
        let result = fixture.scheduler(RectDominance::NearestEdge).run().unwrap();

        assert_eq!(result.ids(), vec![0]);
        assert_eq!(result.stats.skyline_size, 1);
        // The root straddles the hull; the center leaf is counted once as a
        // child and once when dequeued.
        assert_eq!(result.stats.hull_short_circuits, 3);
        assert_eq!(result.stats.pruned_by_box, 2);
        // Root plus the accepted leaf.
        assert_eq!(result.stats.nodes_visited, 2);
        // The two leaves outside the hull.
        assert_eq!(result.stats.dominance_checks, 2);
    }

    #[test]
    fn test_single_reference_returns_nearest() {
        let data = [
            Point::new(3.0, 4.0),
            Point::new(1.0, 1.0),
            Point::new(-2.0, 0.5),
            Point::new(5.0, 5.0),
        ];
        let fixture = Fixture::new(&data, vec![Point::new(0.0, 0.0)]);
        for mode in [RectDominance::NearestEdge, RectDominance::Exact] {
            let result = fixture.scheduler(mode).run().unwrap();
            assert_eq!(result.ids(), vec![1]);
        }
    }

    #[test]
    fn test_empty_data() {
        let fixture = Fixture::new(&[], square());
        let mut scheduler = fixture.scheduler(RectDominance::NearestEdge);
        assert!(scheduler.pruning_box().is_exhausted());
        assert!(!scheduler.step().unwrap());
        let result = scheduler.finish();
        assert!(result.is_empty());
        assert_eq!(result.stats, SearchStats::default());
    }

    #[test]
    fn test_pruning_box_only_shrinks() {
        let data: Vec<Point> = (0..60)
            .map(|i| {
                let t = i as f64 * 0.37;
                Point::new(
                    t.cos() * (3.0 + i as f64 * 0.2),
                    t.sin() * (2.0 + i as f64 * 0.15),
                )
            })
            .collect();
        let refs = vec![
            Point::new(-1.0, 0.0),
            Point::new(1.5, 0.5),
            Point::new(0.0, 2.0),
        ];
        let fixture = Fixture::new(&data, refs);
        let mut scheduler = fixture.scheduler(RectDominance::NearestEdge);

        let mut previous = *scheduler.pruning_box();
        let mut previous_len = 0;
        while scheduler.step().unwrap() {
            let current = *scheduler.pruning_box();
            assert!(current.is_within(&previous));
            assert!(scheduler.skyline().len() >= previous_len);
            previous = current;
            previous_len = scheduler.skyline().len();
        }
        assert!(!scheduler.skyline().is_empty());
        assert_eq!(scheduler.queue_len(), 0);
    }

    #[test]
    fn test_accepted_points_do_not_dominate_each_other() {
        let data: Vec<Point> = (0..40)
            .map(|i| {
                let x = (i * 7 % 13) as f64 - 6.0;
                let y = (i * 11 % 17) as f64 - 8.0 + i as f64 * 0.01;
                Point::new(x, y)
            })
            .collect();
        let fixture = Fixture::new(&data, square());
        let mut scheduler = fixture.scheduler(RectDominance::Exact);
        while scheduler.step().unwrap() {}

        let regions = scheduler.regions();
        for (i, a) in regions.iter().enumerate() {
            for b in regions.iter().skip(i + 1) {
                assert!(!(a.point_is_dominated(b.anchor()) && b.point_is_dominated(a.anchor())));
            }
        }
    }

    #[test]
    fn test_node_meeting_hull_skips_dominance() {
        let fixture = Fixture::new(&[Point::new(2.0, 2.0)], square());
        let mut scheduler = fixture.scheduler(RectDominance::NearestEdge);
        scheduler
            .regions
            .push(DominanceRegion::new(Point::new(2.0, 2.0), fixture.refs.points()));

        // Straddles the right edge of the hull.
        let straddling = BoundingBox2D::new(3.0, 1.0, 8.0, 2.0);
        assert!(scheduler.is_promising(&straddling));
        assert_eq!(scheduler.stats().dominance_checks, 0);
        assert_eq!(scheduler.stats().hull_short_circuits, 1);

        // Entirely outside and far away: the regions decide.
        let outside = BoundingBox2D::new(20.0, 20.0, 30.0, 30.0);
        assert!(!scheduler.is_promising(&outside));
        assert_eq!(scheduler.stats().dominance_checks, 1);
    }

    #[test]
    fn test_malformed_index_is_reported() {
        // A hand-built node whose child lies outside of it.
        let outside = BoundingBox2D::new(0.0, 0.0, 1.0, 1.0);
        let fixture = Fixture::new(&[Point::new(5.0, 5.0)], square());
        let mut scheduler = fixture.scheduler(RectDominance::NearestEdge);
        let root = fixture.index.root().unwrap();
        let err = scheduler.expand(root, &outside).unwrap_err();
        assert!(matches!(err, SkylineError::MalformedIndex(_)));
    }
}
