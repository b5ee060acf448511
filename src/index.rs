//! R*-tree over the data points.
//!
//! The search only needs read access to the tree structure: the root, the
//! children of each internal node, and node envelopes. `rstar` exposes those
//! through [`ParentNode`] and the [`RTreeNode`] leaf/parent variant.

use crate::config::{Config, FanOut, IndexBuild};
use geo::Point;
use rstar::{
    AABB, ParentNode, RStarInsertionStrategy, RTree, RTreeNode, RTreeObject, RTreeParams,
};
use skyline_types::BoundingBox2D;

/// A data point stored in the index, tagged with its input position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedPoint {
    pub id: usize,
    pub point: Point,
}

impl IndexedPoint {
    pub fn new(id: usize, point: Point) -> Self {
        Self { id, point }
    }
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x(), self.point.y()])
    }
}

macro_rules! fan_out_params {
    ($name:ident, $max:expr, $min:expr, $reinsert:expr) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl RTreeParams for $name {
            const MIN_SIZE: usize = $min;
            const MAX_SIZE: usize = $max;
            const REINSERTION_COUNT: usize = $reinsert;
            type DefaultInsertionStrategy = RStarInsertionStrategy;
        }
    };
}

fan_out_params!(FourParams, 4, 2, 1);
fan_out_params!(EightParams, 8, 3, 2);
fan_out_params!(SixteenParams, 16, 6, 4);
fan_out_params!(ThirtyTwoParams, 32, 12, 8);

/// Node envelope as a bounding box.
pub fn envelope_rect(envelope: &AABB<[f64; 2]>) -> BoundingBox2D {
    let [min_x, min_y] = envelope.lower();
    let [max_x, max_y] = envelope.upper();
    BoundingBox2D::new(min_x, min_y, max_x, max_y)
}

/// Bounding rectangle of an index entry.
pub trait IndexNode {
    fn rect(&self) -> BoundingBox2D;
}

impl IndexNode for ParentNode<IndexedPoint> {
    fn rect(&self) -> BoundingBox2D {
        envelope_rect(&self.envelope())
    }
}

impl IndexNode for IndexedPoint {
    fn rect(&self) -> BoundingBox2D {
        BoundingBox2D::from_point(&self.point)
    }
}

/// The data index, one variant per supported fan-out.
pub enum DataIndex {
    Four(RTree<IndexedPoint, FourParams>),
    Eight(RTree<IndexedPoint, EightParams>),
    Sixteen(RTree<IndexedPoint, SixteenParams>),
    ThirtyTwo(RTree<IndexedPoint, ThirtyTwoParams>),
}

fn build_tree<P: RTreeParams>(
    points: Vec<IndexedPoint>,
    build: IndexBuild,
) -> RTree<IndexedPoint, P> {
    match build {
        IndexBuild::BulkLoad => RTree::bulk_load_with_params(points),
        IndexBuild::Sequential => {
            let mut tree = RTree::new_with_params();
            for point in points {
                tree.insert(point);
            }
            tree
        }
    }
}

fn count_nodes(node: &ParentNode<IndexedPoint>) -> usize {
    1 + node
        .children()
        .iter()
        .map(|child| match child {
            RTreeNode::Leaf(_) => 1,
            RTreeNode::Parent(parent) => count_nodes(parent),
        })
        .sum::<usize>()
}

impl DataIndex {
    /// Build an index over `points`; ids are input positions.
    pub fn build(points: &[Point], config: &Config) -> Self {
        let items: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(id, point)| IndexedPoint::new(id, *point))
            .collect();
        let build = config.index_build;

        log::debug!(
            "Building {:?} index over {} points with fan-out {}",
            build,
            items.len(),
            config.fan_out.max_entries()
        );

        match config.fan_out {
            FanOut::Four => DataIndex::Four(build_tree(items, build)),
            FanOut::Eight => DataIndex::Eight(build_tree(items, build)),
            FanOut::Sixteen => DataIndex::Sixteen(build_tree(items, build)),
            FanOut::ThirtyTwo => DataIndex::ThirtyTwo(build_tree(items, build)),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DataIndex::Four(tree) => tree.size(),
            DataIndex::Eight(tree) => tree.size(),
            DataIndex::Sixteen(tree) => tree.size(),
            DataIndex::ThirtyTwo(tree) => tree.size(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured maximum node capacity.
    pub fn fan_out(&self) -> usize {
        match self {
            DataIndex::Four(_) => FanOut::Four.max_entries(),
            DataIndex::Eight(_) => FanOut::Eight.max_entries(),
            DataIndex::Sixteen(_) => FanOut::Sixteen.max_entries(),
            DataIndex::ThirtyTwo(_) => FanOut::ThirtyTwo.max_entries(),
        }
    }

    /// Root node, `None` for an empty index (whose root envelope is inverted).
    pub fn root(&self) -> Option<&ParentNode<IndexedPoint>> {
        if self.is_empty() {
            return None;
        }
        Some(match self {
            DataIndex::Four(tree) => tree.root(),
            DataIndex::Eight(tree) => tree.root(),
            DataIndex::Sixteen(tree) => tree.root(),
            DataIndex::ThirtyTwo(tree) => tree.root(),
        })
    }

    /// Bounding rectangle of all data points, `None` when empty.
    pub fn bounding_rect(&self) -> Option<BoundingBox2D> {
        self.root().map(|root| root.rect())
    }

    /// Internal nodes plus leaf entries; zero for an empty index.
    pub fn node_count(&self) -> usize {
        self.root().map_or(0, count_nodes)
    }
}

impl std::fmt::Debug for DataIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataIndex")
            .field("fan_out", &self.fan_out())
            .field("len", &self.len())
            .finish()
    }
}
