//! Proximity graph over traversable grid cells.
//!
//! # Data layout
//!
//! Nodes are the grid cells whose confidence is not `Obstacle`, ordered by
//! grid key.  Adjacency uses **Compressed Sparse Row (CSR)** format: the
//! neighbours of `NodeId n` occupy
//!
//! ```text
//! adjacency[ node_adj_start[n] .. node_adj_start[n+1] ]
//! ```
//!
//! sorted ascending.  The graph is undirected, so every edge appears once in
//! each endpoint's row.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over node positions answers both the
//! radius queries used to connect nodes and nearest-node snapping.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use slam_core::{NodeId, Point};
use slam_map::{Confidence, GridKey, GridPoint};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NavNode ───────────────────────────────────────────────────────────────────

/// One graph node: a traversable grid cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavNode {
    pub id:         NodeId,
    pub key:        GridKey,
    pub confidence: Confidence,
}

impl NavNode {
    #[inline]
    pub fn point(&self) -> Point {
        self.key.point()
    }

    /// Confidently open.
    #[inline]
    pub fn accessible(&self) -> bool {
        self.confidence == Confidence::Open
    }

    /// Not yet trusted either way: a frontier candidate.
    #[inline]
    pub fn uncertain(&self) -> bool {
        self.confidence == Confidence::Uncertain
    }
}

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Undirected proximity graph in CSR format plus a spatial index.
pub struct NavGraph {
    /// Node attributes, indexed by `NodeId`.
    pub nodes: Vec<NavNode>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_adj_start: Vec<u32>,

    /// Concatenated neighbour lists.
    pub adjacency: Vec<NodeId>,

    spatial_idx: RTree<NodeEntry>,
}

impl NavGraph {
    /// A graph with no nodes.  Every routing request against it fails.
    pub fn empty() -> Self {
        Self {
            nodes:          Vec::new(),
            node_adj_start: vec![0],
            adjacency:      Vec::new(),
            spatial_idx:    RTree::new(),
        }
    }

    /// Build from a grid snapshot.
    ///
    /// Keeps every cell with confidence `Uncertain` or `Open` and connects
    /// two nodes iff their Euclidean distance is strictly below `threshold`.
    pub fn from_grid(points: &[GridPoint], threshold: f64) -> Self {
        let mut kept: Vec<&GridPoint> = points
            .iter()
            .filter(|p| p.confidence() >= Confidence::Uncertain)
            .collect();
        kept.sort_unstable_by_key(|p| p.key);

        let nodes: Vec<NavNode> = kept
            .iter()
            .enumerate()
            .map(|(i, p)| NavNode { id: NodeId(i as u32), key: p.key, confidence: p.confidence() })
            .collect();

        let entries: Vec<NodeEntry> = nodes
            .iter()
            .map(|n| NodeEntry { point: [n.key.x as f64, n.key.y as f64], id: n.id })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let rows = neighbour_rows(&nodes, &spatial_idx, threshold);

        let mut node_adj_start = Vec::with_capacity(nodes.len() + 1);
        let mut adjacency = Vec::with_capacity(rows.iter().map(Vec::len).sum());
        node_adj_start.push(0u32);
        for row in rows {
            adjacency.extend(row);
            node_adj_start.push(adjacency.len() as u32);
        }

        Self { nodes, node_adj_start, adjacency, spatial_idx }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.nodes.get(id.index())
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Id of the node for grid cell `key` in this graph, if the cell is one.
    pub fn node_at(&self, key: GridKey) -> Option<NodeId> {
        self.nodes.binary_search_by_key(&key, |n| n.key).ok().map(|i| self.nodes[i].id)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Neighbours of `node` in ascending id order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.node_adj_start[node.index()] as usize;
        let end   = self.node_adj_start[node.index() + 1] as usize;
        &self.adjacency[start..end]
    }

    /// Every undirected edge once, as `(lower, higher)` id pairs.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().flat_map(move |n| {
            self.neighbors(n.id)
                .iter()
                .filter(move |&&m| m > n.id)
                .map(move |&m| (n.id, m))
        })
    }

    /// Ids of all uncertain nodes, ascending.
    pub fn uncertain_nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().filter(|n| n.uncertain()).map(|n| n.id).collect()
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest node to `point`.  `None` only if the graph is empty.
    pub fn nearest(&self, point: Point) -> Option<NodeId> {
        self.spatial_idx.nearest_neighbor(&[point.x, point.y]).map(|e| e.id)
    }
}

impl Default for NavGraph {
    fn default() -> Self {
        Self::empty()
    }
}

// ── Construction helpers ──────────────────────────────────────────────────────

fn neighbours_of(node: &NavNode, index: &RTree<NodeEntry>, threshold: f64) -> Vec<NodeId> {
    let r2 = threshold * threshold;
    let mut row: Vec<NodeId> = index
        .locate_within_distance([node.key.x as f64, node.key.y as f64], r2)
        .filter(|e| e.id != node.id && e.distance_2(&[node.key.x as f64, node.key.y as f64]) < r2)
        .map(|e| e.id)
        .collect();
    row.sort_unstable();
    row
}

#[cfg(not(feature = "parallel"))]
fn neighbour_rows(nodes: &[NavNode], index: &RTree<NodeEntry>, threshold: f64) -> Vec<Vec<NodeId>> {
    nodes.iter().map(|n| neighbours_of(n, index, threshold)).collect()
}

#[cfg(feature = "parallel")]
fn neighbour_rows(nodes: &[NavNode], index: &RTree<NodeEntry>, threshold: f64) -> Vec<Vec<NodeId>> {
    use rayon::prelude::*;

    nodes.par_iter().map(|n| neighbours_of(n, index, threshold)).collect()
}
