//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The planner calls routing through the [`Router`] trait so a weighted or
//! heuristic search can be dropped in without touching the planner.  Edges
//! of the navigation graph are unweighted, so the default
//! [`BreadthFirstRouter`] already returns shortest paths by hop count.

use std::collections::VecDeque;

use slam_core::NodeId;

use crate::{NavGraph, PlannerError, PlannerResult};

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered node path, source first and destination last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
}

impl Route {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `true` if source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
pub trait Router: Send + Sync {
    /// Route from `from` to `to`.  `from == to` yields a single-node route.
    ///
    /// # Errors
    ///
    /// [`PlannerError::NodeNotFound`] for an id outside the graph and
    /// [`PlannerError::NoRoute`] when the two nodes are disconnected.  Never
    /// a partial path.
    fn route(&self, graph: &NavGraph, from: NodeId, to: NodeId) -> PlannerResult<Route>;
}

// ── BreadthFirstRouter ────────────────────────────────────────────────────────

/// Breadth-first search over the CSR adjacency.
///
/// Neighbours are expanded in ascending id order, so among equal-length paths
/// the result is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirstRouter;

impl Router for BreadthFirstRouter {
    fn route(&self, graph: &NavGraph, from: NodeId, to: NodeId) -> PlannerResult<Route> {
        for id in [from, to] {
            if !graph.contains(id) {
                return Err(PlannerError::NodeNotFound(id));
            }
        }
        if from == to {
            return Ok(Route { nodes: vec![from] });
        }

        // prev[v] = node that reached v; INVALID for unreached nodes.
        let mut prev = vec![NodeId::INVALID; graph.node_count()];
        let mut seen = vec![false; graph.node_count()];
        let mut queue = VecDeque::new();
        seen[from.index()] = true;
        queue.push_back(from);

        while let Some(node) = queue.pop_front() {
            if node == to {
                return Ok(reconstruct(&prev, from, to));
            }
            for &next in graph.neighbors(node) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    prev[next.index()] = node;
                    queue.push_back(next);
                }
            }
        }

        Err(PlannerError::NoRoute { from, to })
    }
}

fn reconstruct(prev: &[NodeId], from: NodeId, to: NodeId) -> Route {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    Route { nodes }
}
