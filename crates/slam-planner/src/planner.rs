//! The planner: owns the current navigation graph and answers the queries
//! goal-directed navigation needs.

use slam_core::{NodeId, Point, SimRng};
use slam_map::{GridKey, GridPoint};
use tracing::debug;

use crate::{BreadthFirstRouter, NavGraph, NavNode, PlannerError, PlannerResult, Route, Router};

/// Graph-construction parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Nodes closer than this (grid units) are connected.
    pub distance_threshold: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { distance_threshold: 1.5 }
    }
}

/// Navigation planner over the latest grid snapshot.
pub struct Planner<R: Router = BreadthFirstRouter> {
    config: PlannerConfig,
    router: R,
    graph:  NavGraph,
}

impl Planner<BreadthFirstRouter> {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_router(config, BreadthFirstRouter)
    }
}

impl Default for Planner<BreadthFirstRouter> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl<R: Router> Planner<R> {
    pub fn with_router(config: PlannerConfig, router: R) -> Self {
        Self { config, router, graph: NavGraph::empty() }
    }

    /// Replace the graph with one built from `points`.  Returns the new node
    /// count.
    pub fn build(&mut self, points: &[GridPoint]) -> usize {
        self.graph = NavGraph::from_grid(points, self.config.distance_threshold);
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "navigation graph rebuilt"
        );
        self.graph.node_count()
    }

    #[inline]
    pub fn graph(&self) -> &NavGraph {
        &self.graph
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&NavNode> {
        self.graph.node(id)
    }

    /// Node for grid cell `key` in the current graph.  Ids change on every
    /// build; keys do not.
    #[inline]
    pub fn node_at(&self, key: GridKey) -> Option<NodeId> {
        self.graph.node_at(key)
    }

    /// A uniformly random uncertain node, or `None` if there are none.
    pub fn get_uncertain_node(&self, rng: &mut SimRng) -> Option<NodeId> {
        let uncertain = self.graph.uncertain_nodes();
        rng.choose(&uncertain).copied()
    }

    /// Nearest node to `point`, or `None` if the graph is empty.
    pub fn get_closest_node(&self, point: Point) -> Option<NodeId> {
        self.graph.nearest(point)
    }

    /// Shortest route from the node nearest `from` to `target`.
    ///
    /// # Errors
    ///
    /// [`PlannerError::EmptyGraph`] before the first non-empty build, or any
    /// error of the router.
    pub fn plan_route(&self, from: Point, target: NodeId) -> PlannerResult<Route> {
        let start = self.get_closest_node(from).ok_or(PlannerError::EmptyGraph)?;
        self.router.route(&self.graph, start, target)
    }

    /// World positions of the nodes along a route.
    pub fn route_points(&self, route: &Route) -> Vec<Point> {
        route
            .nodes
            .iter()
            .filter_map(|&id| self.graph.node(id))
            .map(NavNode::point)
            .collect()
    }
}
