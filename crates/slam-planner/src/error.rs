//! Planner error type.

use thiserror::Error;

use slam_core::NodeId;

/// Routing failures.  Callers treat every variant as "target unreachable".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("navigation graph is empty")]
    EmptyGraph,

    #[error("node {0} not found in navigation graph")]
    NodeNotFound(NodeId),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
