use crate::graph::{NodeId, TransitionId};
use thiserror::Error;

/// A step sequence that cannot be followed through the graph
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("a path needs at least one step")]
    Empty,
    #[error("step {index} uses unknown transition {transition:?}")]
    UnknownTransition {
        index: usize,
        transition: TransitionId,
    },
    #[error("step {index} starts at {found:?} but the previous step ends at {expected:?}")]
    Disconnected {
        index: usize,
        expected: NodeId,
        found: NodeId,
    },
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}
