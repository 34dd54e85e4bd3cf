use super::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RandomPathError {
    #[error("the graph has no nodes to start a walk from")]
    EmptyGraph,
    #[error("gave up after {0} attempts without reaching the requested length")]
    AttemptsExhausted(usize),
    #[error(transparent)]
    Path(#[from] PathError),
}
