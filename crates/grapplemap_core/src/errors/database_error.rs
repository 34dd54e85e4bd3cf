use crate::graph::{NodeId, Step, TransitionId};
use thiserror::Error;

/// Possible errors produced while loading and validating a position database
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("could not read database: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("could not parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported database file extension: {0:?}")]
    UnknownFormat(Option<String>),
    #[error("{context} has {players} players, expected 2")]
    PlayerCount { context: String, players: usize },
    #[error("{context} has {joints} joints for player {player}, expected {expected}")]
    JointCount {
        context: String,
        player: usize,
        joints: usize,
        expected: usize,
    },
    #[error("transition {0:?} has {1} frames, at least 2 are required")]
    TooFewFrames(TransitionId, usize),
    #[error("transition {transition:?} references unknown node {node:?}")]
    UnknownNode {
        transition: TransitionId,
        node: NodeId,
    },
    #[error("{context} references unknown transition {transition:?}")]
    UnknownTransition {
        context: String,
        transition: TransitionId,
    },
    #[error("{node} lists {step:?} (incoming: {incoming}) but the step does not touch it")]
    MisplacedStep {
        node: NodeId,
        step: Step,
        incoming: bool,
    },
    #[error("entry at index {index} declares id {declared}")]
    IdMismatch { index: usize, declared: u32 },
}
