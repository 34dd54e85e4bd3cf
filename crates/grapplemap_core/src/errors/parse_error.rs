use thiserror::Error;

/// Malformed share link
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty path link")]
    Empty,
    #[error("empty step at position {0}")]
    EmptyToken(usize),
    #[error("invalid step {token:?} at position {index}")]
    InvalidStep { index: usize, token: String },
    #[error("invalid node reference {0:?}")]
    InvalidNode(String),
}
