//! Compact, shareable encoding of a drill.
//!
//! A path is written as comma separated transition ids, reversed steps carrying a `-` prefix:
//! `217,-45,12`. A link that only names a starting position is written `p` followed by the node
//! id, e.g. `p12`.

use crate::{
    errors::ParseError,
    graph::{NodeId, Step, TransitionId},
};
use regex::Regex;
use std::{fmt, str::FromStr, sync::LazyLock};

static STEP_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(-)?(\d+)$").unwrap());
static NODE_LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^p(\d+)$").unwrap());

pub fn encode_steps(steps: &[Step]) -> String {
    steps
        .iter()
        .map(|s| {
            if s.reverse {
                format!("-{}", s.transition.0)
            } else {
                s.transition.0.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a comma separated step list. A blank link is the empty path.
pub fn decode_steps(link: &str) -> Result<Vec<Step>, ParseError> {
    let link = link.trim();
    if link.is_empty() {
        return Ok(Vec::new());
    }

    link.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            if token.is_empty() {
                return Err(ParseError::EmptyToken(index));
            }
            let invalid = || ParseError::InvalidStep {
                index,
                token: token.to_string(),
            };
            let captures = STEP_TOKEN.captures(token).ok_or_else(invalid)?;
            let transition = captures[2].parse::<u32>().map_err(|_| invalid())?;
            Ok(Step {
                transition: TransitionId(transition),
                reverse: captures.get(1).is_some(),
            })
        })
        .collect()
}

/// What a share link points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathLink {
    Steps(Vec<Step>),
    /// A static position with no steps.
    Node(NodeId),
}

impl FromStr for PathLink {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError::Empty);
        }
        if s.starts_with('p') {
            let id = NODE_LINK
                .captures(s)
                .and_then(|c| c[1].parse::<u32>().ok())
                .ok_or_else(|| ParseError::InvalidNode(s.to_string()))?;
            return Ok(PathLink::Node(NodeId(id)));
        }
        decode_steps(s).map(PathLink::Steps)
    }
}

impl fmt::Display for PathLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLink::Steps(steps) => f.write_str(&encode_steps(steps)),
            PathLink::Node(node) => write!(f, "p{}", node.0),
        }
    }
}
