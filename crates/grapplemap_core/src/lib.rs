//! # GrappleMap core
//!
//! Path following and playback for the GrappleMap position graph. The graph's nodes are
//! two-person grappling positions and its transitions are short animated clips between them.
//!
//! ## Introduction
//!
//! Every transition is authored in its own coordinate frame. Each endpoint carries a [`Reo`]
//! (reorientation) relating the node's canonical pose to the transition's local frame. Playing
//! several transitions back to back as one continuous motion therefore means composing these
//! reorientations across every seam, which is what [`follow`] does.
//!
//! On top of that:
//! - [`PlaybackController`] plays a drill (a connected list of [`Step`]s) in real time. It loops
//!   at the end of the path and supports pause, scrubbing, mirroring and editing either end of
//!   the drill. A display-lag filter smooths the rendered pose.
//! - [`Explorer`] follows the user around the graph one hovered node at a time, queueing the
//!   frames of the connecting transition.
//! - [`random_path`] generates random drills.
//! - [`PathLink`] is the shareable text form of a drill, e.g. `217,-45,12`.
//!
//! Position databases are loaded from RON or JSON with [`Graph::load`]. Presentation constants
//! live in [`PlaybackConfig`], which can be loaded from a `.ron` file.
//!
//! [`Reo`]: crate::reo::Reo
//! [`follow`]: crate::follow::follow
//! [`PlaybackController`]: crate::playback::PlaybackController
//! [`Step`]: crate::graph::Step
//! [`Explorer`]: crate::explore::Explorer
//! [`random_path`]: crate::random_path::random_path
//! [`PathLink`]: crate::path_link::PathLink
//! [`Graph::load`]: crate::graph::Graph::load
//! [`PlaybackConfig`]: crate::config::PlaybackConfig

pub mod command;
pub mod config;
pub mod errors;
pub mod explore;
pub mod follow;
pub mod graph;
pub mod interpolation;
pub mod joint;
pub mod math;
pub mod path_link;
pub mod playback;
pub mod pose;
pub mod random_path;
pub mod reo;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use super::command::Command;
    pub use super::config::PlaybackConfig;
    pub use super::errors::*;
    pub use super::explore::{Explorer, MoveOutcome};
    pub use super::follow::{FollowedPath, follow, follow_node};
    pub use super::graph::{Endpoint, Graph, Node, NodeId, Step, Transition, TransitionId};
    pub use super::interpolation::InterpolateLinear;
    pub use super::joint::{Joint, PlayerJoint, PlayerNum};
    pub use super::path_link::{PathLink, decode_steps, encode_steps};
    pub use super::playback::{Cursor, PlaybackController};
    pub use super::pose::Pose;
    pub use super::random_path::{random_drill, random_path};
    pub use super::reo::Reo;
}
