use bevy::ecs::prelude::*;
use grapplemap_core::{
    command::Command,
    config::PlaybackConfig,
    errors::PathError,
    explore::Explorer,
    graph::{Graph, NodeId},
    path_link::PathLink,
    playback::PlaybackController,
    pose::Pose,
};
use std::sync::Arc;

/// The loaded position database, shared by every player.
#[derive(Resource, Clone)]
pub struct GraphDatabase(pub Arc<Graph>);

/// Presentation settings for players built from the [`GraphDatabase`].
#[derive(Resource, Clone, Default)]
pub struct PlaybackSettings(pub PlaybackConfig);

/// Drill playback controls
#[derive(Resource, Default)]
pub struct DrillPlayer {
    pub(crate) controller: Option<PlaybackController>,
    pub(crate) pending: Vec<Command>,
    pub(crate) requested: Option<PathLink>,
    /// Error produced by the last rejected command or drill request
    error: Option<PathError>,
}

impl DrillPlayer {
    /// Start playing a drill, replacing the current one
    pub fn play(&mut self, controller: PlaybackController) -> &mut Self {
        self.controller = Some(controller);
        self.requested = None;
        self.pending.clear();
        self.error = None;
        self
    }

    /// Play the drill behind `link` once a [`GraphDatabase`] is available. Commands sent after
    /// this apply to the new drill.
    pub fn load(&mut self, link: PathLink) -> &mut Self {
        self.requested = Some(link);
        self
    }

    pub fn stop(&mut self) -> &mut Self {
        self.controller = None;
        self.requested = None;
        self.pending.clear();
        self
    }

    /// Queue a command for the next update
    pub fn send(&mut self, command: Command) -> &mut Self {
        self.pending.push(command);
        self
    }

    pub fn controller(&self) -> Option<&PlaybackController> {
        self.controller.as_ref()
    }

    /// The pose to draw this frame
    pub fn pose(&self) -> Option<&Pose> {
        self.controller.as_ref()?.display_pose()
    }

    /// If a command was rejected since the last call, return its error
    pub fn take_error(&mut self) -> Option<PathError> {
        self.error.take()
    }

    pub(crate) fn set_error(&mut self, error: PathError) {
        self.error = Some(error);
    }
}

/// Free exploration controls. Hovered nodes are queued and consumed on the next update; the
/// first hover starts exploring the [`GraphDatabase`] if no explorer was started by hand.
#[derive(Resource, Default)]
pub struct ExplorePlayer {
    pub(crate) explorer: Option<Explorer>,
    pub(crate) pending: Vec<NodeId>,
    pub(crate) mirror_requested: bool,
}

impl ExplorePlayer {
    pub fn start(&mut self, explorer: Explorer) -> &mut Self {
        self.explorer = Some(explorer);
        self.pending.clear();
        self.mirror_requested = false;
        self
    }

    pub fn hover(&mut self, node: NodeId) -> &mut Self {
        self.pending.push(node);
        self
    }

    pub fn toggle_mirror(&mut self) -> &mut Self {
        self.mirror_requested = !self.mirror_requested;
        self
    }

    pub fn explorer(&self) -> Option<&Explorer> {
        self.explorer.as_ref()
    }

    pub fn pose(&self) -> Option<&Pose> {
        self.explorer.as_ref()?.display_pose()
    }
}
