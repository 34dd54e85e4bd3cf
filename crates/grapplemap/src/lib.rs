//! # GrappleMap for Bevy
//!
//! [`GrapplePlugin`] runs GrappleMap drills and free exploration inside a Bevy app. Insert a
//! [`GraphDatabase`], then either ask the [`DrillPlayer`] resource to load a share link or hover
//! nodes through [`ExplorePlayer`], and read the pose to draw from the resource every frame.
//! Players are built from the database with the [`PlaybackSettings`] the plugin was created
//! with; a hand-made [`PlaybackController`] or [`Explorer`] can be installed directly instead.
//! UI input is forwarded as [`Command`]s, which are applied at the start of the next update.
//!
//! [`GrapplePlugin`]: crate::plugin::GrapplePlugin
//! [`GraphDatabase`]: crate::player::GraphDatabase
//! [`DrillPlayer`]: crate::player::DrillPlayer
//! [`ExplorePlayer`]: crate::player::ExplorePlayer
//! [`PlaybackSettings`]: crate::player::PlaybackSettings
//! [`PlaybackController`]: grapplemap_core::playback::PlaybackController
//! [`Explorer`]: grapplemap_core::explore::Explorer
//! [`Command`]: grapplemap_core::command::Command

pub mod errors;
pub mod player;
pub mod plugin;
mod systems;

pub use grapplemap_core as core;

pub mod prelude {
    pub use super::errors::DrillError;
    pub use super::player::{DrillPlayer, ExplorePlayer, GraphDatabase, PlaybackSettings};
    pub use super::plugin::GrapplePlugin;
    pub use grapplemap_core::prelude::*;
}
