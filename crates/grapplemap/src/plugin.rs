use crate::{
    player::{DrillPlayer, ExplorePlayer, PlaybackSettings},
    systems::{
        advance_drill, advance_explorer, apply_drill_commands, apply_explore_commands,
        load_requested_drill,
    },
};
use bevy::prelude::*;
use grapplemap_core::config::PlaybackConfig;

/// Adds drill playback and exploration to an app. The [`GraphDatabase`] resource is inserted by
/// the user once the database is loaded; drill requests and hovers wait for it.
///
/// [`GraphDatabase`]: crate::player::GraphDatabase
#[derive(Default)]
pub struct GrapplePlugin {
    pub config: PlaybackConfig,
}

impl Plugin for GrapplePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Time>() {
            app.init_resource::<Time>();
        }

        app //
            .insert_resource(PlaybackSettings(self.config.clone()))
            .init_resource::<DrillPlayer>()
            .init_resource::<ExplorePlayer>()
            .add_systems(
                Update,
                (
                    load_requested_drill,
                    apply_drill_commands,
                    advance_drill,
                    apply_explore_commands,
                    advance_explorer,
                )
                    .chain(),
            );
    }
}
