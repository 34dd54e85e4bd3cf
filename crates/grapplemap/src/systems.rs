use crate::player::{DrillPlayer, ExplorePlayer, GraphDatabase, PlaybackSettings};
use bevy::{ecs::prelude::*, log::prelude::*, time::prelude::*};
use grapplemap_core::{explore::Explorer, playback::PlaybackController};

pub fn load_requested_drill(
    database: Option<Res<GraphDatabase>>,
    settings: Res<PlaybackSettings>,
    mut player: ResMut<DrillPlayer>,
) {
    let Some(database) = database else {
        return;
    };
    let Some(link) = player.requested.take() else {
        return;
    };

    let graph = database.0.clone();
    match PlaybackController::from_link(graph, &link, settings.0.clone()) {
        Ok(controller) => {
            info!("Playing drill {}", link);
            player.controller = Some(controller);
        }
        Err(error) => {
            warn!("Cannot play drill {}: {}", link, error);
            player.set_error(error);
        }
    }
}

pub fn apply_drill_commands(mut player: ResMut<DrillPlayer>) {
    let player = &mut *player;
    let commands = std::mem::take(&mut player.pending);
    let Some(controller) = player.controller.as_mut() else {
        return;
    };

    let mut rejected = None;
    for command in commands {
        if let Err(error) = controller.apply(command) {
            warn!("Rejected drill command {:?}: {}", command, error);
            rejected = Some(error);
        }
    }
    if let Some(error) = rejected {
        player.set_error(error);
    }
}

pub fn advance_drill(time: Res<Time>, mut player: ResMut<DrillPlayer>) {
    if let Some(controller) = player.controller.as_mut() {
        controller.tick(time.delta_secs());
    }
}

pub fn apply_explore_commands(
    database: Option<Res<GraphDatabase>>,
    settings: Res<PlaybackSettings>,
    mut player: ResMut<ExplorePlayer>,
) {
    let player = &mut *player;
    if player.explorer.is_none()
        && !player.pending.is_empty()
        && let Some(database) = &database
    {
        debug!("Exploring the loaded database");
        player.explorer = Some(Explorer::new(database.0.clone(), settings.0.clone()));
    }

    let hovered = std::mem::take(&mut player.pending);
    let mirror = std::mem::take(&mut player.mirror_requested);
    let Some(explorer) = player.explorer.as_mut() else {
        return;
    };

    if mirror {
        explorer.toggle_mirror();
    }
    for node in hovered {
        match explorer.try_move(node) {
            Ok(outcome) => debug!("Hovered {}: {:?}", node, outcome),
            Err(error) => warn!("Ignoring hover: {}", error),
        }
    }
}

pub fn advance_explorer(mut player: ResMut<ExplorePlayer>) {
    if let Some(explorer) = player.explorer.as_mut() {
        explorer.tick();
    }
}
