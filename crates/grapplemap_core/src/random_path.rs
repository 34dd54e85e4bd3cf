use crate::{
    config::PlaybackConfig,
    errors::RandomPathError,
    graph::{Graph, NodeId, Step},
    playback::PlaybackController,
};
use bevy::log::{debug, trace};
use rand::Rng;
use std::sync::Arc;

/// Walks the graph from a random node through random outgoing steps until the path has at least
/// `min_frames` keyframes.
///
/// A walk never takes the same transition twice in a row. A walk that gets stuck starts over
/// from a new random node; after `max_attempts` walks the generator gives up. `None` keeps
/// trying forever.
pub fn random_path(
    graph: &Graph,
    min_frames: usize,
    max_attempts: Option<usize>,
    rng: &mut impl Rng,
) -> Result<Vec<Step>, RandomPathError> {
    if graph.num_nodes() == 0 {
        return Err(RandomPathError::EmptyGraph);
    }

    let mut attempts = 0;
    'walk: loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(RandomPathError::AttemptsExhausted(attempts));
        }
        attempts += 1;

        let mut node = NodeId(rng.random_range(0..graph.num_nodes()) as u32);
        let mut steps: Vec<Step> = Vec::new();
        let mut frames = 1;

        while frames < min_frames || steps.is_empty() {
            let Some(current) = graph.node(node) else {
                continue 'walk;
            };
            let previous = steps.last().map(|s| s.transition);
            let candidates: Vec<Step> = current
                .outgoing
                .iter()
                .filter(|s| Some(s.transition) != previous)
                .copied()
                .collect();

            if candidates.is_empty() {
                trace!("Random walk stuck at {} after {} steps", node, steps.len());
                continue 'walk;
            }

            let step = candidates[rng.random_range(0..candidates.len())];
            frames += graph.step_len(step) - 1;
            node = graph.step_to(step).node;
            steps.push(step);
        }

        debug!(
            "Random path of {} steps and {} frames after {} attempts",
            steps.len(),
            frames,
            attempts
        );
        return Ok(steps);
    }
}

/// A controller playing a fresh random drill, sized by the config.
pub fn random_drill(
    graph: Arc<Graph>,
    config: PlaybackConfig,
    rng: &mut impl Rng,
) -> Result<PlaybackController, RandomPathError> {
    let steps = random_path(
        &graph,
        config.random_path_min_frames,
        config.random_path_max_attempts,
        rng,
    )?;
    Ok(PlaybackController::from_steps(graph, steps, config)?)
}
