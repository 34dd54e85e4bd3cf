//! Stitches independently authored transitions into one continuous, centered pose sequence.

use crate::{
    graph::{Graph, NodeId, Step},
    math::y0,
    pose::Pose,
    reo::Reo,
};
use bevy::math::Vec3;

/// Output of [`follow`]: globally aligned keyframes and the translation that centered them.
#[derive(Clone, Debug)]
pub struct FollowedPath {
    pub keyframes: Vec<Pose>,
    pub centering: Reo,
}

/// Follows `steps` through `graph`, producing one keyframe per distinct frame.
///
/// The final frame of each step coincides with the first frame of the next and is emitted once.
/// Steps must be connected and non-empty; use [`follow_node`] for a path that has not left its
/// starting position.
///
/// # Panics
///
/// When a step references a transition that is not in `graph`. Run [`Graph::check_path`] on
/// untrusted steps first.
pub fn follow(graph: &Graph, steps: &[Step], mirror_whole_path: bool) -> FollowedPath {
    let mut keyframes: Vec<Pose> = Vec::with_capacity(graph.path_frame_count(steps));
    let mut core_sum = Vec3::ZERO;
    let mut reo = Reo::IDENTITY;

    for (i, step) in steps.iter().enumerate() {
        if i == 0 {
            reo = graph.step_from(*step).reo;
            if mirror_whole_path {
                reo.mirror = !reo.mirror;
            }
        } else {
            reo = graph
                .step_from(*step)
                .reo
                .inverse()
                .compose(&graph.step_to(steps[i - 1]).reo)
                .compose(&reo);

            if let Some(seam) = keyframes.pop() {
                core_sum -= seam.core_sum();
            }
        }

        for frame in graph.step_frames(*step) {
            let pose = reo.apply(frame);
            core_sum += pose.core_sum();
            keyframes.push(pose);
        }
    }

    center(keyframes, core_sum)
}

/// The static single-pose "path" of a node that has no steps yet.
pub fn follow_node(graph: &Graph, node: NodeId, mirror: bool) -> Option<FollowedPath> {
    let mut pose = graph.node(node)?.position.clone();
    if mirror {
        pose.mirror();
    }
    let core_sum = pose.core_sum();
    Some(center(vec![pose], core_sum))
}

fn center(keyframes: Vec<Pose>, core_sum: Vec3) -> FollowedPath {
    let n = keyframes.len().max(1) as f32;
    let centering = Reo::translation(y0(-core_sum / (2. * n)));
    FollowedPath {
        keyframes: keyframes
            .iter()
            .map(|pose| pose.translated(centering.offset))
            .collect(),
        centering,
    }
}

/// Global keyframe index of the first frame of step `seqindex`.
pub fn seq_index_to_frame_index(graph: &Graph, steps: &[Step], seqindex: usize) -> i64 {
    steps
        .iter()
        .take(seqindex)
        .map(|s| graph.step_len(*s) as i64 - 1)
        .sum()
}

/// Splits a global keyframe index into `(seqindex, frame_in_seq)`.
///
/// Negative indices clamp to the start. A shared seam frame is reported as the last frame of the
/// earlier step, never as frame 0 of the later one. Indices past the end clamp to the last frame
/// of the last step. An empty path always yields `(0, 0)`.
pub fn frame_index_to_seq(graph: &Graph, steps: &[Step], frame: i64) -> (usize, i64) {
    let mut f = frame.max(0);
    for (s, step) in steps.iter().enumerate() {
        let len = graph.step_len(*step) as i64;
        if f < len {
            return (s, f);
        }
        f -= len - 1;
    }
    match steps.last() {
        Some(last) => (steps.len() - 1, graph.step_len(*last) as i64 - 1),
        None => (0, 0),
    }
}
