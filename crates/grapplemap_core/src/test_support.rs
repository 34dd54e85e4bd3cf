//! Deterministic fixtures shared by the unit tests.

use crate::{
    graph::{Endpoint, Graph, Node, NodeId, Transition, TransitionId},
    interpolation::InterpolateLinear,
    joint::{JOINT_COUNT, PerJoint},
    pose::Pose,
    reo::Reo,
};
use bevy::math::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// An asymmetric pose whose joints are all distinct. Different `t` give different poses.
pub fn sample_pose(t: f32) -> Pose {
    let player = |p: f32| {
        let mut joints = [Vec3::ZERO; JOINT_COUNT];
        for (j, v) in joints.iter_mut().enumerate() {
            let j = j as f32;
            *v = Vec3::new(
                (j * 0.37 + p * 1.3 + t).sin() * 0.5 + p * 0.8,
                0.05 * j + 0.1 * p + t * 0.1,
                (j * 0.71 + t * 2. + p).cos() * 0.4 - p * 0.3,
            );
        }
        PerJoint(joints)
    };
    Pose::new(player(0.), player(1.))
}

pub fn random_reo(rng: &mut impl Rng) -> Reo {
    Reo {
        mirror: rng.random_bool(0.5),
        swap_players: rng.random_bool(0.5),
        angle: rng.random_range(-PI..PI),
        offset: Vec3::new(
            rng.random_range(-2.0..2.0),
            rng.random_range(-0.5..0.5),
            rng.random_range(-2.0..2.0),
        ),
    }
}

/// Endpoint reorientation used by the fixtures, varied per transition and end.
pub fn fixture_reo(transition: usize, to_end: bool) -> Reo {
    let i = transition as f32;
    Reo {
        mirror: (transition + to_end as usize) % 3 == 1,
        swap_players: transition % 2 == 1 && to_end,
        angle: 0.4 + i * 0.7 + if to_end { 1.9 } else { 0. },
        offset: Vec3::new(0.3 * i - 0.5, 0., if to_end { 0.8 } else { -0.2 }),
    }
}

/// Builds a graph from `(from, to, frame_count)` edges over `node_count` nodes.
///
/// Transition frames are authored consistently with their endpoints: the first frame is the
/// origin's canonical pose under the `from` reorientation and the last frame is the destination's
/// canonical pose under the `to` reorientation.
pub fn graph_from_edges(node_count: usize, edges: &[(u32, u32, usize)]) -> Graph {
    let nodes: Vec<Node> = (0..node_count)
        .map(|i| Node {
            id: NodeId(i as u32),
            position: sample_pose(i as f32 * 0.9),
            incoming: vec![],
            outgoing: vec![],
            description: vec![format!("position {i}")],
            tags: vec![],
            line_nr: None,
        })
        .collect();

    let transitions = edges
        .iter()
        .enumerate()
        .map(|(i, &(from, to, len))| {
            let from = Endpoint {
                node: NodeId(from),
                reo: fixture_reo(i, false),
            };
            let to = Endpoint {
                node: NodeId(to),
                reo: fixture_reo(i, true),
            };
            let first = from.reo.apply(&nodes[from.node.index()].position);
            let last = to.reo.apply(&nodes[to.node.index()].position);
            let frames = (0..len)
                .map(|f| {
                    let t = f as f32 / (len.max(2) - 1) as f32;
                    // Lift intermediate frames off the straight line between the endpoints.
                    let bump = (t * PI).sin() * 0.25;
                    first
                        .interpolate_linear(&last, t)
                        .translated(Vec3::new(0., bump, 0.))
                })
                .collect();
            Transition {
                id: TransitionId(i as u32),
                from,
                to,
                frames,
                description: vec![format!("transition {i}")],
                tags: vec![],
                properties: vec![],
                line_nr: None,
            }
        })
        .collect();

    Graph::new(nodes, transitions).unwrap()
}

/// Nodes `0..=n` joined by forward transitions `i: i -> i + 1` with the given frame counts.
pub fn chain_graph(lens: &[usize]) -> Graph {
    let edges: Vec<_> = lens
        .iter()
        .enumerate()
        .map(|(i, &len)| (i as u32, i as u32 + 1, len))
        .collect();
    graph_from_edges(lens.len() + 1, &edges)
}

/// A small strongly connected graph with branching, used for walks and exploration.
pub fn loop_graph() -> Graph {
    graph_from_edges(
        4,
        &[
            (0, 1, 5),
            (1, 2, 4),
            (2, 0, 6),
            (1, 3, 3),
            (3, 0, 7),
            (2, 3, 4),
        ],
    )
}
