//! On-disk shape of the position database, shared by the RON and JSON loaders.
//!
//! Field names follow the exported JSON database so that an export can be loaded unmodified.

use super::{Endpoint, Graph, Node, NodeId, Step, Transition, TransitionId};
use crate::{
    errors::DatabaseError,
    joint::{JOINT_COUNT, PerJoint},
    pose::Pose,
    reo::Reo,
};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct V3Serial {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReoSerial {
    #[serde(default)]
    pub mirror: bool,
    #[serde(default)]
    pub swap_players: bool,
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub offset: V3Serial,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSerial {
    pub transition: u32,
    #[serde(default)]
    pub reverse: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndpointSerial {
    pub node: u32,
    #[serde(default)]
    pub reo: ReoSerial,
}

/// Players, then joints in [`crate::joint::Joint`] order.
pub type PoseSerial = Vec<Vec<V3Serial>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeSerial {
    pub id: u32,
    pub position: PoseSerial,
    #[serde(default)]
    pub incoming: Vec<StepSerial>,
    #[serde(default)]
    pub outgoing: Vec<StepSerial>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub line_nr: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSerial {
    pub id: u32,
    pub from: EndpointSerial,
    pub to: EndpointSerial,
    pub frames: Vec<PoseSerial>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub line_nr: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSerial {
    pub nodes: Vec<NodeSerial>,
    pub transitions: Vec<TransitionSerial>,
}

impl From<V3Serial> for Vec3 {
    fn from(v: V3Serial) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for V3Serial {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<ReoSerial> for Reo {
    fn from(r: ReoSerial) -> Self {
        Reo {
            mirror: r.mirror,
            swap_players: r.swap_players,
            angle: r.angle,
            offset: r.offset.into(),
        }
    }
}

impl From<&Reo> for ReoSerial {
    fn from(r: &Reo) -> Self {
        Self {
            mirror: r.mirror,
            swap_players: r.swap_players,
            angle: r.angle,
            offset: r.offset.into(),
        }
    }
}

impl From<StepSerial> for Step {
    fn from(s: StepSerial) -> Self {
        Step {
            transition: TransitionId(s.transition),
            reverse: s.reverse,
        }
    }
}

impl From<&Step> for StepSerial {
    fn from(s: &Step) -> Self {
        Self {
            transition: s.transition.0,
            reverse: s.reverse,
        }
    }
}

impl From<&Pose> for PoseSerial {
    fn from(pose: &Pose) -> Self {
        pose.players
            .iter()
            .map(|player| player.0.iter().map(|v| (*v).into()).collect())
            .collect()
    }
}

fn pose_from_serial(
    serial: &PoseSerial,
    context: impl Fn() -> String,
) -> Result<Pose, DatabaseError> {
    if serial.len() != 2 {
        return Err(DatabaseError::PlayerCount {
            context: context(),
            players: serial.len(),
        });
    }

    let mut players = [PerJoint::splat(Vec3::ZERO); 2];
    for (player, (joints, out)) in serial.iter().zip(players.iter_mut()).enumerate() {
        if joints.len() != JOINT_COUNT {
            return Err(DatabaseError::JointCount {
                context: context(),
                player,
                joints: joints.len(),
                expected: JOINT_COUNT,
            });
        }
        for (slot, v) in out.0.iter_mut().zip(joints) {
            *slot = (*v).into();
        }
    }

    let [first, second] = players;
    Ok(Pose::new(first, second))
}

impl TryFrom<GraphSerial> for Graph {
    type Error = DatabaseError;

    fn try_from(serial: GraphSerial) -> Result<Self, Self::Error> {
        let nodes = serial
            .nodes
            .into_iter()
            .map(|n| {
                let position = pose_from_serial(&n.position, || format!("node {}", n.id))?;
                Ok(Node {
                    id: NodeId(n.id),
                    position,
                    incoming: n.incoming.into_iter().map(Step::from).collect(),
                    outgoing: n.outgoing.into_iter().map(Step::from).collect(),
                    description: n.description,
                    tags: n.tags,
                    line_nr: n.line_nr,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        let transitions = serial
            .transitions
            .into_iter()
            .map(|t| {
                let frames = t
                    .frames
                    .iter()
                    .enumerate()
                    .map(|(i, f)| {
                        pose_from_serial(f, || format!("frame {i} of transition {}", t.id))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Transition {
                    id: TransitionId(t.id),
                    from: Endpoint {
                        node: NodeId(t.from.node),
                        reo: t.from.reo.into(),
                    },
                    to: Endpoint {
                        node: NodeId(t.to.node),
                        reo: t.to.reo.into(),
                    },
                    frames,
                    description: t.description,
                    tags: t.tags,
                    properties: t.properties,
                    line_nr: t.line_nr,
                })
            })
            .collect::<Result<Vec<_>, DatabaseError>>()?;

        Graph::new(nodes, transitions)
    }
}

impl From<&Graph> for GraphSerial {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph
                .nodes()
                .iter()
                .map(|n| NodeSerial {
                    id: n.id.0,
                    position: (&n.position).into(),
                    incoming: n.incoming.iter().map(StepSerial::from).collect(),
                    outgoing: n.outgoing.iter().map(StepSerial::from).collect(),
                    description: n.description.clone(),
                    tags: n.tags.clone(),
                    line_nr: n.line_nr,
                })
                .collect(),
            transitions: graph
                .transitions()
                .iter()
                .map(|t| TransitionSerial {
                    id: t.id.0,
                    from: EndpointSerial {
                        node: t.from.node.0,
                        reo: (&t.from.reo).into(),
                    },
                    to: EndpointSerial {
                        node: t.to.node.0,
                        reo: (&t.to.reo).into(),
                    },
                    frames: t.frames.iter().map(PoseSerial::from).collect(),
                    description: t.description.clone(),
                    tags: t.tags.clone(),
                    properties: t.properties.clone(),
                    line_nr: t.line_nr,
                })
                .collect(),
        }
    }
}
