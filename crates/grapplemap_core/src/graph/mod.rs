//! Read-only view of the position database: nodes (canonical poses) connected by transitions
//! (authored frame sequences).

pub mod serial;

use crate::{errors::DatabaseError, errors::PathError, pose::Pose, reo::Reo};
use bevy::log::info;
use std::{fmt, path::Path, slice};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TransitionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node{}", self.0)
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A directed traversal of one transition. A reversed step plays the transition backwards, from
/// its `to` endpoint to its `from` endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    pub transition: TransitionId,
    pub reverse: bool,
}

impl Step {
    pub fn forward(transition: TransitionId) -> Self {
        Self {
            transition,
            reverse: false,
        }
    }

    pub fn backward(transition: TransitionId) -> Self {
        Self {
            transition,
            reverse: true,
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            reverse: !self.reverse,
            ..self
        }
    }
}

/// One end of a transition: the node it touches and the reorientation relating the node's
/// canonical frame to the transition's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoint {
    pub node: NodeId,
    pub reo: Reo,
}

#[derive(Clone, Debug)]
pub struct Transition {
    pub id: TransitionId,
    pub from: Endpoint,
    pub to: Endpoint,
    /// Invariant: at least two frames.
    pub frames: Vec<Pose>,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    pub properties: Vec<String>,
    pub line_nr: Option<u32>,
}

impl Transition {
    pub fn is_bidirectional(&self) -> bool {
        self.properties.iter().any(|p| p == "bidirectional")
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub position: Pose,
    /// Steps that end at this node.
    pub incoming: Vec<Step>,
    /// Steps that start at this node.
    pub outgoing: Vec<Step>,
    pub description: Vec<String>,
    pub tags: Vec<String>,
    pub line_nr: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    transitions: Vec<Transition>,
}

impl Graph {
    /// Validates the database and fills in adjacency lists for nodes that have none.
    ///
    /// Node and transition ids must equal their index.
    pub fn new(mut nodes: Vec<Node>, transitions: Vec<Transition>) -> Result<Self, DatabaseError> {
        for (index, node) in nodes.iter().enumerate() {
            if node.id.index() != index {
                return Err(DatabaseError::IdMismatch {
                    index,
                    declared: node.id.0,
                });
            }
        }

        for (index, transition) in transitions.iter().enumerate() {
            if transition.id.index() != index {
                return Err(DatabaseError::IdMismatch {
                    index,
                    declared: transition.id.0,
                });
            }
            if transition.frames.len() < 2 {
                return Err(DatabaseError::TooFewFrames(
                    transition.id,
                    transition.frames.len(),
                ));
            }
            for endpoint in [&transition.from, &transition.to] {
                if endpoint.node.index() >= nodes.len() {
                    return Err(DatabaseError::UnknownNode {
                        transition: transition.id,
                        node: endpoint.node,
                    });
                }
            }
        }

        for node in &nodes {
            let listed = node
                .incoming
                .iter()
                .map(|s| (s, true))
                .chain(node.outgoing.iter().map(|s| (s, false)));
            for (step, incoming) in listed {
                let Some(transition) = transitions.get(step.transition.index()) else {
                    return Err(DatabaseError::UnknownTransition {
                        context: format!("adjacency of {}", node.id),
                        transition: step.transition,
                    });
                };
                // Incoming steps end at the node, outgoing steps start there.
                let touches = if incoming != step.reverse {
                    transition.to.node
                } else {
                    transition.from.node
                };
                if touches != node.id {
                    return Err(DatabaseError::MisplacedStep {
                        node: node.id,
                        step: *step,
                        incoming,
                    });
                }
            }
        }

        let derive: Vec<bool> = nodes
            .iter()
            .map(|n| n.incoming.is_empty() && n.outgoing.is_empty())
            .collect();

        for transition in &transitions {
            let mut steps = vec![Step::forward(transition.id)];
            if transition.is_bidirectional() {
                steps.push(Step::backward(transition.id));
            }
            for step in steps {
                let (from, to) = if step.reverse {
                    (transition.to.node, transition.from.node)
                } else {
                    (transition.from.node, transition.to.node)
                };
                if derive[from.index()] {
                    nodes[from.index()].outgoing.push(step);
                }
                if derive[to.index()] {
                    nodes[to.index()].incoming.push(step);
                }
            }
        }

        Ok(Self { nodes, transitions })
    }

    pub fn from_ron_str(s: &str) -> Result<Self, DatabaseError> {
        let serial: serial::GraphSerial = ron::de::from_str(s)?;
        serial.try_into()
    }

    pub fn from_json_str(s: &str) -> Result<Self, DatabaseError> {
        let serial: serial::GraphSerial = serde_json::from_str(s)?;
        serial.try_into()
    }

    /// Loads a `.ron` or `.json` database file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        let graph = match extension.as_deref() {
            Some("ron") => Self::from_ron_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            _ => return Err(DatabaseError::UnknownFormat(extension)),
        };
        info!(
            "Loaded {} nodes and {} transitions from {}",
            graph.num_nodes(),
            graph.num_transitions(),
            path.display()
        );
        Ok(graph)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition> {
        self.transitions.get(id.index())
    }

    /// # Panics
    ///
    /// When the step references a transition that is not in this graph. Use [`Graph::check_path`]
    /// on untrusted steps first.
    pub fn step_from(&self, step: Step) -> &Endpoint {
        let t = &self.transitions[step.transition.index()];
        if step.reverse { &t.to } else { &t.from }
    }

    /// # Panics
    ///
    /// See [`Graph::step_from`].
    pub fn step_to(&self, step: Step) -> &Endpoint {
        let t = &self.transitions[step.transition.index()];
        if step.reverse { &t.from } else { &t.to }
    }

    /// Number of frames in the step's transition.
    pub fn step_len(&self, step: Step) -> usize {
        self.transitions[step.transition.index()].frames.len()
    }

    /// The step's frames in traversal order.
    pub fn step_frames(&self, step: Step) -> StepFrames<'_> {
        StepFrames {
            inner: self.transitions[step.transition.index()].frames.iter(),
            reverse: step.reverse,
        }
    }

    /// Checks that every step exists and that consecutive steps meet at the same node.
    pub fn check_path(&self, steps: &[Step]) -> Result<(), PathError> {
        for (index, step) in steps.iter().enumerate() {
            if self.transition(step.transition).is_none() {
                return Err(PathError::UnknownTransition {
                    index,
                    transition: step.transition,
                });
            }
            if index > 0 {
                let expected = self.step_to(steps[index - 1]).node;
                let found = self.step_from(*step).node;
                if expected != found {
                    return Err(PathError::Disconnected {
                        index,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// Total keyframe count when following `steps`: shared seam frames are counted once.
    pub fn path_frame_count(&self, steps: &[Step]) -> usize {
        if steps.is_empty() {
            return 1;
        }
        1 + steps.iter().map(|s| self.step_len(*s) - 1).sum::<usize>()
    }
}

/// Iterator over a step's frames, back to front for reversed steps.
#[derive(Clone)]
pub struct StepFrames<'a> {
    inner: slice::Iter<'a, Pose>,
    reverse: bool,
}

impl<'a> Iterator for StepFrames<'a> {
    type Item = &'a Pose;

    fn next(&mut self) -> Option<&'a Pose> {
        if self.reverse {
            self.inner.next_back()
        } else {
            self.inner.next()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StepFrames<'_> {}
