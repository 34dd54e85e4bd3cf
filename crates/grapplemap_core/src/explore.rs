//! Free exploration: instead of playing a fixed drill, the displayed position follows the user
//! from node to node, playing the connecting transition whenever one exists.

use crate::{
    config::PlaybackConfig,
    errors::PathError,
    graph::{Graph, NodeId, Step},
    interpolation::{InterpolateLinear, LaggedPose},
    pose::Pose,
    reo::Reo,
};
use bevy::log::{debug, trace};
use std::{collections::VecDeque, sync::Arc};

/// How a call to [`Explorer::try_move`] reached its destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Nothing was selected yet; the candidate is now shown as a static position.
    Selected,
    /// The candidate was already selected.
    Unchanged,
    /// Frames of a transition leaving the previous node were queued.
    Forward(Step),
    /// Frames of a transition arriving at the previous node were queued, back to front.
    Backward(Step),
    /// No transition connects the two nodes; the display jumped.
    Teleported,
}

pub struct Explorer {
    graph: Arc<Graph>,
    config: PlaybackConfig,
    selected: Option<NodeId>,
    /// Maps the selected node's canonical frame into the displayed world frame.
    reo: Reo,
    queued_frames: VecDeque<Pose>,
    last_keyframe: Option<Pose>,
    target: Option<Pose>,
    kf: f32,
    display: LaggedPose,
}

impl Explorer {
    pub fn new(graph: Arc<Graph>, config: PlaybackConfig) -> Self {
        Self {
            graph,
            config,
            selected: None,
            reo: Reo::IDENTITY,
            queued_frames: VecDeque::new(),
            last_keyframe: None,
            target: None,
            kf: 0.,
            display: LaggedPose::default(),
        }
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn reo(&self) -> &Reo {
        &self.reo
    }

    pub fn queued_frames(&self) -> &VecDeque<Pose> {
        &self.queued_frames
    }

    pub fn target_pose(&self) -> Option<&Pose> {
        self.target.as_ref()
    }

    pub fn display_pose(&self) -> Option<&Pose> {
        self.display.get()
    }

    /// Moves the selection to `candidate`, queueing the frames of a connecting transition if the
    /// graph has one.
    pub fn try_move(&mut self, candidate: NodeId) -> Result<MoveOutcome, PathError> {
        let position = self
            .graph
            .node(candidate)
            .ok_or(PathError::UnknownNode(candidate))?
            .position
            .clone();

        let Some(current) = self.selected else {
            self.selected = Some(candidate);
            self.jump_to(position);
            return Ok(MoveOutcome::Selected);
        };

        if current == candidate {
            return Ok(MoveOutcome::Unchanged);
        }

        let graph = self.graph.clone();
        let node = graph.node(current).ok_or(PathError::UnknownNode(current))?;

        let outgoing = node
            .outgoing
            .iter()
            .find(|s| !s.reverse && graph.step_to(**s).node == candidate);
        if let Some(&step) = outgoing {
            self.reo = graph.step_from(step).reo.inverse().compose(&self.reo);
            let frames = &graph.transitions()[step.transition.index()].frames;
            for frame in &frames[1..] {
                self.queued_frames.push_back(self.reo.apply(frame));
            }
            self.reo = graph.step_to(step).reo.compose(&self.reo);
            self.selected = Some(candidate);
            debug!("Exploring {} -> {} via {:?}", current, candidate, step);
            return Ok(MoveOutcome::Forward(step));
        }

        let incoming = node
            .incoming
            .iter()
            .find(|s| !s.reverse && graph.step_from(**s).node == candidate);
        if let Some(&step) = incoming {
            self.reo = graph.step_to(step).reo.inverse().compose(&self.reo);
            let frames = &graph.transitions()[step.transition.index()].frames;
            for frame in frames[..frames.len() - 1].iter().rev() {
                self.queued_frames.push_back(self.reo.apply(frame));
            }
            self.reo = graph.step_from(step).reo.compose(&self.reo);
            self.selected = Some(candidate);
            debug!(
                "Exploring {} -> {} backwards via {:?}",
                current, candidate, step
            );
            return Ok(MoveOutcome::Backward(step));
        }

        debug!(
            "No transition between {} and {}, jumping",
            current, candidate
        );
        self.selected = Some(candidate);
        self.reo = Reo::IDENTITY;
        self.jump_to(position);
        Ok(MoveOutcome::Teleported)
    }

    fn jump_to(&mut self, pose: Pose) {
        self.queued_frames.clear();
        self.kf = 0.;
        self.last_keyframe = Some(pose.clone());
        self.target = Some(pose.clone());
        self.display.jump_to(pose);
    }

    /// Consumes queued frames and moves the display towards the head of the queue. The consume
    /// rate grows with the backlog.
    pub fn tick(&mut self) -> Option<&Pose> {
        if !self.queued_frames.is_empty() {
            self.kf += self.config.explore_rate(self.queued_frames.len());

            if self.kf < 1. {
                let next = self.queued_frames.front();
                if let (Some(last), Some(next)) = (&self.last_keyframe, next) {
                    self.target = Some(last.interpolate_linear(next, self.kf));
                }
            } else {
                self.kf = 0.;
                self.last_keyframe = self.queued_frames.pop_front();
                self.target = self.last_keyframe.clone();
                trace!("{} explore frames left", self.queued_frames.len());
            }
        }

        let target = self.target.as_ref()?;
        Some(self.display.approach(target, self.config.explore_drag))
    }

    /// Mirrors the explored world. Queued frames are mirrored along with it.
    pub fn toggle_mirror(&mut self) {
        self.reo.mirror = !self.reo.mirror;
        for pose in self
            .queued_frames
            .iter_mut()
            .chain(self.last_keyframe.iter_mut())
            .chain(self.target.iter_mut())
        {
            pose.mirror();
        }
    }
}
