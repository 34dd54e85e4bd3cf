//! Drill playback: advances a cursor through a followed path in real time, with pause, scrubbing,
//! end-of-path looping and path editing.

use crate::{
    command::Command,
    config::PlaybackConfig,
    errors::PathError,
    follow::{FollowedPath, follow, follow_node, frame_index_to_seq, seq_index_to_frame_index},
    graph::{Graph, NodeId, Step},
    interpolation::{InterpolateLinear, LaggedPose},
    path_link::PathLink,
    pose::{Pose, keyframe},
    reo::Reo,
};
use bevy::log::{debug, warn};
use std::sync::Arc;

/// Position within the keyframes of the current path.
///
/// `frame` is always `seq_index_to_frame_index(seqindex) + frame_in_seq`. `frame_in_seq` runs
/// past the last frame of the last step while dwelling at the end, and is negative during the
/// pre-roll after looping back to the start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cursor {
    pub frame: i64,
    pub seqindex: usize,
    pub frame_in_seq: i64,
    /// Blend fraction towards the next keyframe, in `[0, 1)`.
    pub k: f32,
}

/// Owns a drill (a start position plus a connected list of steps), its followed keyframes, and
/// the playback state for it.
pub struct PlaybackController {
    graph: Arc<Graph>,
    config: PlaybackConfig,
    start_node: NodeId,
    steps: Vec<Step>,
    mirror: bool,
    keyframes: Vec<Pose>,
    centering: Reo,
    cursor: Cursor,
    paused: bool,
    scrubbing: bool,
    display: LaggedPose,
}

impl PlaybackController {
    /// A drill that has not left `start_node` yet.
    pub fn new(
        graph: Arc<Graph>,
        start_node: NodeId,
        config: PlaybackConfig,
    ) -> Result<Self, PathError> {
        if graph.node(start_node).is_none() {
            return Err(PathError::UnknownNode(start_node));
        }
        let mut controller = Self {
            graph,
            config,
            start_node,
            steps: Vec::new(),
            mirror: false,
            keyframes: Vec::new(),
            centering: Reo::IDENTITY,
            cursor: Cursor::default(),
            paused: false,
            scrubbing: false,
            display: LaggedPose::default(),
        };
        controller.rebuild();
        Ok(controller)
    }

    pub fn from_steps(
        graph: Arc<Graph>,
        steps: Vec<Step>,
        config: PlaybackConfig,
    ) -> Result<Self, PathError> {
        let first = *steps.first().ok_or(PathError::Empty)?;
        graph.check_path(&steps)?;
        let start_node = graph.step_from(first).node;
        let mut controller = Self::new(graph, start_node, config)?;
        controller.steps = steps;
        controller.rebuild();
        Ok(controller)
    }

    pub fn from_link(
        graph: Arc<Graph>,
        link: &PathLink,
        config: PlaybackConfig,
    ) -> Result<Self, PathError> {
        match link {
            PathLink::Steps(steps) => Self::from_steps(graph, steps.clone(), config),
            PathLink::Node(node) => Self::new(graph, *node, config),
        }
    }

    pub fn graph(&self) -> &Arc<Graph> {
        &self.graph
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    /// Node the drill currently ends at.
    pub fn end_node(&self) -> NodeId {
        match self.steps.last() {
            Some(last) => self.graph.step_to(*last).node,
            None => self.start_node,
        }
    }

    pub fn keyframes(&self) -> &[Pose] {
        &self.keyframes
    }

    /// Translation applied to the followed path to center it.
    pub fn centering(&self) -> &Reo {
        &self.centering
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }

    /// The pose shown on screen, lagging behind [`PlaybackController::ideal_pose`]. `None` until
    /// the first tick.
    pub fn display_pose(&self) -> Option<&Pose> {
        self.display.get()
    }

    pub fn link(&self) -> PathLink {
        if self.steps.is_empty() {
            PathLink::Node(self.start_node)
        } else {
            PathLink::Steps(self.steps.clone())
        }
    }

    /// Steps that could be prepended to the drill.
    pub fn pre_choices(&self) -> &[Step] {
        self.graph
            .node(self.start_node)
            .map(|n| n.incoming.as_slice())
            .unwrap_or_default()
    }

    /// Steps that could be appended to the drill.
    pub fn post_choices(&self) -> &[Step] {
        self.graph
            .node(self.end_node())
            .map(|n| n.outgoing.as_slice())
            .unwrap_or_default()
    }

    pub fn pause(&mut self) -> &mut Self {
        self.paused = true;
        self
    }

    pub fn resume(&mut self) -> &mut Self {
        self.paused = false;
        self
    }

    pub fn toggle_pause(&mut self) -> &mut Self {
        self.paused = !self.paused;
        self
    }

    pub fn begin_scrub(&mut self) -> &mut Self {
        self.scrubbing = true;
        self
    }

    pub fn end_scrub(&mut self) -> &mut Self {
        self.scrubbing = false;
        self
    }

    /// Mirrors the whole drill. The display pose catches up through the drag filter.
    pub fn toggle_mirror(&mut self) -> &mut Self {
        self.mirror = !self.mirror;
        self.rebuild();
        self
    }

    /// Moves the cursor to global keyframe `frame`, clamped to the path.
    pub fn seek(&mut self, frame: i64) {
        let (seqindex, frame_in_seq) = frame_index_to_seq(&self.graph, &self.steps, frame);
        self.cursor.seqindex = seqindex;
        self.cursor.frame_in_seq = frame_in_seq;
        self.cursor.k = 0.;
        self.sync_frame();
    }

    /// Advances playback by `dt` seconds and returns the pose to draw.
    pub fn tick(&mut self, dt: f32) -> &Pose {
        if !self.scrubbing
            && !self.paused
            && !self.steps.is_empty()
            && self.config.frame_duration > 0.
        {
            self.cursor.k += self.config.clamp_delta(dt) / self.config.frame_duration;
            while self.cursor.k >= 1. {
                self.cursor.k = (self.cursor.k - 1.).max(0.);
                self.advance_frame();
            }
        }

        let ideal = self.ideal_pose();
        let drag = if self.scrubbing {
            self.config.scrub_drag
        } else {
            self.config.drag
        };
        self.display.approach(&ideal, drag)
    }

    /// The pose exactly at the cursor, before display lag.
    pub fn ideal_pose(&self) -> Pose {
        if self.keyframes.len() == 1 {
            return self.keyframes[0].clone();
        }
        keyframe(&self.keyframes, self.cursor.frame).interpolate_linear(
            keyframe(&self.keyframes, self.cursor.frame + 1),
            self.cursor.k,
        )
    }

    fn advance_frame(&mut self) {
        self.cursor.frame_in_seq += 1;

        if self.cursor.frame_in_seq >= self.last_frame_in_seq(self.cursor.seqindex) {
            self.cursor.seqindex += 1;
            if self.cursor.seqindex == self.steps.len() {
                debug!("Looping drill {}", self.link());
                self.cursor.seqindex = 0;
                self.cursor.frame_in_seq = -self.config.restart_preroll_frames;
            } else {
                self.cursor.frame_in_seq = 0;
            }
        }

        self.sync_frame();
    }

    /// Value of `frame_in_seq` at which playback moves on to the next step.
    fn last_frame_in_seq(&self, seqindex: usize) -> i64 {
        let mut last = self.graph.step_len(self.steps[seqindex]) as i64 - 1;
        if seqindex + 1 == self.steps.len() {
            last += self.config.end_dwell_frames;
        }
        last
    }

    fn sync_frame(&mut self) {
        self.cursor.frame =
            seq_index_to_frame_index(&self.graph, &self.steps, self.cursor.seqindex)
                + self.cursor.frame_in_seq;
    }

    /// Appends `step` at the end of the drill. The cursor keeps its position.
    pub fn append(&mut self, step: Step) -> Result<(), PathError> {
        self.check_step(step)?;
        let expected = self.end_node();
        let found = self.graph.step_from(step).node;
        if expected != found {
            return Err(PathError::Disconnected {
                index: self.steps.len(),
                expected,
                found,
            });
        }
        debug!("Appending {:?} to drill", step);
        self.steps.push(step);
        self.rebuild();
        Ok(())
    }

    /// Prepends `step` at the start of the drill. The cursor stays on the same step.
    pub fn prepend(&mut self, step: Step) -> Result<(), PathError> {
        self.check_step(step)?;
        let expected = self.start_node;
        let found = self.graph.step_to(step).node;
        if expected != found {
            return Err(PathError::Disconnected {
                index: 0,
                expected,
                found,
            });
        }
        debug!("Prepending {:?} to drill", step);
        if !self.steps.is_empty() {
            self.cursor.seqindex += 1;
        }
        self.steps.insert(0, step);
        self.start_node = self.graph.step_from(step).node;
        self.rebuild();
        Ok(())
    }

    /// Removes the first step. Steps after it keep their cursor position.
    pub fn pop_front(&mut self) -> Option<Step> {
        if self.steps.is_empty() {
            return None;
        }
        let step = self.steps.remove(0);
        self.start_node = self.graph.step_to(step).node;
        if self.cursor.seqindex == 0 {
            self.cursor.frame_in_seq = 0;
        } else {
            self.cursor.seqindex -= 1;
        }
        debug!("Popped {:?} from drill front", step);
        self.rebuild();
        Some(step)
    }

    /// Removes the last step. A cursor on it moves to the start of the previous step.
    pub fn pop_back(&mut self) -> Option<Step> {
        let step = self.steps.pop()?;
        if self.cursor.seqindex >= self.steps.len() {
            self.cursor.seqindex = self.steps.len().saturating_sub(1);
            self.cursor.frame_in_seq = 0;
        }
        debug!("Popped {:?} from drill back", step);
        self.rebuild();
        Some(step)
    }

    /// Executes a command from the UI shell.
    pub fn apply(&mut self, command: Command) -> Result<(), PathError> {
        match command {
            Command::Append(step) => self.append(step)?,
            Command::Prepend(step) => self.prepend(step)?,
            Command::PopFront => {
                self.pop_front();
            }
            Command::PopBack => {
                self.pop_back();
            }
            Command::Seek(frame) => self.seek(frame),
            Command::TogglePause => {
                self.toggle_pause();
            }
            Command::ToggleMirror => {
                self.toggle_mirror();
            }
            Command::BeginScrub => {
                self.begin_scrub();
            }
            Command::EndScrub => {
                self.end_scrub();
            }
        }
        Ok(())
    }

    fn check_step(&self, step: Step) -> Result<(), PathError> {
        match self.graph.transition(step.transition) {
            Some(_) => Ok(()),
            None => Err(PathError::UnknownTransition {
                index: 0,
                transition: step.transition,
            }),
        }
    }

    /// Refollows the path and pulls the cursor back inside it.
    fn rebuild(&mut self) {
        let followed = if self.steps.is_empty() {
            follow_node(&self.graph, self.start_node, self.mirror)
        } else {
            Some(follow(&self.graph, &self.steps, self.mirror))
        };
        let Some(FollowedPath {
            keyframes,
            centering,
        }) = followed
        else {
            warn!("Drill start {} is not in the graph", self.start_node);
            return;
        };
        self.keyframes = keyframes;
        self.centering = centering;

        if self.steps.is_empty() {
            self.cursor = Cursor::default();
            return;
        }

        self.cursor.seqindex = self.cursor.seqindex.min(self.steps.len() - 1);
        let lowest = if self.cursor.seqindex == 0 {
            -self.config.restart_preroll_frames
        } else {
            0
        };
        let highest = self.last_frame_in_seq(self.cursor.seqindex);
        self.cursor.frame_in_seq = self.cursor.frame_in_seq.clamp(lowest, highest);
        self.sync_frame();
    }
}
