//! Reorientations: rigid transforms between the local frames of independently authored
//! transitions.
//!
//! A [`Reo`] rotates about the Y axis, translates, optionally mirrors left/right and optionally
//! swaps the two players, in that order. Reos form a group under [`Reo::compose`]; because a
//! mirror reverses the handedness of every rotation that follows it, composition and inversion
//! are not the naive component-wise operations.

use crate::{
    joint::PlayerJoint,
    math::{mirror_x, wrap_angle, yrot},
    pose::Pose,
};
use bevy::math::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Reo {
    pub mirror: bool,
    pub swap_players: bool,
    /// Rotation about the Y axis in radians. Only meaningful modulo 2π.
    pub angle: f32,
    pub offset: Vec3,
}

impl Reo {
    pub const IDENTITY: Reo = Reo {
        mirror: false,
        swap_players: false,
        angle: 0.,
        offset: Vec3::ZERO,
    };

    pub fn translation(offset: Vec3) -> Self {
        Self {
            offset,
            ..Self::IDENTITY
        }
    }

    pub fn rotation(angle: f32) -> Self {
        Self {
            angle,
            ..Self::IDENTITY
        }
    }

    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn with_swap_players(mut self, swap_players: bool) -> Self {
        self.swap_players = swap_players;
        self
    }

    pub fn inverse(&self) -> Self {
        let mut inv = Self {
            mirror: self.mirror,
            swap_players: self.swap_players,
            angle: -self.angle,
            offset: yrot(-self.angle, -self.offset),
        };

        if self.mirror {
            inv.angle = -inv.angle;
            inv.offset.x = -inv.offset.x;
        }

        inv
    }

    /// Apply `self`, then `then`.
    pub fn compose(&self, then: &Reo) -> Self {
        let (angle, offset) = if self.mirror {
            (
                self.angle - then.angle,
                mirror_x(then.offset) + yrot(-then.angle, self.offset),
            )
        } else {
            (
                self.angle + then.angle,
                then.offset + yrot(then.angle, self.offset),
            )
        };

        Self {
            mirror: self.mirror != then.mirror,
            swap_players: self.swap_players != then.swap_players,
            angle,
            offset,
        }
    }

    /// Transforms a single point: rotation, translation and mirror. Limb and player swaps do not
    /// apply to bare points.
    pub fn apply_to_vec(&self, v: Vec3) -> Vec3 {
        let v = yrot(self.angle, v) + self.offset;
        if self.mirror { mirror_x(v) } else { v }
    }

    pub fn apply(&self, pose: &Pose) -> Pose {
        let mut out = pose.map_coords(|v| yrot(self.angle, v) + self.offset);

        if self.mirror {
            out.mirror();
        }

        if self.swap_players {
            out.swap_players();
        }

        out
    }

    /// The joint of the source pose that lands on `pj` after applying `self`.
    pub fn apply_to_joint(&self, mut pj: PlayerJoint) -> PlayerJoint {
        if self.mirror {
            pj.joint = pj.joint.mirror();
        }
        if self.swap_players {
            pj.player = pj.player.opponent();
        }
        pj
    }

    pub fn approx_eq(&self, other: &Reo, tolerance: f32) -> bool {
        self.mirror == other.mirror
            && self.swap_players == other.swap_players
            && wrap_angle(self.angle - other.angle).abs() <= tolerance
            && self.offset.abs_diff_eq(other.offset, tolerance)
    }

    pub fn is_identity(&self, tolerance: f32) -> bool {
        self.approx_eq(&Self::IDENTITY, tolerance)
    }
}
