use crate::{
    joint::{Joint, MIRRORED_PAIRS, PerJoint, PlayerJoint, PlayerNum},
    math::{mirror_x, y0},
};
use bevy::math::{Vec2, Vec3};
use std::ops::{Index, IndexMut};

pub type PlayerPose = PerJoint<Vec3>;

/// Positions of every joint of both players at one instant.
///
/// Poses are values: operations return a new pose rather than mutating the receiver, except for
/// the explicitly in-place [`Pose::mirror`] and [`Pose::swap_players`].
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub players: [PlayerPose; 2],
}

impl Pose {
    pub fn new(first: PlayerPose, second: PlayerPose) -> Self {
        Self {
            players: [first, second],
        }
    }

    pub fn player(&self, player: PlayerNum) -> &PlayerPose {
        &self.players[player.index()]
    }

    /// Applies `f` to every joint position.
    pub fn map_coords(&self, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        Self {
            players: [self.players[0].map(&mut f), self.players[1].map(&mut f)],
        }
    }

    /// Combines two poses joint by joint.
    pub fn zip_map(&self, other: &Pose, mut f: impl FnMut(Vec3, Vec3) -> Vec3) -> Self {
        let mut out = self.clone();
        for pj in PlayerJoint::all() {
            out[pj] = f(self[pj], other[pj]);
        }
        out
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        self.map_coords(|v| v + offset)
    }

    /// Reflects every joint's X coordinate and exchanges each player's left and right limbs.
    pub fn mirror(&mut self) {
        for player in &mut self.players {
            for v in player.0.iter_mut() {
                *v = mirror_x(*v);
            }
            swap_limbs(player);
        }
    }

    pub fn mirrored(&self) -> Self {
        let mut out = self.clone();
        out.mirror();
        out
    }

    pub fn swap_players(&mut self) {
        self.players.swap(0, 1);
    }

    /// Sum of both players' core positions.
    pub fn core_sum(&self) -> Vec3 {
        self.players[0][Joint::Core] + self.players[1][Joint::Core]
    }

    /// Midpoint between the players' cores, projected onto the floor.
    pub fn center_xz(&self) -> Vec2 {
        let c = self.core_sum() / 2.;
        Vec2::new(c.x, c.z)
    }

    /// Floor-plane vector from the first player's core to the second's.
    pub fn heading(&self) -> Vec2 {
        let d = self.players[1][Joint::Core] - self.players[0][Joint::Core];
        Vec2::new(d.x, d.z)
    }

    /// Translation that moves [`Pose::center_xz`] to the origin without changing heights.
    pub fn normal_translation(&self) -> Vec3 {
        y0(-self.core_sum() / 2.)
    }

    pub fn approx_eq(&self, other: &Pose, tolerance: f32) -> bool {
        PlayerJoint::all().all(|pj| self[pj].abs_diff_eq(other[pj], tolerance))
    }

    /// Loose equality used to recognise the same position under small authoring noise.
    pub fn basically_same(&self, other: &Pose) -> bool {
        let sum: f32 = PlayerJoint::all()
            .map(|pj| self[pj].distance_squared(other[pj]))
            .sum();
        sum < 0.03
    }
}

fn swap_limbs(player: &mut PlayerPose) {
    for (left, right) in MIRRORED_PAIRS {
        player.swap(left, right);
    }
}

impl Index<PlayerJoint> for Pose {
    type Output = Vec3;

    fn index(&self, pj: PlayerJoint) -> &Vec3 {
        &self.players[pj.player.index()][pj.joint]
    }
}

impl IndexMut<PlayerJoint> for Pose {
    fn index_mut(&mut self, pj: PlayerJoint) -> &mut Vec3 {
        &mut self.players[pj.player.index()][pj.joint]
    }
}

/// Clamps `i` into `0..n`. An empty sequence maps everything to 0.
pub fn bound_frame_index(i: i64, n: usize) -> usize {
    if i < 0 || n == 0 {
        return 0;
    }
    (i as usize).min(n - 1)
}

/// Keyframe lookup with clamping at both ends, no wraparound.
pub fn keyframe(keyframes: &[Pose], i: i64) -> &Pose {
    &keyframes[bound_frame_index(i, keyframes.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_pose;

    #[test]
    fn mirror_twice_is_exact_identity() {
        let pose = sample_pose(0.37);
        assert_eq!(pose.mirrored().mirrored(), pose);
    }

    #[test]
    fn mirror_swaps_limbs_and_negates_x() {
        let pose = sample_pose(0.1);
        let mirrored = pose.mirrored();
        for player in PlayerNum::ALL {
            for joint in Joint::ALL {
                let original = pose[PlayerJoint::new(player, joint)];
                let reflected = mirrored[PlayerJoint::new(player, joint.mirror())];
                assert_eq!(reflected, mirror_x(original));
            }
        }
    }

    #[test]
    fn swap_players_exchanges_arrays() {
        let pose = sample_pose(0.2);
        let mut swapped = pose.clone();
        swapped.swap_players();
        assert_eq!(swapped.players[0], pose.players[1]);
        assert_eq!(swapped.players[1], pose.players[0]);
    }

    #[test]
    fn bound_frame_index_clamps() {
        assert_eq!(bound_frame_index(-3, 5), 0);
        assert_eq!(bound_frame_index(0, 5), 0);
        assert_eq!(bound_frame_index(4, 5), 4);
        assert_eq!(bound_frame_index(17, 5), 4);
        assert_eq!(bound_frame_index(3, 0), 0);
    }

    #[test]
    fn normal_translation_centers_cores() {
        let pose = sample_pose(0.5).translated(Vec3::new(3., 0.4, -2.));
        let centered = pose.translated(pose.normal_translation());
        assert!(centered.center_xz().abs_diff_eq(Vec2::ZERO, 1e-5));
        assert_eq!(
            centered.players[0][Joint::Head].y,
            pose.players[0][Joint::Head].y
        );
    }

    #[test]
    fn basically_same_tolerates_noise() {
        let pose = sample_pose(0.3);
        assert!(pose.basically_same(&pose.translated(Vec3::splat(0.005))));
        assert!(!pose.basically_same(&pose.translated(Vec3::X)));
    }
}
