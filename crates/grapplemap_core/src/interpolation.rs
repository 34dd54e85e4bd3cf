use crate::pose::Pose;
use bevy::math::Vec3;

pub trait InterpolateLinear {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self;
}

impl InterpolateLinear for Vec3 {
    /// `self * (1 - f) + other * f`
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        *self * (1. - f) + *other * f
    }
}

impl InterpolateLinear for Pose {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        self.zip_map(other, |a, b| a.interpolate_linear(&b, f))
    }
}

/// Display-lag filter: the rendered pose chases an ideal pose, covering a fixed fraction of the
/// remaining distance every tick.
#[derive(Clone, Debug, Default)]
pub struct LaggedPose {
    current: Option<Pose>,
}

impl LaggedPose {
    pub fn new(initial: Pose) -> Self {
        Self {
            current: Some(initial),
        }
    }

    /// Moves the rendered pose towards `target`. The first target is taken verbatim.
    pub fn approach(&mut self, target: &Pose, drag: f32) -> &Pose {
        let next = match &self.current {
            Some(current) => current.interpolate_linear(target, drag),
            None => target.clone(),
        };
        self.current.insert(next)
    }

    /// Snaps to `pose` without smoothing.
    pub fn jump_to(&mut self, pose: Pose) {
        self.current = Some(pose);
    }

    pub fn get(&self) -> Option<&Pose> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Pose> {
        self.current.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_pose;

    #[test]
    fn vec3_interpolation_endpoints() {
        let a = Vec3::new(1., 2., 3.);
        let b = Vec3::new(-1., 0., 5.);
        assert_eq!(a.interpolate_linear(&b, 0.), a);
        assert_eq!(a.interpolate_linear(&b, 1.), b);
        assert_eq!(a.interpolate_linear(&b, 0.5), Vec3::new(0., 1., 4.));
    }

    #[test]
    fn lagged_pose_takes_first_target_verbatim() {
        let mut lag = LaggedPose::default();
        let target = sample_pose(0.);
        assert_eq!(lag.approach(&target, 0.2), &target);
    }

    #[test]
    fn lagged_pose_converges_towards_target() {
        let start = sample_pose(0.);
        let target = start.translated(Vec3::new(1., 0., 0.));
        let mut lag = LaggedPose::new(start.clone());

        let first = lag.approach(&target, 0.25).clone();
        let moved = first.players[0][crate::joint::Joint::Core].x
            - start.players[0][crate::joint::Joint::Core].x;
        assert!((moved - 0.25).abs() < 1e-5);

        for _ in 0..200 {
            lag.approach(&target, 0.25);
        }
        assert!(lag.get().unwrap().approx_eq(&target, 1e-4));
    }
}
