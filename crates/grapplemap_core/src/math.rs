use bevy::math::Vec3;

/// Rotates `v` about the world Y axis by `angle` radians.
///
/// Only the XZ plane is affected: `x' = cos(a)x + sin(a)z`, `z' = -sin(a)x + cos(a)z`.
pub fn yrot(angle: f32, v: Vec3) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(cos * v.x + sin * v.z, v.y, -sin * v.x + cos * v.z)
}

/// Reflects `v` through the YZ plane.
pub fn mirror_x(v: Vec3) -> Vec3 {
    Vec3::new(-v.x, v.y, v.z)
}

/// Drops the vertical component.
pub fn y0(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0., v.z)
}

/// Normalizes an angle to `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}
