//! Constant self-rotation for scene bodies and orbit pivots.

use bevy::prelude::*;

/// Rotation about the local Y axis, in rad/s.
///
/// Put on a body to spin it in place, or on an empty pivot to carry its
/// children around a circular orbit.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Spin(pub f32);

pub fn spin_bodies(time: Res<Time>, mut bodies: Query<(&Spin, &mut Transform)>) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (spin, mut transform) in &mut bodies {
        if spin.0 != 0.0 {
            transform.rotate_local_y(spin.0 * dt);
        }
    }
}
