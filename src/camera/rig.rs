//! Camera pose math and per-mode view goals.
//!
//! `bevy_panorbit_camera` describes the camera as a focus point plus yaw, pitch
//! and radius. The controller works with eye positions instead, so this module
//! converts between the two and blends the current pose toward a goal.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::camera::focus::CameraMode;
use crate::core::CameraConfig;
use crate::orbital::{EarthWorldPosition, OrbitGeometry};

/// Orbit-camera pose in the same terms `PanOrbitCamera` uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitPose {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
}

impl OrbitPose {
    pub fn eye(&self) -> Vec3 {
        let rotation = Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(-self.pitch);
        self.focus + rotation * Vec3::new(0.0, 0.0, self.radius)
    }

    pub fn from_eye(focus: Vec3, eye: Vec3) -> Self {
        let offset = eye - focus;
        let radius = offset.length().max(f32::EPSILON);
        Self {
            focus,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / radius).clamp(-1.0, 1.0).asin(),
            radius,
        }
    }
}

/// `angle` shifted by whole turns so it lies within half a turn of `reference`.
pub fn nearest_angle(reference: f32, angle: f32) -> f32 {
    angle - TAU * ((angle - reference) / TAU).round()
}

/// Where a camera mode wants the camera, and how quickly to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewGoal {
    pub eye: Vec3,
    pub target: Vec3,
    pub eye_lerp: f32,
    pub target_lerp: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
}

pub fn view_goal(
    mode: CameraMode,
    earth: &EarthWorldPosition,
    current_eye: Vec3,
    orbit: &OrbitGeometry,
    config: &CameraConfig,
) -> ViewGoal {
    match mode {
        CameraMode::Initial => ViewGoal {
            eye: Vec3::from_array(config.initial_eye),
            target: Vec3::ZERO,
            eye_lerp: config.initial_lerp,
            target_lerp: config.initial_lerp,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
        },
        CameraMode::AutoFollow => {
            let angle = earth.phase - config.follow_lag_rad;
            let trailing = Vec3::new(
                config.follow_radius * angle.cos(),
                config.follow_height,
                config.follow_radius * angle.sin(),
            );
            ViewGoal {
                eye: orbit.tilt * trailing,
                target: earth.position,
                eye_lerp: config.follow_eye_lerp,
                target_lerp: config.follow_target_lerp,
                zoom_min: config.zoom_min,
                zoom_max: config.zoom_max,
            }
        }
        CameraMode::Focused => {
            let direction = (current_eye - earth.position).normalize_or(Vec3::Y);
            ViewGoal {
                eye: earth.position + direction * config.focus_distance,
                target: earth.position,
                eye_lerp: config.focus_lerp,
                target_lerp: config.focus_lerp,
                zoom_min: config.focused_zoom_min,
                zoom_max: config.focused_zoom_max,
            }
        }
    }
}

/// Blend one step from `current` toward `goal`.
pub fn steer(current: &OrbitPose, goal: &ViewGoal) -> OrbitPose {
    let eye = current.eye().lerp(goal.eye, goal.eye_lerp);
    let focus = current.focus.lerp(goal.target, goal.target_lerp);
    let mut next = OrbitPose::from_eye(focus, eye);
    next.yaw = nearest_angle(current.yaw, next.yaw);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OrbitConfig;

    fn assert_vec_close(a: Vec3, b: Vec3) {
        assert!(a.distance(b) < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn test_pose_round_trips_eye() {
        let focus = Vec3::new(3.0, -1.0, 2.0);
        for eye in [
            Vec3::new(10.0, 4.0, -7.0),
            Vec3::new(-2.0, 30.0, 1.0),
            Vec3::new(0.5, -6.0, 9.0),
        ] {
            let pose = OrbitPose::from_eye(focus, eye);
            assert_vec_close(pose.eye(), eye);
        }
    }

    #[test]
    fn test_nearest_angle_picks_short_way() {
        assert!((nearest_angle(6.0, 0.1) - (0.1 + TAU)).abs() < 1e-5);
        assert!((nearest_angle(-3.0, 3.0) - (3.0 - TAU)).abs() < 1e-5);
        assert!((nearest_angle(1.0, 1.5) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_full_lerp_reaches_goal() {
        let current = OrbitPose::from_eye(Vec3::ZERO, Vec3::new(0.0, 10.0, 10.0));
        let goal = ViewGoal {
            eye: Vec3::new(20.0, 3.0, -4.0),
            target: Vec3::new(15.0, 0.0, 0.0),
            eye_lerp: 1.0,
            target_lerp: 1.0,
            zoom_min: 1.0,
            zoom_max: 100.0,
        };
        let next = steer(&current, &goal);
        assert_vec_close(next.focus, goal.target);
        assert_vec_close(next.eye(), goal.eye);
    }

    #[test]
    fn test_partial_lerp_moves_part_way() {
        let current = OrbitPose::from_eye(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0));
        let goal = ViewGoal {
            eye: Vec3::new(0.0, 0.0, 20.0),
            target: Vec3::ZERO,
            eye_lerp: 0.1,
            target_lerp: 0.1,
            zoom_min: 1.0,
            zoom_max: 100.0,
        };
        let next = steer(&current, &goal);
        assert!((next.radius - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_focused_goal_keeps_safe_distance() {
        let config = CameraConfig::default();
        let orbit = OrbitGeometry::from_config(&OrbitConfig::default());
        let earth = EarthWorldPosition {
            position: Vec3::new(20.0, 2.0, 0.0),
            phase: 0.0,
        };
        let goal = view_goal(
            CameraMode::Focused,
            &earth,
            Vec3::new(40.0, 10.0, 5.0),
            &orbit,
            &config,
        );
        assert!((goal.eye.distance(earth.position) - config.focus_distance).abs() < 1e-4);
        assert_eq!(goal.target, earth.position);
        assert!(goal.zoom_max < config.zoom_max);
    }

    #[test]
    fn test_follow_goal_trails_earth() {
        let config = CameraConfig::default();
        let orbit = OrbitGeometry::from_config(&OrbitConfig::default());
        let phase = 1.2;
        let earth = EarthWorldPosition {
            position: orbit.world_position(phase),
            phase,
        };
        let goal = view_goal(CameraMode::AutoFollow, &earth, Vec3::ZERO, &orbit, &config);

        let local = orbit.tilt.inverse() * goal.eye;
        let eye_angle = local.z.atan2(local.x);
        assert!((eye_angle - (phase - config.follow_lag_rad)).abs() < 1e-4);
        assert!((local.y - config.follow_height).abs() < 1e-4);
        assert_eq!(goal.target, earth.position);
    }
}
