//! Camera module
//!
//! Spawns the main orbit camera and steers it every frame according to the
//! [`FocusController`] state. User drag and zoom move the camera for a frame;
//! the controller keeps blending toward its goal on the next one.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

use crate::core::{CameraConfig, FrameSet, OrbitConfig};
use crate::orbital::{EarthWorldPosition, OrbitGeometry, OrbitPace};

pub mod focus;
pub mod rig;

pub use focus::{CameraMode, FocusController, FocusToggleRequested};
pub use rig::{OrbitPose, ViewGoal, steer, view_goal};

/// Marker for the primary 3D camera.
#[derive(Component)]
pub struct MainCamera;

/// Set by the UI while the pointer is over a panel, so the camera ignores it.
#[derive(Resource, Debug, Default)]
pub struct CameraInputBlocked(pub bool);

/// Plugin for the main camera and its focus controller
pub struct CameraFocusPlugin;

impl Plugin for CameraFocusPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FocusToggleRequested>()
            .init_resource::<FocusController>()
            .init_resource::<CameraInputBlocked>()
            .add_systems(Startup, spawn_main_camera)
            .add_systems(
                Update,
                (
                    gate_camera_input,
                    detect_manual_input,
                    tick_intro,
                    apply_focus_requests,
                    sync_orbit_pace,
                )
                    .chain()
                    .in_set(FrameSet::State),
            )
            .add_systems(Update, steer_main_camera.in_set(FrameSet::Camera));
    }
}

fn spawn_main_camera(mut commands: Commands, config: Res<CameraConfig>) {
    let eye = Vec3::from_array(config.initial_eye);
    let pose = OrbitPose::from_eye(Vec3::ZERO, eye);

    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(pose.radius),
        yaw: Some(pose.yaw),
        pitch: Some(pose.pitch),
        zoom_lower_limit: config.zoom_min,
        zoom_upper_limit: Some(config.zoom_max),
        // Panning would fight the controller's focus steering.
        pan_sensitivity: 0.0,
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: config.fov_deg.to_radians(),
            near: 0.1,
            far: 2_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));
}

/// Mute drag and scroll while the pointer is over a panel. The camera itself
/// keeps running so steering continues underneath.
fn gate_camera_input(
    blocked: Res<CameraInputBlocked>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    if !blocked.is_changed() {
        return;
    }
    let sensitivity = if blocked.0 { 0.0 } else { 1.0 };
    for mut camera in &mut cameras {
        camera.orbit_sensitivity = sensitivity;
        camera.zoom_sensitivity = sensitivity;
    }
}

/// Any press or scroll over the 3D view counts as taking manual control.
fn detect_manual_input(
    mouse: Res<ButtonInput<MouseButton>>,
    mut wheel: MessageReader<MouseWheel>,
    blocked: Res<CameraInputBlocked>,
    mut controller: ResMut<FocusController>,
) {
    let scrolled = wheel.read().count() > 0;
    if blocked.0 || controller.mode() != CameraMode::Initial {
        return;
    }
    if (scrolled || mouse.get_just_pressed().next().is_some())
        && let Some(mode) = controller.manual_input()
    {
        info!("Manual camera input, switching to {:?}", mode);
    }
}

fn tick_intro(time: Res<Time>, mut controller: ResMut<FocusController>) {
    if controller.mode() != CameraMode::Initial {
        return;
    }
    if let Some(mode) = controller.tick(time.delta()) {
        info!("Intro view finished, switching to {:?}", mode);
    }
}

fn apply_focus_requests(
    time: Res<Time>,
    mut requests: MessageReader<FocusToggleRequested>,
    mut controller: ResMut<FocusController>,
) {
    for _ in requests.read() {
        match controller.toggle_focus(time.elapsed_secs()) {
            Some(mode) => info!("Earth clicked, camera now {:?}", mode),
            None => debug!("Earth click ignored inside debounce window"),
        }
    }
}

fn sync_orbit_pace(controller: Res<FocusController>, mut pace: ResMut<OrbitPace>) {
    if !controller.is_changed() {
        return;
    }
    let wanted = if controller.mode().is_focused() {
        OrbitPace::Slow
    } else {
        OrbitPace::Normal
    };
    pace.set_if_neq(wanted);
}

/// Blend the camera's targets toward the goal of the current mode.
fn steer_main_camera(
    controller: Res<FocusController>,
    earth: Res<EarthWorldPosition>,
    camera_config: Res<CameraConfig>,
    orbit_config: Res<OrbitConfig>,
    mut cameras: Query<&mut PanOrbitCamera, With<MainCamera>>,
) {
    let Ok(mut camera) = cameras.single_mut() else {
        return;
    };
    // PanOrbit fills in its targets on its first update.
    if !camera.initialized {
        return;
    }

    let current = OrbitPose {
        focus: camera.target_focus,
        yaw: camera.target_yaw,
        pitch: camera.target_pitch,
        radius: camera.target_radius,
    };
    let orbit = OrbitGeometry::from_config(&orbit_config);
    let goal = view_goal(
        controller.mode(),
        &earth,
        current.eye(),
        &orbit,
        &camera_config,
    );
    let next = steer(&current, &goal);

    camera.target_focus = next.focus;
    camera.target_yaw = next.yaw;
    camera.target_pitch = next.pitch;
    camera.target_radius = next.radius.clamp(goal.zoom_min, goal.zoom_max);
    camera.zoom_lower_limit = goal.zoom_min;
    camera.zoom_upper_limit = Some(goal.zoom_max);
}
