//! Sun, Moon and the Terra satellite.

use std::f32::consts::FRAC_PI_4;

use bevy::prelude::*;

use crate::core::{AssetPaths, SceneConfig};
use crate::visualization::motion::Spin;
use crate::visualization::scene::SceneAnchors;

pub const SUN_RADIUS: f32 = 4.0;
const SUN_POSITION: Vec3 = Vec3::new(-3.0, 0.0, 0.0);
const SUN_EMISSIVE_STRENGTH: f32 = 3.5;
const SUN_SPIN: f32 = 0.18;

pub const MOON_RADIUS: f32 = 0.5;
const MOON_DISTANCE: f32 = 3.5;
const MOON_ORBIT_RATE: f32 = 0.5;
const MOON_SPIN: f32 = 0.3;

const SATELLITE_DISTANCE: f32 = 2.8;
const SATELLITE_ORBIT_RATE: f32 = 1.5;
const SATELLITE_SCALE: f32 = 0.000_05;

/// Empty carrier under `parent` that swings its children around a circle in
/// the parent's XZ plane.
fn orbit_pivot(name: &'static str, rate: f32, parent: Entity) -> impl Bundle {
    (
        Transform::default(),
        Visibility::default(),
        Spin(rate),
        Name::new(name),
        ChildOf(parent),
    )
}

/// Marker component for the Sun entity.
#[derive(Component)]
pub struct Sun;

/// Marker component for the Moon entity.
#[derive(Component)]
pub struct Moon;

/// Marker component for the satellite model.
#[derive(Component)]
pub struct Satellite;

pub fn spawn_sun(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    paths: Res<AssetPaths>,
    scene: Res<SceneConfig>,
) {
    let texture: Handle<Image> = asset_server.load(paths.sun.clone());
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(texture.clone()),
        emissive: LinearRgba::WHITE * SUN_EMISSIVE_STRENGTH,
        emissive_texture: Some(texture),
        ..default()
    });

    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(SUN_RADIUS).mesh().uv(64, 64))),
            MeshMaterial3d(material),
            Transform::from_translation(SUN_POSITION),
            Visibility::default(),
            Spin(SUN_SPIN),
            Pickable::IGNORE,
            Sun,
            Name::new("Sun"),
        ))
        .with_child((
            PointLight {
                intensity: scene.sun_light_intensity,
                range: 500.0,
                shadows_enabled: false,
                ..default()
            },
            Name::new("Sun Light"),
        ));
}

pub fn spawn_moon(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    paths: Res<AssetPaths>,
    anchors: Res<SceneAnchors>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(asset_server.load(paths.moon.clone())),
        perceptual_roughness: 1.0,
        metallic: 0.0,
        ..default()
    });

    let pivot = commands
        .spawn(orbit_pivot("Moon Pivot", MOON_ORBIT_RATE, anchors.earth_body))
        .id();

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(MOON_RADIUS).mesh().uv(32, 32))),
        MeshMaterial3d(material),
        Transform::from_xyz(MOON_DISTANCE, 0.0, 0.0),
        Visibility::default(),
        Spin(MOON_SPIN),
        Pickable::IGNORE,
        Moon,
        Name::new("Moon"),
        ChildOf(pivot),
    ));
}

pub fn spawn_satellite(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    paths: Res<AssetPaths>,
    anchors: Res<SceneAnchors>,
) {
    let pivot = commands
        .spawn(orbit_pivot(
            "Satellite Pivot",
            SATELLITE_ORBIT_RATE,
            anchors.earth_body,
        ))
        .id();

    commands.spawn((
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(paths.satellite.clone()))),
        Transform::from_xyz(SATELLITE_DISTANCE, 0.0, 0.0)
            .with_rotation(Quat::from_rotation_x(-FRAC_PI_4))
            .with_scale(Vec3::splat(SATELLITE_SCALE)),
        Visibility::default(),
        Pickable::IGNORE,
        Satellite,
        Name::new("Terra Satellite"),
        ChildOf(pivot),
    ));
}
