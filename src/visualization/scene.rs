//! Scene root: the tilted orbital plane, the orbit line and Earth's carrier entities.

use std::f32::consts::FRAC_PI_2;

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

use crate::core::{OrbitConfig, SceneConfig};
use crate::orbital::{EarthOrbit, OrbitGeometry};

/// Earth's axial tilt.
pub const EARTH_AXIAL_TILT_DEG: f32 = 23.5;
const ORBIT_LINE_HALF_WIDTH: f32 = 0.05;

/// Marker for the tilted parent of everything that orbits the sun.
#[derive(Component)]
pub struct OrbitalPlane;

/// Marker for the tilted Earth group that carries the layers, Moon and satellite.
#[derive(Component)]
pub struct EarthBody;

/// Entities other spawn systems attach to.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneAnchors {
    pub orbital_plane: Entity,
    pub earth_body: Entity,
}

pub fn spawn_scene_root(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    orbit_config: Res<OrbitConfig>,
    scene_config: Res<SceneConfig>,
) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: scene_config.ambient_brightness,
        ..default()
    });

    let geometry = OrbitGeometry::from_config(&orbit_config);

    let orbital_plane = commands
        .spawn((
            Transform::from_rotation(geometry.tilt),
            Visibility::default(),
            OrbitalPlane,
            Name::new("Orbital Plane"),
        ))
        .id();

    // The ring lies in XY; turn it into the XZ plane and stretch it like the orbit.
    let ring = Annulus::new(
        geometry.semi_major - ORBIT_LINE_HALF_WIDTH,
        geometry.semi_major + ORBIT_LINE_HALF_WIDTH,
    );
    commands.spawn((
        Mesh3d(meshes.add(ring.mesh().resolution(128))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x33, 0x33, 0x33),
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_rotation(Quat::from_rotation_x(-FRAC_PI_2))
            .with_scale(Vec3::new(geometry.eccentricity, 1.0, 1.0)),
        Pickable::IGNORE,
        Name::new("Orbit Line"),
        ChildOf(orbital_plane),
    ));

    let earth_orbit = commands
        .spawn((
            Transform::from_translation(geometry.local_position(0.0)),
            Visibility::default(),
            EarthOrbit,
            Name::new("Earth Orbit"),
            ChildOf(orbital_plane),
        ))
        .id();

    let earth_body = commands
        .spawn((
            Transform::from_rotation(Quat::from_rotation_z(-EARTH_AXIAL_TILT_DEG.to_radians())),
            Visibility::default(),
            EarthBody,
            Name::new("Earth"),
            ChildOf(earth_orbit),
        ))
        .id();

    commands.insert_resource(SceneAnchors {
        orbital_plane,
        earth_body,
    });
}
