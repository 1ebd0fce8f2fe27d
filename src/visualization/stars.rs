//! Background starfield.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;

use crate::core::SceneConfig;

/// Small deterministic generator; the sky only has to look the same every run.
struct Lcg(u32);

impl Lcg {
    fn next_unit(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        self.0 as f32 / u32::MAX as f32
    }
}

/// `count` points spread over a spherical shell from `radius` to `radius + depth`.
pub fn star_positions(count: u32, seed: u32, radius: f32, depth: f32) -> Vec<Vec3> {
    let mut rng = Lcg(seed);
    (0..count)
        .map(|_| {
            // Uniform on the sphere: uniform z and azimuth.
            let z = rng.next_unit() * 2.0 - 1.0;
            let azimuth = rng.next_unit() * std::f32::consts::TAU;
            let distance = radius + rng.next_unit() * depth;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            Vec3::new(ring * azimuth.cos(), z, ring * azimuth.sin()) * distance
        })
        .collect()
}

pub fn spawn_starfield(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<SceneConfig>,
) {
    let positions = star_positions(
        config.star_count,
        config.star_seed,
        config.star_radius,
        config.star_depth,
    );
    info!("Spawning starfield with {} stars", positions.len());

    let mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::RENDER_WORLD)
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Pickable::IGNORE,
        Name::new("Starfield"),
    ));
}
