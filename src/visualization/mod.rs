//! Visualization module
//!
//! This module builds the scene (sun, orbit line, layered Earth, Moon,
//! satellite and stars) and keeps the Earth materials in sync with the
//! selected year and data type.

use bevy::prelude::*;

use crate::core::FrameSet;

pub mod bodies;
pub mod earth;
pub mod motion;
pub mod scene;
pub mod stars;
pub mod textures;

pub use earth::apply_earth_materials;
pub use textures::EarthTextures;

/// Plugin for scene setup and Earth rendering
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EarthTextures>()
            .add_systems(
                Startup,
                (
                    scene::spawn_scene_root,
                    (
                        earth::spawn_earth,
                        bodies::spawn_sun,
                        bodies::spawn_moon,
                        bodies::spawn_satellite,
                        stars::spawn_starfield,
                    ),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (
                        textures::request_earth_textures,
                        textures::poll_earth_textures,
                        apply_earth_materials,
                    )
                        .chain(),
                    motion::spin_bodies,
                )
                    .in_set(FrameSet::Render),
            );
    }
}
