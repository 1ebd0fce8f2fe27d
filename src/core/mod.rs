//! Core module
//!
//! Configuration loading, shared selection types, and the frame ordering used
//! by every other plugin.

use bevy::prelude::*;

pub mod config;
pub mod selection;

pub use config::{AssetPaths, CameraConfig, OrbitConfig, SceneConfig, VizConfig};
pub use selection::{DataType, Year};

/// Per-frame ordering of the app's `Update` work.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum FrameSet {
    /// Keyboard and pointer input that produces commands.
    Input,
    /// Apply commands and orbit events to the view state.
    State,
    /// Advance the Earth orbit.
    Orbit,
    /// Steer the camera from the latest Earth position.
    Camera,
    /// Texture requests, materials and per-frame motion.
    Render,
}

/// Loads configuration and sets up frame ordering.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let config = VizConfig::load();

        app.insert_resource(config.assets)
            .insert_resource(config.orbit)
            .insert_resource(config.camera)
            .insert_resource(config.scene)
            .configure_sets(
                Update,
                (
                    FrameSet::Input,
                    FrameSet::State,
                    FrameSet::Orbit,
                    FrameSet::Camera,
                    FrameSet::Render,
                )
                    .chain(),
            );
    }
}
