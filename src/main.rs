use bevy::log::LogPlugin;
use bevy::picking::mesh_picking::MeshPickingPlugin;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_panorbit_camera::PanOrbitCameraPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod camera;
mod core;
mod orbital;
mod ui;
mod visualization;

use camera::CameraFocusPlugin;
use core::CorePlugin;
use orbital::OrbitalPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

const LOG_FILTER: &str = "info,wgpu=error,naga=warn";

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Terra Land Cover Through Time".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: LOG_FILTER.to_string(),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Config first: the other plugins' startup systems read its resources.
    app.add_plugins(CorePlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .add_plugins(MeshPickingPlugin)
        .add_plugins((
            OrbitalPlugin,
            CameraFocusPlugin,
            VisualizationPlugin,
            UiPlugin,
        ));

    app.run();
}
