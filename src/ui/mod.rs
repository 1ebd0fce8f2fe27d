//! User interface module
//!
//! This module handles the view state, the header and control panels, and
//! keyboard shortcuts for the egui-based user interface.

use bevy::prelude::*;
use bevy_egui::{EguiPlugin, EguiPrimaryContextPass};

use crate::core::FrameSet;

pub mod info;
pub mod panels;
pub mod state;
pub mod systems;

pub use state::{VizCommand, VizState, apply_viz_commands};
pub use systems::{keyboard_shortcuts, ui_system};

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_message::<VizCommand>()
            .init_resource::<VizState>()
            .add_systems(Update, keyboard_shortcuts.in_set(FrameSet::Input))
            .add_systems(Update, apply_viz_commands.in_set(FrameSet::State))
            .add_systems(EguiPrimaryContextPass, ui_system);
    }
}
