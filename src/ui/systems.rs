//! UI systems for the egui interface

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::{CameraInputBlocked, FocusController};
use crate::core::DataType;
use crate::ui::panels::{controls_panel, header_panel};
use crate::ui::state::{VizCommand, VizState};

/// Main UI system that renders all the egui panels
pub fn ui_system(
    mut contexts: EguiContexts,
    state: Res<VizState>,
    controller: Res<FocusController>,
    mut blocked: ResMut<CameraInputBlocked>,
    mut writer: MessageWriter<VizCommand>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let mut commands = Vec::new();
    header_panel(ctx);
    controls_panel(ctx, &state, controller.mode(), &mut commands);

    writer.write_batch(commands);

    // Keep orbit controls off the panels.
    let over_ui = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    if blocked.0 != over_ui {
        blocked.0 = over_ui;
    }

    Ok(())
}

/// Map a key to the command it triggers.
pub fn shortcut_command(key: KeyCode) -> Option<VizCommand> {
    let select = |index: usize| VizCommand::SetDataType(DataType::ALL[index]);
    match key {
        KeyCode::Digit1 => Some(select(0)),
        KeyCode::Digit2 => Some(select(1)),
        KeyCode::Digit3 => Some(select(2)),
        KeyCode::Digit4 => Some(select(3)),
        KeyCode::KeyL => Some(VizCommand::ToggleLegend),
        KeyCode::ArrowLeft => Some(VizCommand::StepYear(-1)),
        KeyCode::ArrowRight => Some(VizCommand::StepYear(1)),
        _ => None,
    }
}

pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    mut writer: MessageWriter<VizCommand>,
) {
    // Typing into an egui widget should not flip layers.
    if contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.wants_keyboard_input())
    {
        return;
    }

    for key in keys.get_just_pressed() {
        if let Some(command) = shortcut_command(*key) {
            writer.write(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_keys_select_data_types_in_order() {
        assert_eq!(
            shortcut_command(KeyCode::Digit1),
            Some(VizCommand::SetDataType(DataType::Earth))
        );
        assert_eq!(
            shortcut_command(KeyCode::Digit3),
            Some(VizCommand::SetDataType(DataType::Bump))
        );
        assert_eq!(
            shortcut_command(KeyCode::Digit4),
            Some(VizCommand::SetDataType(DataType::Atmosphere))
        );
    }

    #[test]
    fn test_arrows_step_years() {
        assert_eq!(
            shortcut_command(KeyCode::ArrowLeft),
            Some(VizCommand::StepYear(-1))
        );
        assert_eq!(
            shortcut_command(KeyCode::ArrowRight),
            Some(VizCommand::StepYear(1))
        );
        assert_eq!(shortcut_command(KeyCode::KeyQ), None);
    }
}
