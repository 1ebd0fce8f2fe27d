//! UI state management
//!
//! [`VizState`] is the single source of truth for what the globe shows. The UI
//! and keyboard never touch it directly; they send [`VizCommand`]s, and
//! completed orbits advance the year the same way.

use bevy::prelude::*;

use crate::core::{DataType, Year};
use crate::orbital::OrbitCompleted;

/// Current selection shown on the globe and in the panels.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct VizState {
    pub year: Year,
    pub data_type: DataType,
    pub show_legend: bool,
}

impl Default for VizState {
    fn default() -> Self {
        Self {
            year: Year::FIRST,
            data_type: DataType::default(),
            show_legend: false,
        }
    }
}

/// Requested change to [`VizState`].
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VizCommand {
    SetYear(Year),
    /// Move by whole years, wrapping around the range.
    StepYear(i32),
    SetDataType(DataType),
    ToggleLegend,
}

impl VizState {
    /// State after applying `command`.
    pub fn with(&self, command: VizCommand) -> Self {
        let mut next = self.clone();
        match command {
            VizCommand::SetYear(year) => next.year = year,
            VizCommand::StepYear(delta) => next.year = self.year.offset_wrapping(delta),
            VizCommand::SetDataType(data_type) => next.data_type = data_type,
            VizCommand::ToggleLegend => next.show_legend = !self.show_legend,
        }
        next
    }
}

/// Fold UI commands and completed orbits into [`VizState`].
pub fn apply_viz_commands(
    mut commands: MessageReader<VizCommand>,
    mut orbits: MessageReader<OrbitCompleted>,
    mut state: ResMut<VizState>,
) {
    let mut next = state.clone();

    for command in commands.read() {
        next = next.with(*command);
    }
    for orbit in orbits.read() {
        let year = next.year.next_wrapping();
        debug!("Orbit {} complete, advancing {} -> {}", orbit.orbit, next.year, year);
        next.year = year;
    }

    if next != *state {
        if next.year != state.year || next.data_type != state.data_type {
            info!("Showing {} for {}", next.data_type.label(), next.year);
        }
        *state = next;
    }
}
