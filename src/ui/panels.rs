//! UI panel rendering functions
//!
//! Panels only read [`VizState`] and push [`VizCommand`]s; the caller writes
//! the commands as messages once the frame's UI is built.

use bevy_egui::egui::{self, Color32, CornerRadius, Margin, RichText};

use crate::camera::CameraMode;
use crate::core::selection::{FIRST_YEAR, LAST_YEAR};
use crate::core::{DataType, Year};
use crate::ui::info;
use crate::ui::state::{VizCommand, VizState};

pub const APP_TITLE: &str = "Terra Land Cover Through Time (2001 - 2024)";
const SUBTITLE: &str = "An interactive 3D visualization using NASA Terra satellite data";

const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(15, 23, 42, 220);
const ACCENT: Color32 = Color32::from_rgb(96, 165, 250);
const LEGEND_HEADING: Color32 = Color32::from_rgb(251, 191, 36);
const MUTED: Color32 = Color32::from_rgb(148, 163, 184);

fn panel_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(PANEL_FILL)
        .inner_margin(Margin::same(8))
}

pub fn header_panel(ctx: &egui::Context) {
    egui::TopBottomPanel::top("header_panel")
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(APP_TITLE).color(Color32::WHITE).strong());
                ui.label(RichText::new(SUBTITLE).color(MUTED).small());
            });
        });
}

pub fn controls_panel(
    ctx: &egui::Context,
    state: &VizState,
    mode: CameraMode,
    commands: &mut Vec<VizCommand>,
) {
    egui::TopBottomPanel::bottom("controls_panel")
        .frame(panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                data_type_buttons(ui, state, commands);
                ui.separator();
                let legend_label = if state.show_legend {
                    "Hide Legend (L)"
                } else {
                    "Show Legend (L)"
                };
                if ui
                    .add(egui::Button::new(legend_label).selected(state.show_legend))
                    .clicked()
                {
                    commands.push(VizCommand::ToggleLegend);
                }
                ui.separator();
                ui.label(RichText::new(focus_hint(mode)).color(MUTED).small());
            });

            ui.add_space(4.0);
            year_slider(ui, state.year, commands);
            ui.add_space(6.0);
            info_panel(ui, state);
        });
}

fn data_type_buttons(ui: &mut egui::Ui, state: &VizState, commands: &mut Vec<VizCommand>) {
    for (index, data_type) in DataType::ALL.into_iter().enumerate() {
        let text = format!("{} ({})", data_type.label(), index + 1);
        let selected = state.data_type == data_type;
        if ui
            .add(egui::Button::new(text).selected(selected))
            .clicked()
            && !selected
        {
            commands.push(VizCommand::SetDataType(data_type));
        }
    }
}

fn year_slider(ui: &mut egui::Ui, year: Year, commands: &mut Vec<VizCommand>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(year.to_string()).color(ACCENT).strong());

        let mut value = year.get();
        ui.spacing_mut().slider_width = (ui.available_width() - 16.0).max(120.0);
        let response = ui.add(
            egui::Slider::new(&mut value, FIRST_YEAR..=LAST_YEAR)
                .step_by(1.0)
                .show_value(false),
        );

        // One tick per year under the rail.
        let rect = response.rect;
        let painter = ui.painter();
        let span = f32::from(LAST_YEAR - FIRST_YEAR);
        for tick in Year::all() {
            let t = f32::from(tick.get() - FIRST_YEAR) / span;
            let x = egui::lerp(rect.left()..=rect.right(), t);
            let color = if tick == year { ACCENT } else { MUTED };
            painter.line_segment(
                [
                    egui::pos2(x, rect.bottom() - 2.0),
                    egui::pos2(x, rect.bottom() + 3.0),
                ],
                egui::Stroke::new(1.0, color),
            );
        }

        if response.changed() && value != year.get() {
            commands.push(VizCommand::SetYear(Year::new(i32::from(value))));
        }
    });
}

fn info_panel(ui: &mut egui::Ui, state: &VizState) {
    egui::Frame::NONE
        .fill(Color32::from_rgba_premultiplied(30, 41, 59, 200))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(Margin::same(8))
        .show(ui, |ui| {
            let title = ui.label(RichText::new(info::title(state.data_type)).color(ACCENT).strong());
            if let Some(about) = info::data_type_info(state.data_type) {
                title.on_hover_text(about.details);
            }
            ui.label(info::year_story(state.year));
            ui.label(RichText::new(info::description(state.data_type)).color(MUTED).small());

            let entries = info::visible_legend_entries(state.data_type, state.show_legend);
            if let Some((heading, _)) = info::legend(state.data_type)
                && !entries.is_empty()
            {
                ui.add_space(4.0);
                ui.label(RichText::new(heading).color(LEGEND_HEADING).small());
                legend_grid(ui, entries);
            }
        });
}

fn legend_grid(ui: &mut egui::Ui, entries: &[info::LegendEntry]) {
    egui::Grid::new("legend_grid")
        .num_columns(4)
        .spacing([12.0, 2.0])
        .show(ui, |ui| {
            for (index, entry) in entries.iter().enumerate() {
                ui.horizontal(|ui| {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                    let [r, g, b] = entry.rgb;
                    ui.painter()
                        .rect_filled(rect, CornerRadius::same(2), Color32::from_rgb(r, g, b));
                    ui.label(RichText::new(entry.label).small());
                });
                if index % 4 == 3 {
                    ui.end_row();
                }
            }
        });
}

fn focus_hint(mode: CameraMode) -> &'static str {
    match mode {
        CameraMode::Initial => "Overview, drag or scroll to take over",
        CameraMode::AutoFollow => "Click Earth to focus",
        CameraMode::Focused => "Click Earth again to release",
    }
}
