//! UI module providing the egui-based interface.
//!
//! Two panels: time controls along the bottom edge and a collapsible body
//! list with details on the right. Both act only through the simulation's
//! control surface and the view transform. Debug and help overlays float
//! above them when toggled from the keyboard.

mod debug_overlay;
mod info_panel;
mod time_controls;

use bevy::prelude::*;
use bevy_egui::{egui, EguiPrimaryContextPass};

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>().add_systems(
            EguiPrimaryContextPass,
            // Side panel first so the bottom bar spans the remaining width
            (
                info_panel::info_panel,
                time_controls::time_controls_panel,
                debug_overlay::overlays,
            )
                .chain(),
        );
    }
}

/// Global UI state.
#[derive(Resource, Debug)]
pub struct UiState {
    /// Whether the body panel is expanded.
    pub info_panel_open: bool,
    /// Debug overlay (`D`).
    pub show_debug: bool,
    /// Key list (`H`).
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            info_panel_open: true,
            show_debug: false,
            show_help: false,
        }
    }
}

/// Shared translucent background for all panels.
fn panel_frame(margin: egui::Margin) -> egui::Frame {
    egui::Frame::new()
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
        .inner_margin(margin)
}

/// Convert a body color into an egui swatch color.
fn swatch(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgb(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
    )
}
