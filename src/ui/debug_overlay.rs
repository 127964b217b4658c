//! Debug (`D`) and help (`H`) overlays in the top-left corner.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::ViewTransform;
use crate::simulation::Simulation;
use crate::types::format_elapsed;

use super::{panel_frame, UiState};

/// Keyboard shortcuts listed by the help overlay.
const SHORTCUTS: [(&str, &str); 15] = [
    ("Space", "Play/Pause"),
    ("[ / ]", "Halve/double speed"),
    ("1-4", "Speed 0.1x/1x/10x/100x"),
    ("Shift+1-9", "Show/hide the n-th body"),
    ("R", "Reset simulation and view"),
    ("O", "Orbit paths"),
    ("F", "Fly to selected body"),
    ("Esc", "Clear selection"),
    ("Arrows", "Pan"),
    ("+/-", "Zoom in/out"),
    ("Wheel", "Zoom (releases follow)"),
    ("Drag", "Pan"),
    ("Click", "Select body"),
    ("D", "Debug overlay"),
    ("H", "This help"),
];

/// Left margin shared by both overlays.
const OVERLAY_OFFSET: f32 = 10.0;

/// System that renders whichever overlays are switched on.
pub fn overlays(
    mut contexts: EguiContexts,
    simulation: Res<Simulation>,
    view: Res<ViewTransform>,
    ui_state: Res<UiState>,
) {
    if !ui_state.show_debug && !ui_state.show_help {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if ui_state.show_debug {
        egui::Window::new("Debug")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(OVERLAY_OFFSET, OVERLAY_OFFSET))
            .frame(panel_frame(egui::Margin::same(12)))
            .show(ctx, |ui| {
                for line in debug_lines(&simulation, &view) {
                    ui.monospace(line);
                }
            });
    }

    if ui_state.show_help {
        // Below the debug overlay when both are open
        let corner = if ui_state.show_debug {
            egui::Align2::LEFT_BOTTOM
        } else {
            egui::Align2::LEFT_TOP
        };
        let offset = if ui_state.show_debug {
            egui::vec2(OVERLAY_OFFSET, -60.0)
        } else {
            egui::vec2(OVERLAY_OFFSET, OVERLAY_OFFSET)
        };
        egui::Window::new("Keyboard Shortcuts")
            .collapsible(false)
            .resizable(false)
            .anchor(corner, offset)
            .frame(panel_frame(egui::Margin::same(12)))
            .show(ctx, |ui| {
                egui::Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        for (key, action) in SHORTCUTS {
                            ui.label(egui::RichText::new(key).strong().monospace());
                            ui.label(action);
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Text rows for the debug overlay: view, focus, clock, then one row per body.
fn debug_lines(simulation: &Simulation, view: &ViewTransform) -> Vec<String> {
    let pose = view.pose();
    let mut lines = vec![format!(
        "View: ({:.1}, {:.1}) zoom {:.2}{}",
        pose.center.x,
        pose.center.y,
        pose.zoom,
        if view.is_transitioning() { " (moving)" } else { "" }
    )];

    match simulation.focused() {
        Some(body) => {
            let p = body.position();
            lines.push(format!("Focus: {} ({:.1}, {:.1})", body.name(), p.x, p.y));
        }
        None => lines.push("Focus: none".to_string()),
    }

    lines.push(format!(
        "Time: {} at {}x{} [{}]",
        format_elapsed(simulation.elapsed()),
        simulation.time_scale(),
        if simulation.is_paused() { ", paused" } else { "" },
        simulation.model().name()
    ));

    lines.push("Bodies:".to_string());
    for (index, body) in simulation.bodies().iter().enumerate() {
        let state = if body.is_visible() { "shown" } else { "hidden" };
        lines.push(format!("  {}: {} {}", index + 1, body.name(), state));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::PhysicsModel;
    use crate::test_utils::fixtures;

    fn system() -> Simulation {
        Simulation::new(PhysicsModel::Kinematic, fixtures::small_system())
    }

    #[test]
    fn test_debug_lists_every_body_with_visibility() {
        let mut simulation = system();
        simulation.toggle_visibility("moon");

        let lines = debug_lines(&simulation, &ViewTransform::default());

        let bodies: Vec<_> = lines.iter().skip_while(|l| *l != "Bodies:").skip(1).collect();
        assert_eq!(bodies.len(), simulation.bodies().len());
        assert!(bodies[0].ends_with("shown"));
        assert!(bodies[2].starts_with("  3: "));
        assert!(bodies[2].ends_with("hidden"));
    }

    #[test]
    fn test_debug_reports_focus_and_view() {
        let mut simulation = system();
        let lines = debug_lines(&simulation, &ViewTransform::default());
        assert!(lines[0].starts_with("View: (0.0, 0.0)"));
        assert_eq!(lines[1], "Focus: none");

        simulation.focus(Some("earth"));
        let lines = debug_lines(&simulation, &ViewTransform::default());
        let Some(earth) = simulation.body("earth") else {
            panic!("earth should exist");
        };
        assert!(lines[1].starts_with(&format!("Focus: {} (", earth.name())));
    }

    #[test]
    fn test_debug_marks_pause() {
        let mut simulation = system();
        simulation.pause();
        let lines = debug_lines(&simulation, &ViewTransform::default());
        assert!(lines[2].contains(", paused"));
    }

    #[test]
    fn test_help_lists_overlay_keys() {
        let keys: Vec<_> = SHORTCUTS.iter().map(|(key, _)| *key).collect();
        assert!(keys.contains(&"D"));
        assert!(keys.contains(&"H"));
        assert!(keys.contains(&"Shift+1-9"));
    }
}
