//! Info panel showing the body list and the selected body's state.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::body::Body;
use crate::camera::ViewTransform;
use crate::simulation::Simulation;
use crate::types::RAD_TO_DEG;

use super::{panel_frame, swatch, UiState};

/// Indentation per satellite level in the body list.
const INDENT: f32 = 16.0;

/// What the user asked for while the list was drawn.
enum ListAction {
    Focus(String),
    ToggleVisibility(String),
}

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    mut simulation: ResMut<Simulation>,
    mut view: ResMut<ViewTransform>,
    mut ui_state: ResMut<UiState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    if !ui_state.info_panel_open {
        // Collapsed state - show expand button
        egui::SidePanel::right("info_expand")
            .resizable(false)
            .exact_width(28.0)
            .frame(panel_frame(egui::Margin::same(6)))
            .show(ctx, |ui| {
                if ui.button("\u{25C0}").on_hover_text("Expand panel").clicked() {
                    ui_state.info_panel_open = true;
                }
            });
        return;
    }

    let mut actions = Vec::new();

    egui::SidePanel::right("info_panel")
        .resizable(false)
        .default_width(220.0)
        .frame(panel_frame(egui::Margin::same(12)))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("\u{25B6}").on_hover_text("Collapse panel").clicked() {
                    ui_state.info_panel_open = false;
                }
                ui.heading("Bodies");
            });

            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() * 0.5)
                .show(ui, |ui| {
                    for (index, depth) in list_order(simulation.bodies()) {
                        let body = &simulation.bodies()[index];
                        ui.horizontal(|ui| {
                            ui.add_space(INDENT * depth as f32);
                            body_row(ui, body, &mut actions);
                        });
                    }
                });

            ui.separator();

            match simulation.focused() {
                Some(body) => {
                    ui.heading(body.name());
                    ui.add_space(4.0);
                    body_details(ui, body, simulation.parent_of(body));
                }
                None => {
                    ui.label("Select a body from the list above.");
                }
            }
        });

    for action in actions {
        match action {
            ListAction::Focus(id) => {
                let target = simulation
                    .body(&id)
                    .map(|body| body.position().truncate().as_vec2());
                if let Some(target) = target {
                    if simulation.focus(Some(&id)) {
                        view.focus_on(id, target);
                    }
                }
            }
            ListAction::ToggleVisibility(id) => {
                simulation.toggle_visibility(&id);
            }
        }
    }
}

/// Bodies in display order: each root followed by its satellites, depth
/// first, with the nesting depth of each entry.
fn list_order(bodies: &[Body]) -> Vec<(usize, usize)> {
    fn visit(bodies: &[Body], parent: Option<usize>, depth: usize, out: &mut Vec<(usize, usize)>) {
        for (index, body) in bodies.iter().enumerate() {
            if body.parent() == parent {
                out.push((index, depth));
                visit(bodies, Some(index), depth + 1, out);
            }
        }
    }

    let mut out = Vec::with_capacity(bodies.len());
    visit(bodies, None, 0, &mut out);
    out
}

/// One row of the body list: visibility checkbox, color swatch, name.
fn body_row(ui: &mut egui::Ui, body: &Body, actions: &mut Vec<ListAction>) {
    let mut visible = body.is_visible();
    if ui
        .checkbox(&mut visible, "")
        .on_hover_text("Show or hide")
        .changed()
    {
        actions.push(ListAction::ToggleVisibility(body.id().to_string()));
    }

    ui.colored_label(swatch(body.color()), "\u{25CF}");

    if ui.selectable_label(body.is_selected(), body.name()).clicked() {
        actions.push(ListAction::Focus(body.id().to_string()));
    }
}

fn body_details(ui: &mut egui::Ui, body: &Body, parent: Option<&Body>) {
    ui.label(format!("Type: {}", body.kind().label()));
    ui.label(format!("Mass: {:.3e}", body.mass()));
    ui.label(format!("Radius: {:.1}", body.radius()));

    if let Some(parent) = parent {
        ui.label(format!("Orbits: {}", parent.name()));
    }

    ui.add_space(8.0);

    let position = body.position();
    let velocity = body.velocity();
    ui.label("Position:");
    ui.label(format!("  X: {:.2}", position.x));
    ui.label(format!("  Y: {:.2}", position.y));
    ui.label("Velocity:");
    ui.label(format!("  X: {:.4}", velocity.x));
    ui.label(format!("  Y: {:.4}", velocity.y));
    ui.label(format!("Speed: {:.4}", velocity.length()));

    let orbit = body.orbit();
    if !orbit.is_stationary() {
        ui.add_space(8.0);
        ui.label("Orbit:");
        ui.label(format!("  a: {:.1}", orbit.semi_major_axis));
        ui.label(format!("  e: {:.3}", orbit.eccentricity));
        ui.label(format!("  i: {:.1}\u{00B0}", orbit.inclination * RAD_TO_DEG));
        ui.label(format!("  Phase: {:.1}\u{00B0}", body.phase() * RAD_TO_DEG));
        if let Some(period) = orbit.period() {
            ui.label(format!("  Period: {:.0} s", period));
        }
    }

    if let Some(rotation) = body.rotation() {
        ui.add_space(8.0);
        ui.label(format!("Day length: {:.0} s", rotation.period));
        ui.label(format!("Spin: {:.1}\u{00B0}", body.spin() * RAD_TO_DEG));
    }

    if !body.is_visible() {
        ui.add_space(8.0);
        ui.colored_label(egui::Color32::GRAY, "Hidden (frozen)");
    }
}
