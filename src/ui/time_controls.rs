//! Time controls panel at the bottom of the screen.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::ViewTransform;
use crate::render::OrbitPathSettings;
use crate::simulation::Simulation;
use crate::time::real_now_nanos;
use crate::types::{format_elapsed, TIME_SCALE_PRESETS};

use super::panel_frame;

/// Slider floor; a zero scale is still reachable through the keyboard.
const SLIDER_MIN_SCALE: f64 = 0.1;

/// System that renders the time controls panel.
pub fn time_controls_panel(
    mut contexts: EguiContexts,
    time: Res<Time<Real>>,
    mut simulation: ResMut<Simulation>,
    mut view: ResMut<ViewTransform>,
    mut orbit_settings: ResMut<OrbitPathSettings>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("time_controls")
        .frame(panel_frame(egui::Margin::symmetric(16, 8)))
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                // Play/Pause button
                let paused = simulation.is_paused();
                let icon = if paused { "\u{25B6}" } else { "\u{23F8}" };
                if ui
                    .button(icon)
                    .on_hover_text(if paused { "Play (Space)" } else { "Pause (Space)" })
                    .clicked()
                {
                    simulation.toggle_pause(real_now_nanos(&time));
                }

                ui.separator();

                ui.label(egui::RichText::new(format_elapsed(simulation.elapsed())).monospace());

                ui.separator();

                // Presets (mutually exclusive)
                ui.label("Speed:");
                for (i, preset) in TIME_SCALE_PRESETS.iter().enumerate() {
                    let is_selected = (simulation.time_scale() - preset).abs() < 1e-3;
                    if ui
                        .selectable_label(is_selected, format!("{preset}x"))
                        .on_hover_text(format!("Set time scale ({})", i + 1))
                        .clicked()
                    {
                        simulation.set_time_scale(*preset);
                    }
                }

                let mut scale = simulation.time_scale().max(SLIDER_MIN_SCALE);
                if ui
                    .add(
                        egui::Slider::new(&mut scale, SLIDER_MIN_SCALE..=100.0)
                            .logarithmic(true)
                            .suffix("x")
                            .max_decimals(1),
                    )
                    .changed()
                {
                    simulation.set_time_scale(scale);
                }

                ui.separator();

                if ui
                    .button("\u{21BA}")
                    .on_hover_text("Reset simulation (R)")
                    .clicked()
                {
                    simulation.reset();
                    view.reset();
                }

                ui.checkbox(&mut orbit_settings.visible, "Orbits")
                    .on_hover_text("Show orbit paths (O)");

                ui.separator();

                ui.label(
                    egui::RichText::new(format!(
                        "{} | {}",
                        simulation.model().name(),
                        simulation.status_message()
                    ))
                    .small()
                    .color(egui::Color32::GRAY),
                );
            });
        });
}
