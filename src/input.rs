//! Keyboard shortcuts.
//!
//! Every shortcut goes through the simulation's control surface or the
//! view transform; nothing here touches body state.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::{ViewTransform, PAN_STEP};
use crate::render::OrbitPathSettings;
use crate::simulation::Simulation;
use crate::time::real_now_nanos;
use crate::types::{SimulationSet, TIME_SCALE_PRESETS};
use crate::ui::UiState;

/// Smallest nonzero scale the keys produce. `]` starts here from zero and
/// `[` drops to zero below it.
const SCALE_FLOOR: f64 = 0.1;

/// Digit keys in order; `Shift` with the n-th toggles the n-th body.
const DIGITS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(Update, keyboard_shortcuts.before(SimulationSet::Advance));
    }
}

/// Handle keyboard shortcuts for simulation and view control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time<Real>>,
    mut contexts: EguiContexts,
    mut simulation: ResMut<Simulation>,
    mut view: ResMut<ViewTransform>,
    mut orbit_settings: ResMut<OrbitPathSettings>,
    mut ui_state: ResMut<UiState>,
) {
    // Typing into an egui widget is not a shortcut
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.wants_keyboard_input() {
            return;
        }
    }

    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        simulation.toggle_pause(real_now_nanos(&time));
    }

    // Time controls: [ and ] to halve or double the speed
    if keys.just_pressed(KeyCode::BracketLeft) {
        let scale = slower_scale(simulation.time_scale());
        simulation.set_time_scale(scale);
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        let scale = faster_scale(simulation.time_scale());
        simulation.set_time_scale(scale);
    }

    // Shift+digit toggles a body; a bare digit picks a time scale preset
    let shift = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for (index, key) in DIGITS.into_iter().enumerate() {
        if !keys.just_pressed(key) {
            continue;
        }
        if shift {
            if let Some(id) = body_at_digit(&simulation, index) {
                simulation.toggle_visibility(&id);
            }
        } else if let Some(&preset) = TIME_SCALE_PRESETS.get(index) {
            simulation.set_time_scale(preset);
        }
    }

    // D and H: debug and help overlays
    if keys.just_pressed(KeyCode::KeyD) {
        ui_state.show_debug = !ui_state.show_debug;
    }
    if keys.just_pressed(KeyCode::KeyH) {
        ui_state.show_help = !ui_state.show_help;
    }

    // R: reset simulation and view
    if keys.just_pressed(KeyCode::KeyR) {
        simulation.reset();
        view.reset();
    }

    // O: orbit paths
    if keys.just_pressed(KeyCode::KeyO) {
        orbit_settings.visible = !orbit_settings.visible;
    }

    // Escape: clear selection and stop following
    if keys.just_pressed(KeyCode::Escape) {
        simulation.focus(None);
        view.release();
    }

    // F: fly back to the selected body
    if keys.just_pressed(KeyCode::KeyF) {
        if let Some(body) = simulation.focused() {
            let target = body.position().truncate().as_vec2();
            view.focus_on(body.id(), target);
        }
    }

    // Arrows: pan by a fixed screen distance
    let mut direction = Vec2::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    if direction != Vec2::ZERO {
        let step = PAN_STEP * view.world_per_pixel();
        view.pan_by(direction * step);
    }

    // Plus/Equal and Minus: zoom
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        view.zoom_by(1.0);
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        view.zoom_by(-1.0);
    }
}

/// Id of the body a digit selects, in roster order.
fn body_at_digit(simulation: &Simulation, index: usize) -> Option<String> {
    simulation.bodies().get(index).map(|body| body.id().to_string())
}

/// Half the current scale, or zero once that falls below the floor.
fn slower_scale(current: f64) -> f64 {
    let halved = current * 0.5;
    if halved < SCALE_FLOOR { 0.0 } else { halved }
}

/// Double the current scale, starting from the floor when frozen.
fn faster_scale(current: f64) -> f64 {
    (current * 2.0).max(SCALE_FLOOR)
}
