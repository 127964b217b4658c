//! Hover and selection for celestial bodies.
//!
//! Picking turns the cursor into a world position and asks the simulation
//! to flag the body under it. Colors are a pure function of the flags,
//! recomputed every frame.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::{MainCamera, ViewTransform};
use crate::render::bodies::{BodyMaterials, BodyVisual};
use crate::render::z_layers;
use crate::simulation::Simulation;
use crate::types::SimulationSet;

/// Brightening factor per step, as a divisor of each channel.
const BRIGHTER_FACTOR: f32 = 0.7;

/// Minimum pick radius in screen pixels.
const MIN_PICK_PIXELS: f32 = 6.0;

/// How a body should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayState {
    Normal,
    Selected,
    Hovered,
}

impl DisplayState {
    /// Selection wins over hover.
    pub fn from_flags(selected: bool, hovered: bool) -> Self {
        if selected {
            DisplayState::Selected
        } else if hovered {
            DisplayState::Hovered
        } else {
            DisplayState::Normal
        }
    }
}

/// Scale each color channel up by one brightening step, keeping alpha.
pub fn brighter(color: Color) -> Color {
    let srgba = color.to_srgba();
    Color::srgba(
        (srgba.red / BRIGHTER_FACTOR).min(1.0),
        (srgba.green / BRIGHTER_FACTOR).min(1.0),
        (srgba.blue / BRIGHTER_FACTOR).min(1.0),
        srgba.alpha,
    )
}

/// Display color for a body: one step brighter when selected, two when
/// only hovered.
pub fn display_color(base: Color, state: DisplayState) -> Color {
    match state {
        DisplayState::Normal => base,
        DisplayState::Selected => brighter(base),
        DisplayState::Hovered => brighter(brighter(base)),
    }
}

/// Plugin providing hover, click selection and the selection ring.
pub struct HighlightPlugin;

impl Plugin for HighlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (detect_hover, select_on_click)
                .chain()
                .after(SimulationSet::Advance)
                .before(SimulationSet::Present),
        )
        .add_systems(
            Update,
            (apply_display_materials, draw_selection_ring).in_set(SimulationSet::Present),
        );
    }
}

/// Cursor position in world coordinates, if the cursor is over the scene.
fn cursor_world_position(
    window_query: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = window_query.single().ok()?;
    let cursor = window.cursor_position()?;
    let (camera, camera_transform) = camera_query.single().ok()?;
    camera.viewport_to_world_2d(camera_transform, cursor).ok()
}

/// Flag the body under the cursor as hovered.
fn detect_hover(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut contexts: EguiContexts,
    view: Res<ViewTransform>,
    bodies: Query<&BodyVisual>,
    mut simulation: ResMut<Simulation>,
) {
    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false);

    let Some(world_pos) = cursor_world_position(&window_query, &camera_query).filter(|_| !over_ui)
    else {
        simulation.set_hovered(None);
        return;
    };

    let min_radius = MIN_PICK_PIXELS * view.world_per_pixel();
    let mut closest: Option<(&str, f32)> = None;

    for visual in bodies.iter() {
        let Some(body) = simulation.bodies().get(visual.index) else {
            continue;
        };
        if !body.is_visible() {
            continue;
        }

        let body_pos = body.position().truncate().as_vec2();
        let dist = (world_pos - body_pos).length();
        let hit_radius = visual.radius.max(min_radius);

        if dist < hit_radius && closest.is_none_or(|(_, d)| dist < d) {
            closest = Some((visual.id.as_str(), dist));
        }
    }

    let hovered = closest.map(|(id, _)| id.to_string());
    simulation.set_hovered(hovered.as_deref());
}

/// Left click on a hovered body selects it and moves the view to it.
fn select_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    mut simulation: ResMut<Simulation>,
    mut view: ResMut<ViewTransform>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Some((id, target)) = simulation
        .hovered()
        .map(|body| (body.id().to_string(), body.position().truncate().as_vec2()))
    else {
        return;
    };

    if simulation.focus(Some(&id)) {
        view.focus_on(id, target);
    }
}

/// Swap each body's material to match its selection and hover flags.
fn apply_display_materials(
    simulation: Res<Simulation>,
    mut query: Query<(&BodyVisual, &BodyMaterials, &mut MeshMaterial3d<StandardMaterial>)>,
) {
    let bodies = simulation.bodies();
    for (visual, materials, mut material) in query.iter_mut() {
        let Some(body) = bodies.get(visual.index) else {
            continue;
        };
        let state = DisplayState::from_flags(body.is_selected(), body.is_hovered());
        let wanted = materials.for_state(state);
        if material.0 != *wanted {
            material.0 = wanted.clone();
        }
    }
}

/// Draw a ring around the selected body.
fn draw_selection_ring(mut gizmos: Gizmos, simulation: Res<Simulation>, view: Res<ViewTransform>) {
    let Some(body) = simulation.focused().filter(|b| b.is_visible()) else {
        return;
    };

    let ring_radius = (body.radius() as f32).max(4.0 * view.world_per_pixel()) * 1.5;
    let position = body.position();
    let center = Vec3::new(position.x as f32, position.y as f32, z_layers::HIGHLIGHT);
    let color = Color::srgba(0.0, 1.0, 1.0, 0.8);

    // Draw circle using line segments
    let segments = 32;
    for i in 0..segments {
        let t0 = (i as f32 / segments as f32) * std::f32::consts::TAU;
        let t1 = ((i + 1) as f32 / segments as f32) * std::f32::consts::TAU;

        let p0 = center + Vec3::new(ring_radius * t0.cos(), ring_radius * t0.sin(), 0.0);
        let p1 = center + Vec3::new(ring_radius * t1.cos(), ring_radius * t1.sin(), 0.0);

        gizmos.line(p0, p1, color);
    }
}
