//! Celestial body rendering and spawning.
//!
//! One sphere per roster entry. Each body gets three unlit materials (base,
//! selected, hovered) up front; the highlight systems swap between them
//! instead of editing material assets every frame.

use bevy::prelude::*;

use crate::render::highlight::{display_color, DisplayState};
use crate::render::z_layers;
use crate::simulation::Simulation;

/// Component linking a rendered entity to its roster entry.
#[derive(Component, Debug)]
pub struct BodyVisual {
    /// Roster index in the simulation
    pub index: usize,
    /// Stable body id
    pub id: String,
    /// Render radius in world units
    pub radius: f32,
}

/// The three display variants of one body's material.
#[derive(Component, Debug, Clone)]
pub struct BodyMaterials {
    pub base: Handle<StandardMaterial>,
    pub selected: Handle<StandardMaterial>,
    pub hovered: Handle<StandardMaterial>,
}

impl BodyMaterials {
    pub fn for_state(&self, state: DisplayState) -> &Handle<StandardMaterial> {
        match state {
            DisplayState::Normal => &self.base,
            DisplayState::Selected => &self.selected,
            DisplayState::Hovered => &self.hovered,
        }
    }
}

/// Plugin providing body spawning.
pub struct BodyRenderPlugin;

impl Plugin for BodyRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies);
    }
}

fn unlit(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    }
}

/// Spawn a sphere for every body in the roster.
fn spawn_bodies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<Simulation>,
) {
    for (index, body) in simulation.bodies().iter().enumerate() {
        // Minimum visible size so small bodies stay clickable
        let radius = (body.radius() as f32).max(1.0);
        let mesh = meshes.add(Sphere::new(radius));

        let base = body.color();
        let body_materials = BodyMaterials {
            base: materials.add(unlit(display_color(base, DisplayState::Normal))),
            selected: materials.add(unlit(display_color(base, DisplayState::Selected))),
            hovered: materials.add(unlit(display_color(base, DisplayState::Hovered))),
        };

        let position = body.position();
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(body_materials.base.clone()),
            Transform::from_xyz(position.x as f32, position.y as f32, z_layers::BODIES),
            BodyVisual {
                index,
                id: body.id().to_string(),
                radius,
            },
            body_materials,
        ));
    }

    info!("Spawned {} celestial bodies", simulation.bodies().len());
}
