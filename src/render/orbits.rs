//! Orbit path rendering using Bevy Gizmos.
//!
//! Paths are the descriptor ellipses sampled with the same projection the
//! kinematic model uses, centered on the parent's current position. Under
//! the dynamic model they show the nominal orbit, not the integrated one.

use bevy::math::DVec3;
use bevy::prelude::*;

use crate::render::z_layers;
use crate::simulation::Simulation;
use crate::types::SimulationSet;

/// Plugin providing orbit path visualization.
pub struct OrbitPathPlugin;

impl Plugin for OrbitPathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitPathSettings>()
            .add_systems(Update, draw_orbit_paths.in_set(SimulationSet::Present));
    }
}

/// Settings for orbit path rendering.
#[derive(Resource, Debug, Clone)]
pub struct OrbitPathSettings {
    /// Whether to show orbit paths.
    pub visible: bool,
    /// Number of segments per ellipse (higher = smoother).
    pub segments: usize,
    /// Alpha applied to the body color.
    pub alpha: f32,
}

impl Default for OrbitPathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            segments: 128,
            alpha: 0.3,
        }
    }
}

/// Draw the orbit of every visible, orbiting body.
fn draw_orbit_paths(
    mut gizmos: Gizmos,
    settings: Res<OrbitPathSettings>,
    simulation: Res<Simulation>,
) {
    if !settings.visible {
        return;
    }

    for body in simulation.visible_bodies() {
        let orbit = body.orbit();
        if orbit.is_stationary() {
            continue;
        }

        let center = simulation
            .parent_of(body)
            .map(|parent| parent.position())
            .unwrap_or(DVec3::ZERO);
        let color = body.color().with_alpha(settings.alpha);

        let points = orbit.path(settings.segments).into_iter().map(|offset| {
            let p = center + offset;
            Vec3::new(p.x as f32, p.y as f32, z_layers::ORBITS)
        });
        gizmos.linestrip(points, color);
    }
}
