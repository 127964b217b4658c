//! Rendering systems for the orrery.
//!
//! This module provides the visual representation of the roster: body
//! spheres, selection and hover feedback, and orbit paths. Everything here
//! reads the simulation; picking only goes through its control surface.

pub mod bodies;
pub mod highlight;
mod orbits;
mod sync;

use bevy::prelude::*;

use self::bodies::BodyRenderPlugin;
use self::highlight::HighlightPlugin;
use self::orbits::OrbitPathPlugin;
use self::sync::sync_body_transforms;
use crate::types::SimulationSet;

// Re-export for use in other modules
pub use self::bodies::BodyVisual;
pub use self::highlight::{display_color, DisplayState};
pub use self::orbits::OrbitPathSettings;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((BodyRenderPlugin, HighlightPlugin, OrbitPathPlugin))
            .add_systems(Update, sync_body_transforms.in_set(SimulationSet::Present));
    }
}

/// Z-layer constants for rendering order.
pub mod z_layers {
    /// Orbit paths.
    pub const ORBITS: f32 = 1.0;
    /// Celestial bodies.
    pub const BODIES: f32 = 2.0;
    /// Selection ring.
    pub const HIGHLIGHT: f32 = 4.0;
}
