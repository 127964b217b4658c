//! Celestial body state.
//!
//! A [`Body`] carries immutable physical attributes from its descriptor plus
//! the kinematic state the physics models mutate every tick. Only the
//! simulation controller writes that state; everything else reads it.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use bevy::prelude::Color;

use crate::data::BodyDescriptor;
use crate::orbit::{normalize_phase, OrbitalElements};

/// Broad classification of a body, parsed from the descriptor `type` field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Star,
    Planet,
    DwarfPlanet,
    /// Moons and other bodies orbiting a non-star parent
    Satellite,
    /// Any other label, kept verbatim for display
    Other(String),
}

impl BodyKind {
    /// Parse a descriptor `type` label (case-insensitive).
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_ascii_lowercase().replace(['_', '-', ' '], "");
        match normalized.as_str() {
            "star" | "sun" => BodyKind::Star,
            "planet" => BodyKind::Planet,
            "dwarfplanet" | "dwarf" => BodyKind::DwarfPlanet,
            "moon" | "satellite" => BodyKind::Satellite,
            _ => BodyKind::Other(label.trim().to_string()),
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &str {
        match self {
            BodyKind::Star => "Star",
            BodyKind::Planet => "Planet",
            BodyKind::DwarfPlanet => "Dwarf planet",
            BodyKind::Satellite => "Satellite",
            BodyKind::Other(label) => label,
        }
    }
}

/// Axial rotation of a body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    /// Seconds per full turn (always positive)
    pub period: f64,
}

impl Rotation {
    /// Radians per second.
    pub fn angular_speed(&self) -> f64 {
        TAU / self.period
    }
}

/// A simulated celestial object.
#[derive(Clone, Debug)]
pub struct Body {
    id: String,
    name: String,
    kind: BodyKind,
    /// Mass (kg); immutable after construction
    mass: f64,
    /// Physical radius in scene units; immutable after construction
    radius: f64,
    color: Color,
    orbit: OrbitalElements,
    /// Index of the parent body in the controller's roster
    parent: Option<usize>,
    rotation: Option<Rotation>,

    /// Descriptor-derived state at zero elapsed time
    initial_position: DVec3,
    initial_velocity: DVec3,

    pub(crate) position: DVec3,
    pub(crate) velocity: DVec3,
    /// Accumulated orbital phase angle in [0, 2π)
    pub(crate) phase: f64,
    /// Spin angle in [0, 2π)
    pub(crate) spin: f64,

    pub(crate) visible: bool,
    pub(crate) selected: bool,
    pub(crate) hovered: bool,
}

impl Body {
    /// Build a body from a validated descriptor.
    ///
    /// `parent` is the roster index and the already-built parent body; the
    /// initial state of a satellite is offset from its parent's initial state.
    pub fn new(descriptor: BodyDescriptor, parent: Option<(usize, &Body)>) -> Self {
        let BodyDescriptor {
            id,
            name,
            kind,
            mass,
            radius,
            color,
            orbit,
            rotation,
            ..
        } = descriptor;

        let (center, center_velocity) = parent
            .map(|(_, p)| (p.initial_position, p.initial_velocity))
            .unwrap_or((DVec3::ZERO, DVec3::ZERO));

        let phase = orbit.initial_phase;
        let initial_position = center + orbit.local_position(phase);
        let initial_velocity = center_velocity + orbit.local_velocity(phase);

        Self {
            id,
            name,
            kind,
            mass,
            radius,
            color,
            orbit,
            parent: parent.map(|(index, _)| index),
            rotation,
            initial_position,
            initial_velocity,
            position: initial_position,
            velocity: initial_velocity,
            phase,
            spin: 0.0,
            visible: true,
            selected: false,
            hovered: false,
        }
    }

    /// Restore the zero-elapsed-time state and clear display flags.
    ///
    /// Visibility is left alone; it is a user choice, not simulation state.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = self.initial_velocity;
        self.phase = self.orbit.initial_phase;
        self.spin = 0.0;
        self.selected = false;
        self.hovered = false;
    }

    /// Advance the spin angle by `dt` simulated seconds.
    pub(crate) fn advance_spin(&mut self, dt: f64) {
        if let Some(rotation) = self.rotation {
            self.spin = normalize_phase(self.spin + rotation.angular_speed() * dt);
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &BodyKind {
        &self.kind
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Base display color; see `render::highlight::display_color` for the
    /// selection/hover variants.
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn orbit(&self) -> &OrbitalElements {
        &self.orbit
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn rotation(&self) -> Option<Rotation> {
        self.rotation
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn velocity(&self) -> DVec3 {
        self.velocity
    }

    /// Current orbital phase angle in radians.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Current spin angle in radians.
    pub fn spin(&self) -> f64 {
        self.spin
    }

    pub fn initial_position(&self) -> DVec3 {
        self.initial_position
    }

    pub fn initial_velocity(&self) -> DVec3 {
        self.initial_velocity
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}
