//! Body descriptors: the raw JSON shape and its validated form.
//!
//! Raw descriptors mirror the document with every field optional so a
//! single bad entry can be reported and skipped instead of failing the
//! whole file.

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::body::{BodyKind, Rotation};
use crate::orbit::{clamp_eccentricity, OrbitalElements};
use crate::types::DEG_TO_RAD;

/// Display color used when a descriptor has none.
pub const DEFAULT_BODY_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

/// A per-body problem found while validating descriptors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("body #{index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },

    #[error("body '{body}' is missing required field '{field}'")]
    MissingField { body: String, field: &'static str },

    #[error("body '{body}' has no orbit")]
    MissingOrbit { body: String },

    #[error("body '{body}' has invalid {field}: {value}")]
    InvalidValue {
        body: String,
        field: &'static str,
        value: f64,
    },

    #[error("body '{body}' has invalid color '{color}'")]
    InvalidColor { body: String, color: String },

    #[error("duplicate body id '{body}'")]
    DuplicateId { body: String },

    #[error("body '{body}' references unknown parent '{parent}'")]
    UnknownParent { body: String, parent: String },

    #[error("body '{body}' is part of a parent cycle")]
    DependencyCycle { body: String },
}

/// Orbit block as written in the document.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawOrbit {
    pub semi_major_axis: Option<f64>,
    pub eccentricity: Option<f64>,
    /// Degrees
    pub inclination: Option<f64>,
    /// Seconds per revolution
    pub period: Option<f64>,
    /// Radians per second; wins over `period`
    pub angular_speed: Option<f64>,
    /// Radians
    pub initial_angle: Option<f64>,
    /// Overrides `semiMajorAxis` when positive
    pub radius: Option<f64>,
}

/// Rotation block as written in the document.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawRotation {
    pub period: Option<f64>,
}

/// One entry of `celestialBodies` as written in the document.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBodyDescriptor {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mass: Option<f64>,
    pub radius: Option<f64>,
    pub color: Option<String>,
    pub parent: Option<String>,
    pub orbit: Option<RawOrbit>,
    pub rotation: Option<RawRotation>,
}

/// A validated body descriptor, ready to construct a [`crate::body::Body`].
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDescriptor {
    pub id: String,
    pub name: String,
    pub kind: BodyKind,
    pub mass: f64,
    pub radius: f64,
    pub color: Color,
    /// Id of the body this one orbits
    pub parent: Option<String>,
    pub orbit: OrbitalElements,
    pub rotation: Option<Rotation>,
}

impl BodyDescriptor {
    /// Descriptor with a gray color, no parent and no rotation.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: BodyKind,
        mass: f64,
        radius: f64,
        orbit: OrbitalElements,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            mass,
            radius,
            color: DEFAULT_BODY_COLOR,
            parent: None,
            orbit,
            rotation: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_rotation(mut self, period: f64) -> Self {
        self.rotation = Some(Rotation { period });
        self
    }
}

impl RawBodyDescriptor {
    /// Best label for error messages before the id is known to be valid.
    fn label(&self) -> String {
        non_empty(&self.id)
            .or_else(|| non_empty(&self.name))
            .unwrap_or("<unnamed>")
            .to_string()
    }

    /// Check required fields and ranges, producing a validated descriptor.
    pub fn validate(self) -> Result<BodyDescriptor, ConfigurationError> {
        let label = self.label();
        let missing = |field| ConfigurationError::MissingField {
            body: label.clone(),
            field,
        };

        let id = non_empty(&self.id).ok_or_else(|| missing("id"))?.to_string();
        let name = non_empty(&self.name).ok_or_else(|| missing("name"))?.to_string();
        let kind = non_empty(&self.kind)
            .map(BodyKind::from_label)
            .ok_or_else(|| missing("type"))?;

        let raw_orbit = self
            .orbit
            .as_ref()
            .ok_or_else(|| ConfigurationError::MissingOrbit { body: id.clone() })?;

        let radius = self.radius.ok_or_else(|| missing("radius"))?;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(invalid(&id, "radius", radius));
        }

        let mass = self.mass.unwrap_or(0.0);
        if !mass.is_finite() || mass < 0.0 {
            return Err(invalid(&id, "mass", mass));
        }

        let color = match non_empty(&self.color) {
            None => DEFAULT_BODY_COLOR,
            Some(hex) => parse_color(hex).ok_or_else(|| ConfigurationError::InvalidColor {
                body: id.clone(),
                color: hex.to_string(),
            })?,
        };

        let orbit = validate_orbit(&id, raw_orbit)?;

        let rotation = match self.rotation.as_ref().and_then(|r| r.period) {
            Some(period) if !period.is_finite() || period < 0.0 => {
                return Err(invalid(&id, "rotation.period", period));
            }
            Some(period) if period > 0.0 => Some(Rotation { period }),
            _ => None,
        };

        let parent = non_empty(&self.parent).map(str::to_string);

        Ok(BodyDescriptor {
            id,
            name,
            kind,
            mass,
            radius,
            color,
            parent,
            orbit,
            rotation,
        })
    }
}

fn validate_orbit(id: &str, raw: &RawOrbit) -> Result<OrbitalElements, ConfigurationError> {
    let finite = |field: &'static str, value: Option<f64>| -> Result<f64, ConfigurationError> {
        let value = value.unwrap_or(0.0);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(id, field, value))
        }
    };

    let semi_major_axis = finite("orbit.semiMajorAxis", raw.semi_major_axis)?;
    let override_radius = finite("orbit.radius", raw.radius)?;
    let axis = if override_radius > 0.0 {
        override_radius
    } else {
        semi_major_axis
    };
    if axis < 0.0 {
        return Err(invalid(id, "orbit.semiMajorAxis", axis));
    }

    let eccentricity = finite("orbit.eccentricity", raw.eccentricity)?;
    let clamped = clamp_eccentricity(eccentricity);
    if clamped != eccentricity {
        warn!(
            "Body '{}': eccentricity {} clamped to {}",
            id, eccentricity, clamped
        );
    }

    let inclination = finite("orbit.inclination", raw.inclination)? * DEG_TO_RAD;
    let initial_angle = finite("orbit.initialAngle", raw.initial_angle)?;

    let angular_speed = match raw.angular_speed {
        Some(speed) => finite("orbit.angularSpeed", Some(speed))?,
        None => {
            let period = finite("orbit.period", raw.period)?;
            if period < 0.0 {
                return Err(invalid(id, "orbit.period", period));
            }
            if period > 0.0 {
                std::f64::consts::TAU / period
            } else {
                0.0
            }
        }
    };

    Ok(OrbitalElements::new(
        axis,
        clamped,
        inclination,
        angular_speed,
        initial_angle,
    ))
}

/// Parse `#RRGGBB` (leading `#` optional).
pub fn parse_color(hex: &str) -> Option<Color> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    Srgba::hex(digits).ok().map(Color::Srgba)
}

fn invalid(body: &str, field: &'static str, value: f64) -> ConfigurationError {
    ConfigurationError::InvalidValue {
        body: body.to_string(),
        field,
        value,
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
