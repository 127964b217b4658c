//! Closed-form eccentric orbits for the kinematic visualization path.
//!
//! Positions come straight from the conic equation in polar form, driven by an
//! accumulated phase angle instead of a Kepler-equation solve. Inclination is
//! applied as a foreshortening of the X axis only: this is a 2D projection
//! for display, not a rotation of the orbital plane.

use std::f64::consts::TAU;

use bevy::math::DVec3;

use crate::types::DEG_TO_RAD;

/// Largest eccentricity accepted; `e = 1` would divide by zero at θ = π.
pub const MAX_ECCENTRICITY: f64 = 0.999;

/// Static parameters of a closed-form orbit.
/// Angles in radians, angular speed in radians per simulated second.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in scene units (0 = body sits on its center)
    pub semi_major_axis: f64,
    /// Eccentricity, clamped to [0, MAX_ECCENTRICITY]
    pub eccentricity: f64,
    /// Inclination in radians (X-axis foreshortening)
    pub inclination: f64,
    /// Mean angular speed in radians per second (may be zero or negative)
    pub angular_speed: f64,
    /// Phase angle at zero elapsed time, radians in [0, 2π)
    pub initial_phase: f64,
}

impl Default for OrbitalElements {
    fn default() -> Self {
        Self::stationary()
    }
}

impl OrbitalElements {
    /// Create orbital elements, clamping out-of-range values.
    ///
    /// # Arguments
    /// * `semi_major_axis` - Semi-major axis in scene units (negative treated as 0)
    /// * `eccentricity` - Clamped to `[0, MAX_ECCENTRICITY]`
    /// * `inclination` - Inclination in radians
    /// * `angular_speed` - Radians per second
    /// * `initial_phase` - Starting phase angle in radians (normalized)
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        angular_speed: f64,
        initial_phase: f64,
    ) -> Self {
        Self {
            semi_major_axis: semi_major_axis.max(0.0),
            eccentricity: clamp_eccentricity(eccentricity),
            inclination,
            angular_speed,
            initial_phase: normalize_phase(initial_phase),
        }
    }

    /// Create orbital elements with the inclination given in degrees.
    pub fn from_degrees(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        angular_speed: f64,
        initial_phase: f64,
    ) -> Self {
        Self::new(
            semi_major_axis,
            eccentricity,
            inclination_deg * DEG_TO_RAD,
            angular_speed,
            initial_phase,
        )
    }

    /// A body parked on its center (stars, fixed markers).
    pub fn stationary() -> Self {
        Self {
            semi_major_axis: 0.0,
            eccentricity: 0.0,
            inclination: 0.0,
            angular_speed: 0.0,
            initial_phase: 0.0,
        }
    }

    /// Whether the orbit never moves its body away from the center.
    pub fn is_stationary(&self) -> bool {
        self.semi_major_axis == 0.0
    }

    /// Semi-latus rectum a·(1 − e²).
    fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    /// Distance from the center at the given phase: r = a(1−e²)/(1 + e·cos θ).
    pub fn radius_at(&self, phase: f64) -> f64 {
        if self.is_stationary() {
            return 0.0;
        }
        self.semi_latus_rectum() / (1.0 + self.eccentricity * phase.cos())
    }

    /// Offset from the orbit center at the given phase.
    pub fn local_position(&self, phase: f64) -> DVec3 {
        let r = self.radius_at(phase);
        let base_x = r * phase.cos();
        let base_y = r * phase.sin();
        DVec3::new(base_x * self.inclination.cos(), base_y, 0.0)
    }

    /// Velocity relative to the orbit center at the given phase.
    ///
    /// Derivative of [`local_position`](Self::local_position) with respect to
    /// time, assuming the phase advances at the constant angular speed.
    pub fn local_velocity(&self, phase: f64) -> DVec3 {
        if self.is_stationary() || self.angular_speed == 0.0 {
            return DVec3::ZERO;
        }

        let e = self.eccentricity;
        let (sin, cos) = phase.sin_cos();
        let denom = 1.0 + e * cos;
        let r = self.semi_latus_rectum() / denom;
        // dr/dθ
        let dr = self.semi_latus_rectum() * e * sin / (denom * denom);

        let dx = (dr * cos - r * sin) * self.inclination.cos();
        let dy = dr * sin + r * cos;
        DVec3::new(dx, dy, 0.0) * self.angular_speed
    }

    /// Advance a phase angle by `dt` simulated seconds, wrapping into [0, 2π).
    pub fn advance_phase(&self, phase: f64, dt: f64) -> f64 {
        normalize_phase(phase + self.angular_speed * dt)
    }

    /// Orbital period in seconds, or `None` for a static body.
    pub fn period(&self) -> Option<f64> {
        if self.angular_speed == 0.0 {
            None
        } else {
            Some(TAU / self.angular_speed.abs())
        }
    }

    /// Sample the full orbit path (relative to its center) for drawing.
    pub fn path(&self, segments: usize) -> Vec<DVec3> {
        let segments = segments.max(3);
        (0..=segments)
            .map(|i| self.local_position(TAU * i as f64 / segments as f64))
            .collect()
    }
}

/// Clamp eccentricity into the range the closed-form equation tolerates.
pub fn clamp_eccentricity(eccentricity: f64) -> f64 {
    if eccentricity.is_nan() {
        return 0.0;
    }
    eccentricity.clamp(0.0, MAX_ECCENTRICITY)
}

/// Wrap an angle into [0, 2π).
pub fn normalize_phase(phase: f64) -> f64 {
    if !phase.is_finite() {
        return 0.0;
    }
    let wrapped = phase.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles.
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_phase(a - b);
    d.min(TAU - d)
}
