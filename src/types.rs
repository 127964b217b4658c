//! Core simulation types and constants.

use bevy::prelude::*;

/// System set for ordering simulation-related systems.
///
/// Everything that reads body state for display runs after the advance step,
/// so a frame never observes a half-updated roster.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Clock tick and physics step (runs first)
    Advance,
    /// Transform sync, color mapping, orbit paths
    Present,
}

/// Gravitational constant (m³·kg⁻¹·s⁻²)
pub const G: f64 = 6.67430e-11;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Nanoseconds per second, for timestamp conversion
pub const NANOS_PER_SECOND: f64 = 1e9;

/// Largest accepted time scale multiplier.
pub const MAX_TIME_SCALE: f64 = 100.0;

/// Smallest accepted time scale multiplier (a frozen clock, not a pause).
pub const MIN_TIME_SCALE: f64 = 0.0;

/// Changes to the time scale below this threshold are treated as float noise.
pub const TIME_SCALE_EPSILON: f64 = 1e-4;

/// Quick-select time scales (keys 1-4 and the preset buttons).
pub const TIME_SCALE_PRESETS: [f64; 4] = [0.1, 1.0, 10.0, 100.0];

/// Simulation time state owned by the controller.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationTime {
    /// Accumulated simulated seconds since start or the last reset
    pub elapsed: f64,
    /// Time scale multiplier (1.0 = one simulated second per real second)
    pub scale: f64,
    /// Whether simulation is paused
    pub paused: bool,
}

impl Default for SimulationTime {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            scale: 1.0,
            paused: false,
        }
    }
}

impl SimulationTime {
    /// Return to the start-of-session state: running at 1x from zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Simulated seconds produced by `real_seconds` of wall time.
    pub fn scaled(&self, real_seconds: f64) -> f64 {
        real_seconds * self.scale
    }

    /// Accumulated time in minutes, for display.
    pub fn minutes(&self) -> f64 {
        self.elapsed / 60.0
    }
}

/// Format accumulated simulated seconds as `HHH:MM:SS`.
pub fn format_elapsed(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;
    format!("{:03}:{:02}:{:02}", hours, minutes, secs)
}
