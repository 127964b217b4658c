//! Motion models for the body roster.
//!
//! Two interchangeable models share one contract: given the roster and a
//! positive simulated time step, update every visible body's position and
//! velocity. The kinematic model projects bodies onto closed-form orbits;
//! the dynamic model integrates mutual Newtonian gravity.

mod gravity;
mod integrator;
mod kinematics;

#[cfg(test)]
mod proptest_physics;

pub use gravity::{acceleration_at, pairwise_accelerations, PointMass};
pub use integrator::{semi_implicit_euler, MAX_SUBSTEPS};

use crate::body::Body;
use crate::types::G;

/// Default largest dynamic substep, in simulated seconds.
pub const DEFAULT_MAX_SUBSTEP: f64 = 1.0;

/// Which motion model drives the roster.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PhysicsModel {
    /// Closed-form orbits around each body's parent
    #[default]
    Kinematic,
    /// Mutual Newtonian gravity, semi-implicit Euler
    Dynamic {
        /// G in the roster's unit system
        gravitational_constant: f64,
        /// Longest single integration step; larger ticks are subdivided
        max_substep: f64,
    },
}

impl PhysicsModel {
    /// Dynamic model with SI gravity and the default substep.
    pub fn dynamic() -> Self {
        PhysicsModel::Dynamic {
            gravitational_constant: G,
            max_substep: DEFAULT_MAX_SUBSTEP,
        }
    }

    /// Parse a model name (`kinematic` or `dynamic`, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "kinematic" | "kepler" => Some(PhysicsModel::Kinematic),
            "dynamic" | "nbody" | "n-body" => Some(Self::dynamic()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PhysicsModel::Kinematic => "kinematic",
            PhysicsModel::Dynamic { .. } => "dynamic",
        }
    }

    /// Advance the roster by `dt` simulated seconds.
    ///
    /// Hidden bodies are skipped. `bodies` must list parents before
    /// their satellites.
    pub fn step(&self, bodies: &mut [Body], dt: f64) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }
        match *self {
            PhysicsModel::Kinematic => kinematics::step(bodies, dt),
            PhysicsModel::Dynamic {
                gravitational_constant,
                max_substep,
            } => integrator::step(bodies, dt, gravitational_constant, max_substep),
        }
    }
}
