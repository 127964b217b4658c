//! Simulation configuration.
//!
//! Defaults describe the desktop session: kinematic model, the user roster
//! file as primary source and the built-in roster as fallback. Environment
//! variables override individual settings.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::data::{DataSource, USER_DATA_PATH};
use crate::physics::PhysicsModel;

/// Selects the physics model (`kinematic` or `dynamic`).
pub const MODEL_ENV: &str = "ORRERY_MODEL";

/// Path of the primary descriptor document.
pub const DATA_ENV: &str = "ORRERY_DATA";

/// Startup configuration for the simulation.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Motion model, fixed for the session
    pub model: PhysicsModel,
    /// Descriptor document tried first
    pub primary_source: DataSource,
    /// Descriptor document used when the primary fails
    pub fallback_source: DataSource,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            model: PhysicsModel::default(),
            primary_source: DataSource::File(PathBuf::from(USER_DATA_PATH)),
            fallback_source: DataSource::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults with overrides from the process environment.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    ///
    /// Unrecognized values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(name) = lookup(MODEL_ENV) {
            match PhysicsModel::from_name(&name) {
                Some(model) => self.model = model,
                None => warn!(
                    "Ignoring {}={:?}; expected 'kinematic' or 'dynamic'",
                    MODEL_ENV, name
                ),
            }
        }

        if let Some(path) = lookup(DATA_ENV) {
            let path = path.trim();
            if path.is_empty() {
                warn!("Ignoring empty {}", DATA_ENV);
            } else {
                self.primary_source = DataSource::File(PathBuf::from(path));
            }
        }

        self
    }

    /// Use a fixed model (builder style).
    pub fn with_model(mut self, model: PhysicsModel) -> Self {
        self.model = model;
        self
    }
}
