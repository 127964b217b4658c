//! The simulation controller.
//!
//! [`Simulation`] owns the body roster, the frame clock and the time state.
//! Hosts drive it through a small control surface (pause, resume, reset,
//! time scale, per-frame update, visibility and focus) and read bodies back
//! through shared borrows. Nothing outside this module writes kinematic
//! state.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::body::Body;
use crate::clock::FrameClock;
use crate::config::SimulationConfig;
use crate::data::{load_document, BodyDescriptor, ConfigurationError, DataSourceError};
use crate::physics::PhysicsModel;
use crate::types::{SimulationTime, MAX_TIME_SCALE, MIN_TIME_SCALE, TIME_SCALE_EPSILON};

/// Owner of all simulation state.
#[derive(Resource, Debug)]
pub struct Simulation {
    /// Parents always precede their satellites
    bodies: Vec<Body>,
    model: PhysicsModel,
    clock: FrameClock,
    time: SimulationTime,
    focused: Option<usize>,
    hovered: Option<usize>,
    /// Descriptors skipped at construction
    rejected: Vec<ConfigurationError>,
    status_message: String,
}

impl Simulation {
    /// Build a simulation from validated descriptors.
    ///
    /// Descriptors with duplicate ids, unknown parents or parent cycles are
    /// skipped (along with anything orbiting them) and recorded in
    /// [`rejected`](Self::rejected).
    pub fn new(model: PhysicsModel, descriptors: Vec<BodyDescriptor>) -> Self {
        let (ordered, rejected) = resolve_order(descriptors);
        for err in &rejected {
            warn!("Skipping body: {}", err);
        }

        let mut bodies: Vec<Body> = Vec::with_capacity(ordered.len());
        for (descriptor, parent) in ordered {
            let body = Body::new(descriptor, parent.map(|p| (p, &bodies[p])));
            bodies.push(body);
        }

        let status_message = summarize(bodies.len(), rejected.len(), None);
        info!(
            "Simulation ready: {} bodies, {} model",
            bodies.len(),
            model.name()
        );

        Self {
            bodies,
            model,
            clock: FrameClock::new(),
            time: SimulationTime::default(),
            focused: None,
            hovered: None,
            rejected,
            status_message,
        }
    }

    /// Load descriptors from the configured sources and build a simulation.
    ///
    /// Fails only when neither source yields a readable document; invalid
    /// individual descriptors are skipped.
    pub fn load(config: &SimulationConfig) -> Result<Self, DataSourceError> {
        let loaded = load_document(&config.primary_source, &config.fallback_source)?;
        let (descriptors, mut rejected) = loaded.document.validate();

        let mut simulation = Self::new(config.model.clone(), descriptors);
        rejected.append(&mut simulation.rejected);
        simulation.rejected = rejected;

        let source = if loaded.used_fallback {
            format!("{} (fallback)", loaded.document.source)
        } else {
            loaded.document.source
        };
        simulation.status_message = summarize(
            simulation.bodies.len(),
            simulation.rejected.len(),
            Some(&source),
        );
        info!("{}", simulation.status_message);

        Ok(simulation)
    }

    // ---------------------------------------------------------------------
    // Control surface
    // ---------------------------------------------------------------------

    /// Stop advancing time. No effect when already paused.
    pub fn pause(&mut self) {
        if self.time.paused {
            return;
        }
        self.time.paused = true;
        self.clock.invalidate();
        info!("Simulation paused at t={:.1}s", self.time.elapsed);
    }

    /// Resume advancing; the next [`update`](Self::update) only re-baselines
    /// the clock. No effect when running.
    pub fn resume(&mut self) {
        if !self.time.paused {
            return;
        }
        self.time.paused = false;
        self.clock.invalidate();
        info!("Simulation resumed");
    }

    /// Resume with the clock baseline set to `now_nanos`, so an update at
    /// `now_nanos + Δ` advances exactly Δ of real time.
    pub fn resume_at(&mut self, now_nanos: u64) {
        if !self.time.paused {
            return;
        }
        self.time.paused = false;
        self.clock.rebase(now_nanos);
        info!("Simulation resumed");
    }

    /// Pause when running, resume at `now_nanos` when paused.
    /// Returns whether the simulation is paused afterwards.
    pub fn toggle_pause(&mut self, now_nanos: u64) -> bool {
        if self.time.paused {
            self.resume_at(now_nanos);
        } else {
            self.pause();
        }
        self.time.paused
    }

    /// Return to the start-of-session state: elapsed time zero, scale 1x,
    /// running, every body at its initial state, no focus.
    pub fn reset(&mut self) {
        self.time.reset();
        self.clock.invalidate();
        for body in &mut self.bodies {
            body.reset();
        }
        self.focused = None;
        self.hovered = None;
        info!("Simulation reset");
    }

    /// Set the time scale, clamped to `[0, 100]`.
    ///
    /// Non-finite input is ignored. Returns whether the scale changed.
    pub fn set_time_scale(&mut self, scale: f64) -> bool {
        if !scale.is_finite() {
            warn!("Ignoring non-finite time scale {}", scale);
            return false;
        }
        let clamped = scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
        if (clamped - self.time.scale).abs() <= TIME_SCALE_EPSILON {
            return false;
        }
        self.time.scale = clamped;
        info!("Time scale set to {}x", clamped);
        true
    }

    /// Advance the simulation to the host timestamp `now_nanos`.
    ///
    /// No-op while paused. The whole roster is advanced before returning.
    pub fn update(&mut self, now_nanos: u64) {
        if self.time.paused {
            return;
        }

        let real = self.clock.tick(now_nanos);
        let dt = self.time.scaled(real);
        if dt <= 0.0 {
            return;
        }

        self.time.elapsed += dt;
        self.model.step(&mut self.bodies, dt);
        for body in self.bodies.iter_mut().filter(|b| b.visible) {
            body.advance_spin(dt);
        }
    }

    /// Flip visibility of the body whose id or name matches `key`
    /// (case-insensitive). Returns the new visibility, or `None` if no
    /// body matches.
    pub fn toggle_visibility(&mut self, key: &str) -> Option<bool> {
        let index = self.find(key)?;
        let body = &mut self.bodies[index];
        body.visible = !body.visible;
        info!(
            "{} is now {}",
            body.name(),
            if body.visible { "visible" } else { "hidden" }
        );
        Some(body.visible)
    }

    /// Select the body matching `key`, or clear the selection with `None`.
    ///
    /// Returns `false` (leaving the selection unchanged) when `key` names no
    /// body.
    pub fn focus(&mut self, key: Option<&str>) -> bool {
        let target = match key {
            None => None,
            Some(key) => match self.find(key) {
                Some(index) => Some(index),
                None => {
                    warn!("Cannot focus unknown body '{}'", key);
                    return false;
                }
            },
        };

        if let Some(previous) = self.focused.take() {
            self.bodies[previous].selected = false;
        }
        if let Some(index) = target {
            self.bodies[index].selected = true;
            debug!("Focused {}", self.bodies[index].name());
        }
        self.focused = target;
        true
    }

    /// Mark the body matching `key` as hovered, or clear hover with `None`.
    /// Unknown keys clear hover.
    pub fn set_hovered(&mut self, key: Option<&str>) {
        let target = key.and_then(|key| self.find(key));
        if target == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.bodies[previous].hovered = false;
        }
        if let Some(index) = target {
            self.bodies[index].hovered = true;
        }
        self.hovered = target;
    }

    // ---------------------------------------------------------------------
    // Read surface
    // ---------------------------------------------------------------------

    /// All bodies, parents before satellites.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn visible_bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|b| b.is_visible())
    }

    /// Body matching `key` by id, then by name (case-insensitive).
    pub fn body(&self, key: &str) -> Option<&Body> {
        self.find(key).map(|i| &self.bodies[i])
    }

    /// Parent of `body`, if it is a satellite.
    pub fn parent_of(&self, body: &Body) -> Option<&Body> {
        body.parent().map(|p| &self.bodies[p])
    }

    /// The selected body.
    pub fn focused(&self) -> Option<&Body> {
        self.focused.map(|i| &self.bodies[i])
    }

    pub fn hovered(&self) -> Option<&Body> {
        self.hovered.map(|i| &self.bodies[i])
    }

    pub fn time(&self) -> &SimulationTime {
        &self.time
    }

    /// Accumulated simulated seconds.
    pub fn elapsed(&self) -> f64 {
        self.time.elapsed
    }

    pub fn time_scale(&self) -> f64 {
        self.time.scale
    }

    pub fn is_paused(&self) -> bool {
        self.time.paused
    }

    pub fn model(&self) -> &PhysicsModel {
        &self.model
    }

    /// One-line summary of the roster load, for the UI.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Descriptors that were skipped while building the roster.
    pub fn rejected(&self) -> &[ConfigurationError] {
        &self.rejected
    }

    fn find(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.bodies
            .iter()
            .position(|b| b.id().eq_ignore_ascii_case(key))
            .or_else(|| {
                self.bodies
                    .iter()
                    .position(|b| b.name().eq_ignore_ascii_case(key))
            })
    }
}

fn summarize(accepted: usize, rejected: usize, source: Option<&str>) -> String {
    let mut message = match source {
        Some(source) => format!("Loaded {} bodies from {}", accepted, source),
        None => format!("Loaded {} bodies", accepted),
    };
    if rejected > 0 {
        message.push_str(&format!("; {} skipped", rejected));
    }
    message
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Slot {
    Pending,
    Placed(usize),
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Failure {
    /// Parent missing or itself rejected
    Orphan,
    Cycle,
}

/// Order descriptors so every parent precedes its satellites.
///
/// Returns each accepted descriptor with its parent's index in the output,
/// plus one error per rejected descriptor.
fn resolve_order(
    descriptors: Vec<BodyDescriptor>,
) -> (
    Vec<(BodyDescriptor, Option<usize>)>,
    Vec<ConfigurationError>,
) {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        if seen.insert(descriptor.id.clone()) {
            unique.push(descriptor);
        } else {
            errors.push(ConfigurationError::DuplicateId {
                body: descriptor.id,
            });
        }
    }

    // None: no parent; Some(None): parent id not in the roster
    let parent_of: Vec<Option<Option<usize>>> = {
        let index: HashMap<&str, usize> = unique
            .iter()
            .enumerate()
            .map(|(i, d)| (d.id.as_str(), i))
            .collect();
        unique
            .iter()
            .map(|d| d.parent.as_deref().map(|p| index.get(p).copied()))
            .collect()
    };

    let mut slots = vec![Slot::Pending; unique.len()];
    let mut order = Vec::with_capacity(unique.len());
    let mut failures = Vec::new();

    for start in 0..unique.len() {
        let mut path = Vec::new();
        let mut cursor = start;
        let outcome = loop {
            match slots[cursor] {
                Slot::Placed(_) => break Ok(()),
                Slot::Rejected => break Err(Failure::Orphan),
                Slot::Pending => {}
            }
            if path.contains(&cursor) {
                break Err(Failure::Cycle);
            }
            path.push(cursor);
            match parent_of[cursor] {
                None => break Ok(()),
                Some(None) => break Err(Failure::Orphan),
                Some(Some(parent)) => cursor = parent,
            }
        };

        match outcome {
            Ok(()) => {
                for &i in path.iter().rev() {
                    slots[i] = Slot::Placed(order.len());
                    order.push(i);
                }
            }
            Err(failure) => {
                for &i in &path {
                    slots[i] = Slot::Rejected;
                    failures.push((i, failure));
                }
            }
        }
    }

    failures.sort_by_key(|&(i, _)| i);
    for (i, failure) in failures {
        let descriptor = &unique[i];
        errors.push(match failure {
            Failure::Cycle => ConfigurationError::DependencyCycle {
                body: descriptor.id.clone(),
            },
            Failure::Orphan => ConfigurationError::UnknownParent {
                body: descriptor.id.clone(),
                parent: descriptor.parent.clone().unwrap_or_default(),
            },
        });
    }

    let parent_slots: Vec<Option<usize>> = order
        .iter()
        .map(|&i| match parent_of[i] {
            Some(Some(p)) => match slots[p] {
                Slot::Placed(k) => Some(k),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let mut pool: Vec<Option<BodyDescriptor>> = unique.into_iter().map(Some).collect();
    let ordered = order
        .iter()
        .zip(parent_slots)
        .filter_map(|(&i, parent)| pool[i].take().map(|d| (d, parent)))
        .collect();

    (ordered, errors)
}
