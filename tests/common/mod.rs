//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use bevy::math::DVec3;
use orrery::body::BodyKind;
use orrery::data::BodyDescriptor;
use orrery::orbit::OrbitalElements;
use orrery::simulation::Simulation;

/// One second of host time in nanoseconds.
pub const SECOND: u64 = 1_000_000_000;

/// A stationary star at the origin.
pub fn star(id: &str, mass: f64) -> BodyDescriptor {
    BodyDescriptor::new(id, id, BodyKind::Star, mass, 10.0, OrbitalElements::stationary())
}

/// A planet on an orbit with the given elements.
pub fn planet(id: &str, semi_major_axis: f64, eccentricity: f64, angular_speed: f64) -> BodyDescriptor {
    BodyDescriptor::new(
        id,
        id,
        BodyKind::Planet,
        1.0,
        2.0,
        OrbitalElements::new(semi_major_axis, eccentricity, 0.0, angular_speed, 0.0),
    )
}

/// Star of mass `star_mass` with a light planet on a circular orbit of
/// radius `r` whose angular speed matches gravity `g`.
pub fn circular_system(g: f64, star_mass: f64, r: f64) -> Vec<BodyDescriptor> {
    let omega = (g * star_mass / (r * r * r)).sqrt();
    let mut light = planet("planet", r, 0.0, omega);
    light.mass = 1e-6;
    vec![star("star", star_mass), light]
}

/// Drive `simulation` with `frames` host ticks of `frame` nanoseconds,
/// starting at `start`. Returns the last timestamp used.
pub fn run_frames(simulation: &mut Simulation, start: u64, frames: u64, frame: u64) -> u64 {
    let mut now = start;
    simulation.update(now);
    for _ in 0..frames {
        now += frame;
        simulation.update(now);
    }
    now
}

/// Total linear momentum of the visible bodies.
pub fn total_momentum(simulation: &Simulation) -> DVec3 {
    simulation
        .visible_bodies()
        .map(|body| body.velocity() * body.mass())
        .sum()
}

/// Distance between two bodies, by id.
pub fn distance_between(simulation: &Simulation, a: &str, b: &str) -> f64 {
    let (Some(a), Some(b)) = (simulation.body(a), simulation.body(b)) else {
        panic!("missing body {a} or {b}");
    };
    (a.position() - b.position()).length()
}

/// Write `contents` to a fresh file under the system temp directory.
pub fn temp_document(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("orrery-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp document");
    path
}
