//! Semi-implicit Euler integration of the N-body problem.
//!
//! Two passes per step: every velocity is updated from accelerations sampled
//! on a single position snapshot, then every position moves with its new
//! velocity. No body ever sees a partially updated neighbour.

use bevy::prelude::*;

use crate::body::Body;

use super::gravity::{pairwise_accelerations, PointMass};

/// Upper bound on substeps per tick; past this the step is coarsened.
pub const MAX_SUBSTEPS: usize = 10_000;

/// Advance all visible bodies by `dt`, splitting it into equal substeps no
/// longer than `max_substep`.
pub fn step(bodies: &mut [Body], dt: f64, gravitational_constant: f64, max_substep: f64) {
    if dt <= 0.0 || !dt.is_finite() {
        return;
    }

    let mut substeps = if max_substep > 0.0 {
        (dt / max_substep).ceil() as usize
    } else {
        1
    };
    if substeps > MAX_SUBSTEPS {
        warn!(
            "Step of {:.1}s needs {} substeps, capping at {}",
            dt, substeps, MAX_SUBSTEPS
        );
        substeps = MAX_SUBSTEPS;
    }
    let substeps = substeps.max(1);

    let h = dt / substeps as f64;
    for _ in 0..substeps {
        semi_implicit_euler(bodies, h, gravitational_constant);
    }
}

/// One semi-implicit Euler step of size `h` over the visible bodies.
pub fn semi_implicit_euler(bodies: &mut [Body], h: f64, gravitational_constant: f64) {
    let visible: Vec<usize> = (0..bodies.len()).filter(|&i| bodies[i].visible).collect();

    let snapshot: Vec<PointMass> = visible
        .iter()
        .map(|&i| PointMass {
            position: bodies[i].position,
            mass: bodies[i].mass(),
        })
        .collect();
    let accelerations = pairwise_accelerations(&snapshot, gravitational_constant);

    // Pass 1: velocities from the snapshot
    for (&i, acc) in visible.iter().zip(&accelerations) {
        bodies[i].velocity += *acc * h;
    }

    // Pass 2: positions from the new velocities
    for &i in &visible {
        let velocity = bodies[i].velocity;
        bodies[i].position += velocity * h;
    }
}
