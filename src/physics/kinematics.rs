//! Closed-form kinematic stepping.
//!
//! Each visible body is placed on its orbit at the current phase angle,
//! around the parent's current position, and then its phase advances. The
//! position therefore trails the phase by one tick. Bodies must be ordered
//! so a parent always precedes its satellites.

use bevy::math::DVec3;

use crate::body::Body;

/// Advance every visible body by `dt` simulated seconds.
pub fn step(bodies: &mut [Body], dt: f64) {
    for i in 0..bodies.len() {
        if !bodies[i].visible {
            continue;
        }

        let (center, center_velocity) = match bodies[i].parent() {
            Some(p) => (bodies[p].position, bodies[p].velocity),
            None => (DVec3::ZERO, DVec3::ZERO),
        };

        let body = &mut bodies[i];
        body.position = center + body.orbit().local_position(body.phase);
        body.velocity = center_velocity + body.orbit().local_velocity(body.phase);
        body.phase = body.orbit().advance_phase(body.phase, dt);
    }
}
