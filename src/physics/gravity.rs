//! Pairwise Newtonian gravity.
//!
//! Accelerations are computed directly as a_i = Σ G·m_j / d² toward each
//! other body, never as F_i / m_i, so massless bodies are well defined.

use bevy::math::DVec3;

/// A point mass sampled from the roster at the start of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointMass {
    pub position: DVec3,
    pub mass: f64,
}

/// Acceleration at `pos` due to every source except `skip`.
///
/// Coincident sources (zero separation) and contributions that come out
/// non-finite are ignored.
///
/// # Arguments
/// * `pos` - Position to evaluate at
/// * `sources` - Snapshot of all point masses
/// * `skip` - Index of the source sitting at `pos`, if any
/// * `gravitational_constant` - G in the roster's unit system
#[inline]
pub fn acceleration_at(
    pos: DVec3,
    sources: &[PointMass],
    skip: Option<usize>,
    gravitational_constant: f64,
) -> DVec3 {
    let mut acc = DVec3::ZERO;

    for (j, source) in sources.iter().enumerate() {
        if Some(j) == skip {
            continue;
        }

        let delta = source.position - pos;
        let r_squared = delta.length_squared();
        if r_squared == 0.0 {
            continue;
        }

        let r = r_squared.sqrt();
        // delta / r is the unit vector toward the source
        let contribution = delta * (gravitational_constant * source.mass / (r_squared * r));
        if contribution.is_finite() {
            acc += contribution;
        }
    }

    acc
}

/// Accelerations of every source due to all the others.
pub fn pairwise_accelerations(sources: &[PointMass], gravitational_constant: f64) -> Vec<DVec3> {
    sources
        .iter()
        .enumerate()
        .map(|(i, source)| acceleration_at(source.position, sources, Some(i), gravitational_constant))
        .collect()
}
