//! Test utilities for simulation tests.
//!
//! Provides descriptor fixtures, roster builders and assertions for
//! physical invariants like energy conservation.

use bevy::math::DVec3;

use crate::body::{Body, BodyKind};
use crate::data::BodyDescriptor;
use crate::orbit::OrbitalElements;

/// Fixtures for building descriptors and rosters.
pub mod fixtures {
    use super::*;

    /// Gravitational constant for scene-unit dynamics tests.
    pub const SCENE_G: f64 = 1.0;

    /// Nanoseconds in one second, for clock timestamps.
    pub const SECOND: u64 = 1_000_000_000;

    /// Build bodies from descriptors listed parent-first.
    ///
    /// # Panics
    /// Panics if a parent is listed after its satellite.
    pub fn roster(descriptors: Vec<BodyDescriptor>) -> Vec<Body> {
        let mut bodies: Vec<Body> = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            let parent = descriptor.parent.as_ref().map(|id| {
                bodies
                    .iter()
                    .position(|b| b.id() == id)
                    .unwrap_or_else(|| panic!("parent '{}' must precede its satellite", id))
            });
            let body = Body::new(descriptor, parent.map(|p| (p, &bodies[p])));
            bodies.push(body);
        }
        bodies
    }

    /// A descriptor with the given orbit and unit mass and radius.
    pub fn with_orbit(id: &str, orbit: OrbitalElements) -> BodyDescriptor {
        BodyDescriptor::new(id, id.to_uppercase(), BodyKind::Planet, 1.0, 1.0, orbit)
    }

    /// Earth-like planet in scene units: a=200, e=0.017, ω=0.01.
    pub fn earth_like(id: &str) -> BodyDescriptor {
        BodyDescriptor::new(
            id,
            "Earth",
            BodyKind::Planet,
            4.8e10,
            10.0,
            OrbitalElements::new(200.0, 0.017, 0.0, 0.01, 0.0),
        )
    }

    /// Moon on a circular orbit of radius 20 around `parent`.
    pub fn moon_of(id: &str, parent: &str) -> BodyDescriptor {
        BodyDescriptor::new(
            id,
            "Moon",
            BodyKind::Satellite,
            6.0e8,
            3.0,
            OrbitalElements::new(20.0, 0.0, 0.0, 0.02, 0.0),
        )
        .with_parent(parent)
    }

    /// A body at rest at `position` (in the orbital plane).
    pub fn point_mass(id: &str, mass: f64, position: DVec3) -> BodyDescriptor {
        let orbit = OrbitalElements::new(
            position.truncate().length(),
            0.0,
            0.0,
            0.0,
            position.y.atan2(position.x),
        );
        BodyDescriptor::new(id, id.to_uppercase(), BodyKind::Other("Debris".into()), mass, 1.0, orbit)
    }

    /// SI two-body scenario: 1e24 kg at the origin, 7e22 kg at 3.84e8 m, both at rest.
    pub fn earth_moon_pair() -> Vec<BodyDescriptor> {
        vec![
            point_mass("primary", 1e24, DVec3::ZERO),
            point_mass("secondary", 7e22, DVec3::new(3.84e8, 0.0, 0.0)),
        ]
    }

    /// Star with G·M = 1600 (under [`SCENE_G`]) and a light planet on a
    /// circular orbit of radius `r`.
    pub fn star_and_planet(r: f64) -> Vec<BodyDescriptor> {
        let star_mass = 1600.0;
        let omega = (SCENE_G * star_mass / (r * r * r)).sqrt();
        vec![
            BodyDescriptor::new(
                "star",
                "Star",
                BodyKind::Star,
                star_mass,
                30.0,
                OrbitalElements::stationary(),
            ),
            BodyDescriptor::new(
                "planet",
                "Planet",
                BodyKind::Planet,
                1e-3,
                5.0,
                OrbitalElements::new(r, 0.0, 0.0, omega, 0.0),
            ),
        ]
    }

    /// Small solar-like roster: star, planet, and a moon of the planet.
    pub fn small_system() -> Vec<BodyDescriptor> {
        vec![
            BodyDescriptor::new(
                "sun",
                "Sun",
                BodyKind::Star,
                2.4e13,
                30.0,
                OrbitalElements::stationary(),
            ),
            earth_like("earth"),
            moon_of("moon", "earth"),
        ]
    }
}

/// Assertions for verifying physical invariants.
pub mod assertions {
    use super::*;

    /// Total mechanical energy: Σ ½mv² − Σ_{i<j} G·m_i·m_j / d.
    pub fn relative_energy(bodies: &[Body], gravitational_constant: f64) -> f64 {
        let kinetic: f64 = bodies
            .iter()
            .map(|b| 0.5 * b.mass() * b.velocity().length_squared())
            .sum();

        let mut potential = 0.0;
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                let d = (a.position() - b.position()).length();
                if d > 0.0 {
                    potential -= gravitational_constant * a.mass() * b.mass() / d;
                }
            }
        }

        kinetic + potential
    }

    /// Assert that energy is conserved within tolerance.
    ///
    /// # Panics
    /// Panics if relative energy drift exceeds tolerance.
    pub fn assert_energy_conserved(initial_energy: f64, final_energy: f64, tolerance: f64) {
        let drift = if initial_energy.abs() > 1e-10 {
            ((final_energy - initial_energy) / initial_energy).abs()
        } else {
            (final_energy - initial_energy).abs()
        };
        assert!(
            drift <= tolerance,
            "Energy not conserved: initial={initial_energy:.6e}, final={final_energy:.6e}, drift={drift:.6e}, tolerance={tolerance:.6e}"
        );
    }

    /// Assert two vectors agree component-wise within `tolerance`.
    pub fn assert_vec_close(actual: DVec3, expected: DVec3, tolerance: f64) {
        assert!(
            (actual - expected).length() <= tolerance,
            "{actual:?} differs from {expected:?} by more than {tolerance:e}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roster_resolves_parents() {
        let bodies = fixtures::roster(fixtures::small_system());
        assert_eq!(bodies.len(), 3);
        assert_eq!(bodies[2].parent(), Some(1));
        assert_eq!(bodies[1].parent(), None);
    }

    #[test]
    fn test_point_mass_placement() {
        let bodies = fixtures::roster(vec![fixtures::point_mass(
            "p",
            1.0,
            DVec3::new(0.0, 50.0, 0.0),
        )]);
        assertions::assert_vec_close(bodies[0].position(), DVec3::new(0.0, 50.0, 0.0), 1e-9);
        assert_eq!(bodies[0].velocity(), DVec3::ZERO);
    }

    #[test]
    fn test_star_and_planet_is_circular() {
        let bodies = fixtures::roster(fixtures::star_and_planet(200.0));
        let v = bodies[1].velocity().length();
        assert_relative_eq!(v, (1600.0_f64 / 200.0).sqrt(), max_relative = 1e-12);
        assert!(assertions::relative_energy(&bodies, fixtures::SCENE_G) < 0.0);
    }
}
