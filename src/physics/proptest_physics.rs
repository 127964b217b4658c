//! Property-based tests for the motion models using proptest.
//!
//! These tests verify model invariants across a wide range of orbits,
//! masses and step sizes.

use std::f64::consts::TAU;

use bevy::math::DVec3;
use proptest::prelude::*;

use crate::orbit::{angular_distance, OrbitalElements};
use crate::test_utils::fixtures;

use super::PhysicsModel;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A kinematic step places the body on its orbit at the phase it had
    /// before the step, then advances the phase by ω·Δt.
    #[test]
    fn prop_kinematic_position_is_projection(
        semi_major_axis in 1.0f64..1000.0,
        eccentricity in 0.0f64..0.95,
        inclination_deg in 0.0f64..90.0,
        angular_speed in -0.1f64..0.1,
        initial_phase in 0.0f64..TAU,
        dt in 0.0f64..10_000.0,
    ) {
        let orbit = OrbitalElements::from_degrees(
            semi_major_axis, eccentricity, inclination_deg, angular_speed, initial_phase,
        );
        let mut bodies = fixtures::roster(vec![fixtures::with_orbit("rock", orbit)]);
        let placed_phase = bodies[0].phase();
        PhysicsModel::Kinematic.step(&mut bodies, dt);

        let body = &bodies[0];
        prop_assert!((0.0..TAU).contains(&body.phase()));
        let advanced = body.orbit().advance_phase(placed_phase, dt);
        prop_assert!(angular_distance(body.phase(), advanced) < 1e-9);
        let expected = body.orbit().local_position(placed_phase);
        prop_assert!(
            (body.position() - expected).length() < 1e-9 * semi_major_axis,
            "position {:?} off orbit point {:?}", body.position(), expected
        );
    }

    /// Splitting a kinematic step in two lands on the same phase.
    #[test]
    fn prop_kinematic_steps_compose(
        angular_speed in -0.1f64..0.1,
        dt1 in 0.0f64..5_000.0,
        dt2 in 0.0f64..5_000.0,
    ) {
        let orbit = OrbitalElements::new(150.0, 0.1, 0.0, angular_speed, 0.3);
        let mut split = fixtures::roster(vec![fixtures::with_orbit("rock", orbit)]);
        let mut whole = split.clone();

        PhysicsModel::Kinematic.step(&mut split, dt1);
        PhysicsModel::Kinematic.step(&mut split, dt2);
        PhysicsModel::Kinematic.step(&mut whole, dt1 + dt2);

        let gap = angular_distance(split[0].phase(), whole[0].phase());
        prop_assert!(gap < 1e-9, "phase gap {}", gap);
    }

    /// Circular orbits never change radius, whatever the step.
    #[test]
    fn prop_circular_radius_invariant(
        radius in 1.0f64..1000.0,
        angular_speed in 0.0001f64..1.0,
        dt in 0.0f64..1e6,
    ) {
        let orbit = OrbitalElements::new(radius, 0.0, 0.0, angular_speed, 0.0);
        let mut bodies = fixtures::roster(vec![fixtures::with_orbit("rock", orbit)]);
        PhysicsModel::Kinematic.step(&mut bodies, dt);
        let r = bodies[0].position().length();
        prop_assert!((r - radius).abs() < 1e-9 * radius);
    }

    /// Mutual gravity conserves total momentum of a system starting at rest.
    #[test]
    fn prop_dynamic_momentum_conserved(
        m1 in 1.0f64..1e3,
        m2 in 1.0f64..1e3,
        m3 in 1.0f64..1e3,
        x in 10.0f64..100.0,
        y in 10.0f64..100.0,
    ) {
        let mut bodies = fixtures::roster(vec![
            fixtures::point_mass("a", m1, DVec3::ZERO),
            fixtures::point_mass("b", m2, DVec3::new(x, 0.0, 0.0)),
            fixtures::point_mass("c", m3, DVec3::new(0.0, y, 0.0)),
        ]);
        let model = PhysicsModel::Dynamic { gravitational_constant: 1.0, max_substep: 0.01 };
        model.step(&mut bodies, 1.0);

        let momentum: DVec3 = bodies.iter().map(|b| b.velocity() * b.mass()).sum();
        let scale: f64 = bodies.iter().map(|b| b.velocity().length() * b.mass()).sum();
        prop_assert!(
            momentum.length() <= 1e-9 * scale.max(1e-12),
            "net momentum {:?} (scale {})", momentum, scale
        );
    }

    /// Degenerate rosters (coincident bodies, zero or huge masses) never
    /// produce non-finite state.
    #[test]
    fn prop_dynamic_degenerate_stays_finite(
        mass_a in prop_oneof![Just(0.0), 1.0f64..1e30],
        mass_b in prop_oneof![Just(0.0), 1.0f64..1e30],
        offset in prop_oneof![Just(0.0), 1e-6f64..1e6],
        dt in 0.0f64..100.0,
    ) {
        let mut bodies = fixtures::roster(vec![
            fixtures::point_mass("a", mass_a, DVec3::ZERO),
            fixtures::point_mass("b", mass_b, DVec3::new(offset, 0.0, 0.0)),
        ]);
        PhysicsModel::dynamic().step(&mut bodies, dt);

        for body in &bodies {
            prop_assert!(body.position().is_finite(), "{} position {:?}", body.id(), body.position());
            prop_assert!(body.velocity().is_finite(), "{} velocity {:?}", body.id(), body.velocity());
        }
    }
}

#[cfg(test)]
mod deterministic_tests {
    use super::*;

    #[test]
    fn test_both_models_ignore_non_positive_steps() {
        for model in [PhysicsModel::Kinematic, PhysicsModel::dynamic()] {
            let mut bodies = fixtures::roster(fixtures::earth_moon_pair());
            let before: Vec<DVec3> = bodies.iter().map(|b| b.position()).collect();
            model.step(&mut bodies, -1.0);
            model.step(&mut bodies, f64::NAN);
            let after: Vec<DVec3> = bodies.iter().map(|b| b.position()).collect();
            assert_eq!(before, after, "{} moved on a bad step", model.name());
        }
    }
}
