//! Frame tick driving the simulation.
//!
//! Once per frame the real (unscaled, unpaused) Bevy clock is read as a
//! nanosecond timestamp and handed to [`Simulation::update`]. Scaling and
//! pausing are the simulation's business, not Bevy's virtual time.

use bevy::prelude::*;

use crate::simulation::Simulation;
use crate::types::SimulationSet;

/// Plugin advancing the simulation every frame.
pub struct TimePlugin;

impl Plugin for TimePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (SimulationSet::Advance, SimulationSet::Present).chain(),
        )
        .add_systems(Update, advance_simulation.in_set(SimulationSet::Advance));
    }
}

/// Host timestamp for the current frame: real time since startup in nanoseconds.
pub fn real_now_nanos(time: &Time<Real>) -> u64 {
    u64::try_from(time.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

fn advance_simulation(mut simulation: ResMut<Simulation>, time: Res<Time<Real>>) {
    simulation.update(real_now_nanos(&time));
}
