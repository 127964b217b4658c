//! Orrery - Orbital Simulation Engine
//!
//! A library crate providing the simulation controller, both physics
//! models and the Bevy plugins that present them.

pub mod body;
pub mod camera;
pub mod clock;
pub mod config;
pub mod data;
pub mod input;
pub mod orbit;
pub mod physics;
pub mod render;
pub mod simulation;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
