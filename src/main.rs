//! Orrery - Orbital Simulation Engine
//!
//! A desktop solar-system viewer with pause, time scaling, focus and a
//! choice between closed-form orbits and n-body gravity.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use orrery::camera::CameraPlugin;
use orrery::config::SimulationConfig;
use orrery::input::InputPlugin;
use orrery::render::RenderPlugin;
use orrery::simulation::Simulation;
use orrery::time::TimePlugin;
use orrery::ui::UiPlugin;

fn main() -> AppExit {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".into(),
            ..default()
        }),
        ..default()
    }));

    // Loaded after DefaultPlugins so load warnings reach the log
    let config = SimulationConfig::from_env();
    let simulation = match Simulation::load(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("Cannot start without a roster: {}", err);
            return AppExit::error();
        }
    };
    info!("{} ({} model)", simulation.status_message(), simulation.model().name());

    app.add_plugins(EguiPlugin::default())
        // Insert resources before plugins that depend on them
        .insert_resource(config)
        .insert_resource(simulation)
        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
        .add_plugins((TimePlugin, CameraPlugin, InputPlugin, RenderPlugin, UiPlugin))
        .run()
}
