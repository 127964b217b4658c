//! Loading rosters from descriptor documents on disk.

mod common;

use std::path::PathBuf;

use orrery::config::{SimulationConfig, DATA_ENV, MODEL_ENV};
use orrery::data::{ConfigurationError, DataSource, DataSourceError};
use orrery::physics::PhysicsModel;
use orrery::simulation::Simulation;

const SMALL_DOCUMENT: &str = r##"{
  "version": "1.0",
  "celestialBodies": [
    { "id": "star", "name": "Star", "type": "star", "mass": 1000, "radius": 20,
      "color": "#ffcc00", "orbit": { "semiMajorAxis": 0 } },
    { "id": "rock", "name": "Rock", "type": "planet", "radius": 4,
      "orbit": { "semiMajorAxis": 120, "eccentricity": 0.1, "period": 600 } }
  ]
}"##;

fn config_for(primary: PathBuf) -> SimulationConfig {
    SimulationConfig {
        primary_source: DataSource::File(primary),
        ..SimulationConfig::default()
    }
}

#[test]
fn test_user_document_replaces_builtin_roster() {
    let path = common::temp_document("small.json", SMALL_DOCUMENT);
    let Ok(simulation) = Simulation::load(&config_for(path)) else {
        panic!("valid document should load");
    };

    assert_eq!(simulation.bodies().len(), 2);
    assert!(simulation.rejected().is_empty());
    assert!(simulation.status_message().starts_with("Loaded 2 bodies from"));
    assert!(!simulation.status_message().contains("fallback"));

    let Some(rock) = simulation.body("Rock") else {
        panic!("lookup by name should find the rock");
    };
    assert_eq!(rock.mass(), 0.0);
    let period = rock.orbit().period().unwrap_or_default();
    assert!((period - 600.0).abs() < 1e-9);
}

#[test]
fn test_unreadable_document_falls_back() {
    let path = common::temp_document("broken.json", "{ not json");
    let Ok(simulation) = Simulation::load(&config_for(path)) else {
        panic!("fallback should load");
    };

    assert!(simulation.bodies().len() > 2);
    assert!(simulation.status_message().contains("(fallback)"));
}

#[test]
fn test_missing_document_falls_back() {
    let path = std::env::temp_dir().join("orrery-tests-does-not-exist.json");
    let Ok(simulation) = Simulation::load(&config_for(path)) else {
        panic!("fallback should load");
    };
    assert!(simulation.body("earth").is_some());
}

#[test]
fn test_both_sources_failing_is_an_error() {
    let config = SimulationConfig {
        primary_source: DataSource::File(std::env::temp_dir().join("orrery-missing-a.json")),
        fallback_source: DataSource::Embedded("{}"),
        ..SimulationConfig::default()
    };

    match Simulation::load(&config) {
        Err(DataSourceError::Exhausted { .. }) => {}
        other => panic!("expected exhausted sources, got {other:?}"),
    }
}

#[test]
fn test_bad_entries_are_skipped_not_fatal() {
    let document = r##"{
      "celestialBodies": [
        { "id": "star", "name": "Star", "type": "star", "radius": 20, "orbit": {} },
        { "id": "ghost", "name": "Ghost", "type": "planet", "radius": 1, "parent": "nowhere",
          "orbit": { "semiMajorAxis": 10 } },
        { "id": "flat", "name": "Flat", "type": "planet", "radius": -1, "orbit": { "semiMajorAxis": 10 } },
        { "id": "star", "name": "Star Again", "type": "star", "radius": 5, "orbit": {} },
        { "name": "Anonymous", "type": "planet", "radius": 5, "orbit": {} }
      ]
    }"##;
    let path = common::temp_document("partial.json", document);
    let Ok(simulation) = Simulation::load(&config_for(path)) else {
        panic!("partially valid document should load");
    };

    assert_eq!(simulation.bodies().len(), 1);
    assert_eq!(simulation.rejected().len(), 4);
    assert!(simulation.status_message().ends_with("; 4 skipped"));
    assert!(simulation.rejected().iter().any(|err| matches!(
        err,
        ConfigurationError::UnknownParent { body, .. } if body == "ghost"
    )));
    assert!(simulation
        .rejected()
        .iter()
        .any(|err| matches!(err, ConfigurationError::DuplicateId { .. })));
}

#[test]
fn test_environment_overrides() {
    let path = common::temp_document("override.json", SMALL_DOCUMENT);
    let path_text = path.display().to_string();
    let config = SimulationConfig::default().with_overrides(|key| match key {
        MODEL_ENV => Some("dynamic".to_string()),
        DATA_ENV => Some(path_text.clone()),
        _ => None,
    });

    assert_eq!(config.model, PhysicsModel::dynamic());
    assert_eq!(config.primary_source, DataSource::File(path));
}
