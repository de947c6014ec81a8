//! Config domain: gameplay tuning loaded from RON at startup.

mod data;
mod loader;


pub use data::{
    AudioTuning, CameraTuning, CombatTuning, EnemyTuning, FlightPattern, LadderTuning,
    MovementTuning, PlatformTuning, SlopeTuning, TuningFile,
};
pub use loader::{ConfigLoadError, TuningIssue, load_tuning, parse_tuning, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

pub const TUNING_PATH: &str = "assets/config/tuning.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        let tuning = match load_tuning(Path::new(TUNING_PATH)) {
            Ok(tuning) => {
                info!("Loaded tuning from {}", TUNING_PATH);
                tuning
            }
            Err(e) => {
                warn!("{}; using built-in tuning", e);
                TuningFile::default()
            }
        };
        for issue in validate_tuning(&tuning) {
            warn!("Suspicious tuning value {}", issue);
        }
        insert_tuning(app, tuning);
    }
}

/// Split the file into its per-domain resources.
pub fn insert_tuning(app: &mut App, tuning: TuningFile) {
    app.insert_resource(tuning.movement)
        .insert_resource(tuning.ladder)
        .insert_resource(tuning.slope)
        .insert_resource(tuning.combat)
        .insert_resource(tuning.enemies)
        .insert_resource(tuning.platforms)
        .insert_resource(tuning.camera)
        .insert_resource(tuning.audio);
}

/// Replace the per-domain resources at runtime.
pub fn insert_tuning_resources(commands: &mut Commands, tuning: TuningFile) {
    commands.insert_resource(tuning.movement);
    commands.insert_resource(tuning.ladder);
    commands.insert_resource(tuning.slope);
    commands.insert_resource(tuning.combat);
    commands.insert_resource(tuning.enemies);
    commands.insert_resource(tuning.platforms);
    commands.insert_resource(tuning.camera);
    commands.insert_resource(tuning.audio);
}
