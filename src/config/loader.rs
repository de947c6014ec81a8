//! Loader and sanity checks for the RON tuning file.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::TuningFile;

/// Error type for tuning load failures.
#[derive(Debug)]
pub struct ConfigLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ConfigLoadError {}

/// A tuning value outside its usable range.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

pub fn parse_tuning(contents: &str, file: &str) -> Result<TuningFile, ConfigLoadError> {
    ron_options()
        .from_str(contents)
        .map_err(|e| ConfigLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })
}

pub fn load_tuning(path: &Path) -> Result<TuningFile, ConfigLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ConfigLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;
    parse_tuning(&contents, &file_name)
}

macro_rules! check_positive {
    ($issues:expr, $value:expr, $field:expr) => {
        if !($value > 0.0) {
            $issues.push(TuningIssue {
                field: $field,
                problem: format!("must be positive, got {}", $value),
            });
        }
    };
}

/// Values that would make the controller misbehave rather than just feel odd.
pub fn validate_tuning(tuning: &TuningFile) -> Vec<TuningIssue> {
    let mut issues = Vec::new();
    let movement = &tuning.movement;

    check_positive!(issues, movement.walk_speed, "movement.walk_speed");
    check_positive!(issues, movement.acceleration, "movement.acceleration");
    check_positive!(issues, movement.gravity, "movement.gravity");
    check_positive!(issues, movement.max_fall_speed, "movement.max_fall_speed");
    check_positive!(issues, movement.jump_force, "movement.jump_force");
    check_positive!(issues, movement.player_width, "movement.player_width");
    check_positive!(issues, movement.player_height, "movement.player_height");
    check_positive!(issues, tuning.ladder.climb_speed, "ladder.climb_speed");
    check_positive!(issues, tuning.combat.kill_duration, "combat.kill_duration");

    if movement.walk_speed > movement.run_speed || movement.run_speed > movement.sprint_speed {
        issues.push(TuningIssue {
            field: "movement.run_speed",
            problem: format!(
                "gaits must not slow down: walk {} / run {} / sprint {}",
                movement.walk_speed, movement.run_speed, movement.sprint_speed
            ),
        });
    }
    if !(0.0..=1.0).contains(&movement.jump_cut_factor) {
        issues.push(TuningIssue {
            field: "movement.jump_cut_factor",
            problem: format!("must be within [0, 1], got {}", movement.jump_cut_factor),
        });
    }
    if movement.stomp_bounce <= movement.jump_force {
        issues.push(TuningIssue {
            field: "movement.stomp_bounce",
            problem: format!(
                "stomp bounce {} should outjump a plain jump {}",
                movement.stomp_bounce, movement.jump_force
            ),
        });
    }
    if movement.wall_slide_max_fall_speed > movement.max_fall_speed {
        issues.push(TuningIssue {
            field: "movement.wall_slide_max_fall_speed",
            problem: "wall slide must not fall faster than free fall".to_string(),
        });
    }

    issues
}
