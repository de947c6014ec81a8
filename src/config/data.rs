//! Tuning sections deserialized from `assets/config/tuning.ron`.
//!
//! Every section is also a resource. Missing fields fall back to the
//! defaults below, so a partial file is valid.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Locomotion feel for the player.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub sprint_speed: f32,
    pub acceleration: f32,
    pub stop_deceleration: f32,
    pub turn_deceleration: f32,
    pub air_turn_deceleration: f32,
    /// Below this horizontal speed a decelerating body snaps to rest.
    pub rest_epsilon: f32,
    /// Seconds of continuous grounded running before sprint kicks in.
    pub sprint_trigger_time: f32,
    pub gravity: f32,
    pub jump_gravity_scale: f32,
    pub apex_gravity_scale: f32,
    /// Half-width of the vertical-velocity band treated as the apex.
    pub apex_band: f32,
    pub max_fall_speed: f32,
    pub wall_slide_max_fall_speed: f32,
    pub jump_force: f32,
    pub sprint_jump_force: f32,
    /// Height gained before releasing jump may cut the rise.
    pub min_jump_height: f32,
    pub jump_cut_factor: f32,
    pub coyote_time: f32,
    pub wall_coyote_time: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    pub wall_jump_lock_time: f32,
    /// How far from a wall a wall jump is still allowed.
    pub wall_jump_reach: f32,
    pub stomp_bounce: f32,
    pub sprint_stomp_multiplier: f32,
    pub ground_probe: f32,
    pub wall_probe: f32,
    pub player_width: f32,
    pub player_height: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            walk_speed: 80.0,
            run_speed: 140.0,
            sprint_speed: 185.0,
            acceleration: 384.0,
            stop_deceleration: 480.0,
            turn_deceleration: 640.0,
            air_turn_deceleration: 320.0,
            rest_epsilon: 1.0,
            sprint_trigger_time: 1.0,
            gravity: 1000.0,
            jump_gravity_scale: 0.5,
            apex_gravity_scale: 0.3,
            apex_band: 10.0,
            max_fall_speed: 270.0,
            wall_slide_max_fall_speed: 60.0,
            jump_force: 290.0,
            sprint_jump_force: 320.0,
            min_jump_height: 8.0,
            jump_cut_factor: 0.5,
            coyote_time: 0.1,
            wall_coyote_time: 0.08,
            wall_jump_horizontal: 130.0,
            wall_jump_vertical: 260.0,
            wall_jump_lock_time: 0.2,
            wall_jump_reach: 4.0,
            stomp_bounce: 330.0,
            sprint_stomp_multiplier: 1.25,
            ground_probe: 1.0,
            wall_probe: 1.0,
            player_width: 12.0,
            player_height: 16.0,
        }
    }
}

impl MovementTuning {
    /// Peak height of a full (held) jump from rest.
    pub fn held_jump_height(&self) -> f32 {
        let gravity = self.gravity * self.jump_gravity_scale;
        self.jump_force * self.jump_force / (2.0 * gravity)
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LadderTuning {
    pub climb_speed: f32,
    /// Max horizontal distance between the player's centre and a ladder's.
    pub align_tolerance: f32,
    /// Slack when comparing the player's feet to a ladder top.
    pub top_tolerance: f32,
    /// How far below the feet to look for a ladder when climbing down.
    pub probe_below: f32,
}

impl Default for LadderTuning {
    fn default() -> Self {
        Self {
            climb_speed: 60.0,
            align_tolerance: 6.0,
            top_tolerance: 2.0,
            probe_below: 4.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SlopeTuning {
    /// Radians between velocity and the slope line beyond which the body
    /// leaves the slope instead of following it.
    pub breakaway_angle: f32,
}

impl Default for SlopeTuning {
    fn default() -> Self {
        Self {
            breakaway_angle: 1.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CombatTuning {
    pub invincibility_time: f32,
    pub knockback_time: f32,
    pub knockback_horizontal: f32,
    pub knockback_vertical: f32,
    pub flash_interval: f32,
    /// How far the stomper's previous bottom may sit below the target top.
    pub stomp_tolerance: f32,
    pub kill_duration: f32,
    pub squish_scale: f32,
    pub death_pop_vertical: f32,
    pub death_pop_spread: f32,
    pub death_restart_delay: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            invincibility_time: 2.0,
            knockback_time: 0.2,
            knockback_horizontal: 100.0,
            knockback_vertical: 300.0,
            flash_interval: 0.1,
            stomp_tolerance: 4.0,
            kill_duration: 0.7,
            squish_scale: 0.25,
            death_pop_vertical: 300.0,
            death_pop_spread: 100.0,
            death_restart_delay: 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FlightPattern {
    pub speed: f32,
    pub distance: f32,
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Bugs and spiders walk at their variant's speed.
    pub green_walker_speed: f32,
    pub gray_walker_speed: f32,
    /// Length of the edge-detection rays, covering small slope steps.
    pub edge_probe: f32,
    pub purple_bird: FlightPattern,
    pub orange_bird: FlightPattern,
    pub bird_bob_amplitude: f32,
    pub bird_bob_rate: f32,
    pub bird_kill_duration: f32,
    pub feather_fall_speed: f32,
    pub saw_radius: f32,
    pub saw_spin: f32,
    pub spawner_buffer: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            green_walker_speed: 20.0,
            gray_walker_speed: 30.0,
            edge_probe: 4.0,
            purple_bird: FlightPattern {
                speed: 20.0,
                distance: 60.0,
            },
            orange_bird: FlightPattern {
                speed: 30.0,
                distance: 100.0,
            },
            bird_bob_amplitude: 4.0,
            bird_bob_rate: 4.0,
            bird_kill_duration: 1.5,
            feather_fall_speed: 10.0,
            saw_radius: 14.0,
            saw_spin: 6.0,
            spawner_buffer: 100.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformTuning {
    pub moving_platform_speed: f32,
    pub one_way_tolerance: f32,
    pub green_bounce: f32,
    pub red_bounce: f32,
    pub bounce_compress_time: f32,
    pub bounce_compress_depth: f32,
    pub coin_float_speed: f32,
    pub coin_fade_time: f32,
}

impl Default for PlatformTuning {
    fn default() -> Self {
        Self {
            moving_platform_speed: 20.0,
            one_way_tolerance: 1.0,
            green_bounce: 500.0,
            red_bounce: 700.0,
            bounce_compress_time: 0.15,
            bounce_compress_depth: 2.0,
            coin_float_speed: 40.0,
            coin_fade_time: 0.3,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraTuning {
    pub zoom: f32,
    pub follow_rate: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            zoom: 3.0,
            follow_rate: 8.0,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AudioTuning {
    pub sfx_volume: f32,
    pub music_volume: f32,
    pub level_song: Option<String>,
}

impl Default for AudioTuning {
    fn default() -> Self {
        Self {
            sfx_volume: 0.7,
            music_volume: 0.5,
            level_song: Some("music/level.ogg".to_string()),
        }
    }
}

/// Root of the tuning file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TuningFile {
    pub movement: MovementTuning,
    pub ladder: LadderTuning,
    pub slope: SlopeTuning,
    pub combat: CombatTuning,
    pub enemies: EnemyTuning,
    pub platforms: PlatformTuning,
    pub camera: CameraTuning,
    pub audio: AudioTuning,
}
