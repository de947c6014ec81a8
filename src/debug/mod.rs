//! Debug tooling for fast iteration, compiled with the `dev-tools` feature.
//!
//! Hotkeys:
//! - F3: toggle collider outlines
//! - F5: restart the level
//! - F6: reload tuning from disk
//!
//! Tuning changes apply to systems immediately; values copied into the
//! player at spawn (sprint trigger, damage windows) take effect after a
//! restart.

mod state;
mod systems;


pub use state::{DebugAction, DebugState};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::debug::systems::{handle_debug_hotkeys, hide_colliders};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(PhysicsDebugPlugin::default())
            .init_resource::<DebugState>()
            .add_systems(Startup, hide_colliders)
            .add_systems(Update, handle_debug_hotkeys);
    }
}
