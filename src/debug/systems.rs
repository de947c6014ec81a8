//! Debug domain: hotkey handling and runtime tweaks.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::Path;

use crate::config::{TUNING_PATH, insert_tuning_resources, load_tuning, validate_tuning};
use crate::core::RestartLevelEvent;
use crate::debug::state::{DebugAction, DebugState};

/// Collider outlines start hidden.
pub(crate) fn hide_colliders(mut store: ResMut<GizmoConfigStore>) {
    store.config_mut::<PhysicsGizmos>().0.enabled = false;
}

pub(crate) fn handle_debug_hotkeys(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut store: ResMut<GizmoConfigStore>,
    mut restarts: MessageWriter<RestartLevelEvent>,
) {
    for action in DebugAction::pressed(&keyboard) {
        match action {
            DebugAction::ToggleColliders => {
                debug_state.show_colliders = !debug_state.show_colliders;
                store.config_mut::<PhysicsGizmos>().0.enabled = debug_state.show_colliders;
                info!(
                    "[DEBUG] Collider outlines {}",
                    if debug_state.show_colliders { "ON" } else { "OFF" }
                );
            }
            DebugAction::RestartLevel => {
                info!("[DEBUG] Restarting level");
                restarts.write(RestartLevelEvent);
            }
            DebugAction::ReloadTuning => match load_tuning(Path::new(TUNING_PATH)) {
                Ok(tuning) => {
                    for issue in validate_tuning(&tuning) {
                        warn!("Suspicious tuning value {}", issue);
                    }
                    insert_tuning_resources(&mut commands, tuning);
                    debug_state.tuning_reloads += 1;
                    info!("[DEBUG] Reloaded tuning from {}", TUNING_PATH);
                }
                Err(e) => warn!("[DEBUG] {}", e),
            },
        }
    }
}
