//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether collider outlines are drawn
    pub show_colliders: bool,
    /// Successful tuning reloads this session
    pub tuning_reloads: u32,
}

/// Actions bound to debug hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    ToggleColliders,
    RestartLevel,
    ReloadTuning,
}

impl DebugAction {
    pub const ALL: [DebugAction; 3] = [
        DebugAction::ToggleColliders,
        DebugAction::RestartLevel,
        DebugAction::ReloadTuning,
    ];

    pub fn key(self) -> KeyCode {
        match self {
            DebugAction::ToggleColliders => KeyCode::F3,
            DebugAction::RestartLevel => KeyCode::F5,
            DebugAction::ReloadTuning => KeyCode::F6,
        }
    }

    /// Actions whose key went down this frame, in declaration order.
    pub fn pressed(keyboard: &ButtonInput<KeyCode>) -> Vec<DebugAction> {
        Self::ALL
            .into_iter()
            .filter(|action| keyboard.just_pressed(action.key()))
            .collect()
    }
}
