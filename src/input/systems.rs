//! Input domain: device sampling and per-step latching.

use bevy::prelude::*;

use crate::input::controls::{Action, ActionSet, Controls};

/// Stick deflection that counts as a held direction.
const STICK_THRESHOLD: f32 = 0.5;

#[derive(Resource, Debug, Clone)]
pub struct ControlBindings {
    pub keys: Vec<(Action, KeyCode)>,
    pub buttons: Vec<(Action, GamepadButton)>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        Self {
            keys: vec![
                (Action::Left, KeyCode::ArrowLeft),
                (Action::Right, KeyCode::ArrowRight),
                (Action::Up, KeyCode::ArrowUp),
                (Action::Down, KeyCode::ArrowDown),
                (Action::Jump, KeyCode::KeyA),
                (Action::Jump, KeyCode::Space),
                (Action::Run, KeyCode::KeyS),
                (Action::Run, KeyCode::ShiftLeft),
            ],
            buttons: vec![
                (Action::Left, GamepadButton::DPadLeft),
                (Action::Right, GamepadButton::DPadRight),
                (Action::Up, GamepadButton::DPadUp),
                (Action::Down, GamepadButton::DPadDown),
                (Action::Jump, GamepadButton::South),
                (Action::Run, GamepadButton::West),
            ],
        }
    }
}

impl ControlBindings {
    pub fn keys_held(&self, keys: &ButtonInput<KeyCode>) -> ActionSet {
        self.keys
            .iter()
            .filter(|(_, key)| keys.pressed(*key))
            .fold(ActionSet::default(), |set, (action, _)| set.with(*action))
    }

    pub fn pad_held(&self, gamepad: &Gamepad) -> ActionSet {
        let mut held = self
            .buttons
            .iter()
            .filter(|(_, button)| gamepad.pressed(*button))
            .fold(ActionSet::default(), |set, (action, _)| set.with(*action));
        held = held.union(stick_directions(gamepad.left_stick()));
        held
    }
}

pub fn stick_directions(stick: Vec2) -> ActionSet {
    let mut held = ActionSet::default();
    if stick.x <= -STICK_THRESHOLD {
        held.insert(Action::Left);
    } else if stick.x >= STICK_THRESHOLD {
        held.insert(Action::Right);
    }
    if stick.y <= -STICK_THRESHOLD {
        held.insert(Action::Down);
    } else if stick.y >= STICK_THRESHOLD {
        held.insert(Action::Up);
    }
    held
}

pub(crate) fn record_controls(
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    bindings: Res<ControlBindings>,
    mut controls: Query<&mut Controls>,
) {
    let keys_held = bindings.keys_held(&keys);
    let pad_held = gamepads
        .iter()
        .next()
        .map(|gamepad| bindings.pad_held(gamepad))
        .unwrap_or_default();
    for mut control in &mut controls {
        control.record(keys_held, pad_held);
    }
}

pub(crate) fn begin_control_step(mut controls: Query<&mut Controls>) {
    for mut control in &mut controls {
        control.begin_step();
    }
}
