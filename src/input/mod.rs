//! Input domain: keyboard and gamepad mapped to platformer actions.

mod controls;
mod systems;


pub use controls::{Action, ActionSet, Controls, Horizontal, Vertical};
pub use systems::{ControlBindings, stick_directions};

use bevy::prelude::*;

use crate::core::playing;
use crate::input::systems::{begin_control_step, record_controls};

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlBindings>()
            .add_systems(Update, record_controls)
            .add_systems(FixedPreUpdate, begin_control_step.run_if(playing));
    }
}
