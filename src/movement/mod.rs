//! Movement domain: the player's locomotion.
//!
//! Sensing fills [`Surroundings`] from probes and contacts, then the
//! step systems drive [`Locomotion`] around the solver: intent and
//! integration in `FixedUpdate`, landing and deceleration in `FixedLast`.

mod bootstrap;
mod components;
mod events;
pub mod ladder;
mod locomotion;
mod systems;

#[cfg(test)]
mod tests;

pub use bootstrap::player_bundle;
pub use components::{
    Acceleration, Coyote, Facing, Ladder, LadderSpan, MovementState, Player, Surroundings,
    WallContact, WallJumpLock,
};
pub use events::PlayerLandedEvent;
pub use locomotion::{Body, Locomotion, LocomotionEvent, decelerate, stomp_bounce};

use bevy::prelude::*;

use crate::core::StepSet;
use crate::movement::systems::{
    bounce_off_stomps, detect_landings, integrate_player, sense_surroundings, settle_player,
    steer_player,
};
use crate::physics::{carry_passengers, refresh_touching_sides, track_touching};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayerLandedEvent>()
            .add_systems(
                FixedUpdate,
                sense_surroundings
                    .after(refresh_touching_sides)
                    .in_set(StepSet::Sense),
            )
            .add_systems(
                FixedUpdate,
                steer_player.after(carry_passengers).in_set(StepSet::Intent),
            )
            .add_systems(FixedUpdate, integrate_player.in_set(StepSet::Integrate))
            .add_systems(
                FixedLast,
                detect_landings.after(track_touching).in_set(StepSet::Contacts),
            )
            .add_systems(
                FixedLast,
                (bounce_off_stomps, settle_player)
                    .chain()
                    .in_set(StepSet::Settle),
            );
    }
}
