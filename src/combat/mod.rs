//! Combat domain: damage capabilities, stomp vs. hurt resolution and the
//! kill lifecycle.

mod components;
mod contact;
mod events;
mod systems;


pub use components::{
    Damage, Damageable, DamageableTick, Downed, Dying, Enemy, KillError, KillMethod, KillOutcome,
    KillPhase, Killable, PlaceholderPop, SQUISH_SHARE, Stompable,
};
pub use contact::{
    ContactResolution, ContactVerdict, PendingResolutions, QueueResolution, ThreatProfile,
    judge_contact, keeps_contact, was_above,
};
pub use events::{EnemyStompedEvent, PlayerDownedEvent, PlayerHurtEvent};
pub use systems::{PopRng, knockback_velocity, pop_velocity};

use bevy::prelude::*;

use crate::core::StepSet;
use crate::combat::systems::{
    apply_contact_resolutions, down_fallen_players, fall_pops, remove_fallen, spawn_hurt_pops,
    start_downed_sequence, tick_damageables, tick_downed, tick_killables,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingResolutions>()
            .init_resource::<PopRng>()
            .add_message::<EnemyStompedEvent>()
            .add_message::<PlayerHurtEvent>()
            .add_message::<PlayerDownedEvent>()
            .add_systems(
                FixedLast,
                apply_contact_resolutions.in_set(StepSet::Contacts),
            )
            .add_systems(
                FixedLast,
                (
                    tick_damageables,
                    tick_killables,
                    remove_fallen,
                    (down_fallen_players, start_downed_sequence, tick_downed).chain(),
                    (spawn_hurt_pops, fall_pops).chain(),
                )
                    .in_set(StepSet::Settle),
            );
    }
}
