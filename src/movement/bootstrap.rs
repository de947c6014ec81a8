//! Movement domain: the player's spawn bundle.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Damageable;
use crate::config::{CombatTuning, MovementTuning, SlopeTuning};
use crate::input::Controls;
use crate::movement::{Acceleration, MovementState, Player, Surroundings};
use crate::physics::{Carriable, GameLayer, PreviousPosition, Slopes, Touching};
use crate::sprites::Animator;

/// Everything a freshly spawned player needs, centred on `at`.
pub fn player_bundle(
    at: Vec2,
    movement: &MovementTuning,
    combat: &CombatTuning,
    slopes: &SlopeTuning,
) -> impl Bundle {
    let size = Vec2::new(movement.player_width, movement.player_height);
    (
        // Identity & movement
        (
            Name::new("Player"),
            Player,
            Controls::new(movement.sprint_trigger_time),
            MovementState::new(movement),
            Surroundings::default(),
            Acceleration::default(),
            Slopes::new(slopes.breakaway_angle),
        ),
        // Combat
        Damageable::from_tuning(combat),
        // Rendering
        Animator::new(size),
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(at.extend(10.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // Gravity is applied by the locomotion step.
            GravityScale(0.0),
            Friction::ZERO,
            CollisionEventsEnabled,
            GameLayer::player(),
            ActiveCollisionHooks::MODIFY_CONTACTS,
            Touching::default(),
            PreviousPosition(at),
            Carriable::default(),
        ),
    )
}
