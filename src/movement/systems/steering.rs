//! Movement domain: the per-step locomotion systems around the solver.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::{Damageable, Downed, EnemyStompedEvent};
use crate::config::{LadderTuning, MovementTuning};
use crate::core::{Sfx, SoundCue};
use crate::input::Controls;
use crate::level::Bouncepad;
use crate::movement::events::PlayerLandedEvent;
use crate::movement::locomotion::{Body, Locomotion, LocomotionEvent, stomp_bounce};
use crate::movement::{Acceleration, MovementState, Player, Surroundings};
use crate::physics::{Bounds, GameLayer, PassThroughOneWay, Side, Slopes, contact_side};

fn body_of(position: &Position, velocity: &LinearVelocity, acceleration: &Acceleration) -> Body {
    Body {
        position: position.0,
        velocity: velocity.0,
        acceleration: acceleration.0,
    }
}

/// Input-driven part of the step: flags, ladders, horizontal intent and
/// jumps. Climbing players pass through one-way platforms.
#[allow(clippy::type_complexity)]
pub(crate) fn steer_player(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    ladders: Res<LadderTuning>,
    mut sounds: MessageWriter<SoundCue>,
    mut players: Query<
        (
            Entity,
            &Controls,
            &Surroundings,
            &mut MovementState,
            &mut Position,
            &mut LinearVelocity,
            &mut Acceleration,
            &Slopes,
            Has<PassThroughOneWay>,
        ),
        (With<Player>, Without<Downed>),
    >,
) {
    let dt = time.delta_secs();
    for (
        entity,
        controls,
        surroundings,
        mut state,
        mut position,
        mut velocity,
        mut acceleration,
        slopes,
        passing,
    ) in &mut players
    {
        let mut body = body_of(&position, &velocity, &acceleration);
        body.velocity = slopes.flatten(body.velocity);

        let locomotion = Locomotion {
            tuning: &tuning,
            ladders: &ladders,
            controls,
            surroundings,
        };
        for event in locomotion.pre_update(&mut state, &mut body, dt) {
            match event {
                LocomotionEvent::Jumped | LocomotionEvent::WallJumped => {
                    sounds.write(SoundCue::new(Sfx::Jump));
                }
                _ => {}
            }
            debug!("Player {:?}: {:?}", entity, event);
        }

        match (state.is_climbing(), passing) {
            (true, false) => {
                commands.entity(entity).insert(PassThroughOneWay);
            }
            (false, true) => {
                commands.entity(entity).remove::<PassThroughOneWay>();
            }
            _ => {}
        }

        if position.0 != body.position {
            position.0 = body.position;
        }
        velocity.0 = body.velocity;
        acceleration.0 = body.acceleration;
    }
}

/// Gravity and integration, then slope reprojection while grounded.
pub(crate) fn integrate_player(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    ladders: Res<LadderTuning>,
    mut players: Query<
        (
            &Controls,
            &Surroundings,
            &mut MovementState,
            &Position,
            &mut LinearVelocity,
            &mut Acceleration,
            &mut Slopes,
        ),
        (With<Player>, Without<Downed>),
    >,
) {
    let dt = time.delta_secs();
    for (controls, surroundings, mut state, position, mut velocity, mut acceleration, mut slopes) in
        &mut players
    {
        let mut body = body_of(position, &velocity, &acceleration);
        let locomotion = Locomotion {
            tuning: &tuning,
            ladders: &ladders,
            controls,
            surroundings,
        };
        locomotion.integrate(&mut state, &mut body, dt);
        if state.on_ground && !state.is_climbing() {
            let (adjusted, _) = slopes.adjust(body.velocity);
            body.velocity = adjusted;
        }
        velocity.0 = body.velocity;
        acceleration.0 = body.acceleration;
    }
}

/// A fresh contact on the feet after being airborne is a landing.
#[allow(clippy::type_complexity)]
pub(crate) fn detect_landings(
    mut started: MessageReader<CollisionStart>,
    collisions: Collisions,
    terrain: Query<(&CollisionLayers, &Position, &Collider), Without<Sensor>>,
    bouncepads: Query<(), With<Bouncepad>>,
    mut players: Query<
        (
            &mut MovementState,
            &Position,
            &Collider,
            &mut LinearVelocity,
            &mut Acceleration,
        ),
        (With<Player>, Without<Downed>),
    >,
    mut landed: MessageWriter<PlayerLandedEvent>,
    mut sounds: MessageWriter<SoundCue>,
) {
    let solid = GameLayer::mask_of(&[GameLayer::Ground, GameLayer::Hazard]);
    for event in started.read() {
        for (player, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok((mut state, position, collider, mut velocity, mut acceleration)) =
                players.get_mut(player)
            else {
                continue;
            };
            if state.on_ground || state.is_climbing() {
                continue;
            }
            let Ok((layers, other_position, other_collider)) = terrain.get(other) else {
                continue;
            };
            if layers.memberships.0 & solid == 0 {
                continue;
            }
            let side = contact_side(
                &collisions,
                player,
                other,
                Some(Bounds::of_body(position.0, collider)),
                Some(Bounds::of_body(other_position.0, other_collider)),
            );
            if side != Some(Side::Bottom) {
                continue;
            }

            let on_bouncepad = bouncepads.contains(other);
            let mut body = Body {
                position: position.0,
                velocity: velocity.0,
                acceleration: acceleration.0,
            };
            state.land(&mut body, on_bouncepad);
            velocity.0 = body.velocity;
            acceleration.0 = body.acceleration;

            debug!("Player {:?} landed on {:?}", player, other);
            sounds.write(SoundCue::new(Sfx::Footstep));
            landed.write(PlayerLandedEvent {
                player,
                on_bouncepad,
            });
        }
    }
}

/// Stomping an enemy bounces the stomper; holding jump keeps the lighter
/// jump gravity for a higher bounce.
pub(crate) fn bounce_off_stomps(
    mut stomped: MessageReader<EnemyStompedEvent>,
    tuning: Res<MovementTuning>,
    mut players: Query<
        (&Controls, &mut MovementState, &Position, &mut LinearVelocity),
        (With<Player>, Without<Downed>),
    >,
) {
    for event in stomped.read() {
        let Ok((controls, mut state, position, mut velocity)) = players.get_mut(event.stomper)
        else {
            continue;
        };
        let mut body = Body {
            position: position.0,
            velocity: velocity.0,
            acceleration: Vec2::ZERO,
        };
        state.launch(&mut body, stomp_bounce(&tuning, controls.is_sprinting()), true);
        velocity.0 = body.velocity;
    }
}

/// Deceleration and speed caps after the solver, then the sprint timer.
#[allow(clippy::type_complexity)]
pub(crate) fn settle_player(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    ladders: Res<LadderTuning>,
    mut players: Query<
        (
            &mut Controls,
            &Surroundings,
            &mut MovementState,
            &Position,
            &mut LinearVelocity,
            &mut Acceleration,
            Option<&Damageable>,
        ),
        (With<Player>, Without<Downed>),
    >,
) {
    let dt = time.delta_secs();
    for (mut controls, surroundings, mut state, position, mut velocity, mut acceleration, damageable) in
        &mut players
    {
        let mut body = body_of(position, &velocity, &acceleration);
        // Hurt during this step's contacts.
        let knocked_back = damageable.is_some_and(Damageable::is_being_knocked_back);
        if !knocked_back {
            let locomotion = Locomotion {
                tuning: &tuning,
                ladders: &ladders,
                controls: &controls,
                surroundings,
            };
            locomotion.post_update(&mut state, &mut body, dt);
        }
        controls.tick_sprint(dt, state.on_ground, body.velocity.x);

        velocity.0 = body.velocity;
        acceleration.0 = body.acceleration;
    }
}
