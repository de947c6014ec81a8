//! Combat domain: applying contact verdicts, damage windows and removal.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combat::components::{
    Damageable, Downed, Dying, KillMethod, KillOutcome, KillPhase, Killable, PlaceholderPop,
    Stompable,
};
use crate::combat::contact::{ContactResolution, PendingResolutions};
use crate::combat::events::{EnemyStompedEvent, PlayerDownedEvent, PlayerHurtEvent};
use crate::config::{CombatTuning, MovementTuning};
use crate::core::{
    CoinsChangedEvent, GameSession, LevelBounds, LevelScoped, RestartLevelEvent, Sfx, SoundCue,
    Viewport,
};

/// How far below the level a body may fall before it is removed.
const FALL_OUT_MARGIN: f32 = 64.0;

/// Randomness for placeholder effects.
#[derive(Resource, Debug)]
pub struct PopRng(pub ChaCha8Rng);

impl Default for PopRng {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(rand::random::<u64>()))
    }
}

/// Launch velocity of a placeholder pop.
pub fn pop_velocity(rng: &mut impl Rng, spread: f32, vertical: f32) -> Vec2 {
    let spread = spread.abs();
    Vec2::new(rng.random_range(-spread..=spread), vertical)
}

/// Knockback away from the source, always upward.
pub fn knockback_velocity(direction: f32, tuning: &CombatTuning) -> Vec2 {
    Vec2::new(
        direction.signum() * tuning.knockback_horizontal,
        tuning.knockback_vertical,
    )
}

pub(crate) fn apply_contact_resolutions(
    mut commands: Commands,
    mut pending: ResMut<PendingResolutions>,
    mut session: ResMut<GameSession>,
    tuning: Res<CombatTuning>,
    mut killables: Query<(&mut Killable, Option<&mut Stompable>)>,
    mut damageables: Query<(&mut Damageable, &mut LinearVelocity), Without<Downed>>,
    mut stomped: MessageWriter<EnemyStompedEvent>,
    mut hurt: MessageWriter<PlayerHurtEvent>,
    mut downed: MessageWriter<PlayerDownedEvent>,
    mut coins: MessageWriter<CoinsChangedEvent>,
    mut sounds: MessageWriter<SoundCue>,
) {
    for resolution in std::mem::take(&mut pending.0) {
        match resolution {
            ContactResolution::Stomp { stomper, target } => {
                let Ok((mut killable, mut stompable)) = killables.get_mut(target) else {
                    continue;
                };
                let result = killable.kill(KillMethod::Stomp, stompable.as_deref_mut());
                debug_assert!(result.is_ok(), "stomp on {target:?} failed: {result:?}");
                match result {
                    Ok(KillOutcome::Squished) => {
                        commands.entity(target).insert((
                            Dying,
                            CollisionLayers::NONE,
                            GravityScale(0.0),
                            LinearVelocity::ZERO,
                        ));
                        stomped.write(EnemyStompedEvent {
                            stomper,
                            enemy: target,
                        });
                        sounds.write(SoundCue::forced(Sfx::Stomp));
                        debug!("{:?} stomped {:?}", stomper, target);
                    }
                    Ok(KillOutcome::Removed) => {
                        commands.entity(target).despawn();
                    }
                    Ok(KillOutcome::AlreadyDead) => {}
                    Err(err) => error!("cannot stomp {:?}: {}", target, err),
                }
            }
            ContactResolution::Hurt {
                victim,
                source,
                amount,
                direction,
            } => {
                let Ok((mut damageable, mut velocity)) = damageables.get_mut(victim) else {
                    continue;
                };
                if !damageable.damage() {
                    continue;
                }
                let broke = session.lose_coins(amount);
                coins.write(CoinsChangedEvent {
                    coins: session.coins(),
                });
                if broke {
                    info!("Player {:?} is out of coins", victim);
                    downed.write(PlayerDownedEvent { player: victim });
                    sounds.write(SoundCue::forced(Sfx::Death));
                } else {
                    velocity.0 = knockback_velocity(direction, &tuning);
                    hurt.write(PlayerHurtEvent {
                        player: victim,
                        source,
                        amount,
                    });
                    sounds.write(SoundCue::new(Sfx::Hurt));
                    info!(
                        "Player {:?} hurt by {:?}, {} coins left",
                        victim,
                        source,
                        session.coins()
                    );
                }
            }
        }
    }
}

pub(crate) fn tick_damageables(
    time: Res<Time>,
    mut query: Query<(&mut Damageable, &mut LinearVelocity, Option<&mut Sprite>)>,
) {
    let dt = time.delta_secs();
    for (mut damageable, mut velocity, sprite) in &mut query {
        let ended = damageable.tick(dt);
        if ended.knockback_ended {
            velocity.x = 0.0;
        }
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(damageable.opacity());
        }
    }
}

pub(crate) fn tick_killables(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    mut query: Query<(Entity, &mut Killable, &mut Transform, Option<&mut Sprite>), With<Dying>>,
) {
    let dt = time.delta_secs();
    for (entity, mut killable, mut transform, sprite) in &mut query {
        match killable.tick(dt) {
            KillPhase::Alive => {}
            KillPhase::Squished => transform.scale.y = tuning.squish_scale,
            KillPhase::Fading { alpha } => {
                transform.scale.y = tuning.squish_scale;
                if let Some(mut sprite) = sprite {
                    sprite.color.set_alpha(alpha);
                }
            }
            KillPhase::Finished => {
                debug!("Removing killed {:?}", entity);
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Killables that drop out of the level are killed instantly.
pub(crate) fn remove_fallen(
    mut commands: Commands,
    bounds: Res<LevelBounds>,
    mut query: Query<(Entity, &Position, &mut Killable), Without<Dying>>,
) {
    let Some(level) = bounds.0 else {
        return;
    };
    for (entity, position, mut killable) in &mut query {
        if position.y >= level.min.y - FALL_OUT_MARGIN {
            continue;
        }
        if let Ok(KillOutcome::Removed) = killable.kill(KillMethod::Instant, None) {
            debug!("{:?} fell out of the level", entity);
            commands.entity(entity).despawn();
        }
    }
}

/// A player below the level loses every coin.
pub(crate) fn down_fallen_players(
    bounds: Res<LevelBounds>,
    mut session: ResMut<GameSession>,
    query: Query<(Entity, &Position), (With<Damageable>, Without<Downed>)>,
    mut downed: MessageWriter<PlayerDownedEvent>,
    mut coins: MessageWriter<CoinsChangedEvent>,
) {
    let Some(level) = bounds.0 else {
        return;
    };
    for (entity, position) in &query {
        if position.y < level.min.y - FALL_OUT_MARGIN {
            let all = session.coins();
            session.lose_coins(all);
            coins.write(CoinsChangedEvent { coins: 0 });
            downed.write(PlayerDownedEvent { player: entity });
        }
    }
}

pub(crate) fn spawn_hurt_pops(
    mut commands: Commands,
    mut hurt: MessageReader<PlayerHurtEvent>,
    mut rng: ResMut<PopRng>,
    tuning: Res<CombatTuning>,
    players: Query<&Position>,
) {
    for event in hurt.read() {
        let Ok(position) = players.get(event.player) else {
            continue;
        };
        let velocity = pop_velocity(
            &mut rng.0,
            tuning.death_pop_spread,
            tuning.death_pop_vertical * 0.5,
        );
        spawn_pop(&mut commands, position.0, velocity, Color::srgb(1.0, 0.85, 0.2), 6.0);
    }
}

pub(crate) fn start_downed_sequence(
    mut commands: Commands,
    mut downed: MessageReader<PlayerDownedEvent>,
    mut rng: ResMut<PopRng>,
    tuning: Res<CombatTuning>,
    players: Query<&Position, Without<Downed>>,
) {
    for event in downed.read() {
        let Ok(position) = players.get(event.player) else {
            continue;
        };
        commands.entity(event.player).insert((
            Downed::new(tuning.death_restart_delay),
            CollisionLayers::NONE,
            LinearVelocity::ZERO,
            Visibility::Hidden,
        ));
        let velocity = pop_velocity(
            &mut rng.0,
            tuning.death_pop_spread,
            tuning.death_pop_vertical,
        );
        spawn_pop(&mut commands, position.0, velocity, Color::srgb(0.9, 0.2, 0.2), 12.0);
    }
}

fn spawn_pop(commands: &mut Commands, at: Vec2, velocity: Vec2, color: Color, size: f32) {
    commands.spawn((
        Name::new("PlaceholderPop"),
        LevelScoped,
        PlaceholderPop::default(),
        Sprite::from_color(color, Vec2::splat(size)),
        RigidBody::Kinematic,
        Position(at),
        LinearVelocity(velocity),
        Transform::from_translation(at.extend(5.0)),
    ));
}

pub(crate) fn fall_pops(
    mut commands: Commands,
    time: Res<Time>,
    movement: Res<MovementTuning>,
    viewport: Res<Viewport>,
    mut pops: Query<(Entity, &mut PlaceholderPop, &Position, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (entity, mut pop, position, mut velocity) in &mut pops {
        velocity.y -= movement.gravity * dt;
        if viewport.contains(position.0) {
            pop.seen = true;
        } else if pop.seen || velocity.y < 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn tick_downed(
    time: Res<Time>,
    mut query: Query<&mut Downed>,
    mut restart: MessageWriter<RestartLevelEvent>,
) {
    let dt = time.delta_secs();
    for mut downed in &mut query {
        if downed.restart.tick(dt) {
            info!("Restarting level");
            restart.write(RestartLevelEvent);
        }
    }
}
