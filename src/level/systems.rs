//! Level domain: loading, building and restarting the level, plus the
//! per-step behavior of its props.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::combat::Damage;
use crate::config::{CombatTuning, EnemyTuning, MovementTuning, PlatformTuning, SlopeTuning};
use crate::core::{
    CoinsChangedEvent, GameSession, GameState, LevelBounds, LevelScoped, PlaySongEvent,
    RestartLevelEvent, Sfx, SoundCue,
};
use crate::level::components::{Bouncepad, Coin, LevelWall, MovingPlatform};
use crate::level::data::{LevelFile, load_level};
use crate::level::factories::{EntityFactories, FactoryContext};
use crate::level::tiles::{TileBody, TileBodyKind, plan_tile_bodies};
use crate::movement::{Body, Ladder, MovementState, Player};
use crate::physics::{GameLayer, OneWayPlatform, Side, SlopeSurface, Touching};

/// Where the level is read from.
#[derive(Resource, Debug, Clone)]
pub struct LevelSource(pub PathBuf);

/// The parsed level, kept for restarts.
#[derive(Resource, Debug, Clone)]
pub struct LoadedLevel(pub LevelFile);

/// Thickness of the walls closing off the level's sides and top.
const WALL_THICKNESS: f32 = 16.0;

#[derive(SystemParam)]
pub(crate) struct LevelBuilder<'w, 's> {
    commands: Commands<'w, 's>,
    factories: Res<'w, EntityFactories>,
    movement: Res<'w, MovementTuning>,
    combat: Res<'w, CombatTuning>,
    slope: Res<'w, SlopeTuning>,
    enemies: Res<'w, EnemyTuning>,
    platforms: Res<'w, PlatformTuning>,
    session: ResMut<'w, GameSession>,
    bounds: ResMut<'w, LevelBounds>,
    songs: MessageWriter<'w, PlaySongEvent>,
    coins: MessageWriter<'w, CoinsChangedEvent>,
}

impl LevelBuilder<'_, '_> {
    fn build(&mut self, level: &LevelFile) {
        let bodies = plan_tile_bodies(level);
        for body in &bodies {
            spawn_tile_body(&mut self.commands, body);
        }
        spawn_walls(&mut self.commands, level.bounds());

        let ctx = FactoryContext {
            level,
            movement: &self.movement,
            combat: &self.combat,
            slope: &self.slope,
            enemies: &self.enemies,
            platforms: &self.platforms,
        };
        for object in &level.objects {
            if !self.factories.spawn(&mut self.commands, &ctx, object) {
                warn!("No factory for object class '{}' (id {})", object.class, object.id);
            }
        }

        self.bounds.0 = Some(level.bounds());
        self.session.reset();
        self.coins.write(CoinsChangedEvent {
            coins: self.session.coins(),
        });
        if let Some(song) = &level.song {
            self.songs.write(PlaySongEvent { path: song.clone() });
        }
        info!(
            "Level built: {} tile bodies, {} objects",
            bodies.len(),
            level.objects.len()
        );
    }
}

fn spawn_tile_body(commands: &mut Commands, body: &TileBody) {
    let center = body.rect.center();
    let size = body.rect.size();
    let color = match body.kind {
        TileBodyKind::Solid | TileBodyKind::Slope(_) => Color::srgb(0.35, 0.25, 0.2),
        TileBodyKind::OneWay => Color::srgb(0.5, 0.35, 0.2),
        TileBodyKind::Spikes => Color::srgb(0.7, 0.7, 0.75),
        TileBodyKind::Ladder => Color::srgba(0.6, 0.45, 0.25, 0.6),
    };
    let mut entity = commands.spawn((
        Name::new(format!("{:?}", body.kind)),
        LevelScoped,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.0)),
        RigidBody::Static,
    ));

    match body.kind {
        TileBodyKind::Solid => {
            entity.insert((Collider::rectangle(size.x, size.y), GameLayer::ground()));
        }
        TileBodyKind::OneWay => {
            entity.insert((
                Collider::rectangle(size.x, size.y),
                GameLayer::ground(),
                OneWayPlatform,
            ));
        }
        TileBodyKind::Spikes => {
            entity.insert((
                Collider::rectangle(size.x, size.y),
                GameLayer::hazard(),
                Damage::hazard(1),
            ));
        }
        TileBodyKind::Ladder => {
            entity.insert((
                Collider::rectangle(size.x, size.y),
                Sensor,
                GameLayer::climbable(),
                Ladder {
                    center_x: center.x,
                    bottom: body.rect.min.y,
                    top: body.rect.max.y,
                },
            ));
        }
        TileBodyKind::Slope(_) => {
            let Some((begin, end)) = body.slope_edge() else {
                return;
            };
            let peak = if begin.y > end.y { begin } else { end };
            let (bottom_left, bottom_right) = (
                body.rect.min,
                Vec2::new(body.rect.max.x, body.rect.min.y),
            );
            entity.insert((
                Collider::triangle(bottom_left - center, bottom_right - center, peak - center),
                GameLayer::ground(),
                SlopeSurface { begin, end },
            ));
        }
    }
}

/// Left, right and top walls. The bottom stays open so falling out of the
/// level is possible.
fn spawn_walls(commands: &mut Commands, bounds: Rect) {
    let height = bounds.height() + WALL_THICKNESS * 2.0;
    let mid_y = bounds.center().y + WALL_THICKNESS / 2.0;
    let walls = [
        (
            Vec2::new(bounds.min.x - WALL_THICKNESS / 2.0, mid_y),
            Vec2::new(WALL_THICKNESS, height),
        ),
        (
            Vec2::new(bounds.max.x + WALL_THICKNESS / 2.0, mid_y),
            Vec2::new(WALL_THICKNESS, height),
        ),
        (
            Vec2::new(bounds.center().x, bounds.max.y + WALL_THICKNESS / 2.0),
            Vec2::new(bounds.width(), WALL_THICKNESS),
        ),
    ];
    for (center, size) in walls {
        commands.spawn((
            Name::new("LevelWall"),
            LevelScoped,
            LevelWall,
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            GameLayer::ground(),
        ));
    }
}

pub(crate) fn read_level(
    mut commands: Commands,
    source: Res<LevelSource>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match load_level(&source.0) {
        Ok(level) => {
            info!(
                "Loaded level {} ({}x{} tiles, {} objects)",
                source.0.display(),
                level.columns(),
                level.rows(),
                level.objects.len()
            );
            commands.insert_resource(LoadedLevel(level));
            next_state.set(GameState::Playing);
        }
        Err(e) => {
            error!("{}", e);
            next_state.set(GameState::Failed);
        }
    }
}

pub(crate) fn enter_level(level: Res<LoadedLevel>, mut builder: LevelBuilder) {
    builder.build(&level.0);
}

pub(crate) fn restart_level(
    mut requests: MessageReader<RestartLevelEvent>,
    level: Res<LoadedLevel>,
    scoped: Query<Entity, With<LevelScoped>>,
    mut builder: LevelBuilder,
) {
    if requests.read().count() == 0 {
        return;
    }
    let mut despawned = 0;
    for entity in &scoped {
        builder.commands.entity(entity).despawn();
        despawned += 1;
    }
    info!("Restarting level ({} entities cleared)", despawned);
    builder.build(&level.0);
}

pub(crate) fn move_platforms(
    time: Res<Time>,
    mut platforms: Query<(&Position, &mut MovingPlatform, &mut LinearVelocity)>,
) {
    let dt = time.delta_secs();
    for (position, mut platform, mut velocity) in &mut platforms {
        velocity.0 = platform.velocity(position.0, dt);
    }
}

/// Anything resting on top of an idle pad pushes it down.
pub(crate) fn compress_bouncepads(
    mut pads: Query<(Entity, &mut Bouncepad, &mut Position, &Touching)>,
) {
    for (entity, mut pad, mut position, touching) in &mut pads {
        if touching.any_on(Side::Top) && pad.compress() {
            position.0.y -= pad.depth;
            debug!("Bouncepad {:?} compressed", entity);
        }
    }
}

/// Released pads spring back and launch everything on top.
#[allow(clippy::type_complexity)]
pub(crate) fn release_bouncepads(
    time: Res<Time>,
    mut pads: Query<(&mut Bouncepad, &mut Position, &Touching)>,
    mut riders: Query<
        (&mut LinearVelocity, &Position, Option<&mut MovementState>),
        Without<Bouncepad>,
    >,
    mut sounds: MessageWriter<SoundCue>,
) {
    let dt = time.delta_secs();
    for (mut pad, mut position, touching) in &mut pads {
        if !pad.tick(dt) {
            continue;
        }
        position.0.y += pad.depth;
        for rider in touching.on(Side::Top) {
            let Ok((mut velocity, rider_position, state)) = riders.get_mut(rider) else {
                continue;
            };
            match state {
                Some(mut state) => {
                    let mut body = Body {
                        position: rider_position.0,
                        velocity: velocity.0,
                        acceleration: Vec2::ZERO,
                    };
                    state.launch(&mut body, pad.force, false);
                    velocity.0 = body.velocity;
                }
                None => velocity.y = pad.force,
            }
        }
        sounds.write(SoundCue::new(Sfx::Bounce));
    }
}

pub(crate) fn collect_coins(
    mut started: MessageReader<CollisionStart>,
    players: Query<(), With<Player>>,
    mut coins: Query<&mut Coin>,
    mut session: ResMut<GameSession>,
    mut changed: MessageWriter<CoinsChangedEvent>,
    mut sounds: MessageWriter<SoundCue>,
) {
    for event in started.read() {
        for (coin, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !players.contains(other) {
                continue;
            }
            let Ok(mut coin) = coins.get_mut(coin) else {
                continue;
            };
            if !coin.collect() {
                continue;
            }
            session.add_coins(1);
            changed.write(CoinsChangedEvent {
                coins: session.coins(),
            });
            sounds.write(SoundCue::new(Sfx::Coin));
        }
    }
}

/// Collected coins float up while fading, then disappear.
pub(crate) fn fade_coins(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<PlatformTuning>,
    mut coins: Query<(Entity, &mut Coin, &mut Position, Option<&mut Sprite>)>,
) {
    let dt = time.delta_secs();
    for (entity, mut coin, mut position, sprite) in &mut coins {
        if !coin.is_collected() {
            continue;
        }
        position.0.y += tuning.coin_float_speed * dt;
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(coin.opacity());
        }
        if coin.tick(dt) {
            commands.entity(entity).despawn();
        }
    }
}
