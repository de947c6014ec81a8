//! Level domain: named entity factories for placed objects.
//!
//! Each object class in a level file maps to one factory. The factory reads
//! the object's rect and free-form properties and spawns whatever it stands
//! for. Unknown classes are skipped with a warning.

use avian2d::prelude::*;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::config::{CombatTuning, EnemyTuning, MovementTuning, PlatformTuning, SlopeTuning};
use crate::core::LevelScoped;
use crate::enemies::{EnemyKind, EnemySpawner, saw_bundle, spawn_enemy};
use crate::level::components::{Bouncepad, BouncepadVariant, Coin, MovingPlatform};
use crate::level::data::{LevelFile, LevelObject};
use crate::movement::player_bundle;
use crate::physics::{Carrier, GameLayer, OneWayPlatform, SettleNudge, Touching};

/// Everything a factory may read while the level is being built.
pub struct FactoryContext<'a> {
    pub level: &'a LevelFile,
    pub movement: &'a MovementTuning,
    pub combat: &'a CombatTuning,
    pub slope: &'a SlopeTuning,
    pub enemies: &'a EnemyTuning,
    pub platforms: &'a PlatformTuning,
}

pub type EntityFactory = fn(&mut Commands, &FactoryContext, &LevelObject);

/// Object class to factory lookup.
#[derive(Resource)]
pub struct EntityFactories {
    factories: HashMap<String, EntityFactory>,
}

impl Default for EntityFactories {
    fn default() -> Self {
        let mut factories = Self {
            factories: HashMap::new(),
        };
        factories
            .register("player", spawn_player)
            .register("bug", spawn_placed_enemy)
            .register("spider", spawn_placed_enemy)
            .register("bird", spawn_placed_enemy)
            .register("spawner", spawn_spawner)
            .register("saw", spawn_saw)
            .register("moving_platform", spawn_moving_platform)
            .register("bouncepad", spawn_bouncepad)
            .register("coin", spawn_coin);
        factories
    }
}

impl EntityFactories {
    pub fn register(&mut self, class: &str, factory: EntityFactory) -> &mut Self {
        self.factories.insert(class.to_string(), factory);
        self
    }

    pub fn get(&self, class: &str) -> Option<EntityFactory> {
        self.factories.get(class).copied()
    }

    /// Run the factory for `object`. Returns false for unknown classes.
    pub fn spawn(&self, commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) -> bool {
        let Some(factory) = self.get(&object.class) else {
            return false;
        };
        factory(commands, ctx, object);
        true
    }
}

fn spawn_player(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let at = ctx.level.object_center(object);
    commands.spawn((
        player_bundle(at, ctx.movement, ctx.combat, ctx.slope),
        LevelScoped,
    ));
    info!("Player spawned at {:?}", at);
}

fn spawn_placed_enemy(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let Some(kind) = EnemyKind::parse(&object.class, object.text("variant")) else {
        return;
    };
    spawn_enemy(
        commands,
        kind,
        ctx.level.object_center(object),
        ctx.enemies,
        ctx.combat,
    );
}

/// Spawns nothing itself; its `enemy` appears whenever the point scrolls
/// into view.
fn spawn_spawner(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let class = object.text("enemy").unwrap_or("bug");
    let Some(kind) = EnemyKind::parse(class, object.text("variant")) else {
        warn!("Spawner {} names unknown enemy '{}'", object.id, class);
        return;
    };
    commands.spawn((
        Name::new("EnemySpawner"),
        LevelScoped,
        EnemySpawner::new(kind, ctx.level.object_center(object)),
    ));
}

fn spawn_saw(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    commands.spawn(saw_bundle(ctx.level.object_center(object), ctx.enemies));
}

/// Path runs from the spawn point to the object named by `path`. Without a
/// path the platform stays put.
fn spawn_moving_platform(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let from = ctx.level.object_center(object);
    let to = match object.reference("path").map(|id| ctx.level.object(id)) {
        Some(Some(target)) => ctx.level.object_center(target),
        Some(None) => {
            warn!("Moving platform {} has a dangling path reference", object.id);
            from
        }
        None => from,
    };
    let speed = object
        .float("speed")
        .unwrap_or(ctx.platforms.moving_platform_speed);
    let size = object.size_or(ctx.level.tile_size);

    let mut platform = commands.spawn((
        Name::new("MovingPlatform"),
        LevelScoped,
        MovingPlatform::new(from, to, speed),
        Sprite {
            color: Color::srgb(0.55, 0.4, 0.25),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(from.extend(2.0)),
        RigidBody::Kinematic,
        Collider::rectangle(size.x, size.y),
        LinearVelocity::default(),
        GameLayer::ground(),
        Carrier::default(),
        SettleNudge::default(),
    ));
    if object.flag("one_way").unwrap_or(true) {
        platform.insert(OneWayPlatform);
    }
}

fn spawn_bouncepad(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let variant = BouncepadVariant::parse(object.text("variant"));
    let size = object.size_or(ctx.level.tile_size);
    let at = ctx.level.object_center(object);
    commands.spawn((
        Name::new("Bouncepad"),
        LevelScoped,
        Bouncepad::new(variant, ctx.platforms),
        Sprite {
            color: variant.color(),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(at.extend(2.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        GameLayer::ground(),
        OneWayPlatform,
        Touching::default(),
        CollisionEventsEnabled,
    ));
}

fn spawn_coin(commands: &mut Commands, ctx: &FactoryContext, object: &LevelObject) {
    let at = ctx.level.object_center(object);
    commands.spawn((
        Name::new("Coin"),
        LevelScoped,
        Coin::new(ctx.platforms),
        Sprite {
            color: Color::srgb(1.0, 0.85, 0.2),
            custom_size: Some(Vec2::splat(8.0)),
            ..default()
        },
        Transform::from_translation(at.extend(3.0)),
        RigidBody::Static,
        Collider::circle(4.0),
        Sensor,
        GameLayer::item(),
        CollisionEventsEnabled,
    ));
}
