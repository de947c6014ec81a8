//! Enemies domain: spawn bundles for every enemy and hazard kind.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Damage, Enemy, Killable, Stompable};
use crate::config::{CombatTuning, EnemyTuning};
use crate::core::LevelScoped;
use crate::enemies::components::{BirdVariant, EnemyKind, Flyer, Patrol, Saw, WalkerVariant};
use crate::physics::{Carriable, GameLayer, PreviousPosition, Touching};

/// Body parts shared by every stompable enemy.
#[derive(Bundle)]
pub struct EnemyBundle {
    pub name: Name,
    pub scoped: LevelScoped,
    pub enemy: Enemy,
    pub damage: Damage,
    pub stompable: Stompable,
    pub killable: Killable,
    pub sprite: Sprite,
    pub transform: Transform,
    pub collider: Collider,
    pub collision_events: CollisionEventsEnabled,
    pub hooks: ActiveCollisionHooks,
    pub velocity: LinearVelocity,
    pub locked_axes: LockedAxes,
    pub previous: PreviousPosition,
}

impl EnemyBundle {
    pub fn new(name: &'static str, at: Vec2, size: Vec2, color: Color, kill_duration: f32) -> Self {
        Self {
            name: Name::new(name),
            scoped: LevelScoped,
            enemy: Enemy,
            damage: Damage::enemy(1),
            stompable: Stompable::default(),
            killable: Killable::new(kill_duration),
            sprite: Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(at.extend(5.0)),
            collider: Collider::rectangle(size.x, size.y),
            collision_events: CollisionEventsEnabled,
            hooks: ActiveCollisionHooks::MODIFY_CONTACTS,
            velocity: LinearVelocity::default(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            previous: PreviousPosition(at),
        }
    }
}

/// Ground walker: falls under world gravity and patrols.
pub fn walker_bundle(
    kind: EnemyKind,
    at: Vec2,
    tuning: &EnemyTuning,
    combat: &CombatTuning,
) -> impl Bundle {
    let (name, size, variant) = match kind {
        EnemyKind::Spider(variant) => ("Spider", Vec2::new(16.0, 12.0), variant),
        EnemyKind::Bug(variant) => ("Bug", Vec2::new(16.0, 10.0), variant),
        EnemyKind::Bird(_) => {
            warn!("Walker bundle requested for {:?}, spawning a bug", kind);
            ("Bug", Vec2::new(16.0, 10.0), WalkerVariant::Green)
        }
    };
    (
        EnemyBundle::new(name, at, size, variant.color(), combat.kill_duration),
        Patrol::new(variant.speed(tuning)),
        RigidBody::Dynamic,
        Friction::ZERO,
        GameLayer::enemy(),
        Touching::default(),
        Carriable::default(),
    )
}

/// Bird: ignores terrain and gravity, drifts down slowly once stomped.
pub fn bird_bundle(variant: BirdVariant, at: Vec2, tuning: &EnemyTuning) -> impl Bundle {
    (
        EnemyBundle::new(
            "Bird",
            at,
            Vec2::new(16.0, 12.0),
            variant.color(),
            tuning.bird_kill_duration,
        ),
        Flyer::new(at.x, variant.pattern(tuning)),
        RigidBody::Kinematic,
        GameLayer::flying_enemy(),
    )
}

/// Lethal spinning saw. Only the player touches it.
pub fn saw_bundle(at: Vec2, tuning: &EnemyTuning) -> impl Bundle {
    (
        Name::new("Saw"),
        LevelScoped,
        Saw,
        Damage::lethal(),
        Sprite {
            color: Color::srgb(0.75, 0.75, 0.8),
            custom_size: Some(Vec2::splat(tuning.saw_radius * 2.0)),
            ..default()
        },
        Transform::from_translation(at.extend(4.0)),
        RigidBody::Kinematic,
        Collider::circle(tuning.saw_radius),
        AngularVelocity(tuning.saw_spin),
        GameLayer::player_hazard(),
    )
}

pub fn spawn_enemy(
    commands: &mut Commands,
    kind: EnemyKind,
    at: Vec2,
    tuning: &EnemyTuning,
    combat: &CombatTuning,
) -> Entity {
    let entity = match kind {
        EnemyKind::Bug(_) | EnemyKind::Spider(_) => {
            commands.spawn(walker_bundle(kind, at, tuning, combat)).id()
        }
        EnemyKind::Bird(variant) => commands.spawn(bird_bundle(variant, at, tuning)).id(),
    };
    debug!("Spawned {:?} {:?} at {:?}", kind, entity, at);
    entity
}
