//! Enemies domain: patrol, flight and spawner systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Damage, Dying};
use crate::config::{CombatTuning, EnemyTuning};
use crate::core::Viewport;
use crate::enemies::components::{EnemySpawner, Flyer, Patrol, SpawnerAction};
use crate::enemies::spawn::spawn_enemy;
use crate::physics::{
    Bounds, GameLayer, RayFilter, RayHit, Side, SlopeSurface, Touching, raycast_corners,
};

/// Whether a walker heading in `direction` turns around. It turns when
/// standing but with no ground under its leading corner, or when something
/// solid blocks it ahead.
pub fn should_turn(
    direction: f32,
    ground_left: bool,
    ground_right: bool,
    blocked_ahead: bool,
) -> bool {
    let grounded = ground_left || ground_right;
    let ground_ahead = if direction > 0.0 { ground_right } else { ground_left };
    blocked_ahead || (grounded && !ground_ahead)
}

fn has_ground(hits: &[RayHit], intangible: impl Fn(Entity) -> bool) -> bool {
    hits.iter().any(|hit| !intangible(hit.entity))
}

pub(crate) fn patrol_walkers(
    spatial_query: SpatialQuery,
    tuning: Res<EnemyTuning>,
    threats: Query<&Damage>,
    slopes: Query<(), With<SlopeSurface>>,
    mut walkers: Query<
        (
            Entity,
            &Position,
            &Collider,
            &Touching,
            &mut Patrol,
            &mut LinearVelocity,
            Option<&mut Sprite>,
        ),
        Without<Dying>,
    >,
) {
    for (entity, position, collider, touching, mut patrol, mut velocity, sprite) in &mut walkers {
        let bounds = Bounds::of_body(position.0, collider);
        let filter = RayFilter::new(&[GameLayer::Ground, GameLayer::Hazard]).excluding(entity);
        let intangible = |e: Entity| threats.get(e).is_ok_and(|damage| damage.cancel_contact);

        let [left, right] = raycast_corners(
            &spatial_query,
            &bounds,
            Side::Bottom,
            tuning.edge_probe,
            &filter,
        );
        let ahead = if patrol.direction > 0.0 { Side::Right } else { Side::Left };
        let blocked = touching.on(ahead).any(|other| !slopes.contains(other));

        if should_turn(
            patrol.direction,
            has_ground(&left, intangible),
            has_ground(&right, intangible),
            blocked,
        ) {
            patrol.reverse();
            debug!("{:?} turned to {}", entity, patrol.direction);
        }

        velocity.x = patrol.velocity_x();
        if let Some(mut sprite) = sprite {
            sprite.flip_x = patrol.direction > 0.0;
        }
    }
}

pub(crate) fn fly_birds(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut flyers: Query<(
        &Position,
        &mut Flyer,
        &mut LinearVelocity,
        Option<&mut Sprite>,
        Has<Dying>,
    )>,
) {
    let dt = time.delta_secs();
    for (position, mut flyer, mut velocity, sprite, dying) in &mut flyers {
        velocity.0 = if dying {
            flyer.feather_velocity(dt, tuning.feather_fall_speed)
        } else {
            flyer.velocity(
                position.x,
                dt,
                tuning.bird_bob_amplitude,
                tuning.bird_bob_rate,
            )
        };
        if let Some(mut sprite) = sprite {
            sprite.flip_x = flyer.direction > 0.0;
        }
    }
}

pub(crate) fn run_spawners(
    mut commands: Commands,
    viewport: Res<Viewport>,
    tuning: Res<EnemyTuning>,
    combat: Res<CombatTuning>,
    instances: Query<&Transform>,
    mut spawners: Query<&mut EnemySpawner>,
) {
    let view = viewport.expanded(tuning.spawner_buffer);
    for mut spawner in &mut spawners {
        let instance_position = spawner
            .instance()
            .and_then(|instance| instances.get(instance).ok())
            .map(|transform| transform.translation.truncate());
        match spawner.update(view, instance_position) {
            SpawnerAction::Idle => {}
            SpawnerAction::Spawn => {
                let entity =
                    spawn_enemy(&mut commands, spawner.kind, spawner.at, &tuning, &combat);
                spawner.track(entity);
            }
            SpawnerAction::Despawn(entity) => {
                debug!("Spawner at {:?} dropped off-screen {:?}", spawner.at, entity);
                commands.entity(entity).despawn();
            }
        }
    }
}
