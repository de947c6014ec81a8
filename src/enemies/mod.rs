//! Enemies domain: walkers that patrol ledges, birds on fixed flight
//! paths, saws, and spawners that keep one enemy alive near the camera.

mod components;
mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use components::{
    BirdVariant, EnemyKind, EnemySpawner, Flyer, Patrol, Saw, SpawnerAction, WalkerVariant,
};
pub use spawn::{EnemyBundle, bird_bundle, saw_bundle, spawn_enemy, walker_bundle};
pub use systems::should_turn;

use bevy::prelude::*;

use crate::core::StepSet;
use crate::enemies::systems::{fly_birds, patrol_walkers, run_spawners};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (patrol_walkers, fly_birds).in_set(StepSet::Intent),
        )
        .add_systems(FixedLast, run_spawners.in_set(StepSet::Settle));
    }
}
