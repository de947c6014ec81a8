mod combat;
mod config;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod enemies;
mod input;
mod level;
mod movement;
mod physics;
mod sprites;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::PlatformerHooks;

/// World units per tile; also avian's length unit.
const TILE: f32 = 16.0;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Canopy Dash".to_string(),
                    resolution: (1280, 720).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .add_plugins(
        PhysicsPlugins::default()
            .with_length_unit(TILE)
            .with_collision_hooks::<PlatformerHooks>(),
    )
    .insert_resource(Gravity(Vec2::NEG_Y * 1000.0))
    // Tuning first: every other plugin reads it.
    .add_plugins(config::ConfigPlugin)
    .add_plugins((
        core::CorePlugin,
        input::InputPlugin,
        physics::PlatformPhysicsPlugin,
        combat::CombatPlugin,
        movement::MovementPlugin,
        enemies::EnemiesPlugin,
        level::LevelPlugin,
        sprites::SpritesPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
