//! Level domain: reads the level file, materialises its tiles and objects,
//! and runs the props that live in it (moving platforms, bouncepads, coins).

mod components;
mod data;
mod factories;
mod systems;
mod tiles;


pub use components::{Bouncepad, BouncepadVariant, Coin, LevelWall, MovingPlatform};
pub use data::{
    LevelFile, LevelLoadError, LevelObject, SlopeDirection, TileKind, TileProperties, load_level,
    parse_level,
};
pub use factories::{EntityFactories, EntityFactory, FactoryContext};
pub use systems::{LevelSource, LoadedLevel};
pub use tiles::{TileBody, TileBodyKind, plan_tile_bodies};

use bevy::prelude::*;

use crate::core::{GameState, StepSet};
use crate::level::systems::{
    collect_coins, compress_bouncepads, enter_level, fade_coins, move_platforms, read_level,
    release_bouncepads, restart_level,
};
use crate::physics::{carry_passengers, track_touching};

pub const LEVEL_PATH: &str = "assets/levels/level1.json";

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<LevelSource>() {
            app.insert_resource(LevelSource(LEVEL_PATH.into()));
        }
        app.init_resource::<EntityFactories>()
            .add_systems(Startup, read_level)
            .add_systems(OnEnter(GameState::Playing), enter_level)
            .add_systems(
                Update,
                restart_level.run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                FixedUpdate,
                move_platforms
                    .before(carry_passengers)
                    .in_set(StepSet::Intent),
            )
            .add_systems(
                FixedLast,
                (compress_bouncepads.after(track_touching), collect_coins)
                    .in_set(StepSet::Contacts),
            )
            .add_systems(
                FixedLast,
                (release_bouncepads, fade_coins).in_set(StepSet::Settle),
            );
    }
}
