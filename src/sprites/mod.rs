//! Sprites domain: player animation on top of the placeholder rectangles.
//!
//! This module handles:
//! - Loading the sprite manifest (sheet grid and clip frame lists) from JSON
//! - Choosing the player's clip from movement state
//! - Speed-scaled frame playback and the landing squash

mod animation;
mod manifest;
mod systems;


use bevy::prelude::*;

pub use animation::{
    Animator, BASE_FRAME_MS, Clip, ClipInputs, MIN_FRAME_MS, SQUASH_AMOUNT, SQUASH_TIME,
    frame_duration, select_clip,
};
pub use manifest::{MANIFEST_PATH, ManifestJson, SheetHandles, SpriteManifest, parse_manifest};

use crate::core::playing;
use crate::sprites::systems::{animate_player, attach_sheet, load_sprite_manifest, squash_on_landing};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteManifest>()
            .add_systems(Startup, load_sprite_manifest)
            .add_systems(
                Update,
                (attach_sheet, squash_on_landing, animate_player)
                    .chain()
                    .run_if(playing),
            );
    }
}
