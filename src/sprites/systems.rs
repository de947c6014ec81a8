//! Sprites domain: manifest loading and per-frame player animation.

use avian2d::prelude::LinearVelocity;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::input::Controls;
use crate::movement::{Facing, MovementState, Player, PlayerLandedEvent};
use crate::sprites::animation::{Animator, ClipInputs, frame_duration, select_clip};
use crate::sprites::manifest::{MANIFEST_PATH, SpriteManifest};

pub(crate) fn load_sprite_manifest(
    mut manifest: ResMut<SpriteManifest>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    manifest.load_from_file(MANIFEST_PATH, &asset_server, &mut layouts);
}

/// Newly animated sprites switch from the placeholder colour to the sheet.
pub(crate) fn attach_sheet(
    manifest: Res<SpriteManifest>,
    mut sprites: Query<(&Animator, &mut Sprite), Added<Animator>>,
) {
    let Some(sheet) = &manifest.sheet else {
        return;
    };
    for (animator, mut sprite) in &mut sprites {
        sprite.image = sheet.image.clone();
        sprite.texture_atlas = Some(TextureAtlas {
            layout: sheet.layout.clone(),
            index: manifest.cell(animator.clip(), animator.frame()).unwrap_or(0),
        });
        sprite.color = Color::WHITE;
    }
}

pub(crate) fn squash_on_landing(
    mut landed: MessageReader<PlayerLandedEvent>,
    mut animators: Query<&mut Animator>,
) {
    for event in landed.read() {
        if let Ok(mut animator) = animators.get_mut(event.player) {
            animator.squash();
        }
    }
}

pub(crate) fn animate_player(
    time: Res<Time>,
    manifest: Res<SpriteManifest>,
    mut players: Query<
        (
            Entity,
            &MovementState,
            &Controls,
            &LinearVelocity,
            &mut Animator,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (entity, state, controls, velocity, mut animator, mut sprite) in &mut players {
        let clip = select_clip(&ClipInputs {
            on_ground: state.on_ground,
            climbing: state.is_climbing(),
            wall_sliding: state.sliding_on_wall,
            walking: controls.is_moving(),
            sprinting: controls.is_sprinting(),
            velocity: velocity.0,
        });
        let previous = animator.clip();
        if animator.play(clip) {
            debug!("Player {:?} clip {:?} -> {:?}", entity, previous, clip);
        }
        let frame_count = manifest.frames(clip).len();
        animator.advance(dt, frame_duration(velocity.x), frame_count);
        animator.tick_squash(dt);

        if let Some(atlas) = sprite.texture_atlas.as_mut() {
            if let Some(cell) = manifest.cell(clip, animator.frame()) {
                atlas.index = cell;
            }
        }
        sprite.flip_x = state.facing == Facing::Left;
        sprite.custom_size = Some(animator.base_size * animator.squash_scale());
    }
}
