//! Movement domain: messages other domains react to.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// The player touched down after being airborne.
#[derive(Debug, Clone, Copy)]
pub struct PlayerLandedEvent {
    pub player: Entity,
    pub on_bouncepad: bool,
}

impl Message for PlayerLandedEvent {}
