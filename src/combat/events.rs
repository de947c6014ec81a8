//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// A stomper landed on a stompable enemy and killed it.
#[derive(Debug, Clone, Copy)]
pub struct EnemyStompedEvent {
    pub stomper: Entity,
    pub enemy: Entity,
}

impl Message for EnemyStompedEvent {}

#[derive(Debug, Clone, Copy)]
pub struct PlayerHurtEvent {
    pub player: Entity,
    pub source: Entity,
    pub amount: u32,
}

impl Message for PlayerHurtEvent {}

/// The player ran out of coins.
#[derive(Debug, Clone, Copy)]
pub struct PlayerDownedEvent {
    pub player: Entity,
}

impl Message for PlayerDownedEvent {}
