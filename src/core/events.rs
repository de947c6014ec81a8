//! Core domain: session-level messages.

use bevy::ecs::message::Message;

/// Fired whenever the coin count changes.
#[derive(Debug, Clone, Copy)]
pub struct CoinsChangedEvent {
    pub coins: u32,
}

impl Message for CoinsChangedEvent {}

/// Request a full level reload (after the death placeholder finishes).
#[derive(Debug, Clone, Copy)]
pub struct RestartLevelEvent;

impl Message for RestartLevelEvent {}
