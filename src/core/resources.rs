//! Core domain: per-session state shared across gameplay domains.

use bevy::prelude::*;

/// Coins the player starts a level with.
pub const STARTING_COINS: u32 = 3;

/// Session-scoped game state. Coins double as health.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    coins: u32,
}

impl Default for GameSession {
    fn default() -> Self {
        Self {
            coins: STARTING_COINS,
        }
    }
}

impl GameSession {
    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.coins = self.coins.saturating_add(amount);
    }

    /// Remove coins, floored at zero. Returns true if the player is now broke.
    pub fn lose_coins(&mut self, amount: u32) -> bool {
        self.coins = self.coins.saturating_sub(amount);
        self.coins == 0
    }

    /// Reset for a fresh level load.
    pub fn reset(&mut self) {
        self.coins = STARTING_COINS;
    }
}

/// World-space rectangle currently visible through the gameplay camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewport(pub Rect);

impl Default for Viewport {
    fn default() -> Self {
        Self(Rect::from_center_size(Vec2::ZERO, Vec2::new(320.0, 180.0)))
    }
}

impl Viewport {
    pub fn contains(&self, point: Vec2) -> bool {
        self.0.contains(point)
    }

    /// Visible rect expanded by `buffer` units on every side.
    pub fn expanded(&self, buffer: f32) -> Rect {
        self.0.inflate(buffer)
    }
}

/// World extents of the loaded level, used to clamp the camera.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LevelBounds(pub Option<Rect>);

/// Despawned whenever the level is torn down or restarted.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelScoped;
