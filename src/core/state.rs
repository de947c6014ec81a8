//! Core domain: top-level game flow states.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Tuning and level data are being read.
    #[default]
    Boot,
    Playing,
    /// Level data failed to load; nothing is simulated.
    Failed,
}
