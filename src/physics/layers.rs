//! Collision layers and the standard membership/filter pairs.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid and one-way terrain, moving platforms, bouncepads.
    Ground,
    Player,
    Enemy,
    /// Damage-dealing props that are not enemies (spikes, saws).
    Hazard,
    /// Collectable sensors.
    Item,
    /// Ladder sensors.
    Climbable,
}

impl GameLayer {
    pub fn mask_of(layers: &[GameLayer]) -> u32 {
        layers.iter().fold(0, |mask, layer| mask | layer.to_bits())
    }

    pub fn ground() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Enemy])
    }

    pub fn player() -> CollisionLayers {
        CollisionLayers::new(
            GameLayer::Player,
            [
                GameLayer::Ground,
                GameLayer::Enemy,
                GameLayer::Hazard,
                GameLayer::Item,
                GameLayer::Climbable,
            ],
        )
    }

    pub fn enemy() -> CollisionLayers {
        CollisionLayers::new(
            GameLayer::Enemy,
            [
                GameLayer::Ground,
                GameLayer::Hazard,
                GameLayer::Player,
                GameLayer::Enemy,
            ],
        )
    }

    /// Flying enemies pass through terrain.
    pub fn flying_enemy() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Enemy, [GameLayer::Player])
    }

    /// Solid hazards such as spike tiles; enemies walk on them.
    pub fn hazard() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player, GameLayer::Enemy])
    }

    /// Hazards only the player can touch.
    pub fn player_hazard() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player])
    }

    pub fn item() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Item, [GameLayer::Player])
    }

    pub fn climbable() -> CollisionLayers {
        CollisionLayers::new(GameLayer::Climbable, [GameLayer::Player])
    }
}
