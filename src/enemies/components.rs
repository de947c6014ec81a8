//! Enemies domain: behavior components for walkers, flyers, saws and
//! spawners.

use bevy::prelude::*;

use crate::config::{EnemyTuning, FlightPattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdVariant {
    Purple,
    Orange,
}

impl BirdVariant {
    pub fn pattern(self, tuning: &EnemyTuning) -> FlightPattern {
        match self {
            BirdVariant::Purple => tuning.purple_bird,
            BirdVariant::Orange => tuning.orange_bird,
        }
    }

    pub fn color(self) -> Color {
        match self {
            BirdVariant::Purple => Color::srgb(0.55, 0.35, 0.75),
            BirdVariant::Orange => Color::srgb(0.95, 0.55, 0.2),
        }
    }
}

/// Colouring of bugs and spiders. Gray ones walk faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkerVariant {
    #[default]
    Green,
    Gray,
}

impl WalkerVariant {
    pub fn speed(self, tuning: &EnemyTuning) -> f32 {
        match self {
            WalkerVariant::Green => tuning.green_walker_speed,
            WalkerVariant::Gray => tuning.gray_walker_speed,
        }
    }

    pub fn color(self) -> Color {
        match self {
            WalkerVariant::Green => Color::srgb(0.45, 0.7, 0.3),
            WalkerVariant::Gray => Color::srgb(0.45, 0.45, 0.5),
        }
    }
}

/// What a spawner or a level object produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Bug(WalkerVariant),
    Spider(WalkerVariant),
    Bird(BirdVariant),
}

impl EnemyKind {
    /// Resolve a level object class and its optional `variant` property.
    /// Unknown walker variants fall back to green, unknown birds to purple.
    pub fn parse(class: &str, variant: Option<&str>) -> Option<Self> {
        let walker = match variant {
            Some("gray") => WalkerVariant::Gray,
            _ => WalkerVariant::Green,
        };
        match class {
            "bug" => Some(EnemyKind::Bug(walker)),
            "spider" => Some(EnemyKind::Spider(walker)),
            "bird" => Some(EnemyKind::Bird(match variant {
                Some("orange") => BirdVariant::Orange,
                _ => BirdVariant::Purple,
            })),
            _ => None,
        }
    }
}

/// Walks in a straight line, turning at ledges and walls.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Patrol {
    /// `-1` for left, `1` for right.
    pub direction: f32,
    pub speed: f32,
}

impl Patrol {
    pub fn new(speed: f32) -> Self {
        Self {
            direction: -1.0,
            speed,
        }
    }

    pub fn reverse(&mut self) {
        self.direction = -self.direction;
    }

    pub fn velocity_x(&self) -> f32 {
        self.direction * self.speed
    }
}

/// Flies between its spawn x and `distance` units to the left of it, with
/// a vertical bob.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Flyer {
    pub home_x: f32,
    pub pattern: FlightPattern,
    pub direction: f32,
    /// Seconds since spawn, drives the bob and the feather drift.
    pub clock: f32,
}

impl Flyer {
    pub fn new(home_x: f32, pattern: FlightPattern) -> Self {
        Self {
            home_x,
            pattern,
            direction: -1.0,
            clock: 0.0,
        }
    }

    /// Velocity for this step at horizontal position `x`, turning at either
    /// end of the flight path.
    pub fn velocity(&mut self, x: f32, dt: f32, amplitude: f32, rate: f32) -> Vec2 {
        self.clock += dt;
        let far_x = self.home_x - self.pattern.distance;
        if x <= far_x {
            self.direction = 1.0;
        } else if x >= self.home_x {
            self.direction = -1.0;
        }
        let bob = amplitude * rate * (self.clock * rate).cos();
        Vec2::new(self.direction * self.pattern.speed, bob)
    }

    /// Slow swaying descent after being stomped.
    pub fn feather_velocity(&mut self, dt: f32, fall_speed: f32) -> Vec2 {
        self.clock += dt;
        Vec2::new((self.clock * 3.0).sin() * fall_speed * 2.0, -fall_speed)
    }
}

/// Spinning circular saw.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Saw;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerAction {
    Idle,
    Spawn,
    Despawn(Entity),
}

/// Keeps at most one live enemy for a spawn point, created when the point
/// scrolls into the buffered viewport.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawner {
    pub kind: EnemyKind,
    pub at: Vec2,
    instance: Option<Entity>,
    armed: bool,
}

impl EnemySpawner {
    pub fn new(kind: EnemyKind, at: Vec2) -> Self {
        Self {
            kind,
            at,
            instance: None,
            armed: true,
        }
    }

    pub fn instance(&self) -> Option<Entity> {
        self.instance
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Decide this step. `instance_position` is the live instance's
    /// position, `None` once it no longer exists.
    pub fn update(&mut self, view: Rect, instance_position: Option<Vec2>) -> SpawnerAction {
        if let Some(instance) = self.instance {
            match instance_position {
                Some(position) if view.contains(position) => return SpawnerAction::Idle,
                Some(_) => {
                    self.instance = None;
                    return SpawnerAction::Despawn(instance);
                }
                None => self.instance = None,
            }
        }

        if !view.contains(self.at) {
            self.armed = true;
            SpawnerAction::Idle
        } else if self.armed {
            self.armed = false;
            SpawnerAction::Spawn
        } else {
            SpawnerAction::Idle
        }
    }

    pub fn track(&mut self, instance: Entity) {
        self.instance = Some(instance);
    }
}
