//! Level domain: moving platforms, bouncepads and coins.

use bevy::prelude::*;

use crate::config::PlatformTuning;
use crate::core::StepTimer;

/// Shuttles between two points at constant speed.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MovingPlatform {
    pub from: Vec2,
    pub to: Vec2,
    pub speed: f32,
    /// True while heading towards `to`.
    outbound: bool,
}

impl MovingPlatform {
    pub fn new(from: Vec2, to: Vec2, speed: f32) -> Self {
        Self {
            from,
            to,
            speed,
            outbound: true,
        }
    }

    pub fn target(&self) -> Vec2 {
        if self.outbound { self.to } else { self.from }
    }

    /// Velocity that moves a platform at `position` along the path this
    /// step. Turns around once the target would be reached within `dt`.
    pub fn velocity(&mut self, position: Vec2, dt: f32) -> Vec2 {
        let mut offset = self.target() - position;
        if offset.length() <= self.speed * dt {
            self.outbound = !self.outbound;
            offset = self.target() - position;
        }
        offset.normalize_or_zero() * self.speed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BouncepadVariant {
    Green,
    Red,
}

impl BouncepadVariant {
    pub fn parse(name: Option<&str>) -> Self {
        match name {
            Some("red") => BouncepadVariant::Red,
            _ => BouncepadVariant::Green,
        }
    }

    pub fn force(self, tuning: &PlatformTuning) -> f32 {
        match self {
            BouncepadVariant::Green => tuning.green_bounce,
            BouncepadVariant::Red => tuning.red_bounce,
        }
    }

    pub fn color(self) -> Color {
        match self {
            BouncepadVariant::Green => Color::srgb(0.3, 0.8, 0.35),
            BouncepadVariant::Red => Color::srgb(0.85, 0.25, 0.25),
        }
    }
}

/// Spring that compresses under whatever lands on it, then throws everything
/// on top upward.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Bouncepad {
    pub variant: BouncepadVariant,
    pub force: f32,
    pub depth: f32,
    compress: StepTimer,
}

impl Bouncepad {
    pub fn new(variant: BouncepadVariant, tuning: &PlatformTuning) -> Self {
        Self {
            variant,
            force: variant.force(tuning),
            depth: tuning.bounce_compress_depth,
            compress: StepTimer::new(tuning.bounce_compress_time),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compress.is_active()
    }

    /// Returns false if already compressed.
    pub fn compress(&mut self) -> bool {
        if self.compress.is_active() {
            return false;
        }
        self.compress.start();
        true
    }

    /// True on the step the spring releases.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.compress.tick(dt)
    }
}

/// Collectable coin. After pickup it floats up and fades out.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Coin {
    collected: bool,
    fade: StepTimer,
}

impl Coin {
    pub fn new(tuning: &PlatformTuning) -> Self {
        Self {
            collected: false,
            fade: StepTimer::new(tuning.coin_fade_time),
        }
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    /// Returns true only for the first pickup.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.fade.start();
        true
    }

    /// Advance the fade. Returns true once the coin should be removed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.fade.tick(dt)
    }

    pub fn opacity(&self) -> f32 {
        if self.collected {
            1.0 - self.fade.fraction()
        } else {
            1.0
        }
    }
}

/// Marks the static bodies that close off the level's sides.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct LevelWall;
