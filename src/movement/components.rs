//! Movement domain: locomotion state carried by the player.

use bevy::prelude::*;

use crate::config::MovementTuning;
use crate::core::StepTimer;
use crate::input::Horizontal;
use crate::physics::Bounds;

#[derive(Component, Debug, Default)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallContact {
    #[default]
    None,
    Left,
    Right,
}

impl WallContact {
    /// Horizontal sign pointing away from the wall.
    pub fn away(self) -> Option<f32> {
        match self {
            WallContact::None => None,
            WallContact::Left => Some(1.0),
            WallContact::Right => Some(-1.0),
        }
    }

    pub fn is_some(self) -> bool {
        self != WallContact::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 { Facing::Left } else { Facing::Right }
    }
}

impl From<Horizontal> for Facing {
    fn from(direction: Horizontal) -> Self {
        match direction {
            Horizontal::Left => Facing::Left,
            Horizontal::Right => Facing::Right,
        }
    }
}

/// Horizontal control lockout after a wall jump. While active the body's
/// horizontal velocity is pinned to the jump's value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WallJumpLock {
    timer: StepTimer,
    velocity_x: f32,
}

impl WallJumpLock {
    pub fn new(duration: f32) -> Self {
        Self {
            timer: StepTimer::new(duration),
            velocity_x: 0.0,
        }
    }

    pub fn start(&mut self, velocity_x: f32) {
        self.velocity_x = velocity_x;
        self.timer.start();
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    /// Returns true on the step the lockout elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.timer.tick(dt)
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_active()
    }

    pub fn velocity_x(&self) -> f32 {
        self.velocity_x
    }
}

/// Grace windows after leaving the ground or a wall during which the
/// matching jump is still allowed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coyote {
    ground: f32,
    wall: f32,
    last_wall: WallContact,
}

impl Coyote {
    /// Refill while the condition holds, drain by `dt` otherwise.
    pub fn update(&mut self, dt: f32, on_ground: bool, wall: WallContact, tuning: &MovementTuning) {
        self.ground = if on_ground {
            tuning.coyote_time
        } else {
            (self.ground - dt).max(0.0)
        };
        if wall.is_some() {
            self.wall = tuning.wall_coyote_time;
            self.last_wall = wall;
        } else {
            self.wall = (self.wall - dt).max(0.0);
        }
    }

    pub fn allows_jump(&self) -> bool {
        self.ground > 0.0
    }

    pub fn allows_wall_jump(&self) -> bool {
        self.wall > 0.0
    }

    /// Wall most recently in reach.
    pub fn last_wall(&self) -> WallContact {
        self.last_wall
    }

    pub fn consume(&mut self) {
        self.ground = 0.0;
        self.wall = 0.0;
    }
}

/// Player locomotion flags. Several can hold at once; animation picks by
/// priority.
#[derive(Component, Debug, Clone, Default)]
pub struct MovementState {
    pub on_ground: bool,
    pub on_bouncepad: bool,
    pub on_wall: WallContact,
    pub facing: Facing,
    /// Reduced gravity from jump start until the apex is released or the
    /// body lands.
    pub using_jump_gravity: bool,
    pub jump_origin_y: f32,
    /// Jump was released early; the cut applies once the minimum height
    /// is reached.
    pub jump_cut_pending: bool,
    pub sliding_on_wall: bool,
    /// Ladder being climbed, if any.
    pub climbing: Option<Entity>,
    pub wall_jump: WallJumpLock,
    pub coyote: Coyote,
}

impl MovementState {
    pub fn new(tuning: &MovementTuning) -> Self {
        Self {
            wall_jump: WallJumpLock::new(tuning.wall_jump_lock_time),
            ..default()
        }
    }

    pub fn is_climbing(&self) -> bool {
        self.climbing.is_some()
    }

    pub fn is_wall_jumping(&self) -> bool {
        self.wall_jump.is_active()
    }
}

/// Acceleration accumulated for the current step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Acceleration(pub Vec2);

/// Vertical extent of a ladder column, with its centreline.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ladder {
    pub center_x: f32,
    pub bottom: f32,
    pub top: f32,
}

/// A ladder the player can reach this step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderSpan {
    pub entity: Entity,
    pub ladder: Ladder,
}

/// What the player's probes found this step.
#[derive(Component, Debug, Clone, Default)]
pub struct Surroundings {
    pub bounds: Bounds,
    pub on_ground: bool,
    pub on_bouncepad: bool,
    /// Wall touching within the probe distance.
    pub wall: WallContact,
    /// Wall within wall-jump reach.
    pub wall_in_reach: WallContact,
    pub ladders: Vec<LadderSpan>,
    pub knocked_back: bool,
}
