//! Animation clip selection and playback for the player.
//!
//! Clips are chosen from movement state every step, played at a frame rate
//! that speeds up with horizontal velocity, and a landing squash is layered
//! on top of whatever is playing.

use bevy::prelude::*;

use crate::core::StepTimer;

/// Base frame duration, in milliseconds, when standing still.
pub const BASE_FRAME_MS: f32 = 140.0;
/// Fastest frame duration, in milliseconds.
pub const MIN_FRAME_MS: f32 = 30.0;
/// Length of the landing squash.
pub const SQUASH_TIME: f32 = 0.12;
/// Peak deformation of the landing squash.
pub const SQUASH_AMOUNT: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clip {
    #[default]
    Idle,
    Run,
    Sprint,
    Jump,
    Fall,
    WallSlide,
    Climb,
    /// Holding still on a ladder: the climb pose, paused.
    ClimbIdle,
}

impl Clip {
    pub fn name(self) -> &'static str {
        match self {
            Clip::Idle => "idle",
            Clip::Run => "run",
            Clip::Sprint => "sprint",
            Clip::Jump => "jump",
            Clip::Fall => "fall",
            Clip::WallSlide => "wall_slide",
            Clip::Climb => "climb",
            Clip::ClimbIdle => "climb_idle",
        }
    }

    pub fn is_paused(self) -> bool {
        matches!(self, Clip::ClimbIdle)
    }

    /// Run and sprint share a cycle, so switching between them keeps the
    /// current frame.
    fn continues_from(self, other: Clip) -> bool {
        matches!(
            (self, other),
            (Clip::Run, Clip::Sprint) | (Clip::Sprint, Clip::Run)
        )
    }
}

/// Movement facts that decide the clip.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClipInputs {
    pub on_ground: bool,
    pub climbing: bool,
    pub wall_sliding: bool,
    pub walking: bool,
    pub sprinting: bool,
    pub velocity: Vec2,
}

/// Highest-priority clip for the given state: climbing, then wall slide,
/// then airborne, then running, then idle.
pub fn select_clip(inputs: &ClipInputs) -> Clip {
    if inputs.climbing {
        if inputs.velocity.length_squared() > 0.0 {
            Clip::Climb
        } else {
            Clip::ClimbIdle
        }
    } else if inputs.wall_sliding {
        Clip::WallSlide
    } else if !inputs.on_ground {
        if inputs.velocity.y > 0.0 { Clip::Jump } else { Clip::Fall }
    } else if inputs.walking || inputs.velocity.x != 0.0 {
        if inputs.sprinting { Clip::Sprint } else { Clip::Run }
    } else {
        Clip::Idle
    }
}

/// Seconds per frame at horizontal speed `velocity_x`.
pub fn frame_duration(velocity_x: f32) -> f32 {
    (BASE_FRAME_MS - velocity_x.abs() / 2.0).max(MIN_FRAME_MS) / 1000.0
}

/// Playback state for one animated sprite.
#[derive(Component, Debug, Clone)]
pub struct Animator {
    clip: Clip,
    /// Index into the clip's frame list.
    frame: usize,
    frame_timer: f32,
    squash: StepTimer,
    /// Sprite size with no squash applied.
    pub base_size: Vec2,
}

impl Animator {
    pub fn new(base_size: Vec2) -> Self {
        Self {
            clip: Clip::Idle,
            frame: 0,
            frame_timer: 0.0,
            squash: StepTimer::new(SQUASH_TIME),
            base_size,
        }
    }

    pub fn clip(&self) -> Clip {
        self.clip
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Switch clips. Returns true if the clip changed.
    pub fn play(&mut self, clip: Clip) -> bool {
        if clip == self.clip {
            return false;
        }
        if !clip.continues_from(self.clip) {
            self.frame = 0;
            self.frame_timer = 0.0;
        }
        self.clip = clip;
        true
    }

    /// Advance by `dt` through a clip of `frame_count` frames, each lasting
    /// `duration` seconds. Returns true when the frame changed.
    pub fn advance(&mut self, dt: f32, duration: f32, frame_count: usize) -> bool {
        if frame_count == 0 {
            return false;
        }
        let before = self.frame;
        self.frame %= frame_count;
        if !self.clip.is_paused() && duration > 0.0 {
            self.frame_timer += dt;
            while self.frame_timer >= duration {
                self.frame_timer -= duration;
                self.frame = (self.frame + 1) % frame_count;
            }
        }
        self.frame != before
    }

    pub fn squash(&mut self) {
        self.squash.start();
    }

    pub fn tick_squash(&mut self, dt: f32) {
        self.squash.tick(dt);
    }

    /// Width and height multipliers for the current point in the squash.
    pub fn squash_scale(&self) -> Vec2 {
        if !self.squash.is_active() {
            return Vec2::ONE;
        }
        let strength = SQUASH_AMOUNT * (1.0 - self.squash.fraction());
        Vec2::new(1.0 + strength, 1.0 - strength)
    }
}
