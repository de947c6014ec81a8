//! Combat domain: damage, damageability and the kill lifecycle.

use bevy::prelude::*;

use crate::config::CombatTuning;
use crate::core::StepTimer;

/// Tag for anything the player can bump into as an enemy. Enemies never
/// block each other or the player physically.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Enemy;

/// Damage dealt to a damageable body on contact.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub amount: u32,
    /// Whether the physical contact that carried the hit is discarded.
    pub cancel_contact: bool,
}

impl Damage {
    /// Enemies hurt and are passed through.
    pub fn enemy(amount: u32) -> Self {
        Self {
            amount,
            cancel_contact: true,
        }
    }

    /// Takes every coin at once; passed through like an enemy.
    pub fn lethal() -> Self {
        Self {
            amount: u32::MAX,
            cancel_contact: true,
        }
    }

    /// Static hazards hurt but stay solid.
    pub fn hazard(amount: u32) -> Self {
        Self {
            amount,
            cancel_contact: false,
        }
    }
}

/// Can be hurt, with invincibility and knockback windows after each hit.
#[derive(Component, Debug, Clone)]
pub struct Damageable {
    invincibility: StepTimer,
    knockback: StepTimer,
    flash_interval: f32,
}

/// What ended during a [`Damageable::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageableTick {
    pub knockback_ended: bool,
    pub invincibility_ended: bool,
}

impl Damageable {
    pub fn new(invincibility_time: f32, knockback_time: f32, flash_interval: f32) -> Self {
        Self {
            invincibility: StepTimer::new(invincibility_time),
            knockback: StepTimer::new(knockback_time),
            flash_interval,
        }
    }

    pub fn from_tuning(tuning: &CombatTuning) -> Self {
        Self::new(
            tuning.invincibility_time,
            tuning.knockback_time,
            tuning.flash_interval,
        )
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility.is_active()
    }

    pub fn is_being_knocked_back(&self) -> bool {
        self.knockback.is_active()
    }

    /// Register a hit. Returns false, changing nothing, while invincible.
    pub fn damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.invincibility.start();
        self.knockback.start();
        true
    }

    pub fn tick(&mut self, dt: f32) -> DamageableTick {
        DamageableTick {
            knockback_ended: self.knockback.tick(dt),
            invincibility_ended: self.invincibility.tick(dt),
        }
    }

    /// Sprite opacity for the invincibility flash.
    pub fn opacity(&self) -> f32 {
        if !self.is_invincible() || self.flash_interval <= 0.0 {
            return 1.0;
        }
        let phase = (self.invincibility.elapsed() / self.flash_interval) as u32;
        if phase % 2 == 0 { 0.3 } else { 1.0 }
    }
}

/// Squashed flat when stomped.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Stompable {
    stomped: bool,
}

impl Stompable {
    pub fn is_stomped(&self) -> bool {
        self.stomped
    }

    /// Returns false if it was already stomped.
    pub fn stomp(&mut self) -> bool {
        !std::mem::replace(&mut self.stomped, true)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillMethod {
    Instant,
    Stomp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// Remove the entity now.
    Removed,
    /// Squish, then fade, then remove.
    Squished,
    AlreadyDead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillError {
    /// A stomp kill was requested on something that cannot be stomped.
    NotStompable,
}

impl std::fmt::Display for KillError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KillError::NotStompable => write!(f, "stomp kill requested on a non-stompable entity"),
        }
    }
}

impl std::error::Error for KillError {}

/// Where a dying entity is in its removal sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KillPhase {
    Alive,
    Squished,
    Fading { alpha: f32 },
    Finished,
}

/// Share of the stomp sequence spent squished before fading starts.
pub const SQUISH_SHARE: f32 = 0.8;

#[derive(Component, Debug, Clone)]
pub struct Killable {
    dead: bool,
    sequence: Option<StepTimer>,
    stomp_duration: f32,
}

impl Killable {
    pub fn new(stomp_duration: f32) -> Self {
        Self {
            dead: false,
            sequence: None,
            stomp_duration,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Kill once. Later calls are no-ops that report [`KillOutcome::AlreadyDead`].
    pub fn kill(
        &mut self,
        method: KillMethod,
        stompable: Option<&mut Stompable>,
    ) -> Result<KillOutcome, KillError> {
        if self.dead {
            return Ok(KillOutcome::AlreadyDead);
        }
        match method {
            KillMethod::Instant => {
                self.dead = true;
                Ok(KillOutcome::Removed)
            }
            KillMethod::Stomp => {
                let stompable = stompable.ok_or(KillError::NotStompable)?;
                stompable.stomp();
                self.dead = true;
                let mut sequence = StepTimer::new(self.stomp_duration);
                sequence.start();
                self.sequence = Some(sequence);
                Ok(KillOutcome::Squished)
            }
        }
    }

    pub fn tick(&mut self, dt: f32) -> KillPhase {
        if !self.dead {
            return KillPhase::Alive;
        }
        let Some(sequence) = self.sequence.as_mut() else {
            return KillPhase::Finished;
        };
        if sequence.tick(dt) || !sequence.is_active() {
            return KillPhase::Finished;
        }
        let fraction = sequence.fraction();
        if fraction < SQUISH_SHARE {
            KillPhase::Squished
        } else {
            KillPhase::Fading {
                alpha: 1.0 - (fraction - SQUISH_SHARE) / (1.0 - SQUISH_SHARE),
            }
        }
    }
}

/// Killed and playing out its removal sequence. Behaviors skip these.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Dying;

/// The player is out of coins; the level restarts when the timer ends.
#[derive(Component, Debug, Clone)]
pub struct Downed {
    pub restart: StepTimer,
}

impl Downed {
    pub fn new(delay: f32) -> Self {
        let mut restart = StepTimer::new(delay);
        restart.start();
        Self { restart }
    }
}

/// Stand-in effect for hurt and death: launched upward, falls under
/// gravity and is removed once it leaves the view.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlaceholderPop {
    /// Set once the pop has been inside the view.
    pub seen: bool,
}
