//! Combat domain: deciding what a player/threat contact means.
//!
//! Contacts are judged inside the physics contact hook, where the world is
//! read-only, so verdicts are queued and applied after the solver step.

use bevy::prelude::*;

use crate::combat::components::Damage;
use crate::physics::Bounds;

/// What the hook knows about the thing the player bumped into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreatProfile {
    pub bounds: Bounds,
    pub damage: Option<Damage>,
    pub stompable: bool,
    pub dead: bool,
    pub enemy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactVerdict {
    Ignore,
    Stomp,
    /// `direction` is the horizontal sign the victim is knocked toward.
    Hurt { amount: u32, direction: f32 },
}

/// True if a body's bottom, before this step's motion, was at or above `top`
/// (within `tolerance`).
pub fn was_above(bottom: f32, step_delta_y: f32, top: f32, tolerance: f32) -> bool {
    bottom - step_delta_y >= top - tolerance
}

pub fn judge_contact(
    victim: Bounds,
    victim_step_delta_y: f32,
    threat: &ThreatProfile,
    stomp_tolerance: f32,
) -> ContactVerdict {
    if threat.dead {
        return ContactVerdict::Ignore;
    }
    if threat.stompable
        && was_above(
            victim.bottom(),
            victim_step_delta_y,
            threat.bounds.top(),
            stomp_tolerance,
        )
    {
        return ContactVerdict::Stomp;
    }
    match threat.damage {
        Some(damage) => ContactVerdict::Hurt {
            amount: damage.amount,
            direction: if victim.center().x < threat.bounds.center().x {
                -1.0
            } else {
                1.0
            },
        },
        None => ContactVerdict::Ignore,
    }
}

/// Whether the physical contact with this threat should still be solved.
pub fn keeps_contact(threat: &ThreatProfile) -> bool {
    if threat.enemy {
        return false;
    }
    threat.damage.is_none_or(|damage| !damage.cancel_contact)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactResolution {
    Stomp {
        stomper: Entity,
        target: Entity,
    },
    Hurt {
        victim: Entity,
        source: Entity,
        amount: u32,
        direction: f32,
    },
}

/// Verdicts waiting for the post-solver combat pass.
#[derive(Resource, Debug, Default)]
pub struct PendingResolutions(pub Vec<ContactResolution>);

impl PendingResolutions {
    /// Queue once per pair per step; the hook may see a pair repeatedly.
    pub fn push_unique(&mut self, resolution: ContactResolution) {
        if !self.0.contains(&resolution) {
            self.0.push(resolution);
        }
    }
}

pub struct QueueResolution(pub ContactResolution);

impl Command for QueueResolution {
    fn apply(self, world: &mut World) {
        world
            .get_resource_or_insert_with(PendingResolutions::default)
            .push_unique(self.0);
    }
}
