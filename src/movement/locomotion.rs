//! Movement domain: the player locomotion state machine.
//!
//! Engine-free step logic over a [`Body`]. The movement systems build a
//! [`Locomotion`] from the player's controls and sensed surroundings, run
//! one phase of the step, and write the body back:
//!
//! 1. [`Locomotion::pre_update`]: flags, ladder, horizontal intent, jumps.
//! 2. [`Locomotion::integrate`]: gravity selection, integration, fall clamp.
//! 3. The solver moves the body and reports contacts.
//! 4. [`MovementState::land`] on a fresh ground contact.
//! 5. [`Locomotion::post_update`]: deceleration and speed caps.

use bevy::prelude::*;

use crate::config::{LadderTuning, MovementTuning};
use crate::input::{Action, Controls, Horizontal, Vertical};
use crate::movement::components::{
    Facing, LadderSpan, MovementState, Surroundings, WallContact,
};
use crate::movement::ladder;

/// Kinematic state of the player for one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// Transitions worth reacting to (sound, logging, animation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionEvent {
    Jumped,
    WallJumped,
    JumpCut,
    WallJumpReleased,
    StartedClimbing,
    StoppedClimbing,
}

/// Step velocity `v` toward zero by `amount`, snapping to exactly zero on
/// crossing it or dropping under `epsilon`.
pub fn decelerate(v: f32, amount: f32, epsilon: f32) -> f32 {
    if v == 0.0 {
        return 0.0;
    }
    let next = v - v.signum() * amount;
    if next.signum() != v.signum() || next.abs() < epsilon {
        0.0
    } else {
        next
    }
}

fn pressing_into(direction: Option<Horizontal>, wall: WallContact) -> bool {
    matches!(
        (direction, wall),
        (Some(Horizontal::Left), WallContact::Left) | (Some(Horizontal::Right), WallContact::Right)
    )
}

pub struct Locomotion<'a> {
    pub tuning: &'a MovementTuning,
    pub ladders: &'a LadderTuning,
    pub controls: &'a Controls,
    pub surroundings: &'a Surroundings,
}

impl Locomotion<'_> {
    /// Horizontal speed cap for the current gait.
    pub fn max_speed(&self) -> f32 {
        if self.controls.is_sprinting() {
            self.tuning.sprint_speed
        } else if self.controls.is_running() {
            self.tuning.run_speed
        } else {
            self.tuning.walk_speed
        }
    }

    pub fn pre_update(
        &self,
        state: &mut MovementState,
        body: &mut Body,
        dt: f32,
    ) -> Vec<LocomotionEvent> {
        let mut events = Vec::new();
        let s = self.surroundings;

        state.on_ground = s.on_ground;
        state.on_bouncepad = s.on_ground && s.on_bouncepad;
        state.on_wall = s.wall;
        state.coyote.update(dt, s.on_ground, s.wall_in_reach, self.tuning);
        if s.on_ground && body.velocity.y <= 0.0 {
            state.using_jump_gravity = false;
            state.jump_cut_pending = false;
        }
        if s.on_ground || !s.wall.is_some() {
            state.sliding_on_wall = false;
        }

        if state.wall_jump.is_active() {
            if s.on_ground {
                state.wall_jump.cancel();
            } else if state.wall_jump.tick(dt) {
                if !self.controls.is_moving() {
                    body.velocity.x = 0.0;
                }
                events.push(LocomotionEvent::WallJumpReleased);
            }
        }

        body.acceleration = Vec2::ZERO;
        if s.knocked_back {
            self.stop_climbing(state, &mut events);
            return events;
        }

        self.update_ladder(state, body, &mut events);

        let locked = state.wall_jump.is_active();
        let direction = self.controls.horizontal();
        if let Some(direction) = direction {
            if !state.is_climbing() && !locked {
                state.facing = direction.into();
                if !state.on_bouncepad {
                    body.acceleration.x = direction.sign() * self.tuning.acceleration;
                }
            }
        }
        if locked {
            body.velocity.x = state.wall_jump.velocity_x();
        }

        state.sliding_on_wall = !s.on_ground
            && !state.is_climbing()
            && body.velocity.y < 0.0
            && pressing_into(direction, s.wall);

        if self.controls.was_pressed(Action::Jump) {
            self.try_jump(state, body, &mut events);
        }
        if self.controls.was_released(Action::Jump)
            && state.using_jump_gravity
            && body.velocity.y > 0.0
        {
            state.jump_cut_pending = true;
        }
        if state.jump_cut_pending {
            self.apply_jump_cut(state, body, &mut events);
        }
        events
    }

    pub fn integrate(&self, state: &mut MovementState, body: &mut Body, dt: f32) {
        if state.is_climbing() {
            body.acceleration = Vec2::ZERO;
            return;
        }
        body.acceleration.y = -self.gravity(state, body.velocity.y);
        body.velocity += body.acceleration * dt;

        let max_fall = if state.sliding_on_wall {
            self.tuning.wall_slide_max_fall_speed
        } else {
            self.tuning.max_fall_speed
        };
        body.velocity.y = body.velocity.y.max(-max_fall);
    }

    /// Gravity magnitude for this step. Clears jump gravity once the body
    /// falls past the apex band.
    pub fn gravity(&self, state: &mut MovementState, velocity_y: f32) -> f32 {
        let t = self.tuning;
        if state.on_ground && velocity_y <= 0.0 {
            return 0.0;
        }
        if state.using_jump_gravity && velocity_y < -t.apex_band {
            state.using_jump_gravity = false;
        }
        if state.using_jump_gravity && self.controls.is_held(Action::Jump) {
            if velocity_y.abs() <= t.apex_band {
                return t.gravity * t.apex_gravity_scale;
            }
            if velocity_y > 0.0 {
                return t.gravity * t.jump_gravity_scale;
            }
        }
        t.gravity
    }

    /// Runs after the solver, so `state.on_ground` already reflects this
    /// step's landing.
    pub fn post_update(&self, state: &mut MovementState, body: &mut Body, dt: f32) {
        if state.is_climbing() || state.wall_jump.is_active() || self.surroundings.knocked_back {
            return;
        }
        let t = self.tuning;
        let vx = body.velocity.x;
        let max = self.max_speed();
        let turning = self.controls.is_turning(vx);
        let moving = self.controls.is_moving() && !state.on_bouncepad;

        let next = if state.on_ground {
            if turning {
                decelerate(vx, t.turn_deceleration * dt, t.rest_epsilon)
            } else if !moving {
                decelerate(vx, t.stop_deceleration * dt, t.rest_epsilon)
            } else if vx.abs() > max {
                let slowed = decelerate(vx, t.stop_deceleration * dt, t.rest_epsilon);
                vx.signum() * slowed.abs().max(max)
            } else {
                vx
            }
        } else if turning {
            decelerate(vx, t.air_turn_deceleration * dt, t.rest_epsilon)
        } else if vx.abs() > max {
            vx.signum() * max
        } else {
            vx
        };

        body.velocity.x = next;
        if next == 0.0 && !moving {
            body.acceleration.x = 0.0;
        }
    }

    fn try_jump(&self, state: &mut MovementState, body: &mut Body, events: &mut Vec<LocomotionEvent>) {
        if state.is_climbing() {
            self.stop_climbing(state, events);
            if self.controls.vertical() == Some(Vertical::Down) {
                return;
            }
            self.jump(state, body, events);
        } else if state.on_ground || state.coyote.allows_jump() {
            self.jump(state, body, events);
        } else if !state.wall_jump.is_active()
            && (self.surroundings.wall_in_reach.is_some() || state.coyote.allows_wall_jump())
        {
            self.wall_jump(state, body, events);
        }
    }

    fn jump(&self, state: &mut MovementState, body: &mut Body, events: &mut Vec<LocomotionEvent>) {
        body.velocity.y = if self.controls.is_sprinting() {
            self.tuning.sprint_jump_force
        } else {
            self.tuning.jump_force
        };
        state.using_jump_gravity = true;
        state.jump_origin_y = body.position.y;
        state.jump_cut_pending = false;
        state.on_ground = false;
        state.on_bouncepad = false;
        state.coyote.consume();
        events.push(LocomotionEvent::Jumped);
    }

    fn wall_jump(&self, state: &mut MovementState, body: &mut Body, events: &mut Vec<LocomotionEvent>) {
        let wall = if self.surroundings.wall_in_reach.is_some() {
            self.surroundings.wall_in_reach
        } else {
            state.coyote.last_wall()
        };
        let Some(away) = wall.away() else {
            return;
        };
        let velocity_x = away * self.tuning.wall_jump_horizontal;
        body.velocity = Vec2::new(velocity_x, self.tuning.wall_jump_vertical);
        state.wall_jump.start(velocity_x);
        state.facing = Facing::from_sign(away);
        state.using_jump_gravity = true;
        state.jump_origin_y = body.position.y;
        state.jump_cut_pending = false;
        state.sliding_on_wall = false;
        state.coyote.consume();
        events.push(LocomotionEvent::WallJumped);
    }

    /// Deferred until the body has risen `min_jump_height`, so a tap still
    /// produces a visible hop.
    fn apply_jump_cut(&self, state: &mut MovementState, body: &mut Body, events: &mut Vec<LocomotionEvent>) {
        if body.velocity.y <= 0.0 {
            state.jump_cut_pending = false;
            return;
        }
        if body.position.y - state.jump_origin_y >= self.tuning.min_jump_height {
            body.velocity.y *= self.tuning.jump_cut_factor;
            state.using_jump_gravity = false;
            state.jump_cut_pending = false;
            events.push(LocomotionEvent::JumpCut);
        }
    }

    /// Re-derived every step from the ladders in reach, so a ladder that
    /// disappears simply drops the body.
    fn update_ladder(&self, state: &mut MovementState, body: &mut Body, events: &mut Vec<LocomotionEvent>) {
        let s = self.surroundings;
        let vertical = self.controls.vertical();

        if let Some(current) = state.climbing {
            let Some(span) = ladder::continue_climbing(&s.ladders, &s.bounds, current, self.ladders)
            else {
                self.stop_climbing(state, events);
                return;
            };
            if ladder::should_detach(s.on_ground, vertical, &s.bounds, &span.ladder, self.ladders) {
                self.stop_climbing(state, events);
                return;
            }
            state.climbing = Some(span.entity);
            self.hold_ladder(body, &span, vertical);
            return;
        }

        let Some(direction) = vertical else {
            return;
        };
        let Some(span) = ladder::choose_ladder(&s.ladders, &s.bounds, direction, self.ladders) else {
            return;
        };
        state.climbing = Some(span.entity);
        state.using_jump_gravity = false;
        state.jump_cut_pending = false;
        state.sliding_on_wall = false;
        state.wall_jump.cancel();
        self.hold_ladder(body, &span, vertical);
        events.push(LocomotionEvent::StartedClimbing);
    }

    fn hold_ladder(&self, body: &mut Body, span: &LadderSpan, vertical: Option<Vertical>) {
        body.position.x = span.ladder.center_x;
        let speed = self.ladders.climb_speed;
        let velocity_y = match vertical {
            Some(Vertical::Up) => speed,
            Some(Vertical::Down) => -speed,
            None => 0.0,
        };
        body.velocity = Vec2::new(0.0, velocity_y);
    }

    fn stop_climbing(&self, state: &mut MovementState, events: &mut Vec<LocomotionEvent>) {
        if state.climbing.take().is_some() {
            events.push(LocomotionEvent::StoppedClimbing);
        }
    }
}

impl MovementState {
    /// Fresh contact with ground from above after being airborne.
    pub fn land(&mut self, body: &mut Body, on_bouncepad: bool) {
        self.on_ground = true;
        self.on_bouncepad = on_bouncepad;
        self.using_jump_gravity = false;
        self.jump_cut_pending = false;
        self.sliding_on_wall = false;
        self.wall_jump.cancel();
        if on_bouncepad {
            body.velocity.x = 0.0;
            body.acceleration.x = 0.0;
        }
    }

    /// Launched upward by a stomp or a spring.
    pub fn launch(&mut self, body: &mut Body, velocity_y: f32, jump_gravity: bool) {
        body.velocity.y = velocity_y;
        self.on_ground = false;
        self.on_bouncepad = false;
        self.using_jump_gravity = jump_gravity;
        self.jump_cut_pending = false;
        self.jump_origin_y = body.position.y;
        self.coyote.consume();
    }
}

/// Upward speed after stomping an enemy.
pub fn stomp_bounce(tuning: &MovementTuning, sprinting: bool) -> f32 {
    if sprinting {
        tuning.stomp_bounce * tuning.sprint_stomp_multiplier
    } else {
        tuning.stomp_bounce
    }
}
