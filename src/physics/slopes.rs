//! Slope traversal: keeps a body glued to an inclined surface by redirecting
//! its velocity along the surface while it walks, and lets it fly off when
//! its motion diverges too far.

use bevy::prelude::*;

use crate::physics::raycast::is_inclined;

/// Inclined terrain. `begin`/`end` are the world endpoints of the walkable edge.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SlopeSurface {
    pub begin: Vec2,
    pub end: Vec2,
}

impl SlopeSurface {
    /// Unit direction of the edge, oriented left to right.
    pub fn tangent(&self) -> Vec2 {
        let dir = (self.end - self.begin).normalize_or_zero();
        if dir.x < 0.0 { -dir } else { dir }
    }

    /// Surface height at `x`, clamped to the edge.
    pub fn height_at(&self, x: f32) -> f32 {
        let (a, b) = if self.begin.x <= self.end.x {
            (self.begin, self.end)
        } else {
            (self.end, self.begin)
        };
        if (b.x - a.x).abs() <= f32::EPSILON {
            return a.y.max(b.y);
        }
        let t = ((x - a.x) / (b.x - a.x)).clamp(0.0, 1.0);
        a.y + (b.y - a.y) * t
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlopeState {
    #[default]
    NotOnSlope,
    OnSlope,
    MovingAlongSlope,
}

/// How an adjustment changed the velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeAdjustment {
    Untouched,
    Reprojected,
    Stopped,
    BrokeAway,
}

#[derive(Component, Debug, Clone)]
pub struct Slopes {
    pub breakaway_angle: f32,
    state: SlopeState,
    surface: Option<(Entity, SlopeSurface)>,
}

impl Slopes {
    pub fn new(breakaway_angle: f32) -> Self {
        Self {
            breakaway_angle,
            state: SlopeState::NotOnSlope,
            surface: None,
        }
    }

    pub fn state(&self) -> SlopeState {
        self.state
    }

    pub fn surface(&self) -> Option<Entity> {
        self.surface.map(|(entity, _)| entity)
    }

    /// Standing on an inclined surface. A body already moving along a slope
    /// keeps that state when it crosses onto the next segment.
    pub fn land_on(&mut self, entity: Entity, surface: SlopeSurface) {
        self.surface = Some((entity, surface));
        if self.state == SlopeState::NotOnSlope {
            self.state = SlopeState::OnSlope;
        }
    }

    /// The contact with `entity` ended.
    pub fn leave(&mut self, entity: Entity) {
        if self.surface() == Some(entity) {
            self.surface = None;
            self.state = SlopeState::NotOnSlope;
        }
    }

    /// Undo last step's reprojection so horizontal control sees the same
    /// speed it would on flat ground.
    pub fn flatten(&self, velocity: Vec2) -> Vec2 {
        if self.state != SlopeState::MovingAlongSlope || velocity.x == 0.0 {
            return velocity;
        }
        Vec2::new(velocity.x.signum() * velocity.length(), 0.0)
    }

    /// Redirect `velocity` along the slope when moving along it.
    pub fn adjust(&mut self, velocity: Vec2) -> (Vec2, SlopeAdjustment) {
        const STOPPED: f32 = 1e-3;

        let Some((_, surface)) = self.surface else {
            return (velocity, SlopeAdjustment::Untouched);
        };
        let tangent = surface.tangent();
        if self.state == SlopeState::NotOnSlope || !is_inclined(Vec2::new(-tangent.y, tangent.x)) {
            return (velocity, SlopeAdjustment::Untouched);
        }

        if velocity.x.abs() <= STOPPED {
            if self.state == SlopeState::MovingAlongSlope && velocity.y <= 0.0 {
                self.state = SlopeState::OnSlope;
                return (Vec2::ZERO, SlopeAdjustment::Stopped);
            }
            return (velocity, SlopeAdjustment::Untouched);
        }

        let speed = velocity.length();
        let divergence = velocity.normalize().dot(tangent).abs().clamp(0.0, 1.0).acos();
        if divergence > self.breakaway_angle {
            self.state = SlopeState::NotOnSlope;
            return (velocity, SlopeAdjustment::BrokeAway);
        }

        let rising = tangent.y > 0.0;
        let moving_right = velocity.x > 0.0;
        let slope = (tangent.y / tangent.x).abs();
        let velocity_slope = (velocity.y / velocity.x).abs();
        let moving_up = moving_right == rising && velocity_slope <= slope + 1e-4;
        let moving_down = moving_right != rising && velocity.y <= 0.0;

        if moving_up || moving_down {
            self.state = SlopeState::MovingAlongSlope;
            return (
                tangent * velocity.x.signum() * speed,
                SlopeAdjustment::Reprojected,
            );
        }
        (velocity, SlopeAdjustment::Untouched)
    }
}
