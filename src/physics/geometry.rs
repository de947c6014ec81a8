//! Sides and axis-aligned bounds in world space (y-up).

use avian2d::prelude::Collider;
use bevy::prelude::*;

/// Which side of a body another body is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Classify a direction pointing from "me" toward the other body.
    /// The dominant axis wins; ties go to the vertical sides.
    pub fn from_normal(normal: Vec2) -> Option<Side> {
        if normal.length_squared() <= f32::EPSILON {
            return None;
        }
        Some(if normal.x.abs() > normal.y.abs() {
            if normal.x > 0.0 { Side::Right } else { Side::Left }
        } else if normal.y > 0.0 {
            Side::Top
        } else {
            Side::Bottom
        })
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Outward unit direction of this side.
    pub fn direction(self) -> Dir2 {
        match self {
            Side::Left => Dir2::NEG_X,
            Side::Right => Dir2::X,
            Side::Top => Dir2::Y,
            Side::Bottom => Dir2::NEG_Y,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tight bounds of `collider` centred at `position`. Rotation is ignored;
    /// gameplay bodies are rotation-locked.
    pub fn of_body(position: Vec2, collider: &Collider) -> Self {
        let local = collider.shape_scaled().compute_local_aabb();
        Self {
            min: position + Vec2::new(local.mins.x, local.mins.y),
            max: position + Vec2::new(local.maxs.x, local.maxs.y),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    pub fn top(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Snap edges outward to whole units so sub-pixel drift does not change
    /// which corner a probe starts from.
    pub fn rounded(&self) -> Self {
        Self {
            min: self.min.round(),
            max: self.max.round(),
        }
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Side of `self` that `other` is on, by the smallest edge gap.
    pub fn side_of(&self, other: &Bounds) -> Side {
        let gaps = [
            (Side::Left, (self.left() - other.right()).abs()),
            (Side::Right, (self.right() - other.left()).abs()),
            (Side::Top, (self.top() - other.bottom()).abs()),
            (Side::Bottom, (self.bottom() - other.top()).abs()),
        ];
        let mut best = gaps[0];
        for gap in &gaps[1..] {
            if gap.1 < best.1 {
                best = *gap;
            }
        }
        best.0
    }
}
