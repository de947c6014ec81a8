//! In-memory ray caster over axis-aligned boxes, for tests that need
//! probes without a running solver.

use avian2d::prelude::PhysicsLayer;
use bevy::prelude::*;

use crate::physics::{Bounds, GameLayer, RayCaster, RayFilter, RayHit};

/// Axis-aligned boxes answering ray queries like the solver would.
pub(crate) struct FakeWorld {
    boxes: Vec<FakeBox>,
}

struct FakeBox {
    entity: Entity,
    bounds: Bounds,
    layer: GameLayer,
    surface_normal: Option<Vec2>,
}

impl FakeWorld {
    pub(crate) fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    pub(crate) fn with_box(mut self, entity: Entity, min: Vec2, max: Vec2, layer: GameLayer) -> Self {
        self.boxes.push(FakeBox {
            entity,
            bounds: Bounds::new(min, max),
            layer,
            surface_normal: None,
        });
        self
    }

    pub(crate) fn with_slope(mut self, entity: Entity, min: Vec2, max: Vec2, normal: Vec2) -> Self {
        self.boxes.push(FakeBox {
            entity,
            bounds: Bounds::new(min, max),
            layer: GameLayer::Ground,
            surface_normal: Some(normal),
        });
        self
    }
}

fn ray_box(origin: Vec2, direction: Vec2, max_distance: f32, bounds: &Bounds) -> Option<(f32, Vec2)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec2::ZERO;
    for axis in 0..2 {
        let (o, d, lo, hi) = (origin[axis], direction[axis], bounds.min[axis], bounds.max[axis]);
        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let (t1, t2) = ((lo - o) / d, (hi - o) / d);
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        if near > t_enter {
            t_enter = near;
            normal = Vec2::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(far);
    }
    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }
    let distance = t_enter.max(0.0);
    if distance > max_distance {
        return None;
    }
    Some((distance, normal))
}

impl RayCaster for FakeWorld {
    fn cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        filter: &RayFilter,
    ) -> Vec<RayHit> {
        self.boxes
            .iter()
            .filter(|b| filter.accepts(b.entity, b.layer.to_bits()))
            .filter_map(|b| {
                let (distance, normal) = ray_box(origin, *direction, max_distance, &b.bounds)?;
                Some(RayHit {
                    entity: b.entity,
                    distance,
                    point: origin + *direction * distance,
                    normal: b.surface_normal.unwrap_or(normal),
                })
            })
            .collect()
    }
}
