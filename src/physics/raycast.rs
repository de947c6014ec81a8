//! Side probes: pairs of short rays cast from just inside a body's corners.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::geometry::{Bounds, Side};
use crate::physics::layers::GameLayer;

/// Distance the probe origins sit inward from each corner.
pub const CORNER_INSET: f32 = 1.0;
/// Upper bound on hits gathered per ray.
pub const MAX_RAY_HITS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec2,
    pub normal: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct RayFilter {
    pub mask: u32,
    pub exclude: Vec<Entity>,
}

impl RayFilter {
    pub fn new(layers: &[GameLayer]) -> Self {
        Self {
            mask: GameLayer::mask_of(layers),
            exclude: Vec::new(),
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude.push(entity);
        self
    }

    pub fn accepts(&self, entity: Entity, layer_bits: u32) -> bool {
        self.mask & layer_bits != 0 && !self.exclude.contains(&entity)
    }
}

/// Anything that can answer a single ray query.
pub trait RayCaster {
    /// All hits along the ray, in any order.
    fn cast(&self, origin: Vec2, direction: Dir2, max_distance: f32, filter: &RayFilter)
    -> Vec<RayHit>;
}

impl RayCaster for SpatialQuery<'_, '_> {
    fn cast(
        &self,
        origin: Vec2,
        direction: Dir2,
        max_distance: f32,
        filter: &RayFilter,
    ) -> Vec<RayHit> {
        let query_filter = SpatialQueryFilter::from_mask(LayerMask(filter.mask))
            .with_excluded_entities(filter.exclude.iter().copied());
        self.ray_hits(origin, direction, max_distance, MAX_RAY_HITS, true, &query_filter)
            .into_iter()
            .map(|hit| RayHit {
                entity: hit.entity,
                distance: hit.distance,
                point: origin + direction * hit.distance,
                normal: hit.normal,
            })
            .collect()
    }
}

/// Start points of the two probes for `side`. The body's bounds are rounded
/// to whole units first, then each origin is inset from its corner.
pub fn side_ray_origins(bounds: &Bounds, side: Side) -> [Vec2; 2] {
    let b = bounds.rounded();
    match side {
        Side::Bottom => [
            Vec2::new(b.left() + CORNER_INSET, b.bottom()),
            Vec2::new(b.right() - CORNER_INSET, b.bottom()),
        ],
        Side::Top => [
            Vec2::new(b.left() + CORNER_INSET, b.top()),
            Vec2::new(b.right() - CORNER_INSET, b.top()),
        ],
        Side::Left => [
            Vec2::new(b.left(), b.bottom() + CORNER_INSET),
            Vec2::new(b.left(), b.top() - CORNER_INSET),
        ],
        Side::Right => [
            Vec2::new(b.right(), b.bottom() + CORNER_INSET),
            Vec2::new(b.right(), b.top() - CORNER_INSET),
        ],
    }
}

/// Hits of each probe separately. For horizontal sides index 0 is the left
/// corner; for vertical sides index 0 is the lower corner.
pub fn raycast_corners(
    caster: &impl RayCaster,
    bounds: &Bounds,
    side: Side,
    distance: f32,
    filter: &RayFilter,
) -> [Vec<RayHit>; 2] {
    let direction = side.direction();
    side_ray_origins(bounds, side).map(|origin| {
        let mut hits = caster.cast(origin, direction, distance, filter);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    })
}

/// Both probes merged: one hit per entity (the nearest), sorted by distance.
pub fn raycast_side(
    caster: &impl RayCaster,
    bounds: &Bounds,
    side: Side,
    distance: f32,
    filter: &RayFilter,
) -> Vec<RayHit> {
    let [first, second] = raycast_corners(caster, bounds, side, distance, filter);
    let mut merged: Vec<RayHit> = Vec::with_capacity(first.len() + second.len());
    for hit in first.into_iter().chain(second) {
        match merged.iter_mut().find(|h| h.entity == hit.entity) {
            Some(existing) if hit.distance < existing.distance => *existing = hit,
            Some(_) => {}
            None => merged.push(hit),
        }
    }
    merged.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    merged
}

/// True for a surface normal that is neither flat ground nor a wall.
pub fn is_inclined(normal: Vec2) -> bool {
    const EPSILON: f32 = 1e-3;
    normal.x.abs() > EPSILON && normal.y.abs() > EPSILON
}

/// Nearest inclined surface below the body, if any.
pub fn slope_below(
    caster: &impl RayCaster,
    bounds: &Bounds,
    distance: f32,
    filter: &RayFilter,
) -> Option<RayHit> {
    raycast_side(caster, bounds, Side::Bottom, distance, filter)
        .into_iter()
        .find(|hit| is_inclined(hit.normal))
}

/// Which side a wall is on, preferring the nearer one. Hits on entities
/// for which `skip` holds (one-way platforms) are not walls.
pub fn wall_side(
    caster: &impl RayCaster,
    bounds: &Bounds,
    distance: f32,
    filter: &RayFilter,
    skip: impl Fn(Entity) -> bool,
) -> Option<Side> {
    let nearest = |side| {
        raycast_side(caster, bounds, side, distance, filter)
            .into_iter()
            .find(|hit| !is_inclined(hit.normal) && !skip(hit.entity))
            .map(|hit| hit.distance)
    };
    match (nearest(Side::Left), nearest(Side::Right)) {
        (Some(left), Some(right)) if right < left => Some(Side::Right),
        (Some(_), _) => Some(Side::Left),
        (None, Some(_)) => Some(Side::Right),
        (None, None) => None,
    }
}
