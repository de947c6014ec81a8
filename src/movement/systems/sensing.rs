//! Movement domain: probes that fill in the player's `Surroundings`.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{Damage, Damageable, Downed};
use crate::config::{LadderTuning, MovementTuning};
use crate::level::Bouncepad;
use crate::movement::{Ladder, LadderSpan, MovementState, Player, Surroundings, WallContact};
use crate::physics::{
    Bounds, GameLayer, OneWayPlatform, RayCaster, RayFilter, Side, SlopeSurface, Slopes,
    Touching, raycast_side, slope_below, wall_side,
};

/// Extra reach of the slope probe past the ground probe, covering the gap
/// under the uphill corner.
const SLOPE_PROBE_MARGIN: f32 = 3.0;

pub(crate) fn wall_contact(side: Option<Side>) -> WallContact {
    match side {
        Some(Side::Left) => WallContact::Left,
        Some(Side::Right) => WallContact::Right,
        _ => WallContact::None,
    }
}

/// A one-way platform only counts as ground when the feet rest on its top.
pub(crate) fn stands_on(feet: f32, platform: &Bounds, tolerance: f32) -> bool {
    feet >= platform.top() - tolerance
}

/// Everything the body stands on this step. Probe hits count unless the
/// hook cancels their contacts; a one-way platform counts only while the
/// feet rest on its top and the body is not climbing. Bottom contacts from
/// `touching` count unless they are one-way.
#[allow(clippy::too_many_arguments)]
pub(crate) fn ground_contacts(
    caster: &impl RayCaster,
    bounds: &Bounds,
    touching: &Touching,
    filter: &RayFilter,
    probe: f32,
    climbing: bool,
    is_intangible: impl Fn(Entity) -> bool,
    one_way_bounds: impl Fn(Entity) -> Option<Bounds>,
) -> Vec<Entity> {
    raycast_side(caster, bounds, Side::Bottom, probe, filter)
        .into_iter()
        .filter(|hit| !is_intangible(hit.entity))
        .filter(|hit| match one_way_bounds(hit.entity) {
            Some(platform) => !climbing && stands_on(bounds.bottom(), &platform, probe),
            None => true,
        })
        .map(|hit| hit.entity)
        .chain(
            touching
                .on(Side::Bottom)
                .filter(|e| one_way_bounds(*e).is_none()),
        )
        .collect()
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn sense_surroundings(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    ladder_tuning: Res<LadderTuning>,
    one_way: Query<(&Position, &Collider), With<OneWayPlatform>>,
    threats: Query<&Damage>,
    bouncepads: Query<(), With<Bouncepad>>,
    ladders: Query<&Ladder>,
    slope_surfaces: Query<&SlopeSurface>,
    mut players: Query<
        (
            Entity,
            &Position,
            &Collider,
            &Touching,
            &MovementState,
            Option<&Damageable>,
            &mut Slopes,
            &mut Surroundings,
        ),
        (With<Player>, Without<Downed>),
    >,
) {
    for (entity, position, collider, touching, state, damageable, mut slopes, mut surroundings) in
        &mut players
    {
        let bounds = Bounds::of_body(position.0, collider);
        let ground_filter = RayFilter::new(&[GameLayer::Ground, GameLayer::Hazard]).excluding(entity);
        let is_one_way = |e: Entity| one_way.contains(e);
        // Bodies whose contacts the hook cancels (enemies, saws) are never terrain.
        let is_intangible = |e: Entity| threats.get(e).is_ok_and(|damage| damage.cancel_contact);

        let ground = ground_contacts(
            &spatial_query,
            &bounds,
            touching,
            &ground_filter,
            tuning.ground_probe,
            state.is_climbing(),
            is_intangible,
            |e| {
                one_way
                    .get(e)
                    .ok()
                    .map(|(platform_position, platform_collider)| {
                        Bounds::of_body(platform_position.0, platform_collider)
                    })
            },
        );

        let wall = wall_side(
            &spatial_query,
            &bounds,
            tuning.wall_probe,
            &ground_filter,
            |e| is_one_way(e) || is_intangible(e),
        );
        let wall_in_reach = wall_side(
            &spatial_query,
            &bounds,
            tuning.wall_jump_reach,
            &ground_filter,
            |e| is_one_way(e) || is_intangible(e),
        );

        let ladder_filter = RayFilter::new(&[GameLayer::Climbable]).excluding(entity);
        let below = raycast_side(
            &spatial_query,
            &bounds,
            Side::Bottom,
            ladder_tuning.probe_below,
            &ladder_filter,
        );
        let mut spans: Vec<LadderSpan> = Vec::new();
        for candidate in touching
            .passive()
            .iter()
            .copied()
            .chain(below.into_iter().map(|hit| hit.entity))
        {
            if spans.iter().any(|span| span.entity == candidate) {
                continue;
            }
            if let Ok(ladder) = ladders.get(candidate) {
                spans.push(LadderSpan {
                    entity: candidate,
                    ladder: *ladder,
                });
            }
        }

        let slope = slope_below(
            &spatial_query,
            &bounds,
            tuning.ground_probe + SLOPE_PROBE_MARGIN,
            &ground_filter,
        )
        .and_then(|hit| Some((hit.entity, *slope_surfaces.get(hit.entity).ok()?)));
        match slope {
            Some((slope_entity, surface)) => slopes.land_on(slope_entity, surface),
            None => {
                if let Some(previous) = slopes.surface() {
                    slopes.leave(previous);
                }
            }
        }

        surroundings.bounds = bounds;
        surroundings.on_ground = !ground.is_empty();
        surroundings.on_bouncepad = ground.iter().any(|e| bouncepads.contains(*e));
        surroundings.wall = wall_contact(wall);
        surroundings.wall_in_reach = wall_contact(wall_in_reach);
        surroundings.ladders = spans;
        surroundings.knocked_back = damageable.is_some_and(Damageable::is_being_knocked_back);
    }
}
