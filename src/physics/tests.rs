//! Tests for the physics domain.

use bevy::prelude::*;

use super::fake_world::FakeWorld;
use super::*;

fn entities(count: usize) -> Vec<Entity> {
    let mut world = World::new();
    (0..count).map(|_| world.spawn_empty().id()).collect()
}

fn ground_filter() -> RayFilter {
    RayFilter::new(&[GameLayer::Ground])
}

// -----------------------------------------------------------------------------
// Geometry tests
// -----------------------------------------------------------------------------

#[test]
fn test_side_from_normal_uses_dominant_axis() {
    assert_eq!(Side::from_normal(Vec2::new(0.0, -1.0)), Some(Side::Bottom));
    assert_eq!(Side::from_normal(Vec2::new(0.9, 0.1)), Some(Side::Right));
    assert_eq!(Side::from_normal(Vec2::new(-0.9, 0.3)), Some(Side::Left));
    assert_eq!(Side::from_normal(Vec2::new(0.5, -0.86)), Some(Side::Bottom));
    assert_eq!(Side::from_normal(Vec2::ZERO), None);
}

#[test]
fn test_bounds_side_of_picks_smallest_gap() {
    let me = Bounds::from_center_size(Vec2::ZERO, Vec2::splat(16.0));
    let floor = Bounds::new(Vec2::new(-40.0, -24.0), Vec2::new(40.0, -8.0));
    let wall = Bounds::new(Vec2::new(8.0, -20.0), Vec2::new(24.0, 20.0));
    assert_eq!(me.side_of(&floor), Side::Bottom);
    assert_eq!(me.side_of(&wall), Side::Right);
    assert_eq!(Side::Bottom.opposite(), Side::Top);
}

// -----------------------------------------------------------------------------
// Raycast tests
// -----------------------------------------------------------------------------

#[test]
fn test_bottom_origins_are_inset_from_rounded_corners() {
    let bounds = Bounds::new(Vec2::new(10.4, 20.6), Vec2::new(21.6, 36.2));
    let [left, right] = side_ray_origins(&bounds, Side::Bottom);
    assert_eq!(left, Vec2::new(10.0 + CORNER_INSET, 21.0));
    assert_eq!(right, Vec2::new(22.0 - CORNER_INSET, 21.0));
}

#[test]
fn test_side_probe_on_flat_ground_hits_once() {
    let e = entities(2);
    let world = FakeWorld::new().with_box(e[1], Vec2::new(-50.0, -10.0), Vec2::new(50.0, 0.0), GameLayer::Ground);
    let body = Bounds::new(Vec2::new(-6.0, 0.0), Vec2::new(6.0, 16.0));

    let hits = raycast_side(&world, &body, Side::Bottom, 1.0, &ground_filter().excluding(e[0]));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entity, e[1]);
    assert_eq!(hits[0].distance, 0.0);
}

#[test]
fn test_corner_probe_detects_ledge() {
    let e = entities(2);
    // Ground ends at x = 0; body straddles the edge.
    let world = FakeWorld::new().with_box(e[1], Vec2::new(-50.0, -10.0), Vec2::new(0.0, 0.0), GameLayer::Ground);
    let body = Bounds::new(Vec2::new(-6.0, 0.0), Vec2::new(6.0, 16.0));

    let [left, right] = raycast_corners(&world, &body, Side::Bottom, 2.0, &ground_filter());
    assert_eq!(left.len(), 1);
    assert!(right.is_empty());
}

#[test]
fn test_side_probe_dedupes_and_sorts() {
    let e = entities(3);
    let world = FakeWorld::new()
        .with_box(e[1], Vec2::new(-50.0, -10.0), Vec2::new(50.0, -3.0), GameLayer::Ground)
        .with_box(e[2], Vec2::new(-50.0, -20.0), Vec2::new(50.0, -12.0), GameLayer::Ground);
    let body = Bounds::new(Vec2::new(-6.0, 0.0), Vec2::new(6.0, 16.0));

    let hits = raycast_side(&world, &body, Side::Bottom, 20.0, &ground_filter());
    let order: Vec<Entity> = hits.iter().map(|h| h.entity).collect();
    assert_eq!(order, vec![e[1], e[2]]);
    assert_eq!(hits[0].distance, 3.0);
}

#[test]
fn test_side_probe_respects_layer_mask() {
    let e = entities(2);
    let world = FakeWorld::new().with_box(e[1], Vec2::new(-50.0, -10.0), Vec2::new(50.0, 0.0), GameLayer::Climbable);
    let body = Bounds::new(Vec2::new(-6.0, 0.0), Vec2::new(6.0, 16.0));

    assert!(raycast_side(&world, &body, Side::Bottom, 1.0, &ground_filter()).is_empty());
    let ladders = RayFilter::new(&[GameLayer::Climbable]);
    assert_eq!(raycast_side(&world, &body, Side::Bottom, 1.0, &ladders).len(), 1);
}

#[test]
fn test_slope_below_ignores_flat_ground() {
    let e = entities(3);
    let body = Bounds::new(Vec2::new(-6.0, 0.0), Vec2::new(6.0, 16.0));
    let flat = FakeWorld::new().with_box(e[1], Vec2::new(-50.0, -10.0), Vec2::new(50.0, 0.0), GameLayer::Ground);
    assert!(slope_below(&flat, &body, 2.0, &ground_filter()).is_none());

    let sloped = FakeWorld::new().with_slope(
        e[2],
        Vec2::new(-50.0, -10.0),
        Vec2::new(50.0, 0.0),
        Vec2::new(-0.707, 0.707),
    );
    let hit = slope_below(&sloped, &body, 2.0, &ground_filter()).expect("slope below");
    assert_eq!(hit.entity, e[2]);
}

#[test]
fn test_wall_side_prefers_nearest() {
    let e = entities(3);
    let world = FakeWorld::new()
        .with_box(e[1], Vec2::new(-20.0, 0.0), Vec2::new(-9.0, 40.0), GameLayer::Ground)
        .with_box(e[2], Vec2::new(7.0, 0.0), Vec2::new(20.0, 40.0), GameLayer::Ground);
    let body = Bounds::new(Vec2::new(-6.0, 1.0), Vec2::new(6.0, 17.0));

    assert_eq!(wall_side(&world, &body, 4.0, &ground_filter(), |_| false), Some(Side::Right));
    assert_eq!(wall_side(&world, &body, 0.5, &ground_filter(), |_| false), None);
}

#[test]
fn test_wall_side_skips_pass_through_edges() {
    let e = entities(3);
    let world = FakeWorld::new()
        .with_box(e[1], Vec2::new(-20.0, 0.0), Vec2::new(-9.0, 40.0), GameLayer::Ground)
        .with_box(e[2], Vec2::new(7.0, 0.0), Vec2::new(20.0, 40.0), GameLayer::Ground);
    let body = Bounds::new(Vec2::new(-6.0, 1.0), Vec2::new(6.0, 17.0));
    let one_way = e[2];

    assert_eq!(
        wall_side(&world, &body, 4.0, &ground_filter(), |entity| entity == one_way),
        Some(Side::Left)
    );
}

// -----------------------------------------------------------------------------
// Touching tests
// -----------------------------------------------------------------------------

#[test]
fn test_touching_moves_entity_between_sides() {
    let e = entities(1);
    let mut touching = Touching::default();
    touching.insert(e[0], Side::Bottom);
    touching.insert(e[0], Side::Left);

    assert_eq!(touching.side_of(e[0]), Some(Side::Left));
    assert!(!touching.any_on(Side::Bottom));
    assert_eq!(touching.contacts().len(), 1);
}

#[test]
fn test_touching_removal_only_affects_that_entity() {
    let e = entities(3);
    let mut touching = Touching::default();
    touching.insert(e[0], Side::Bottom);
    touching.insert(e[1], Side::Bottom);
    touching.insert_passive(e[2]);

    touching.remove(e[1]);
    assert_eq!(touching.on(Side::Bottom).collect::<Vec<_>>(), vec![e[0]]);
    assert_eq!(touching.passive(), &[e[2]]);

    touching.remove(e[2]);
    assert!(touching.passive().is_empty());
    assert!(touching.is_touching(e[0]));
}

// -----------------------------------------------------------------------------
// Carrier tests
// -----------------------------------------------------------------------------

#[test]
fn test_carrier_boards_once() {
    let e = entities(1);
    let mut carrier = Carrier::default();
    assert!(carrier.board(e[0]));
    assert!(!carrier.board(e[0]));
    assert_eq!(carrier.passengers().len(), 1);
    assert!(carrier.disembark(e[0]));
    assert!(!carrier.disembark(e[0]));
}

#[test]
fn test_carrier_reports_motion_since_last_step() {
    let mut carrier = Carrier::default();
    assert_eq!(carrier.advance(Vec2::new(10.0, 5.0)), Vec2::ZERO);
    assert_eq!(carrier.advance(Vec2::new(12.0, 4.0)), Vec2::new(2.0, -1.0));
    assert_eq!(carrier.advance(Vec2::new(12.0, 4.0)), Vec2::ZERO);
}

#[test]
fn test_passenger_keeps_world_position_through_attach_and_detach() {
    let carrier_at = Vec2::new(100.0, 40.0);
    let passenger_at = Vec2::new(104.5, 56.0);
    let local = to_local(carrier_at, passenger_at);
    assert_eq!(to_world(carrier_at, local), passenger_at);

    // Carrier moves 3 units right; passenger follows exactly.
    let moved = to_world(carrier_at + Vec2::X * 3.0, local);
    assert_eq!(moved, passenger_at + Vec2::X * 3.0);
}

// -----------------------------------------------------------------------------
// One-way platform tests
// -----------------------------------------------------------------------------

#[test]
fn test_one_way_blocks_body_falling_from_above() {
    assert!(allows_contact(Some(Side::Top), 32.0, -4.0, 32.0, 1.0));
    assert!(allows_contact(Some(Side::Top), 31.5, 0.0, 32.0, 1.0));
}

#[test]
fn test_one_way_passes_body_rising_from_below() {
    assert!(!allows_contact(Some(Side::Top), 28.0, 3.0, 32.0, 1.0));
    assert!(!allows_contact(Some(Side::Bottom), 20.0, 3.0, 32.0, 1.0));
}

#[test]
fn test_one_way_passes_side_contacts() {
    assert!(!allows_contact(Some(Side::Left), 40.0, 0.0, 32.0, 1.0));
    assert!(!allows_contact(None, 40.0, 0.0, 32.0, 1.0));
}

// -----------------------------------------------------------------------------
// Slope tests
// -----------------------------------------------------------------------------

fn rising_slope() -> SlopeSurface {
    SlopeSurface {
        begin: Vec2::new(0.0, 0.0),
        end: Vec2::new(16.0, 16.0),
    }
}

#[test]
fn test_slope_tangent_is_oriented_left_to_right() {
    let reversed = SlopeSurface {
        begin: Vec2::new(16.0, 16.0),
        end: Vec2::ZERO,
    };
    assert!(reversed.tangent().x > 0.0);
    assert_eq!(rising_slope().height_at(8.0), 8.0);
    assert_eq!(rising_slope().height_at(40.0), 16.0);
}

#[test]
fn test_walking_up_slope_preserves_speed() {
    let e = entities(1);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(e[0], rising_slope());

    let (velocity, adjustment) = slopes.adjust(Vec2::new(140.0, 0.0));
    assert_eq!(adjustment, SlopeAdjustment::Reprojected);
    assert!((velocity.length() - 140.0).abs() < 1e-3);
    assert!(velocity.y > 0.0);
    assert_eq!(slopes.state(), SlopeState::MovingAlongSlope);
}

#[test]
fn test_walking_down_slope_follows_surface() {
    let e = entities(1);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(e[0], rising_slope());

    let (velocity, _) = slopes.adjust(Vec2::new(-80.0, 0.0));
    assert!(velocity.y < 0.0);
    assert!((velocity.length() - 80.0).abs() < 1e-3);

    // Next step: flattening recovers the flat-ground speed.
    let flat = slopes.flatten(velocity);
    assert!((flat - Vec2::new(-80.0, 0.0)).length() < 1e-3);
}

#[test]
fn test_steep_jump_breaks_away() {
    let e = entities(1);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(
        e[0],
        SlopeSurface {
            begin: Vec2::ZERO,
            end: Vec2::new(16.0, 4.0),
        },
    );

    let (velocity, adjustment) = slopes.adjust(Vec2::new(20.0, 290.0));
    assert_eq!(adjustment, SlopeAdjustment::BrokeAway);
    assert_eq!(velocity, Vec2::new(20.0, 290.0));
    assert_eq!(slopes.state(), SlopeState::NotOnSlope);
}

#[test]
fn test_jumping_downhill_is_not_glued() {
    let e = entities(1);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(e[0], rising_slope());

    let (velocity, adjustment) = slopes.adjust(Vec2::new(-140.0, 290.0));
    assert_eq!(adjustment, SlopeAdjustment::BrokeAway);
    assert_eq!(velocity, Vec2::new(-140.0, 290.0));
}

#[test]
fn test_stopping_on_slope_zeroes_velocity() {
    let e = entities(1);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(e[0], rising_slope());
    slopes.adjust(Vec2::new(140.0, 0.0));

    let (velocity, adjustment) = slopes.adjust(Vec2::new(0.0, -12.0));
    assert_eq!(adjustment, SlopeAdjustment::Stopped);
    assert_eq!(velocity, Vec2::ZERO);
}

#[test]
fn test_leaving_slope_resets_state() {
    let e = entities(2);
    let mut slopes = Slopes::new(1.0);
    slopes.land_on(e[0], rising_slope());
    slopes.leave(e[1]);
    assert_eq!(slopes.state(), SlopeState::OnSlope);
    slopes.leave(e[0]);
    assert_eq!(slopes.state(), SlopeState::NotOnSlope);
    assert_eq!(slopes.adjust(Vec2::new(50.0, 0.0)).1, SlopeAdjustment::Untouched);
}
