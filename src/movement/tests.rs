//! Tests for the movement domain.

use bevy::prelude::*;

use super::ladder::{can_grab, choose_ladder};
use super::systems::sensing::{ground_contacts, stands_on, wall_contact};
use super::*;
use crate::config::{LadderTuning, MovementTuning};
use crate::input::{Action, ActionSet, Controls, Vertical};
use crate::physics::fake_world::FakeWorld;
use crate::physics::{Bounds, GameLayer, RayFilter, Side, Touching};

const DT: f32 = 1.0 / 60.0;

fn press(actions: &[Action]) -> Controls {
    let mut controls = Controls::new(1.0);
    controls.record(ActionSet::of(actions), ActionSet::default());
    controls.begin_step();
    controls
}

fn idle() -> Controls {
    Controls::new(1.0)
}

/// Jump was held last step and let go since.
fn released_jump() -> Controls {
    let mut controls = press(&[Action::Jump]);
    controls.record(ActionSet::default(), ActionSet::default());
    controls.begin_step();
    controls
}

fn bounds_at(center: Vec2) -> Bounds {
    Bounds::from_center_size(center, Vec2::new(12.0, 16.0))
}

fn grounded() -> Surroundings {
    Surroundings {
        bounds: bounds_at(Vec2::new(0.0, 8.0)),
        on_ground: true,
        ..default()
    }
}

fn airborne() -> Surroundings {
    Surroundings {
        bounds: bounds_at(Vec2::new(0.0, 40.0)),
        ..default()
    }
}

fn body(position: Vec2, velocity: Vec2) -> Body {
    Body {
        position,
        velocity,
        acceleration: Vec2::ZERO,
    }
}

fn pre_update(
    controls: &Controls,
    surroundings: &Surroundings,
    state: &mut MovementState,
    body: &mut Body,
    dt: f32,
) -> Vec<LocomotionEvent> {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls,
        surroundings,
    }
    .pre_update(state, body, dt)
}

fn post_update(
    controls: &Controls,
    surroundings: &Surroundings,
    state: &mut MovementState,
    body: &mut Body,
    dt: f32,
) {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls,
        surroundings,
    }
    .post_update(state, body, dt);
}

fn new_state() -> MovementState {
    MovementState::new(&MovementTuning::default())
}

fn ladder_span(world: &mut World) -> LadderSpan {
    LadderSpan {
        entity: world.spawn_empty().id(),
        ladder: Ladder {
            center_x: 0.0,
            bottom: 0.0,
            top: 48.0,
        },
    }
}

// -----------------------------------------------------------------------------
// Horizontal movement tests
// -----------------------------------------------------------------------------

#[test]
fn test_direction_accelerates_and_faces() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    pre_update(&press(&[Action::Left]), &grounded(), &mut state, &mut body, DT);
    assert_eq!(body.acceleration.x, -384.0);
    assert_eq!(state.facing, Facing::Left);
}

#[test]
fn test_bouncepad_blocks_acceleration_but_not_facing() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    let surroundings = Surroundings {
        on_bouncepad: true,
        ..grounded()
    };
    pre_update(&press(&[Action::Left]), &surroundings, &mut state, &mut body, DT);
    assert_eq!(body.acceleration.x, 0.0);
    assert_eq!(state.facing, Facing::Left);
}

#[test]
fn test_decelerate_snaps_to_rest() {
    assert_eq!(decelerate(10.0, 4.0, 1.0), 6.0);
    assert_eq!(decelerate(-10.0, 4.0, 1.0), -6.0);
    assert_eq!(decelerate(3.0, 4.0, 1.0), 0.0);
    assert_eq!(decelerate(1.5, 1.0, 1.0), 0.0);
    assert_eq!(decelerate(0.0, 4.0, 1.0), 0.0);
}

#[test]
fn test_ground_deceleration() {
    let surroundings = grounded();
    let mut state = new_state();
    state.on_ground = true;

    let mut stopping = body(Vec2::ZERO, Vec2::new(100.0, 0.0));
    post_update(&idle(), &surroundings, &mut state, &mut stopping, 0.1);
    assert!((stopping.velocity.x - 52.0).abs() < 1e-3);

    let mut turning = body(Vec2::ZERO, Vec2::new(100.0, 0.0));
    post_update(&press(&[Action::Left]), &surroundings, &mut state, &mut turning, 0.1);
    assert!((turning.velocity.x - 36.0).abs() < 1e-3);
}

#[test]
fn test_over_max_on_ground_slows_to_cap() {
    let surroundings = grounded();
    let mut state = new_state();
    state.on_ground = true;

    let mut fast = body(Vec2::ZERO, Vec2::new(150.0, 0.0));
    post_update(&press(&[Action::Right]), &surroundings, &mut state, &mut fast, 0.1);
    assert!((fast.velocity.x - 102.0).abs() < 1e-3);

    let mut near_cap = body(Vec2::ZERO, Vec2::new(100.0, 0.0));
    post_update(&press(&[Action::Right]), &surroundings, &mut state, &mut near_cap, 0.1);
    assert_eq!(near_cap.velocity.x, 80.0);
}

#[test]
fn test_air_speed_is_clamped() {
    let surroundings = airborne();
    let mut state = new_state();

    let mut fast = body(Vec2::ZERO, Vec2::new(150.0, 0.0));
    post_update(&press(&[Action::Right]), &surroundings, &mut state, &mut fast, 0.1);
    assert_eq!(fast.velocity.x, 80.0);

    let mut turning = body(Vec2::ZERO, Vec2::new(100.0, 0.0));
    post_update(&press(&[Action::Left]), &surroundings, &mut state, &mut turning, 0.1);
    assert!((turning.velocity.x - 68.0).abs() < 1e-3);
}

#[test]
fn test_knockback_ignores_input() {
    let surroundings = Surroundings {
        knocked_back: true,
        ..grounded()
    };
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::new(-100.0, 300.0));
    let events = pre_update(
        &press(&[Action::Right, Action::Jump]),
        &surroundings,
        &mut state,
        &mut body,
        DT,
    );
    assert!(events.is_empty());
    assert_eq!(body.acceleration, Vec2::ZERO);
    assert_eq!(body.velocity, Vec2::new(-100.0, 300.0));
}

// -----------------------------------------------------------------------------
// Jump tests
// -----------------------------------------------------------------------------

#[test]
fn test_jump_from_ground() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    let events = pre_update(&press(&[Action::Jump]), &grounded(), &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::Jumped));
    assert_eq!(body.velocity.y, 290.0);
    assert!(state.using_jump_gravity);
    assert!(!state.on_ground);
    assert_eq!(state.jump_origin_y, 8.0);
}

#[test]
fn test_sprinting_jump_is_stronger() {
    let mut controls = press(&[Action::Right, Action::Run, Action::Jump]);
    controls.tick_sprint(1.0, true, 150.0);
    assert!(controls.is_sprinting());

    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::new(150.0, 0.0));
    pre_update(&controls, &grounded(), &mut state, &mut body, DT);
    assert_eq!(body.velocity.y, 320.0);
}

#[test]
fn test_coyote_jump_shortly_after_leaving_ground() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    pre_update(&idle(), &grounded(), &mut state, &mut body, DT);

    let events = pre_update(&press(&[Action::Jump]), &airborne(), &mut state, &mut body, 0.05);
    assert!(events.contains(&LocomotionEvent::Jumped));
}

#[test]
fn test_no_jump_once_coyote_expires() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    pre_update(&idle(), &grounded(), &mut state, &mut body, DT);
    pre_update(&idle(), &airborne(), &mut state, &mut body, 0.06);

    let events = pre_update(&press(&[Action::Jump]), &airborne(), &mut state, &mut body, 0.06);
    assert!(events.is_empty());
    assert_eq!(body.velocity.y, 0.0);
}

#[test]
fn test_early_release_cut_waits_for_min_height() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::ZERO);
    pre_update(&press(&[Action::Jump]), &grounded(), &mut state, &mut body, DT);

    // Released two units up: the cut is deferred.
    body.position.y = 10.0;
    body.velocity.y = 200.0;
    let events = pre_update(&released_jump(), &airborne(), &mut state, &mut body, DT);
    assert!(!events.contains(&LocomotionEvent::JumpCut));
    assert!(state.jump_cut_pending);
    assert_eq!(body.velocity.y, 200.0);

    body.position.y = 17.0;
    body.velocity.y = 180.0;
    let events = pre_update(&idle(), &airborne(), &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::JumpCut));
    assert_eq!(body.velocity.y, 90.0);
    assert!(!state.using_jump_gravity);
    assert!(!state.jump_cut_pending);
}

#[test]
fn test_gravity_selection() {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    let held = press(&[Action::Jump]);
    let surroundings = airborne();
    let locomotion = Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls: &held,
        surroundings: &surroundings,
    };

    let mut state = new_state();
    state.using_jump_gravity = true;
    assert_eq!(locomotion.gravity(&mut state, 100.0), 500.0);
    assert_eq!(locomotion.gravity(&mut state, 5.0), 300.0);
    assert_eq!(locomotion.gravity(&mut state, -5.0), 300.0);
    assert_eq!(locomotion.gravity(&mut state, -20.0), 1000.0);
    assert!(!state.using_jump_gravity);

    state.on_ground = true;
    assert_eq!(locomotion.gravity(&mut state, 0.0), 0.0);
}

#[test]
fn test_jump_gravity_needs_held_button() {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    let controls = idle();
    let surroundings = airborne();
    let locomotion = Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls: &controls,
        surroundings: &surroundings,
    };
    let mut state = new_state();
    state.using_jump_gravity = true;
    assert_eq!(locomotion.gravity(&mut state, 100.0), 1000.0);
}

#[test]
fn test_fall_speed_is_clamped() {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    let controls = idle();
    let surroundings = airborne();
    let mut state = new_state();
    let mut body = body(Vec2::ZERO, Vec2::new(0.0, -265.0));
    Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls: &controls,
        surroundings: &surroundings,
    }
    .integrate(&mut state, &mut body, 0.1);
    assert_eq!(body.velocity.y, -270.0);
}

#[test]
fn test_stomp_bounce_sprint_multiplier() {
    let tuning = MovementTuning::default();
    assert_eq!(stomp_bounce(&tuning, false), 330.0);
    assert_eq!(stomp_bounce(&tuning, true), 412.5);
}

#[test]
fn test_stomp_bounces_higher_than_a_jump() {
    let tuning = MovementTuning::default();
    assert!(stomp_bounce(&tuning, false) > tuning.jump_force);
    assert!(stomp_bounce(&tuning, true) > tuning.sprint_jump_force);
}

#[test]
fn test_landing_on_bouncepad_stops_horizontal_motion() {
    let mut state = new_state();
    state.using_jump_gravity = true;
    let mut body = body(Vec2::ZERO, Vec2::new(100.0, -50.0));
    body.acceleration.x = 384.0;
    state.land(&mut body, true);
    assert!(state.on_ground);
    assert!(state.on_bouncepad);
    assert!(!state.using_jump_gravity);
    assert_eq!(body.velocity.x, 0.0);
    assert_eq!(body.acceleration.x, 0.0);
}

// -----------------------------------------------------------------------------
// Wall tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_jump_pushes_away_and_locks_control() {
    let mut state = new_state();
    let near_left_wall = Surroundings {
        wall: WallContact::Left,
        wall_in_reach: WallContact::Left,
        ..airborne()
    };
    let mut body = body(Vec2::new(0.0, 40.0), Vec2::new(0.0, -50.0));
    let events = pre_update(&press(&[Action::Jump]), &near_left_wall, &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::WallJumped));
    assert_eq!(body.velocity, Vec2::new(130.0, 260.0));
    assert_eq!(state.facing, Facing::Right);
    assert!(state.is_wall_jumping());

    // Steering back toward the wall is ignored during the lockout.
    pre_update(&press(&[Action::Left]), &airborne(), &mut state, &mut body, 0.05);
    assert_eq!(body.velocity.x, 130.0);
    assert_eq!(state.facing, Facing::Right);

    let events = pre_update(&idle(), &airborne(), &mut state, &mut body, 0.2);
    assert!(events.contains(&LocomotionEvent::WallJumpReleased));
    assert_eq!(body.velocity.x, 0.0);
    assert!(!state.is_wall_jumping());
}

#[test]
fn test_wall_jump_during_wall_coyote() {
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 40.0), Vec2::new(0.0, -50.0));
    let near_right_wall = Surroundings {
        wall_in_reach: WallContact::Right,
        ..airborne()
    };
    pre_update(&idle(), &near_right_wall, &mut state, &mut body, DT);

    let events = pre_update(&press(&[Action::Jump]), &airborne(), &mut state, &mut body, 0.05);
    assert!(events.contains(&LocomotionEvent::WallJumped));
    assert_eq!(body.velocity.x, -130.0);
}

#[test]
fn test_wall_slide_caps_fall_speed() {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    let controls = press(&[Action::Right]);
    let on_right_wall = Surroundings {
        wall: WallContact::Right,
        wall_in_reach: WallContact::Right,
        ..airborne()
    };
    let mut state = new_state();
    let mut body = body(Vec2::new(0.0, 40.0), Vec2::new(0.0, -100.0));
    let locomotion = Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls: &controls,
        surroundings: &on_right_wall,
    };
    locomotion.pre_update(&mut state, &mut body, DT);
    assert!(state.sliding_on_wall);
    locomotion.integrate(&mut state, &mut body, DT);
    assert_eq!(body.velocity.y, -60.0);
}

#[test]
fn test_coyote_windows_refill_and_drain() {
    let tuning = MovementTuning::default();
    let mut coyote = Coyote::default();
    coyote.update(0.016, true, WallContact::None, &tuning);
    assert!(coyote.allows_jump());
    assert!(!coyote.allows_wall_jump());

    coyote.update(0.05, false, WallContact::Left, &tuning);
    assert!(coyote.allows_jump());
    assert!(coyote.allows_wall_jump());
    assert_eq!(coyote.last_wall(), WallContact::Left);

    coyote.update(0.06, false, WallContact::None, &tuning);
    assert!(!coyote.allows_jump());
    assert!(!coyote.allows_wall_jump());
    assert_eq!(coyote.last_wall(), WallContact::Left);
}

// -----------------------------------------------------------------------------
// Ladder tests
// -----------------------------------------------------------------------------

#[test]
fn test_ladder_grab_tolerances() {
    let tuning = LadderTuning::default();
    let ladder = Ladder {
        center_x: 0.0,
        bottom: 0.0,
        top: 48.0,
    };
    // Standing at the foot.
    assert!(can_grab(&bounds_at(Vec2::new(2.0, 8.0)), &ladder, Vertical::Up, &tuning));
    assert!(!can_grab(&bounds_at(Vec2::new(2.0, 8.0)), &ladder, Vertical::Down, &tuning));
    // Standing on the top ledge.
    assert!(!can_grab(&bounds_at(Vec2::new(0.0, 55.0)), &ladder, Vertical::Up, &tuning));
    assert!(can_grab(&bounds_at(Vec2::new(0.0, 56.0)), &ladder, Vertical::Down, &tuning));
    // Too far to the side.
    assert!(!can_grab(&bounds_at(Vec2::new(10.0, 8.0)), &ladder, Vertical::Up, &tuning));
}

#[test]
fn test_choose_nearest_ladder() {
    let mut world = World::new();
    let near = ladder_span(&mut world);
    let mut far = ladder_span(&mut world);
    far.ladder.center_x = 8.0;
    let chosen = choose_ladder(
        &[far, near],
        &bounds_at(Vec2::new(3.0, 8.0)),
        Vertical::Up,
        &LadderTuning::default(),
    );
    assert_eq!(chosen.map(|span| span.entity), Some(near.entity));
}

#[test]
fn test_grab_snaps_to_ladder_and_climbs() {
    let mut world = World::new();
    let span = ladder_span(&mut world);
    let surroundings = Surroundings {
        bounds: bounds_at(Vec2::new(3.0, 8.0)),
        ladders: vec![span],
        ..grounded()
    };
    let mut state = new_state();
    let mut body = body(Vec2::new(3.0, 8.0), Vec2::new(20.0, 0.0));
    let events = pre_update(&press(&[Action::Up]), &surroundings, &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::StartedClimbing));
    assert_eq!(state.climbing, Some(span.entity));
    assert_eq!(body.position.x, 0.0);
    assert_eq!(body.velocity, Vec2::new(0.0, 60.0));
}

#[test]
fn test_climbing_ignores_gravity() {
    let tuning = MovementTuning::default();
    let ladders = LadderTuning::default();
    let controls = idle();
    let surroundings = airborne();
    let mut world = World::new();
    let mut state = new_state();
    state.climbing = Some(world.spawn_empty().id());
    let mut body = body(Vec2::ZERO, Vec2::new(0.0, 60.0));
    Locomotion {
        tuning: &tuning,
        ladders: &ladders,
        controls: &controls,
        surroundings: &surroundings,
    }
    .integrate(&mut state, &mut body, DT);
    assert_eq!(body.velocity.y, 60.0);
}

fn climbing_mid_ladder(world: &mut World) -> (MovementState, Surroundings) {
    let span = ladder_span(world);
    let mut state = new_state();
    state.climbing = Some(span.entity);
    let surroundings = Surroundings {
        bounds: bounds_at(Vec2::new(0.0, 20.0)),
        ladders: vec![span],
        ..default()
    };
    (state, surroundings)
}

#[test]
fn test_jump_off_ladder() {
    let mut world = World::new();
    let (mut state, surroundings) = climbing_mid_ladder(&mut world);
    let mut body = body(Vec2::new(0.0, 20.0), Vec2::ZERO);
    let events = pre_update(&press(&[Action::Jump]), &surroundings, &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::StoppedClimbing));
    assert!(events.contains(&LocomotionEvent::Jumped));
    assert!(!state.is_climbing());
    assert_eq!(body.velocity.y, 290.0);
}

#[test]
fn test_down_and_jump_drops_off_ladder() {
    let mut world = World::new();
    let (mut state, surroundings) = climbing_mid_ladder(&mut world);
    let mut body = body(Vec2::new(0.0, 20.0), Vec2::ZERO);
    let events = pre_update(
        &press(&[Action::Down, Action::Jump]),
        &surroundings,
        &mut state,
        &mut body,
        DT,
    );
    assert!(events.contains(&LocomotionEvent::StoppedClimbing));
    assert!(!events.contains(&LocomotionEvent::Jumped));
    assert!(body.velocity.y <= 0.0);
}

#[test]
fn test_reaching_ground_while_climbing_down_detaches() {
    let mut world = World::new();
    let (mut state, mut surroundings) = climbing_mid_ladder(&mut world);
    surroundings.bounds = bounds_at(Vec2::new(0.0, 8.0));
    surroundings.on_ground = true;
    let mut body = body(Vec2::new(0.0, 8.0), Vec2::new(0.0, -60.0));
    let events = pre_update(&press(&[Action::Down]), &surroundings, &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::StoppedClimbing));
    assert!(!state.is_climbing());
}

#[test]
fn test_ladder_out_of_reach_lets_go() {
    let mut world = World::new();
    let (mut state, mut surroundings) = climbing_mid_ladder(&mut world);
    surroundings.ladders.clear();
    let mut body = body(Vec2::new(0.0, 20.0), Vec2::ZERO);
    let events = pre_update(&idle(), &surroundings, &mut state, &mut body, DT);
    assert!(events.contains(&LocomotionEvent::StoppedClimbing));
}

// -----------------------------------------------------------------------------
// Sensing helper tests
// -----------------------------------------------------------------------------

#[test]
fn test_wall_contact_from_side() {
    assert_eq!(wall_contact(Some(Side::Left)), WallContact::Left);
    assert_eq!(wall_contact(Some(Side::Right)), WallContact::Right);
    assert_eq!(wall_contact(Some(Side::Bottom)), WallContact::None);
    assert_eq!(wall_contact(None), WallContact::None);
}

#[test]
fn test_one_way_ground_needs_feet_on_top() {
    let platform = Bounds::new(Vec2::new(0.0, 8.0), Vec2::new(32.0, 16.0));
    assert!(stands_on(16.0, &platform, 1.0));
    assert!(stands_on(15.2, &platform, 1.0));
    assert!(!stands_on(12.0, &platform, 1.0));
}

/// Player standing with its feet at y = 0.
fn feet_at_origin() -> Bounds {
    bounds_at(Vec2::new(0.0, 8.0))
}

fn ground_under(
    world: &FakeWorld,
    player: Entity,
    touching: &Touching,
    climbing: bool,
    intangible: Option<Entity>,
    one_way: Option<(Entity, Bounds)>,
) -> Vec<Entity> {
    let filter = RayFilter::new(&[GameLayer::Ground]).excluding(player);
    ground_contacts(
        world,
        &feet_at_origin(),
        touching,
        &filter,
        MovementTuning::default().ground_probe,
        climbing,
        |e| Some(e) == intangible,
        |e| one_way.and_then(|(platform, bounds)| (platform == e).then_some(bounds)),
    )
}

#[test]
fn test_solid_floor_under_feet_is_ground() {
    let mut world = World::new();
    let (player, floor) = (world.spawn_empty().id(), world.spawn_empty().id());
    let fake = FakeWorld::new().with_box(
        floor,
        Vec2::new(-20.0, -16.0),
        Vec2::new(20.0, 0.0),
        GameLayer::Ground,
    );
    let ground = ground_under(&fake, player, &Touching::default(), false, None, None);
    assert_eq!(ground, vec![floor]);
}

#[test]
fn test_nothing_below_is_not_ground() {
    let mut world = World::new();
    let (player, floor) = (world.spawn_empty().id(), world.spawn_empty().id());
    let fake = FakeWorld::new().with_box(
        floor,
        Vec2::new(-20.0, -40.0),
        Vec2::new(20.0, -24.0),
        GameLayer::Ground,
    );
    assert!(ground_under(&fake, player, &Touching::default(), false, None, None).is_empty());
    assert!(
        ground_under(&FakeWorld::new(), player, &Touching::default(), false, None, None)
            .is_empty()
    );
}

#[test]
fn test_one_way_counts_only_with_feet_on_top() {
    let mut world = World::new();
    let (player, platform) = (world.spawn_empty().id(), world.spawn_empty().id());

    let below_feet = Bounds::new(Vec2::new(-20.0, -8.0), Vec2::new(20.0, 0.0));
    let fake =
        FakeWorld::new().with_box(platform, below_feet.min, below_feet.max, GameLayer::Ground);
    let touching = Touching::default();
    let ground = ground_under(&fake, player, &touching, false, None, Some((platform, below_feet)));
    assert_eq!(ground, vec![platform]);

    // Passing up through it: the feet are inside, well under its top.
    let around_feet = Bounds::new(Vec2::new(-20.0, -2.0), Vec2::new(20.0, 6.0));
    let fake =
        FakeWorld::new().with_box(platform, around_feet.min, around_feet.max, GameLayer::Ground);
    let ground = ground_under(&fake, player, &touching, false, None, Some((platform, around_feet)));
    assert!(ground.is_empty());
}

#[test]
fn test_climbing_ignores_one_way_ground() {
    let mut world = World::new();
    let (player, ledge) = (world.spawn_empty().id(), world.spawn_empty().id());
    let top = Bounds::new(Vec2::new(-8.0, -16.0), Vec2::new(8.0, 0.0));
    let fake = FakeWorld::new().with_box(ledge, top.min, top.max, GameLayer::Ground);

    let mut touching = Touching::default();
    touching.insert(ledge, Side::Bottom);
    assert!(ground_under(&fake, player, &touching, true, None, Some((ledge, top))).is_empty());
}

#[test]
fn test_enemy_underfoot_is_not_ground() {
    let mut world = World::new();
    let (player, enemy) = (world.spawn_empty().id(), world.spawn_empty().id());
    let fake = FakeWorld::new().with_box(
        enemy,
        Vec2::new(-6.0, -12.0),
        Vec2::new(6.0, 0.0),
        GameLayer::Ground,
    );
    let ground = ground_under(&fake, player, &Touching::default(), false, Some(enemy), None);
    assert!(ground.is_empty());
}

#[test]
fn test_bottom_contact_without_probe_hit_is_ground() {
    let mut world = World::new();
    let (player, crate_top) = (world.spawn_empty().id(), world.spawn_empty().id());
    let mut touching = Touching::default();
    touching.insert(crate_top, Side::Bottom);
    let ground = ground_under(&FakeWorld::new(), player, &touching, false, None, None);
    assert_eq!(ground, vec![crate_top]);
}
