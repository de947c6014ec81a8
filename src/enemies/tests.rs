//! Tests for the enemies domain.

use bevy::prelude::*;

use super::*;
use crate::config::{CombatTuning, EnemyTuning, FlightPattern};

fn view() -> Rect {
    Rect::from_center_size(Vec2::ZERO, Vec2::new(320.0, 180.0))
}

// -----------------------------------------------------------------------------
// Patrol tests
// -----------------------------------------------------------------------------

#[test]
fn test_walker_turns_at_ledge_ahead() {
    // Heading right with only the left corner on ground.
    assert!(should_turn(1.0, true, false, false));
    assert!(!should_turn(-1.0, true, false, false));
    assert!(!should_turn(1.0, true, true, false));
}

#[test]
fn test_falling_walker_keeps_direction() {
    assert!(!should_turn(1.0, false, false, false));
    assert!(!should_turn(-1.0, false, false, false));
}

#[test]
fn test_walker_turns_at_wall() {
    assert!(should_turn(-1.0, true, true, true));
    assert!(should_turn(1.0, false, false, true));
}

#[test]
fn test_patrol_reverse() {
    let mut patrol = Patrol::new(20.0);
    assert_eq!(patrol.velocity_x(), -20.0);
    patrol.reverse();
    assert_eq!(patrol.velocity_x(), 20.0);
}

// -----------------------------------------------------------------------------
// Flyer tests
// -----------------------------------------------------------------------------

#[test]
fn test_bird_turns_at_path_ends() {
    let pattern = FlightPattern {
        speed: 20.0,
        distance: 60.0,
    };
    let mut flyer = Flyer::new(100.0, pattern);
    assert_eq!(flyer.velocity(100.0, 0.1, 0.0, 4.0).x, -20.0);
    assert_eq!(flyer.velocity(70.0, 0.1, 0.0, 4.0).x, -20.0);
    assert_eq!(flyer.velocity(40.0, 0.1, 0.0, 4.0).x, 20.0);
    assert_eq!(flyer.velocity(70.0, 0.1, 0.0, 4.0).x, 20.0);
    assert_eq!(flyer.velocity(100.0, 0.1, 0.0, 4.0).x, -20.0);
}

#[test]
fn test_bird_bob_is_bounded() {
    let mut flyer = Flyer::new(0.0, EnemyTuning::default().purple_bird);
    for _ in 0..120 {
        let velocity = flyer.velocity(-10.0, 1.0 / 60.0, 4.0, 4.0);
        assert!(velocity.y.abs() <= 16.0 + 1e-3);
    }
}

#[test]
fn test_feather_fall_descends() {
    let mut flyer = Flyer::new(0.0, EnemyTuning::default().orange_bird);
    for _ in 0..30 {
        let velocity = flyer.feather_velocity(1.0 / 60.0, 10.0);
        assert_eq!(velocity.y, -10.0);
        assert!(velocity.x.abs() <= 20.0);
    }
}

#[test]
fn test_enemy_kind_from_level_class() {
    assert_eq!(
        EnemyKind::parse("bug", None),
        Some(EnemyKind::Bug(WalkerVariant::Green))
    );
    assert_eq!(
        EnemyKind::parse("bug", Some("gray")),
        Some(EnemyKind::Bug(WalkerVariant::Gray))
    );
    assert_eq!(
        EnemyKind::parse("spider", Some("gray")),
        Some(EnemyKind::Spider(WalkerVariant::Gray))
    );
    assert_eq!(
        EnemyKind::parse("spider", Some("teal")),
        Some(EnemyKind::Spider(WalkerVariant::Green))
    );
    assert_eq!(
        EnemyKind::parse("bird", Some("orange")),
        Some(EnemyKind::Bird(BirdVariant::Orange))
    );
    assert_eq!(
        EnemyKind::parse("bird", None),
        Some(EnemyKind::Bird(BirdVariant::Purple))
    );
    assert_eq!(EnemyKind::parse("dragon", None), None);
}

#[test]
fn test_gray_walkers_patrol_faster() {
    let tuning = EnemyTuning::default();
    let combat = CombatTuning::default();
    let mut world = World::new();
    let green = world
        .spawn(walker_bundle(
            EnemyKind::Bug(WalkerVariant::Green),
            Vec2::ZERO,
            &tuning,
            &combat,
        ))
        .id();
    let gray = world
        .spawn(walker_bundle(
            EnemyKind::parse("spider", Some("gray")).unwrap(),
            Vec2::ZERO,
            &tuning,
            &combat,
        ))
        .id();

    let speed = |entity: Entity| world.get::<Patrol>(entity).unwrap().speed;
    assert_eq!(speed(green), tuning.green_walker_speed);
    assert_eq!(speed(gray), tuning.gray_walker_speed);
    assert!(speed(gray) > speed(green));
}

// -----------------------------------------------------------------------------
// Spawner tests
// -----------------------------------------------------------------------------

#[test]
fn test_spawner_spawns_once_in_view() {
    let mut world = World::new();
    let mut spawner = EnemySpawner::new(EnemyKind::Bug(WalkerVariant::Green), Vec2::new(50.0, 0.0));
    assert_eq!(spawner.update(view(), None), SpawnerAction::Spawn);
    let bug = world.spawn_empty().id();
    spawner.track(bug);

    assert_eq!(spawner.update(view(), Some(Vec2::new(40.0, 0.0))), SpawnerAction::Idle);
    assert_eq!(spawner.instance(), Some(bug));
}

#[test]
fn test_killed_instance_respawns_only_after_leaving_view() {
    let mut world = World::new();
    let mut spawner = EnemySpawner::new(EnemyKind::Spider(WalkerVariant::Gray), Vec2::new(50.0, 0.0));
    spawner.update(view(), None);
    spawner.track(world.spawn_empty().id());

    // Killed while the spawn point is still on screen.
    assert_eq!(spawner.update(view(), None), SpawnerAction::Idle);
    assert_eq!(spawner.instance(), None);
    assert!(!spawner.is_armed());

    let scrolled_away = Rect::from_center_size(Vec2::new(1000.0, 0.0), Vec2::new(320.0, 180.0));
    assert_eq!(spawner.update(scrolled_away, None), SpawnerAction::Idle);
    assert!(spawner.is_armed());
    assert_eq!(spawner.update(view(), None), SpawnerAction::Spawn);
}

#[test]
fn test_instance_leaving_view_is_despawned() {
    let mut world = World::new();
    let mut spawner = EnemySpawner::new(EnemyKind::Bug(WalkerVariant::Green), Vec2::new(50.0, 0.0));
    spawner.update(view(), None);
    let bug = world.spawn_empty().id();
    spawner.track(bug);

    let wandered = Some(Vec2::new(-500.0, 0.0));
    assert_eq!(spawner.update(view(), wandered), SpawnerAction::Despawn(bug));
    assert_eq!(spawner.instance(), None);
}
