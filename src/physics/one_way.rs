//! One-way platforms: solid from above, passable from below and the sides.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::physics::geometry::Side;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct OneWayPlatform;

/// Bodies with this marker fall through every one-way platform.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PassThroughOneWay;

/// Position at the start of the current fixed step.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PreviousPosition(pub Vec2);

/// Whether a platform should keep its contact with another body.
///
/// `side` is the side of the platform the other body is on. The body must be
/// on top, and its bottom before this step's movement must not be more than
/// `tolerance` below the platform top.
pub fn allows_contact(
    side: Option<Side>,
    other_bottom: f32,
    other_step_delta_y: f32,
    platform_top: f32,
    tolerance: f32,
) -> bool {
    side == Some(Side::Top) && other_bottom - other_step_delta_y >= platform_top - tolerance
}

pub(crate) fn capture_previous_positions(mut bodies: Query<(&Position, &mut PreviousPosition)>) {
    for (position, mut previous) in &mut bodies {
        previous.0 = position.0;
    }
}
