//! Physics domain: gameplay glue around the rigid-body solver.
//!
//! Contact bookkeeping (`Touching`), corner probes, carriers, one-way
//! platforms, slopes, and the contact hook that ties them together.

mod carrier;
mod geometry;
mod hooks;
mod layers;
mod one_way;
mod raycast;
mod slopes;
mod touching;

#[cfg(test)]
pub(crate) mod fake_world;
#[cfg(test)]
mod tests;

pub use carrier::{Carriable, Carried, Carrier, SettleNudge, to_local, to_world};
pub use geometry::{Bounds, Side};
pub use hooks::PlatformerHooks;
pub use layers::GameLayer;
pub use one_way::{OneWayPlatform, PassThroughOneWay, PreviousPosition, allows_contact};
pub use raycast::{
    CORNER_INSET, RayCaster, RayFilter, RayHit, is_inclined, raycast_corners, raycast_side,
    side_ray_origins, slope_below, wall_side,
};
pub use slopes::{SlopeAdjustment, SlopeState, SlopeSurface, Slopes};
pub use touching::{Touching, contact_side};

pub(crate) use carrier::carry_passengers;
pub(crate) use touching::{refresh_touching_sides, track_touching};

use bevy::prelude::*;

use crate::core::{StepSet, playing};
use crate::physics::carrier::{board_carriers, leave_carriers, release_orphans, settle_new_carriers};
use crate::physics::one_way::capture_previous_positions;
use crate::physics::touching::prune_touching;

pub struct PlatformPhysicsPlugin;

impl Plugin for PlatformPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedFirst, capture_previous_positions.run_if(playing))
            .add_systems(
                FixedUpdate,
                (prune_touching, refresh_touching_sides)
                    .chain()
                    .in_set(StepSet::Sense),
            )
            .add_systems(FixedUpdate, carry_passengers.in_set(StepSet::Intent))
            .add_systems(
                FixedLast,
                (track_touching, board_carriers, leave_carriers, release_orphans)
                    .chain()
                    .in_set(StepSet::Contacts),
            )
            .add_systems(FixedLast, settle_new_carriers.in_set(StepSet::Settle));
    }
}
