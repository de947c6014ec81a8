//! Carriers: moving bodies that drag whatever stands on them along.
//!
//! A passenger keeps its own world position; each step it is shifted by
//! however far its carrier moved since the last carry. Attaching and
//! detaching therefore never teleports anything.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::physics::geometry::Side;
use crate::physics::touching::{body_bounds, contact_side};

#[derive(Component, Debug, Default, Clone)]
pub struct Carrier {
    passengers: Vec<Entity>,
    /// Carrier position when passenger offsets were last valid.
    anchor: Option<Vec2>,
}

impl Carrier {
    pub fn passengers(&self) -> &[Entity] {
        &self.passengers
    }

    pub fn carries(&self, entity: Entity) -> bool {
        self.passengers.contains(&entity)
    }

    /// Returns false if `passenger` was already aboard.
    pub fn board(&mut self, passenger: Entity) -> bool {
        if self.carries(passenger) {
            return false;
        }
        self.passengers.push(passenger);
        true
    }

    pub fn disembark(&mut self, passenger: Entity) -> bool {
        let before = self.passengers.len();
        self.passengers.retain(|e| *e != passenger);
        before != self.passengers.len()
    }

    /// Offset every passenger should move by now that the carrier sits at
    /// `position`. Re-anchors at `position`.
    pub fn advance(&mut self, position: Vec2) -> Vec2 {
        let delta = self.anchor.map_or(Vec2::ZERO, |anchor| position - anchor);
        self.anchor = Some(position);
        delta
    }
}

/// Opt-out switch for being carried.
#[derive(Component, Debug, Clone, Copy)]
pub struct Carriable {
    pub can_be_carried: bool,
}

impl Default for Carriable {
    fn default() -> Self {
        Self {
            can_be_carried: true,
        }
    }
}

/// Present on a body while a carrier holds it. Relative position in the
/// carrier's frame is `world - carrier`.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Carried {
    pub by: Entity,
}

pub fn to_local(carrier: Vec2, world: Vec2) -> Vec2 {
    world - carrier
}

pub fn to_world(carrier: Vec2, local: Vec2) -> Vec2 {
    carrier + local
}

/// Newly spawned carriers rise one unit for a step and settle back, so
/// bodies already resting on them produce a contact.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SettleNudge {
    raised: bool,
}

pub(crate) fn board_carriers(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    collisions: Collisions,
    shapes: Query<(&Position, &Collider)>,
    carriable: Query<(&Carriable, Option<&Carried>)>,
    mut carriers: Query<&mut Carrier>,
) {
    for event in started.read() {
        for (carrier_entity, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if !carriers.contains(carrier_entity) {
                continue;
            }
            let Ok((carriable, carried)) = carriable.get(other) else {
                continue;
            };
            if !carriable.can_be_carried {
                continue;
            }
            let bounds = |e| body_bounds(&shapes, e);
            let side = contact_side(
                &collisions,
                carrier_entity,
                other,
                bounds(carrier_entity),
                bounds(other),
            );
            if side != Some(Side::Top) {
                continue;
            }
            match carried {
                Some(carried) if carried.by == carrier_entity => continue,
                Some(carried) => {
                    if let Ok(mut previous) = carriers.get_mut(carried.by) {
                        previous.disembark(other);
                    }
                }
                None => {}
            }
            let Ok(mut carrier) = carriers.get_mut(carrier_entity) else {
                continue;
            };
            if carrier.board(other) {
                commands.entity(other).insert(Carried { by: carrier_entity });
                debug!("{:?} boarded carrier {:?}", other, carrier_entity);
            }
        }
    }
}

pub(crate) fn leave_carriers(
    mut commands: Commands,
    mut ended: MessageReader<CollisionEnd>,
    mut carriers: Query<&mut Carrier>,
    carried: Query<&Carried>,
) {
    for event in ended.read() {
        for (carrier_entity, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok(mut carrier) = carriers.get_mut(carrier_entity) else {
                continue;
            };
            if carrier.disembark(other) {
                if carried.get(other).is_ok_and(|c| c.by == carrier_entity) {
                    commands.entity(other).remove::<Carried>();
                }
                debug!("{:?} left carrier {:?}", other, carrier_entity);
            }
        }
    }
}

/// Shift passengers by their carrier's motion since the previous step.
pub(crate) fn carry_passengers(
    mut carriers: Query<(&mut Carrier, &Position)>,
    mut passengers: Query<&mut Position, (With<Carried>, Without<Carrier>)>,
) {
    for (mut carrier, position) in &mut carriers {
        let delta = carrier.advance(position.0);
        if delta == Vec2::ZERO {
            continue;
        }
        for passenger in carrier.passengers() {
            if let Ok(mut passenger_position) = passengers.get_mut(*passenger) {
                let local = to_local(position.0 - delta, passenger_position.0);
                passenger_position.0 = to_world(position.0, local);
            }
        }
    }
}

/// Passengers whose carrier vanished are released.
pub(crate) fn release_orphans(
    mut commands: Commands,
    carried: Query<(Entity, &Carried)>,
    carriers: Query<(), With<Carrier>>,
) {
    for (entity, carried) in &carried {
        if !carriers.contains(carried.by) {
            commands.entity(entity).remove::<Carried>();
        }
    }
}

pub(crate) fn settle_new_carriers(
    mut commands: Commands,
    mut carriers: Query<(Entity, &mut Position, &mut SettleNudge)>,
) {
    for (entity, mut position, mut nudge) in &mut carriers {
        if nudge.raised {
            position.0.y -= 1.0;
            commands.entity(entity).remove::<SettleNudge>();
        } else {
            position.0.y += 1.0;
            nudge.raised = true;
        }
    }
}
