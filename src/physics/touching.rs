//! Per-body record of what it is touching and on which side.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::physics::geometry::{Bounds, Side};

/// Current contacts of a body, bucketed by side. Each entity lives in at most
/// one side bucket. Sensor contacts go to the passive list instead.
#[derive(Component, Debug, Default, Clone)]
pub struct Touching {
    contacts: Vec<(Entity, Side)>,
    passive: Vec<Entity>,
}

impl Touching {
    /// Record or move `other` to `side`.
    pub fn insert(&mut self, other: Entity, side: Side) {
        match self.contacts.iter_mut().find(|(e, _)| *e == other) {
            Some(entry) => entry.1 = side,
            None => self.contacts.push((other, side)),
        }
    }

    pub fn insert_passive(&mut self, other: Entity) {
        if !self.passive.contains(&other) {
            self.passive.push(other);
        }
    }

    /// Forget `other` everywhere.
    pub fn remove(&mut self, other: Entity) {
        self.contacts.retain(|(e, _)| *e != other);
        self.passive.retain(|e| *e != other);
    }

    pub fn on(&self, side: Side) -> impl Iterator<Item = Entity> + '_ {
        self.contacts
            .iter()
            .filter(move |(_, s)| *s == side)
            .map(|(e, _)| *e)
    }

    pub fn any_on(&self, side: Side) -> bool {
        self.on(side).next().is_some()
    }

    pub fn side_of(&self, other: Entity) -> Option<Side> {
        self.contacts
            .iter()
            .find(|(e, _)| *e == other)
            .map(|(_, side)| *side)
    }

    pub fn contacts(&self) -> &[(Entity, Side)] {
        &self.contacts
    }

    pub fn passive(&self) -> &[Entity] {
        &self.passive
    }

    pub fn is_touching(&self, other: Entity) -> bool {
        self.side_of(other).is_some() || self.passive.contains(&other)
    }

    pub fn clear(&mut self) {
        self.contacts.clear();
        self.passive.clear();
    }
}

/// Side of `me` that `other` is on, taken from the pair's contact normal when
/// the solver has one and from the bounds otherwise.
pub fn contact_side(
    collisions: &Collisions,
    me: Entity,
    other: Entity,
    my_bounds: Option<Bounds>,
    other_bounds: Option<Bounds>,
) -> Option<Side> {
    let from_normal = collisions.get(me, other).and_then(|pair| {
        let manifold = pair.manifolds.first()?;
        let normal = if pair.collider1 == me {
            manifold.normal
        } else {
            -manifold.normal
        };
        Side::from_normal(normal)
    });
    from_normal.or_else(|| Some(my_bounds?.side_of(&other_bounds?)))
}

pub(crate) fn body_bounds(shapes: &Query<(&Position, &Collider)>, entity: Entity) -> Option<Bounds> {
    shapes
        .get(entity)
        .ok()
        .map(|(position, collider)| Bounds::of_body(position.0, collider))
}

pub(crate) fn track_touching(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    collisions: Collisions,
    sensors: Query<(), With<Sensor>>,
    shapes: Query<(&Position, &Collider)>,
    mut touching: Query<&mut Touching>,
) {
    for event in started.read() {
        for (me, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            let Ok(mut record) = touching.get_mut(me) else {
                continue;
            };
            if sensors.contains(other) {
                record.insert_passive(other);
                continue;
            }
            let bounds = |e| body_bounds(&shapes, e);
            if let Some(side) = contact_side(&collisions, me, other, bounds(me), bounds(other)) {
                record.insert(other, side);
            }
        }
    }

    for event in ended.read() {
        for (me, other) in [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ] {
            if let Ok(mut record) = touching.get_mut(me) {
                record.remove(other);
            }
        }
    }
}

/// Contacts that persist can slide from one side to another (walking off the
/// top of a block onto its face), so re-derive every side each step.
pub(crate) fn refresh_touching_sides(
    collisions: Collisions,
    shapes: Query<(&Position, &Collider)>,
    mut touching: Query<(Entity, &mut Touching)>,
) {
    for (me, mut record) in &mut touching {
        let updates: Vec<(Entity, Side)> = record
            .contacts()
            .iter()
            .filter_map(|(other, side)| {
                let bounds = |e| body_bounds(&shapes, e);
                let current = contact_side(&collisions, me, *other, bounds(me), bounds(*other))?;
                (current != *side).then_some((*other, current))
            })
            .collect();
        for (other, side) in updates {
            record.insert(other, side);
        }
    }
}

/// Drop records of despawned entities.
pub(crate) fn prune_touching(entities: Query<()>, mut touching: Query<&mut Touching>) {
    for mut record in &mut touching {
        let stale: Vec<Entity> = record
            .contacts()
            .iter()
            .map(|(e, _)| *e)
            .chain(record.passive().iter().copied())
            .filter(|e| !entities.contains(*e))
            .collect();
        for entity in stale {
            record.remove(entity);
        }
    }
}
