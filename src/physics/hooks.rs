//! Contact modification run by the solver for every active pair.
//!
//! One hook serves every gameplay rule that needs to veto or reshape a
//! contact before it is solved: enemies ignoring each other, player/threat
//! judgement, one-way platforms and slope normals.

use avian2d::prelude::*;
use bevy::ecs::system::{SystemParam, lifetimeless::Read};
use bevy::prelude::*;

use crate::combat::{
    ContactResolution, ContactVerdict, Damage, Damageable, Enemy, Killable, QueueResolution,
    Stompable, ThreatProfile, judge_contact, keeps_contact,
};
use crate::config::{CombatTuning, PlatformTuning};
use crate::movement::Player;
use crate::physics::geometry::{Bounds, Side};
use crate::physics::one_way::{OneWayPlatform, PassThroughOneWay, PreviousPosition, allows_contact};
use crate::physics::raycast::is_inclined;
use crate::physics::slopes::{SlopeSurface, Slopes};

/// Speculative contacts further apart than this do not count as a hit.
const TOUCH_SLOP: f32 = 0.5;

#[derive(SystemParam)]
pub struct PlatformerHooks<'w, 's> {
    one_way: Query<'w, 's, (Read<Position>, Read<Collider>), With<OneWayPlatform>>,
    movers: Query<
        'w,
        's,
        (
            Read<Collider>,
            Read<Position>,
            Option<Read<PreviousPosition>>,
            Has<PassThroughOneWay>,
        ),
    >,
    enemies: Query<'w, 's, (), With<Enemy>>,
    slope_walkers: Query<'w, 's, (), With<Slopes>>,
    slope_surfaces: Query<'w, 's, (), With<SlopeSurface>>,
    victims: Query<
        'w,
        's,
        (Read<Collider>, Read<Position>, Read<PreviousPosition>),
        (With<Player>, With<Damageable>),
    >,
    threats: Query<
        'w,
        's,
        (
            Read<Collider>,
            Read<Position>,
            Option<Read<Damage>>,
            Option<Read<Killable>>,
            Has<Stompable>,
            Has<Enemy>,
        ),
    >,
    platforms: Res<'w, PlatformTuning>,
    combat: Res<'w, CombatTuning>,
}

impl CollisionHooks for PlatformerHooks<'_, '_> {
    fn modify_contacts(&self, contacts: &mut ContactPair, commands: &mut Commands) -> bool {
        let (first, second) = (contacts.collider1, contacts.collider2);

        if self.enemies.contains(first) && self.enemies.contains(second) {
            return false;
        }

        for (victim, threat) in [(first, second), (second, first)] {
            if let Some(keep) = self.judge_threat(victim, threat, contacts, commands) {
                return keep;
            }
        }

        for (platform, other) in [(first, second), (second, first)] {
            if let Ok((position, collider)) = self.one_way.get(platform) {
                let side = normal_from(contacts, platform).and_then(Side::from_normal);
                return self.one_way_keeps(Bounds::of_body(position.0, collider), other, side);
            }
        }

        if (self.slope_surfaces.contains(first) && self.slope_walkers.contains(second))
            || (self.slope_surfaces.contains(second) && self.slope_walkers.contains(first))
        {
            flatten_inclined_normals(contacts);
        }

        true
    }
}

impl PlatformerHooks<'_, '_> {
    /// `None` if the pair is not player-versus-threat.
    fn judge_threat(
        &self,
        victim: Entity,
        threat: Entity,
        contacts: &ContactPair,
        commands: &mut Commands,
    ) -> Option<bool> {
        let (victim_collider, position, previous) = self.victims.get(victim).ok()?;
        let (threat_collider, threat_position, damage, killable, stompable, enemy) =
            self.threats.get(threat).ok()?;
        if damage.is_none() && !stompable {
            return None;
        }

        let profile = ThreatProfile {
            bounds: Bounds::of_body(threat_position.0, threat_collider),
            damage: damage.copied(),
            stompable,
            dead: killable.is_some_and(Killable::is_dead),
            enemy,
        };
        if !is_touching(contacts) {
            return Some(keeps_contact(&profile));
        }

        let step_delta_y = position.0.y - previous.0.y;
        let resolution = match judge_contact(
            Bounds::of_body(position.0, victim_collider),
            step_delta_y,
            &profile,
            self.combat.stomp_tolerance,
        ) {
            ContactVerdict::Ignore => None,
            ContactVerdict::Stomp => Some(ContactResolution::Stomp {
                stomper: victim,
                target: threat,
            }),
            ContactVerdict::Hurt { amount, direction } => Some(ContactResolution::Hurt {
                victim,
                source: threat,
                amount,
                direction,
            }),
        };
        if let Some(resolution) = resolution {
            commands.queue(QueueResolution(resolution));
        }
        Some(keeps_contact(&profile))
    }

    fn one_way_keeps(&self, platform: Bounds, other: Entity, side: Option<Side>) -> bool {
        let Ok((collider, position, previous, passing_through)) = self.movers.get(other) else {
            return true;
        };
        if passing_through {
            return false;
        }
        let step_delta_y = previous.map_or(0.0, |previous| position.0.y - previous.0.y);
        allows_contact(
            side,
            Bounds::of_body(position.0, collider).bottom(),
            step_delta_y,
            platform.top(),
            self.platforms.one_way_tolerance,
        )
    }
}

/// First manifold normal, pointing away from `entity`.
fn normal_from(contacts: &ContactPair, entity: Entity) -> Option<Vec2> {
    let manifold = contacts.manifolds.first()?;
    Some(if contacts.collider1 == entity {
        manifold.normal
    } else {
        -manifold.normal
    })
}

fn is_touching(contacts: &ContactPair) -> bool {
    contacts.manifolds.iter().any(|manifold| {
        manifold
            .points
            .iter()
            .any(|point| point.penetration >= -TOUCH_SLOP)
    })
}

/// The slope system steers walkers along inclines itself; the solver only
/// needs to hold them up.
fn flatten_inclined_normals(contacts: &mut ContactPair) {
    for manifold in contacts.manifolds.iter_mut() {
        if is_inclined(manifold.normal) {
            manifold.normal = Vec2::new(0.0, manifold.normal.y.signum());
        }
    }
}
