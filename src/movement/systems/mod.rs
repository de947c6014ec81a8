//! Movement domain: system modules for locomotion updates.

pub(crate) mod sensing;
pub(crate) mod steering;

pub(crate) use sensing::sense_surroundings;
pub(crate) use steering::{
    bounce_off_stomps, detect_landings, integrate_player, settle_player, steer_player,
};
