//! Core domain: game flow, step scheduling, session state, camera and audio.

mod audio;
mod camera;
mod events;
mod resources;
mod state;
mod timers;


pub use audio::{MusicDirector, PlaySongEvent, Sfx, SoundCue};
pub use camera::GameCamera;
pub use events::{CoinsChangedEvent, RestartLevelEvent};
pub use resources::{GameSession, LevelBounds, LevelScoped, Viewport};
pub use state::GameState;
pub use timers::StepTimer;

use bevy::prelude::*;

use crate::core::audio::{play_songs, play_sound_cues};
use crate::core::camera::{follow_player, spawn_camera};

/// Ordering of gameplay work inside one fixed step.
///
/// `Sense`, `Intent` and `Integrate` run in `FixedUpdate` before the physics
/// solver; `Contacts` and `Settle` run in `FixedLast` after it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepSet {
    /// Touching refresh, ground/wall/ladder/slope sensing.
    Sense,
    /// Input-driven velocity changes, AI, moving platforms and carriers.
    Intent,
    /// Gravity selection, acceleration integration, slope reprojection.
    Integrate,
    /// Touching bookkeeping and contact resolutions from the solver.
    Contacts,
    /// Deceleration, timers, animation selection, spawners.
    Settle,
}

/// Run condition: gameplay systems only simulate while a level is live.
pub fn playing(state: Res<State<GameState>>) -> bool {
    *state.get() == GameState::Playing
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<GameSession>()
            .init_resource::<Viewport>()
            .init_resource::<LevelBounds>()
            .init_resource::<MusicDirector>()
            .add_message::<SoundCue>()
            .add_message::<PlaySongEvent>()
            .add_message::<CoinsChangedEvent>()
            .add_message::<RestartLevelEvent>()
            .configure_sets(
                FixedUpdate,
                (StepSet::Sense, StepSet::Intent, StepSet::Integrate)
                    .chain()
                    .run_if(playing),
            )
            .configure_sets(
                FixedLast,
                (StepSet::Contacts, StepSet::Settle)
                    .chain()
                    .run_if(playing),
            )
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (play_sound_cues, play_songs, follow_player));
    }
}
