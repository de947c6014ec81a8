//! Core domain: sound-effect cues and the music director.

use bevy::audio::Volume;
use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::config::AudioTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sfx {
    Jump,
    Footstep,
    Stomp,
    Coin,
    Hurt,
    Bounce,
    Death,
}

impl Sfx {
    pub fn path(self) -> &'static str {
        match self {
            Sfx::Jump => "sfx/jump.ogg",
            Sfx::Footstep => "sfx/footstep.ogg",
            Sfx::Stomp => "sfx/stomp.ogg",
            Sfx::Coin => "sfx/coin.ogg",
            Sfx::Hurt => "sfx/hurt.ogg",
            Sfx::Bounce => "sfx/bounce.ogg",
            Sfx::Death => "sfx/death.ogg",
        }
    }
}

/// Request to play a sound effect. Unforced cues are dropped while the
/// same effect is still playing.
#[derive(Debug, Clone, Copy)]
pub struct SoundCue {
    pub sfx: Sfx,
    pub force: bool,
}

impl SoundCue {
    pub fn new(sfx: Sfx) -> Self {
        Self { sfx, force: false }
    }

    pub fn forced(sfx: Sfx) -> Self {
        Self { sfx, force: true }
    }
}

impl Message for SoundCue {}

/// Replace the current looping song.
#[derive(Debug, Clone)]
pub struct PlaySongEvent {
    pub path: String,
}

impl Message for PlaySongEvent {}

#[derive(Component, Debug)]
pub struct PlayingSfx(pub Sfx);

#[derive(Component, Debug)]
pub struct MusicTrack;

/// Tracks the single song that may be playing.
#[derive(Resource, Debug, Default)]
pub struct MusicDirector {
    current: Option<(String, Entity)>,
}

impl MusicDirector {
    pub fn current_song(&self) -> Option<&str> {
        self.current.as_ref().map(|(path, _)| path.as_str())
    }

    /// Record `entity` as the new song, returning the entity it replaces.
    pub fn replace(&mut self, path: impl Into<String>, entity: Entity) -> Option<Entity> {
        self.current
            .replace((path.into(), entity))
            .map(|(_, previous)| previous)
    }
}

pub fn should_play(cue: SoundCue, already_playing: bool) -> bool {
    cue.force || !already_playing
}

pub(crate) fn play_sound_cues(
    mut commands: Commands,
    mut cues: MessageReader<SoundCue>,
    asset_server: Res<AssetServer>,
    tuning: Res<AudioTuning>,
    playing: Query<&PlayingSfx>,
) {
    let mut started = Vec::new();
    for cue in cues.read() {
        let already_playing =
            started.contains(&cue.sfx) || playing.iter().any(|sfx| sfx.0 == cue.sfx);
        if !should_play(*cue, already_playing) {
            continue;
        }
        commands.spawn((
            AudioPlayer::new(asset_server.load(cue.sfx.path())),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(tuning.sfx_volume)),
            PlayingSfx(cue.sfx),
        ));
        started.push(cue.sfx);
    }
}

pub(crate) fn play_songs(
    mut commands: Commands,
    mut requests: MessageReader<PlaySongEvent>,
    mut director: ResMut<MusicDirector>,
    asset_server: Res<AssetServer>,
    tuning: Res<AudioTuning>,
) {
    for request in requests.read() {
        let entity = commands
            .spawn((
                AudioPlayer::new(asset_server.load(request.path.clone())),
                PlaybackSettings::LOOP.with_volume(Volume::Linear(tuning.music_volume)),
                MusicTrack,
            ))
            .id();
        if let Some(previous) = director.replace(request.path.clone(), entity) {
            commands.entity(previous).try_despawn();
        }
        info!("Playing song {}", request.path);
    }
}
