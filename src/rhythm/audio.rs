//! Song playback through bevy_kira_audio, and the audio clock it provides.

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioInstance, AudioSource};

use super::conductor::DspClock;
use super::plugin::advance_conductor;
use crate::core::{
    load_rhythm_config, AttackFinished, AttackOutcome, GameState, PlayState, RhythmConfig,
    RhythmSet,
};

/// The loaded song.
#[derive(Resource)]
pub struct SongAsset(pub Handle<AudioSource>);

/// The song instance currently playing.
#[derive(Resource)]
pub struct SongInstance(pub Handle<AudioInstance>);

/// Audio plugin - plays the song and turns its playback position into the
/// clock the conductor reads.
pub struct RhythmAudioPlugin;

impl Plugin for RhythmAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_song.after(load_rhythm_config))
            .add_systems(Update, wait_for_song.run_if(in_state(GameState::Loading)))
            .add_systems(OnEnter(GameState::InGame), start_song)
            .add_systems(OnEnter(PlayState::Paused), pause_song)
            .add_systems(OnExit(PlayState::Paused), resume_song)
            .add_systems(OnEnter(GameState::GameOver), stop_song)
            .add_systems(
                Update,
                sync_dsp_clock
                    .in_set(RhythmSet::Clock)
                    .before(advance_conductor),
            )
            .add_systems(Update, play_outcome_cues.in_set(RhythmSet::Feedback));
    }
}

fn load_song(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<RhythmConfig>) {
    let handle = asset_server.load(config.audio.song.clone());
    commands.insert_resource(SongAsset(handle));
}

/// Leave `Loading` once the song is ready, or once it is known to be missing.
fn wait_for_song(
    asset_server: Res<AssetServer>,
    song: Option<Res<SongAsset>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Some(song) = song else {
        return;
    };

    if asset_server.is_loaded_with_dependencies(&song.0) {
        info!("Song loaded, starting session");
        next_state.set(GameState::InGame);
    } else if let Some(LoadState::Failed(e)) = asset_server.get_load_state(&song.0) {
        warn!("Song failed to load ({}), beats will follow game time", e);
        next_state.set(GameState::InGame);
    }
}

fn start_song(
    mut commands: Commands,
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    song: Option<Res<SongAsset>>,
    mut clock: ResMut<DspClock>,
) {
    clock.seconds = 0.0;

    let Some(song) = song else {
        return;
    };
    // A song that failed to load never gets an instance; follow virtual time
    if !asset_server.is_loaded_with_dependencies(&song.0) {
        return;
    }

    let instance = audio.play(song.0.clone()).handle();
    commands.insert_resource(SongInstance(instance));
}

fn pause_song(audio: Res<Audio>) {
    audio.pause();
}

fn resume_song(audio: Res<Audio>) {
    audio.resume();
}

fn stop_song(mut commands: Commands, audio: Res<Audio>) {
    audio.stop();
    commands.remove_resource::<SongInstance>();
}

/// Where the audio clock takes its time from this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ClockSource {
    /// No song is playing.
    VirtualTime,
    /// The song was started but kira has not created its instance yet.
    Pending,
    /// Playback position of the song, if it reports one.
    Song(Option<f64>),
}

fn next_clock_seconds(current: f64, source: ClockSource, delta: f64) -> f64 {
    match source {
        ClockSource::VirtualTime => current + delta,
        ClockSource::Pending | ClockSource::Song(None) => current,
        // Never let the clock run backwards.
        ClockSource::Song(Some(position)) => current.max(position),
    }
}

/// Copy the playback position into the audio clock.
///
/// Without a song the clock follows virtual time instead. A song that is
/// still starting, queued or finished reports no position, which freezes
/// the clock.
fn sync_dsp_clock(
    time: Res<Time>,
    song: Option<Res<SongInstance>>,
    instances: Res<Assets<AudioInstance>>,
    mut clock: ResMut<DspClock>,
) {
    let source = match song {
        None => ClockSource::VirtualTime,
        Some(song) => match instances.get(&song.0) {
            None => ClockSource::Pending,
            Some(instance) => ClockSource::Song(instance.state().position()),
        },
    };

    clock.seconds = next_clock_seconds(clock.seconds, source, time.delta_secs_f64());
}

/// Play a one-shot cue for each attack outcome.
fn play_outcome_cues(
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    config: Res<RhythmConfig>,
    mut finished: EventReader<AttackFinished>,
) {
    for event in finished.read() {
        let path = match event.outcome {
            AttackOutcome::Normal => &config.audio.hit_sfx,
            AttackOutcome::Failed => &config.audio.miss_sfx,
            AttackOutcome::Launched => &config.audio.launch_sfx,
        };
        audio.play(asset_server.load(path.clone()));
    }
}
