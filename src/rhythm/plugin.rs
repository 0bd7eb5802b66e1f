//! Rhythm plugin - drives the conductor from the audio clock.

use bevy::prelude::*;

use super::conductor::{Conductor, DspClock};
use crate::core::{BeatCrossed, GameState, RhythmConfig, RhythmSet};

/// Rhythm plugin - owns the conductor and publishes beat crossings.
///
/// The audio clock itself is fed by [`RhythmAudioPlugin`](super::RhythmAudioPlugin)
/// in the game, or written directly by a test harness.
pub struct RhythmPlugin;

impl Plugin for RhythmPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Conductor>()
            .init_resource::<DspClock>()
            .add_systems(OnEnter(GameState::InGame), reset_conductor)
            .add_systems(Update, advance_conductor.in_set(RhythmSet::Clock));
    }
}

/// Build a fresh conductor from the tuning for a new session.
fn reset_conductor(config: Res<RhythmConfig>, mut conductor: ResMut<Conductor>) {
    *conductor = Conductor::from_config(&config.conductor);
}

/// Read the audio clock and announce beat crossings.
///
/// The first reading of a session becomes the song origin.
pub fn advance_conductor(
    clock: Res<DspClock>,
    mut conductor: ResMut<Conductor>,
    mut beats: EventWriter<BeatCrossed>,
) {
    if !conductor.is_started() {
        conductor.start(clock.seconds);
        debug!("Conductor started at clock {:.3}s", clock.seconds);
    }

    if let Some(crossed) = conductor.advance(clock.seconds) {
        debug!(
            "Beat {} (loop {}, {:.2}s into song)",
            crossed.beat,
            conductor.completed_loops(),
            conductor.song_position()
        );
        beats.send(crossed);
    }
}
