//! Zombie spawning and wave progression.

use bevy::prelude::*;
use rand::seq::SliceRandom;

use super::state::WaveState;
use crate::core::{RhythmConfig, SpawnRequest, WaveEvent, WaveTuning, ZombieLaunched};
use crate::rhythm::Conductor;
use crate::zombie::zombie_bundle;

/// Start the next wave: announce it and ask for its zombies.
fn start_next_wave(
    waves: &mut WaveState,
    tuning: &WaveTuning,
    requests: &mut EventWriter<SpawnRequest>,
    events: &mut EventWriter<WaveEvent>,
) {
    let wave = waves.advance();
    let enemies = WaveState::size_of(wave, tuning);

    info!("Wave {} starting with {} zombies", wave, enemies);
    events.send(WaveEvent::Started { wave, enemies });
    requests.send(SpawnRequest { count: enemies });
}

/// Reset wave tracking for a new session and kick off wave 1.
pub fn begin_waves(
    config: Res<RhythmConfig>,
    mut waves: ResMut<WaveState>,
    mut requests: EventWriter<SpawnRequest>,
    mut events: EventWriter<WaveEvent>,
) {
    *waves = WaveState::default();

    if config.waves.auto_start {
        start_next_wave(&mut waves, &config.waves, &mut requests, &mut events);
    }
}

/// Spawn zombies for every request, each at a random spawn point.
///
/// New zombies take the current beat as their spawn beat.
pub fn spawn_requested(
    mut commands: Commands,
    mut requests: EventReader<SpawnRequest>,
    config: Res<RhythmConfig>,
    conductor: Res<Conductor>,
    mut waves: ResMut<WaveState>,
) {
    let mut rng = rand::thread_rng();
    let spawn_beat = conductor.completed_beats();

    for request in requests.read() {
        for _ in 0..request.count {
            let point = match config.waves.spawn_points.choose(&mut rng) {
                Some(&(x, y)) => Vec2::new(x, y),
                None => {
                    warn!("No spawn points configured, spawning at the origin");
                    Vec2::ZERO
                }
            };
            commands.spawn(zombie_bundle(point, spawn_beat, &config.zombie));
        }

        waves.spawned(request.count);
        debug!(
            "Spawned {} zombies on beat {} ({} remaining)",
            request.count, spawn_beat, waves.remaining
        );
    }
}

/// Count launched zombies out of the wave and start the next one when clear.
pub fn track_launches(
    mut launched: EventReader<ZombieLaunched>,
    config: Res<RhythmConfig>,
    mut waves: ResMut<WaveState>,
    mut requests: EventWriter<SpawnRequest>,
    mut events: EventWriter<WaveEvent>,
) {
    for _ in launched.read() {
        if waves.zombie_removed() {
            info!("Wave {} cleared", waves.wave);
            events.send(WaveEvent::Cleared { wave: waves.wave });
            start_next_wave(&mut waves, &config.waves, &mut requests, &mut events);
        }
    }
}
