//! Session signals for listeners outside the ECS.

use bevy::prelude::*;

use super::events::{AttackFinished, BeatCrossed, HealthChanged, WaveEvent};
use super::observer::EventBus;

/// Buses mirroring the gameplay events of each frame.
///
/// Published from `RhythmSet::Feedback`, after every gameplay system has run,
/// so a listener always sees the settled state of the frame.
#[derive(Resource, Default)]
pub struct Signals {
    pub beats: EventBus<BeatCrossed>,
    pub health: EventBus<HealthChanged>,
    pub attacks: EventBus<AttackFinished>,
    pub waves: EventBus<WaveEvent>,
}

/// Copy this frame's events onto the signal buses.
pub fn forward_signals(
    mut signals: ResMut<Signals>,
    mut beats: EventReader<BeatCrossed>,
    mut health: EventReader<HealthChanged>,
    mut attacks: EventReader<AttackFinished>,
    mut waves: EventReader<WaveEvent>,
) {
    for event in beats.read() {
        signals.beats.publish(event);
    }
    for event in health.read() {
        signals.health.publish(event);
    }
    for event in attacks.read() {
        signals.attacks.publish(event);
    }
    for event in waves.read() {
        signals.waves.publish(event);
    }
}
