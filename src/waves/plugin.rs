//! Wave plugin - spawning and wave progression.

use bevy::prelude::*;

use super::spawning;
use super::state::WaveState;
use crate::core::{GameState, RhythmSet};

pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WaveState>()
            .add_systems(OnEnter(GameState::InGame), spawning::begin_waves)
            .add_systems(
                Update,
                (spawning::track_launches, spawning::spawn_requested)
                    .chain()
                    .in_set(RhythmSet::Lifecycle),
            );
    }
}
