//! Core plugin that sets up game states, events, and system ordering.

use bevy::prelude::*;

use super::config::RhythmConfig;
use super::events::*;
use super::signals::{forward_signals, Signals};
use super::states::*;

/// Frame ordering for all gameplay systems.
///
/// The conductor runs in `Clock`, so every system in `Beat` and later sees
/// the beat index of the current frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RhythmSet {
    Input,
    Clock,
    Beat,
    Action,
    Resolve,
    Lifecycle,
    Feedback,
}

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver) and the pause sub-state
/// - Global events (BeatCrossed, AttackFinished, HealthChanged, etc.)
/// - The ordered `RhythmSet` chain, gated on `PlayState::Running`
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()
            .init_resource::<RhythmConfig>()
            .init_resource::<Signals>()

            // Register global events
            .add_event::<BeatCrossed>()
            .add_event::<AttackBegan>()
            .add_event::<AttackLanded>()
            .add_event::<AttackFinished>()
            .add_event::<HealthChanged>()
            .add_event::<KillMoonkey>()
            .add_event::<MoonkeyKilled>()
            .add_event::<ZombieLaunched>()
            .add_event::<SpawnRequest>()
            .add_event::<WaveEvent>()
            .add_event::<AnimationCue>()

            // System ordering
            .configure_sets(
                Update,
                (
                    RhythmSet::Input,
                    RhythmSet::Clock,
                    RhythmSet::Beat,
                    RhythmSet::Action,
                    RhythmSet::Resolve,
                    RhythmSet::Lifecycle,
                    RhythmSet::Feedback,
                )
                    .chain()
                    .run_if(in_state(PlayState::Running)),
            )

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame)),
            )
            .add_systems(Update, forward_signals.in_set(RhythmSet::Feedback));
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}
