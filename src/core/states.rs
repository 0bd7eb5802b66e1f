//! Game state definitions that control the overall flow of the game.
//!
//! Gameplay systems only run while the song is playing and the game is not
//! paused. Pausing stops the systems that read the audio clock, so the
//! conductor's math never has to roll anything back.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while the song is fetched
/// - `InGame` while a session is running
/// - `GameOver` once every moonkey is dead
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Waiting for the song to finish loading
    #[default]
    Loading,
    /// Active session
    InGame,
    /// Every moonkey has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Song playing, simulation ticking
    #[default]
    Running,
    /// Song and simulation frozen
    Paused,
}
