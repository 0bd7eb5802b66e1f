//! Moonkey Beat - a 2D rhythm-action brawler in Bevy.
//!
//! Moonkeys fight waves of dancing zombies. Everything happens on the beat:
//! zombies hop toward their prey on even beats and can only be hit on their
//! own attack beat, and a swing at the wrong moment hurts the swinger.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, configuration, observer plumbing
//! - **Rhythm**: The conductor turning the audio clock into beats, song playback
//! - **Combat**: Attack windows, attack resolution, health, score
//! - **Moonkey**: Player input, buffered jumps, dashes, attacks, death
//! - **Zombie**: Beat-quantized hopping, target seeking, launches
//! - **Waves**: Spawning and wave progression
//!
//! [`GameplayPlugin`] holds everything that runs without a window or sound
//! card. [`MoonkeyBeatPlugin`] adds song playback, the tuning file and the
//! player's moonkey on top of it.

pub mod combat;
pub mod core;
pub mod moonkey;
pub mod rhythm;
pub mod waves;
pub mod zombie;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// All gameplay systems, independent of audio output and input devices.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Beat clock
            .add_plugins(rhythm::RhythmPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Characters
            .add_plugins(moonkey::MoonkeyPlugin)
            .add_plugins(zombie::ZombiePlugin)

            // Spawning
            .add_plugins(waves::WavePlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct MoonkeyBeatPlugin;

impl Plugin for MoonkeyBeatPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(GameplayPlugin)
            .add_plugins(rhythm::RhythmAudioPlugin)
            .add_systems(Startup, core::load_rhythm_config)
            .add_systems(
                OnEnter(core::GameState::InGame),
                (spawn_arena, moonkey::spawn_player_moonkey),
            );
    }
}

/// Floor and camera for the arena.
fn spawn_arena(mut commands: Commands) {
    commands.spawn((
        Name::new("Arena Floor"),
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(20.0, 0.5, 2.0),
    ));

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 4.0, 24.0).looking_at(Vec3::new(0.0, 2.0, 0.0), Vec3::Y),
    ));
}
