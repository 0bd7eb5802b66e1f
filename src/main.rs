//! Moonkey Beat - Entry Point
//!
//! Controls:
//! - A/D or arrows: Move
//! - Space: Jump (hold for a higher jump)
//! - Shift: Dash
//! - J: Attack the nearest zombie
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, with kira taking over audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Moonkey Beat".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Physics, with collider outlines standing in for sprites
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin::default())

        // Our game plugin
        .add_plugins(moonkey_beat::MoonkeyBeatPlugin)

        .run();
}
