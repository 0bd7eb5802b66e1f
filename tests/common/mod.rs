//! Shared helpers for the headless gameplay tests.
//!
//! The app runs without a window, audio or physics. Tests drive the audio
//! clock by hand and read back components, resources and captured events.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use moonkey_beat::core::{GameState, RhythmConfig};
use moonkey_beat::moonkey::{moonkey_bundle, MoonkeyIntent, MoonkeyState, MoonkeyStateMachine};
use moonkey_beat::rhythm::{Conductor, DspClock};
use moonkey_beat::zombie::zombie_bundle;
use moonkey_beat::GameplayPlugin;

/// Defaults, minus the things that make tests slow or random: no automatic
/// waves, strikes land in the frame they start, deaths finish immediately.
pub fn test_config() -> RhythmConfig {
    let mut config = RhythmConfig::default();
    config.waves.auto_start = false;
    config.moonkey.strike_delay = 0.0;
    config.moonkey.dying_time = 0.0;
    config
}

/// Build a gameplay app that enters `InGame` on its first update.
pub fn headless_app(config: RhythmConfig) -> App {
    let mut app = App::new();
    app.add_plugins(StatesPlugin)
        .init_resource::<Time>()
        .insert_resource(config)
        .insert_state(GameState::InGame)
        .add_plugins(GameplayPlugin);
    app
}

/// Run the first frame: enter the session and start the conductor at zero.
pub fn start_session(app: &mut App) {
    app.world_mut().resource_mut::<DspClock>().seconds = 0.0;
    app.update();
}

pub fn config(app: &App) -> RhythmConfig {
    app.world().resource::<RhythmConfig>().clone()
}

pub fn spawn_moonkey(app: &mut App, position: Vec2) -> Entity {
    let tuning = config(app).moonkey;
    app.world_mut().spawn(moonkey_bundle(position, &tuning)).id()
}

/// Spawn a zombie whose attack window is anchored at beat 0.
pub fn spawn_zombie(app: &mut App, position: Vec2) -> Entity {
    let tuning = config(app).zombie;
    app.world_mut().spawn(zombie_bundle(position, 0, &tuning)).id()
}

/// Set the audio clock and run one frame.
pub fn set_clock(app: &mut App, seconds: f64) {
    app.world_mut().resource_mut::<DspClock>().seconds = seconds;
    app.update();
}

pub fn completed_beats(app: &App) -> u64 {
    app.world().resource::<Conductor>().completed_beats()
}

/// Move the clock forward one beat per frame until `beat` is completed.
pub fn advance_to_beat(app: &mut App, beat: u64) {
    let seconds_per_beat = app.world().resource::<Conductor>().seconds_per_beat();
    while completed_beats(app) < beat {
        let next = completed_beats(app) + 1;
        set_clock(app, next as f64 * seconds_per_beat + 0.01);
    }
}

/// Advance game time and run one frame. The audio clock is left alone.
pub fn pass_time(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

/// Press attack on `moonkey` and run one frame.
pub fn attack(app: &mut App, moonkey: Entity) {
    intent(app, moonkey).attack_pressed = true;
    app.update();
}

pub fn intent(app: &mut App, moonkey: Entity) -> Mut<'_, MoonkeyIntent> {
    app.world_mut()
        .get_mut::<MoonkeyIntent>(moonkey)
        .expect("moonkey has an intent")
}

pub fn moonkey_state(app: &App, moonkey: Entity) -> MoonkeyState {
    app.world()
        .get::<MoonkeyStateMachine>(moonkey)
        .expect("moonkey has a state machine")
        .state()
}

/// Events of type `E` seen by the capture system so far.
#[derive(Resource)]
pub struct Captured<E: Event>(pub Vec<E>);

/// Record every `E` sent from now on.
pub fn capture<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Captured::<E>(Vec::new()))
        .add_systems(PostUpdate, collect::<E>);
}

fn collect<E: Event + Clone>(mut reader: EventReader<E>, mut captured: ResMut<Captured<E>>) {
    captured.0.extend(reader.read().cloned());
}

pub fn captured<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Captured<E>>().0.clone()
}
