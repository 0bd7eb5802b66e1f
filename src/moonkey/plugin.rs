//! Moonkey plugin - input, motion, attacks and death.

use bevy::prelude::*;

use super::components::Moonkey;
use super::controller;
use crate::core::{forget_departures, register_arrivals, RhythmSet, Roster};

/// Moonkey plugin - drives every moonkey from its intent.
///
/// Spawning the keyboard-driven moonkey is left to the game plugin so
/// headless setups decide for themselves who is in the arena.
pub struct MoonkeyPlugin;

impl Plugin for MoonkeyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Roster<Moonkey>>()
            .add_systems(
                Update,
                (
                    register_arrivals::<Moonkey>,
                    controller::read_moonkey_input,
                    controller::detect_ground,
                )
                    .in_set(RhythmSet::Input),
            )
            .add_systems(
                Update,
                (
                    controller::tick_dash_charges,
                    controller::drive_moonkeys,
                    controller::begin_attacks,
                    controller::tick_strikes,
                )
                    .chain()
                    .in_set(RhythmSet::Action),
            )
            .add_systems(
                Update,
                (
                    controller::moonkey_outcomes,
                    controller::kill_plane,
                    controller::apply_kill_requests,
                    controller::finish_dying,
                    forget_departures::<Moonkey>,
                )
                    .chain()
                    .in_set(RhythmSet::Lifecycle),
            );
    }
}
