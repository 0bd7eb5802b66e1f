//! Zombie plugin - registers zombie behaviour systems.

use bevy::prelude::*;

use super::ai;
use super::components::Zombie;
use crate::core::{forget_departures, register_arrivals, RhythmSet, Roster};
use crate::moonkey::{begin_attacks, tick_strikes, Moonkey};

/// Zombie plugin - handles latching, beat hops, launches and despawning.
pub struct ZombiePlugin;

impl Plugin for ZombiePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<Roster<Zombie>>()
            .add_systems(Update, register_arrivals::<Zombie>.in_set(RhythmSet::Input))
            // Beat-driven movement sees this frame's beat index
            .add_systems(Update, ai::zombies_on_downbeat.in_set(RhythmSet::Beat))
            .add_systems(
                Update,
                // Latch before any strike of this frame can be resolved
                (ai::latch_attackers, ai::retarget_zombies)
                    .chain()
                    .after(begin_attacks)
                    .before(tick_strikes)
                    .in_set(RhythmSet::Action),
            )
            .add_systems(
                Update,
                (
                    ai::zombie_outcomes,
                    // Kills and departures of this frame are already off the roster
                    ai::release_fallen_attackers.after(forget_departures::<Moonkey>),
                    ai::despawn_launched,
                    forget_departures::<Zombie>,
                )
                    .chain()
                    .in_set(RhythmSet::Lifecycle),
            );
    }
}
