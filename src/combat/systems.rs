//! Combat systems - attack resolution and its health side effects.

use bevy::prelude::*;

use super::components::*;
use super::resolver::{resolve, DefenderState, Resolution, Strike};
use super::score::{apply_score, begin_score_session, end_score_session, ScoreCells};
use crate::core::{AttackLanded, GameState, RhythmConfig, RhythmSet};
use crate::moonkey::MoonkeyStateMachine;
use crate::rhythm::Conductor;
use crate::zombie::{Zombie, ZombieState, ZombieStateMachine};

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<ScoreCells>()

        // Session boundaries
        .add_systems(OnEnter(GameState::InGame), begin_score_session)
        .add_systems(OnExit(GameState::InGame), end_score_session)

        // Resolution, then scoring once every outcome of the frame is known
        .add_systems(Update, resolve_attacks.in_set(RhythmSet::Resolve))
        .add_systems(Update, apply_score.in_set(RhythmSet::Feedback));
}

/// Resolve every attack that landed this frame.
///
/// Each begun attack produces exactly one [`AttackFinished`], including
/// strikes against zombies that no longer exist. Strikes from a moonkey that
/// is not attacking are dropped, as is a second strike from the same moonkey
/// in one frame.
pub fn resolve_attacks(
    mut landed: EventReader<AttackLanded>,
    conductor: Res<Conductor>,
    config: Res<RhythmConfig>,
    attackers: Query<&MoonkeyStateMachine>,
    mut zombies: Query<(&ZombieStateMachine, &mut AttackWindow, &mut Toughness), With<Zombie>>,
    mut healths: Query<&mut Health, Without<Zombie>>,
    mut finished: EventWriter<AttackFinished>,
    mut health_changes: EventWriter<HealthChanged>,
) {
    let beat = conductor.completed_beats();
    let mut struck_this_frame = std::collections::HashSet::new();

    for strike in landed.read() {
        let attacking = attackers
            .get(strike.attacker)
            .is_ok_and(|machine| machine.is_attacking());
        if !attacking || !struck_this_frame.insert(strike.attacker) {
            debug!("Dropped stray strike from {:?}", strike.attacker);
            continue;
        }

        let mut attacker_health = healths.get_mut(strike.attacker).ok();

        let resolution = match zombies.get_mut(strike.target) {
            Ok((machine, mut window, mut toughness)) => resolve(
                &mut window,
                beat,
                DefenderState {
                    latched_attacker: machine.latched_attacker(),
                    launched: machine.state() == ZombieState::Launched,
                    toughness: &mut toughness,
                },
                Strike {
                    attacker: strike.attacker,
                    attacker_health: attacker_health.as_deref_mut(),
                },
                config.zombie.counter_damage,
            ),
            Err(_) => Resolution::whiff(),
        };

        if resolution.damage_dealt > 0.0 {
            if let Some(health) = attacker_health.as_ref() {
                health_changes.send(HealthChanged {
                    entity: strike.attacker,
                    current: health.current,
                    max: health.maximum,
                    delta: -resolution.damage_dealt,
                });
            }
        }

        debug!(
            "Beat {}: {:?} -> {:?} resolved {:?} (engaged: {})",
            beat, strike.attacker, strike.target, resolution.outcome, resolution.engaged
        );

        finished.send(AttackFinished {
            attacker: strike.attacker,
            target: strike.target,
            outcome: resolution.outcome,
            attacker_survived: resolution.attacker_survived,
            beat,
        });
    }
}
