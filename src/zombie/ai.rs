//! Zombie behaviour systems.
//!
//! Zombies only move on the beat: every even downbeat a dancing zombie picks
//! the nearest free moonkey and hops toward it.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{LaunchTimer, Zombie};
use super::state::{DownbeatAction, ZombieState, ZombieStateMachine};
use super::targeting::find_target;
use crate::core::{
    AnimationCue, AttackBegan, AttackFinished, AttackOutcome, BeatCrossed, Clip, RhythmConfig,
    Roster, ZombieLaunched,
};
use crate::moonkey::{Moonkey, MoonkeyStateMachine};

type MoonkeyView<'w, 's> =
    Query<'w, 's, (&'static Transform, &'static MoonkeyStateMachine), (With<Moonkey>, Without<Zombie>)>;

/// A moonkey a zombie could go after, and whether it is busy attacking.
struct Candidate {
    entity: Entity,
    position: Vec2,
    busy: bool,
}

fn candidates(roster: &Roster<Moonkey>, moonkeys: &MoonkeyView) -> Vec<Candidate> {
    roster
        .snapshot()
        .into_iter()
        .filter_map(|entity| {
            let (transform, machine) = moonkeys.get(entity).ok()?;
            Some(Candidate {
                entity,
                position: transform.translation.truncate(),
                busy: machine.is_attacking(),
            })
        })
        .collect()
}

fn seek(origin: Vec2, candidates: &[Candidate]) -> Option<Entity> {
    let positions: Vec<(Entity, Vec2)> = candidates.iter().map(|c| (c.entity, c.position)).collect();
    let busy = |entity: Entity| candidates.iter().any(|c| c.entity == entity && c.busy);
    find_target(origin, &positions, Some(&busy))
}

/// Latch attackers onto the zombies they started swinging at.
pub fn latch_attackers(
    mut began: EventReader<AttackBegan>,
    mut zombies: Query<&mut ZombieStateMachine, With<Zombie>>,
    mut cues: EventWriter<AnimationCue>,
) {
    for event in began.read() {
        let Ok(mut machine) = zombies.get_mut(event.target) else {
            continue;
        };
        if machine.attacked_by(event.attacker) {
            cues.send(AnimationCue {
                entity: event.target,
                clip: Clip::Stagger,
            });
        }
    }
}

/// React to the beat: hop, re-enable targeting, or recover from a stagger.
pub fn zombies_on_downbeat(
    mut beats: EventReader<BeatCrossed>,
    config: Res<RhythmConfig>,
    roster: Res<Roster<Moonkey>>,
    moonkeys: MoonkeyView,
    mut zombies: Query<
        (Entity, &Transform, &mut ZombieStateMachine, &mut ExternalImpulse),
        (With<Zombie>, Without<Moonkey>),
    >,
    mut cues: EventWriter<AnimationCue>,
) {
    for beat in beats.read() {
        let targets = candidates(&roster, &moonkeys);

        for (entity, transform, mut machine, mut impulse) in zombies.iter_mut() {
            match machine.on_downbeat(beat.beat) {
                DownbeatAction::Hop => {
                    let origin = transform.translation.truncate();
                    machine.set_target(seek(origin, &targets));

                    let toward = machine
                        .target()
                        .and_then(|target| targets.iter().find(|c| c.entity == target))
                        .map_or(0.0, |c| (c.position.x - origin.x).signum());

                    impulse.impulse += Vec3::new(
                        toward * config.zombie.hop_impulse,
                        config.zombie.hop_lift,
                        0.0,
                    );
                    cues.send(AnimationCue {
                        entity,
                        clip: Clip::Dance,
                    });
                }
                DownbeatAction::ReenableTargets => {
                    debug!("Zombie {:?} seeking targets again on beat {}", entity, beat.beat);
                }
                DownbeatAction::Recovered => {
                    cues.send(AnimationCue {
                        entity,
                        clip: Clip::Dance,
                    });
                }
                DownbeatAction::Idle => {}
            }
        }
    }
}

/// Drop targets that became unavailable and look for a replacement.
pub fn retarget_zombies(
    roster: Res<Roster<Moonkey>>,
    moonkeys: MoonkeyView,
    mut zombies: Query<(&Transform, &mut ZombieStateMachine), (With<Zombie>, Without<Moonkey>)>,
) {
    let mut targets: Option<Vec<Candidate>> = None;

    for (transform, mut machine) in zombies.iter_mut() {
        if !machine.targets_active() || machine.state() == ZombieState::Launched {
            continue;
        }

        let available = machine.target().is_some_and(|target| {
            roster.contains(target) && moonkeys.get(target).is_ok_and(|(_, m)| !m.is_attacking())
        });
        if available {
            continue;
        }

        let targets = targets.get_or_insert_with(|| candidates(&roster, &moonkeys));
        machine.set_target(seek(transform.translation.truncate(), targets));
    }
}

/// Apply attack outcomes to the zombies that were attacked.
pub fn zombie_outcomes(
    mut commands: Commands,
    mut finished: EventReader<AttackFinished>,
    config: Res<RhythmConfig>,
    mut roster: ResMut<Roster<Zombie>>,
    attackers: Query<&Transform, Without<Zombie>>,
    mut zombies: Query<(&Transform, &mut ZombieStateMachine, &mut ExternalImpulse), With<Zombie>>,
    mut launched: EventWriter<ZombieLaunched>,
    mut cues: EventWriter<AnimationCue>,
) {
    for event in finished.read() {
        let Ok((transform, mut machine, mut impulse)) = zombies.get_mut(event.target) else {
            continue;
        };
        if !machine.attack_resolved(event.attacker, event.outcome) {
            continue;
        }

        match event.outcome {
            AttackOutcome::Launched => {
                roster.remove(event.target);

                let away = attackers
                    .get(event.attacker)
                    .map_or(0.0, |a| (transform.translation.x - a.translation.x).signum());
                impulse.impulse += Vec3::new(
                    away * config.zombie.launch_impulse * 0.5,
                    config.zombie.launch_impulse,
                    0.0,
                );

                commands
                    .entity(event.target)
                    .insert(LaunchTimer::new(config.zombie.launch_time));
                launched.send(ZombieLaunched {
                    zombie: event.target,
                    by: event.attacker,
                });
                cues.send(AnimationCue {
                    entity: event.target,
                    clip: Clip::Launch,
                });
                info!("Zombie {:?} launched by {:?}", event.target, event.attacker);
            }
            AttackOutcome::Normal => {
                cues.send(AnimationCue {
                    entity: event.target,
                    clip: Clip::Hit,
                });
            }
            AttackOutcome::Failed => {
                cues.send(AnimationCue {
                    entity: event.target,
                    clip: Clip::Dance,
                });
            }
        }
    }
}

/// Free zombies latched by a moonkey that died or vanished before its strike
/// landed. That attack never resolves, so nothing else would unlatch them.
pub fn release_fallen_attackers(
    roster: Res<Roster<Moonkey>>,
    mut zombies: Query<(Entity, &mut ZombieStateMachine), With<Zombie>>,
) {
    for (entity, mut machine) in zombies.iter_mut() {
        let Some(attacker) = machine.latched_attacker() else {
            continue;
        };
        if !roster.contains(attacker) && machine.release(attacker) {
            debug!("Zombie {:?} released by fallen attacker {:?}", entity, attacker);
        }
    }
}

/// Remove launched zombies once they have flown off.
pub fn despawn_launched(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut LaunchTimer)>,
) {
    for (entity, mut timer) in query.iter_mut() {
        timer.0.tick(time.delta());

        if timer.0.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
