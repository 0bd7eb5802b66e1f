//! Moonkey systems: input, motion, attacks and death.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::movement::{DashCharges, MotorContext, MotorInput, MoonkeyMotor};
use super::state::{MoonkeyState, MoonkeyStateMachine};
use crate::core::{
    AnimationCue, AttackBegan, AttackFinished, AttackLanded, AttackOutcome, Clip, GameState,
    KillMoonkey, MoonkeyKilled, MoonkeyTuning, RhythmConfig, Roster,
};
use crate::zombie::{find_target, Zombie, ZombieState, ZombieStateMachine};

/// Fill the intent of player-controlled moonkeys from the keyboard.
///
/// Without a keyboard resource (headless runs) intents are left alone.
pub fn read_moonkey_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    mut query: Query<&mut MoonkeyIntent, With<PlayerControlled>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    let mut axis = 0.0;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis += 1.0;
    }

    for mut intent in query.iter_mut() {
        intent.axis = axis;
        intent.jump_held = keyboard.pressed(KeyCode::Space);
        intent.jump_pressed |= keyboard.just_pressed(KeyCode::Space);
        intent.dash_pressed |= keyboard.just_pressed(KeyCode::ShiftLeft);
        intent.attack_pressed |= keyboard.just_pressed(KeyCode::KeyJ);
    }
}

/// Ground check using a short downward raycast.
///
/// Without a physics context the previous value is kept.
pub fn detect_ground(
    rapier_context: Query<&RapierContext>,
    mut moonkeys: Query<(Entity, &Transform, &mut Grounded), With<Moonkey>>,
) {
    let Ok(context) = rapier_context.get_single() else {
        return;
    };

    // Moonkey capsule is capsule_y(0.5, 0.3), so its bottom is 0.8 below center
    for (entity, transform, mut grounded) in moonkeys.iter_mut() {
        let ray_origin = transform.translation - Vec3::Y * 0.75;
        let hit = context
            .cast_ray(
                ray_origin,
                Vec3::NEG_Y,
                0.15,
                true,
                QueryFilter::default().exclude_collider(entity),
            )
            .is_some();

        grounded.0 = hit;
    }
}

pub fn tick_dash_charges(time: Res<Time>, mut query: Query<&mut DashCharges>) {
    for mut charges in query.iter_mut() {
        charges.tick(time.delta_secs());
    }
}

/// Run each moonkey's motor and hand the result to the physics body.
pub fn drive_moonkeys(
    time: Res<Time>,
    config: Res<RhythmConfig>,
    mut moonkeys: Query<
        (
            Entity,
            &MoonkeyStateMachine,
            &Grounded,
            &mut MoonkeyIntent,
            &mut MoonkeyMotor,
            &mut DashCharges,
            &mut Velocity,
        ),
        With<Moonkey>,
    >,
    mut cues: EventWriter<AnimationCue>,
) {
    for (entity, machine, grounded, mut intent, mut motor, mut charges, mut velocity) in
        moonkeys.iter_mut()
    {
        let input = MotorInput {
            axis: intent.axis,
            jump_pressed: intent.jump_pressed,
            jump_held: intent.jump_held,
            dash_pressed: intent.dash_pressed,
        };
        intent.jump_pressed = false;
        intent.dash_pressed = false;

        let context = MotorContext {
            grounded: grounded.0,
            can_move: machine.can_move(),
            velocity: velocity.linvel.truncate(),
            dt: time.delta_secs(),
        };
        let output = motor.step(input, context, &mut charges, &config.moonkey);

        velocity.linvel = output.velocity.extend(0.0);

        if output.dashed {
            cues.send(AnimationCue {
                entity,
                clip: Clip::Dash,
            });
        } else if output.jumped {
            cues.send(AnimationCue {
                entity,
                clip: Clip::Jump,
            });
        }
    }
}

/// Start an attack on the nearest zombie in reach.
pub fn begin_attacks(
    config: Res<RhythmConfig>,
    zombie_roster: Res<Roster<Zombie>>,
    zombies: Query<(&Transform, &ZombieStateMachine), (With<Zombie>, Without<Moonkey>)>,
    mut moonkeys: Query<
        (
            Entity,
            &Transform,
            &mut MoonkeyStateMachine,
            &mut MoonkeyIntent,
            &mut MoonkeyCombat,
        ),
        With<Moonkey>,
    >,
    mut began: EventWriter<AttackBegan>,
    mut cues: EventWriter<AnimationCue>,
) {
    let reach = config.moonkey.attack_range * config.moonkey.attack_range;

    for (entity, transform, mut machine, mut intent, mut combat) in moonkeys.iter_mut() {
        if !intent.attack_pressed {
            continue;
        }
        intent.attack_pressed = false;

        if !machine.can_move() {
            continue;
        }

        let origin = transform.translation.truncate();
        let in_reach: Vec<(Entity, Vec2)> = zombie_roster
            .snapshot()
            .into_iter()
            .filter_map(|zombie| {
                let (zombie_transform, zombie_machine) = zombies.get(zombie).ok()?;
                let position = zombie_transform.translation.truncate();
                let reachable = zombie_machine.state() != ZombieState::Launched
                    && origin.distance_squared(position) <= reach;
                reachable.then_some((zombie, position))
            })
            .collect();

        let Some(target) = find_target(origin, &in_reach, None) else {
            debug!("Moonkey {:?} swung at nothing", entity);
            continue;
        };

        if machine.begin_attack() {
            combat.start(target, config.moonkey.strike_delay);
            began.send(AttackBegan {
                attacker: entity,
                target,
            });
            cues.send(AnimationCue {
                entity,
                clip: Clip::Attack,
            });
        }
    }
}

/// Land strikes whose delay has run out.
pub fn tick_strikes(
    time: Res<Time>,
    mut moonkeys: Query<(Entity, &mut MoonkeyCombat), With<Moonkey>>,
    mut landed: EventWriter<AttackLanded>,
) {
    for (entity, mut combat) in moonkeys.iter_mut() {
        let Some(target) = combat.target else {
            continue;
        };
        let Some(strike) = combat.strike.as_mut() else {
            continue;
        };

        strike.tick(time.delta());
        if strike.finished() {
            combat.strike = None;
            landed.send(AttackLanded {
                attacker: entity,
                target,
            });
        }
    }
}

/// Route a moonkey into `Dying`: announce it once and take it off the roster.
fn begin_dying(
    commands: &mut Commands,
    entity: Entity,
    tuning: &MoonkeyTuning,
    roster: &mut Roster<Moonkey>,
    killed: &mut EventWriter<MoonkeyKilled>,
    cues: &mut EventWriter<AnimationCue>,
) {
    roster.remove(entity);
    commands.entity(entity).insert(DyingTimer::new(tuning.dying_time));
    killed.send(MoonkeyKilled { moonkey: entity });
    cues.send(AnimationCue {
        entity,
        clip: Clip::Die,
    });
    info!("Moonkey {:?} killed", entity);
}

/// Apply attack outcomes to the moonkeys that attacked.
pub fn moonkey_outcomes(
    mut commands: Commands,
    mut finished: EventReader<AttackFinished>,
    config: Res<RhythmConfig>,
    mut roster: ResMut<Roster<Moonkey>>,
    mut moonkeys: Query<(&mut MoonkeyStateMachine, &mut MoonkeyCombat), With<Moonkey>>,
    mut killed: EventWriter<MoonkeyKilled>,
    mut cues: EventWriter<AnimationCue>,
) {
    for event in finished.read() {
        let Ok((mut machine, mut combat)) = moonkeys.get_mut(event.attacker) else {
            continue;
        };
        combat.clear();

        if machine.attack_finished(event.outcome, event.attacker_survived) {
            begin_dying(
                &mut commands,
                event.attacker,
                &config.moonkey,
                &mut roster,
                &mut killed,
                &mut cues,
            );
            continue;
        }

        let clip = match event.outcome {
            AttackOutcome::Failed => Clip::Miss,
            AttackOutcome::Normal | AttackOutcome::Launched => Clip::Hit,
        };
        cues.send(AnimationCue {
            entity: event.attacker,
            clip,
        });
    }
}

/// Anything below the kill plane is asked to die.
pub fn kill_plane(
    config: Res<RhythmConfig>,
    moonkeys: Query<(Entity, &Transform, &MoonkeyStateMachine), With<Moonkey>>,
    mut requests: EventWriter<KillMoonkey>,
) {
    for (entity, transform, machine) in moonkeys.iter() {
        if machine.is_alive() && transform.translation.y < config.moonkey.kill_plane_y {
            requests.send(KillMoonkey { moonkey: entity });
        }
    }
}

pub fn apply_kill_requests(
    mut commands: Commands,
    mut requests: EventReader<KillMoonkey>,
    config: Res<RhythmConfig>,
    mut roster: ResMut<Roster<Moonkey>>,
    mut moonkeys: Query<(&mut MoonkeyStateMachine, &mut MoonkeyCombat), With<Moonkey>>,
    mut killed: EventWriter<MoonkeyKilled>,
    mut cues: EventWriter<AnimationCue>,
) {
    for request in requests.read() {
        let Ok((mut machine, mut combat)) = moonkeys.get_mut(request.moonkey) else {
            continue;
        };

        if machine.kill() {
            combat.clear();
            begin_dying(
                &mut commands,
                request.moonkey,
                &config.moonkey,
                &mut roster,
                &mut killed,
                &mut cues,
            );
        }
    }
}

/// Finish death animations and end the game once every moonkey is dead.
pub fn finish_dying(
    mut commands: Commands,
    time: Res<Time>,
    mut moonkeys: Query<(Entity, &mut MoonkeyStateMachine, Option<&mut DyingTimer>), With<Moonkey>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let mut any_died = false;

    for (entity, mut machine, timer) in moonkeys.iter_mut() {
        let Some(mut timer) = timer else {
            continue;
        };
        timer.0.tick(time.delta());

        if timer.0.finished() {
            machine.finish_dying();
            commands.entity(entity).remove::<DyingTimer>();
            any_died = true;
        }
    }

    if any_died
        && moonkeys
            .iter()
            .all(|(_, machine, _)| machine.state() == MoonkeyState::Dead)
    {
        info!("All moonkeys are dead, game over");
        next_state.set(GameState::GameOver);
    }
}

/// Spawn the keyboard-driven moonkey for a new session.
pub fn spawn_player_moonkey(mut commands: Commands, config: Res<RhythmConfig>) {
    commands.spawn((
        moonkey_bundle(Vec2::new(0.0, 1.0), &config.moonkey),
        PlayerControlled,
    ));
    info!("Player moonkey spawned");
}
