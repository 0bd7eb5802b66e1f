//! Zombie-related components.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::state::ZombieStateMachine;
use crate::combat::{AttackWindow, Toughness};
use crate::core::ZombieTuning;

/// Marker component for all zombies.
#[derive(Component)]
pub struct Zombie;

/// Time left before a launched zombie is removed.
#[derive(Component)]
pub struct LaunchTimer(pub Timer);

impl LaunchTimer {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Everything a freshly spawned zombie needs.
///
/// `spawn_beat` anchors the zombie's attack window to the beat it arrived on.
pub fn zombie_bundle(position: Vec2, spawn_beat: u64, tuning: &ZombieTuning) -> impl Bundle {
    (
        Name::new("Zombie"),
        Zombie,
        ZombieStateMachine::new(tuning.stagger_beats),
        AttackWindow::new(spawn_beat, tuning.attack_beat_offset, tuning.cycle_length),
        Toughness::new(tuning.hits_to_launch),
        Transform::from_translation(position.extend(0.0)),
        // Rapier physics components
        RigidBody::Dynamic,
        Collider::capsule_y(0.4, 0.35),
        LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Z,
        Velocity::zero(),
        ExternalImpulse::default(),
    )
}
