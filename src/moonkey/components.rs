//! Moonkey-related components.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::movement::{DashCharges, MoonkeyMotor};
use super::state::MoonkeyStateMachine;
use crate::combat::Health;
use crate::core::MoonkeyTuning;

/// Marker component for every moonkey, player-driven or not.
#[derive(Component)]
pub struct Moonkey;

/// Marker for moonkeys that read their intent from the keyboard.
#[derive(Component)]
pub struct PlayerControlled;

/// What the moonkey wants to do this tick.
///
/// Edge flags (`jump_pressed`, `dash_pressed`, `attack_pressed`) stay set
/// until a system consumes them, so anything may fill this in: keyboard
/// input, a replay, a test.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoonkeyIntent {
    pub axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub dash_pressed: bool,
    pub attack_pressed: bool,
}

/// Whether the moonkey is standing on something.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// The attack currently in flight.
#[derive(Component, Debug, Clone, Default)]
pub struct MoonkeyCombat {
    pub target: Option<Entity>,
    /// Counts down to the strike landing.
    pub strike: Option<Timer>,
}

impl MoonkeyCombat {
    pub fn start(&mut self, target: Entity, strike_delay: f32) {
        self.target = Some(target);
        self.strike = Some(Timer::from_seconds(strike_delay, TimerMode::Once));
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.strike = None;
    }
}

/// Counts down the death animation before the moonkey is `Dead`.
#[derive(Component)]
pub struct DyingTimer(pub Timer);

impl DyingTimer {
    pub fn new(seconds: f32) -> Self {
        Self(Timer::from_seconds(seconds, TimerMode::Once))
    }
}

/// Everything a moonkey needs, minus the controller marker.
pub fn moonkey_bundle(position: Vec2, tuning: &MoonkeyTuning) -> impl Bundle {
    (
        (
            Name::new("Moonkey"),
            Moonkey,
            MoonkeyStateMachine::default(),
            MoonkeyMotor::default(),
            DashCharges::new(tuning.max_dash_charges, tuning.dash_cooldown),
            MoonkeyIntent::default(),
            Grounded(true),
            MoonkeyCombat::default(),
            Health::new(tuning.max_health),
        ),
        Transform::from_translation(position.extend(0.0)),
        // Rapier physics components
        (
            RigidBody::Dynamic,
            Collider::capsule_y(0.5, 0.3),
            LockedAxes::ROTATION_LOCKED | LockedAxes::TRANSLATION_LOCKED_Z,
            Velocity::zero(),
            ExternalImpulse::default(),
        ),
    )
}
