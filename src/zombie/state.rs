//! Zombie state machine.
//!
//! ```text
//! Dancing --attacked_by--> Attacked --resolved(Failed)--> Dancing
//!                          Attacked --resolved(Normal)--> Attacked
//!                          Attacked --resolved(Launched)--> Launched
//! ```
//!
//! Only the first attacker is remembered until its attack is resolved.

use bevy::prelude::*;

use crate::core::AttackOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZombieState {
    #[default]
    Dancing,
    Attacked,
    Launched,
}

/// What a zombie does with a downbeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownbeatAction {
    Idle,
    /// Re-seek a target and hop toward it.
    Hop,
    /// Target seeking was switched back on.
    ReenableTargets,
    /// Stagger ran out, back to dancing.
    Recovered,
}

#[derive(Component, Debug, Clone)]
pub struct ZombieStateMachine {
    state: ZombieState,
    attacker: Option<Entity>,
    target: Option<Entity>,
    targets_active: bool,
    stagger_beats: u32,
    stagger_left: u32,
}

impl ZombieStateMachine {
    /// `stagger_beats` of zero keeps an attacked zombie staggered until
    /// an attack on it fails.
    pub fn new(stagger_beats: u32) -> Self {
        Self {
            state: ZombieState::Dancing,
            attacker: None,
            target: None,
            targets_active: true,
            stagger_beats,
            stagger_left: 0,
        }
    }

    pub fn state(&self) -> ZombieState {
        self.state
    }

    pub fn latched_attacker(&self) -> Option<Entity> {
        self.attacker
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn targets_active(&self) -> bool {
        self.targets_active
    }

    pub fn set_target(&mut self, target: Option<Entity>) {
        if self.targets_active {
            self.target = target;
        }
    }

    /// Record an attack starting. Returns false when another attacker is
    /// already latched or the zombie has been launched.
    pub fn attacked_by(&mut self, attacker: Entity) -> bool {
        if self.state == ZombieState::Launched {
            debug!("Launched zombie ignored attack from {:?}", attacker);
            return false;
        }
        if self.attacker.is_some() {
            return false;
        }

        self.state = ZombieState::Attacked;
        self.attacker = Some(attacker);
        self.targets_active = false;
        self.target = None;
        self.stagger_left = self.stagger_beats;
        true
    }

    /// Forget `attacker` without an outcome, for attackers that died or
    /// vanished mid-swing. The zombie stays staggered and can be latched
    /// by the next attacker.
    pub fn release(&mut self, attacker: Entity) -> bool {
        if self.attacker != Some(attacker) {
            return false;
        }
        self.attacker = None;
        self.stagger_left = self.stagger_beats;
        true
    }

    pub fn on_downbeat(&mut self, beat: u64) -> DownbeatAction {
        match self.state {
            ZombieState::Dancing => {
                if beat % 2 == 0 && self.targets_active {
                    DownbeatAction::Hop
                } else {
                    DownbeatAction::Idle
                }
            }
            ZombieState::Attacked => {
                if !self.targets_active {
                    self.targets_active = true;
                    return DownbeatAction::ReenableTargets;
                }
                if self.attacker.is_some() || self.stagger_beats == 0 {
                    return DownbeatAction::Idle;
                }
                self.stagger_left = self.stagger_left.saturating_sub(1);
                if self.stagger_left == 0 {
                    self.state = ZombieState::Dancing;
                    DownbeatAction::Recovered
                } else {
                    DownbeatAction::Idle
                }
            }
            ZombieState::Launched => DownbeatAction::Idle,
        }
    }

    /// Apply the outcome of `attacker`'s attack. Outcomes of attackers that
    /// were never latched are ignored; returns whether anything changed.
    pub fn attack_resolved(&mut self, attacker: Entity, outcome: AttackOutcome) -> bool {
        if self.state == ZombieState::Launched {
            debug!("Outcome {:?} arrived after launch, ignoring", outcome);
            return false;
        }
        if self.attacker != Some(attacker) {
            return false;
        }

        self.attacker = None;
        match outcome {
            AttackOutcome::Failed => self.state = ZombieState::Dancing,
            AttackOutcome::Normal => self.stagger_left = self.stagger_beats,
            AttackOutcome::Launched => {
                self.state = ZombieState::Launched;
                self.target = None;
            }
        }
        true
    }
}
