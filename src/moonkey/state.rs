//! Moonkey state machine.
//!
//! ```text
//! Moving --begin_attack--> Attacking --attack_finished--> Moving
//!                          Attacking --attack_finished(Failed, killed)--> Dying
//! any living state --kill--> Dying --finish_dying--> Dead
//! ```
//!
//! `Dying` and `Dead` are terminal. Everything attempted from them is a
//! logged no-op.

use bevy::prelude::*;

use crate::core::AttackOutcome;

/// States are ordered so `state >= Dying` means "no longer alive".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MoonkeyState {
    #[default]
    Moving,
    Attacking,
    Dying,
    Dead,
}

#[derive(Component, Debug, Clone, Default)]
pub struct MoonkeyStateMachine {
    state: MoonkeyState,
}

impl MoonkeyStateMachine {
    pub fn state(&self) -> MoonkeyState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state < MoonkeyState::Dying
    }

    pub fn is_attacking(&self) -> bool {
        self.state == MoonkeyState::Attacking
    }

    /// Directional input, jumps and dashes only apply while moving.
    pub fn can_move(&self) -> bool {
        self.state == MoonkeyState::Moving
    }

    pub fn begin_attack(&mut self) -> bool {
        match self.state {
            MoonkeyState::Moving => {
                self.state = MoonkeyState::Attacking;
                true
            }
            MoonkeyState::Attacking => false,
            terminal => {
                debug!("Attack begun while {:?}, ignoring", terminal);
                false
            }
        }
    }

    /// Apply the outcome of this moonkey's own attack.
    ///
    /// Returns true when the attack killed the moonkey, which happens only
    /// for a `Failed` outcome it did not survive.
    pub fn attack_finished(&mut self, outcome: AttackOutcome, survived: bool) -> bool {
        match self.state {
            MoonkeyState::Attacking => {
                if outcome == AttackOutcome::Failed && !survived {
                    return self.kill();
                }
                self.state = MoonkeyState::Moving;
                false
            }
            MoonkeyState::Moving => false,
            terminal => {
                debug!("Attack outcome {:?} arrived while {:?}, ignoring", outcome, terminal);
                false
            }
        }
    }

    /// Enter `Dying`. Returns false if the moonkey was already dying or dead.
    pub fn kill(&mut self) -> bool {
        if !self.is_alive() {
            debug!("Kill requested while {:?}, ignoring", self.state);
            return false;
        }
        self.state = MoonkeyState::Dying;
        true
    }

    /// The post-death hook: `Dying` becomes `Dead`.
    pub fn finish_dying(&mut self) -> bool {
        match self.state {
            MoonkeyState::Dying => {
                self.state = MoonkeyState::Dead;
                true
            }
            MoonkeyState::Dead => {
                warn!("finish_dying called on a dead moonkey");
                false
            }
            living => {
                warn!("finish_dying called while {:?}", living);
                false
            }
        }
    }
}
