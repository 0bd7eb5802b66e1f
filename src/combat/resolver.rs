//! Attack resolution against a zombie's beat window.
//!
//! An attack only counts when it lands on the zombie's attack beat. Landing
//! anywhere else lets the zombie hit back, and the attacker takes the
//! counter damage.

use bevy::prelude::*;

use super::components::{AttackOutcome, AttackWindow, Health, Toughness};

/// What the resolver needs to know about the zombie being struck.
pub struct DefenderState<'a> {
    /// First attacker recorded on the zombie, if any.
    pub latched_attacker: Option<Entity>,
    pub launched: bool,
    pub toughness: &'a mut Toughness,
}

/// The attacking side of a strike.
pub struct Strike<'a> {
    pub attacker: Entity,
    /// `None` for attackers that cannot be hurt.
    pub attacker_health: Option<&'a mut Health>,
}

/// Result of resolving one strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub outcome: AttackOutcome,
    /// Whether the strike reached the defender's window at all.
    pub engaged: bool,
    /// Counter damage actually removed from the attacker.
    pub damage_dealt: f32,
    pub attacker_survived: bool,
}

impl Resolution {
    /// A strike that never engaged: wrong attacker, spent window, or a
    /// defender that is already gone.
    pub fn whiff() -> Self {
        Self {
            outcome: AttackOutcome::Failed,
            engaged: false,
            damage_dealt: 0.0,
            attacker_survived: true,
        }
    }
}

/// Resolve a strike landing at `current_beat`.
///
/// Only the defender's latched attacker engages, and only once per beat.
/// On the attack beat the defender loses a point of toughness (`Normal`, or
/// `Launched` for the last point). Off the attack beat the attacker takes
/// `damage_amount` and the outcome is `Failed`.
pub fn resolve(
    window: &mut AttackWindow,
    current_beat: u64,
    defender: DefenderState<'_>,
    strike: Strike<'_>,
    damage_amount: f32,
) -> Resolution {
    let engaged = !defender.launched
        && defender.latched_attacker == Some(strike.attacker)
        && window.is_open(current_beat);
    if !engaged {
        return Resolution::whiff();
    }

    window.consume(current_beat);

    if window.is_attack_beat(current_beat) {
        let outcome = if defender.toughness.absorb_hit() {
            AttackOutcome::Launched
        } else {
            AttackOutcome::Normal
        };
        return Resolution {
            outcome,
            engaged: true,
            damage_dealt: 0.0,
            attacker_survived: true,
        };
    }

    let (damage_dealt, attacker_survived) = match strike.attacker_health {
        Some(health) => {
            let dealt = health.take_damage(damage_amount);
            (dealt, !health.is_dead())
        }
        None => (0.0, true),
    };

    Resolution {
        outcome: AttackOutcome::Failed,
        engaged: true,
        damage_dealt,
        attacker_survived,
    }
}
