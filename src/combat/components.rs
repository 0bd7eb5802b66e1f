//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{AttackFinished, AttackOutcome, HealthChanged};

/// Component for entities that can take damage.
///
/// `current` stays within `[0, maximum]`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    /// Remove up to `amount` health, returning how much was actually removed.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.max(0.0).min(self.current);
        self.current -= actual;
        actual
    }

    /// Apply damage and report whether the entity is still alive.
    pub fn damage(&mut self, amount: f32) -> bool {
        self.take_damage(amount);
        !self.is_dead()
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

/// The beat on which a zombie can be hit.
///
/// Attack beats repeat every `cycle_length` beats, offset from the beat the
/// zombie spawned on.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct AttackWindow {
    pub spawn_beat: u64,
    pub attack_beat: u64,
    pub cycle_length: u64,
    last_consumed: Option<u64>,
}

impl AttackWindow {
    pub fn new(spawn_beat: u64, offset: u64, cycle_length: u64) -> Self {
        let cycle_length = cycle_length.max(1);
        Self {
            spawn_beat,
            attack_beat: (spawn_beat + offset) % cycle_length,
            cycle_length,
            last_consumed: None,
        }
    }

    pub fn is_attack_beat(&self, beat: u64) -> bool {
        beat % self.cycle_length == self.attack_beat
    }

    /// An attack has not already been resolved against this beat.
    pub fn is_open(&self, beat: u64) -> bool {
        self.last_consumed != Some(beat)
    }

    pub fn consume(&mut self, beat: u64) {
        self.last_consumed = Some(beat);
    }

    pub fn last_consumed(&self) -> Option<u64> {
        self.last_consumed
    }

    /// Beats until the next attack beat, 0 when `beat` is one.
    pub fn beats_until_attack(&self, beat: u64) -> u64 {
        let phase = beat % self.cycle_length;
        (self.attack_beat + self.cycle_length - phase) % self.cycle_length
    }
}

/// On-beat hits a zombie can take before it is launched.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Toughness {
    pub hits_remaining: u32,
    pub maximum: u32,
}

impl Toughness {
    pub fn new(hits: u32) -> Self {
        Self {
            hits_remaining: hits,
            maximum: hits,
        }
    }

    /// Take one hit, returning true if that was the last one.
    pub fn absorb_hit(&mut self) -> bool {
        self.hits_remaining = self.hits_remaining.saturating_sub(1);
        self.hits_remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_to_zero() {
        let mut health = Health::new(30.0);
        assert_eq!(health.take_damage(50.0), 30.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn damage_reports_survival() {
        let mut health = Health::new(50.0);
        assert!(health.damage(25.0));
        assert!(!health.damage(25.0));
        assert!(!health.damage(25.0));
        assert_eq!(health.current, 0.0);
    }

    #[test]
    fn negative_damage_is_ignored() {
        let mut health = Health::new(40.0);
        assert_eq!(health.take_damage(-5.0), 0.0);
        assert_eq!(health.current, 40.0);
    }

    #[test]
    fn attack_beat_wraps_around_the_cycle() {
        let window = AttackWindow::new(7, 2, 4);
        assert_eq!(window.attack_beat, 1);
        assert!(window.is_attack_beat(9));
        assert!(window.is_attack_beat(13));
        assert!(!window.is_attack_beat(10));
        assert_eq!(window.beats_until_attack(10), 3);
        assert_eq!(window.beats_until_attack(13), 0);
    }

    #[test]
    fn window_closes_for_the_consumed_beat_only() {
        let mut window = AttackWindow::new(0, 2, 4);
        assert!(window.is_open(2));
        window.consume(2);
        assert!(!window.is_open(2));
        assert!(window.is_open(3));
        assert!(window.is_open(6));
    }

    #[test]
    fn zero_cycle_is_treated_as_one() {
        let window = AttackWindow::new(5, 3, 0);
        assert!(window.is_attack_beat(0));
        assert!(window.is_attack_beat(11));
    }

    #[test]
    fn toughness_counts_down_to_launch() {
        let mut toughness = Toughness::new(2);
        assert!(!toughness.absorb_hit());
        assert!(toughness.absorb_hit());
        assert!(toughness.absorb_hit());
    }
}
