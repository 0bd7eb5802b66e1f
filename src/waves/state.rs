//! Wave bookkeeping.

use bevy::prelude::*;

use crate::core::WaveTuning;

/// Current wave and how many of its zombies are still in the arena.
///
/// Wave 0 means no wave has started; zombies spawned by outside requests
/// are still counted.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct WaveState {
    pub wave: u32,
    pub remaining: u32,
}

impl WaveState {
    /// Zombie count of `wave` (1-based).
    pub fn size_of(wave: u32, tuning: &WaveTuning) -> u32 {
        tuning.first_wave_size + tuning.wave_growth * wave.saturating_sub(1)
    }

    /// Move on to the next wave and return its number.
    pub fn advance(&mut self) -> u32 {
        self.wave += 1;
        self.wave
    }

    pub fn spawned(&mut self, count: u32) {
        self.remaining += count;
    }

    /// Count one zombie out. Returns true when that cleared a running wave.
    pub fn zombie_removed(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0 && self.wave > 0
    }
}
