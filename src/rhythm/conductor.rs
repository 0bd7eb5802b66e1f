//! Beat clock derived from the audio hardware clock.

use bevy::prelude::*;

use crate::core::{BeatCrossed, ConductorConfig};

/// Current reading of the external audio clock, in seconds.
///
/// Written once per tick by whatever owns playback; the conductor only ever
/// reads it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct DspClock {
    pub seconds: f64,
}

/// Converts audio clock readings into beats.
///
/// `completed_beats` never decreases. A call to [`Conductor::advance`] moves
/// it forward by at most one beat: if the clock jumped several beats ahead
/// (a long frame, a hitch in the audio thread), the conductor catches up one
/// beat per call instead of firing a burst of crossings at once.
#[derive(Resource, Debug, Clone)]
pub struct Conductor {
    bpm: f64,
    seconds_per_beat: f64,
    beats_per_loop: f64,
    first_beat_offset: f64,
    origin_dsp_time: Option<f64>,
    song_position: f64,
    song_position_in_beats: f64,
    completed_beats: u64,
    completed_loops: u64,
    loop_position_in_beats: f64,
}

impl Default for Conductor {
    fn default() -> Self {
        Self::from_config(&ConductorConfig::default())
    }
}

impl Conductor {
    /// `bpm` and `beats_per_loop` must be positive; the tuning loader rejects
    /// anything else before a conductor is built.
    pub fn new(bpm: f64, beats_per_loop: f64, first_beat_offset: f64) -> Self {
        Self {
            bpm,
            seconds_per_beat: 60.0 / bpm,
            beats_per_loop,
            first_beat_offset,
            origin_dsp_time: None,
            song_position: 0.0,
            song_position_in_beats: 0.0,
            completed_beats: 0,
            completed_loops: 0,
            loop_position_in_beats: 0.0,
        }
    }

    pub fn from_config(config: &ConductorConfig) -> Self {
        Self::new(config.bpm, config.beats_per_loop, config.first_beat_offset)
    }

    /// Record the clock reading the song started at. Only the first call counts.
    pub fn start(&mut self, dsp_time: f64) {
        if self.origin_dsp_time.is_none() {
            self.origin_dsp_time = Some(dsp_time);
        }
    }

    pub fn is_started(&self) -> bool {
        self.origin_dsp_time.is_some()
    }

    /// Recompute the song position from a clock reading.
    ///
    /// Returns the crossing when this call completed a new beat.
    pub fn advance(&mut self, dsp_time: f64) -> Option<BeatCrossed> {
        let origin = self.origin_dsp_time?;

        self.song_position = dsp_time - origin - self.first_beat_offset;
        self.song_position_in_beats = self.song_position / self.seconds_per_beat;

        let crossed = if self.song_position_in_beats >= (self.completed_beats + 1) as f64 {
            self.completed_beats += 1;
            Some(BeatCrossed {
                beat: self.completed_beats,
            })
        } else {
            None
        };

        if self.song_position_in_beats >= (self.completed_loops + 1) as f64 * self.beats_per_loop {
            self.completed_loops += 1;
        }
        self.loop_position_in_beats = (self.song_position_in_beats
            - self.completed_loops as f64 * self.beats_per_loop)
            .max(0.0);

        crossed
    }

    /// Forget the origin and every count, ready for a new song.
    pub fn reset(&mut self) {
        *self = Self::new(self.bpm, self.beats_per_loop, self.first_beat_offset);
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn seconds_per_beat(&self) -> f64 {
        self.seconds_per_beat
    }

    pub fn song_position(&self) -> f64 {
        self.song_position
    }

    pub fn song_position_in_beats(&self) -> f64 {
        self.song_position_in_beats
    }

    pub fn completed_beats(&self) -> u64 {
        self.completed_beats
    }

    pub fn completed_loops(&self) -> u64 {
        self.completed_loops
    }

    pub fn loop_position_in_beats(&self) -> f64 {
        self.loop_position_in_beats
    }

    /// Progress through the current loop, 0.0 to 1.0.
    pub fn loop_position_in_analog(&self) -> f64 {
        self.loop_position_in_beats / self.beats_per_loop
    }

    /// Progress through the current beat, 0.0 to 1.0.
    pub fn beat_fraction(&self) -> f64 {
        self.song_position_in_beats.max(0.0).fract()
    }
}
