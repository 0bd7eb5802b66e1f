//! Rhythm module - the conductor and the audio clock behind it.

mod audio;
mod conductor;
mod plugin;

pub use audio::{RhythmAudioPlugin, SongAsset, SongInstance};
pub use conductor::{Conductor, DspClock};
pub use plugin::{advance_conductor, RhythmPlugin};
