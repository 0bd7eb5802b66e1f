//! Tuning data loaded from `assets/data/rhythm.ron`.
//!
//! Every section has defaults, so a partial file only overrides what it
//! names. A missing or broken file falls back to the defaults with a warning.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::ConfigError;

/// Default location of the tuning file.
pub const CONFIG_PATH: &str = "assets/data/rhythm.ron";

/// Song timing.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ConductorConfig {
    pub bpm: f64,
    pub beats_per_loop: f64,
    /// Silence before the first beat of the song, in seconds.
    pub first_beat_offset: f64,
}

impl Default for ConductorConfig {
    fn default() -> Self {
        Self {
            bpm: 120.0,
            beats_per_loop: 4.0,
            first_beat_offset: 0.0,
        }
    }
}

/// Player character tuning.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MoonkeyTuning {
    pub max_health: f32,
    pub move_speed: f32,
    pub jump_speed: f32,
    /// How long holding jump keeps the upward boost, in seconds.
    pub jump_hold_time: f32,
    /// How many ticks a jump press stays buffered.
    pub jump_buffer_frames: u32,
    pub dash_speed: f32,
    pub dash_time: f32,
    pub max_dash_charges: u32,
    pub dash_cooldown: f32,
    pub attack_range: f32,
    /// Delay between committing to an attack and the strike landing.
    pub strike_delay: f32,
    pub dying_time: f32,
    /// Falling below this height kills the moonkey.
    pub kill_plane_y: f32,
}

impl Default for MoonkeyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            move_speed: 6.0,
            jump_speed: 9.0,
            jump_hold_time: 0.2,
            jump_buffer_frames: 6,
            dash_speed: 18.0,
            dash_time: 0.15,
            max_dash_charges: 2,
            dash_cooldown: 1.0,
            attack_range: 2.5,
            strike_delay: 0.1,
            dying_time: 1.0,
            kill_plane_y: -20.0,
        }
    }
}

/// Enemy tuning.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ZombieTuning {
    /// On-beat hits needed to launch a zombie.
    pub hits_to_launch: u32,
    /// Beats after spawning until the zombie's attack beat.
    pub attack_beat_offset: u64,
    /// Length of the beat cycle attack beats repeat on.
    pub cycle_length: u64,
    /// Damage a moonkey takes for an off-beat attack.
    pub counter_damage: f32,
    pub hop_impulse: f32,
    pub hop_lift: f32,
    pub launch_impulse: f32,
    pub launch_time: f32,
    /// Downbeats an unlatched, attacked zombie waits before dancing again.
    /// Zero keeps it staggered until it is attacked again.
    pub stagger_beats: u32,
}

impl Default for ZombieTuning {
    fn default() -> Self {
        Self {
            hits_to_launch: 3,
            attack_beat_offset: 2,
            cycle_length: 4,
            counter_damage: 25.0,
            hop_impulse: 4.0,
            hop_lift: 2.0,
            launch_impulse: 12.0,
            launch_time: 1.5,
            stagger_beats: 4,
        }
    }
}

/// Score rules.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScoreTuning {
    pub hit_points: u64,
    pub launch_points: u64,
    /// Combo hits per multiplier step.
    pub combo_step: u32,
    pub max_multiplier: u32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            hit_points: 100,
            launch_points: 500,
            combo_step: 4,
            max_multiplier: 4,
        }
    }
}

/// Wave progression.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WaveTuning {
    /// Start wave 1 as soon as a session begins.
    pub auto_start: bool,
    pub first_wave_size: u32,
    pub wave_growth: u32,
    pub spawn_points: Vec<(f32, f32)>,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            auto_start: true,
            first_wave_size: 3,
            wave_growth: 2,
            spawn_points: vec![(-12.0, 1.0), (12.0, 1.0), (-6.0, 4.0), (6.0, 4.0)],
        }
    }
}

/// Asset paths for the song and combat cues.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub song: String,
    pub hit_sfx: String,
    pub miss_sfx: String,
    pub launch_sfx: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            song: "audio/music/graveyard_groove.ogg".to_string(),
            hit_sfx: "audio/sfx/hit.ogg".to_string(),
            miss_sfx: "audio/sfx/miss.ogg".to_string(),
            launch_sfx: "audio/sfx/launch.ogg".to_string(),
        }
    }
}

/// Resource holding all gameplay tuning.
#[derive(Resource, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct RhythmConfig {
    pub conductor: ConductorConfig,
    pub moonkey: MoonkeyTuning,
    pub zombie: ZombieTuning,
    pub score: ScoreTuning,
    pub waves: WaveTuning,
    pub audio: AudioConfig,
}

impl RhythmConfig {
    /// Parse and validate a RON document.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigError> {
        let config = ron::from_str::<RhythmConfig>(contents).map_err(|e| {
            ConfigError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the gameplay math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.conductor.bpm > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "conductor.bpm",
                details: format!("must be positive, got {}", self.conductor.bpm),
            });
        }
        if !(self.conductor.beats_per_loop > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "conductor.beats_per_loop",
                details: format!("must be positive, got {}", self.conductor.beats_per_loop),
            });
        }
        if self.zombie.cycle_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "zombie.cycle_length",
                details: "must be at least 1".to_string(),
            });
        }
        if self.zombie.hits_to_launch == 0 {
            return Err(ConfigError::InvalidValue {
                field: "zombie.hits_to_launch",
                details: "must be at least 1".to_string(),
            });
        }
        if self.score.combo_step == 0 {
            return Err(ConfigError::InvalidValue {
                field: "score.combo_step",
                details: "must be at least 1".to_string(),
            });
        }
        if self.moonkey.max_health <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "moonkey.max_health",
                details: format!("must be positive, got {}", self.moonkey.max_health),
            });
        }
        Ok(())
    }
}

/// Read the tuning file from disk.
pub fn load_config(path: &Path) -> Result<RhythmConfig, ConfigError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ConfigError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    RhythmConfig::from_ron(&display, &contents)
}

/// Load the tuning file at startup, keeping defaults when it is unusable.
pub fn load_rhythm_config(mut commands: Commands) {
    match load_config(Path::new(CONFIG_PATH)) {
        Ok(config) => {
            info!(
                "Loaded rhythm config: {} bpm, {} zombies in the first wave",
                config.conductor.bpm, config.waves.first_wave_size
            );
            commands.insert_resource(config);
        }
        Err(e) => {
            warn!("Using default rhythm config: {}", e);
            commands.insert_resource(RhythmConfig::default());
        }
    }
}
