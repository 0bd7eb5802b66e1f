//! Waves module - bringing zombies into the arena.

mod plugin;
mod spawning;
mod state;

pub use plugin::WavePlugin;
pub use state::WaveState;
