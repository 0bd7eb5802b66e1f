//! Zombie module - dancing enemies that hop on the beat.

mod ai;
mod components;
mod plugin;
mod state;
mod targeting;

pub use components::*;
pub use plugin::ZombiePlugin;
pub use state::{DownbeatAction, ZombieState, ZombieStateMachine};
pub use targeting::find_target;
