//! Moonkey module - the player characters.

mod components;
mod controller;
mod movement;
mod plugin;
mod state;

pub use components::*;
pub use controller::{begin_attacks, spawn_player_moonkey, tick_strikes};
pub use movement::{DashCharges, MoonkeyMotor, MotorContext, MotorInput, MotorOutput};
pub use plugin::MoonkeyPlugin;
pub use state::{MoonkeyState, MoonkeyStateMachine};
