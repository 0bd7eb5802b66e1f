//! Combat module - beat windows, attack resolution, health and score.

mod components;
mod plugin;
mod resolver;
mod score;
mod systems;

pub use components::*;
pub use plugin::CombatPlugin;
pub use resolver::{resolve, DefenderState, Resolution, Strike};
pub use score::ScoreCells;
pub use systems::resolve_attacks;
