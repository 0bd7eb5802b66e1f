//! Global events used for cross-system communication.
//!
//! The conductor, the state machines and the combat resolver never call each
//! other directly. They talk through these events, which keeps each system
//! independent and lets a headless test observe everything that happens in
//! a frame.

use bevy::prelude::*;

/// Outcome of a resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackOutcome {
    /// Landed on the defender's attack beat.
    Normal,
    /// Landed off-beat, or never engaged the defender.
    Failed,
    /// Landed on-beat and broke the defender's last point of toughness.
    Launched,
}

/// Sent by the conductor when the song crosses an integer beat boundary.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatCrossed {
    /// Number of completed beats after the crossing (1 for the first beat).
    pub beat: u64,
}

/// Sent when a moonkey commits to an attack on a zombie.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackBegan {
    pub attacker: Entity,
    pub target: Entity,
}

/// Sent when a begun attack connects.
///
/// The strike timer sends this on its own; an animation player can also
/// send it from a hit frame. Only the first one per attack is resolved.
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackLanded {
    pub attacker: Entity,
    pub target: Entity,
}

/// Sent exactly once for every attack that lands, whatever path resolution took.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AttackFinished {
    pub attacker: Entity,
    pub target: Entity,
    pub outcome: AttackOutcome,
    /// False only when a failed attack killed the attacker.
    pub attacker_survived: bool,
    /// Beat index the attack was resolved against.
    pub beat: u64,
}

/// Sent whenever a [`Health`](crate::combat::Health) value changes.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HealthChanged {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
    /// Signed change, negative for damage.
    pub delta: f32,
}

/// Request to kill a moonkey (falling out of the stage, external hazards).
#[derive(Event, Debug, Clone, Copy)]
pub struct KillMoonkey {
    pub moonkey: Entity,
}

/// Sent once per moonkey when it enters `Dying`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoonkeyKilled {
    pub moonkey: Entity,
}

/// Sent once per zombie when it enters `Launched`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZombieLaunched {
    pub zombie: Entity,
    pub by: Entity,
}

/// Ask the spawner to bring zombies into the arena right now.
#[derive(Event, Debug, Clone, Copy)]
pub struct SpawnRequest {
    pub count: u32,
}

/// Wave progression notifications.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEvent {
    Started { wave: u32, enemies: u32 },
    Cleared { wave: u32 },
}

/// Clips the animation player knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    Dance,
    Attack,
    Hit,
    Miss,
    Dash,
    Jump,
    Stagger,
    Launch,
    Die,
}

/// Fire-and-forget request for the animation player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCue {
    pub entity: Entity,
    pub clip: Clip,
}
