//! Core game module - states, events, configuration and observer plumbing.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod events;
mod observer;
mod plugin;
mod roster;
mod signals;
mod states;

pub use config::*;
pub use error::ConfigError;
pub use events::*;
pub use observer::{EventBus, ObservableValue, Subscription, SubscriptionSet};
pub use plugin::{CorePlugin, RhythmSet};
pub use roster::{forget_departures, register_arrivals, Roster};
pub use signals::Signals;
pub use states::*;
