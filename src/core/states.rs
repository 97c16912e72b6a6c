//! Session states that decide which casting systems run.
//!
//! The session starts in `Loading` while configuration and the spellbook are
//! read, optionally passes through `Tutorial` until the player shows the
//! ready gesture, then spends its life in `Casting`. `Paused` stops the
//! pipeline while keeping all state.

use bevy::prelude::*;

/// Casting session states.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum CastingState {
    /// Loading configuration and spellbook data
    #[default]
    Loading,
    /// Waiting for both hands to show the ready gesture
    Tutorial,
    /// Gestures are turned into spells
    Casting,
    /// Pipeline frozen (overlay on gameplay)
    Paused,
}
