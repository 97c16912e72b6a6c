//! Events exchanged between the casting systems and the host game.
//!
//! The host never touches the engine directly. It listens for these events
//! to drive its HUD, sound and spell effects, and sends [`CancelCasting`]
//! when the player abandons an attempt.

use bevy::prelude::*;

use crate::gesture::{GesturePair, Handedness};
use crate::spellbook::SpellId;

/// Sent for every raw frame the engine processes.
///
/// The "current gesture" display listens to this one.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct GestureObserved {
    pub pair: GesturePair,
}

/// Sent when a hand has been missing long enough to warn the player, and
/// again when it comes back.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct HandPresenceChanged {
    pub side: Handedness,
    pub present: bool,
}

/// Sent once each time a new pair is held long enough to count.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct GestureStabilized {
    pub pair: GesturePair,
}

/// Sent when a stabilized pair joins the casting buffer.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BufferAppended {
    pub pair: GesturePair,
}

/// Sent when the buffer matched a spellbook entry.
///
/// The host's spell caster decides whether the spell can actually be paid
/// for and what it does.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SpellMatched {
    pub spell: SpellId,
}

/// Sent when an attempt ends without a spell (fizzle animation and sound).
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SpellFizzled;

/// Sent whenever the casting buffer is emptied.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct BufferCleared;

/// Sent by the host to abandon the current attempt.
#[derive(Event, Debug, Clone, Default)]
pub struct CancelCasting;

/// Sent when the ready gesture opens the tutorial gate.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ReadyGestureDetected;

/// Sent when an opponent starts gesturing a recipe.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct OpponentSpellBegan {
    pub opponent: Entity,
    pub spell: SpellId,
}

/// Sent for each pair an opponent shows.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct OpponentGestureShown {
    pub opponent: Entity,
    pub pair: GesturePair,
}

/// Sent when an opponent finishes a recipe and casts it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct OpponentSpellCast {
    pub opponent: Entity,
    pub spell: SpellId,
}
