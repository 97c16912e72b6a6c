//! Gesture Spells - two-handed gesture spellcasting for Bevy games.
//!
//! A hand-gesture recognizer reports a `(left, right)` label pair for every
//! camera frame. This crate debounces that noisy stream into discrete
//! gesture pairs, collects them into a sequence, and matches the sequence
//! against a spellbook.
//!
//! # Architecture
//!
//! The matching logic is plain Rust with no engine types in its signatures;
//! thin Bevy plugins run it once per frame and translate its output into
//! events:
//!
//! - **Gesture**: labels, pairs, sequences, handedness routing
//! - **Spellbook**: the sequence-to-spell dictionary and its RON files
//! - **Casting**: config, hand-off queue, debouncer, accumulator, engine
//! - **Core**: session states and the events the host listens to
//! - **Tutorial**: the "both hands ready" gate
//! - **Opponent**: scripted casters that gesture their recipes
//!
//! Recognizer threads only ever touch a [`casting::GestureInbox`]; all other
//! state is owned by the frame loop.

pub mod casting;
pub mod core;
pub mod gesture;
pub mod opponent;
pub mod spellbook;
pub mod tutorial;

use bevy::prelude::*;

use casting::{CastingConfig, CastingPlugin, SpellSource};
use spellbook::SpellBook;

/// Main plugin that adds all sub-plugins.
#[derive(Default)]
pub struct GestureSpellsPlugin {
    pub source: SpellSource,
}

impl GestureSpellsPlugin {
    /// Load config and spellbook from the given RON files.
    pub fn from_files(config: impl Into<std::path::PathBuf>, spellbook: impl Into<std::path::PathBuf>) -> Self {
        Self {
            source: SpellSource::Files {
                config: config.into(),
                spellbook: spellbook.into(),
            },
        }
    }

    /// Use an already-built config and spellbook.
    pub fn inline(config: CastingConfig, spellbook: SpellBook) -> Self {
        Self {
            source: SpellSource::Inline { config, spellbook },
        }
    }
}

impl Plugin for GestureSpellsPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core states and events (must be first)
            .add_plugins(core::CorePlugin)

            // Player casting pipeline
            .add_plugins(CastingPlugin {
                source: self.source.clone(),
            })

            // Ready gate
            .add_plugins(tutorial::TutorialPlugin)

            // Scripted opponents
            .add_plugins(opponent::OpponentPlugin);
    }
}
