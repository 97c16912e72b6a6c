//! Casting module - config, hand-off queue, debounce, accumulation, engine.

mod accumulator;
mod config;
mod debounce;
mod engine;
mod plugin;
mod queue;

pub use accumulator::{AccumulatorStep, SequenceAccumulator};
pub use config::{CastMode, CastingConfig, ConfigError, ReadyGestureConfig};
pub use debounce::{DebounceOutcome, Debouncer};
pub use engine::{CastEvent, CastingEngine};
pub use plugin::{tick_casting_engine, ActiveSpellBook, CastEventWriters, CastingPlugin, SpellSource};
pub use queue::GestureInbox;
