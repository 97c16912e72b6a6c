//! Opponent module - scripted casters that show their recipes first.

mod plugin;
mod script;

pub use plugin::{Opponent, OpponentPlugin};
pub use script::{OpponentAction, OpponentScript};
