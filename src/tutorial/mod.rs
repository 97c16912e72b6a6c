//! Tutorial module - the "both hands ready" gate before casting.

mod plugin;
mod ready;

pub use plugin::{TutorialGate, TutorialPlugin};
pub use ready::ReadyGestureDetector;
