//! Gesture module - labels, pairs, sequences, and hand routing.

mod handedness;
mod label;
mod pair;

pub use handedness::{route_hands, HandDetection, Handedness};
pub use label::{to_label, GestureLabel};
pub use pair::{GesturePair, GestureSequence};
