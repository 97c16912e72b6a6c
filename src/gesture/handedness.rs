//! Routing of per-hand recognizer detections into left/right slots.
//!
//! The recognizer reports each detected hand with a gesture token and a
//! handedness label. Which slot a hand fills is decided by that label alone,
//! never by where the hand sits in the frame.

use super::label::GestureLabel;

/// Handedness as reported by the recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse the recognizer's `"Left"` / `"Right"` category name.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "Left" => Some(Handedness::Left),
            "Right" => Some(Handedness::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

/// One detected hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandDetection<'a> {
    /// Raw gesture token, e.g. `"Open_Palm"`.
    pub gesture: &'a str,
    pub handedness: Handedness,
}

impl<'a> HandDetection<'a> {
    pub fn new(gesture: &'a str, handedness: Handedness) -> Self {
        Self { gesture, handedness }
    }
}

/// Resolve detections into `(left, right)` labels.
///
/// With `mirrored` set, the camera image is a selfie view: a hand the
/// recognizer labels `Left` is the player's right hand. A slot without a
/// detection stays `None`; when two detections claim the same slot the first
/// one wins.
pub fn route_hands(detections: &[HandDetection<'_>], mirrored: bool) -> (GestureLabel, GestureLabel) {
    let mut left: Option<GestureLabel> = None;
    let mut right: Option<GestureLabel> = None;

    for detection in detections {
        let side = if mirrored {
            detection.handedness.opposite()
        } else {
            detection.handedness
        };
        let slot = match side {
            Handedness::Left => &mut left,
            Handedness::Right => &mut right,
        };
        if slot.is_none() {
            *slot = Some(GestureLabel::from_raw(detection.gesture));
        }
    }

    (left.unwrap_or_default(), right.unwrap_or_default())
}
