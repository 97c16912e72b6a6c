//! Gesture labels and the mapping from raw recognizer tokens.

use serde::Deserialize;
use std::fmt;

/// Hand pose classes produced by the recognizer.
///
/// `None` doubles as "no hand detected" and "unrecognized". It never takes
/// part in sequence matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum GestureLabel {
    #[default]
    None,
    ClosedFist,
    OpenPalm,
    PointingUp,
    ThumbsDown,
    ThumbsUp,
    Victory,
    ILoveYou,
}

impl GestureLabel {
    /// Every label, `None` first.
    pub const ALL: [GestureLabel; 8] = [
        GestureLabel::None,
        GestureLabel::ClosedFist,
        GestureLabel::OpenPalm,
        GestureLabel::PointingUp,
        GestureLabel::ThumbsDown,
        GestureLabel::ThumbsUp,
        GestureLabel::Victory,
        GestureLabel::ILoveYou,
    ];

    /// Map an exact recognizer token to a label. Unknown tokens are `None`.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "Closed_Fist" => GestureLabel::ClosedFist,
            "Open_Palm" => GestureLabel::OpenPalm,
            "Pointing_Up" => GestureLabel::PointingUp,
            "Thumb_Down" => GestureLabel::ThumbsDown,
            "Thumb_Up" => GestureLabel::ThumbsUp,
            "Victory" => GestureLabel::Victory,
            "ILoveYou" => GestureLabel::ILoveYou,
            _ => GestureLabel::None,
        }
    }

    /// The recognizer token for this label.
    pub fn raw_name(&self) -> &'static str {
        match self {
            GestureLabel::None => "None",
            GestureLabel::ClosedFist => "Closed_Fist",
            GestureLabel::OpenPalm => "Open_Palm",
            GestureLabel::PointingUp => "Pointing_Up",
            GestureLabel::ThumbsDown => "Thumb_Down",
            GestureLabel::ThumbsUp => "Thumb_Up",
            GestureLabel::Victory => "Victory",
            GestureLabel::ILoveYou => "ILoveYou",
        }
    }

    /// Whether a hand showing a known pose was seen.
    pub fn is_hand(&self) -> bool {
        !matches!(self, GestureLabel::None)
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Translate an optional raw classifier string into a label.
///
/// Total and side-effect free: missing, empty, malformed or wrongly cased
/// input all become [`GestureLabel::None`]. Classifier noise is routine, so
/// nothing here is treated as an error.
pub fn to_label(raw: Option<&str>) -> GestureLabel {
    raw.map(GestureLabel::from_raw).unwrap_or_default()
}
