//! Gesture pairs and ordered gesture sequences.

use serde::Deserialize;
use std::borrow::Borrow;
use std::fmt;

use super::label::GestureLabel;

/// The left and right hand labels observed at one instant.
///
/// Equality is per side: `(A, B)` and `(B, A)` differ unless `A == B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "(GestureLabel, GestureLabel)")]
pub struct GesturePair {
    left: GestureLabel,
    right: GestureLabel,
}

impl GesturePair {
    /// Both hands absent.
    pub const EMPTY: GesturePair = GesturePair::new(GestureLabel::None, GestureLabel::None);

    pub const fn new(left: GestureLabel, right: GestureLabel) -> Self {
        Self { left, right }
    }

    pub fn left(&self) -> GestureLabel {
        self.left
    }

    pub fn right(&self) -> GestureLabel {
        self.right
    }

    /// True when both hands show a recognized pose.
    pub fn is_complete(&self) -> bool {
        self.left.is_hand() && self.right.is_hand()
    }
}

impl From<(GestureLabel, GestureLabel)> for GesturePair {
    fn from((left, right): (GestureLabel, GestureLabel)) -> Self {
        Self::new(left, right)
    }
}

impl fmt::Display for GesturePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Left:{},Right:{})", self.left, self.right)
    }
}

/// An ordered, fixed list of gesture pairs forming a spell recipe.
///
/// Two sequences are equal only if they have the same length and the same
/// pair at every index. The hash agrees with `[GesturePair]`, so a map keyed
/// by sequences can be queried with a borrowed slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct GestureSequence(Vec<GesturePair>);

impl GestureSequence {
    pub fn new(steps: impl Into<Vec<GesturePair>>) -> Self {
        Self(steps.into())
    }

    pub fn steps(&self) -> &[GesturePair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every step has both hands present. Incomplete steps can never
    /// be produced by the debouncer.
    pub fn is_castable(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(GesturePair::is_complete)
    }

    pub fn contains(&self, pair: &GesturePair) -> bool {
        self.0.contains(pair)
    }
}

impl Borrow<[GesturePair]> for GestureSequence {
    fn borrow(&self) -> &[GesturePair] {
        &self.0
    }
}

impl From<Vec<GesturePair>> for GestureSequence {
    fn from(steps: Vec<GesturePair>) -> Self {
        Self(steps)
    }
}

impl FromIterator<GesturePair> for GestureSequence {
    fn from_iter<I: IntoIterator<Item = GesturePair>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for GestureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
