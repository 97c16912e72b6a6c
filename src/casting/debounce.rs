//! Stabilization of noisy per-frame classifications.
//!
//! The classifier flickers between neighbouring classes even while a pose is
//! held. A pair is only accepted once it has been seen for
//! `required_stable_frames` consecutive complete frames, and it is reported
//! once per change so a held pose is never accepted twice in a row.

use crate::gesture::{GesturePair, Handedness};

/// What one frame changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebounceOutcome {
    /// Hand presence reports that flipped this frame.
    pub presence: [Option<(Handedness, bool)>; 2],
    /// Pair committed as the new stable pair this frame.
    pub stabilized: Option<GesturePair>,
}

impl DebounceOutcome {
    pub fn presence_changes(&self) -> impl Iterator<Item = (Handedness, bool)> + '_ {
        self.presence.iter().flatten().copied()
    }
}

/// Missing-hand tracking for one side. Drives UI only.
#[derive(Debug, Clone, Copy, Default)]
struct HandTracker {
    missing_frames: u32,
    reported_missing: bool,
}

impl HandTracker {
    /// Returns the new presence report when it flips.
    fn observe(&mut self, present: bool, threshold: u32) -> Option<bool> {
        if present {
            self.missing_frames = 0;
            if self.reported_missing {
                self.reported_missing = false;
                return Some(true);
            }
        } else {
            self.missing_frames = self.missing_frames.saturating_add(1);
            if self.missing_frames >= threshold && !self.reported_missing {
                self.reported_missing = true;
                return Some(false);
            }
        }
        None
    }
}

/// Joint debounce state for both hands.
#[derive(Debug, Clone)]
pub struct Debouncer {
    required_stable_frames: u32,
    required_no_hand_frames: u32,
    pending: Option<GesturePair>,
    pending_count: u32,
    stable: Option<GesturePair>,
    left: HandTracker,
    right: HandTracker,
}

impl Debouncer {
    pub fn new(required_stable_frames: u32, required_no_hand_frames: u32) -> Self {
        Self {
            required_stable_frames: required_stable_frames.max(1),
            required_no_hand_frames: required_no_hand_frames.max(1),
            pending: None,
            pending_count: 0,
            stable: None,
            left: HandTracker::default(),
            right: HandTracker::default(),
        }
    }

    /// Feed one raw frame.
    pub fn observe(&mut self, pair: GesturePair) -> DebounceOutcome {
        let mut outcome = DebounceOutcome {
            presence: [
                self.left
                    .observe(pair.left().is_hand(), self.required_no_hand_frames)
                    .map(|present| (Handedness::Left, present)),
                self.right
                    .observe(pair.right().is_hand(), self.required_no_hand_frames)
                    .map(|present| (Handedness::Right, present)),
            ],
            stabilized: None,
        };

        // Frames with a missing hand neither advance nor break the streak.
        if !pair.is_complete() {
            return outcome;
        }

        if self.pending == Some(pair) {
            self.pending_count = self.pending_count.saturating_add(1);
        } else {
            self.pending = Some(pair);
            self.pending_count = 1;
        }

        if self.pending_count >= self.required_stable_frames && self.stable != Some(pair) {
            self.stable = Some(pair);
            outcome.stabilized = Some(pair);
        }

        outcome
    }

    /// Forget pending and stable pairs and restart the missing-hand counts.
    ///
    /// A hand already reported missing stays reported, so its return is
    /// still announced.
    pub fn reset(&mut self) {
        self.pending = None;
        self.pending_count = 0;
        self.stable = None;
        self.left.missing_frames = 0;
        self.right.missing_frames = 0;
    }

    pub fn pending(&self) -> Option<GesturePair> {
        self.pending
    }

    pub fn pending_count(&self) -> u32 {
        self.pending_count
    }

    pub fn stable(&self) -> Option<GesturePair> {
        self.stable
    }

    pub fn missing_frames(&self, side: Handedness) -> u32 {
        match side {
            Handedness::Left => self.left.missing_frames,
            Handedness::Right => self.right.missing_frames,
        }
    }
}
