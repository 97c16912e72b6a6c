//! "Both hands ready" gate shown before casting begins.

use crate::casting::ReadyGestureConfig;
use crate::gesture::{GestureLabel, GesturePair};

/// Fires once when both hands hold the configured gesture long enough.
///
/// Unlike the casting debouncer, a frame with a missing hand breaks the
/// streak here.
#[derive(Debug, Clone)]
pub struct ReadyGestureDetector {
    gesture: GestureLabel,
    required_stable_frames: u32,
    pending: Option<GesturePair>,
    count: u32,
    triggered: bool,
}

impl ReadyGestureDetector {
    pub fn new(config: &ReadyGestureConfig) -> Self {
        Self {
            gesture: config.gesture,
            required_stable_frames: config.required_stable_frames.max(1),
            pending: None,
            count: 0,
            triggered: false,
        }
    }

    /// Feed one frame. Returns true on the frame the gate opens.
    pub fn observe(&mut self, pair: GesturePair) -> bool {
        if self.triggered {
            return false;
        }

        if !pair.is_complete() {
            self.pending = None;
            self.count = 0;
            return false;
        }

        if self.pending == Some(pair) {
            self.count = self.count.saturating_add(1);
        } else {
            self.pending = Some(pair);
            self.count = 1;
        }

        let ready = pair == GesturePair::new(self.gesture, self.gesture);
        if ready && self.count >= self.required_stable_frames {
            self.triggered = true;
            return true;
        }
        false
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Arm the gate again.
    pub fn reset(&mut self) {
        self.pending = None;
        self.count = 0;
        self.triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureLabel::*;

    fn thumbs() -> GesturePair {
        GesturePair::new(ThumbsUp, ThumbsUp)
    }

    fn detector(frames: u32) -> ReadyGestureDetector {
        ReadyGestureDetector::new(&ReadyGestureConfig {
            gesture: ThumbsUp,
            required_stable_frames: frames,
        })
    }

    #[test]
    fn fires_after_required_frames() {
        let mut gate = detector(5);
        let fired: Vec<_> = (0..5).map(|_| gate.observe(thumbs())).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert!(gate.is_triggered());
    }

    #[test]
    fn fires_only_once() {
        let mut gate = detector(2);
        gate.observe(thumbs());
        assert!(gate.observe(thumbs()));
        assert!(!gate.observe(thumbs()));
        assert!(!gate.observe(thumbs()));
    }

    #[test]
    fn missing_hand_breaks_the_streak() {
        let mut gate = detector(3);
        gate.observe(thumbs());
        gate.observe(thumbs());
        assert!(!gate.observe(GesturePair::new(ThumbsUp, None)));
        assert!(!gate.observe(thumbs()));
        assert!(!gate.observe(thumbs()));
        assert!(gate.observe(thumbs()));
    }

    #[test]
    fn other_poses_never_open_the_gate() {
        let mut gate = detector(1);
        assert!(!gate.observe(GesturePair::new(ThumbsUp, Victory)));
        assert!(!gate.observe(GesturePair::new(Victory, Victory)));
        assert!(gate.observe(thumbs()));
    }

    #[test]
    fn reset_rearms() {
        let mut gate = detector(1);
        assert!(gate.observe(thumbs()));
        gate.reset();
        assert!(!gate.is_triggered());
        assert!(gate.observe(thumbs()));
    }
}
