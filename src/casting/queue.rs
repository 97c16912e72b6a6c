//! Hand-off queue between recognizer threads and the frame loop.

use bevy::prelude::*;
use crossbeam::queue::{ArrayQueue, SegQueue};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::gesture::{route_hands, to_label, GesturePair, HandDetection};

#[derive(Debug)]
enum Frames {
    Unbounded(SegQueue<GesturePair>),
    /// Fixed capacity; a push onto a full queue evicts the oldest frame.
    Bounded(ArrayQueue<GesturePair>),
}

impl Frames {
    fn pop(&self) -> Option<GesturePair> {
        match self {
            Frames::Unbounded(queue) => queue.pop(),
            Frames::Bounded(queue) => queue.pop(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Frames::Unbounded(queue) => queue.len(),
            Frames::Bounded(queue) => queue.len(),
        }
    }
}

#[derive(Debug)]
struct Shared {
    frames: Frames,
    dropped: AtomicU64,
}

/// Multi-producer, single-consumer queue of raw gesture pairs.
///
/// Cloning is cheap and every clone feeds the same queue, so a handle can be
/// moved into each recognizer callback. Producers only ever push; the frame
/// loop takes everything queued in one go.
#[derive(Resource, Debug, Clone)]
pub struct GestureInbox {
    shared: Arc<Shared>,
    mirrored: bool,
}

impl Default for GestureInbox {
    fn default() -> Self {
        Self::new(None, true)
    }
}

impl GestureInbox {
    /// `capacity` bounds the queue; when full the oldest frame is dropped.
    pub fn new(capacity: Option<usize>, mirrored: bool) -> Self {
        let frames = match capacity {
            Some(capacity) => Frames::Bounded(ArrayQueue::new(capacity.max(1))),
            None => Frames::Unbounded(SegQueue::new()),
        };
        Self {
            shared: Arc::new(Shared {
                frames,
                dropped: AtomicU64::new(0),
            }),
            mirrored,
        }
    }

    /// Queue one classification from the recognizer. Never blocks on the
    /// consumer and never fails: unknown tokens become `None`.
    pub fn submit_raw_gesture(&self, left: Option<&str>, right: Option<&str>) {
        self.submit(GesturePair::new(to_label(left), to_label(right)));
    }

    /// Queue the hands of one recognizer result, routed by handedness.
    pub fn submit_detections(&self, detections: &[HandDetection<'_>]) {
        let (left, right) = route_hands(detections, self.mirrored);
        self.submit(GesturePair::new(left, right));
    }

    /// Queue an already-mapped pair.
    pub fn submit(&self, pair: GesturePair) {
        match &self.shared.frames {
            Frames::Unbounded(queue) => queue.push(pair),
            Frames::Bounded(queue) => {
                if queue.force_push(pair).is_some() {
                    self.shared.dropped.fetch_add(1, Ordering::Relaxed);
                    debug!("Gesture queue full ({}), dropped oldest frame", queue.capacity());
                }
            }
        }
    }

    /// Take the frames queued so far, in arrival order.
    ///
    /// Frames pushed while draining are left for the next call.
    pub fn drain(&self) -> VecDeque<GesturePair> {
        let frames = &self.shared.frames;
        (0..frames.len()).map_while(|_| frames.pop()).collect()
    }

    /// Discard everything queued.
    pub fn clear(&self) -> usize {
        self.drain().len()
    }

    pub fn len(&self) -> usize {
        self.shared.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frames dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.shared.dropped.load(Ordering::Relaxed)
    }
}
