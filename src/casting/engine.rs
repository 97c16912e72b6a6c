//! The casting engine: queue drain, debounce, accumulate, match.

use bevy::prelude::*;
use std::sync::Arc;

use super::accumulator::{AccumulatorStep, SequenceAccumulator};
use super::config::{CastMode, CastingConfig, ConfigError};
use super::debounce::Debouncer;
use super::queue::GestureInbox;
use crate::gesture::{GesturePair, Handedness};
use crate::spellbook::{SpellBook, SpellId};

/// Everything the engine reports, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CastEvent {
    /// A raw frame was taken from the queue.
    GestureObserved(GesturePair),
    /// A hand went missing (`present == false`) or came back.
    HandPresenceChanged { side: Handedness, present: bool },
    /// A pair held long enough to count.
    GestureStabilized(GesturePair),
    /// A stabilized pair joined the buffer.
    BufferAppended(GesturePair),
    SpellMatched(SpellId),
    Fizzled,
    BufferCleared,
}

/// Single-owner casting pipeline.
///
/// Producers talk to the [`GestureInbox`] returned by [`CastingEngine::inbox`];
/// everything else happens inside [`CastingEngine::tick`] on one thread.
#[derive(Resource, Debug)]
pub struct CastingEngine {
    config: CastingConfig,
    spellbook: Arc<SpellBook>,
    inbox: GestureInbox,
    debouncer: Debouncer,
    accumulator: SequenceAccumulator,
}

impl CastingEngine {
    pub fn new(config: CastingConfig, spellbook: impl Into<Arc<SpellBook>>) -> Result<Self, ConfigError> {
        config.validate()?;
        let spellbook = spellbook.into();

        if config.cast_mode == CastMode::Manual {
            for entry in spellbook.entries() {
                if entry.sequence.contains(&config.confirm_pair) {
                    warn!(
                        "Spell '{}' uses the confirm pair {} and can never be cast in manual mode",
                        entry.spell, config.confirm_pair
                    );
                }
            }
        }

        Ok(Self {
            inbox: GestureInbox::new(config.queue_capacity, config.mirror_handedness),
            debouncer: Debouncer::new(config.required_stable_frames, config.required_no_hand_frames),
            accumulator: SequenceAccumulator::new(config.cast_mode, config.confirm_pair, config.max_buffer_len),
            spellbook,
            config,
        })
    }

    /// A producer handle onto this engine's queue.
    pub fn inbox(&self) -> GestureInbox {
        self.inbox.clone()
    }

    /// Convenience for callers that already hold the engine.
    pub fn submit_raw_gesture(&self, left: Option<&str>, right: Option<&str>) {
        self.inbox.submit_raw_gesture(left, right);
    }

    /// Drain everything queued and run it through the pipeline in order.
    pub fn tick(&mut self) -> Vec<CastEvent> {
        let mut events = Vec::new();
        for pair in self.inbox.drain() {
            self.process(pair, &mut events);
        }
        events
    }

    /// Run one frame through the pipeline, bypassing the queue.
    pub fn process(&mut self, pair: GesturePair, events: &mut Vec<CastEvent>) {
        events.push(CastEvent::GestureObserved(pair));

        let outcome = self.debouncer.observe(pair);
        events.extend(
            outcome
                .presence_changes()
                .map(|(side, present)| CastEvent::HandPresenceChanged { side, present }),
        );

        let Some(stable) = outcome.stabilized else {
            return;
        };
        events.push(CastEvent::GestureStabilized(stable));

        match self.accumulator.push(stable, &self.spellbook) {
            AccumulatorStep::Appended { overflowed } => {
                if overflowed {
                    self.report_overflow(events);
                }
                events.push(CastEvent::BufferAppended(stable));
            }
            AccumulatorStep::Matched { spell, overflowed } => {
                if overflowed {
                    self.report_overflow(events);
                }
                events.push(CastEvent::BufferAppended(stable));
                info!("Cast {}", spell);
                events.push(CastEvent::SpellMatched(spell));
                events.push(CastEvent::BufferCleared);
            }
            AccumulatorStep::ConfirmedMatch(spell) => {
                info!("Cast {}", spell);
                events.push(CastEvent::SpellMatched(spell));
                events.push(CastEvent::BufferCleared);
            }
            AccumulatorStep::ConfirmedFizzle => {
                info!("Not a valid spell, fizzled");
                events.push(CastEvent::Fizzled);
                events.push(CastEvent::BufferCleared);
            }
        }
    }

    fn report_overflow(&self, events: &mut Vec<CastEvent>) {
        debug!(
            "Gesture buffer reached its limit of {:?}, attempt fizzled",
            self.config.max_buffer_len
        );
        events.push(CastEvent::Fizzled);
        events.push(CastEvent::BufferCleared);
    }

    /// Abandon the current attempt. No cast or fizzle is reported.
    pub fn cancel(&mut self) -> CastEvent {
        self.accumulator.clear();
        self.debouncer.reset();
        debug!("Casting buffer cleared");
        CastEvent::BufferCleared
    }

    /// Same as [`CastingEngine::cancel`].
    pub fn reset(&mut self) -> CastEvent {
        self.cancel()
    }

    /// Throw away frames that are queued but not yet processed.
    pub fn discard_pending(&self) -> usize {
        self.inbox.clear()
    }

    pub fn buffer(&self) -> &[GesturePair] {
        self.accumulator.buffer()
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn config(&self) -> &CastingConfig {
        &self.config
    }

    pub fn spellbook(&self) -> &Arc<SpellBook> {
        &self.spellbook
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::GestureLabel::{self, *};
    use crate::spellbook::SpellEntry;

    fn pair(left: GestureLabel, right: GestureLabel) -> GesturePair {
        GesturePair::new(left, right)
    }

    fn book() -> SpellBook {
        SpellBook::new(
            "test",
            vec![
                SpellEntry::new(vec![pair(OpenPalm, ClosedFist)], "Fireball"),
                SpellEntry::new(vec![pair(Victory, Victory), pair(PointingUp, PointingUp)], "Lightning"),
            ],
        )
    }

    fn hold(engine: &CastingEngine, left: &str, right: &str, frames: usize) {
        for _ in 0..frames {
            engine.submit_raw_gesture(Some(left), Some(right));
        }
    }

    fn outcomes(events: &[CastEvent]) -> Vec<&CastEvent> {
        events
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    CastEvent::SpellMatched(_) | CastEvent::Fizzled | CastEvent::BufferCleared
                )
            })
            .collect()
    }

    #[test]
    fn auto_cast_from_raw_strings() {
        let mut engine = CastingEngine::new(CastingConfig::default(), book()).unwrap();
        hold(&engine, "Open_Palm", "Closed_Fist", 5);

        let events = engine.tick();
        let stabilized = events
            .iter()
            .filter(|e| matches!(e, CastEvent::GestureStabilized(_)))
            .count();
        assert_eq!(stabilized, 1);
        assert_eq!(
            outcomes(&events),
            vec![
                &CastEvent::SpellMatched(SpellId::new("Fireball")),
                &CastEvent::BufferCleared
            ]
        );
        assert!(engine.buffer().is_empty());
    }

    #[test]
    fn event_order_for_a_committed_pair() {
        let config = CastingConfig::default().with_stable_frames(1);
        let mut engine = CastingEngine::new(config, book()).unwrap();
        engine.submit_raw_gesture(Some("Victory"), Some("Victory"));

        let held = pair(Victory, Victory);
        assert_eq!(
            engine.tick(),
            vec![
                CastEvent::GestureObserved(held),
                CastEvent::GestureStabilized(held),
                CastEvent::BufferAppended(held),
            ]
        );
        assert_eq!(engine.buffer(), &[held]);
    }

    #[test]
    fn frames_spread_over_ticks_still_stabilize() {
        let mut engine = CastingEngine::new(CastingConfig::default(), book()).unwrap();
        for _ in 0..2 {
            hold(&engine, "Open_Palm", "Closed_Fist", 1);
            assert!(outcomes(&engine.tick()).is_empty());
        }
        hold(&engine, "Open_Palm", "Closed_Fist", 1);
        assert_eq!(
            outcomes(&engine.tick())[0],
            &CastEvent::SpellMatched(SpellId::new("Fireball"))
        );
    }

    #[test]
    fn manual_mode_confirm_flow() {
        let config = CastingConfig::manual(pair(ThumbsUp, ThumbsUp));
        let mut engine = CastingEngine::new(config, book()).unwrap();

        hold(&engine, "Open_Palm", "Closed_Fist", 3);
        assert!(outcomes(&engine.tick()).is_empty());
        assert_eq!(engine.buffer(), &[pair(OpenPalm, ClosedFist)]);

        hold(&engine, "Thumb_Up", "Thumb_Up", 3);
        let events = engine.tick();
        assert_eq!(
            outcomes(&events),
            vec![
                &CastEvent::SpellMatched(SpellId::new("Fireball")),
                &CastEvent::BufferCleared
            ]
        );
        assert!(!events.contains(&CastEvent::BufferAppended(pair(ThumbsUp, ThumbsUp))));
        assert!(engine.buffer().is_empty());
    }

    #[test]
    fn manual_mode_unknown_sequence_fizzles() {
        let config = CastingConfig::manual(pair(ThumbsUp, ThumbsUp));
        let mut engine = CastingEngine::new(config, book()).unwrap();

        hold(&engine, "ILoveYou", "ILoveYou", 3);
        hold(&engine, "Thumb_Up", "Thumb_Up", 3);
        assert_eq!(
            outcomes(&engine.tick()),
            vec![&CastEvent::Fizzled, &CastEvent::BufferCleared]
        );
        assert!(engine.buffer().is_empty());
    }

    #[test]
    fn cancel_clears_buffer_and_debounce_without_outcome() {
        let mut engine = CastingEngine::new(CastingConfig::default(), book()).unwrap();
        hold(&engine, "Victory", "Victory", 3);
        engine.tick();
        assert_eq!(engine.buffer().len(), 1);

        assert_eq!(engine.cancel(), CastEvent::BufferCleared);
        assert!(engine.buffer().is_empty());
        assert_eq!(engine.debouncer().stable(), Option::None);

        // The held pose needs a full fresh count again.
        hold(&engine, "Victory", "Victory", 2);
        assert!(engine.tick().iter().all(|e| !matches!(e, CastEvent::GestureStabilized(_))));
        hold(&engine, "Victory", "Victory", 1);
        assert!(engine
            .tick()
            .contains(&CastEvent::GestureStabilized(pair(Victory, Victory))));
    }

    #[test]
    fn missing_hand_is_reported_once() {
        let config = CastingConfig::default().with_no_hand_frames(2);
        let mut engine = CastingEngine::new(config, book()).unwrap();
        engine.submit_raw_gesture(Option::None, Some("Victory"));
        engine.submit_raw_gesture(Some(""), Some("Victory"));
        engine.submit_raw_gesture(Some("None"), Some("Victory"));
        engine.submit_raw_gesture(Some("Victory"), Some("Victory"));

        let presence: Vec<_> = engine
            .tick()
            .into_iter()
            .filter(|e| matches!(e, CastEvent::HandPresenceChanged { .. }))
            .collect();
        assert_eq!(
            presence,
            vec![
                CastEvent::HandPresenceChanged { side: Handedness::Left, present: false },
                CastEvent::HandPresenceChanged { side: Handedness::Left, present: true },
            ]
        );
    }

    #[test]
    fn hand_return_after_cancel_clears_the_warning() {
        let config = CastingConfig::default().with_no_hand_frames(2);
        let mut engine = CastingEngine::new(config, book()).unwrap();
        engine.submit_raw_gesture(Option::None, Some("Victory"));
        engine.submit_raw_gesture(Option::None, Some("Victory"));
        assert!(engine
            .tick()
            .contains(&CastEvent::HandPresenceChanged { side: Handedness::Left, present: false }));

        engine.cancel();
        engine.submit_raw_gesture(Some("Victory"), Some("Victory"));
        assert!(engine
            .tick()
            .contains(&CastEvent::HandPresenceChanged { side: Handedness::Left, present: true }));
    }

    #[test]
    fn buffer_limit_fizzles_old_attempt() {
        let config = CastingConfig::default().with_stable_frames(1).with_max_buffer_len(1);
        let mut engine = CastingEngine::new(config, book()).unwrap();
        engine.submit_raw_gesture(Some("ILoveYou"), Some("ILoveYou"));
        engine.submit_raw_gesture(Some("Victory"), Some("Victory"));

        let events = engine.tick();
        assert_eq!(outcomes(&events), vec![&CastEvent::Fizzled, &CastEvent::BufferCleared]);
        assert_eq!(engine.buffer(), &[pair(Victory, Victory)]);
    }

    #[test]
    fn discard_pending_drops_unprocessed_frames() {
        let mut engine = CastingEngine::new(CastingConfig::default(), book()).unwrap();
        hold(&engine, "Open_Palm", "Closed_Fist", 5);
        assert_eq!(engine.discard_pending(), 5);
        assert!(engine.tick().is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CastingConfig::default().with_stable_frames(0);
        assert!(matches!(
            CastingEngine::new(config, book()),
            Err(ConfigError::ZeroStableFrames)
        ));
    }

    #[test]
    fn inbox_handles_feed_the_engine_from_other_threads() {
        let mut engine = CastingEngine::new(CastingConfig::default(), book()).unwrap();
        let inbox = engine.inbox();
        std::thread::spawn(move || {
            for _ in 0..3 {
                inbox.submit_raw_gesture(Some("Open_Palm"), Some("Closed_Fist"));
            }
        })
        .join()
        .unwrap();

        assert!(engine
            .tick()
            .contains(&CastEvent::SpellMatched(SpellId::new("Fireball"))));
    }
}
