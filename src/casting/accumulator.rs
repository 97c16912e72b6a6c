//! Accumulation of stabilized pairs and spellbook matching.

use crate::gesture::GesturePair;
use crate::spellbook::{SpellBook, SpellId};

use super::config::CastMode;

/// Result of feeding one stabilized pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorStep {
    /// The pair was appended and nothing was cast. `overflowed` means the
    /// buffer was full, so the previous attempt was dropped and this pair
    /// started a new one.
    Appended { overflowed: bool },
    /// The pair was appended and completed a spell.
    Matched { spell: SpellId, overflowed: bool },
    /// The manual confirm pair submitted a matching buffer.
    ConfirmedMatch(SpellId),
    /// The manual confirm pair submitted a buffer that matches nothing.
    ConfirmedFizzle,
}

/// Buffer of stabilized pairs for the current casting attempt.
#[derive(Debug, Clone)]
pub struct SequenceAccumulator {
    mode: CastMode,
    confirm_pair: GesturePair,
    max_len: Option<usize>,
    buffer: Vec<GesturePair>,
}

impl SequenceAccumulator {
    pub fn new(mode: CastMode, confirm_pair: GesturePair, max_len: Option<usize>) -> Self {
        Self {
            mode,
            confirm_pair,
            max_len,
            buffer: Vec::new(),
        }
    }

    /// Feed a newly stabilized pair. The buffer is cleared after any match or
    /// fizzle.
    pub fn push(&mut self, pair: GesturePair, book: &SpellBook) -> AccumulatorStep {
        if self.mode == CastMode::Manual && pair == self.confirm_pair {
            let step = match book.try_match(&self.buffer) {
                Some(spell) => AccumulatorStep::ConfirmedMatch(spell.clone()),
                None => AccumulatorStep::ConfirmedFizzle,
            };
            self.buffer.clear();
            return step;
        }

        let overflowed = self.max_len.is_some_and(|max| self.buffer.len() >= max);
        if overflowed {
            self.buffer.clear();
        }
        self.buffer.push(pair);

        if self.mode == CastMode::Auto {
            if let Some(spell) = book.try_match(&self.buffer) {
                let spell = spell.clone();
                self.buffer.clear();
                return AccumulatorStep::Matched { spell, overflowed };
            }
        }

        AccumulatorStep::Appended { overflowed }
    }

    /// Drop the current attempt.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &[GesturePair] {
        &self.buffer
    }

    pub fn mode(&self) -> CastMode {
        self.mode
    }

    pub fn confirm_pair(&self) -> GesturePair {
        self.confirm_pair
    }
}
