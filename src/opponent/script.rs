//! Scripted opponent that gestures spellbook recipes before casting them.

use bevy::prelude::*;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::gesture::GesturePair;
use crate::spellbook::{SpellBook, SpellEntry, SpellId};

/// Something the opponent did during one advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentAction {
    /// Started showing a new recipe.
    Began(SpellId),
    /// Showed the next pair of the recipe.
    ShowGesture(GesturePair),
    /// Finished the recipe. The display should be cleared.
    Cast(SpellId),
}

#[derive(Debug, Clone)]
enum Phase {
    Waiting,
    Revealing { entry: SpellEntry, next: usize },
}

/// Timer-driven opponent state machine.
///
/// Waits `pause`, picks a random recipe, shows one pair per `interval`, then
/// casts after the last pair has been on screen for a full interval.
#[derive(Debug, Clone)]
pub struct OpponentScript {
    spellbook: Arc<SpellBook>,
    pause: Duration,
    interval: Duration,
    phase: Phase,
    timer: Timer,
}

impl OpponentScript {
    pub fn new(spellbook: Arc<SpellBook>, pause: Duration, interval: Duration) -> Self {
        Self {
            spellbook,
            pause,
            interval,
            phase: Phase::Waiting,
            timer: Timer::new(pause, TimerMode::Once),
        }
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, delta: Duration, rng: &mut R) -> Vec<OpponentAction> {
        let mut actions = Vec::new();
        self.timer.tick(delta);

        match &mut self.phase {
            Phase::Waiting => {
                if !self.timer.just_finished() {
                    return actions;
                }
                // Recipes with no steps are skipped; try again after another pause.
                let Some(entry) = self
                    .spellbook
                    .random_entry(rng)
                    .filter(|e| !e.sequence.is_empty())
                    .cloned()
                else {
                    self.timer = Timer::new(self.pause, TimerMode::Once);
                    return actions;
                };

                debug!("Opponent begins {}", entry.spell);
                actions.push(OpponentAction::Began(entry.spell.clone()));
                actions.push(OpponentAction::ShowGesture(entry.sequence.steps()[0]));
                self.phase = Phase::Revealing { entry, next: 1 };
                self.timer = Timer::new(self.interval, TimerMode::Repeating);
            }
            Phase::Revealing { entry, next } => {
                let mut cast = None;
                for _ in 0..self.timer.times_finished_this_tick() {
                    if let Some(&step) = entry.sequence.steps().get(*next) {
                        actions.push(OpponentAction::ShowGesture(step));
                        *next += 1;
                    } else {
                        cast = Some(entry.spell.clone());
                        break;
                    }
                }

                if let Some(spell) = cast {
                    debug!("Opponent casts {}", spell);
                    actions.push(OpponentAction::Cast(spell));
                    self.phase = Phase::Waiting;
                    self.timer = Timer::new(self.pause, TimerMode::Once);
                }
            }
        }

        actions
    }

    /// Spell currently being shown, if any.
    pub fn current_spell(&self) -> Option<&SpellId> {
        match &self.phase {
            Phase::Revealing { entry, .. } => Some(&entry.spell),
            Phase::Waiting => None,
        }
    }
}
