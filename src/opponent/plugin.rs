//! Opponent plugin - drives scripted opponents during casting.

use bevy::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use super::script::{OpponentAction, OpponentScript};
use crate::core::{CastingState, OpponentGestureShown, OpponentSpellBegan, OpponentSpellCast};
use crate::spellbook::SpellBook;

/// Component for entities that cast from a spellbook on their own.
#[derive(Component, Debug)]
pub struct Opponent {
    pub script: OpponentScript,
}

impl Opponent {
    /// Default timing: 2.5s between spells, 0.6s per gesture.
    pub fn new(spellbook: Arc<SpellBook>) -> Self {
        Self::with_timing(spellbook, Duration::from_millis(2500), Duration::from_millis(600))
    }

    pub fn with_timing(spellbook: Arc<SpellBook>, pause: Duration, interval: Duration) -> Self {
        Self {
            script: OpponentScript::new(spellbook, pause, interval),
        }
    }
}

/// Opponent plugin - advances every [`Opponent`] while casting is live.
pub struct OpponentPlugin;

impl Plugin for OpponentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, drive_opponents.run_if(in_state(CastingState::Casting)));
    }
}

fn drive_opponents(
    time: Res<Time>,
    mut query: Query<(Entity, &mut Opponent)>,
    mut began: EventWriter<OpponentSpellBegan>,
    mut shown: EventWriter<OpponentGestureShown>,
    mut cast: EventWriter<OpponentSpellCast>,
) {
    let mut rng = rand::thread_rng();

    for (entity, mut opponent) in query.iter_mut() {
        for action in opponent.script.advance(time.delta(), &mut rng) {
            match action {
                OpponentAction::Began(spell) => {
                    began.send(OpponentSpellBegan { opponent: entity, spell });
                }
                OpponentAction::ShowGesture(pair) => {
                    shown.send(OpponentGestureShown { opponent: entity, pair });
                }
                OpponentAction::Cast(spell) => {
                    info!("Opponent {:?} casts {}", entity, spell);
                    cast.send(OpponentSpellCast { opponent: entity, spell });
                }
            }
        }
    }
}
