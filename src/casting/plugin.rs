//! Casting plugin - loads the session and runs the engine once per frame.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use super::config::{CastingConfig, ConfigError};
use super::engine::{CastEvent, CastingEngine};
use super::queue::GestureInbox;
use crate::core::*;
use crate::spellbook::{load_spellbook, SpellBook};

/// Where the session's configuration and spellbook come from.
#[derive(Debug, Clone)]
pub enum SpellSource {
    /// RON files on disk.
    Files { config: PathBuf, spellbook: PathBuf },
    /// Already-built values.
    Inline { config: CastingConfig, spellbook: SpellBook },
}

impl Default for SpellSource {
    fn default() -> Self {
        Self::Files {
            config: PathBuf::from("assets/data/casting.ron"),
            spellbook: PathBuf::from("assets/data/spellbooks/player.ron"),
        }
    }
}

#[derive(Resource, Debug, Clone)]
struct PendingSource(SpellSource);

/// The spellbook the player's engine matches against.
#[derive(Resource, Debug, Clone)]
pub struct ActiveSpellBook(pub Arc<SpellBook>);

/// Casting plugin - builds the engine at startup and ticks it in `Casting`.
#[derive(Default)]
pub struct CastingPlugin {
    pub source: SpellSource,
}

impl Plugin for CastingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PendingSource(self.source.clone()))
            .add_systems(Startup, setup_casting)
            .add_systems(
                Update,
                (
                    tick_casting_engine.run_if(in_state(CastingState::Casting)),
                    handle_cancel.run_if(resource_exists::<CastingEngine>),
                )
                    .chain(),
            )
            .add_systems(OnExit(CastingState::Paused), discard_paused_frames);
    }
}

/// Writers for every event the engine can produce.
#[derive(SystemParam)]
pub struct CastEventWriters<'w> {
    observed: EventWriter<'w, GestureObserved>,
    presence: EventWriter<'w, HandPresenceChanged>,
    stabilized: EventWriter<'w, GestureStabilized>,
    appended: EventWriter<'w, BufferAppended>,
    matched: EventWriter<'w, SpellMatched>,
    fizzled: EventWriter<'w, SpellFizzled>,
    cleared: EventWriter<'w, BufferCleared>,
}

impl CastEventWriters<'_> {
    fn send(&mut self, event: CastEvent) {
        match event {
            CastEvent::GestureObserved(pair) => {
                self.observed.send(GestureObserved { pair });
            }
            CastEvent::HandPresenceChanged { side, present } => {
                self.presence.send(HandPresenceChanged { side, present });
            }
            CastEvent::GestureStabilized(pair) => {
                self.stabilized.send(GestureStabilized { pair });
            }
            CastEvent::BufferAppended(pair) => {
                self.appended.send(BufferAppended { pair });
            }
            CastEvent::SpellMatched(spell) => {
                self.matched.send(SpellMatched { spell });
            }
            CastEvent::Fizzled => {
                self.fizzled.send(SpellFizzled);
            }
            CastEvent::BufferCleared => {
                self.cleared.send(BufferCleared);
            }
        }
    }
}

fn resolve_config(source: &SpellSource) -> CastingConfig {
    match source {
        SpellSource::Inline { config, .. } => config.clone(),
        SpellSource::Files { config, .. } => match CastingConfig::load(config) {
            Ok(config) => {
                info!("Loaded casting config");
                config
            }
            Err(ConfigError::FileNotFound(path)) => {
                warn!("Casting config not found at {}, using defaults", path);
                CastingConfig::default()
            }
            Err(e) => {
                error!("Failed to load casting config: {}", e);
                CastingConfig::default()
            }
        },
    }
}

fn resolve_spellbook(source: &SpellSource) -> SpellBook {
    match source {
        SpellSource::Inline { spellbook, .. } => spellbook.clone(),
        SpellSource::Files { spellbook, .. } => load_spellbook(spellbook).unwrap_or_else(|e| {
            error!("Failed to load spellbook: {}", e);
            SpellBook::default()
        }),
    }
}

/// Build the engine from the configured source and move on to the first
/// playable state.
fn setup_casting(
    mut commands: Commands,
    source: Res<PendingSource>,
    mut next_state: ResMut<NextState<CastingState>>,
) {
    let spellbook = Arc::new(resolve_spellbook(&source.0));
    let engine = match CastingEngine::new(resolve_config(&source.0), spellbook.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Invalid casting config ({}), using defaults", e);
            match CastingEngine::new(CastingConfig::default(), spellbook.clone()) {
                Ok(engine) => engine,
                Err(e) => {
                    error!("Default casting config rejected: {}", e);
                    return;
                }
            }
        }
    };

    let config = engine.config().clone();
    info!(
        "Casting ready: {:?} mode, {} spells, {} stable frames",
        config.cast_mode,
        spellbook.len(),
        config.required_stable_frames
    );

    next_state.set(if config.tutorial.is_some() {
        CastingState::Tutorial
    } else {
        CastingState::Casting
    });

    commands.insert_resource(engine.inbox());
    commands.insert_resource(ActiveSpellBook(spellbook));
    commands.insert_resource(config);
    commands.insert_resource(engine);
    commands.remove_resource::<PendingSource>();
}

/// Drain the gesture queue and forward what the engine reports.
pub fn tick_casting_engine(mut engine: ResMut<CastingEngine>, mut writers: CastEventWriters) {
    for event in engine.tick() {
        writers.send(event);
    }
}

/// Cancel the current attempt on request or, if configured, on any key.
///
/// `CancelCasting` is honoured in every state; the any-key shortcut only
/// while casting.
fn handle_cancel(
    mut cancels: EventReader<CancelCasting>,
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<State<CastingState>>,
    mut engine: ResMut<CastingEngine>,
    mut writers: CastEventWriters,
) {
    let requested = cancels.read().count() > 0;
    let key_pressed = *state.get() == CastingState::Casting
        && engine.config().cancel_on_any_key
        && keyboard.is_some_and(|k| k.get_just_pressed().any(|key| *key != KeyCode::Escape));

    if requested || key_pressed {
        info!("Casting buffer cleared");
        let event = engine.cancel();
        writers.send(event);
    }
}

/// Frames recognized while paused are stale.
fn discard_paused_frames(engine: Option<Res<CastingEngine>>) {
    if let Some(engine) = engine {
        let dropped = engine.discard_pending();
        if dropped > 0 {
            debug!("Discarded {} gesture frames queued during pause", dropped);
        }
    }
}
