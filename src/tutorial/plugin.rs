//! Tutorial plugin - holds the session in `Tutorial` until the ready gesture.

use bevy::prelude::*;

use super::ready::ReadyGestureDetector;
use crate::casting::{CastingConfig, GestureInbox};
use crate::core::{CastingState, ReadyGestureDetected};

/// The ready gate for the current session.
#[derive(Resource, Debug)]
pub struct TutorialGate(pub ReadyGestureDetector);

/// Tutorial plugin - runs the ready gate before casting begins.
pub struct TutorialPlugin;

impl Plugin for TutorialPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(CastingState::Tutorial), setup_tutorial_gate)
            .add_systems(Update, run_tutorial_gate.run_if(in_state(CastingState::Tutorial)))
            .add_systems(OnExit(CastingState::Tutorial), cleanup_tutorial_gate);
    }
}

fn setup_tutorial_gate(mut commands: Commands, config: Res<CastingConfig>) {
    let ready = config.tutorial.clone().unwrap_or_default();
    info!("Show {} with both hands to begin", ready.gesture);
    commands.insert_resource(TutorialGate(ReadyGestureDetector::new(&ready)));
}

/// Feed queued frames to the gate; the rest of the queue is dropped once it
/// opens.
fn run_tutorial_gate(
    inbox: Res<GestureInbox>,
    mut gate: ResMut<TutorialGate>,
    mut ready: EventWriter<ReadyGestureDetected>,
    mut next_state: ResMut<NextState<CastingState>>,
) {
    for pair in inbox.drain() {
        if gate.0.observe(pair) {
            info!("Ready gesture detected, casting enabled");
            ready.send(ReadyGestureDetected);
            next_state.set(CastingState::Casting);
            break;
        }
    }
}

fn cleanup_tutorial_gate(mut commands: Commands) {
    commands.remove_resource::<TutorialGate>();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casting::ReadyGestureConfig;
    use crate::gesture::GestureLabel;
    use crate::spellbook::SpellBook;
    use crate::GestureSpellsPlugin;
    use bevy::state::app::StatesPlugin;

    fn app() -> App {
        let config = CastingConfig {
            tutorial: Some(ReadyGestureConfig {
                gesture: GestureLabel::ThumbsUp,
                required_stable_frames: 2,
            }),
            ..default()
        };
        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            StatesPlugin,
            GestureSpellsPlugin::inline(config, SpellBook::default()),
        ));
        app.update();
        app
    }

    fn state(app: &App) -> CastingState {
        *app.world().resource::<State<CastingState>>().get()
    }

    #[test]
    fn session_waits_in_tutorial() {
        let mut app = app();
        assert_eq!(state(&app), CastingState::Tutorial);
        assert!(app.world().contains_resource::<TutorialGate>());

        let inbox = app.world().resource::<GestureInbox>().clone();
        inbox.submit_raw_gesture(Some("Thumb_Up"), Some("Victory"));
        inbox.submit_raw_gesture(Some("Thumb_Up"), Some("Victory"));
        app.update();
        assert_eq!(state(&app), CastingState::Tutorial);
    }

    #[test]
    fn ready_gesture_moves_to_casting() {
        let mut app = app();
        let inbox = app.world().resource::<GestureInbox>().clone();
        for _ in 0..4 {
            inbox.submit_raw_gesture(Some("Thumb_Up"), Some("Thumb_Up"));
        }
        app.update();
        app.update();

        assert_eq!(state(&app), CastingState::Casting);
        assert!(!app.world().contains_resource::<TutorialGate>());
        assert!(inbox.is_empty());
    }
}
