//! Core plugin that sets up casting states, events, and pause handling.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Session states (Loading, Tutorial, Casting, Paused)
/// - Casting and opponent events
/// - Pause toggling
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize session states
            .init_state::<CastingState>()

            // Register casting events
            .add_event::<GestureObserved>()
            .add_event::<HandPresenceChanged>()
            .add_event::<GestureStabilized>()
            .add_event::<BufferAppended>()
            .add_event::<SpellMatched>()
            .add_event::<SpellFizzled>()
            .add_event::<BufferCleared>()
            .add_event::<CancelCasting>()
            .add_event::<ReadyGestureDetected>()

            // Register opponent events
            .add_event::<OpponentSpellBegan>()
            .add_event::<OpponentGestureShown>()
            .add_event::<OpponentSpellCast>()

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(CastingState::Casting).or(in_state(CastingState::Paused))),
            );
    }
}

/// Handle Escape key to pause/unpause casting.
fn handle_pause_input(
    keyboard: Option<Res<ButtonInput<KeyCode>>>,
    current_state: Res<State<CastingState>>,
    mut next_state: ResMut<NextState<CastingState>>,
) {
    let Some(keyboard) = keyboard else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            CastingState::Casting => next_state.set(CastingState::Paused),
            CastingState::Paused => next_state.set(CastingState::Casting),
            _ => {}
        }
    }
}
