//! Gesture Spells - headless demo.
//!
//! Runs the casting pipeline against a simulated recognizer thread that
//! replays a scripted performance with classifier noise, and logs what the
//! engine makes of it. Data is read from `assets/data/`.

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use gesture_spells::casting::{ActiveSpellBook, GestureInbox};
use gesture_spells::core::*;
use gesture_spells::gesture::{GestureLabel, HandDetection, Handedness};
use gesture_spells::opponent::Opponent;
use gesture_spells::GestureSpellsPlugin;

/// Recognizer output rate.
const RECOGNIZER_HZ: f64 = 30.0;

/// Scripted poses as (left, right, frames).
const PERFORMANCE: &[(GestureLabel, GestureLabel, u32)] = &[
    (GestureLabel::None, GestureLabel::None, 15),
    (GestureLabel::ThumbsUp, GestureLabel::ThumbsUp, 12),
    (GestureLabel::OpenPalm, GestureLabel::ClosedFist, 10),
    (GestureLabel::None, GestureLabel::PointingUp, 8),
    (GestureLabel::Victory, GestureLabel::Victory, 10),
    (GestureLabel::PointingUp, GestureLabel::PointingUp, 10),
    (GestureLabel::ILoveYou, GestureLabel::ThumbsDown, 10),
    (GestureLabel::ThumbsUp, GestureLabel::ThumbsUp, 10),
];

#[derive(Resource)]
struct PerformanceFinished(Arc<AtomicBool>);

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
        )
        .add_plugins((LogPlugin::default(), StatesPlugin))
        .add_plugins(GestureSpellsPlugin::default())
        .add_systems(PostStartup, spawn_recognizer)
        .add_systems(OnEnter(CastingState::Casting), spawn_opponent)
        .add_systems(Update, (log_outcomes, exit_when_finished))
        .run();
}

/// Simulated recognizer: reports detected hands with mirrored handedness,
/// flickering to a random label or losing a hand now and then.
fn spawn_recognizer(mut commands: Commands, inbox: Option<Res<GestureInbox>>) {
    let Some(inbox) = inbox else {
        error!("No gesture inbox, casting failed to start");
        return;
    };
    let inbox = inbox.clone();
    let finished = Arc::new(AtomicBool::new(false));
    commands.insert_resource(PerformanceFinished(finished.clone()));

    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let frame = Duration::from_secs_f64(1.0 / RECOGNIZER_HZ);

        for &(left, right, frames) in PERFORMANCE {
            for _ in 0..frames {
                let noisy = |rng: &mut rand::rngs::ThreadRng, label: GestureLabel| {
                    let roll: f32 = rng.gen();
                    if roll < 0.05 {
                        GestureLabel::None
                    } else if roll < 0.12 {
                        GestureLabel::ALL[rng.gen_range(1..GestureLabel::ALL.len())]
                    } else {
                        label
                    }
                };
                let left = noisy(&mut rng, left);
                let right = noisy(&mut rng, right);

                // Selfie camera: the player's left hand is labelled "Right".
                let mut hands = Vec::with_capacity(2);
                if left.is_hand() {
                    hands.push(HandDetection::new(left.raw_name(), Handedness::Right));
                }
                if right.is_hand() {
                    hands.push(HandDetection::new(right.raw_name(), Handedness::Left));
                }
                inbox.submit_detections(&hands);

                thread::sleep(frame);
            }
        }
        finished.store(true, Ordering::Release);
    });
}

fn spawn_opponent(mut commands: Commands, spellbook: Res<ActiveSpellBook>, existing: Query<(), With<Opponent>>) {
    if existing.is_empty() && !spellbook.0.is_empty() {
        commands.spawn(Opponent::new(spellbook.0.clone()));
    }
}

fn log_outcomes(
    mut ready: EventReader<ReadyGestureDetected>,
    mut presence: EventReader<HandPresenceChanged>,
    mut appended: EventReader<BufferAppended>,
    mut matched: EventReader<SpellMatched>,
    mut fizzled: EventReader<SpellFizzled>,
    mut opponent: EventReader<OpponentSpellCast>,
) {
    for _ in ready.read() {
        info!("Player is ready");
    }
    for event in presence.read() {
        if event.present {
            info!("{:?} hand is back", event.side);
        } else {
            warn!("{:?} hand not visible", event.side);
        }
    }
    for event in appended.read() {
        info!("Gesture {}", event.pair);
    }
    for event in matched.read() {
        info!("Player casts {}", event.spell);
    }
    for _ in fizzled.read() {
        info!("Player's spell fizzles");
    }
    for event in opponent.read() {
        info!("Opponent casts {}", event.spell);
    }
}

fn exit_when_finished(finished: Option<Res<PerformanceFinished>>, mut exit: EventWriter<AppExit>) {
    if finished.is_some_and(|f| f.0.load(Ordering::Acquire)) {
        info!("Performance over");
        exit.send(AppExit::Success);
    }
}
