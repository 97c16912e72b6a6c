//! Casting configuration, loaded once per session.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::gesture::{GestureLabel, GesturePair};

/// When the accumulated buffer is checked against the spellbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum CastMode {
    /// After every stabilized pair.
    #[default]
    Auto,
    /// Only when the confirm pair is stabilized.
    Manual,
}

/// Errors in casting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required_stable_frames must be at least 1")]
    ZeroStableFrames,

    #[error("required_no_hand_frames must be at least 1")]
    ZeroNoHandFrames,

    #[error("Manual cast mode needs a confirm pair with both hands present, got {0}")]
    ConfirmPairHasNone(GesturePair),

    #[error("max_buffer_len must be at least 1 when set")]
    ZeroBufferLimit,

    #[error("queue_capacity must be at least 1 when set")]
    ZeroQueueCapacity,

    #[error("Tutorial required_stable_frames must be at least 1")]
    ZeroTutorialFrames,

    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

fn default_stable_frames() -> u32 {
    3
}

fn default_no_hand_frames() -> u32 {
    3
}

fn default_confirm_pair() -> GesturePair {
    GesturePair::new(GestureLabel::ThumbsUp, GestureLabel::ThumbsUp)
}

fn default_mirror() -> bool {
    true
}

fn default_ready_gesture() -> GestureLabel {
    GestureLabel::ThumbsUp
}

fn default_ready_frames() -> u32 {
    5
}

/// Settings for the "both hands ready" gate shown before play.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReadyGestureConfig {
    /// Gesture both hands must hold.
    #[serde(default = "default_ready_gesture")]
    pub gesture: GestureLabel,
    /// Consecutive frames it must be held for.
    #[serde(default = "default_ready_frames")]
    pub required_stable_frames: u32,
}

impl Default for ReadyGestureConfig {
    fn default() -> Self {
        Self {
            gesture: default_ready_gesture(),
            required_stable_frames: default_ready_frames(),
        }
    }
}

/// Casting configuration, immutable for the session.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastingConfig {
    /// Identical consecutive frames before a pair is accepted.
    #[serde(default = "default_stable_frames")]
    pub required_stable_frames: u32,
    /// Consecutive frames without a hand before it is reported missing.
    #[serde(default = "default_no_hand_frames")]
    pub required_no_hand_frames: u32,
    #[serde(default)]
    pub cast_mode: CastMode,
    /// Pair that submits the buffer in manual mode.
    #[serde(default = "default_confirm_pair")]
    pub confirm_pair: GesturePair,
    /// Longest buffer allowed before the attempt fizzles (None = unbounded).
    #[serde(default)]
    pub max_buffer_len: Option<usize>,
    /// Queued raw frames kept before the oldest is dropped (None = unbounded).
    #[serde(default)]
    pub queue_capacity: Option<usize>,
    /// Camera is a selfie view, so recognizer handedness is swapped.
    #[serde(default = "default_mirror")]
    pub mirror_handedness: bool,
    /// Any key press (except Escape) cancels the current attempt.
    #[serde(default)]
    pub cancel_on_any_key: bool,
    /// Ready gate run before casting starts (None = start casting at once).
    #[serde(default)]
    pub tutorial: Option<ReadyGestureConfig>,
}

impl Default for CastingConfig {
    fn default() -> Self {
        Self {
            required_stable_frames: default_stable_frames(),
            required_no_hand_frames: default_no_hand_frames(),
            cast_mode: CastMode::Auto,
            confirm_pair: default_confirm_pair(),
            max_buffer_len: None,
            queue_capacity: None,
            mirror_handedness: default_mirror(),
            cancel_on_any_key: false,
            tutorial: None,
        }
    }
}

impl CastingConfig {
    /// Manual-mode config with the given confirm pair.
    pub fn manual(confirm_pair: GesturePair) -> Self {
        Self {
            cast_mode: CastMode::Manual,
            confirm_pair,
            ..default()
        }
    }

    pub fn with_stable_frames(mut self, frames: u32) -> Self {
        self.required_stable_frames = frames;
        self
    }

    pub fn with_no_hand_frames(mut self, frames: u32) -> Self {
        self.required_no_hand_frames = frames;
        self
    }

    pub fn with_max_buffer_len(mut self, len: usize) -> Self {
        self.max_buffer_len = Some(len);
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_stable_frames == 0 {
            return Err(ConfigError::ZeroStableFrames);
        }
        if self.required_no_hand_frames == 0 {
            return Err(ConfigError::ZeroNoHandFrames);
        }
        if self.cast_mode == CastMode::Manual && !self.confirm_pair.is_complete() {
            return Err(ConfigError::ConfirmPairHasNone(self.confirm_pair));
        }
        if self.max_buffer_len == Some(0) {
            return Err(ConfigError::ZeroBufferLimit);
        }
        if self.queue_capacity == Some(0) {
            return Err(ConfigError::ZeroQueueCapacity);
        }
        if self
            .tutorial
            .as_ref()
            .is_some_and(|t| t.required_stable_frames == 0)
        {
            return Err(ConfigError::ZeroTutorialFrames);
        }
        Ok(())
    }

    /// Parse and validate a config from RON text.
    pub fn from_ron(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let config = ron::from_str::<CastingConfig>(contents).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::from_ron(&contents, &display)
    }
}
