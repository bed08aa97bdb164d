// afinador-core/src/lib.rs

//! The core logic for the instrument tuner.
//! This crate owns the detection pipeline: signal gating and pitch
//! estimation, nearest-note resolution against the reference scales, and
//! the hold-over policy that stabilizes the displayed result. It is
//! completely headless and contains no terminal or GUI code.

pub mod audio;
pub mod config;
pub mod pitch;
pub mod scale;
pub mod session;
pub mod stability;
pub mod tuning;

use std::time::Instant;

use serde::Serialize;

/// What the presentation layer shows after one tuner tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayState {
    /// The detected (or held) frequency in Hz. Consumers format this to
    /// two decimals.
    pub frequency: Option<f32>,
    /// Label of the nearest reference note.
    pub note_name: Option<String>,
    /// Signed distance from that note in cents, floor-truncated.
    pub detune_cents: Option<i32>,
    /// False until the first valid detection; tells "no signal yet" apart
    /// from a reading that was held and then cleared.
    pub signal_seen: bool,
    /// When the reading being shown was actually observed. `None` once
    /// the display has cleared (or before any signal). Not serialized;
    /// it only anchors the hold-over policy.
    #[serde(skip)]
    pub last_valid_at: Option<Instant>,
}

impl DisplayState {
    /// The all-cleared state shown before any signal has arrived.
    pub fn empty() -> Self {
        Self {
            frequency: None,
            note_name: None,
            detune_cents: None,
            signal_seen: false,
            last_valid_at: None,
        }
    }
}
