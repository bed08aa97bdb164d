//! One tuner session: configuration, active scale, and hold-over state,
//! driven a frame at a time.

use std::time::Instant;

use crate::config::TunerConfig;
use crate::scale::{Instrument, ScaleError, ScaleModel};
use crate::stability::StabilityTracker;
use crate::{DisplayState, pitch, tuning};

/// Which reference table detections are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Match against the full chromatic table.
    #[default]
    Chromatic,
    /// Match against the active instrument's open strings only.
    OpenStrings,
}

/// A complete detection pipeline with its per-session state.
///
/// Owns the scale model and the tracker so callers hold no globals; the
/// single `process_frame` call path is the only writer, so no locking is
/// needed. Fully headless and testable with synthetic frames.
#[derive(Debug)]
pub struct TunerSession {
    config: TunerConfig,
    scale: ScaleModel,
    tracker: StabilityTracker,
    mode: ResolveMode,
}

impl TunerSession {
    pub fn new(config: TunerConfig, instrument: Instrument, mode: ResolveMode) -> Self {
        let tracker = StabilityTracker::new(config.hold_window());
        Self {
            config,
            scale: ScaleModel::new(instrument),
            tracker,
            mode,
        }
    }

    pub fn scale(&self) -> &ScaleModel {
        &self.scale
    }

    /// Swaps the active instrument; unknown identifiers keep the current
    /// one and surface the error.
    pub fn select_instrument(&mut self, name: &str) -> Result<Instrument, ScaleError> {
        self.scale.select_instrument(name)
    }

    /// Runs one full estimate -> resolve -> track pass over a frame.
    pub fn process_frame(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
        now: Instant,
    ) -> DisplayState {
        let estimate =
            pitch::detect_pitch_autocorrelation(samples, sample_rate, self.config.silence_threshold);

        let reading = estimate.and_then(|frequency| {
            let table = match self.mode {
                ResolveMode::Chromatic => self.scale.chromatic(),
                ResolveMode::OpenStrings => self.scale.open_strings(),
            };
            tuning::resolve(frequency, table).map(|note| (frequency, note))
        });

        if let Some((frequency, note)) = &reading {
            tracing::debug!(
                frequency = *frequency,
                note = %note.name,
                cents = note.detune_cents,
                "pitch detected"
            );
        }

        self.tracker.tick(reading, now)
    }
}

impl Default for TunerSession {
    fn default() -> Self {
        Self::new(
            TunerConfig::default(),
            Instrument::Guitar,
            ResolveMode::Chromatic,
        )
    }
}
