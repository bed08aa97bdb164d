//! Hold-over filtering for the displayed tuning result.
//!
//! Detection drops out for a few frames whenever the player damps a string
//! or switches to the next one. Rather than flickering the readout, the
//! tracker re-emits the last valid reading for a short persistence window
//! and only then clears the display.

use std::time::{Duration, Instant};

use crate::DisplayState;
use crate::tuning::NoteMatch;

/// Default persistence window for a lost detection.
pub const DEFAULT_HOLD_WINDOW: Duration = Duration::from_millis(1000);

/// Two-state hold-over filter over per-tick pipeline results.
///
/// This is not a smoothing filter: every displayed value is some prior
/// estimator output verbatim, never an average or interpolation. State is
/// owned exclusively by the single tick call path.
#[derive(Debug)]
pub struct StabilityTracker {
    hold_window: Duration,
    held: Option<Held>,
    signal_seen: bool,
}

/// The cached last-valid triple and when it was observed.
#[derive(Debug)]
struct Held {
    frequency: f32,
    note_name: String,
    detune_cents: i32,
    valid_at: Instant,
}

impl StabilityTracker {
    pub fn new(hold_window: Duration) -> Self {
        Self {
            hold_window,
            held: None,
            signal_seen: false,
        }
    }

    /// Feeds one tick's pipeline result and returns what to display.
    ///
    /// A valid reading is shown immediately and cached. A missing reading
    /// re-emits the cache while the elapsed time since the last valid
    /// observation stays under the hold window; at or past the window the
    /// display clears completely.
    pub fn tick(&mut self, reading: Option<(f32, NoteMatch)>, now: Instant) -> DisplayState {
        match reading {
            Some((frequency, note)) => {
                self.signal_seen = true;
                self.held = Some(Held {
                    frequency,
                    note_name: note.name.clone(),
                    detune_cents: note.detune_cents,
                    valid_at: now,
                });
                DisplayState {
                    frequency: Some(frequency),
                    note_name: Some(note.name),
                    detune_cents: Some(note.detune_cents),
                    signal_seen: true,
                    last_valid_at: Some(now),
                }
            }
            None => {
                if let Some(held) = &self.held {
                    if now.duration_since(held.valid_at) < self.hold_window {
                        return DisplayState {
                            frequency: Some(held.frequency),
                            note_name: Some(held.note_name.clone()),
                            detune_cents: Some(held.detune_cents),
                            signal_seen: true,
                            last_valid_at: Some(held.valid_at),
                        };
                    }
                    self.held = None;
                }
                DisplayState {
                    frequency: None,
                    note_name: None,
                    detune_cents: None,
                    signal_seen: self.signal_seen,
                    last_valid_at: None,
                }
            }
        }
    }
}

impl Default for StabilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(frequency: f32, name: &str, detune_cents: i32) -> Option<(f32, NoteMatch)> {
        Some((
            frequency,
            NoteMatch {
                name: name.to_string(),
                frequency,
                detune_cents,
            },
        ))
    }

    #[test]
    fn valid_reading_is_shown_immediately() {
        let mut tracker = StabilityTracker::default();
        let state = tracker.tick(reading(440.0, "A", 0), Instant::now());
        assert_eq!(state.frequency, Some(440.0));
        assert_eq!(state.note_name.as_deref(), Some("A"));
        assert_eq!(state.detune_cents, Some(0));
        assert!(state.signal_seen);
    }

    #[test]
    fn dropout_inside_window_holds_last_reading() {
        let t0 = Instant::now();
        let mut tracker = StabilityTracker::default();
        let live = tracker.tick(reading(441.0, "A", 3), t0);
        let held = tracker.tick(None, t0 + Duration::from_millis(500));
        assert_eq!(held, live);
    }

    #[test]
    fn dropout_past_window_clears_display() {
        let t0 = Instant::now();
        let mut tracker = StabilityTracker::default();
        tracker.tick(reading(441.0, "A", 3), t0);
        let state = tracker.tick(None, t0 + Duration::from_millis(1500));
        assert_eq!(state.frequency, None);
        assert_eq!(state.note_name, None);
        assert_eq!(state.detune_cents, None);
        assert!(state.signal_seen, "a cleared display still remembers it had signal");
    }

    #[test]
    fn window_boundary_clears() {
        let t0 = Instant::now();
        let mut tracker = StabilityTracker::new(Duration::from_millis(1000));
        tracker.tick(reading(441.0, "A", 3), t0);
        let state = tracker.tick(None, t0 + Duration::from_millis(1000));
        assert_eq!(state.frequency, None);
    }

    #[test]
    fn no_signal_ever_stays_unseen() {
        let mut tracker = StabilityTracker::default();
        let state = tracker.tick(None, Instant::now());
        assert_eq!(state, DisplayState::empty());
    }

    #[test]
    fn new_reading_after_clear_reacquires() {
        let t0 = Instant::now();
        let mut tracker = StabilityTracker::default();
        tracker.tick(reading(441.0, "A", 3), t0);
        tracker.tick(None, t0 + Duration::from_millis(2000));
        let state = tracker.tick(reading(329.63, "E", 0), t0 + Duration::from_millis(3000));
        assert_eq!(state.note_name.as_deref(), Some("E"));
        // And the fresh reading holds through its own window.
        let held = tracker.tick(None, t0 + Duration::from_millis(3500));
        assert_eq!(held.note_name.as_deref(), Some("E"));
    }
}
