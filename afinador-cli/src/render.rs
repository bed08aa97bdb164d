//! Terminal presentation of the per-tick display state.
//!
//! Consumes [`DisplayState`] read-only: a cent meter, the note label, the
//! frequency to two decimals, and the severity wording keyed off the
//! core's tolerance bands.

use afinador_core::DisplayState;
use afinador_core::tuning::Accuracy;

/// Cents swept by the meter, mirroring a +/-50 needle dial.
const METER_RANGE: i32 = 50;
/// Meter cell count; odd so the in-tune mark sits dead center.
const METER_WIDTH: usize = 21;

/// Formats one status line for the current tick.
pub fn format_state(state: &DisplayState) -> String {
    match (state.frequency, &state.note_name, state.detune_cents) {
        (Some(frequency), Some(note), Some(cents)) => format!(
            "{} {:>2}  {:7.2} Hz  {:+4} cents  {}",
            meter(Some(cents)),
            note,
            frequency,
            cents,
            verdict(cents),
        ),
        _ if state.signal_seen => format!("{}  listening...", meter(None)),
        _ => format!("{}  play a string", meter(None)),
    }
}

/// ASCII needle positioned within [-METER_RANGE, +METER_RANGE] cents.
fn meter(cents: Option<i32>) -> String {
    let mut cells = vec!['-'; METER_WIDTH];
    cells[METER_WIDTH / 2] = '|';
    if let Some(cents) = cents {
        let clamped = cents.clamp(-METER_RANGE, METER_RANGE);
        let pos = ((clamped + METER_RANGE) as usize * (METER_WIDTH - 1)) / (2 * METER_RANGE as usize);
        cells[pos] = '*';
    }
    format!("[{}]", cells.into_iter().collect::<String>())
}

/// Player-facing wording for each severity band.
fn verdict(cents: i32) -> &'static str {
    match Accuracy::classify(cents) {
        Accuracy::Perfect => "in tune",
        Accuracy::VeryGood => "very good",
        Accuracy::Ok => "ok",
        Accuracy::AlmostThere => "almost there",
        Accuracy::TooSharp => "too sharp",
        Accuracy::TooFlat => "too flat",
    }
}
