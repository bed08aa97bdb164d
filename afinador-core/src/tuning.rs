//! # Musical Tuning Module
//!
//! Nearest-note resolution and detune measurement. A detected frequency is
//! matched against a reference table from the scale model, the deviation is
//! computed in cents, and the result is classified into the severity bands
//! consumers use to color and label the readout.

use crate::scale::Note;

/// Severity band edges in cents. These values are part of the output
/// contract: presentation layers key their feedback off these exact cut
/// points.
pub const TOLERANCE_PERFECT: i32 = 3;
pub const TOLERANCE_VERY_GOOD: i32 = 6;
pub const TOLERANCE_OK: i32 = 10;
pub const TOLERANCE_ALMOST_THERE: i32 = 15;

/// The nearest reference pitch for an observed frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteMatch {
    /// Label of the nearest table entry.
    pub name: String,
    /// Reference frequency of that entry, in Hz.
    pub frequency: f32,
    /// Signed distance from the reference in cents, floor-truncated.
    pub detune_cents: i32,
}

/// Calculates the deviation of `freq` from `target_freq` in cents.
///
/// 100 cents is one equal-tempered semitone, 1200 one octave. Positive
/// means sharp, negative flat.
pub fn cents_deviation(freq: f32, target_freq: f32) -> f32 {
    1200.0 * (freq / target_freq).log2()
}

/// Resolves a frequency against a reference table.
///
/// Linear scan tracking the minimum absolute frequency distance. The
/// improvement test is strict, so of two equidistant entries the first in
/// table order wins; output is deterministic for a given (frequency,
/// table) pair. The detune is floor-truncated to whole cents, matching
/// what consumers of the readout expect.
///
/// Returns `None` only for an empty table.
pub fn resolve(frequency: f32, table: &[Note]) -> Option<NoteMatch> {
    let mut best: Option<&Note> = None;
    let mut min_diff = f32::INFINITY;
    for note in table {
        let diff = (frequency - note.frequency).abs();
        if diff < min_diff {
            min_diff = diff;
            best = Some(note);
        }
    }
    let best = best?;

    let detune_cents = cents_deviation(frequency, best.frequency).floor() as i32;
    Some(NoteMatch {
        name: best.name.clone(),
        frequency: best.frequency,
        detune_cents,
    })
}

/// How far off a detune reading is, as presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    Perfect,
    VeryGood,
    Ok,
    AlmostThere,
    /// More than [`TOLERANCE_ALMOST_THERE`] cents above the reference.
    TooSharp,
    /// More than [`TOLERANCE_ALMOST_THERE`] cents below the reference.
    TooFlat,
}

impl Accuracy {
    /// Classifies a detune into its severity band.
    pub fn classify(detune_cents: i32) -> Self {
        let magnitude = detune_cents.abs();
        if magnitude <= TOLERANCE_PERFECT {
            Self::Perfect
        } else if magnitude <= TOLERANCE_VERY_GOOD {
            Self::VeryGood
        } else if magnitude <= TOLERANCE_OK {
            Self::Ok
        } else if magnitude <= TOLERANCE_ALMOST_THERE {
            Self::AlmostThere
        } else if detune_cents > 0 {
            Self::TooSharp
        } else {
            Self::TooFlat
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{Instrument, ScaleModel};

    fn table(entries: &[(&str, f32)]) -> Vec<Note> {
        entries
            .iter()
            .map(|(name, frequency)| Note {
                name: name.to_string(),
                frequency: *frequency,
            })
            .collect()
    }

    #[test]
    fn exact_reference_matches_with_zero_detune() {
        let guitar = Instrument::Guitar.open_strings();
        let m = resolve(82.41, guitar).unwrap();
        assert_eq!(m.name, "E2");
        assert_eq!(m.detune_cents, 0);
    }

    #[test]
    fn ukulele_a_string_matches_a4() {
        let mut model = ScaleModel::default();
        model.select_instrument("ukulele").unwrap();
        let m = resolve(440.0, model.open_strings()).unwrap();
        assert_eq!(m.name, "A4");
        assert_eq!(m.detune_cents, 0);
    }

    #[test]
    fn detune_sign_follows_direction() {
        let t = table(&[("A4", 440.0)]);
        assert!(resolve(443.0, &t).unwrap().detune_cents > 0);
        assert!(resolve(437.0, &t).unwrap().detune_cents < 0);
        assert_eq!(resolve(440.0, &t).unwrap().detune_cents, 0);
    }

    #[test]
    fn detune_is_floor_truncated() {
        let t = table(&[("A4", 440.0)]);
        // 443 Hz is +11.77 cents; 437 Hz is -11.84 cents. Floor truncation
        // takes both toward negative infinity.
        assert_eq!(resolve(443.0, &t).unwrap().detune_cents, 11);
        assert_eq!(resolve(437.0, &t).unwrap().detune_cents, -12);
    }

    #[test]
    fn equidistant_tie_goes_to_first_entry() {
        let t = table(&[("X", 100.0), ("Y", 200.0)]);
        assert_eq!(resolve(150.0, &t).unwrap().name, "X");
    }

    #[test]
    fn resolution_is_deterministic() {
        let model = ScaleModel::default();
        let a = resolve(196.5, model.chromatic()).unwrap();
        let b = resolve(196.5, model.chromatic()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn chromatic_resolution_uses_pitch_class_labels() {
        let model = ScaleModel::default();
        let m = resolve(440.0, model.chromatic()).unwrap();
        assert_eq!(m.name, "A");
        assert_eq!(m.detune_cents, 0);
    }

    #[test]
    fn empty_table_resolves_to_none() {
        assert_eq!(resolve(440.0, &[]), None);
    }

    #[test]
    fn severity_band_cut_points() {
        assert_eq!(Accuracy::classify(0), Accuracy::Perfect);
        assert_eq!(Accuracy::classify(3), Accuracy::Perfect);
        assert_eq!(Accuracy::classify(-3), Accuracy::Perfect);
        assert_eq!(Accuracy::classify(4), Accuracy::VeryGood);
        assert_eq!(Accuracy::classify(6), Accuracy::VeryGood);
        assert_eq!(Accuracy::classify(7), Accuracy::Ok);
        assert_eq!(Accuracy::classify(10), Accuracy::Ok);
        assert_eq!(Accuracy::classify(11), Accuracy::AlmostThere);
        assert_eq!(Accuracy::classify(15), Accuracy::AlmostThere);
        assert_eq!(Accuracy::classify(16), Accuracy::TooSharp);
        assert_eq!(Accuracy::classify(-16), Accuracy::TooFlat);
    }
}
