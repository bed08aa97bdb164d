//! # Scale Model Module
//!
//! Reference frequency tables for note matching: per-instrument open-string
//! sets and a chromatic equal-temperament table spanning the audible range.
//! Tables are computed once at startup and never mutated; instrument
//! selection swaps which named set is active as a whole unit.

use once_cell::sync::Lazy;

/// Lower edge of the audible range covered by the chromatic table, in Hz.
pub const AUDIBLE_MIN_HZ: f32 = 20.0;
/// Upper edge of the audible range covered by the chromatic table, in Hz.
pub const AUDIBLE_MAX_HZ: f32 = 20_000.0;

/// A single reference pitch: a label and its frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Note label. Octave-suffixed in the named sets ("E2"), bare pitch
    /// class in the chromatic table ("E").
    pub name: String,
    /// Frequency in Hz
    pub frequency: f32,
}

impl Note {
    fn new(name: &str, frequency: f32) -> Self {
        Self {
            name: name.to_string(),
            frequency,
        }
    }
}

/// Instruments with a built-in open-string set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Guitar,
    Ukulele,
}

impl Instrument {
    /// Every supported instrument, in selection-menu order.
    pub const ALL: [Instrument; 2] = [Instrument::Guitar, Instrument::Ukulele];

    /// Parses an instrument from its selection identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "guitar" => Some(Self::Guitar),
            "ukulele" => Some(Self::Ukulele),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Guitar => "guitar",
            Self::Ukulele => "ukulele",
        }
    }

    /// String names low to high, for display alongside the tuner readout.
    pub fn string_summary(&self) -> &'static str {
        match self {
            Self::Guitar => "E A D G B E",
            Self::Ukulele => "G C E A",
        }
    }

    /// Open-string reference set for this instrument.
    pub fn open_strings(&self) -> &'static [Note] {
        match self {
            Self::Guitar => GUITAR_STRINGS.as_slice(),
            Self::Ukulele => UKULELE_STRINGS.as_slice(),
        }
    }
}

/// Standard-tuning guitar open strings.
static GUITAR_STRINGS: Lazy<Vec<Note>> = Lazy::new(|| {
    vec![
        Note::new("E2", 82.41),
        Note::new("A2", 110.00),
        Note::new("D3", 146.83),
        Note::new("G3", 196.00),
        Note::new("B3", 246.94),
        Note::new("E4", 329.63),
    ]
});

/// Standard (re-entrant) ukulele open strings.
static UKULELE_STRINGS: Lazy<Vec<Note>> = Lazy::new(|| {
    vec![
        Note::new("G4", 392.00),
        Note::new("C4", 261.63),
        Note::new("E4", 329.63),
        Note::new("A4", 440.00),
    ]
});

/// Chromatic pitch classes in table order, C first.
const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// The full chromatic table: 12 pitch classes expanded across octaves 0-8
/// with equal-temperament frequencies (A4 = 440 Hz), filtered to the
/// audible range. Built once at first use.
static CHROMATIC: Lazy<Vec<Note>> = Lazy::new(|| {
    let mut notes = Vec::new();
    for octave in 0..=8u32 {
        for (class, name) in PITCH_CLASSES.iter().enumerate() {
            // A4 sits 57 semitones above C0 in this layout, so the
            // equal-temperament formula is f = 440 * 2^((n - 57) / 12).
            let semitones = (octave * 12 + class as u32) as f32 - 57.0;
            let frequency = 440.0 * 2.0_f32.powf(semitones / 12.0);
            if (AUDIBLE_MIN_HZ..=AUDIBLE_MAX_HZ).contains(&frequency) {
                notes.push(Note {
                    name: (*name).to_string(),
                    frequency,
                });
            }
        }
    }
    notes
});

/// Errors raised by scale selection.
#[derive(Debug, thiserror::Error)]
pub enum ScaleError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
}

/// Owns the active instrument selection and hands out reference tables.
///
/// One instance belongs to the tuner session; callers pass the table they
/// want into the resolver rather than reading shared globals.
#[derive(Debug, Clone)]
pub struct ScaleModel {
    instrument: Instrument,
}

impl Default for ScaleModel {
    fn default() -> Self {
        Self::new(Instrument::Guitar)
    }
}

impl ScaleModel {
    pub fn new(instrument: Instrument) -> Self {
        Self { instrument }
    }

    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    /// Swaps the active named set by selection identifier.
    ///
    /// An unknown identifier is a configuration error: the current
    /// selection stays in place and the caller gets the error back.
    pub fn select_instrument(&mut self, name: &str) -> Result<Instrument, ScaleError> {
        match Instrument::from_name(name) {
            Some(instrument) => {
                self.instrument = instrument;
                Ok(instrument)
            }
            None => Err(ScaleError::UnknownInstrument(name.to_string())),
        }
    }

    /// The active instrument's open-string set.
    pub fn open_strings(&self) -> &'static [Note] {
        self.instrument.open_strings()
    }

    /// The shared chromatic table.
    pub fn chromatic(&self) -> &'static [Note] {
        CHROMATIC.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chromatic_contains_a440() {
        let a4 = CHROMATIC
            .iter()
            .find(|n| (n.frequency - 440.0).abs() < 0.01)
            .expect("table must contain an entry at 440 Hz");
        assert_eq!(a4.name, "A");
    }

    #[test]
    fn chromatic_stays_in_audible_range() {
        assert!(!CHROMATIC.is_empty());
        for note in CHROMATIC.iter() {
            assert!(
                (AUDIBLE_MIN_HZ..=AUDIBLE_MAX_HZ).contains(&note.frequency),
                "{} at {} Hz escapes the audible range",
                note.name,
                note.frequency
            );
        }
    }

    #[test]
    fn chromatic_drops_subsonic_octave_zero_entries() {
        // C0 (16.35 Hz) through D#0 (19.45 Hz) fall under 20 Hz; E0
        // (20.60 Hz) is the first entry that survives the filter.
        let lowest = &CHROMATIC[0];
        assert_eq!(lowest.name, "E");
        assert!((lowest.frequency - 20.60).abs() < 0.01);
    }

    #[test]
    fn named_sets_match_reference_frequencies() {
        let guitar = Instrument::Guitar.open_strings();
        assert_eq!(guitar.len(), 6);
        assert_eq!(guitar[0].name, "E2");
        assert!((guitar[0].frequency - 82.41).abs() < f32::EPSILON);

        let ukulele = Instrument::Ukulele.open_strings();
        assert_eq!(ukulele.len(), 4);
        assert_eq!(ukulele[3].name, "A4");
        assert!((ukulele[3].frequency - 440.0).abs() < f32::EPSILON);
    }

    #[test]
    fn selection_swaps_active_set() {
        let mut model = ScaleModel::default();
        assert_eq!(model.instrument(), Instrument::Guitar);
        model.select_instrument("ukulele").unwrap();
        assert_eq!(model.instrument(), Instrument::Ukulele);
        assert_eq!(model.open_strings().len(), 4);
    }

    #[test]
    fn unknown_selection_keeps_prior_set() {
        let mut model = ScaleModel::new(Instrument::Ukulele);
        let err = model.select_instrument("banjo").unwrap_err();
        assert!(matches!(err, ScaleError::UnknownInstrument(_)));
        assert_eq!(model.instrument(), Instrument::Ukulele);
    }

    #[test]
    fn selection_is_case_insensitive() {
        assert_eq!(Instrument::from_name("Guitar"), Some(Instrument::Guitar));
        assert_eq!(Instrument::from_name("UKULELE"), Some(Instrument::Ukulele));
    }
}
