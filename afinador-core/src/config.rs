//! Tunable parameters for the detection pipeline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pipeline tunables with reference defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TunerConfig {
    /// RMS level below which a frame counts as silence. This is the
    /// sensitivity knob: 0.01 picks up quiet playing, 0.03 rejects more
    /// room noise.
    pub silence_threshold: f32,
    /// How long the last valid reading is held across detection dropouts,
    /// in milliseconds.
    pub hold_window_ms: u64,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            silence_threshold: 0.01,
            hold_window_ms: 1000,
        }
    }
}

impl TunerConfig {
    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_reference_values() {
        let config = TunerConfig::default();
        assert_eq!(config.silence_threshold, 0.01);
        assert_eq!(config.hold_window(), Duration::from_millis(1000));
    }
}
