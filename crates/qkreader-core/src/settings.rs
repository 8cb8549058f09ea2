//! Pacing configuration.

use core::fmt;

/// How long the first word stays on screen before pacing starts.
pub const START_WORD_INTERVAL_MS: f64 = 500.0;

/// Multiple of the target WPM added to the firing interval on every tick
/// while the pacer is below target speed.
pub const WPM_ACCELERATION_FACTOR: f64 = 0.1;

pub const DEFAULT_MAX_WPM: f64 = 300.0;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Converts the delay between two words into a words-per-minute rate.
pub fn interval_ms_to_wpm(interval_ms: f64) -> f64 {
    MS_PER_MINUTE / interval_ms
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Target speed must be a finite number above zero.
    InvalidMaxWpm(f64),
    InvalidStartWordInterval(f64),
    InvalidAccelerationFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMaxWpm(value) => {
                write!(f, "max wpm must be a positive number, got {value}")
            }
            Self::InvalidStartWordInterval(value) => {
                write!(f, "start word interval must be a positive number of ms, got {value}")
            }
            Self::InvalidAccelerationFactor(value) => {
                write!(f, "acceleration factor must be zero or positive, got {value}")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacerConfig {
    /// Target (ceiling) speed. Fixed for the lifetime of a pacer.
    pub max_wpm: f64,
    pub start_word_interval_ms: f64,
    pub acceleration_factor: f64,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            max_wpm: DEFAULT_MAX_WPM,
            start_word_interval_ms: START_WORD_INTERVAL_MS,
            acceleration_factor: WPM_ACCELERATION_FACTOR,
        }
    }
}

impl PacerConfig {
    pub const fn with_max_wpm(max_wpm: f64) -> Self {
        Self {
            max_wpm,
            start_word_interval_ms: START_WORD_INTERVAL_MS,
            acceleration_factor: WPM_ACCELERATION_FACTOR,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_wpm.is_finite() && self.max_wpm > 0.0) {
            return Err(ConfigError::InvalidMaxWpm(self.max_wpm));
        }
        if !(self.start_word_interval_ms.is_finite() && self.start_word_interval_ms > 0.0) {
            return Err(ConfigError::InvalidStartWordInterval(
                self.start_word_interval_ms,
            ));
        }
        if !(self.acceleration_factor.is_finite() && self.acceleration_factor >= 0.0) {
            return Err(ConfigError::InvalidAccelerationFactor(
                self.acceleration_factor,
            ));
        }
        Ok(())
    }

    /// Speed of the fast first word used by an accelerated start.
    pub fn start_word_wpm(&self) -> f64 {
        interval_ms_to_wpm(self.start_word_interval_ms)
    }

    /// Milliseconds added to the firing interval per tick while accelerating.
    pub fn interval_step_ms(&self) -> f64 {
        self.max_wpm * self.acceleration_factor
    }
}
