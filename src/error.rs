//! Error types for breath-words.
//!
//! The per-frame surface is total and never fails. Errors only arise when
//! building a [`WordConfig`](crate::WordConfig) or converting a raw breath
//! phase index supplied by the host.

use std::fmt;

/// Errors that can occur when validating or parsing a [`WordConfig`](crate::WordConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// Word duration must be finite and positive (milliseconds).
    InvalidDuration(f64),
    /// Formation end must lie strictly between 0 and 1.
    InvalidFormationEnd(f32),
    /// Letter overlap window must be positive.
    InvalidOverlap(f32),
    /// Reveal speed multiplier must be positive.
    InvalidRevealSpeed(f32),
    /// At least one point per letter is required.
    ZeroParticlesPerLetter,
    /// A layout dimension (scale, letter width or height) is not positive.
    InvalidDimension {
        /// Name of the offending field.
        field: &'static str,
        /// Value that was rejected.
        value: f32,
    },
    /// Probabilities must be in [0, 1] with base <= max.
    InvalidProbability {
        /// Base (session start) probability.
        base: f32,
        /// Probability once the ramp has completed.
        max: f32,
    },
    /// Ramp duration must be finite and non-negative (seconds).
    InvalidRamp(f32),
    /// The word list is empty.
    EmptyWordList,
    /// A word in the list is empty or whitespace only.
    BlankWord(usize),
    /// Grid recruitment cell size must be finite and positive.
    InvalidCellSize(f32),
    /// Failed to parse a JSON configuration document.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDuration(d) => write!(f, "Word duration must be a positive number of milliseconds, got {}", d),
            ConfigError::InvalidFormationEnd(v) => write!(f, "Formation end must be between 0 and 1 (exclusive), got {}", v),
            ConfigError::InvalidOverlap(v) => write!(f, "Letter overlap must be positive, got {}", v),
            ConfigError::InvalidRevealSpeed(v) => write!(f, "Reveal speed must be positive, got {}", v),
            ConfigError::ZeroParticlesPerLetter => write!(f, "Particles per letter must be at least 1"),
            ConfigError::InvalidDimension { field, value } => write!(f, "Layout dimension `{}` must be positive, got {}", field, value),
            ConfigError::InvalidProbability { base, max } => write!(f, "Trigger probabilities must satisfy 0 <= base <= max <= 1, got base={} max={}", base, max),
            ConfigError::InvalidRamp(v) => write!(f, "Ramp duration must be non-negative seconds, got {}", v),
            ConfigError::EmptyWordList => write!(f, "Word list is empty. Use .with_words() to provide at least one word."),
            ConfigError::BlankWord(i) => write!(f, "Word at index {} is blank", i),
            ConfigError::InvalidCellSize(v) => write!(f, "Grid cell size must be positive, got {}", v),
            ConfigError::Parse(e) => write!(f, "Failed to parse word config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when converting a raw phase index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseError {
    /// Breath clocks report phases 0..=3; anything else is rejected.
    OutOfRange(u32),
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseError::OutOfRange(i) => write!(f, "Breath phase index {} is out of range (expected 0-3)", i),
        }
    }
}

impl std::error::Error for PhaseError {}
