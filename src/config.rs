//! Word formation configuration.
//!
//! All tunables live in one immutable [`WordConfig`]. Build it with the
//! chained `with_*` methods, or parse it from JSON:
//!
//! ```
//! use breath_words::WordConfig;
//!
//! let config = WordConfig::default()
//!     .with_word_duration_ms(5_000.0)
//!     .with_scale(0.8)
//!     .with_words(["CALM", "REST"]);
//! assert!(config.validate().is_ok());
//!
//! // Missing fields fall back to their defaults.
//! let parsed = WordConfig::from_json(r#"{ "min_inhale_gap": 3 }"#).unwrap();
//! assert_eq!(parsed.min_inhale_gap, 3);
//! assert_eq!(parsed.word_duration_ms, 4_000.0);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::words::DEFAULT_WORDS;

/// How recruited particles are matched to word points.
///
/// Both strategies produce the same assignment for finite positions; the
/// grid only changes how fast it is found.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum RecruitStrategy {
    /// Scan every unclaimed particle for each target.
    Exhaustive,
    /// Bucket particles into a uniform grid and search outward from each target.
    Grid {
        /// Edge length of a grid cell in world units.
        cell_size: f32,
    },
}

impl Default for RecruitStrategy {
    fn default() -> Self {
        RecruitStrategy::Exhaustive
    }
}

/// Timing, layout and scheduling parameters for word formation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordConfig {
    /// Total life of a word, formation and dissolve together (milliseconds).
    pub word_duration_ms: f64,
    /// Global progress at which formation ends and dissolve begins.
    pub formation_end: f32,
    /// Width of each letter's reveal window, in formation-progress units.
    pub letter_overlap: f32,
    /// How fast the reveal wave sweeps across the word.
    pub reveal_speed: f32,
    /// Upper bound on points generated per letter.
    pub particles_per_letter: usize,
    /// Overall layout scale.
    pub scale: f32,
    /// Letter cell width, as a multiple of `scale`.
    pub letter_width: f32,
    /// Letter cell height, as a multiple of `scale`.
    pub letter_height: f32,
    /// Centre of the word on the z = 0 plane.
    pub origin: Vec2,
    /// Minimum inhales between two words.
    pub min_inhale_gap: u32,
    /// Trigger probability at session start.
    pub base_probability: f32,
    /// Trigger probability once the ramp is complete.
    pub max_probability: f32,
    /// Seconds over which the probability ramps from base to max.
    pub ramp_duration_secs: f32,
    /// Words the scheduler picks from.
    pub words: Vec<String>,
    /// Particle matching strategy.
    pub recruit_strategy: RecruitStrategy,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            word_duration_ms: 4_000.0,
            formation_end: 0.7,
            letter_overlap: 0.4,
            reveal_speed: 1.5,
            particles_per_letter: 25,
            scale: 0.5,
            letter_width: 1.2,
            letter_height: 1.5,
            origin: Vec2::ZERO,
            min_inhale_gap: 2,
            base_probability: 0.10,
            max_probability: 0.25,
            ramp_duration_secs: 120.0,
            words: DEFAULT_WORDS.iter().map(|w| w.to_string()).collect(),
            recruit_strategy: RecruitStrategy::Exhaustive,
        }
    }
}

impl WordConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it. Words are uppercased.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: WordConfig = serde_json::from_str(json)?;
        config.uppercase_words();
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_word_duration_ms(mut self, ms: f64) -> Self {
        self.word_duration_ms = ms;
        self
    }

    pub fn with_formation_end(mut self, end: f32) -> Self {
        self.formation_end = end;
        self
    }

    pub fn with_letter_overlap(mut self, overlap: f32) -> Self {
        self.letter_overlap = overlap;
        self
    }

    pub fn with_reveal_speed(mut self, speed: f32) -> Self {
        self.reveal_speed = speed;
        self
    }

    pub fn with_particles_per_letter(mut self, n: usize) -> Self {
        self.particles_per_letter = n;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the letter cell size as multiples of `scale`.
    pub fn with_letter_size(mut self, width: f32, height: f32) -> Self {
        self.letter_width = width;
        self.letter_height = height;
        self
    }

    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_min_inhale_gap(mut self, gap: u32) -> Self {
        self.min_inhale_gap = gap;
        self
    }

    /// Set the trigger probability ramp.
    ///
    /// The probability rises linearly from `base` to `max` over
    /// `ramp_secs` seconds of session time, then stays at `max`.
    pub fn with_probability_ramp(mut self, base: f32, max: f32, ramp_secs: f32) -> Self {
        self.base_probability = base;
        self.max_probability = max;
        self.ramp_duration_secs = ramp_secs;
        self
    }

    /// Replace the word list. Words are stored uppercased.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words = words.into_iter().map(|w| w.as_ref().to_uppercase()).collect();
        self
    }

    /// Uppercase every word in place, matching how glyphs and the word
    /// memory compare them.
    pub(crate) fn uppercase_words(&mut self) {
        for word in &mut self.words {
            if word.chars().any(char::is_lowercase) {
                *word = word.to_uppercase();
            }
        }
    }

    pub fn with_recruit_strategy(mut self, strategy: RecruitStrategy) -> Self {
        self.recruit_strategy = strategy;
        self
    }

    /// Letter cell width in world units.
    #[inline]
    pub fn letter_cell_width(&self) -> f32 {
        self.letter_width * self.scale
    }

    /// Letter cell height in world units.
    #[inline]
    pub fn letter_cell_height(&self) -> f32 {
        self.letter_height * self.scale
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.word_duration_ms.is_finite() && self.word_duration_ms > 0.0) {
            return Err(ConfigError::InvalidDuration(self.word_duration_ms));
        }
        if !(self.formation_end > 0.0 && self.formation_end < 1.0) {
            return Err(ConfigError::InvalidFormationEnd(self.formation_end));
        }
        if !(self.letter_overlap.is_finite() && self.letter_overlap > 0.0) {
            return Err(ConfigError::InvalidOverlap(self.letter_overlap));
        }
        if !(self.reveal_speed.is_finite() && self.reveal_speed > 0.0) {
            return Err(ConfigError::InvalidRevealSpeed(self.reveal_speed));
        }
        if self.particles_per_letter == 0 {
            return Err(ConfigError::ZeroParticlesPerLetter);
        }
        for (field, value) in [
            ("scale", self.scale),
            ("letter_width", self.letter_width),
            ("letter_height", self.letter_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }

        let (base, max) = (self.base_probability, self.max_probability);
        if !((0.0..=1.0).contains(&base) && (0.0..=1.0).contains(&max) && base <= max) {
            return Err(ConfigError::InvalidProbability { base, max });
        }
        if !(self.ramp_duration_secs.is_finite() && self.ramp_duration_secs >= 0.0) {
            return Err(ConfigError::InvalidRamp(self.ramp_duration_secs));
        }

        if self.words.is_empty() {
            return Err(ConfigError::EmptyWordList);
        }
        if let Some(i) = self.words.iter().position(|w| w.trim().is_empty()) {
            return Err(ConfigError::BlankWord(i));
        }

        if let RecruitStrategy::Grid { cell_size } = self.recruit_strategy {
            if !(cell_size.is_finite() && cell_size > 0.0) {
                return Err(ConfigError::InvalidCellSize(cell_size));
            }
        }

        Ok(())
    }
}
