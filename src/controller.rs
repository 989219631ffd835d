//! Per-frame word formation controller.
//!
//! [`WordFormationController`] owns the configuration, the session memory,
//! the active word state and the random source. The host calls
//! [`update`](WordFormationController::update) once per rendered frame; the
//! renderer then reads [`state`](WordFormationController::state) and asks
//! for per-letter or per-particle blend factors.
//!
//! Each update runs, in order: inhale edge detection, an optional trigger
//! (word selection, layout and recruitment), then the timeline advance.
//!
//! # Example
//!
//! ```
//! use breath_words::prelude::*;
//!
//! let mut words = WordFormationController::with_seed(WordConfig::default(), 7).unwrap();
//! let positions = vec![0.0f32; 3 * 1_000];
//!
//! let changed = words.update(0.0, BreathPhase::Inhale, &positions, 1_000);
//! // The first inhale is never far enough from the (implicit) previous word.
//! assert!(!changed);
//! assert!(!words.is_forming());
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::breath::BreathPhase;
use crate::config::WordConfig;
use crate::error::ConfigError;
use crate::layout::{self, WordPoint};
use crate::recruit;
use crate::scheduler::{self, SessionMemory};
use crate::timeline::WordFormationState;

/// Orchestrates scheduling, layout, recruitment and timing of words.
pub struct WordFormationController<R: Rng = SmallRng> {
    config: WordConfig,
    session: SessionMemory,
    state: WordFormationState,
    rng: R,
}

impl WordFormationController<SmallRng> {
    /// Create a controller with an entropy-seeded random source.
    pub fn new(config: WordConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Create a controller with a deterministic random source.
    pub fn with_seed(config: WordConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> WordFormationController<R> {
    /// Create a controller using the given random source.
    pub fn with_rng(mut config: WordConfig, rng: R) -> Result<Self, ConfigError> {
        config.uppercase_words();
        config.validate()?;
        Ok(Self {
            config,
            session: SessionMemory::default(),
            state: WordFormationState::default(),
            rng,
        })
    }

    /// Start from an existing session memory instead of a fresh one.
    pub fn with_session(mut self, memory: SessionMemory) -> Self {
        self.session = memory;
        self
    }

    /// Advance one frame.
    ///
    /// * `now_ms` - monotonic host time in milliseconds
    /// * `phase` - current breath phase
    /// * `positions` - flat `xyz` particle buffer, read only
    /// * `particle_count` - number of live particles in `positions`
    ///
    /// Returns `true` if the controller switched between Idle and Forming.
    pub fn update(&mut self, now_ms: f64, phase: BreathPhase, positions: &[f32], particle_count: usize) -> bool {
        self.session.start_if_needed(now_ms);
        let was_forming = self.state.is_forming();

        let edge = scheduler::detect_inhale_edge(&mut self.session, phase);
        if edge
            && !was_forming
            && scheduler::should_trigger(&self.session, now_ms, &self.config, &mut self.rng)
        {
            if let Some(word) = scheduler::select_word(&mut self.session, &self.config.words, &mut self.rng) {
                self.start_word(word, now_ms, positions, particle_count);
            }
        }

        self.state.advance(now_ms, &self.config);
        was_forming != self.state.is_forming()
    }

    /// Start `word` immediately, bypassing the scheduler.
    ///
    /// The word is recorded in the session memory as if it had been drawn.
    /// Returns `false` and changes nothing if a word is already forming.
    pub fn trigger_word(&mut self, now_ms: f64, word: &str, positions: &[f32], particle_count: usize) -> bool {
        if self.state.is_forming() {
            log::debug!("Ignoring trigger of {:?}: a word is already forming", word);
            return false;
        }
        self.session.start_if_needed(now_ms);

        let word = word.to_uppercase();
        scheduler::remember_word(&mut self.session, &word, self.config.words.len());
        self.start_word(word, now_ms, positions, particle_count);
        true
    }

    fn start_word(&mut self, word: String, now_ms: f64, positions: &[f32], particle_count: usize) {
        let targets = layout::generate_word_points(&word, &self.config);
        let recruits = recruit::recruit(&targets, positions, particle_count, self.config.recruit_strategy);
        let letter_count = layout::letter_count(&word);

        log::debug!(
            "Forming {:?} on inhale #{}: {} targets, {} particles recruited",
            word,
            self.session.inhale_count,
            targets.len(),
            recruits.len()
        );

        self.session.mark_word_started();
        self.state.begin(word, letter_count, now_ms, targets, &recruits);
    }

    /// Whether a word is currently forming or dissolving.
    #[inline]
    pub fn is_forming(&self) -> bool {
        self.state.is_forming()
    }

    /// End the active word immediately. Safe to call when Idle.
    pub fn force_end(&mut self) {
        if let Some(word) = self.state.word() {
            log::debug!("Force-ending {:?} at progress {:.2}", word, self.state.progress());
        }
        self.state.reset();
    }

    /// Forget the whole session and return to Idle.
    pub fn reset_session(&mut self) {
        log::debug!(
            "Resetting word session after {} inhales",
            self.session.inhale_count
        );
        self.session = SessionMemory::default();
        self.state.reset();
    }

    /// Read-only snapshot of the active word.
    #[inline]
    pub fn state(&self) -> &WordFormationState {
        &self.state
    }

    #[inline]
    pub fn session(&self) -> &SessionMemory {
        &self.session
    }

    #[inline]
    pub fn config(&self) -> &WordConfig {
        &self.config
    }

    /// How formed `letter_index` of the active word is (0 when Idle).
    pub fn letter_progress(&self, letter_index: usize) -> f32 {
        self.state.letter_progress(letter_index, &self.config)
    }

    /// Target and blend factor for a particle, if it is recruited.
    ///
    /// The renderer blends the particle from its natural position toward
    /// the returned target by the returned factor.
    pub fn particle_blend(&self, particle_index: u32) -> Option<(WordPoint, f32)> {
        let target = self.state.target_for(particle_index)?;
        Some((*target, self.letter_progress(target.letter_index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::FormationState;
    use rand::rngs::mock::StepRng;

    fn grid_positions(count: usize) -> Vec<f32> {
        (0..count)
            .flat_map(|i| {
                let x = (i % 40) as f32 * 0.1 - 2.0;
                let y = (i / 40) as f32 * 0.1 - 2.0;
                [x, y, 0.5]
            })
            .collect()
    }

    fn eager(config: WordConfig) -> WordFormationController<StepRng> {
        WordFormationController::with_rng(config, StepRng::new(0, 0)).unwrap()
    }

    #[test]
    fn test_words_uppercased_on_construction() {
        let config = WordConfig {
            words: vec!["calm".to_string(), "Let go".to_string()],
            ..Default::default()
        };
        let words = eager(config);
        assert_eq!(words.config().words, vec!["CALM", "LET GO"]);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = WordConfig::default().with_words(Vec::<String>::new());
        assert!(WordFormationController::new(config).is_err());
    }

    #[test]
    fn test_triggers_on_eligible_edge() {
        let positions = grid_positions(1_600);
        let memory = SessionMemory {
            inhale_count: 4,
            ..Default::default()
        };
        let mut words = eager(WordConfig::default().with_words(["CALM"])).with_session(memory);

        assert!(words.update(0.0, BreathPhase::Inhale, &positions, 1_600));
        assert!(words.is_forming());
        assert_eq!(words.state().word(), Some("CALM"));
        assert_eq!(words.session().inhale_count, 5);
        assert_eq!(words.session().last_word_inhale, 5);
        assert_eq!(words.state().recruited_indices().len(), words.state().target_positions().len());
    }

    #[test]
    fn test_steady_inhale_does_not_retrigger() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default().with_min_inhale_gap(0));
        assert!(words.update(0.0, BreathPhase::Inhale, &positions, 400));
        let first = words.state().word().map(str::to_string);

        for t in 1..10 {
            assert!(!words.update(t as f64 * 16.0, BreathPhase::Inhale, &positions, 400));
        }
        assert_eq!(words.state().word().map(str::to_string), first);
        assert_eq!(words.session().inhale_count, 1);
    }

    #[test]
    fn test_no_trigger_while_forming() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default().with_min_inhale_gap(0));
        words.update(0.0, BreathPhase::Inhale, &positions, 400);
        let word = words.state().word().map(str::to_string);

        words.update(500.0, BreathPhase::Exhale, &positions, 400);
        assert!(!words.update(1_000.0, BreathPhase::Inhale, &positions, 400));
        assert_eq!(words.state().word().map(str::to_string), word);
        assert_eq!(words.state().start_time_ms(), 0.0);
        // The edge is still counted.
        assert_eq!(words.session().inhale_count, 2);
    }

    #[test]
    fn test_completion_reports_change() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default());
        assert!(words.trigger_word(0.0, "calm", &positions, 400));
        assert!(!words.update(3_999.0, BreathPhase::HoldIn, &positions, 400));
        assert!(words.update(4_000.0, BreathPhase::HoldIn, &positions, 400));
        assert_eq!(words.state().state(), FormationState::Idle);
        assert_eq!(words.state().progress(), 0.0);
        assert_eq!(words.state().word(), None);
    }

    #[test]
    fn test_trigger_word_while_forming_is_noop() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default());
        assert!(words.trigger_word(0.0, "CALM", &positions, 400));
        assert!(!words.trigger_word(10.0, "REST", &positions, 400));
        assert_eq!(words.state().word(), Some("CALM"));
        assert_eq!(words.session().used_words, vec!["CALM".to_string()]);
    }

    #[test]
    fn test_force_end_is_idempotent() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default());
        words.force_end();
        words.trigger_word(0.0, "REST", &positions, 400);
        words.force_end();
        assert!(!words.is_forming());
        words.force_end();
        assert!(!words.is_forming());
        // Session memory survives a forced end.
        assert_eq!(words.session().used_words, vec!["REST".to_string()]);
    }

    #[test]
    fn test_reset_session_clears_everything() {
        let positions = grid_positions(400);
        let mut words = eager(WordConfig::default().with_min_inhale_gap(0));
        words.update(0.0, BreathPhase::Inhale, &positions, 400);
        assert!(words.is_forming());

        words.reset_session();
        assert!(!words.is_forming());
        assert_eq!(words.session(), &SessionMemory::default());
    }

    #[test]
    fn test_particle_blend_follows_letters() {
        let positions = grid_positions(1_600);
        let mut words = eager(WordConfig::default());
        words.trigger_word(0.0, "CALM", &positions, 1_600);
        words.update(1_000.0, BreathPhase::HoldIn, &positions, 1_600);

        let (first_particle, first_target) = {
            let (p, t) = words.state().assignments().next().unwrap();
            (p, *t)
        };
        let (target, blend) = words.particle_blend(first_particle).unwrap();
        assert_eq!(target, first_target);
        assert_eq!(blend, words.letter_progress(target.letter_index));
        assert!(blend > 0.0);

        let unused = (0..1_600u32)
            .find(|i| !words.state().recruited_indices().contains(i))
            .unwrap();
        assert!(words.particle_blend(unused).is_none());
    }

    #[test]
    fn test_particle_shortage() {
        let positions = grid_positions(3);
        let mut words = eager(WordConfig::default());
        assert!(words.trigger_word(0.0, "BREATHE", &positions, 3));
        assert_eq!(words.state().recruited_indices().len(), 3);
        assert!(words.state().target_positions().len() > 3);
    }

    #[test]
    fn test_same_seed_same_words() {
        let positions = grid_positions(400);
        let run = |seed| {
            let mut words = WordFormationController::with_seed(WordConfig::default(), seed).unwrap();
            let mut seen = Vec::new();
            let cycle = crate::breath::BreathCycle::box_breathing(1_000.0);
            for frame in 0..20_000 {
                let t = frame as f64 * 16.0;
                if words.update(t, cycle.phase_at(t), &positions, 400) {
                    if let Some(w) = words.state().word() {
                        seen.push(w.to_string());
                    }
                }
            }
            seen
        };
        let a = run(5);
        assert!(!a.is_empty());
        assert_eq!(a, run(5));
    }
}
