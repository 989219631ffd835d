//! Formation timeline.
//!
//! A word lives for `word_duration_ms`. Global progress runs from 0 to 1
//! over that time and is split into two sub-phases at `formation_end`:
//!
//! - **Formation**: letters are revealed left to right. Each letter has its
//!   own reveal window of width `letter_overlap`, and the windows overlap so
//!   the reveal travels as a wave rather than one letter at a time.
//! - **Dissolve**: every letter fades back out together.
//!
//! ```text
//! letter 0  ▁▃▆█████████▆▃▁
//! letter 1  ▁▁▃▆████████▆▃▁
//! letter 2  ▁▁▁▁▃▆██████▆▃▁
//!           |-- formation --|-- dissolve --|
//! ```

use std::collections::HashMap;

use crate::config::WordConfig;
use crate::layout::WordPoint;
use crate::recruit::Recruit;

/// Smoothstep easing, `x² (3 − 2x)` on a clamped input.
#[inline]
pub fn smoothstep(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Global progress `elapsed_ms` into a word's life.
#[inline]
pub fn global_progress(elapsed_ms: f64, config: &WordConfig) -> f32 {
    (elapsed_ms / config.word_duration_ms).clamp(0.0, 1.0) as f32
}

/// How formed a single letter is (0 = invisible, 1 = fully formed).
///
/// Pure function of the global `progress`, the letter's slot and the word
/// length. Returns 0 for a word with no letters.
pub fn letter_progress(progress: f32, letter_index: usize, total_letters: usize, config: &WordConfig) -> f32 {
    if total_letters == 0 {
        return 0.0;
    }
    let progress = progress.clamp(0.0, 1.0);

    if progress < config.formation_end {
        let form = progress / config.formation_end;
        let reveal_point = letter_index as f32 / total_letters as f32;
        let raw = (form * config.reveal_speed - reveal_point) / config.letter_overlap;
        smoothstep(raw)
    } else {
        let dissolve = ((progress - config.formation_end) / (1.0 - config.formation_end)).clamp(0.0, 1.0);
        1.0 - dissolve * dissolve
    }
}

/// Whether a word is currently on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormationState {
    #[default]
    Idle,
    Forming,
}

/// Snapshot of the active word, polled by the renderer each frame.
///
/// `recruited_indices()[i]` is the particle bound to `target_positions()[i]`.
/// There may be fewer recruited particles than targets.
#[derive(Clone, Debug, Default)]
pub struct WordFormationState {
    state: FormationState,
    word: Option<String>,
    start_time_ms: f64,
    progress: f32,
    letter_count: usize,
    target_positions: Vec<WordPoint>,
    recruited_indices: Vec<u32>,
    slot_by_particle: HashMap<u32, usize>,
}

impl WordFormationState {
    #[inline]
    pub fn state(&self) -> FormationState {
        self.state
    }

    #[inline]
    pub fn is_forming(&self) -> bool {
        self.state == FormationState::Forming
    }

    #[inline]
    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// Host time at which the word started (milliseconds).
    #[inline]
    pub fn start_time_ms(&self) -> f64 {
        self.start_time_ms
    }

    /// Global progress through the word's life (0.0 - 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Character slots in the word, spaces included.
    #[inline]
    pub fn letter_count(&self) -> usize {
        self.letter_count
    }

    #[inline]
    pub fn target_positions(&self) -> &[WordPoint] {
        &self.target_positions
    }

    #[inline]
    pub fn recruited_indices(&self) -> &[u32] {
        &self.recruited_indices
    }

    /// Recruited particles paired with their targets.
    pub fn assignments(&self) -> impl Iterator<Item = (u32, &WordPoint)> + '_ {
        self.recruited_indices
            .iter()
            .copied()
            .zip(self.target_positions.iter())
    }

    /// Target assigned to a particle, if it is recruited.
    pub fn target_for(&self, particle_index: u32) -> Option<&WordPoint> {
        self.slot_by_particle
            .get(&particle_index)
            .map(|&slot| &self.target_positions[slot])
    }

    /// Letter progress for `letter_index` at the current global progress.
    pub fn letter_progress(&self, letter_index: usize, config: &WordConfig) -> f32 {
        if !self.is_forming() {
            return 0.0;
        }
        letter_progress(self.progress, letter_index, self.letter_count, config)
    }

    /// Enter Forming. Does nothing and returns `false` if already forming.
    pub fn begin(
        &mut self,
        word: String,
        letter_count: usize,
        now_ms: f64,
        targets: Vec<WordPoint>,
        recruits: &[Recruit],
    ) -> bool {
        if self.is_forming() {
            return false;
        }

        self.recruited_indices = recruits.iter().map(|r| r.particle_index).collect();
        self.slot_by_particle = self
            .recruited_indices
            .iter()
            .enumerate()
            .map(|(slot, &index)| (index, slot))
            .collect();
        self.state = FormationState::Forming;
        self.word = Some(word);
        self.start_time_ms = now_ms;
        self.progress = 0.0;
        self.letter_count = letter_count;
        self.target_positions = targets;
        true
    }

    /// Recompute progress for `now_ms`.
    ///
    /// Progress never moves backwards, even if the host clock does. Returns
    /// `true` when the word completes this call; the state is then back to
    /// Idle defaults.
    pub fn advance(&mut self, now_ms: f64, config: &WordConfig) -> bool {
        if !self.is_forming() {
            return false;
        }

        let progress = global_progress(now_ms - self.start_time_ms, config);
        self.progress = self.progress.max(progress);

        if self.progress >= 1.0 {
            self.progress = 1.0;
            log::debug!("Word {:?} complete", self.word.as_deref().unwrap_or_default());
            self.reset();
            return true;
        }
        false
    }

    /// Return to Idle defaults. Safe to call when already Idle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn targets(n: usize) -> Vec<WordPoint> {
        (0..n)
            .map(|i| WordPoint {
                position: Vec3::new(i as f32, 0.0, 0.0),
                letter_index: i,
                point_index: 0,
            })
            .collect()
    }

    fn recruits(targets: &[WordPoint], count: usize) -> Vec<Recruit> {
        targets
            .iter()
            .take(count)
            .enumerate()
            .map(|(i, t)| Recruit {
                particle_index: (i * 10) as u32,
                target: *t,
            })
            .collect()
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(3.0), 1.0);
    }

    #[test]
    fn test_letter_progress_starts_at_zero() {
        let config = WordConfig::default();
        for i in 0..5 {
            assert_eq!(letter_progress(0.0, i, 5, &config), 0.0);
        }
    }

    #[test]
    fn test_letter_progress_formation_is_monotonic() {
        let config = WordConfig::default();
        for total in 1..=7 {
            for i in 0..total {
                let mut prev = 0.0;
                for step in 0..700 {
                    let p = step as f32 / 1000.0;
                    let v = letter_progress(p, i, total, &config);
                    assert!(v >= prev, "letter {}/{} dropped at {}", i, total, p);
                    prev = v;
                }
                assert!((prev - 1.0).abs() < 1e-4, "letter {}/{} not formed by the dissolve", i, total);
            }
        }
    }

    #[test]
    fn test_reveal_travels_left_to_right() {
        let config = WordConfig::default();
        let p = 0.2;
        let first = letter_progress(p, 0, 4, &config);
        let last = letter_progress(p, 3, 4, &config);
        assert!(first > last);
    }

    #[test]
    fn test_dissolve_is_synchronized() {
        let config = WordConfig::default();
        for p in [0.7, 0.8, 0.9, 0.99, 1.0] {
            let values: Vec<f32> = (0..6).map(|i| letter_progress(p, i, 6, &config)).collect();
            assert!(values.windows(2).all(|w| w[0] == w[1]));
        }
        assert_eq!(letter_progress(0.7, 2, 6, &config), 1.0);
        assert!((letter_progress(0.85, 2, 6, &config) - 0.75).abs() < 1e-5);
        assert_eq!(letter_progress(1.0, 2, 6, &config), 0.0);
    }

    #[test]
    fn test_dissolve_decreases() {
        let config = WordConfig::default();
        let mut prev = letter_progress(0.7, 0, 3, &config);
        for step in 71..=100 {
            let v = letter_progress(step as f32 / 100.0, 0, 3, &config);
            assert!(v <= prev);
            prev = v;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn test_zero_letters() {
        assert_eq!(letter_progress(0.5, 0, 0, &WordConfig::default()), 0.0);
    }

    #[test]
    fn test_begin_and_complete() {
        let config = WordConfig::default();
        let mut state = WordFormationState::default();
        let t = targets(4);
        let r = recruits(&t, 3);

        assert!(state.begin("CALM".into(), 4, 1_000.0, t.clone(), &r));
        assert!(state.is_forming());
        assert_eq!(state.word(), Some("CALM"));
        assert_eq!(state.recruited_indices(), &[0, 10, 20]);
        assert_eq!(state.target_for(20), Some(&t[2]));
        assert_eq!(state.target_for(30), None);
        assert_eq!(state.assignments().count(), 3);

        assert!(!state.advance(3_000.0, &config));
        assert!((state.progress() - 0.5).abs() < 1e-6);

        assert!(state.advance(5_000.0, &config));
        assert_eq!(state.state(), FormationState::Idle);
        assert_eq!(state.word(), None);
        assert_eq!(state.progress(), 0.0);
        assert!(state.target_positions().is_empty());
        assert!(state.recruited_indices().is_empty());
    }

    #[test]
    fn test_begin_while_forming_is_noop() {
        let mut state = WordFormationState::default();
        assert!(state.begin("CALM".into(), 4, 0.0, targets(4), &[]));
        assert!(!state.begin("REST".into(), 4, 10.0, targets(4), &[]));
        assert_eq!(state.word(), Some("CALM"));
        assert_eq!(state.start_time_ms(), 0.0);
    }

    #[test]
    fn test_progress_never_decreases() {
        let config = WordConfig::default();
        let mut state = WordFormationState::default();
        state.begin("CALM".into(), 4, 0.0, targets(4), &[]);
        state.advance(2_000.0, &config);
        state.advance(1_000.0, &config);
        assert!((state.progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_idle_advance_and_reset() {
        let config = WordConfig::default();
        let mut state = WordFormationState::default();
        assert!(!state.advance(10_000.0, &config));
        state.reset();
        assert_eq!(state.letter_progress(0, &config), 0.0);
    }
}
