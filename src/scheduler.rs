//! Word scheduling.
//!
//! Decides when a word should appear and which one. All session state lives
//! in an explicit [`SessionMemory`] value that the caller owns and passes in;
//! randomness comes from a caller-supplied [`Rng`] so behaviour is
//! reproducible with a seeded generator.
//!
//! A word can only start on an inhale edge (the frame the breath clock
//! enters [`BreathPhase::Inhale`]), only after `min_inhale_gap` inhales since
//! the previous word, and then only if a uniform draw lands below a
//! probability that ramps up over the session.

use rand::Rng;

use crate::breath::BreathPhase;
use crate::config::WordConfig;

/// Session-lifetime scheduling state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionMemory {
    /// Host time of the first update in this session (milliseconds).
    pub session_start_ms: Option<f64>,
    /// Inhale edges seen this session.
    pub inhale_count: u32,
    /// Value of `inhale_count` when the last word started.
    pub last_word_inhale: u32,
    /// Recently shown words, oldest first.
    pub used_words: Vec<String>,
    /// Phase seen on the previous update, for edge detection.
    pub last_phase: Option<BreathPhase>,
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inhales since the last word started.
    #[inline]
    pub fn inhale_gap(&self) -> u32 {
        self.inhale_count.saturating_sub(self.last_word_inhale)
    }

    /// Seconds since the session started, or 0 before the first update.
    pub fn session_seconds(&self, now_ms: f64) -> f32 {
        match self.session_start_ms {
            Some(start) => ((now_ms - start) / 1_000.0).max(0.0) as f32,
            None => 0.0,
        }
    }

    /// Record the session start if this is the first observed time.
    pub fn start_if_needed(&mut self, now_ms: f64) {
        if self.session_start_ms.is_none() {
            self.session_start_ms = Some(now_ms);
        }
    }

    /// Note that a word started on the current inhale.
    #[inline]
    pub fn mark_word_started(&mut self) {
        self.last_word_inhale = self.inhale_count;
    }
}

/// Track the breath phase and report whether this frame entered inhale.
///
/// Increments `inhale_count` on each edge. Steady-state inhale frames and
/// all other phases return `false`. The first observed frame counts as an
/// edge if it is already inhale.
pub fn detect_inhale_edge(memory: &mut SessionMemory, phase: BreathPhase) -> bool {
    let edge = phase.is_inhale() && memory.last_phase != Some(BreathPhase::Inhale);
    memory.last_phase = Some(phase);
    if edge {
        memory.inhale_count += 1;
    }
    edge
}

/// Trigger probability after `elapsed_secs` of session time.
///
/// Rises linearly from `base_probability` to `max_probability` over
/// `ramp_duration_secs`, then holds. A zero-length ramp is already at max.
pub fn trigger_probability(elapsed_secs: f32, config: &WordConfig) -> f32 {
    let ramp = if config.ramp_duration_secs > 0.0 {
        (elapsed_secs / config.ramp_duration_secs).clamp(0.0, 1.0)
    } else {
        1.0
    };
    config.base_probability + (config.max_probability - config.base_probability) * ramp
}

/// Decide whether a word should start on this inhale edge.
///
/// Returns `false` without consuming randomness while fewer than
/// `min_inhale_gap` inhales have passed since the last word.
pub fn should_trigger<R: Rng + ?Sized>(
    memory: &SessionMemory,
    now_ms: f64,
    config: &WordConfig,
    rng: &mut R,
) -> bool {
    let gap = memory.inhale_gap();
    if gap < config.min_inhale_gap {
        return false;
    }

    let p = trigger_probability(memory.session_seconds(now_ms), config);
    let draw: f32 = rng.gen();
    log::trace!(
        "Inhale #{}: gap {}, trigger probability {:.3}, draw {:.3}",
        memory.inhale_count,
        gap,
        p,
        draw
    );
    draw < p
}

/// Pick the next word and remember it.
///
/// Draws uniformly from words not in `used_words`. If every word has been
/// used, the memory is cleared and the draw is repeated over the full list,
/// still excluding the most recent word when there is any alternative.
/// When the memory grows past half the list, its oldest half is forgotten.
///
/// Returns `None` only for an empty list.
pub fn select_word<R: Rng + ?Sized>(
    memory: &mut SessionMemory,
    words: &[String],
    rng: &mut R,
) -> Option<String> {
    if words.is_empty() {
        return None;
    }

    let mut candidates: Vec<&String> = words
        .iter()
        .filter(|w| !memory.used_words.contains(*w))
        .collect();

    if candidates.is_empty() {
        let previous = memory.used_words.last().cloned();
        memory.used_words.clear();
        candidates = words.iter().filter(|w| Some(*w) != previous.as_ref()).collect();
        if candidates.is_empty() {
            candidates = words.iter().collect();
        }
    }

    let word = candidates[rng.gen_range(0..candidates.len())].clone();
    remember_word(memory, &word, words.len());
    Some(word)
}

/// Add `word` to the used-word memory for a list of `list_len` words.
///
/// Once the memory holds more than half the list, the oldest half is
/// dropped. The newest entry always survives.
pub fn remember_word(memory: &mut SessionMemory, word: &str, list_len: usize) {
    memory.used_words.retain(|w| w != word);
    memory.used_words.push(word.to_string());

    if memory.used_words.len() * 2 > list_len {
        let evict = memory.used_words.len() / 2;
        memory.used_words.drain(..evict);
    }
}
