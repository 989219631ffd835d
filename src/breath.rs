//! Breath phase input.
//!
//! The host's breath clock reports which of four phases the user is in.
//! The engine only cares about edges into [`BreathPhase::Inhale`], but the
//! full phase is accepted so hosts can forward their clock unchanged.
//!
//! [`BreathCycle`] is a small reference clock for hosts (and tests) that do
//! not have one of their own.
//!
//! # Example
//!
//! ```
//! use breath_words::breath::{BreathCycle, BreathPhase};
//!
//! let cycle = BreathCycle::default(); // 4-7-8 pattern
//! assert_eq!(cycle.phase_at(0.0), BreathPhase::Inhale);
//! assert_eq!(cycle.phase_at(5_000.0), BreathPhase::HoldIn);
//! assert_eq!(cycle.phase_at(12_000.0), BreathPhase::Exhale);
//! ```

use crate::error::PhaseError;

/// One of the four phases reported by the breath clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BreathPhase {
    /// Phase 0.
    Inhale,
    /// Phase 1.
    HoldIn,
    /// Phase 2.
    Exhale,
    /// Phase 3.
    HoldOut,
}

impl BreathPhase {
    /// All phases in cycle order.
    pub const ALL: [BreathPhase; 4] = [
        BreathPhase::Inhale,
        BreathPhase::HoldIn,
        BreathPhase::Exhale,
        BreathPhase::HoldOut,
    ];

    /// Integer index used by the external clock (0 = inhale .. 3 = hold-out).
    #[inline]
    pub fn index(self) -> u32 {
        match self {
            BreathPhase::Inhale => 0,
            BreathPhase::HoldIn => 1,
            BreathPhase::Exhale => 2,
            BreathPhase::HoldOut => 3,
        }
    }

    /// Convert a raw clock index, returning `None` outside 0..=3.
    #[inline]
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn is_inhale(self) -> bool {
        self == BreathPhase::Inhale
    }
}

impl TryFrom<u32> for BreathPhase {
    type Error = PhaseError;

    fn try_from(index: u32) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(PhaseError::OutOfRange(index))
    }
}

impl From<BreathPhase> for u32 {
    fn from(phase: BreathPhase) -> Self {
        phase.index()
    }
}

/// A fixed breathing pattern expressed as four phase durations.
///
/// Durations are in milliseconds, in [`BreathPhase::ALL`] order. A phase
/// with zero duration is skipped entirely.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreathCycle {
    durations_ms: [f64; 4],
}

impl BreathCycle {
    /// Create a cycle from inhale, hold-in, exhale and hold-out durations.
    ///
    /// Negative or non-finite durations are treated as zero.
    pub fn new(inhale_ms: f64, hold_in_ms: f64, exhale_ms: f64, hold_out_ms: f64) -> Self {
        let sanitize = |d: f64| if d.is_finite() { d.max(0.0) } else { 0.0 };
        Self {
            durations_ms: [
                sanitize(inhale_ms),
                sanitize(hold_in_ms),
                sanitize(exhale_ms),
                sanitize(hold_out_ms),
            ],
        }
    }

    /// Box breathing: four equal phases.
    pub fn box_breathing(phase_ms: f64) -> Self {
        Self::new(phase_ms, phase_ms, phase_ms, phase_ms)
    }

    /// Duration of a single phase in milliseconds.
    #[inline]
    pub fn duration_of(&self, phase: BreathPhase) -> f64 {
        self.durations_ms[phase.index() as usize]
    }

    /// Length of one full cycle in milliseconds.
    #[inline]
    pub fn period_ms(&self) -> f64 {
        self.durations_ms.iter().sum()
    }

    /// Phase active `elapsed_ms` after the cycle started.
    pub fn phase_at(&self, elapsed_ms: f64) -> BreathPhase {
        self.locate(elapsed_ms).0
    }

    /// How far through the current phase we are (0.0 - 1.0).
    pub fn phase_progress(&self, elapsed_ms: f64) -> f32 {
        let (phase, into) = self.locate(elapsed_ms);
        let duration = self.duration_of(phase);
        if duration <= 0.0 {
            return 0.0;
        }
        (into / duration).clamp(0.0, 1.0) as f32
    }

    fn locate(&self, elapsed_ms: f64) -> (BreathPhase, f64) {
        let period = self.period_ms();
        if period <= 0.0 || !elapsed_ms.is_finite() {
            return (BreathPhase::Inhale, 0.0);
        }

        let mut t = elapsed_ms.rem_euclid(period);
        for phase in BreathPhase::ALL {
            let d = self.duration_of(phase);
            if t < d {
                return (phase, t);
            }
            t -= d;
        }

        // Rounding can leave `t` a hair past the last non-empty phase.
        let last = BreathPhase::ALL
            .into_iter()
            .rev()
            .find(|p| self.duration_of(*p) > 0.0)
            .unwrap_or(BreathPhase::Inhale);
        (last, self.duration_of(last))
    }
}

impl Default for BreathCycle {
    /// The 4-7-8 relaxation pattern.
    fn default() -> Self {
        Self::new(4_000.0, 7_000.0, 8_000.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_index_roundtrip() {
        for (i, phase) in BreathPhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i as u32);
            assert_eq!(BreathPhase::from_index(i as u32), Some(*phase));
        }
        assert_eq!(BreathPhase::from_index(4), None);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(BreathPhase::try_from(2), Ok(BreathPhase::Exhale));
        assert_eq!(BreathPhase::try_from(9), Err(PhaseError::OutOfRange(9)));
    }

    #[test]
    fn test_default_cycle_phases() {
        let cycle = BreathCycle::default();
        assert_eq!(cycle.period_ms(), 19_000.0);
        assert_eq!(cycle.phase_at(0.0), BreathPhase::Inhale);
        assert_eq!(cycle.phase_at(3_999.0), BreathPhase::Inhale);
        assert_eq!(cycle.phase_at(4_000.0), BreathPhase::HoldIn);
        assert_eq!(cycle.phase_at(11_000.0), BreathPhase::Exhale);
        // Hold-out has zero length, so the next cycle starts straight away.
        assert_eq!(cycle.phase_at(19_000.0), BreathPhase::Inhale);
    }

    #[test]
    fn test_phase_progress() {
        let cycle = BreathCycle::box_breathing(1_000.0);
        assert!((cycle.phase_progress(500.0) - 0.5).abs() < 1e-6);
        assert!((cycle.phase_progress(3_250.0) - 0.25).abs() < 1e-6);
        assert_eq!(cycle.phase_at(3_250.0), BreathPhase::HoldOut);
    }

    #[test]
    fn test_degenerate_cycle() {
        let cycle = BreathCycle::new(0.0, -5.0, f64::NAN, 0.0);
        assert_eq!(cycle.period_ms(), 0.0);
        assert_eq!(cycle.phase_at(1_234.0), BreathPhase::Inhale);
        assert_eq!(cycle.phase_progress(1_234.0), 0.0);
    }

    #[test]
    fn test_negative_elapsed_wraps() {
        let cycle = BreathCycle::box_breathing(1_000.0);
        assert_eq!(cycle.phase_at(-500.0), BreathPhase::HoldOut);
    }
}
