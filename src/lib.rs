//! # breath-words - word formation for breathing particle fields
//!
//! Every so often, a handful of particles drifting around a breathing orb
//! gather to spell a short word, hold it for a moment, then let it go. This
//! crate decides *when* that happens, *which* word, *which* particles take
//! part, and *how formed* each letter is on any given frame.
//!
//! It does no rendering and never writes to the particle buffer. The host
//! feeds it a time, a breath phase and a read-only view of particle
//! positions once per frame, and the renderer reads back a snapshot.
//!
//! ## Quick Start
//!
//! ```
//! use breath_words::prelude::*;
//!
//! let mut words = WordFormationController::with_seed(WordConfig::default(), 42).unwrap();
//! let cycle = BreathCycle::default();
//! let positions: Vec<f32> = (0..3_000).map(|i| (i as f32 * 0.37).sin()).collect();
//!
//! for frame in 0..600 {
//!     let now = frame as f64 * 16.6;
//!     if words.update(now, cycle.phase_at(now), &positions, 1_000) {
//!         println!("word state changed: {:?}", words.state().word());
//!     }
//!
//!     // Renderer side: blend each recruited particle toward its target.
//!     for (particle, _target) in words.state().assignments() {
//!         let (_, blend) = words.particle_blend(particle).unwrap();
//!         assert!((0.0..=1.0).contains(&blend));
//!     }
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Inhale edge, trigger draw, word choice | [`scheduler`] |
//! | Word to point cloud | [`layout`] using [`glyphs`] |
//! | Point cloud to particle indices | [`recruit`] |
//! | Global and per-letter progress | [`timeline`] |
//! | Per-frame orchestration | [`WordFormationController`] |
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade at `debug` and `trace`
//! level. Install any logger in the host to see them.

pub mod breath;
pub mod config;
mod controller;
pub mod error;
pub mod glyphs;
pub mod layout;
pub mod recruit;
pub mod scheduler;
pub mod timeline;
pub mod words;

pub use breath::{BreathCycle, BreathPhase};
pub use config::{RecruitStrategy, WordConfig};
pub use controller::WordFormationController;
pub use error::{ConfigError, PhaseError};
pub use glam::{Vec2, Vec3};
pub use layout::WordPoint;
pub use recruit::Recruit;
pub use scheduler::SessionMemory;
pub use timeline::{FormationState, WordFormationState};

/// Convenient re-exports for common usage.
///
/// ```
/// use breath_words::prelude::*;
/// ```
pub mod prelude {
    pub use crate::breath::{BreathCycle, BreathPhase};
    pub use crate::config::{RecruitStrategy, WordConfig};
    pub use crate::controller::WordFormationController;
    pub use crate::layout::WordPoint;
    pub use crate::scheduler::SessionMemory;
    pub use crate::timeline::{FormationState, WordFormationState};
    pub use crate::{Vec2, Vec3};
}
