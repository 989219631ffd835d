//! Headless demo host.
//!
//! Simulates a particle field orbiting the origin, drives a breath cycle at
//! a fixed 60 fps and prints what the word engine does. Nothing is drawn.
//!
//! Run with: `RUST_LOG=debug cargo run --features demo -- [seconds] [particle_count] [seed]`

use std::f32::consts::TAU;

use breath_words::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FRAME_MS: f64 = 1_000.0 / 60.0;

/// One particle on a tilted circular orbit.
struct Orbit {
    radius: f32,
    angle: f32,
    speed: f32,
    tilt: f32,
}

impl Orbit {
    fn random(rng: &mut SmallRng) -> Self {
        Self {
            radius: rng.gen_range(0.8..3.0),
            angle: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(0.05..0.4),
            tilt: rng.gen_range(-0.6..0.6),
        }
    }

    fn position(&self) -> Vec3 {
        let (s, c) = self.angle.sin_cos();
        Vec3::new(
            self.radius * c,
            self.radius * s * self.tilt.sin(),
            self.radius * s * self.tilt.cos(),
        )
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);
    let count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(5_000);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);

    println!("=== breath-words demo ===");
    println!("Duration: {:.0}s, particles: {}, seed: {}", seconds, count, seed);

    let config = WordConfig::default()
        .with_origin(Vec2::new(0.0, 0.4))
        .with_recruit_strategy(RecruitStrategy::Grid { cell_size: 0.25 });
    let mut words = match WordFormationController::with_seed(config, seed) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mut rng = SmallRng::seed_from_u64(seed ^ 0x9e37_79b9);
    let mut orbits: Vec<Orbit> = (0..count).map(|_| Orbit::random(&mut rng)).collect();
    let mut positions = vec![0.0f32; count * 3];
    let cycle = BreathCycle::default();

    let frames = (seconds * 1_000.0 / FRAME_MS) as u64;
    let mut shown = 0usize;
    let mut last_report = -1i64;

    for frame in 0..frames {
        let now = frame as f64 * FRAME_MS;

        for (orbit, slot) in orbits.iter_mut().zip(positions.chunks_exact_mut(3)) {
            orbit.angle += orbit.speed * (FRAME_MS as f32 / 1_000.0);
            slot.copy_from_slice(&orbit.position().to_array());
        }

        if words.update(now, cycle.phase_at(now), &positions, count) {
            match words.state().word() {
                Some(word) => {
                    shown += 1;
                    println!(
                        "[{:>7.2}s] forming {:<8} ({} of {} points recruited)",
                        now / 1_000.0,
                        word,
                        words.state().recruited_indices().len(),
                        words.state().target_positions().len()
                    );
                }
                None => println!("[{:>7.2}s] released", now / 1_000.0),
            }
        }

        // Quarter-second letter progress while a word is up.
        let quarter = (now / 250.0) as i64;
        if words.is_forming() && quarter != last_report {
            last_report = quarter;
            let letters: Vec<String> = (0..words.state().letter_count())
                .map(|i| format!("{:.2}", words.letter_progress(i)))
                .collect();
            println!(
                "           progress {:.2} letters [{}]",
                words.state().progress(),
                letters.join(" ")
            );
        }
    }

    println!();
    println!(
        "{} words over {} inhales",
        shown,
        words.session().inhale_count
    );
}
