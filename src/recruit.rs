//! Particle recruitment.
//!
//! Binds particle indices to word points with a greedy nearest-unclaimed
//! match. Targets are processed strictly in the order given; each one takes
//! the closest particle nobody has claimed yet, ties going to the lowest
//! particle index. An early target can therefore take a particle that would
//! have suited a later target better. That first-claim-wins ordering is part
//! of how words look as they form, so it is kept even though the total
//! distance is not minimal.
//!
//! When particles run out, the remaining targets are left unmatched and the
//! result is simply shorter than the target list. The result is always a
//! prefix of the targets: `result[i].target == targets[i]`.
//!
//! Two search strategies produce the same assignment:
//!
//! - [`recruit_particles`] scans every unclaimed particle per target,
//!   `O(targets * particles)`.
//! - [`recruit_particles_grid`] buckets particles into a uniform grid and
//!   searches shells of cells outward from each target until no unsearched
//!   cell can hold a closer particle. Positions must be finite for the two
//!   to agree.
//!
//! A particle whose distance to the target is NaN is never recruited.

use std::collections::HashMap;

use glam::{IVec3, Vec3};

use crate::config::RecruitStrategy;
use crate::layout::WordPoint;

/// A particle bound to a word point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recruit {
    /// Index into the host's particle buffer.
    pub particle_index: u32,
    /// Word point this particle should move toward.
    pub target: WordPoint,
}

/// Recruit with the given strategy.
pub fn recruit(
    targets: &[WordPoint],
    positions: &[f32],
    particle_count: usize,
    strategy: RecruitStrategy,
) -> Vec<Recruit> {
    match strategy {
        RecruitStrategy::Exhaustive => recruit_particles(targets, positions, particle_count),
        RecruitStrategy::Grid { cell_size } => {
            recruit_particles_grid(targets, positions, particle_count, cell_size)
        }
    }
}

/// Recruit from a typed position slice.
pub fn recruit_vec3(targets: &[WordPoint], positions: &[Vec3], strategy: RecruitStrategy) -> Vec<Recruit> {
    let flat: &[f32] = bytemuck::cast_slice(positions);
    recruit(targets, flat, positions.len(), strategy)
}

/// Greedy nearest-unclaimed recruitment by exhaustive scan.
///
/// `positions` is a flat `xyz` buffer. Only the first `particle_count`
/// particles are considered, further limited to what the buffer holds.
pub fn recruit_particles(targets: &[WordPoint], positions: &[f32], particle_count: usize) -> Vec<Recruit> {
    let count = usable_count(positions, particle_count);
    let mut claimed = vec![false; count];
    let mut recruits = Vec::with_capacity(targets.len().min(count));

    for target in targets {
        let Some((index, _)) = nearest_among(positions, target.position, &claimed, 0..count, None) else {
            break;
        };
        claimed[index] = true;
        recruits.push(Recruit {
            particle_index: index as u32,
            target: *target,
        });
    }

    log_shortage(targets.len(), recruits.len(), count);
    recruits
}

/// Greedy nearest-unclaimed recruitment accelerated by a uniform grid.
///
/// Produces the same assignment as [`recruit_particles`] for finite
/// positions. A non-positive or non-finite `cell_size` falls back to the
/// exhaustive scan.
pub fn recruit_particles_grid(
    targets: &[WordPoint],
    positions: &[f32],
    particle_count: usize,
    cell_size: f32,
) -> Vec<Recruit> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return recruit_particles(targets, positions, particle_count);
    }

    let count = usable_count(positions, particle_count);
    let grid = ParticleGrid::build(positions, count, cell_size);
    let mut claimed = vec![false; count];
    let mut remaining = count;
    let mut recruits = Vec::with_capacity(targets.len().min(count));

    for target in targets {
        if remaining == 0 {
            break;
        }
        let Some(index) = grid.nearest_unclaimed(positions, target.position, &claimed) else {
            break;
        };
        claimed[index] = true;
        remaining -= 1;
        recruits.push(Recruit {
            particle_index: index as u32,
            target: *target,
        });
    }

    log_shortage(targets.len(), recruits.len(), count);
    recruits
}

#[inline]
fn usable_count(positions: &[f32], particle_count: usize) -> usize {
    particle_count.min(positions.len() / 3)
}

#[inline]
fn particle_at(positions: &[f32], index: usize) -> Vec3 {
    Vec3::from_slice(&positions[index * 3..index * 3 + 3])
}

/// Selection key shared by both strategies: smaller distance, then lower
/// index. A NaN distance never wins.
#[inline]
fn closer(index: usize, dist_sq: f32, best: Option<(usize, f32)>) -> bool {
    if dist_sq.is_nan() {
        return false;
    }
    match best {
        None => true,
        Some((best_index, best_dist)) => {
            dist_sq < best_dist || (dist_sq == best_dist && index < best_index)
        }
    }
}

/// Fold the unclaimed particles among `candidates` into `best`.
fn nearest_among(
    positions: &[f32],
    target: Vec3,
    claimed: &[bool],
    candidates: impl IntoIterator<Item = usize>,
    mut best: Option<(usize, f32)>,
) -> Option<(usize, f32)> {
    for index in candidates {
        if claimed[index] {
            continue;
        }
        let d = particle_at(positions, index).distance_squared(target);
        if closer(index, d, best) {
            best = Some((index, d));
        }
    }
    best
}

fn log_shortage(targets: usize, recruited: usize, available: usize) {
    if recruited < targets {
        log::debug!(
            "Recruited {} of {} word points; only {} particles available",
            recruited,
            targets,
            available
        );
    }
}

/// Uniform bucket grid over particle positions.
struct ParticleGrid {
    cell_size: f32,
    cells: HashMap<IVec3, Vec<u32>>,
    min: IVec3,
    max: IVec3,
    particle_count: usize,
}

impl ParticleGrid {
    fn build(positions: &[f32], count: usize, cell_size: f32) -> Self {
        let mut cells: HashMap<IVec3, Vec<u32>> = HashMap::new();
        let mut min = IVec3::splat(i32::MAX);
        let mut max = IVec3::splat(i32::MIN);

        for i in 0..count {
            let cell = cell_of(particle_at(positions, i), cell_size);
            min = min.min(cell);
            max = max.max(cell);
            cells.entry(cell).or_default().push(i as u32);
        }

        Self {
            cell_size,
            cells,
            min,
            max,
            particle_count: count,
        }
    }

    fn nearest_unclaimed(&self, positions: &[f32], target: Vec3, claimed: &[bool]) -> Option<usize> {
        if self.cells.is_empty() {
            return None;
        }

        let center = cell_of(target, self.cell_size).as_i64vec3();
        let lo = self.min.as_i64vec3();
        let hi = self.max.as_i64vec3();
        let max_ring = (center - lo).abs().max((hi - center).abs()).max_element();

        let mut best: Option<(usize, f32)> = None;
        let mut ring = 0i64;

        while ring <= max_ring {
            // Past this point a linear scan is cheaper than walking the shell.
            if shell_cell_count(ring) > self.particle_count as i64 {
                let all = nearest_among(positions, target, claimed, 0..self.particle_count, best);
                return all.map(|(index, _)| index);
            }

            self.visit_shell(center, ring, |bucket| {
                best = nearest_among(positions, target, claimed, bucket.iter().map(|&i| i as usize), best);
            });

            // Anything unvisited lies at least `ring` cells away; one cell of
            // slack absorbs rounding at cell boundaries.
            if let Some((index, d)) = best {
                let bound = (ring - 1) as f32 * self.cell_size;
                if ring >= 2 && d < bound * bound {
                    return Some(index);
                }
            }
            ring += 1;
        }

        best.map(|(index, _)| index)
    }

    /// Call `f` with every occupied cell at Chebyshev distance `ring` from `center`.
    fn visit_shell(&self, center: glam::I64Vec3, ring: i64, mut f: impl FnMut(&[u32])) {
        let lo = self.min.as_i64vec3();
        let hi = self.max.as_i64vec3();

        for dx in -ring..=ring {
            let x = center.x + dx;
            if x < lo.x || x > hi.x {
                continue;
            }
            for dy in -ring..=ring {
                let y = center.y + dy;
                if y < lo.y || y > hi.y {
                    continue;
                }
                let on_face = dx.abs() == ring || dy.abs() == ring;
                let step = if on_face || ring == 0 { 1 } else { 2 * ring };
                let mut dz = -ring;
                while dz <= ring {
                    let z = center.z + dz;
                    if z >= lo.z && z <= hi.z {
                        let cell = IVec3::new(x as i32, y as i32, z as i32);
                        if let Some(bucket) = self.cells.get(&cell) {
                            f(bucket.as_slice());
                        }
                    }
                    dz += step;
                }
            }
        }
    }
}

#[inline]
fn cell_of(position: Vec3, cell_size: f32) -> IVec3 {
    (position / cell_size).floor().as_ivec3()
}

#[inline]
fn shell_cell_count(ring: i64) -> i64 {
    if ring == 0 {
        1
    } else {
        let outer = 2 * ring + 1;
        let inner = 2 * ring - 1;
        outer * outer * outer - inner * inner * inner
    }
}
