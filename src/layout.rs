//! Word point layout.
//!
//! Turns a word into an ordered point cloud on the z = 0 plane, one
//! contiguous group of points per letter. Each letter occupies a fixed
//! cell of `letter_width * scale` by `letter_height * scale`, cells are laid
//! out left to right, and the whole row is centred on `config.origin`.
//!
//! Spaces and characters missing from the glyph atlas still occupy a slot
//! (so `letter_index` is the character position in the word) but produce
//! no points.

use glam::{Vec2, Vec3};

use crate::config::WordConfig;
use crate::glyphs;

/// A single target point of a laid-out word.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordPoint {
    /// World-space target. `z` is always 0.
    pub position: Vec3,
    /// Character slot this point belongs to.
    pub letter_index: usize,
    /// Index of the point within its letter.
    pub point_index: usize,
}

/// Resample a stroke path to `count` points.
///
/// Sample `j` sits at parameter `t = j / count` along the vertex sequence
/// and is linearly interpolated between the neighbouring vertices, so the
/// final vertex is approached but not reached. Returns an empty vector for
/// an empty path.
pub fn resample_path(path: &[Vec2], count: usize) -> Vec<Vec2> {
    if path.is_empty() || count == 0 {
        return Vec::new();
    }

    let last = path.len() - 1;
    (0..count)
        .map(|j| {
            let t = j as f32 / count as f32;
            let fractional = t * last as f32;
            let lo = (fractional.floor() as usize).min(last);
            let hi = (fractional.ceil() as usize).min(last);
            path[lo].lerp(path[hi], fractional - lo as f32)
        })
        .collect()
}

/// Number of points generated for a path of `path_len` vertices.
#[inline]
pub fn points_for_path(path_len: usize, config: &WordConfig) -> usize {
    config.particles_per_letter.min(path_len * 2)
}

/// Lay out `word` as target points.
///
/// The word is uppercased before lookup. Points are returned grouped by
/// letter in reading order.
pub fn generate_word_points(word: &str, config: &WordConfig) -> Vec<WordPoint> {
    let upper = word.to_uppercase();
    let slots = upper.chars().count();
    if slots == 0 {
        return Vec::new();
    }

    let cell_w = config.letter_cell_width();
    let cell_h = config.letter_cell_height();
    let total_width = slots as f32 * cell_w;
    let first_slot_x = config.origin.x - total_width * 0.5 + cell_w * 0.5;

    let mut points = Vec::with_capacity(slots * config.particles_per_letter);

    for (letter_index, c) in upper.chars().enumerate() {
        let Some(path) = glyphs::glyph(c) else {
            continue;
        };
        let count = points_for_path(path.len(), config);
        let slot_x = first_slot_x + letter_index as f32 * cell_w;

        for (point_index, p) in resample_path(path, count).into_iter().enumerate() {
            let centred = p - Vec2::splat(0.5);
            points.push(WordPoint {
                position: Vec3::new(
                    slot_x + centred.x * cell_w,
                    config.origin.y + centred.y * cell_h,
                    0.0,
                ),
                letter_index,
                point_index,
            });
        }
    }

    points
}

/// Number of character slots `word` occupies in the layout.
#[inline]
pub fn letter_count(word: &str) -> usize {
    word.to_uppercase().chars().count()
}
