//! Static glyph atlas.
//!
//! Each supported character maps to a single ordered stroke path in the
//! normalized unit square, `x` to the right and `y` up. Paths are drawn as
//! one continuous pen stroke, so some segments double back over themselves;
//! that is fine for a particle cloud and keeps resampling a simple lerp.
//!
//! The space character is present with an empty path: it occupies a letter
//! slot in the layout but contributes no points.

use glam::Vec2;

macro_rules! path {
    ($(($x:expr, $y:expr)),* $(,)?) => {
        &[$(Vec2::new($x, $y)),*]
    };
}

/// Every character with an atlas entry, in lookup order.
pub const SUPPORTED: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

const A: &[Vec2] = path![
    (0.0, 0.0), (0.25, 0.5), (0.5, 1.0), (0.75, 0.5), (1.0, 0.0),
    (0.75, 0.5), (0.5, 0.5), (0.25, 0.5),
];
const B: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.6, 1.0), (0.85, 0.9), (0.85, 0.6),
    (0.6, 0.5), (0.0, 0.5), (0.65, 0.5), (0.95, 0.4), (0.95, 0.1), (0.65, 0.0),
    (0.0, 0.0),
];
const C: &[Vec2] = path![
    (0.95, 0.85), (0.7, 1.0), (0.3, 1.0), (0.05, 0.8), (0.0, 0.5), (0.05, 0.2),
    (0.3, 0.0), (0.7, 0.0), (0.95, 0.15),
];
const D: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.5, 1.0), (0.85, 0.85), (1.0, 0.5),
    (0.85, 0.15), (0.5, 0.0), (0.0, 0.0),
];
const E: &[Vec2] = path![
    (1.0, 1.0), (0.5, 1.0), (0.0, 1.0), (0.0, 0.5), (0.5, 0.5), (0.8, 0.5),
    (0.5, 0.5), (0.0, 0.5), (0.0, 0.0), (0.5, 0.0), (1.0, 0.0),
];
const F: &[Vec2] = path![
    (1.0, 1.0), (0.5, 1.0), (0.0, 1.0), (0.0, 0.5), (0.5, 0.5), (0.8, 0.5),
    (0.5, 0.5), (0.0, 0.5), (0.0, 0.0),
];
const G: &[Vec2] = path![
    (0.95, 0.85), (0.7, 1.0), (0.3, 1.0), (0.05, 0.8), (0.0, 0.5), (0.05, 0.2),
    (0.3, 0.0), (0.7, 0.0), (1.0, 0.2), (1.0, 0.5), (0.6, 0.5),
];
const H: &[Vec2] = path![
    (0.0, 1.0), (0.0, 0.5), (0.0, 0.0), (0.0, 0.5), (0.5, 0.5), (1.0, 0.5),
    (1.0, 1.0), (1.0, 0.5), (1.0, 0.0),
];
const I: &[Vec2] = path![
    (0.2, 1.0), (0.5, 1.0), (0.8, 1.0), (0.5, 1.0), (0.5, 0.5), (0.5, 0.0),
    (0.2, 0.0), (0.8, 0.0),
];
const J: &[Vec2] = path![
    (0.3, 1.0), (0.65, 1.0), (1.0, 1.0), (0.65, 1.0), (0.65, 0.5), (0.65, 0.15),
    (0.45, 0.0), (0.2, 0.0), (0.0, 0.2),
];
const K: &[Vec2] = path![
    (0.0, 1.0), (0.0, 0.5), (0.0, 0.0), (0.0, 0.5), (0.5, 0.75), (1.0, 1.0),
    (0.5, 0.75), (0.0, 0.5), (0.5, 0.25), (1.0, 0.0),
];
const L: &[Vec2] = path![(0.0, 1.0), (0.0, 0.5), (0.0, 0.0), (0.5, 0.0), (1.0, 0.0)];
const M: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.25, 0.75), (0.5, 0.5), (0.75, 0.75),
    (1.0, 1.0), (1.0, 0.5), (1.0, 0.0),
];
const N: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.5, 0.5), (1.0, 0.0), (1.0, 0.5),
    (1.0, 1.0),
];
const O: &[Vec2] = path![
    (0.5, 1.0), (0.15, 0.85), (0.0, 0.5), (0.15, 0.15), (0.5, 0.0), (0.85, 0.15),
    (1.0, 0.5), (0.85, 0.85), (0.5, 1.0),
];
const P: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.6, 1.0), (0.9, 0.9), (1.0, 0.75),
    (0.9, 0.6), (0.6, 0.5), (0.0, 0.5),
];
const Q: &[Vec2] = path![
    (0.85, 0.15), (1.0, 0.5), (0.85, 0.85), (0.5, 1.0), (0.15, 0.85), (0.0, 0.5),
    (0.15, 0.15), (0.5, 0.0), (0.85, 0.15), (1.0, 0.0), (0.6, 0.3),
];
const R: &[Vec2] = path![
    (0.0, 0.0), (0.0, 0.5), (0.0, 1.0), (0.6, 1.0), (0.9, 0.9), (1.0, 0.75),
    (0.9, 0.6), (0.6, 0.5), (0.0, 0.5), (0.4, 0.5), (0.7, 0.25), (1.0, 0.0),
];
const S: &[Vec2] = path![
    (0.95, 0.85), (0.7, 1.0), (0.3, 1.0), (0.05, 0.85), (0.05, 0.6), (0.3, 0.5),
    (0.7, 0.5), (0.95, 0.4), (0.95, 0.15), (0.7, 0.0), (0.3, 0.0), (0.05, 0.15),
];
const T: &[Vec2] = path![
    (0.0, 1.0), (0.5, 1.0), (1.0, 1.0), (0.5, 1.0), (0.5, 0.5), (0.5, 0.0),
];
const U: &[Vec2] = path![
    (0.0, 1.0), (0.0, 0.5), (0.0, 0.2), (0.2, 0.0), (0.5, 0.0), (0.8, 0.0),
    (1.0, 0.2), (1.0, 0.5), (1.0, 1.0),
];
const V: &[Vec2] = path![(0.0, 1.0), (0.25, 0.5), (0.5, 0.0), (0.75, 0.5), (1.0, 1.0)];
const W: &[Vec2] = path![
    (0.0, 1.0), (0.125, 0.5), (0.25, 0.0), (0.5, 0.6), (0.75, 0.0), (0.875, 0.5),
    (1.0, 1.0),
];
const X: &[Vec2] = path![
    (0.0, 1.0), (0.5, 0.5), (1.0, 0.0), (0.5, 0.5), (1.0, 1.0), (0.5, 0.5),
    (0.0, 0.0),
];
const Y: &[Vec2] = path![
    (0.0, 1.0), (0.25, 0.75), (0.5, 0.5), (0.75, 0.75), (1.0, 1.0), (0.75, 0.75),
    (0.5, 0.5), (0.5, 0.25), (0.5, 0.0),
];
const Z: &[Vec2] = path![
    (0.0, 1.0), (0.5, 1.0), (1.0, 1.0), (0.5, 0.5), (0.0, 0.0), (0.5, 0.0),
    (1.0, 0.0),
];
const SPACE: &[Vec2] = &[];

/// Look up the stroke path for a character.
///
/// Lookup is case-insensitive. Returns `None` for characters outside
/// [`SUPPORTED`].
pub fn glyph(c: char) -> Option<&'static [Vec2]> {
    let path = match c.to_ascii_uppercase() {
        'A' => A,
        'B' => B,
        'C' => C,
        'D' => D,
        'E' => E,
        'F' => F,
        'G' => G,
        'H' => H,
        'I' => I,
        'J' => J,
        'K' => K,
        'L' => L,
        'M' => M,
        'N' => N,
        'O' => O,
        'P' => P,
        'Q' => Q,
        'R' => R,
        'S' => S,
        'T' => T,
        'U' => U,
        'V' => V,
        'W' => W,
        'X' => X,
        'Y' => Y,
        'Z' => Z,
        ' ' => SPACE,
        _ => return None,
    };
    Some(path)
}

/// Whether the atlas has an entry for `c`.
#[inline]
pub fn is_supported(c: char) -> bool {
    glyph(c).is_some()
}
