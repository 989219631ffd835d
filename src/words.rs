//! Built-in word list.

/// Words the scheduler draws from unless a custom list is configured.
///
/// All entries spell with [`glyphs::SUPPORTED`](crate::glyphs::SUPPORTED)
/// characters and are at most seven slots long.
pub const DEFAULT_WORDS: [&str; 32] = [
    "CALM", "PEACE", "BREATHE", "RELAX", "FLOW", "EASE", "STILL", "REST",
    "SOFT", "LIGHT", "HOPE", "LOVE", "TRUST", "GRACE", "LET GO", "JOY",
    "WARM", "OPEN", "FREE", "NOW", "HERE", "SLOW", "DRIFT", "GLOW",
    "CLEAR", "KIND", "QUIET", "PRESENT", "RELEASE", "SERENE", "BALANCE", "CENTER",
];
