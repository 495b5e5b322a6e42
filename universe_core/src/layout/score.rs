//! Score → size and score → orbit radius. Pure functions of the score.

use crate::data::{clamp_score, MAX_SCORE, MIN_SCORE};

/// Score normalized to `[0, 1]` after clamping.
pub fn normalized_score(score: f32) -> f32 {
    (clamp_score(score) - MIN_SCORE) / (MAX_SCORE - MIN_SCORE)
}

/// Linear, monotonically non-decreasing size multiplier.
pub fn size_multiplier(score: f32, min_size: f32, max_size: f32) -> f32 {
    min_size + (max_size - min_size) * normalized_score(score)
}

/// Ring index for a score, 0 being the innermost (best) ring.
pub fn tier_index(score: f32, tier_count: usize) -> usize {
    let tiers = tier_count.max(1);
    let from_top = 1.0 - normalized_score(score);
    ((from_top * tiers as f32) as usize).min(tiers - 1)
}

/// Orbit radius for a score: higher scores sit closer to the focal point.
pub fn tier_radius(score: f32, tier_count: usize, inner: f32, outer: f32) -> f32 {
    let tiers = tier_count.max(1);
    if tiers == 1 {
        return inner;
    }
    let t = tier_index(score, tiers) as f32 / (tiers - 1) as f32;
    inner + (outer - inner) * t
}
