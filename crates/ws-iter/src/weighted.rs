//! Weighted index selection shared by RandomList and Selector.

use ws_core::TraversalRng;

/// Pick an index into `weights` with probability proportional to its weight.
///
/// Negative and NaN weights count as zero.  An empty slice yields 0 and a
/// slice whose weights sum to zero (or overflow) falls back to a uniform pick.
pub fn choose_weighted(weights: &[f32], rng: &mut TraversalRng) -> usize {
    if weights.is_empty() {
        return 0;
    }

    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if !(total > 0.0) || !total.is_finite() {
        return rng.index(weights.len()).unwrap_or(0);
    }

    let u = rng.gen_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, w) in weights.iter().enumerate() {
        cumulative += w.max(0.0);
        if u < cumulative {
            return i;
        }
    }
    // Rounding can leave `u` a hair above the final sum.
    weights.len() - 1
}
