//! Weighted random index selection.

/// Picks an index with probability proportional to `exp(log_weights[i])`.
///
/// The weights are shifted by their maximum before exponentiating, so the
/// largest becomes exactly `1` and none can overflow; weights far below the
/// maximum may underflow to zero and are then never picked. Draws `u`
/// uniformly from `[0, 1)`, scales it by the total weight, then walks the
/// weights accumulating until the running total first exceeds the scaled
/// draw. Ties therefore resolve to the earliest index.
///
/// # Panics
///
/// Panics if `log_weights` is empty or any log weight is not finite. Log
/// weights here are log densities, so a bad value means an upstream density
/// computation is corrupt.
pub(crate) fn dart_throw(log_weights: &[f64], rng: &mut fastrand::Rng) -> usize {
    assert!(
        !log_weights.is_empty(),
        "cannot select from an empty weight list"
    );
    if let Some((index, w)) = log_weights
        .iter()
        .enumerate()
        .find(|&(_, w)| !w.is_finite())
    {
        panic!("log weight {w} at index {index} must be finite");
    }

    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let weights: Vec<f64> = log_weights.iter().map(|w| (w - max).exp()).collect();

    let total: f64 = weights.iter().sum();
    let threshold = rng.f64() * total;

    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    // Rounding can leave the total just short of the threshold.
    weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1)
}
