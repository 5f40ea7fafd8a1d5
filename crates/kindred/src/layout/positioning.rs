//! Positioning helpers shared by the layout engine.
//!
//! Reusable one-dimensional placement logic: centroids, extents, and the
//! collision sweep that enforces a minimum separation within a generation.

/// Calculate the arithmetic mean of a set of positions
///
/// # Arguments
/// * `values` - The positions to average
///
/// # Returns
/// The mean, or `None` for an empty set
pub(crate) fn centroid(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f32>() / values.len() as f32)
}

/// Calculate the minimum and maximum of a set of positions
///
/// # Returns
/// `(min, max)`, or `None` for an empty set
pub(crate) fn extent(values: impl Iterator<Item = f32>) -> Option<(f32, f32)> {
    values.fold(None, |acc, value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Push overlapping positions apart while preserving relative order
///
/// The slice must already be sorted by position. A single left-to-right sweep
/// moves each element right until it sits at least `min_separation` from its
/// left neighbor; elements are never moved left, so the relative order is
/// kept.
///
/// # Arguments
/// * `positions` - Sorted positions to adjust in place
/// * `min_separation` - Minimum center-to-center distance between neighbors
pub(crate) fn sweep_apart(positions: &mut [f32], min_separation: f32) {
    for i in 1..positions.len() {
        let floor = positions[i - 1] + min_separation;
        if positions[i] < floor {
            positions[i] = floor;
        }
    }
}
