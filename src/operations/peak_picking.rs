//! Local-maximum scanning over onset envelopes.
//!
//! Two consumers look for peaks in the same envelope with slightly different
//! rules:
//!
//! - The tempo estimator treats plateaus as peaks (`x[n] >= x[n-1] && x[n] >= x[n+1]`),
//!   so a flat-topped onset still contributes a beat.
//! - Marker placement requires a strict maximum (`x[n] > x[n-1] && x[n] > x[n+1]`),
//!   so a plateau never yields a run of adjacent candidates.
//!
//! Only interior samples are ever peaks; the first and last samples lack a neighbour.

/// How a sample is compared against its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakComparison {
    /// `x[n] > x[n-1] && x[n] > x[n+1]`
    Strict,
    /// `x[n] >= x[n-1] && x[n] >= x[n+1]`
    NonStrict,
}

/// Returns true if `values[idx]` is an interior local maximum under `comparison`.
#[inline]
pub fn is_local_maximum(values: &[f64], idx: usize, comparison: PeakComparison) -> bool {
    if idx == 0 || idx + 1 >= values.len() {
        return false;
    }
    let (prev, cur, next) = (values[idx - 1], values[idx], values[idx + 1]);
    match comparison {
        PeakComparison::Strict => cur > prev && cur > next,
        PeakComparison::NonStrict => cur >= prev && cur >= next,
    }
}

/// Indices of interior local maxima whose value exceeds `threshold`, in order.
///
/// # Examples
///
/// ```rust
/// use onset_cuts::operations::peak_picking::{local_maxima, PeakComparison};
///
/// let env = [0.0, 0.8, 0.1, 0.4, 0.4, 0.0];
/// let strict: Vec<usize> = local_maxima(&env, 0.3, PeakComparison::Strict).collect();
/// assert_eq!(strict, vec![1]);
///
/// let plateau: Vec<usize> = local_maxima(&env, 0.3, PeakComparison::NonStrict).collect();
/// assert_eq!(plateau, vec![1, 3, 4]);
/// ```
pub fn local_maxima(
    values: &[f64],
    threshold: f64,
    comparison: PeakComparison,
) -> impl Iterator<Item = usize> + '_ {
    (1..values.len().saturating_sub(1))
        .filter(move |&i| values[i] > threshold && is_local_maximum(values, i, comparison))
}

/// Index of the largest value, keeping the leftmost on ties.
///
/// Returns `None` for an empty slice.
#[inline]
pub fn leftmost_argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, val) in values.into_iter().enumerate() {
        match best {
            Some((_, best_val)) if val <= best_val => {}
            _ => best = Some((idx, val)),
        }
    }
    best.map(|(idx, _)| idx)
}
