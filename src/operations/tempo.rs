//! Coarse tempo estimation from onset envelope peaks.
//!
//! Peaks above a fixed threshold are collected, the intervals between
//! consecutive peaks are bucketed into a histogram, and the most populated
//! bucket is converted to beats per minute:
//!
//! ```text
//! bucket(Δt) = round(Δt / w)          for min_interval < Δt < max_interval
//! BPM        = round(60 / (w · argmax_bucket count))
//! ```
//!
//! This is not a beat tracker. The estimate is advisory metadata for display
//! and does not influence marker placement. It returns 0 rather than guessing
//! when there are too few peaks.

use tracing::trace;

use super::peak_picking::{PeakComparison, local_maxima};
use super::types::TempoConfig;
use crate::CutResult;

/// Estimate tempo with the reference settings.
///
/// `values` and `times` are the smoothed envelope and its timestamps. Returns
/// an integer BPM, or 0 when the estimate is unreliable.
///
/// # Examples
///
/// ```rust
/// use onset_cuts::estimate_tempo;
///
/// // A peak every 0.5 s, fourteen in all.
/// let times: Vec<f64> = (0..700).map(|i| i as f64 * 0.01).collect();
/// let values: Vec<f64> = (0..700).map(|i| if i % 50 == 25 { 1.0 } else { 0.0 }).collect();
/// assert_eq!(estimate_tempo(&values, &times), 120);
/// ```
pub fn estimate_tempo(values: &[f64], times: &[f64]) -> u32 {
    tempo_from_peaks(values, times, &TempoConfig::new())
}

/// Estimate tempo with custom settings.
///
/// # Errors
/// Returns an error if `config` fails validation.
pub fn estimate_tempo_with(values: &[f64], times: &[f64], config: &TempoConfig) -> CutResult<u32> {
    config.validate()?;
    Ok(tempo_from_peaks(values, times, config))
}

/// Core of the estimator; `config` must already be valid.
pub(crate) fn tempo_from_peaks(values: &[f64], times: &[f64], config: &TempoConfig) -> u32 {
    let len = values.len().min(times.len());
    let peak_times: Vec<f64> =
        local_maxima(&values[..len], config.peak_threshold, PeakComparison::NonStrict)
            .map(|i| times[i])
            .collect();

    if peak_times.len() < config.min_peaks {
        trace!(peaks = peak_times.len(), "too few peaks for a tempo estimate");
        return 0;
    }

    // Insertion-ordered so the first bucket to reach the top count wins ties.
    let mut histogram: Vec<(i64, usize)> = Vec::new();
    for interval in peak_times.windows(2).map(|w| w[1] - w[0]) {
        if interval <= config.min_interval || interval >= config.max_interval {
            continue;
        }
        let bucket = (interval / config.bucket_width).round() as i64;
        match histogram.iter_mut().find(|(key, _)| *key == bucket) {
            Some((_, count)) => *count += 1,
            None => histogram.push((bucket, 1)),
        }
    }

    let mut best: Option<(i64, usize)> = None;
    for &(bucket, count) in &histogram {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((bucket, count));
        }
    }

    match best {
        Some((bucket, _)) if bucket > 0 => {
            let interval = bucket as f64 * config.bucket_width;
            (60.0 / interval).round() as u32
        }
        _ => 0,
    }
}
