//! Onset strength envelope extraction.
//!
//! The envelope is a time-domain proxy for musical onsets: the half-wave
//! rectified first difference of windowed RMS energy, peak-normalized and
//! lightly smoothed.
//!
//! ## Mathematical Foundation
//!
//! For analysis windows of `W` samples advanced by a hop of `H` samples:
//!
//! ```text
//! rms[n]  = sqrt( (1/W) · Σ x[nH + k]² )            k = 0..W
//! raw[n]  = max(0, rms[n] − rms[n−1])               rms[−1] = 0
//! norm[n] = raw[n] / max(max(raw), ε)
//! env[n]  = mean(norm[n−2 ..= n+2] ∩ valid indices)
//! t[n]    = nH / fs
//! ```
//!
//! The number of windows is `floor((N − W) / H)`; when that is not positive the
//! envelope is empty. Rising energy marks an onset, falling energy is ignored,
//! and the `ε` floor keeps a silent track at all zeros instead of dividing by zero.
//!
//! Only the first channel of the buffer is analysed.

use ndarray::{ArrayView1, s};
use tracing::debug;

use super::tempo::tempo_from_peaks;
use super::types::{EnvelopeConfig, OnsetEnvelope};
use crate::{AudioSample, CutResult, SampleBuffer};

/// Computes the onset envelope of the buffer's first channel with the
/// reference parameters (2048-sample windows, 441-sample hop).
///
/// # Examples
///
/// ```rust
/// use onset_cuts::{compute_onset_envelope, SampleBuffer};
/// use ndarray::Array1;
/// use std::num::NonZeroU32;
///
/// let rate = NonZeroU32::new(44100).unwrap();
/// let audio = SampleBuffer::new_mono(Array1::<f32>::zeros(44100), rate);
/// let env = compute_onset_envelope(&audio);
///
/// assert_eq!(env.len(), (44100 - 2048) / 441);
/// assert!(env.values().iter().all(|&v| v == 0.0));
/// assert_eq!(env.estimated_bpm(), 0);
/// ```
pub fn compute_onset_envelope<T: AudioSample>(buffer: &SampleBuffer<T>) -> OnsetEnvelope {
    envelope_from_samples(
        buffer.first_channel(),
        buffer.sample_rate(),
        &EnvelopeConfig::new(),
    )
}

/// Computes the onset envelope with custom analysis parameters.
///
/// # Errors
/// Returns an error if `config` fails validation.
pub fn compute_onset_envelope_with<T: AudioSample>(
    buffer: &SampleBuffer<T>,
    config: &EnvelopeConfig,
) -> CutResult<OnsetEnvelope> {
    config.validate()?;
    Ok(envelope_from_samples(
        buffer.first_channel(),
        buffer.sample_rate(),
        config,
    ))
}

fn envelope_from_samples<T: AudioSample>(
    samples: ArrayView1<'_, T>,
    sample_rate: u32,
    config: &EnvelopeConfig,
) -> OnsetEnvelope {
    let (window, hop) = (config.window_size, config.hop_size);
    let num_windows = samples.len().saturating_sub(window) / hop;
    if num_windows == 0 {
        debug!(
            samples = samples.len(),
            window, "audio shorter than one analysis window"
        );
        return OnsetEnvelope::empty();
    }

    let rms: Vec<f64> = (0..num_windows)
        .map(|n| {
            let start = n * hop;
            window_rms(samples.slice(s![start..start + window]))
        })
        .collect();

    let flux = rectified_flux(&rms);
    let normalized = normalize_peak(&flux, config.normalization_floor);
    let smoothed = centered_moving_average(&normalized, config.smoothing_width);

    let rate = f64::from(sample_rate);
    let times: Vec<f64> = (0..num_windows)
        .map(|n| (n * hop) as f64 / rate)
        .collect();

    let estimated_bpm = tempo_from_peaks(&smoothed, &times, &config.tempo);
    debug!(
        windows = num_windows,
        estimated_bpm, "onset envelope computed"
    );

    OnsetEnvelope::from_parts(times, smoothed, estimated_bpm)
}

/// Root-mean-square of a window.
#[inline]
fn window_rms<T: AudioSample>(window: ArrayView1<'_, T>) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = window
        .iter()
        .map(|&x| {
            let x = x.as_f64();
            x * x
        })
        .sum();
    (sum_sq / window.len() as f64).sqrt()
}

/// Positive first difference, seeded with a zero predecessor.
fn rectified_flux(rms: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    rms.iter()
        .map(|&cur| {
            let delta = (cur - prev).max(0.0);
            prev = cur;
            delta
        })
        .collect()
}

/// Divide by the maximum, with `floor` as the smallest permitted divisor.
fn normalize_peak(values: &[f64], floor: f64) -> Vec<f64> {
    let peak = values.iter().copied().fold(floor, f64::max);
    values.iter().map(|&v| v / peak).collect()
}

/// Centered moving average. Windows at the edges shrink to the in-range
/// neighbours instead of being zero-padded.
fn centered_moving_average(values: &[f64], width: usize) -> Vec<f64> {
    let len = values.len();
    let before = width / 2;
    let after = width.saturating_sub(1) - before;
    (0..len)
        .map(|i| {
            let start = i.saturating_sub(before);
            let end = (i + after + 1).min(len);
            let window = &values[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}
