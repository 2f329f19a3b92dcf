//! Deterministic test-signal generation.
//!
//! These helpers build [`SampleBuffer`]s with known onset structure for tests,
//! benchmarks and host-side calibration. None of them use randomness, so the
//! same arguments always give the same samples.

use std::f64::consts::PI;
use std::num::NonZeroU32;
use std::time::Duration;

use ndarray::Array1;

use crate::{AudioSample, SampleBuffer};

/// Carrier frequency of the bursts produced by [`burst_train`].
pub const BURST_CARRIER_HZ: f64 = 440.0;

#[inline]
fn sample_count(duration: Duration, sample_rate: NonZeroU32) -> usize {
    (duration.as_secs_f64() * f64::from(sample_rate.get())).round() as usize
}

#[inline]
fn cast<T: AudioSample>(value: f64) -> T {
    num_traits::cast(value).unwrap_or_else(T::zero)
}

/// Generates silence (all-zero samples).
pub fn silence<T: AudioSample>(duration: Duration, sample_rate: NonZeroU32) -> SampleBuffer<T> {
    SampleBuffer::new_mono(
        Array1::from_elem(sample_count(duration, sample_rate), T::zero()),
        sample_rate,
    )
}

/// Generates a steady sine wave.
///
/// # Arguments
/// * `frequency` - Frequency in Hz
/// * `duration` - Length of the signal
/// * `sample_rate` - Sample rate in Hz
/// * `amplitude` - Peak amplitude (0.0 to 1.0)
pub fn sine_wave<T: AudioSample>(
    frequency: f64,
    duration: Duration,
    sample_rate: NonZeroU32,
    amplitude: f64,
) -> SampleBuffer<T> {
    let rate = f64::from(sample_rate.get());
    let samples = Array1::from_shape_fn(sample_count(duration, sample_rate), |i| {
        cast(amplitude * (2.0 * PI * frequency * i as f64 / rate).sin())
    });
    SampleBuffer::new_mono(samples, sample_rate)
}

/// Generates a train of decaying sine bursts, one per beat.
///
/// Beats fall at `first_beat + k · 60 / bpm`. Each burst starts at full
/// `amplitude` and decays linearly to zero over `burst_length`, giving a sharp
/// energy rise at every beat and silence in between.
///
/// A non-positive `bpm` yields a single burst at `first_beat`.
///
/// # Examples
///
/// ```rust
/// use onset_cuts::{burst_train, compute_onset_envelope, SampleBuffer};
/// use std::num::NonZeroU32;
/// use std::time::Duration;
///
/// let rate = NonZeroU32::new(44100).unwrap();
/// let audio: SampleBuffer<f32> = burst_train(
///     120.0,
///     Duration::from_millis(250),
///     Duration::from_millis(100),
///     Duration::from_secs(10),
///     rate,
///     0.8,
/// );
/// assert_eq!(compute_onset_envelope(&audio).estimated_bpm(), 120);
/// ```
pub fn burst_train<T: AudioSample>(
    bpm: f64,
    first_beat: Duration,
    burst_length: Duration,
    duration: Duration,
    sample_rate: NonZeroU32,
    amplitude: f64,
) -> SampleBuffer<T> {
    let rate = f64::from(sample_rate.get());
    let num_samples = sample_count(duration, sample_rate);
    let burst_samples = sample_count(burst_length, sample_rate);
    let mut samples = Array1::from_elem(num_samples, T::zero());

    let beat_interval = (bpm > 0.0).then(|| 60.0 / bpm);
    let first = first_beat.as_secs_f64();

    for beat in 0usize.. {
        let onset_time = match beat_interval {
            Some(interval) => first + beat as f64 * interval,
            None if beat == 0 => first,
            None => break,
        };
        let start = (onset_time * rate).round() as usize;
        if start >= num_samples {
            break;
        }
        let end = (start + burst_samples).min(num_samples);
        for (j, idx) in (start..end).enumerate() {
            let decay = 1.0 - j as f64 / burst_samples as f64;
            let carrier = (2.0 * PI * BURST_CARRIER_HZ * j as f64 / rate).sin();
            samples[idx] = cast(amplitude * decay * carrier);
        }
    }

    SampleBuffer::new_mono(samples, sample_rate)
}
