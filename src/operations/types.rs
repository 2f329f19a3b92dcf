//! Supporting types for onset analysis and marker placement.
//!
//! Configuration structs follow one pattern: a `const fn new()` carrying the
//! reference defaults, `with_*` setters for builder-style tweaks, and a
//! `validate()` that rejects values the algorithms cannot work with.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{CutError, CutResult, ParameterError};

/// Configuration for the tempo estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoConfig {
    /// Minimum envelope value for a local maximum to count as a beat peak.
    pub peak_threshold: f64,
    /// Fewer peaks than this yields an undetermined (0) tempo.
    pub min_peaks: usize,
    /// Histogram bucket width in seconds.
    pub bucket_width: f64,
    /// Shortest inter-peak interval considered, exclusive (200 BPM).
    pub min_interval: f64,
    /// Longest inter-peak interval considered, exclusive (40 BPM).
    pub max_interval: f64,
}

impl TempoConfig {
    /// Reference tempo estimation settings.
    pub const fn new() -> Self {
        Self {
            peak_threshold: 0.3,
            min_peaks: 10,
            bucket_width: 0.05,
            min_interval: 0.3,
            max_interval: 1.5,
        }
    }

    /// Set the peak threshold.
    pub const fn with_peak_threshold(mut self, threshold: f64) -> Self {
        self.peak_threshold = threshold;
        self
    }

    /// Set the minimum number of peaks needed for an estimate.
    pub const fn with_min_peaks(mut self, min_peaks: usize) -> Self {
        self.min_peaks = min_peaks;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns an error if the bucket width is not positive or the interval
    /// range is empty.
    pub fn validate(&self) -> CutResult<()> {
        if !(self.bucket_width.is_finite() && self.bucket_width > 0.0) {
            return Err(ParameterError::invalid_value("bucket_width", "must be > 0").into());
        }
        if !(self.min_interval.is_finite()
            && self.max_interval.is_finite()
            && self.min_interval >= 0.0
            && self.min_interval < self.max_interval)
        {
            return Err(ParameterError::invalid_value(
                "min_interval",
                format!(
                    "interval range ({}, {}) is empty",
                    self.min_interval, self.max_interval
                ),
            )
            .into());
        }
        if !self.peak_threshold.is_finite() {
            return Err(ParameterError::invalid_value("peak_threshold", "must be finite").into());
        }
        Ok(())
    }
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for onset envelope extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeConfig {
    /// Analysis window length in samples.
    pub window_size: usize,
    /// Hop between successive windows in samples.
    pub hop_size: usize,
    /// Width of the centered moving-average smoother.
    pub smoothing_width: usize,
    /// Lower bound for the normalization divisor, so silence maps to zeros.
    pub normalization_floor: f64,
    /// Tempo estimation settings applied to the smoothed envelope.
    pub tempo: TempoConfig,
}

impl EnvelopeConfig {
    /// Reference settings: 2048-sample windows, 441-sample hop (10 ms at 44.1 kHz).
    pub const fn new() -> Self {
        Self {
            window_size: 2048,
            hop_size: 441,
            smoothing_width: 5,
            normalization_floor: 1e-5,
            tempo: TempoConfig::new(),
        }
    }

    /// Settings with a hop of 10 ms at the given sample rate and a window of
    /// roughly 46 ms, the same time resolution the reference settings give at 44.1 kHz.
    pub fn for_sample_rate(sample_rate: u32) -> Self {
        let rate = sample_rate as usize;
        Self {
            window_size: (rate * 2048 / 44100).max(1),
            hop_size: (rate / 100).max(1),
            ..Self::new()
        }
    }

    /// Set the analysis window length.
    pub const fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the hop size.
    pub const fn with_hop_size(mut self, hop_size: usize) -> Self {
        self.hop_size = hop_size;
        self
    }

    /// Set the smoothing width.
    pub const fn with_smoothing_width(mut self, width: usize) -> Self {
        self.smoothing_width = width;
        self
    }

    /// Set the tempo configuration.
    pub const fn with_tempo(mut self, tempo: TempoConfig) -> Self {
        self.tempo = tempo;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns an error if any size is zero or the normalization floor is not positive.
    pub fn validate(&self) -> CutResult<()> {
        if self.window_size == 0 {
            return Err(ParameterError::invalid_value("window_size", "must be > 0").into());
        }
        if self.hop_size == 0 {
            return Err(ParameterError::invalid_value("hop_size", "must be > 0").into());
        }
        if self.smoothing_width == 0 {
            return Err(ParameterError::invalid_value("smoothing_width", "must be > 0").into());
        }
        if !(self.normalization_floor.is_finite() && self.normalization_floor > 0.0) {
            return Err(
                ParameterError::invalid_value("normalization_floor", "must be > 0").into(),
            );
        }
        self.tempo.validate()
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimum and maximum shot durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationBounds {
    /// Shortest allowed gap between consecutive markers.
    pub min_duration: f64,
    /// Longest allowed gap between consecutive markers.
    pub max_duration: f64,
}

impl DurationBounds {
    /// Create new bounds.
    pub const fn new(min_duration: f64, max_duration: f64) -> Self {
        Self {
            min_duration,
            max_duration,
        }
    }

    /// Validate the bounds.
    ///
    /// # Errors
    /// Returns an error unless `0 < min_duration <= max_duration` and both are finite.
    pub fn validate(&self) -> CutResult<()> {
        if !(self.min_duration.is_finite() && self.min_duration > 0.0) {
            return Err(ParameterError::invalid_value(
                "min_duration",
                format!("must be a finite value > 0, got {}", self.min_duration),
            )
            .into());
        }
        if !(self.max_duration.is_finite() && self.max_duration >= self.min_duration) {
            return Err(ParameterError::invalid_value(
                "max_duration",
                format!(
                    "must be finite and >= min_duration ({}), got {}",
                    self.min_duration, self.max_duration
                ),
            )
            .into());
        }
        Ok(())
    }
}

/// Parameters for a single placement run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Shortest allowed gap between consecutive markers, in seconds.
    pub min_duration: f64,
    /// Longest allowed gap between consecutive markers, in seconds.
    pub max_duration: f64,
    /// 1.0 accepts the first candidate peak; 0.0 is maximally picky.
    pub sensitivity: f64,
}

impl PlacementConfig {
    /// Create a new placement configuration.
    pub const fn new(min_duration: f64, max_duration: f64, sensitivity: f64) -> Self {
        Self {
            min_duration,
            max_duration,
            sensitivity,
        }
    }

    /// Create a configuration from duration bounds and a sensitivity.
    pub const fn from_bounds(bounds: DurationBounds, sensitivity: f64) -> Self {
        Self::new(bounds.min_duration, bounds.max_duration, sensitivity)
    }

    /// Set the sensitivity.
    pub const fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// The duration bounds of this configuration.
    pub const fn bounds(&self) -> DurationBounds {
        DurationBounds::new(self.min_duration, self.max_duration)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns an error if the bounds are invalid or sensitivity lies outside `[0, 1]`.
    pub fn validate(&self) -> CutResult<()> {
        self.bounds().validate()?;
        if !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(
                ParameterError::out_of_range("sensitivity", self.sensitivity, 0.0, 1.0).into(),
            );
        }
        Ok(())
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self::new(2.0, 4.0, 0.5)
    }
}

/// Normalized onset strength over time, plus an advisory tempo.
///
/// Fields are private so the invariants hold for every instance: `times` and
/// `values` have equal length, `times` is strictly increasing and every value
/// lies in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "EnvelopeParts")]
pub struct OnsetEnvelope {
    times: Vec<f64>,
    values: Vec<f64>,
    estimated_bpm: u32,
}

impl OnsetEnvelope {
    /// Build an envelope from parallel timestamp and strength sequences.
    ///
    /// # Errors
    /// - [`CutError::DimensionMismatch`] if the sequences differ in length.
    /// - [`CutError::InvalidEnvelope`] if timestamps are not finite and strictly
    ///   increasing, or a value lies outside `[0, 1]`.
    pub fn new(times: Vec<f64>, values: Vec<f64>, estimated_bpm: u32) -> CutResult<Self> {
        if times.len() != values.len() {
            return Err(CutError::DimensionMismatch(format!(
                "envelope has {} timestamps but {} values",
                times.len(),
                values.len()
            )));
        }
        if let Some(t) = times.iter().find(|t| !t.is_finite()) {
            return Err(CutError::InvalidEnvelope(format!(
                "timestamp {t} is not finite"
            )));
        }
        if let Some(i) = times.windows(2).position(|w| w[1] <= w[0]) {
            return Err(CutError::InvalidEnvelope(format!(
                "timestamps must be strictly increasing (index {} -> {})",
                i,
                i + 1
            )));
        }
        if let Some(v) = values.iter().find(|v| !(0.0..=1.0).contains(*v)) {
            return Err(CutError::InvalidEnvelope(format!(
                "strength {v} is outside [0, 1]"
            )));
        }
        Ok(Self::from_parts(times, values, estimated_bpm))
    }

    /// An envelope for audio too short to form a single analysis window.
    pub const fn empty() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
            estimated_bpm: 0,
        }
    }

    /// Assemble an envelope whose invariants the caller has already ensured.
    pub(crate) const fn from_parts(times: Vec<f64>, values: Vec<f64>, estimated_bpm: u32) -> Self {
        Self {
            times,
            values,
            estimated_bpm,
        }
    }

    /// Window start times in seconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Normalized onset strengths, parallel to [`times`](Self::times).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Estimated tempo, or 0 when undetermined.
    pub const fn estimated_bpm(&self) -> u32 {
        self.estimated_bpm
    }

    /// Number of analysis windows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the envelope has no windows.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Timestamp of the last analysis window, if any.
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Strength of the last window starting at or before `time`.
    pub fn strength_at(&self, time: f64) -> Option<f64> {
        let idx = self.times.partition_point(|&t| t <= time);
        idx.checked_sub(1).map(|i| self.values[i])
    }
}

#[derive(Deserialize)]
struct EnvelopeParts {
    times: Vec<f64>,
    values: Vec<f64>,
    estimated_bpm: u32,
}

impl TryFrom<EnvelopeParts> for OnsetEnvelope {
    type Error = CutError;

    fn try_from(parts: EnvelopeParts) -> CutResult<Self> {
        Self::new(parts.times, parts.values, parts.estimated_bpm)
    }
}

/// Why a marker was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerType {
    /// A candidate onset that passed the decaying threshold.
    Cut,
    /// A fallback: the strongest rejected candidate, or the window end when
    /// the window held no candidates at all.
    Safety,
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerType::Cut => write!(f, "cut"),
            MarkerType::Safety => write!(f, "safety"),
        }
    }
}

/// Opaque marker identifier, unique within one generated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(u32);

impl MarkerId {
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// A single cut point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    id: MarkerId,
    time: f64,
    #[serde(rename = "type")]
    marker_type: MarkerType,
    strength: f64,
}

impl Marker {
    pub(crate) const fn new(id: MarkerId, time: f64, marker_type: MarkerType, strength: f64) -> Self {
        Self {
            id,
            time,
            marker_type,
            strength,
        }
    }

    /// Identifier of this marker.
    pub const fn id(&self) -> MarkerId {
        self.id
    }

    /// Position in seconds.
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Whether this is a threshold cut or a fallback.
    pub const fn marker_type(&self) -> MarkerType {
        self.marker_type
    }

    /// Onset strength at the marker, 0 for a window-end fallback.
    pub const fn strength(&self) -> f64 {
        self.strength
    }

    /// Returns true for [`MarkerType::Cut`] markers.
    pub const fn is_cut(&self) -> bool {
        matches!(self.marker_type, MarkerType::Cut)
    }
}
