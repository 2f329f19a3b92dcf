//! Marker placement with a decaying ("desperation") threshold.
//!
//! Markers are placed greedily from the start of the track. After each marker
//! the next one must land inside the window
//!
//! ```text
//! [cursor + min_duration, min(cursor + max_duration, total_duration)]
//! ```
//!
//! Candidates are strict local maxima of the envelope inside that window whose
//! strength exceeds a noise floor. They are visited in time order and the first
//! one that clears a threshold decaying with its position in the window is
//! taken as a [`MarkerType::Cut`]:
//!
//! ```text
//! progress  = (t − win_start) / (win_end − win_start + ε)      clamped to [0, 1]
//! threshold = (1 − sensitivity) · (1 − progress)^1.5
//! ```
//!
//! The further into the window, the weaker the onset that is accepted. If
//! every candidate is rejected, the strongest one (leftmost on ties) is placed
//! as a [`MarkerType::Safety`] marker. If the window has no candidates at all,
//! a zero-strength safety marker goes at the window end, so a marker gap never
//! exceeds `max_duration`.
//!
//! Finally, a last marker within half a second of the end of the track is
//! dropped to avoid a uselessly short closing shot.

use tracing::{debug, trace, warn};

use super::peak_picking::{PeakComparison, is_local_maximum, leftmost_argmax};
use super::types::{Marker, MarkerId, MarkerType, OnsetEnvelope, PlacementConfig};
use crate::{CutResult, ParameterError};

/// Candidates at or below this strength are treated as noise.
pub const NOISE_FLOOR: f64 = 0.05;

/// Exponent of the threshold decay curve.
pub const DECAY_EXPONENT: f64 = 1.5;

/// A final marker closer than this to the end of the track is removed.
pub const END_TRIM_SECONDS: f64 = 0.5;

/// Added to the window width when computing progress, for zero-width windows.
const PROGRESS_EPSILON: f64 = 1e-4;

/// Places markers over `envelope` for a track of `total_duration` seconds.
///
/// The output is strictly increasing in time and every marker lies in
/// `[0, total_duration)`. The function is pure: identical inputs give
/// identical markers, including their ids.
///
/// # Errors
/// Returns an error if `config` fails validation or `total_duration` is
/// negative or not finite.
///
/// # Examples
///
/// ```rust
/// use onset_cuts::{generate_markers, MarkerType, OnsetEnvelope, PlacementConfig};
///
/// // 10 s of silence: nothing to cut on, so safety markers every max_duration.
/// let times: Vec<f64> = (0..1000).map(|i| i as f64 * 0.01).collect();
/// let envelope = OnsetEnvelope::new(times, vec![0.0; 1000], 0)?;
/// let markers = generate_markers(&envelope, &PlacementConfig::new(2.0, 4.0, 0.5), 10.0)?;
///
/// let times: Vec<f64> = markers.iter().map(|m| m.time()).collect();
/// assert_eq!(times, vec![4.0, 8.0]);
/// assert!(markers.iter().all(|m| m.marker_type() == MarkerType::Safety));
/// # Ok::<(), onset_cuts::CutError>(())
/// ```
pub fn generate_markers(
    envelope: &OnsetEnvelope,
    config: &PlacementConfig,
    total_duration: f64,
) -> CutResult<Vec<Marker>> {
    config.validate()?;
    validate_total_duration(total_duration)?;
    Ok(place_markers(envelope, config, total_duration))
}

pub(crate) fn validate_total_duration(total_duration: f64) -> CutResult<()> {
    if !(total_duration.is_finite() && total_duration >= 0.0) {
        return Err(ParameterError::invalid_value(
            "total_duration",
            format!("must be a finite value >= 0, got {total_duration}"),
        )
        .into());
    }
    Ok(())
}

/// Placement loop; `config` and `total_duration` must already be valid.
pub(crate) fn place_markers(
    envelope: &OnsetEnvelope,
    config: &PlacementConfig,
    total_duration: f64,
) -> Vec<Marker> {
    place_markers_from(envelope, config, total_duration, 0.0)
}

/// Placement loop starting with the cursor at `start`.
fn place_markers_from(
    envelope: &OnsetEnvelope,
    config: &PlacementConfig,
    total_duration: f64,
    start: f64,
) -> Vec<Marker> {
    let times = envelope.times();
    let values = envelope.values();

    let mut markers: Vec<Marker> = Vec::new();
    let mut cursor = start;
    // Window starts only move forward, so the scan never has to revisit
    // envelope indices before the previous window start.
    let mut scan_from = 0;

    while cursor + config.min_duration < total_duration {
        let win_start = cursor + config.min_duration;
        let win_end = (cursor + config.max_duration).min(total_duration);

        // `win_start` can round down to `cursor` for tiny durations, so the
        // previous marker's own frame is skipped explicitly.
        while scan_from < times.len()
            && (times[scan_from] < win_start || times[scan_from] <= cursor)
        {
            scan_from += 1;
        }
        let candidates = collect_candidates(times, values, scan_from, win_end);

        let (time, marker_type, strength) =
            choose(&candidates, win_start, win_end, config.sensitivity)
                .unwrap_or((win_end, MarkerType::Safety, 0.0));

        trace!(
            win_start,
            win_end,
            candidates = candidates.len(),
            time,
            %marker_type,
            "placed marker"
        );

        if time <= cursor {
            warn!(cursor, time, "marker would not advance the cursor; stopping placement");
            break;
        }

        markers.push(Marker::new(
            MarkerId::new(markers.len() as u32),
            time,
            marker_type,
            strength,
        ));
        cursor = time;
    }

    if markers
        .last()
        .is_some_and(|m| total_duration - m.time() < END_TRIM_SECONDS)
    {
        markers.pop();
    }

    let cuts = markers.iter().filter(|m| m.is_cut()).count();
    debug!(
        markers = markers.len(),
        cuts,
        safety = markers.len() - cuts,
        sensitivity = config.sensitivity,
        "marker placement finished"
    );

    markers
}

/// A candidate onset inside the current window.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    time: f64,
    strength: f64,
}

/// Strict local maxima above the noise floor from `from` up to `win_end` inclusive.
fn collect_candidates(times: &[f64], values: &[f64], from: usize, win_end: f64) -> Vec<Candidate> {
    times[from..]
        .iter()
        .take_while(|&&t| t <= win_end)
        .enumerate()
        .map(|(offset, &time)| (from + offset, time))
        .filter(|&(idx, _)| {
            values[idx] > NOISE_FLOOR && is_local_maximum(values, idx, PeakComparison::Strict)
        })
        .map(|(idx, time)| Candidate {
            time,
            strength: values[idx],
        })
        .collect()
}

/// The acceptance bar for a candidate at `time` inside the window.
#[inline]
fn desperation_threshold(time: f64, win_start: f64, win_end: f64, sensitivity: f64) -> f64 {
    let progress = ((time - win_start) / (win_end - win_start + PROGRESS_EPSILON)).clamp(0.0, 1.0);
    (1.0 - sensitivity) * (1.0 - progress).powf(DECAY_EXPONENT)
}

/// First candidate that clears its threshold as a cut, otherwise the strongest
/// as a safety marker. `None` when there are no candidates.
fn choose(
    candidates: &[Candidate],
    win_start: f64,
    win_end: f64,
    sensitivity: f64,
) -> Option<(f64, MarkerType, f64)> {
    if let Some(hit) = candidates.iter().find(|c| {
        c.strength >= desperation_threshold(c.time, win_start, win_end, sensitivity)
    }) {
        return Some((hit.time, MarkerType::Cut, hit.strength));
    }
    leftmost_argmax(candidates.iter().map(|c| c.strength)).map(|idx| {
        let fallback = candidates[idx];
        (fallback.time, MarkerType::Safety, fallback.strength)
    })
}
