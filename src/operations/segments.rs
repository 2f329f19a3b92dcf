//! Shot segments derived from a marker sequence.
//!
//! A video edit consumes the spans *between* cuts. `n` markers split a track
//! into `n + 1` contiguous segments: `[0, m₀)`, `[m₀, m₁)`, …, `[mₙ₋₁, total)`.

use serde::{Deserialize, Serialize};

use super::types::{Marker, MarkerId, MarkerType};

/// One shot: the span between two consecutive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds (exclusive).
    pub end: f64,
    /// Marker opening this segment; `None` for the first segment.
    pub opened_by: Option<MarkerId>,
    /// Type of the opening marker; `None` for the first segment.
    pub opened_as: Option<MarkerType>,
}

impl Segment {
    /// Length in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Splits `[0, total_duration)` at each marker.
///
/// Markers that do not advance past the previous boundary, or that lie at or
/// beyond `total_duration`, are skipped, so the segments always tile the track.
///
/// # Examples
///
/// ```rust
/// use onset_cuts::{generate_markers, marker_segments, OnsetEnvelope, PlacementConfig};
///
/// let markers = generate_markers(&OnsetEnvelope::empty(), &PlacementConfig::new(2.0, 4.0, 0.5), 10.0)?;
/// let segments = marker_segments(&markers, 10.0);
///
/// let spans: Vec<(f64, f64)> = segments.iter().map(|s| (s.start, s.end)).collect();
/// assert_eq!(spans, vec![(0.0, 4.0), (4.0, 8.0), (8.0, 10.0)]);
/// # Ok::<(), onset_cuts::CutError>(())
/// ```
pub fn marker_segments(markers: &[Marker], total_duration: f64) -> Vec<Segment> {
    if total_duration.is_nan() || total_duration <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::with_capacity(markers.len() + 1);
    let mut current = Segment {
        start: 0.0,
        end: total_duration,
        opened_by: None,
        opened_as: None,
    };

    for marker in markers {
        let t = marker.time();
        if t <= current.start || t >= total_duration {
            continue;
        }
        segments.push(Segment { end: t, ..current });
        current = Segment {
            start: t,
            end: total_duration,
            opened_by: Some(marker.id()),
            opened_as: Some(marker.marker_type()),
        };
    }
    segments.push(current);
    segments
}

/// Summary of a marker sequence for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStats {
    /// Markers that passed the threshold.
    pub cut_count: usize,
    /// Fallback markers.
    pub safety_count: usize,
    /// Shortest segment in seconds, if the track is non-empty.
    pub shortest_segment: Option<f64>,
    /// Longest segment in seconds, if the track is non-empty.
    pub longest_segment: Option<f64>,
}

/// Counts marker types and measures the resulting segments.
pub fn summarize_markers(markers: &[Marker], total_duration: f64) -> MarkerStats {
    let cut_count = markers.iter().filter(|m| m.is_cut()).count();
    let durations: Vec<f64> = marker_segments(markers, total_duration)
        .iter()
        .map(Segment::duration)
        .collect();

    MarkerStats {
        cut_count,
        safety_count: markers.len() - cut_count,
        shortest_segment: durations.iter().copied().reduce(f64::min),
        longest_segment: durations.iter().copied().reduce(f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: u32, time: f64, marker_type: MarkerType) -> Marker {
        Marker::new(MarkerId::new(id), time, marker_type, 0.5)
    }

    #[test]
    fn segments_tile_the_track() {
        let markers = [
            marker(0, 2.5, MarkerType::Cut),
            marker(1, 6.0, MarkerType::Safety),
        ];
        let segments = marker_segments(&markers, 9.0);
        assert_eq!(segments.len(), 3);
        assert_eq!((segments[0].start, segments[0].end), (0.0, 2.5));
        assert_eq!(segments[0].opened_by, None);
        assert_eq!((segments[1].start, segments[1].end), (2.5, 6.0));
        assert_eq!(segments[1].opened_as, Some(MarkerType::Cut));
        assert_eq!((segments[2].start, segments[2].end), (6.0, 9.0));
        assert_eq!(segments[2].opened_by, Some(MarkerId::new(1)));
        assert_eq!(segments[2].duration(), 3.0);
    }

    #[test]
    fn no_markers_is_one_segment() {
        let segments = marker_segments(&[], 4.0);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].duration(), 4.0);
        assert!(marker_segments(&[], 0.0).is_empty());
    }

    #[test]
    fn out_of_order_and_out_of_range_markers_are_skipped() {
        let markers = [
            marker(0, 3.0, MarkerType::Cut),
            marker(1, 1.0, MarkerType::Cut),
            marker(2, 12.0, MarkerType::Safety),
        ];
        let segments = marker_segments(&markers, 10.0);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start, 3.0);
        assert_eq!(segments[1].end, 10.0);
    }

    #[test]
    fn summary_counts_and_measures() {
        let markers = [
            marker(0, 2.0, MarkerType::Cut),
            marker(1, 3.0, MarkerType::Safety),
            marker(2, 7.0, MarkerType::Cut),
        ];
        let stats = summarize_markers(&markers, 8.0);
        assert_eq!(stats.cut_count, 2);
        assert_eq!(stats.safety_count, 1);
        assert_eq!(stats.shortest_segment, Some(1.0));
        assert_eq!(stats.longest_segment, Some(4.0));

        let empty = summarize_markers(&[], 0.0);
        assert_eq!(empty.shortest_segment, None);
    }
}
