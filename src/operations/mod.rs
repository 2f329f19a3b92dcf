//! Onset analysis and marker placement.
//!
//! ## Module Organization
//!
//! - [`types`] - Configuration structs, envelopes and markers
//! - [`onset_envelope`] - Onset strength envelope extraction
//! - [`tempo`] - Coarse tempo estimation from envelope peaks
//! - [`peak_picking`] - Local-maximum scanning shared by tempo and placement
//! - [`placement`] - Decaying-threshold marker placement
//! - [`count_target`] - Sensitivity search for a target marker count
//! - [`segments`] - Shot segments and summaries derived from markers
//!
//! Data flows one way: samples → envelope → markers. Placement and the count
//! search only read the envelope, so a host can keep one envelope per track
//! and re-run placement whenever the user changes a parameter.
//!
//! ## Quick Start
//!
//! ```rust
//! use onset_cuts::operations::*;
//! use onset_cuts::burst_train;
//! use std::num::NonZeroU32;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rate = NonZeroU32::new(44100).unwrap();
//! let audio = burst_train::<f32>(
//!     120.0,
//!     Duration::from_millis(250),
//!     Duration::from_millis(100),
//!     Duration::from_secs(10),
//!     rate,
//!     0.8,
//! );
//!
//! let envelope = compute_onset_envelope(&audio);
//! let markers = generate_markers(&envelope, &PlacementConfig::new(1.0, 2.0, 1.0), 10.0)?;
//! let by_count = generate_markers_by_count(&envelope, 6, 10.0, DurationBounds::new(1.0, 2.0))?;
//!
//! assert!(markers.len() >= by_count.len());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod count_target;
pub mod onset_envelope;
pub mod peak_picking;
pub mod placement;
pub mod segments;
pub mod tempo;
pub mod types;

pub use count_target::{
    CountSearchResult, SEARCH_ITERATIONS, generate_markers_by_count, search_sensitivity,
};
pub use onset_envelope::{compute_onset_envelope, compute_onset_envelope_with};
pub use placement::{DECAY_EXPONENT, END_TRIM_SECONDS, NOISE_FLOOR, generate_markers};
pub use segments::{MarkerStats, Segment, marker_segments, summarize_markers};
pub use tempo::{estimate_tempo, estimate_tempo_with};
pub use types::{
    DurationBounds, EnvelopeConfig, Marker, MarkerId, MarkerType, OnsetEnvelope, PlacementConfig,
    TempoConfig,
};
