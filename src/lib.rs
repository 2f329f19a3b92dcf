// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![allow(clippy::too_many_arguments)]
// Allow functions with many parameters (very few and far between)
#![deny(missing_docs)] // Documentation is a must for release

//! # OnsetCuts
//!
//! Places video cut markers on the strong musical events of an audio track
//! while keeping every shot between a minimum and maximum duration.
//!
//! ## Overview
//!
//! The crate is the analysis core behind a music-synced editing tool. The host
//! decodes audio, hands over the samples, and receives an ordered list of
//! markers to cut on. Three steps are involved:
//!
//! 1. [`compute_onset_envelope`] turns raw samples into a normalized onset
//!    strength curve, with an advisory tempo estimate.
//! 2. [`generate_markers`] walks the curve greedily, choosing each cut inside a
//!    window bounded by the shot durations. The required onset strength decays
//!    as the window is used up, so a weaker beat is taken rather than running
//!    out of room.
//! 3. [`generate_markers_by_count`] searches the single sensitivity parameter
//!    for a requested number of cuts.
//!
//! Everything is synchronous, deterministic and free of I/O. The envelope is
//! computed once per track; placement is cheap enough to rerun on every
//! parameter change.
//!
//! ## Error Handling
//!
//! Short or silent audio is not an error: it yields an empty or all-zero
//! envelope and, from there, safety markers only. Errors are reserved for
//! invalid configuration:
//!
//! ```rust
//! use onset_cuts::{generate_markers, CutError, OnsetEnvelope, ParameterError, PlacementConfig};
//!
//! let result = generate_markers(&OnsetEnvelope::empty(), &PlacementConfig::new(3.0, 2.0, 0.5), 10.0);
//!
//! match result {
//!     Ok(markers) => println!("{} markers", markers.len()),
//!     Err(CutError::Parameter(ParameterError::InvalidValue { parameter, .. })) => {
//!         assert_eq!(parameter, "max_duration")
//!     }
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use onset_cuts::{compute_onset_envelope, generate_markers, MarkerType, PlacementConfig, SampleBuffer};
//! use ndarray::Array1;
//! use std::num::NonZeroU32;
//!
//! let rate = NonZeroU32::new(44100).unwrap();
//! let audio = SampleBuffer::new_mono(Array1::<f32>::zeros(10 * 44100), rate);
//!
//! let envelope = compute_onset_envelope(&audio);
//! let markers = generate_markers(
//!     &envelope,
//!     &PlacementConfig::new(2.0, 4.0, 0.5),
//!     audio.duration_seconds(),
//! )
//! .unwrap();
//!
//! // Silence has nothing to cut on, so every marker is a safety marker.
//! assert_eq!(markers.len(), 2);
//! assert!(markers.iter().all(|m| m.marker_type() == MarkerType::Safety));
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`] and installs no subscriber. Envelope and
//! placement summaries are emitted at `debug`, per-window decisions at `trace`.
//!
//! ## License
//!
//! MIT License

mod error;
pub mod operations;
mod repr;
/// Core traits for audio samples.
pub mod traits;
pub mod utils;

pub use crate::error::{CutError, CutResult, ParameterError};
pub use crate::operations::{
    CountSearchResult, DECAY_EXPONENT, DurationBounds, END_TRIM_SECONDS, EnvelopeConfig, Marker,
    MarkerId, MarkerStats, MarkerType, NOISE_FLOOR, OnsetEnvelope, PlacementConfig,
    SEARCH_ITERATIONS, Segment, TempoConfig, compute_onset_envelope,
    compute_onset_envelope_with, estimate_tempo, estimate_tempo_with, generate_markers,
    generate_markers_by_count, marker_segments, search_sensitivity, summarize_markers,
};
pub use crate::repr::SampleBuffer;
pub use crate::traits::AudioSample;
pub use crate::utils::generation::{burst_train, silence, sine_wave};

// Re-export NonZero types used in the API
pub use core::num::{NonZeroU32, NonZeroUsize};
