//! Utility functions.
//!
//! # Modules
//!
//! - [`generation`] - Deterministic test-signal generation

pub mod generation;

pub use generation::*;
