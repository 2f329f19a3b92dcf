//! Error types and result utilities for onset analysis and marker placement.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`CutError`].
pub type CutResult<T> = Result<T, CutError>;

/// Error types that can occur while analysing audio or placing markers.
///
/// Degenerate audio (too short for one analysis window, or silent) is never an
/// error. These variants only cover caller mistakes: invalid configuration and
/// hand-built envelopes that break the envelope invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CutError {
    /// An operation received an invalid parameter value.
    #[error("Invalid parameter: {0}")]
    Parameter(#[from] ParameterError),

    /// Parallel sequences that must have equal length do not.
    ///
    /// This happens when an envelope is built from `times` and `values` of
    /// different lengths.
    #[error("Dimension mismatch error: {0}")]
    DimensionMismatch(String),

    /// An envelope was constructed from data that breaks its invariants.
    ///
    /// Timestamps must be finite and strictly increasing; strengths must lie in `[0, 1]`.
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),
}

/// Describes which parameter was rejected and why.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The value is not acceptable for a reason other than a simple range check.
    #[error("{parameter}: {reason}")]
    InvalidValue {
        /// Name of the offending parameter.
        parameter: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// The value lies outside its permitted closed range.
    #[error("{parameter} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending parameter.
        parameter: String,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
}

impl ParameterError {
    /// Creates an [`ParameterError::InvalidValue`].
    pub fn invalid_value(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        ParameterError::InvalidValue {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates an [`ParameterError::OutOfRange`].
    pub fn out_of_range(parameter: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        ParameterError::OutOfRange {
            parameter: parameter.into(),
            value,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_error_converts_into_cut_error() {
        let err: CutError = ParameterError::invalid_value("min_duration", "must be > 0").into();
        assert_eq!(
            err.to_string(),
            "Invalid parameter: min_duration: must be > 0"
        );
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let err = ParameterError::out_of_range("sensitivity", 1.5, 0.0, 1.0);
        assert_eq!(err.to_string(), "sensitivity = 1.5 is outside [0, 1]");
    }
}
