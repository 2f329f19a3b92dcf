//! Core sample trait.

use num_traits::Float;
use std::fmt::Debug;

/// A floating-point audio sample as delivered by the host decoder.
///
/// Analysis is always carried out in `f64`; this trait only lets
/// [`SampleBuffer`](crate::SampleBuffer) hold either precision without a copy.
pub trait AudioSample: Float + Debug + Default + Send + Sync + 'static {
    /// Widens the sample to `f64` for analysis.
    fn as_f64(self) -> f64;
}

impl AudioSample for f32 {
    #[inline(always)]
    fn as_f64(self) -> f64 {
        f64::from(self)
    }
}

impl AudioSample for f64 {
    #[inline(always)]
    fn as_f64(self) -> f64 {
        self
    }
}
