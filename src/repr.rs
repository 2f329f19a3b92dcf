//! Decoded audio representation.
//!
//! [`SampleBuffer<T>`] pairs raw samples with the sample rate they were decoded
//! at. Channels are stored as rows of an `ndarray::Array2`; mono audio is a
//! single row. Only the first channel takes part in onset analysis, but the
//! whole buffer is kept so hosts can hand over whatever their decoder produced.
//!
//! # Examples
//!
//! ```rust
//! use onset_cuts::SampleBuffer;
//! use ndarray::array;
//! use std::num::NonZeroU32;
//!
//! let rate = NonZeroU32::new(44100).unwrap();
//! let mono = SampleBuffer::new_mono(array![0.1f32, 0.2, 0.3, 0.4, 0.5], rate);
//!
//! assert_eq!(mono.num_channels(), 1);
//! assert_eq!(mono.samples_per_channel(), 5);
//! assert_eq!(mono.sample_rate(), 44100);
//! ```

use std::num::{NonZeroU32, NonZeroUsize};

use ndarray::{Array1, Array2, ArrayView1, Axis};

use crate::{AudioSample, CutError, CutResult};

/// Decoded audio samples with their sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer<T: AudioSample> {
    data: Array2<T>,
    sample_rate: NonZeroU32,
}

impl<T: AudioSample> SampleBuffer<T> {
    /// Creates a single-channel buffer.
    pub fn new_mono(data: Array1<T>, sample_rate: NonZeroU32) -> Self {
        Self {
            data: data.insert_axis(Axis(0)),
            sample_rate,
        }
    }

    /// Creates a buffer from a 2D array with channels as rows.
    ///
    /// # Errors
    /// Returns [`CutError::DimensionMismatch`] if the array has no channels.
    pub fn new_multi_channel(data: Array2<T>, sample_rate: NonZeroU32) -> CutResult<Self> {
        if data.nrows() == 0 {
            return Err(CutError::DimensionMismatch(
                "multi-channel audio must contain at least one channel".to_string(),
            ));
        }
        Ok(Self { data, sample_rate })
    }

    /// Creates a buffer from interleaved samples (`LRLRLR...`).
    ///
    /// # Errors
    /// Returns [`CutError::DimensionMismatch`] if the sample count is not a
    /// multiple of `channels`.
    pub fn from_interleaved(
        samples: &[T],
        channels: NonZeroUsize,
        sample_rate: NonZeroU32,
    ) -> CutResult<Self> {
        let channels = channels.get();
        if samples.len() % channels != 0 {
            return Err(CutError::DimensionMismatch(format!(
                "{} interleaved samples cannot be split into {} channels",
                samples.len(),
                channels
            )));
        }
        let frames = samples.len() / channels;
        let frames_major = Array2::from_shape_vec((frames, channels), samples.to_vec())
            .map_err(|e| CutError::DimensionMismatch(e.to_string()))?;
        Ok(Self {
            data: frames_major.reversed_axes(),
            sample_rate,
        })
    }

    /// Returns the sample rate in Hz.
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate.get()
    }

    /// Returns the number of channels.
    pub fn num_channels(&self) -> usize {
        self.data.nrows()
    }

    /// Returns the number of samples per channel.
    pub fn samples_per_channel(&self) -> usize {
        self.data.ncols()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples_per_channel() == 0
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples_per_channel() as f64 / f64::from(self.sample_rate.get())
    }

    /// Returns a view of the first channel, the one used for analysis.
    pub fn first_channel(&self) -> ArrayView1<'_, T> {
        self.data.row(0)
    }

    /// Returns a view of the full channel-by-sample array.
    pub fn as_array(&self) -> &Array2<T> {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn rate() -> NonZeroU32 {
        NonZeroU32::new(8000).unwrap()
    }

    #[test]
    fn mono_buffer_reports_shape_and_duration() {
        let audio = SampleBuffer::new_mono(Array1::<f64>::zeros(16000), rate());
        assert_eq!(audio.num_channels(), 1);
        assert_eq!(audio.samples_per_channel(), 16000);
        assert_eq!(audio.duration_seconds(), 2.0);
        assert!(!audio.is_empty());
    }

    #[test]
    fn interleaved_samples_are_split_by_channel() {
        let samples = [1.0f32, -1.0, 2.0, -2.0, 3.0, -3.0];
        let audio =
            SampleBuffer::from_interleaved(&samples, NonZeroUsize::new(2).unwrap(), rate())
                .unwrap();
        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.samples_per_channel(), 3);
        assert_eq!(audio.first_channel().to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn interleaved_rejects_ragged_input() {
        let samples = [1.0f32, -1.0, 2.0];
        let result =
            SampleBuffer::from_interleaved(&samples, NonZeroUsize::new(2).unwrap(), rate());
        assert!(matches!(result, Err(CutError::DimensionMismatch(_))));
    }

    #[test]
    fn multi_channel_requires_a_channel() {
        let empty = Array2::<f32>::zeros((0, 10));
        assert!(SampleBuffer::new_multi_channel(empty, rate()).is_err());

        let stereo = array![[0.1f32, 0.2, 0.3], [0.4, 0.5, 0.6]];
        let audio = SampleBuffer::new_multi_channel(stereo, rate()).unwrap();
        assert_eq!(audio.first_channel().to_vec(), vec![0.1, 0.2, 0.3]);
        assert_eq!(audio.as_array().dim(), (2, 3));
        assert_eq!(audio.as_array()[[1, 2]], 0.6);
    }
}
