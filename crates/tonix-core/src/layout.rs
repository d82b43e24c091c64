//! Stream configuration handed to [`Effect::prepare`](crate::Effect::prepare).

/// Lowest sample rate accepted by [`StreamLayout::validate`].
///
/// Coefficients are tuned at this rate and scaled by whole multiples of it,
/// so anything slower has no defined scale factor.
pub const BASE_SAMPLE_RATE: f64 = 44100.0;

/// Sample rate and bus widths of an audio stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamLayout {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Number of input channels.
    pub input_channels: usize,
    /// Number of output channels.
    pub output_channels: usize,
}

impl StreamLayout {
    /// Create a layout with explicit input and output widths.
    pub const fn new(sample_rate: f64, input_channels: usize, output_channels: usize) -> Self {
        Self {
            sample_rate,
            input_channels,
            output_channels,
        }
    }

    /// Create a layout with the same number of inputs and outputs.
    pub const fn symmetric(sample_rate: f64, channels: usize) -> Self {
        Self::new(sample_rate, channels, channels)
    }

    /// Number of channels processed, valid once [`validate`](Self::validate) passes.
    pub const fn channels(&self) -> usize {
        self.output_channels
    }

    /// Check that the layout can be processed.
    ///
    /// Only symmetric I/O is accepted: every input channel maps onto the
    /// output channel with the same index.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tonix_core::{LayoutError, StreamLayout};
    ///
    /// assert!(StreamLayout::symmetric(48000.0, 2).validate().is_ok());
    /// assert_eq!(
    ///     StreamLayout::new(48000.0, 1, 2).validate(),
    ///     Err(LayoutError::AsymmetricChannels { inputs: 1, outputs: 2 })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.sample_rate.is_finite() || self.sample_rate < BASE_SAMPLE_RATE {
            return Err(LayoutError::InvalidSampleRate(self.sample_rate));
        }
        if self.input_channels != self.output_channels {
            return Err(LayoutError::AsymmetricChannels {
                inputs: self.input_channels,
                outputs: self.output_channels,
            });
        }
        if self.output_channels == 0 {
            return Err(LayoutError::NoChannels);
        }
        Ok(())
    }
}

/// Reasons a [`StreamLayout`] is refused at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Input and output channel counts differ.
    AsymmetricChannels {
        /// Input channel count.
        inputs: usize,
        /// Output channel count.
        outputs: usize,
    },
    /// The layout has no channels at all.
    NoChannels,
    /// Sample rate is not finite or lies below 44.1 kHz.
    InvalidSampleRate(f64),
}

impl core::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AsymmetricChannels { inputs, outputs } => write!(
                f,
                "asymmetric channel layout: {inputs} inputs, {outputs} outputs"
            ),
            Self::NoChannels => write!(f, "layout has no channels"),
            Self::InvalidSampleRate(sr) => {
                write!(f, "unsupported sample rate {sr} Hz (minimum {BASE_SAMPLE_RATE} Hz)")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
