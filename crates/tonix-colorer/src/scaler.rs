//! Sample-rate scaling of the filter edges.
//!
//! The edge coefficients are tuned for 44.1 kHz. At higher rates they are
//! divided by the whole number of baseline periods that fit in one period
//! of the stream rate, so 48 kHz stays at 1.0 while 88.2 and 96 kHz both
//! halve. The steps are deliberately integer: 132.3 kHz gives 1/3.

use tonix_core::BASE_SAMPLE_RATE;

/// Scale factor for `sample_rate` Hz: `1 / floor(sample_rate / 44100)`.
///
/// Rates below 44.1 kHz are rejected by
/// [`StreamLayout::validate`](tonix_core::StreamLayout::validate) before
/// this is called; they would produce an infinite factor.
///
/// # Example
///
/// ```rust
/// use tonix_colorer::sample_rate_scale;
///
/// assert_eq!(sample_rate_scale(48000.0), 1.0);
/// assert_eq!(sample_rate_scale(96000.0), 0.5);
/// ```
#[inline]
pub fn sample_rate_scale(sample_rate: f64) -> f64 {
    1.0 / libm::floor(sample_rate / BASE_SAMPLE_RATE)
}
