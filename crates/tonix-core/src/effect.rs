//! Block-based Effect trait.
//!
//! The [`Effect`] trait is the seam between DSP code and whatever drives it:
//! a plugin host, a real-time device stream, or an offline file renderer.
//! Audio is exchanged as planar channel slices and processed in place.
//!
//! ## Design Decisions
//!
//! - **Planar, in-place**: one `&mut [f32]` per channel. Interleaving is the
//!   driver's business, not the effect's.
//!
//! - **Configure once, process many**: [`Effect::prepare`] is the only call
//!   allowed to allocate or fail. [`Effect::process_block`] runs on the audio
//!   thread and must never allocate, lock, or return an error.
//!
//! - **Object-safe**: `Box<dyn Effect + Send>` works for runtime dispatch.

use crate::layout::{LayoutError, StreamLayout};

/// Core trait for multi-channel block effects.
///
/// # Example
///
/// ```rust
/// use tonix_core::{Effect, LayoutError, StreamLayout};
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn prepare(&mut self, layout: StreamLayout) -> Result<(), LayoutError> {
///         layout.validate()
///     }
///
///     fn process_block(&mut self, channels: &mut [&mut [f32]]) {
///         for channel in channels.iter_mut() {
///             for sample in channel.iter_mut() {
///                 *sample *= self.gain;
///             }
///         }
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut gain = Gain { gain: 0.5 };
/// gain.prepare(StreamLayout::symmetric(48000.0, 1)).unwrap();
/// let mut left = [1.0, 2.0];
/// gain.process_block(&mut [&mut left[..]]);
/// assert_eq!(left, [0.5, 1.0]);
/// ```
pub trait Effect {
    /// Configure the effect for a stream.
    ///
    /// Called at stream setup and whenever the sample rate or channel count
    /// changes. Never overlaps with [`process_block`](Self::process_block).
    /// Implementations reject layouts they cannot handle before touching
    /// any internal state.
    fn prepare(&mut self, layout: StreamLayout) -> Result<(), LayoutError>;

    /// Process one block of planar audio in place.
    ///
    /// Every slice in `channels` must have the same length. The number of
    /// slices should match the channel count given to
    /// [`prepare`](Self::prepare).
    fn process_block(&mut self, channels: &mut [&mut [f32]]);

    /// Clear all internal state (filter memory) without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default is 0.
    fn latency_samples(&self) -> usize {
        0
    }

    /// Number of samples the effect keeps ringing after input stops.
    /// Default is 0.
    fn tail_samples(&self) -> usize {
        0
    }
}
