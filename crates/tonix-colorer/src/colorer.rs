//! Block driver: trims, bypass and one [`Channel`] per audio channel.
//!
//! [`Tonix`] owns the channel array and the current [`ParamSnapshot`].
//! Once per block it converts the trims to linear gain, refreshes every
//! channel's mode and processing amount, and runs the per-sample transform.
//! While bypassed it returns immediately: audio passes through untouched
//! and channel memory is frozen.

use alloc::vec::Vec;

use tonix_core::{Effect, LayoutError, ParamDescriptor, ParameterInfo, StreamLayout, db_to_linear};

use crate::channel::Channel;
use crate::mode::{Brightness, ColorType, Compatibility};
use crate::params::{PARAM_COUNT, ParamSnapshot, descriptor};
use crate::scaler::sample_rate_scale;

/// Process amount (percent) above which auto-gain engages under
/// [`Compatibility::Legacy`].
const LEGACY_AUTO_GAIN_THRESHOLD: f32 = 0.5;

/// Trim gain as the first release computed it: `10^(dB/20)` in `f32`.
fn legacy_trim_gain(db: f32) -> f32 {
    libm::powf(10.0, db * 0.05)
}

/// Tape-style multi-channel colorer.
///
/// ## Parameters
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Input Trim | −10..10 dB | 0 |
/// | 1 | Process | 0..100 % | 0 |
/// | 2 | Output Trim | −6..6 dB | 0 |
/// | 3 | Brightness | Opal, Gold, Sapphire | Gold |
/// | 4 | Type | Luminiscent .. Dark Essence | Iridescent |
/// | 5 | Bypass | off/on | off |
/// | 6 | Auto Gain | off/on | on |
///
/// # Example
///
/// ```rust
/// use tonix_colorer::{ColorType, Tonix};
/// use tonix_core::{Effect, StreamLayout};
///
/// let mut tonix = Tonix::new();
/// tonix.prepare(StreamLayout::symmetric(48000.0, 2)).unwrap();
/// tonix.set_color(ColorType::DarkEssence);
/// tonix.set_process_percent(60.0);
///
/// let mut left = vec![0.25_f32; 64];
/// let mut right = vec![-0.25_f32; 64];
/// tonix.process_block(&mut [&mut left[..], &mut right[..]]);
/// assert!(left.iter().chain(&right).all(|s| s.is_finite()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Tonix {
    channels: Vec<Channel>,
    params: ParamSnapshot,
    compatibility: Compatibility,
    sample_rate: f64,
    applied_mode: Option<(ColorType, Brightness)>,
}

impl Tonix {
    /// Create an unprepared colorer with default parameters.
    ///
    /// Blocks are left untouched until [`Effect::prepare`] succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and prepare in one step.
    pub fn with_layout(layout: StreamLayout) -> Result<Self, LayoutError> {
        let mut tonix = Self::new();
        tonix.prepare(layout)?;
        Ok(tonix)
    }

    /// Current parameter snapshot.
    pub fn params(&self) -> &ParamSnapshot {
        &self.params
    }

    /// Replace every parameter at once.
    pub fn set_params(&mut self, params: ParamSnapshot) {
        for index in 0..PARAM_COUNT {
            self.params.set(index, params.get(index));
        }
    }

    /// Set the input trim in dB.
    pub fn set_input_trim_db(&mut self, db: f32) {
        self.params.set(crate::params::INPUT_TRIM, db);
    }

    /// Set the processing amount in percent.
    pub fn set_process_percent(&mut self, percent: f32) {
        self.params.set(crate::params::PROCESS, percent);
    }

    /// Set the output trim in dB.
    pub fn set_output_trim_db(&mut self, db: f32) {
        self.params.set(crate::params::OUTPUT_TRIM, db);
    }

    /// Select the type.
    pub fn set_color(&mut self, color: ColorType) {
        self.params.color = color;
    }

    /// Select the brightness.
    pub fn set_brightness(&mut self, brightness: Brightness) {
        self.params.brightness = brightness;
    }

    /// Engage or release bypass.
    pub fn set_bypass(&mut self, bypass: bool) {
        self.params.bypass = bypass;
    }

    /// Enable or disable auto-gain.
    pub fn set_auto_gain(&mut self, enabled: bool) {
        self.params.auto_gain = enabled;
    }

    /// Coefficient and auto-gain semantics in use.
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    /// Switch coefficient and auto-gain semantics. Takes effect on the next
    /// block.
    pub fn set_compatibility(&mut self, compatibility: Compatibility) {
        self.compatibility = compatibility;
        self.applied_mode = None;
    }

    /// Prepared channels, empty before [`Effect::prepare`].
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Sample rate of the last successful prepare, `0.0` before.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn auto_gain_engaged(&self) -> bool {
        match self.compatibility {
            Compatibility::Corrected => self.params.auto_gain,
            Compatibility::Legacy => self.params.process_percent > LEGACY_AUTO_GAIN_THRESHOLD,
        }
    }

    fn apply_params(&mut self) {
        let ParamSnapshot {
            color, brightness, ..
        } = self.params;
        let amount = self.params.processing_amount();
        let auto_gain = self.auto_gain_engaged();

        let mode_changed = self.applied_mode != Some((color, brightness));
        if mode_changed {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                color = color.name(),
                brightness = brightness.name(),
                compatibility = self.compatibility.name(),
                "tonix mode change"
            );
            self.applied_mode = Some((color, brightness));
        }

        for channel in &mut self.channels {
            if mode_changed {
                channel.set_mode_with(color, brightness, self.compatibility);
            }
            channel.set_processing_amount(amount);
            channel.set_auto_gain_enabled(auto_gain);
        }
    }
}

impl Effect for Tonix {
    fn prepare(&mut self, layout: StreamLayout) -> Result<(), LayoutError> {
        layout.validate()?;

        let scale = sample_rate_scale(layout.sample_rate);
        self.channels
            .resize_with(layout.channels(), || Channel::new(scale));
        for channel in &mut self.channels {
            channel.set_sample_rate_scale(scale);
            channel.reset();
        }
        self.sample_rate = layout.sample_rate;
        self.applied_mode = None;
        self.apply_params();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = layout.sample_rate,
            channels = layout.channels(),
            scale,
            "tonix prepared"
        );
        Ok(())
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]]) {
        if self.params.bypass {
            return;
        }

        self.apply_params();

        // Buffers beyond the prepared channel count are left as they are.
        match self.compatibility {
            Compatibility::Corrected => {
                let input_gain = db_to_linear(f64::from(self.params.input_trim_db));
                let output_gain = db_to_linear(f64::from(self.params.output_trim_db));
                for (channel, buffer) in self.channels.iter_mut().zip(channels.iter_mut()) {
                    for sample in buffer.iter_mut() {
                        let y = channel.process(f64::from(*sample) * input_gain);
                        *sample = (y * output_gain) as f32;
                    }
                }
            }
            Compatibility::Legacy => {
                // Single-precision gains; the input trim is applied before widening.
                let input_gain = legacy_trim_gain(self.params.input_trim_db);
                let output_gain = f64::from(legacy_trim_gain(self.params.output_trim_db));
                for (channel, buffer) in self.channels.iter_mut().zip(channels.iter_mut()) {
                    for sample in buffer.iter_mut() {
                        let y = channel.process(f64::from(*sample * input_gain));
                        *sample = (y * output_gain) as f32;
                    }
                }
            }
        }
    }

    fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }
    }
}

impl ParameterInfo for Tonix {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set(index, value);
    }
}
