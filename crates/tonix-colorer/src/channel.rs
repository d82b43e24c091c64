//! Per-channel tape coloring state machine.
//!
//! A [`Channel`] chains a one-sample differencer, two passes through a
//! polynomial waveshaper, a one-pole integrator and auto-gain compensation
//! into a single sample transform. Two values survive between samples:
//! the previous input and the integrator state.
//!
//! ## Signal Flow
//!
//! ```text
//! x ─┬─ d = hp·x + (x − x[n−1]) ─ d·f1 + d ─┬─ shape ─ ×depth·p20 ─┐
//!    │                                      └─ gate? ─────────────+─ shape ─ LP ─┐
//!    └───────────────────────────────────────────────── depth·(lp − x·p24) + x ◄─┘
//! ```

use tonix_core::{flush_denormal, flush_subnormal};

use crate::auto_gain::auto_gain;
use crate::mode::{Brightness, ColorType, Compatibility, ModeCoefficients, lookup_with};

/// One audio channel's coloring engine.
///
/// # Example
///
/// ```rust
/// use tonix_colorer::{Brightness, Channel, ColorType};
///
/// let mut channel = Channel::new(1.0);
/// channel.set_mode(ColorType::Luminiscent, Brightness::Opal);
/// channel.set_processing_amount(0.0);
///
/// // Zero processing is a pure dry pass-through.
/// assert_eq!(channel.process(1.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Channel {
    sample_rate_scale: f64,
    color: ColorType,
    brightness: Brightness,
    compatibility: Compatibility,
    /// Active bundle, edges already multiplied by `sample_rate_scale`.
    coefficients: ModeCoefficients,
    processing_amount: f64,
    auto_gain: f64,
    auto_gain_enabled: bool,
    previous_input: f64,
    integrator_state: f64,
}

impl Channel {
    /// Create a channel for the given sample-rate scale, set to the default
    /// mode (Iridescent, Gold) with zero processing and auto-gain on.
    pub fn new(sample_rate_scale: f64) -> Self {
        let color = ColorType::default();
        let brightness = Brightness::default();
        let compatibility = Compatibility::default();
        let coefficients = lookup_with(color, brightness, compatibility).scaled(sample_rate_scale);
        Self {
            sample_rate_scale,
            color,
            brightness,
            compatibility,
            coefficients,
            processing_amount: 0.0,
            auto_gain: 1.0,
            auto_gain_enabled: true,
            previous_input: 0.0,
            integrator_state: 0.0,
        }
    }

    /// Clear filter memory.
    pub fn reset(&mut self) {
        self.previous_input = 0.0;
        self.integrator_state = 0.0;
    }

    /// Select type and brightness with [`Compatibility::Corrected`] coefficients.
    pub fn set_mode(&mut self, color: ColorType, brightness: Brightness) {
        self.set_mode_with(color, brightness, Compatibility::Corrected);
    }

    /// Select type and brightness under the given compatibility semantics.
    ///
    /// Edges are always re-derived from the unscaled table entry, so calling
    /// this any number of times with the same arguments leaves the same
    /// coefficients in place.
    pub fn set_mode_with(
        &mut self,
        color: ColorType,
        brightness: Brightness,
        compatibility: Compatibility,
    ) {
        self.color = color;
        self.brightness = brightness;
        self.compatibility = compatibility;
        self.coefficients =
            lookup_with(color, brightness, compatibility).scaled(self.sample_rate_scale);
        self.auto_gain = auto_gain(
            self.processing_amount,
            self.coefficients.gain_a1,
            self.coefficients.gain_a2,
        );
    }

    /// Change the sample-rate scale and re-derive the scaled edges from the
    /// current mode.
    pub fn set_sample_rate_scale(&mut self, sample_rate_scale: f64) {
        self.sample_rate_scale = sample_rate_scale;
        self.set_mode_with(self.color, self.brightness, self.compatibility);
    }

    /// Set the processing amount in \[0, 1\] and recompute the auto-gain scalar.
    pub fn set_processing_amount(&mut self, amount: f64) {
        self.processing_amount = amount.clamp(0.0, 1.0);
        self.auto_gain = auto_gain(
            self.processing_amount,
            self.coefficients.gain_a1,
            self.coefficients.gain_a2,
        );
    }

    /// Enable or disable auto-gain compensation.
    pub fn set_auto_gain_enabled(&mut self, enabled: bool) {
        self.auto_gain_enabled = enabled;
    }

    /// Transform one sample.
    #[inline]
    pub fn process(&mut self, x: f64) -> f64 {
        let c = &self.coefficients;
        let luster = self.color == ColorType::Luster;

        let depth = self.processing_amount * c.a3;
        let differenced = c.high_edge * x + (x - self.previous_input);
        let emphasized = differenced * c.f1 + differenced;
        let feed_forward = if c.gate { emphasized } else { x };
        let first = c
            .waveshaper
            .process(if luster { emphasized * depth } else { emphasized });
        let second = c.waveshaper.process(first * depth * c.p20 + feed_forward);

        self.previous_input = x;
        let integrated = self.integrator_state + (second - self.integrator_state) * c.low_edge;
        self.integrator_state = match self.compatibility {
            Compatibility::Corrected => flush_denormal(integrated),
            Compatibility::Legacy => flush_subnormal(integrated),
        };

        let mut y = depth * (self.integrator_state - x * c.p24);
        if luster {
            y *= 0.5;
        }
        y += x;
        if self.auto_gain_enabled {
            y *= self.auto_gain;
        }
        y
    }

    /// Current type.
    pub fn color(&self) -> ColorType {
        self.color
    }

    /// Current brightness.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// Compatibility semantics of the current mode.
    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    /// Active coefficients, edges already sample-rate scaled.
    pub fn coefficients(&self) -> &ModeCoefficients {
        &self.coefficients
    }

    /// Sample-rate scale applied to the edges.
    pub fn sample_rate_scale(&self) -> f64 {
        self.sample_rate_scale
    }

    /// Processing amount in \[0, 1\].
    pub fn processing_amount(&self) -> f64 {
        self.processing_amount
    }

    /// Current auto-gain scalar (applied only when enabled).
    pub fn auto_gain(&self) -> f64 {
        self.auto_gain
    }

    /// Whether auto-gain is applied.
    pub fn auto_gain_enabled(&self) -> bool {
        self.auto_gain_enabled
    }

    /// Input sample remembered by the differencer.
    pub fn previous_input(&self) -> f64 {
        self.previous_input
    }

    /// One-pole integrator memory.
    pub fn integrator_state(&self) -> f64 {
        self.integrator_state
    }
}

impl Default for Channel {
    fn default() -> Self {
        Self::new(1.0)
    }
}
