//! Lock-free parameter store shared between a control thread and the
//! audio thread.
//!
//! [`SharedParams`] keeps one `AtomicU32` per parameter holding the `f32`
//! bits of its value, in [`ParameterInfo`] index order. The control side
//! calls `set`, the audio side reads a [`ParamSnapshot`] once per block.
//! Neither side blocks or allocates.

use core::sync::atomic::{AtomicU32, Ordering};

use tonix_core::ParameterInfo;

use crate::mode::{Brightness, ColorType};
use crate::params::{
    AUTO_GAIN, BRIGHTNESS, BYPASS, INPUT_TRIM, OUTPUT_TRIM, PARAM_COUNT, PROCESS, ParamSnapshot,
    TYPE, descriptor,
};

/// Atomic parameter slots, initialized to their defaults.
///
/// # Example
///
/// ```rust
/// use tonix_colorer::{ColorType, SharedParams};
///
/// let shared = SharedParams::new();
/// shared.set_color(ColorType::Luster);
/// shared.set_process_percent(40.0);
///
/// let snap = shared.snapshot();
/// assert_eq!(snap.color, ColorType::Luster);
/// assert_eq!(snap.process_percent, 40.0);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    values: [AtomicU32; PARAM_COUNT],
}

impl SharedParams {
    /// Slots holding every parameter's default.
    pub fn new() -> Self {
        let shared = Self {
            values: core::array::from_fn(|_| AtomicU32::new(0)),
        };
        shared.store(&ParamSnapshot::default());
        shared
    }

    /// Value at `index`, `0.0` if out of range.
    pub fn get(&self, index: usize) -> f32 {
        self.values
            .get(index)
            .map_or(0.0, |v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Store `value` at `index`, clamped to the parameter's descriptor.
    /// Out-of-range indices are ignored.
    pub fn set(&self, index: usize, value: f32) {
        if let Some((slot, desc)) = self.values.get(index).zip(descriptor(index)) {
            slot.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Set the input trim in dB.
    pub fn set_input_trim_db(&self, db: f32) {
        self.set(INPUT_TRIM, db);
    }

    /// Set the processing amount in percent.
    pub fn set_process_percent(&self, percent: f32) {
        self.set(PROCESS, percent);
    }

    /// Set the output trim in dB.
    pub fn set_output_trim_db(&self, db: f32) {
        self.set(OUTPUT_TRIM, db);
    }

    /// Set the brightness.
    pub fn set_brightness(&self, brightness: Brightness) {
        self.set(BRIGHTNESS, brightness.index() as f32);
    }

    /// Set the type.
    pub fn set_color(&self, color: ColorType) {
        self.set(TYPE, color.index() as f32);
    }

    /// Engage or release bypass.
    pub fn set_bypass(&self, bypass: bool) {
        self.set(BYPASS, if bypass { 1.0 } else { 0.0 });
    }

    /// Enable or disable auto-gain.
    pub fn set_auto_gain(&self, enabled: bool) {
        self.set(AUTO_GAIN, if enabled { 1.0 } else { 0.0 });
    }

    /// Read every slot into a snapshot.
    ///
    /// Each slot is read atomically; a concurrent writer may land between
    /// two slot reads, which only delays that change to the next block.
    pub fn snapshot(&self) -> ParamSnapshot {
        let mut snap = ParamSnapshot::default();
        for index in 0..PARAM_COUNT {
            snap.set(index, self.get(index));
        }
        snap
    }

    /// Publish every field of `snap`.
    pub fn store(&self, snap: &ParamSnapshot) {
        for index in 0..PARAM_COUNT {
            self.set(index, snap.get(index));
        }
    }

    /// Push every slot into `target` through [`ParameterInfo::set_param`].
    pub fn apply_to<P: ParameterInfo + ?Sized>(&self, target: &mut P) {
        for index in 0..PARAM_COUNT.min(target.param_count()) {
            target.set_param(index, self.get(index));
        }
    }
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let shared = SharedParams::new();
        assert_eq!(shared.snapshot(), ParamSnapshot::default());
        assert_eq!(shared.get(AUTO_GAIN), 1.0);
        assert_eq!(shared.get(TYPE), 1.0);
    }

    #[test]
    fn test_set_clamps() {
        let shared = SharedParams::new();
        shared.set_input_trim_db(25.0);
        shared.set_output_trim_db(-25.0);
        shared.set(TYPE, 2.6);
        assert_eq!(shared.get(INPUT_TRIM), 10.0);
        assert_eq!(shared.get(OUTPUT_TRIM), -6.0);
        assert_eq!(shared.get(TYPE), 3.0);
        assert_eq!(shared.get(99), 0.0);
    }

    #[test]
    fn test_store_snapshot() {
        let shared = SharedParams::new();
        let snap = ParamSnapshot {
            input_trim_db: -3.0,
            process_percent: 62.5,
            output_trim_db: 1.5,
            brightness: Brightness::Sapphire,
            color: ColorType::DarkEssence,
            bypass: true,
            auto_gain: false,
        };
        shared.store(&snap);
        assert_eq!(shared.snapshot(), snap);
    }

    #[test]
    fn test_apply_to_processor() {
        let shared = SharedParams::new();
        shared.set_input_trim_db(4.5);
        shared.set_process_percent(80.0);
        shared.set_brightness(Brightness::Opal);
        shared.set_color(ColorType::Luster);
        shared.set_bypass(true);
        shared.set(AUTO_GAIN, 0.0);

        let mut tonix = crate::Tonix::new();
        shared.apply_to(&mut tonix);
        assert_eq!(*tonix.params(), shared.snapshot());
        assert_eq!(tonix.params().color, ColorType::Luster);
        assert!(!tonix.params().auto_gain);

        let as_dyn: &mut dyn ParameterInfo = &mut tonix;
        shared.set_color(ColorType::Radiant);
        shared.apply_to(as_dyn);
        assert_eq!(tonix.get_param(TYPE), 2.0);
    }

    #[test]
    fn test_apply_to_stops_at_target_count() {
        struct TwoSlots([f32; 2]);

        impl ParameterInfo for TwoSlots {
            fn param_count(&self) -> usize {
                2
            }

            fn param_info(&self, index: usize) -> Option<tonix_core::ParamDescriptor> {
                descriptor(index)
            }

            fn get_param(&self, index: usize) -> f32 {
                self.0[index]
            }

            fn set_param(&mut self, index: usize, value: f32) {
                self.0[index] = value;
            }
        }

        let shared = SharedParams::new();
        shared.set_input_trim_db(-2.0);
        shared.set_process_percent(15.0);
        shared.set_bypass(true);

        let mut target = TwoSlots([0.0; 2]);
        shared.apply_to(&mut target);
        assert_eq!(target.0, [-2.0, 15.0]);
    }

    #[test]
    fn test_cross_thread_publish() {
        use std::sync::Arc;

        let shared = Arc::new(SharedParams::new());
        let writer = Arc::clone(&shared);
        std::thread::spawn(move || {
            writer.set_color(ColorType::Radiant);
            writer.set_bypass(true);
        })
        .join()
        .unwrap();

        let snap = shared.snapshot();
        assert_eq!(snap.color, ColorType::Radiant);
        assert!(snap.bypass);
    }
}
