//! Parameter table and the per-block parameter snapshot.
//!
//! | Index | string id | ParamId | Range | Default |
//! |---|---|---|---|---|
//! | 0 | `input_trim` | 100 | −10..10 dB | 0 |
//! | 1 | `process` | 101 | 0..100 % | 0 |
//! | 2 | `output_trim` | 102 | −6..6 dB | 0 |
//! | 3 | `brightness` | 103 | Opal, Gold, Sapphire | Gold |
//! | 4 | `type` | 104 | five colors | Iridescent |
//! | 5 | `bypass` | 105 | toggle | off |
//! | 6 | `auto_gain` | 106 | toggle | on |

use tonix_core::{ParamDescriptor, ParamFlags, ParamId};

use crate::mode::{Brightness, ColorType};

/// Number of parameters.
pub const PARAM_COUNT: usize = 7;

/// Index of the input trim (dB).
pub const INPUT_TRIM: usize = 0;
/// Index of the process amount (percent).
pub const PROCESS: usize = 1;
/// Index of the output trim (dB).
pub const OUTPUT_TRIM: usize = 2;
/// Index of the brightness choice.
pub const BRIGHTNESS: usize = 3;
/// Index of the type choice.
pub const TYPE: usize = 4;
/// Index of the bypass toggle.
pub const BYPASS: usize = 5;
/// Index of the auto-gain toggle.
pub const AUTO_GAIN: usize = 6;

/// Descriptor for the parameter at `index`, `None` outside `0..PARAM_COUNT`.
pub fn descriptor(index: usize) -> Option<ParamDescriptor> {
    let desc = match index {
        INPUT_TRIM => ParamDescriptor::gain_db("Input Trim", "In Trim", -10.0, 10.0, 0.0)
            .with_id(ParamId(100), "input_trim")
            .with_group("gain"),
        PROCESS => ParamDescriptor::percent("Process", "Process", 0.0)
            .with_id(ParamId(101), "process")
            .with_group("character"),
        OUTPUT_TRIM => ParamDescriptor::gain_db("Output Trim", "Out Trim", -6.0, 6.0, 0.0)
            .with_id(ParamId(102), "output_trim")
            .with_step(0.01)
            .with_group("gain"),
        BRIGHTNESS => ParamDescriptor::choice(
            "Brightness",
            "Bright",
            &Brightness::NAMES,
            Brightness::Gold.index(),
        )
        .with_id(ParamId(103), "brightness")
        .with_group("character"),
        TYPE => ParamDescriptor::choice(
            "Type",
            "Type",
            &ColorType::NAMES,
            ColorType::Iridescent.index(),
        )
        .with_id(ParamId(104), "type")
        .with_group("character"),
        BYPASS => ParamDescriptor::toggle("Bypass", "Bypass", false)
            .with_id(ParamId(105), "bypass")
            .with_flags(
                ParamFlags::AUTOMATABLE
                    .union(ParamFlags::STEPPED)
                    .union(ParamFlags::BYPASS),
            ),
        AUTO_GAIN => ParamDescriptor::toggle("Auto Gain", "AutoGain", true)
            .with_id(ParamId(106), "auto_gain")
            .with_group("gain"),
        _ => return None,
    };
    Some(desc)
}

/// One consistent set of parameter values, read once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Input trim in dB, \[−10, 10\].
    pub input_trim_db: f32,
    /// Processing amount in percent, \[0, 100\].
    pub process_percent: f32,
    /// Output trim in dB, \[−6, 6\].
    pub output_trim_db: f32,
    /// Filter edge selection.
    pub brightness: Brightness,
    /// Tonal character.
    pub color: ColorType,
    /// Pass audio through untouched and freeze channel memory.
    pub bypass: bool,
    /// Apply auto-gain compensation.
    pub auto_gain: bool,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            input_trim_db: 0.0,
            process_percent: 0.0,
            output_trim_db: 0.0,
            brightness: Brightness::Gold,
            color: ColorType::Iridescent,
            bypass: false,
            auto_gain: true,
        }
    }
}

impl ParamSnapshot {
    /// Value at `index` in the parameter's own units, `0.0` if out of range.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            INPUT_TRIM => self.input_trim_db,
            PROCESS => self.process_percent,
            OUTPUT_TRIM => self.output_trim_db,
            BRIGHTNESS => self.brightness.index() as f32,
            TYPE => self.color.index() as f32,
            BYPASS => bool_value(self.bypass),
            AUTO_GAIN => bool_value(self.auto_gain),
            _ => 0.0,
        }
    }

    /// Set the value at `index`, clamped to its descriptor. Out-of-range
    /// indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let Some(desc) = descriptor(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            INPUT_TRIM => self.input_trim_db = value,
            PROCESS => self.process_percent = value,
            OUTPUT_TRIM => self.output_trim_db = value,
            BRIGHTNESS => {
                self.brightness = Brightness::from_index(value as usize).unwrap_or_default();
            }
            TYPE => self.color = ColorType::from_index(value as usize).unwrap_or_default(),
            BYPASS => self.bypass = value >= 0.5,
            AUTO_GAIN => self.auto_gain = value >= 0.5,
            _ => {}
        }
    }

    /// Processing amount as a fraction in \[0, 1\].
    pub fn processing_amount(&self) -> f64 {
        f64::from(self.process_percent) / 100.0
    }
}

fn bool_value(flag: bool) -> f32 {
    if flag { 1.0 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table() {
        let ids: Vec<_> = (0..PARAM_COUNT)
            .map(|i| descriptor(i).map(|d| (d.id.0, d.string_id)))
            .collect();
        assert_eq!(
            ids,
            vec![
                Some((100, "input_trim")),
                Some((101, "process")),
                Some((102, "output_trim")),
                Some((103, "brightness")),
                Some((104, "type")),
                Some((105, "bypass")),
                Some((106, "auto_gain")),
            ]
        );
        assert!(descriptor(PARAM_COUNT).is_none());
    }

    #[test]
    fn test_descriptor_defaults_match_snapshot() {
        let snap = ParamSnapshot::default();
        for i in 0..PARAM_COUNT {
            let desc = descriptor(i).unwrap();
            assert_eq!(desc.default, snap.get(i), "{}", desc.string_id);
        }
    }

    #[test]
    fn test_choice_labels() {
        let ty = descriptor(TYPE).unwrap();
        assert_eq!(ty.label(4.0), Some("Dark Essence"));
        assert_eq!(ty.max, 4.0);
        let br = descriptor(BRIGHTNESS).unwrap();
        assert_eq!(br.label(2.0), Some("Sapphire"));
        assert_eq!(br.max, 2.0);
    }

    #[test]
    fn test_output_trim_step() {
        assert_eq!(descriptor(OUTPUT_TRIM).unwrap().step, 0.01);
        assert_eq!(descriptor(INPUT_TRIM).unwrap().step, 0.1);
    }

    #[test]
    fn test_set_clamps() {
        let mut snap = ParamSnapshot::default();
        snap.set(INPUT_TRIM, 40.0);
        assert_eq!(snap.input_trim_db, 10.0);
        snap.set(OUTPUT_TRIM, -40.0);
        assert_eq!(snap.output_trim_db, -6.0);
        snap.set(PROCESS, 150.0);
        assert_eq!(snap.process_percent, 100.0);
        snap.set(TYPE, 9.0);
        assert_eq!(snap.color, ColorType::DarkEssence);
        snap.set(BRIGHTNESS, -3.0);
        assert_eq!(snap.brightness, Brightness::Opal);
    }

    #[test]
    fn test_set_toggles_and_choices() {
        let mut snap = ParamSnapshot::default();
        snap.set(BYPASS, 1.0);
        snap.set(AUTO_GAIN, 0.0);
        snap.set(TYPE, 3.0);
        assert!(snap.bypass);
        assert!(!snap.auto_gain);
        assert_eq!(snap.color, ColorType::Luster);
        assert_eq!(snap.get(TYPE), 3.0);
        assert_eq!(snap.get(BYPASS), 1.0);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let mut snap = ParamSnapshot::default();
        snap.set(42, 1.0);
        assert_eq!(snap, ParamSnapshot::default());
        assert_eq!(snap.get(42), 0.0);
    }

    #[test]
    fn test_processing_amount() {
        let snap = ParamSnapshot {
            process_percent: 25.0,
            ..ParamSnapshot::default()
        };
        assert_eq!(snap.processing_amount(), 0.25);
    }
}
