//! Index-addressed parameter metadata.
//!
//! A processor that implements [`ParameterInfo`] can be driven without
//! knowing its concrete type: the CLI maps `key=value` lines onto it, presets
//! store its values by string id, and the realtime path pushes snapshots
//! through [`ParameterInfo::set_param`].
//!
//! Values are plain `f32` in the parameter's own unit. Choices carry the
//! label index and toggles carry `0.0` or `1.0`.
//!
//! ```rust
//! use tonix_core::{ParamDescriptor, ParamId, ParameterInfo};
//!
//! struct Drive {
//!     amount: f32,
//! }
//!
//! const AMOUNT: ParamDescriptor =
//!     ParamDescriptor::percent("Drive Amount", "Drive", 50.0).with_id(ParamId(1), "drive");
//!
//! impl ParameterInfo for Drive {
//!     fn param_count(&self) -> usize {
//!         1
//!     }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         (index == 0).then_some(AMOUNT)
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.amount } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.amount = AMOUNT.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut drive = Drive { amount: 50.0 };
//! let index = drive.param_index_by_string_id("drive").unwrap();
//! drive.set_param(index, 250.0);
//! assert_eq!(drive.get_param(index), 100.0);
//! ```

/// Numeric parameter id, fixed for the life of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Bit set describing how a parameter may be driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Empty set.
    pub const NONE: Self = Self(0);
    /// Open to host automation. Set by every constructor.
    pub const AUTOMATABLE: Self = Self(0b001);
    /// Whole-number values only.
    pub const STEPPED: Self = Self(0b010);
    /// Marks the bypass switch.
    pub const BYPASS: Self = Self(0b100);

    /// All of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags set in either.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// A processor whose parameters can be listed, read and written by index.
///
/// Indices run over `0..param_count()` and do not change while the instance
/// lives. Out-of-range reads return `0.0`; out-of-range writes are ignored.
pub trait ParameterInfo {
    /// Number of parameters.
    fn param_count(&self) -> usize;

    /// Descriptor at `index`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Writes a value, clamped to the descriptor's range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Index of the parameter whose name or short name matches, ignoring
    /// ASCII case.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name) || d.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Index of the parameter with the given preset key.
    fn param_index_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Numeric id of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }
}

/// Display name, range and identity of one parameter.
///
/// Built with one of the unit constructors and finished with the `with_*`
/// methods, all usable in `const` context.
///
/// ```rust
/// use tonix_core::{ParamDescriptor, ParamUnit};
///
/// let color = ParamDescriptor::choice("Color", "Color", &["Warm", "Bright", "Dark"], 0);
/// assert_eq!(color.unit, ParamUnit::Choice);
/// assert_eq!(color.max, 2.0);
/// assert_eq!(color.label(1.4), Some("Bright"));
/// assert_eq!(color.value_for_label("DARK"), Some(2.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name.
    pub name: &'static str,
    /// At most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest value.
    pub min: f32,
    /// Highest value.
    pub max: f32,
    /// Value of a fresh instance.
    pub default: f32,
    /// Increment for stepwise editing.
    pub step: f32,
    /// `ParamId(0)` until assigned.
    pub id: ParamId,
    /// Key used in preset files and on the command line.
    pub string_id: &'static str,
    /// Capability flags.
    pub flags: ParamFlags,
    /// Display grouping, empty when ungrouped.
    pub group: &'static str,
    /// Value names for choices, indexed by value.
    pub labels: &'static [&'static str],
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        (min, max, default): (f32, f32, f32),
    ) -> Self {
        let stepped = matches!(unit, ParamUnit::Choice | ParamUnit::Toggle);
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: if stepped { 1.0 } else { 0.1 },
            id: ParamId(0),
            string_id: "",
            flags: if stepped {
                ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED)
            } else {
                ParamFlags::AUTOMATABLE
            },
            group: "",
            labels: &[],
        }
    }

    /// Level in decibels over `min..=max`.
    pub const fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Decibels, (min, max, default))
    }

    /// Amount over `0..=100` percent.
    pub const fn percent(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::base(name, short_name, ParamUnit::Percent, (0.0, 100.0, default))
    }

    /// One of `labels`, stored as its index.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        let max = labels.len().saturating_sub(1) as f32;
        let mut desc = Self::base(name, short_name, ParamUnit::Choice, (0.0, max, default as f32));
        desc.labels = labels;
        desc
    }

    /// Switch stored as `0.0` or `1.0`.
    pub const fn toggle(name: &'static str, short_name: &'static str, default: bool) -> Self {
        let default = if default { 1.0 } else { 0.0 };
        Self::base(name, short_name, ParamUnit::Toggle, (0.0, 1.0, default))
    }

    /// Assigns the numeric id and preset key.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Overrides the edit increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Replaces the flag set.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Places the parameter in a display group.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Forces `value` into range. Stepped parameters round to the nearest
    /// whole value first, and NaN becomes the default.
    ///
    /// ```rust
    /// use tonix_core::ParamDescriptor;
    ///
    /// let trim = ParamDescriptor::gain_db("Output Trim", "Out Trim", -24.0, 24.0, 0.0);
    /// assert_eq!(trim.clamp(30.0), 24.0);
    /// assert_eq!(trim.clamp(f32::NAN), 0.0);
    ///
    /// let bypass = ParamDescriptor::toggle("Bypass", "Bypass", false);
    /// assert_eq!(bypass.clamp(0.6), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = if self.flags.contains(ParamFlags::STEPPED) {
            libm::roundf(value)
        } else {
            value
        };
        value.max(self.min).min(self.max)
    }

    /// Position of `value` within the range, `0.0..=1.0`. A zero-width
    /// range maps everything to `0.0`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span > 0.0 {
            (self.clamp(value) - self.min) / span
        } else {
            0.0
        }
    }

    /// Label for a choice value. `None` unless the parameter has labels.
    pub fn label(&self, value: f32) -> Option<&'static str> {
        if self.labels.is_empty() {
            None
        } else {
            self.labels.get(self.clamp(value) as usize).copied()
        }
    }

    /// Choice value for a label, ignoring ASCII case.
    pub fn value_for_label(&self, label: &str) -> Option<f32> {
        let index = self.labels.iter().position(|l| l.eq_ignore_ascii_case(label))?;
        Some(index as f32)
    }
}

/// How a parameter's value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels.
    Decibels,
    /// Percent.
    Percent,
    /// Label index.
    Choice,
    /// On or off.
    Toggle,
    /// Bare number.
    None,
}

impl ParamUnit {
    /// Text appended after a formatted value.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Decibels => " dB",
            Self::Percent => "%",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAVORS: &[&str] = &["Clean", "Grit", "Fuzz"];

    /// Stand-in processor: a trim, a drive amount, a flavor and a mute.
    #[derive(Default)]
    struct Strip {
        values: [f32; 4],
    }

    fn strip_param(index: usize) -> Option<ParamDescriptor> {
        let desc = match index {
            0 => ParamDescriptor::gain_db("Trim", "Trim", -12.0, 12.0, 0.0)
                .with_id(ParamId(40), "trim"),
            1 => ParamDescriptor::percent("Drive", "Drv", 30.0).with_id(ParamId(41), "drive"),
            2 => ParamDescriptor::choice("Flavor", "Flv", FLAVORS, 0)
                .with_id(ParamId(42), "flavor"),
            3 => ParamDescriptor::toggle("Mute", "Mute", false).with_id(ParamId(43), "mute"),
            _ => return None,
        };
        Some(desc)
    }

    impl ParameterInfo for Strip {
        fn param_count(&self) -> usize {
            self.values.len()
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            strip_param(index)
        }

        fn get_param(&self, index: usize) -> f32 {
            self.values.get(index).copied().unwrap_or(0.0)
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let (Some(desc), Some(slot)) = (strip_param(index), self.values.get_mut(index)) {
                *slot = desc.clamp(value);
            }
        }
    }

    #[test]
    fn test_lookups() {
        let strip = Strip::default();
        assert_eq!(strip.find_param_by_name("DRV"), Some(1));
        assert_eq!(strip.find_param_by_name("flavor"), Some(2));
        assert_eq!(strip.find_param_by_name("volume"), None);
        assert_eq!(strip.param_index_by_string_id("mute"), Some(3));
        assert_eq!(strip.param_index_by_string_id("Mute"), None);
        assert_eq!(strip.param_id(0), Some(ParamId(40)));
        assert_eq!(strip.param_id(4), None);
    }

    #[test]
    fn test_set_param_clamps_and_rounds() {
        let mut strip = Strip::default();
        strip.set_param(0, -40.0);
        strip.set_param(1, 130.0);
        strip.set_param(2, 1.4);
        strip.set_param(3, 0.9);
        assert_eq!(strip.values, [-12.0, 100.0, 1.0, 1.0]);

        strip.set_param(9, 5.0);
        assert_eq!(strip.get_param(9), 0.0);
    }

    #[test]
    fn test_constructor_defaults() {
        let trim = strip_param(0).unwrap();
        assert_eq!(trim.step, 0.1);
        assert_eq!(trim.flags, ParamFlags::AUTOMATABLE);
        assert_eq!(trim.unit.suffix(), " dB");

        let flavor = strip_param(2).unwrap();
        assert_eq!((flavor.min, flavor.max, flavor.step), (0.0, 2.0, 1.0));
        assert!(flavor.flags.contains(ParamFlags::STEPPED));

        let mute = strip_param(3).unwrap();
        assert_eq!(mute.default, 0.0);
        assert!(mute.labels.is_empty());
        assert_eq!(mute.label(1.0), None);
    }

    #[test]
    fn test_labels() {
        let flavor = strip_param(2).unwrap();
        assert_eq!(flavor.label(-3.0), Some("Clean"));
        assert_eq!(flavor.label(8.0), Some("Fuzz"));
        assert_eq!(flavor.value_for_label("grit"), Some(1.0));
        assert_eq!(flavor.value_for_label("Crunch"), None);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        assert_eq!(strip_param(1).unwrap().clamp(f32::NAN), 30.0);
    }

    #[test]
    fn test_normalize() {
        let trim = strip_param(0).unwrap();
        assert_eq!(trim.normalize(-12.0), 0.0);
        assert_eq!(trim.normalize(6.0), 0.75);
        assert_eq!(trim.normalize(50.0), 1.0);

        let fixed = ParamDescriptor::gain_db("Fixed", "Fixed", 3.0, 3.0, 3.0);
        assert_eq!(fixed.normalize(3.0), 0.0);
    }

    #[test]
    fn test_builders_and_flags() {
        let desc = ParamDescriptor::toggle("Bypass", "Bypass", true)
            .with_step(0.5)
            .with_group("gain")
            .with_flags(ParamFlags::STEPPED.union(ParamFlags::BYPASS));
        assert_eq!(desc.step, 0.5);
        assert_eq!(desc.group, "gain");
        assert!(desc.flags.contains(ParamFlags::BYPASS));
        assert!(!desc.flags.contains(ParamFlags::AUTOMATABLE));
        assert_eq!(ParamFlags::default(), ParamFlags::AUTOMATABLE);
        assert!(ParamFlags::NONE.contains(ParamFlags::NONE));
    }
}
