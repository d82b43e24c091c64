//! Mode table: (ColorType, Brightness) → coefficient bundle.
//!
//! Fifteen fixed entries. [`ColorType`] picks the waveshaper, the mix
//! topology (`a3`, `f1`, `p20`, `p24`, gate) and the auto-gain quadratic;
//! [`Brightness`] picks the pair of filter edges within that type.
//!
//! | ColorType | Opal edges | Gold edges | Sapphire edges | a3 | f1 | p20 | p24 | gate | shaper | gain a1, a2 |
//! |---|---|---|---|---|---|---|---|---|---|---|
//! | Luminiscent | 0.625, 0.1875 | 0.4375, 0.3125 | 0.1875, 0.375 | 0.25 | 0.75 | 0.3125 | 0.0625 | on | 0 | −0.416, 0.092 |
//! | Iridescent | 0.625, 0.1875 | 0.375, 0.3125 | 0.3125, 0.5 | 0.25 | 0.875 | 0.3125 | 0.0625 | on | 0 | −0.393, 0.082 |
//! | Radiant | 0.75, 0.125 | 0.45629901, 0.375 | 0.375, 0.5 | 0.375 | 0.75 | 0.1875 | 0.0125 | off | 1 | −0.441, 0.103 |
//! | Luster | 0.75, 0.125 | 0.45629901, 0.375 | 0.375, 0.5625 | 1.0 | 0.6875 | 0.27343899 | 0.1171875 | off | 2 | −0.712, 0.172 |
//! | DarkEssence | 0.75, 0.125 | 0.45629901, 0.375 | 0.375, 0.5625 | 0.375 | 0.75 | 0.5625 | 0.0125 | off | 2 | −0.636, 0.17 |
//!
//! Edges in the table are unscaled. The channel applies the sample-rate
//! scale on every mode application.

use tonix_core::Waveshaper;

/// Tonal character selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorType {
    /// Gated, symmetric shaper, light auto-gain.
    Luminiscent,
    /// Gated, symmetric shaper, a little more pre-emphasis.
    #[default]
    Iridescent,
    /// Ungated, gentle asymmetric shaper.
    Radiant,
    /// Ungated, full-depth drive into the first shaper, halved wet path.
    Luster,
    /// Ungated, heavy feed-forward into the second shaper.
    DarkEssence,
}

impl ColorType {
    /// All types in parameter index order.
    pub const ALL: [Self; 5] = [
        Self::Luminiscent,
        Self::Iridescent,
        Self::Radiant,
        Self::Luster,
        Self::DarkEssence,
    ];

    /// Display names in parameter index order.
    pub const NAMES: [&'static str; 5] =
        ["Luminiscent", "Iridescent", "Radiant", "Luster", "Dark Essence"];

    /// Type for a parameter index, `None` outside `0..=4`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Luminiscent),
            1 => Some(Self::Iridescent),
            2 => Some(Self::Radiant),
            3 => Some(Self::Luster),
            4 => Some(Self::DarkEssence),
            _ => None,
        }
    }

    /// Parameter index of this type.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Parse a display name or identifier, ignoring case, spaces,
    /// underscores and hyphens (`"Dark Essence"`, `"dark_essence"`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| loose_eq(t.name(), name))
    }
}

/// Filter edge selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Brightness {
    /// Darkest edge pair.
    Opal,
    /// Middle edge pair.
    #[default]
    Gold,
    /// Brightest edge pair.
    Sapphire,
}

impl Brightness {
    /// All brightness values in parameter index order.
    pub const ALL: [Self; 3] = [Self::Opal, Self::Gold, Self::Sapphire];

    /// Display names in parameter index order.
    pub const NAMES: [&'static str; 3] = ["Opal", "Gold", "Sapphire"];

    /// Brightness for a parameter index, `None` outside `0..=2`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Opal),
            1 => Some(Self::Gold),
            2 => Some(Self::Sapphire),
            _ => None,
        }
    }

    /// Parameter index of this value.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Parse a name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| loose_eq(b.name(), name))
    }
}

/// Which coefficient semantics to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Compatibility {
    /// Every type gets its own table row; auto-gain follows its toggle.
    #[default]
    Corrected,
    /// Reproduces the first release sample for sample: Radiant and Luster
    /// resolve to the DarkEssence row, auto-gain engages whenever process
    /// exceeds 0.5%, trims are single-precision and only subnormal
    /// integrator state is flushed.
    Legacy,
}

impl Compatibility {
    /// Lowercase identifier used in presets and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Corrected => "corrected",
            Self::Legacy => "legacy",
        }
    }

    /// Parse an identifier, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Corrected, Self::Legacy]
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Coefficients for one (ColorType, Brightness) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeCoefficients {
    /// Leaky high-pass term of the differencer.
    pub high_edge: f64,
    /// One-pole integrator coefficient.
    pub low_edge: f64,
    /// Scales the processing amount into the wet depth.
    pub a3: f64,
    /// Pre-emphasis applied to the differenced signal.
    pub f1: f64,
    /// Feed from the first shaper into the second.
    pub p20: f64,
    /// Dry subtraction inside the wet path.
    pub p24: f64,
    /// Feed the filtered signal forward instead of the raw input.
    pub gate: bool,
    /// Curve used by both shaper stages.
    pub waveshaper: Waveshaper,
    /// Linear auto-gain coefficient.
    pub gain_a1: f64,
    /// Quadratic auto-gain coefficient.
    pub gain_a2: f64,
}

impl ModeCoefficients {
    /// Copy with both filter edges multiplied by `scale`.
    #[inline]
    pub fn scaled(mut self, scale: f64) -> Self {
        self.high_edge *= scale;
        self.low_edge *= scale;
        self
    }
}

/// Unscaled coefficients for `color` at `brightness`.
///
/// Total over both enums; never fails.
///
/// # Example
///
/// ```rust
/// use tonix_colorer::{Brightness, ColorType, lookup};
///
/// let c = lookup(ColorType::Luster, Brightness::Sapphire);
/// assert_eq!(c.low_edge, 0.5625);
/// assert_eq!(c.a3, 1.0);
/// ```
pub fn lookup(color: ColorType, brightness: Brightness) -> ModeCoefficients {
    let (high_edge, low_edge) = edges(color, brightness);
    match color {
        ColorType::Luminiscent => ModeCoefficients {
            high_edge,
            low_edge,
            a3: 0.25,
            f1: 0.75,
            p20: 0.3125,
            p24: 0.0625,
            gate: true,
            waveshaper: Waveshaper::Luminous,
            gain_a1: -0.416,
            gain_a2: 0.092,
        },
        ColorType::Iridescent => ModeCoefficients {
            high_edge,
            low_edge,
            a3: 0.25,
            f1: 0.875,
            p20: 0.3125,
            p24: 0.0625,
            gate: true,
            waveshaper: Waveshaper::Luminous,
            gain_a1: -0.393,
            gain_a2: 0.082,
        },
        ColorType::Radiant => ModeCoefficients {
            high_edge,
            low_edge,
            a3: 0.375,
            f1: 0.75,
            p20: 0.1875,
            p24: 0.0125,
            gate: false,
            waveshaper: Waveshaper::Radiant,
            gain_a1: -0.441,
            gain_a2: 0.103,
        },
        ColorType::Luster => ModeCoefficients {
            high_edge,
            low_edge,
            a3: 1.0,
            f1: 0.6875,
            p20: 0.273_438_99,
            p24: 0.117_187_5,
            gate: false,
            waveshaper: Waveshaper::Dark,
            gain_a1: -0.712,
            gain_a2: 0.172,
        },
        ColorType::DarkEssence => ModeCoefficients {
            high_edge,
            low_edge,
            a3: 0.375,
            f1: 0.75,
            p20: 0.5625,
            p24: 0.0125,
            gate: false,
            waveshaper: Waveshaper::Dark,
            gain_a1: -0.636,
            gain_a2: 0.17,
        },
    }
}

/// Coefficients under the given [`Compatibility`] semantics.
///
/// With [`Compatibility::Legacy`], Radiant and Luster resolve to the
/// DarkEssence row. Only the bundle changes; a channel set to Luster still
/// takes the Luster-only branches of the transform.
pub fn lookup_with(
    color: ColorType,
    brightness: Brightness,
    compatibility: Compatibility,
) -> ModeCoefficients {
    match (compatibility, color) {
        (Compatibility::Legacy, ColorType::Radiant | ColorType::Luster) => {
            lookup(ColorType::DarkEssence, brightness)
        }
        _ => lookup(color, brightness),
    }
}

fn edges(color: ColorType, brightness: Brightness) -> (f64, f64) {
    match (color, brightness) {
        (ColorType::Luminiscent, Brightness::Opal) => (0.625, 0.1875),
        (ColorType::Luminiscent, Brightness::Gold) => (0.4375, 0.3125),
        (ColorType::Luminiscent, Brightness::Sapphire) => (0.1875, 0.375),
        (ColorType::Iridescent, Brightness::Opal) => (0.625, 0.1875),
        (ColorType::Iridescent, Brightness::Gold) => (0.375, 0.3125),
        (ColorType::Iridescent, Brightness::Sapphire) => (0.3125, 0.5),
        (ColorType::Radiant, Brightness::Opal) => (0.75, 0.125),
        (ColorType::Radiant, Brightness::Gold) => (0.45629901, 0.375),
        (ColorType::Radiant, Brightness::Sapphire) => (0.375, 0.5),
        (ColorType::Luster | ColorType::DarkEssence, Brightness::Opal) => (0.75, 0.125),
        (ColorType::Luster | ColorType::DarkEssence, Brightness::Gold) => (0.45629901, 0.375),
        (ColorType::Luster | ColorType::DarkEssence, Brightness::Sapphire) => (0.375, 0.5625),
    }
}

fn loose_eq(canonical: &str, input: &str) -> bool {
    let mut a = canonical
        .bytes()
        .filter(|b| !matches!(b, b' ' | b'_' | b'-'))
        .map(|b| b.to_ascii_lowercase());
    let mut b = input
        .trim()
        .bytes()
        .filter(|b| !matches!(b, b' ' | b'_' | b'-'))
        .map(|b| b.to_ascii_lowercase());
    loop {
        match (a.next(), b.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) if x == y => {}
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_total() {
        for color in ColorType::ALL {
            for brightness in Brightness::ALL {
                let c = lookup(color, brightness);
                assert!(c.high_edge > 0.0 && c.high_edge < 1.0);
                assert!(c.low_edge > 0.0 && c.low_edge < 1.0);
            }
        }
    }

    #[test]
    fn test_radiant_row_is_its_own() {
        let c = lookup(ColorType::Radiant, Brightness::Sapphire);
        assert_eq!((c.high_edge, c.low_edge), (0.375, 0.5));
        assert_eq!(c.a3, 0.375);
        assert_eq!(c.p20, 0.1875);
        assert_eq!(c.waveshaper, Waveshaper::Radiant);
        assert_eq!((c.gain_a1, c.gain_a2), (-0.441, 0.103));
    }

    #[test]
    fn test_gated_types() {
        assert!(lookup(ColorType::Luminiscent, Brightness::Gold).gate);
        assert!(lookup(ColorType::Iridescent, Brightness::Gold).gate);
        assert!(!lookup(ColorType::Radiant, Brightness::Gold).gate);
        assert!(!lookup(ColorType::Luster, Brightness::Gold).gate);
        assert!(!lookup(ColorType::DarkEssence, Brightness::Gold).gate);
    }

    #[test]
    fn test_shaper_assignment() {
        assert_eq!(lookup(ColorType::Luminiscent, Brightness::Opal).waveshaper.index(), 0);
        assert_eq!(lookup(ColorType::Iridescent, Brightness::Opal).waveshaper.index(), 0);
        assert_eq!(lookup(ColorType::Radiant, Brightness::Opal).waveshaper.index(), 1);
        assert_eq!(lookup(ColorType::Luster, Brightness::Opal).waveshaper.index(), 2);
        assert_eq!(lookup(ColorType::DarkEssence, Brightness::Opal).waveshaper.index(), 2);
    }

    #[test]
    fn test_legacy_fallthrough() {
        for brightness in Brightness::ALL {
            let dark = lookup(ColorType::DarkEssence, brightness);
            assert_eq!(
                lookup_with(ColorType::Radiant, brightness, Compatibility::Legacy),
                dark
            );
            assert_eq!(
                lookup_with(ColorType::Luster, brightness, Compatibility::Legacy),
                dark
            );
            for color in [ColorType::Luminiscent, ColorType::Iridescent, ColorType::DarkEssence] {
                assert_eq!(
                    lookup_with(color, brightness, Compatibility::Legacy),
                    lookup(color, brightness)
                );
            }
        }
    }

    #[test]
    fn test_corrected_matches_lookup() {
        for color in ColorType::ALL {
            for brightness in Brightness::ALL {
                assert_eq!(
                    lookup_with(color, brightness, Compatibility::Corrected),
                    lookup(color, brightness)
                );
            }
        }
    }

    #[test]
    fn test_scaled_touches_edges_only() {
        let c = lookup(ColorType::Iridescent, Brightness::Sapphire);
        let s = c.scaled(0.5);
        assert_eq!(s.high_edge, 0.15625);
        assert_eq!(s.low_edge, 0.25);
        assert_eq!(s.a3, c.a3);
        assert_eq!(s.gain_a1, c.gain_a1);
    }

    #[test]
    fn test_color_names() {
        assert_eq!(ColorType::from_name("dark essence"), Some(ColorType::DarkEssence));
        assert_eq!(ColorType::from_name("DARK_ESSENCE"), Some(ColorType::DarkEssence));
        assert_eq!(ColorType::from_name("darkessence"), Some(ColorType::DarkEssence));
        assert_eq!(ColorType::from_name(" luster "), Some(ColorType::Luster));
        assert_eq!(ColorType::from_name("dark"), None);
        assert_eq!(ColorType::DarkEssence.name(), "Dark Essence");
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, color) in ColorType::ALL.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(ColorType::from_index(i), Some(*color));
        }
        for (i, brightness) in Brightness::ALL.iter().enumerate() {
            assert_eq!(brightness.index(), i);
            assert_eq!(Brightness::from_index(i), Some(*brightness));
        }
        assert_eq!(ColorType::from_index(5), None);
        assert_eq!(Brightness::from_index(3), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ColorType::default(), ColorType::Iridescent);
        assert_eq!(Brightness::default(), Brightness::Gold);
        assert_eq!(Compatibility::default(), Compatibility::Corrected);
        assert_eq!(Brightness::from_name("SAPPHIRE"), Some(Brightness::Sapphire));
        assert_eq!(Compatibility::from_name("Legacy"), Some(Compatibility::Legacy));
        assert_eq!(Compatibility::from_name("strict"), None);
    }
}
