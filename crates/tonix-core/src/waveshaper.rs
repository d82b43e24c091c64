//! Polynomial waveshapers.
//!
//! Three fixed saturation curves, each a degree-15 polynomial evaluated on a
//! hard-clipped input. The polynomials approximate a continuous clip
//! characteristic without a lookup table: one clamp, four even powers, and
//! fifteen multiply-adds per sample.
//!
//! | Variant | Index | Clamp range | Slope at 0 |
//! |---------|-------|-------------|------------|
//! | [`Waveshaper::Luminous`] | 0 | \[-1, 1\] | 2.83 |
//! | [`Waveshaper::Radiant`] | 1 | \[-0.991184403, 0.990821248\] | 1.50 |
//! | [`Waveshaper::Dark`] | 2 | \[-0.991022224, 0.990984424\] | 2.06 |
//!
//! Callers keep inputs finite; NaN passes straight through the clamp.

/// Coefficients for x¹..x¹⁵ of variant 0.
const LUMINOUS: [f64; 15] = [
    2.827568855,
    0.0003903798913,
    -4.17220229,
    -0.0001107320401,
    0.523459874,
    0.0002768079893,
    -0.423546883,
    -0.001448632,
    3.224580615,
    0.002728704,
    -5.495344862,
    -0.002846356,
    5.449768693,
    0.001310366,
    -2.414078731,
];

/// Coefficients for x¹..x¹⁵ of variant 1.
const RADIANT: [f64; 15] = [
    1.501040337,
    -0.0002757478168,
    -0.301802438,
    0.003273802,
    1.786333688,
    -0.046104732,
    -24.582679252,
    0.110553367,
    41.112226106,
    -0.092987632,
    -16.724196818,
    0.01857341,
    -9.331919223,
    0.006696015,
    6.543207186,
];

/// Coefficients for x¹..x¹⁵ of variant 2.
const DARK: [f64; 15] = [
    2.063930806,
    0.0002008141989,
    -0.414990906,
    -0.003741183,
    2.456380956,
    0.03108163,
    -33.802027499,
    -0.092816819,
    56.531406839,
    0.134928028,
    -22.998647073,
    -0.098216457,
    -12.829323005,
    0.028676158,
    8.996306767,
];

/// Saturation curve selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveshaper {
    /// Symmetric clamp to ±1, steepest slope. Index 0.
    #[default]
    Luminous,
    /// Slightly asymmetric clamp, gentle slope. Index 1.
    Radiant,
    /// Slightly asymmetric clamp, medium slope. Index 2.
    Dark,
}

impl Waveshaper {
    /// All variants in index order.
    pub const ALL: [Self; 3] = [Self::Luminous, Self::Radiant, Self::Dark];

    /// Variant for a numeric selector, `None` outside `0..=2`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Luminous),
            1 => Some(Self::Radiant),
            2 => Some(Self::Dark),
            _ => None,
        }
    }

    /// Numeric selector of this variant.
    pub const fn index(self) -> usize {
        match self {
            Self::Luminous => 0,
            Self::Radiant => 1,
            Self::Dark => 2,
        }
    }

    /// Input clamp range `(low, high)`.
    pub const fn clamp_range(self) -> (f64, f64) {
        match self {
            Self::Luminous => (-1.0, 1.0),
            Self::Radiant => (-0.991184403, 0.990821248),
            Self::Dark => (-0.991022224, 0.990984424),
        }
    }

    /// Polynomial coefficients for x¹ through x¹⁵.
    pub const fn coefficients(self) -> &'static [f64; 15] {
        match self {
            Self::Luminous => &LUMINOUS,
            Self::Radiant => &RADIANT,
            Self::Dark => &DARK,
        }
    }

    /// Apply the curve to one sample.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tonix_core::Waveshaper;
    ///
    /// assert_eq!(Waveshaper::Luminous.process(0.0), 0.0);
    /// // Inputs past the clamp all land on the same output.
    /// assert_eq!(Waveshaper::Dark.process(4.0), Waveshaper::Dark.process(1.0));
    /// ```
    #[inline]
    pub fn process(self, x: f64) -> f64 {
        let (low, high) = self.clamp_range();
        polynomial(self.coefficients(), x.max(low).min(high))
    }
}

/// Apply waveshaper `variant` to `x`.
///
/// Free-function form of [`Waveshaper::process`].
#[inline]
pub fn shape(variant: Waveshaper, x: f64) -> f64 {
    variant.process(x)
}

/// Evaluate `c[0]·x + c[1]·x² + … + c[14]·x¹⁵` from the even powers
/// x², x⁴, x⁶ and x⁸, summed in ascending degree.
#[inline]
fn polynomial(c: &[f64; 15], x: f64) -> f64 {
    let x2 = x * x;
    let x4 = x2 * x2;
    let x6 = x4 * x2;
    let x8 = x4 * x4;

    x * c[0]
        + x2 * c[1]
        + x2 * x * c[2]
        + x4 * c[3]
        + x4 * x * c[4]
        + x6 * c[5]
        + x6 * x * c[6]
        + x8 * c[7]
        + x8 * x * c[8]
        + x8 * x2 * c[9]
        + x8 * x2 * x * c[10]
        + x8 * x4 * c[11]
        + x8 * x4 * x * c[12]
        + x8 * x6 * c[13]
        + x8 * x6 * x * c[14]
}
