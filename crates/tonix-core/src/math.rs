//! Level conversions and denormal handling for the `f64` signal path.

use core::f64::consts::LN_10;
use libm::{exp, log};

/// Smallest magnitude [`linear_to_db`] looks at, -200 dB.
const LINEAR_FLOOR: f64 = 1e-10;

/// Magnitude below which [`flush_denormal`] returns zero.
const DENORMAL_THRESHOLD: f64 = 1e-20;

/// Gain factor for a level in decibels.
///
/// ```rust
/// use tonix_core::db_to_linear;
///
/// assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-12);
/// assert!((db_to_linear(12.0) - 3.981).abs() < 1e-3);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    exp(db * (LN_10 / 20.0))
}

/// Level in decibels of a gain factor. Zero and negative input read as
/// -200 dB.
///
/// ```rust
/// use tonix_core::linear_to_db;
///
/// assert!((linear_to_db(0.1) + 20.0).abs() < 1e-9);
/// assert_eq!(linear_to_db(0.0), linear_to_db(-3.0));
/// ```
#[inline]
pub fn linear_to_db(linear: f64) -> f64 {
    log(linear.max(LINEAR_FLOOR)) * (20.0 / LN_10)
}

/// Zero for values too small to matter, the value itself otherwise.
///
/// Integrator state decaying toward silence would otherwise drift into the
/// subnormal range.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f64) -> f64 {
    if x.abs() < DENORMAL_THRESHOLD { 0.0 } else { x }
}

/// Zero for subnormal values, the value itself otherwise.
///
/// Software rendition of flush-to-zero: only magnitudes below
/// [`f64::MIN_POSITIVE`] are touched.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_subnormal(x: f64) -> f64 {
    if x.abs() < f64::MIN_POSITIVE { 0.0 } else { x }
}
