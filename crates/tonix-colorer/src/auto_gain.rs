//! Makeup gain as a function of processing amount.

/// Auto-gain scalar `1 + p·a1 + p²·a2` for processing amount `p` in \[0, 1\].
///
/// Unity at `p = 0` for every coefficient pair.
///
/// # Example
///
/// ```rust
/// use tonix_colorer::auto_gain;
///
/// assert_eq!(auto_gain(0.0, -0.416, 0.092), 1.0);
/// assert!((auto_gain(1.0, -0.416, 0.092) - 0.676).abs() < 1e-12);
/// ```
#[inline]
pub fn auto_gain(amount: f64, a1: f64, a2: f64) -> f64 {
    1.0 + amount * a1 + amount * amount * a2
}
