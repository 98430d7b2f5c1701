//! Mathematical utility functions for report sanitisation
//!
//! Percentage helpers with proper zero-division handling, shared by the
//! sanitiser and anything else that turns counts into shares.

/// Calculate percentage safely for u64 values, returning 0.0 if total is zero.
///
/// **Precision Note**: Large u64 values (>2^53) may lose precision when cast to f64.
/// This is acceptable for percentage display purposes where sub-percentage precision
/// is not critical.
///
/// # Examples
/// ```
/// use cms_stats::utils::math::safe_percentage_u64;
///
/// assert_eq!(safe_percentage_u64(50, 100), 50.0);
/// assert_eq!(safe_percentage_u64(0, 100), 0.0);
/// assert_eq!(safe_percentage_u64(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage_u64(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Round to a fixed number of decimal places, halves away from zero.
///
/// The scaled value is first cut to 15 significant digits, so a decimal half
/// stored as `...4999999` in binary still rounds up (`14.375` -> `14.38`).
///
/// ```
/// use cms_stats::utils::math::round_to;
///
/// assert_eq!(round_to(33.333333, 2), 33.33);
/// assert_eq!(round_to(66.666666, 2), 66.67);
/// assert_eq!(round_to(12.5, 0), 13.0);
/// assert_eq!(round_to(14.375, 2), 14.38);
/// ```
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    let pre_rounded: f64 = format!("{:.14e}", scaled).parse().unwrap_or(scaled);
    pre_rounded.round() / factor
}

/// Share of `total` taken by `part`, as a percentage rounded to two places.
///
/// Returns 0.0 when `total` is zero.
#[inline]
pub fn rounded_percentage(part: u64, total: u64) -> f64 {
    round_to(safe_percentage_u64(part, total), 2)
}
