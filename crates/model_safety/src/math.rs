//! Safe arithmetic helpers - no unwrap, no panics, no lossy casts

/// Add u128 with saturation at MAX
pub fn add_u128(a: u128, b: u128) -> u128 {
    a.saturating_add(b)
}

/// Subtract u128 with saturation at 0
pub fn sub_u128(a: u128, b: u128) -> u128 {
    a.saturating_sub(b)
}

/// Subtract i128 with saturation
pub fn sub_i128(a: i128, b: i128) -> i128 {
    a.saturating_sub(b)
}

/// Clamp positive i128 to u128 (negative becomes 0)
pub fn clamp_pos_i128(x: i128) -> u128 {
    if x > 0 {
        x.unsigned_abs()
    } else {
        0
    }
}

/// Convert u128 to i128 with saturation at i128::MAX
pub fn u128_to_i128(x: u128) -> i128 {
    i128::try_from(x).unwrap_or(i128::MAX)
}

/// Checked signed + unsigned addition (None on overflow).
/// `b` may exceed `i128::MAX` when `a` is negative enough to absorb it.
pub fn checked_add_i128_u128(a: i128, b: u128) -> Option<i128> {
    a.checked_add_unsigned(b)
}

/// Minimum of two u128
pub fn min_u128(a: u128, b: u128) -> u128 {
    if a < b { a } else { b }
}
