//! Decimal precision conversion
//!
//! Prices and amounts travel between contracts that disagree on fixed-point
//! precision (an 8-decimal price feed, an 18-decimal base token, a 6-decimal
//! settlement token). Conversion always multiplies first and divides last so
//! no precision is lost before the final floor.

/// Largest exponent whose power of ten fits in u128
pub const MAX_DECIMALS: u8 = 38;

/// 10^exp, or None when it does not fit in u128
pub fn pow10(exp: u8) -> Option<u128> {
    if exp > MAX_DECIMALS {
        return None;
    }
    10u128.checked_pow(exp as u32)
}

/// Rescale `value` from `from_decimals` to `to_decimals` precision.
///
/// Returns `value * 10^to / 10^from`, floored. None on overflow of the
/// intermediate product or an unrepresentable exponent.
pub fn normalize_decimals(value: u128, from_decimals: u8, to_decimals: u8) -> Option<u128> {
    let scale_up = pow10(to_decimals)?;
    let scale_down = pow10(from_decimals)?;
    let numerator = value.checked_mul(scale_up)?;
    Some(numerator / scale_down)
}
