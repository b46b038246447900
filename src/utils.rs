use alloy::primitives::U256;

/// Nearest `f64` to `value`, rounding half to even. Digits beyond double precision are lost.
///
/// Goes through the decimal digits because `f64::from_str` rounds correctly from any
/// length of input. A digit string always parses and `U256::MAX` (~1.2e77) is far below
/// `f64::MAX`, so the zero fallback is never taken.
pub fn u256_to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or_default()
}

/// Unix time in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
