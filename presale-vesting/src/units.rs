//! Conversion between human token amounts ("12.5") and base units.
use num_bigint::BigUint;
use num_traits::Zero;

use crate::VestingError;

/// Parse a decimal amount into base units with `decimals` fractional digits.
///
/// Extra fractional digits are truncated. A blank string is zero.
pub fn parse_units(text: &str, decimals: u8) -> Result<BigUint, VestingError> {
    let s = text.trim();
    if s.is_empty() {
        return Ok(BigUint::zero());
    }
    let invalid = || VestingError::InvalidAmount(text.to_string());
    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) if !f.is_empty() => (w, f),
        Some(_) => return Err(invalid()),
        None => (s, ""),
    };
    if whole.is_empty() || !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let decimals = usize::from(decimals);
    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    digits.extend(fraction.chars().chain(std::iter::repeat('0')).take(decimals));
    BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)
}

/// Render base units as a decimal string, trailing zeros trimmed.
pub fn format_units(amount: &BigUint, decimals: u8, symbol: Option<&str>) -> String {
    let decimals = usize::from(decimals);
    let base = amount.to_str_radix(10);
    let formatted = if decimals == 0 {
        base
    } else {
        let padded = format!("{base:0>width$}", width = decimals + 1);
        let (whole, fraction) = padded.split_at(padded.len() - decimals);
        let fraction = fraction.trim_end_matches('0');
        if fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{fraction}")
        }
    };
    match symbol {
        Some(sym) => format!("{formatted} {sym}"),
        None => formatted,
    }
}
