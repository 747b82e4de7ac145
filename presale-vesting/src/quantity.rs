//! Loose numeric inputs as they arrive from program state dumps.
//!
//! A field may be a JSON/TOML integer, a float that happens to be whole, a
//! decimal string, or a `0x` hex string (how big integers are usually
//! shipped). Everything is funnelled into [`BigUint`] or `i64`; negative,
//! non-finite and fractional inputs are rejected rather than clamped.
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::VestingError;

// Largest integer an f64 represents exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl Default for RawQuantity {
    fn default() -> Self { RawQuantity::Unsigned(0) }
}

impl From<u64> for RawQuantity {
    fn from(v: u64) -> Self { RawQuantity::Unsigned(v) }
}

impl From<&str> for RawQuantity {
    fn from(v: &str) -> Self { RawQuantity::Text(v.to_string()) }
}

impl RawQuantity {
    pub fn to_biguint(&self, field: &'static str) -> Result<BigUint, VestingError> {
        match self {
            RawQuantity::Unsigned(v) => Ok(BigUint::from(*v)),
            RawQuantity::Signed(v) if *v < 0 => {
                Err(VestingError::Negative { field, value: v.to_string() })
            }
            RawQuantity::Signed(v) => Ok(BigUint::from(v.unsigned_abs())),
            RawQuantity::Float(v) => float_to_biguint(*v, field),
            RawQuantity::Text(s) => parse_biguint(s, field),
        }
    }

    pub fn to_i64(&self, field: &'static str) -> Result<i64, VestingError> {
        let value = self.to_biguint(field)?;
        value.to_i64().ok_or_else(|| VestingError::OutOfRange {
            field,
            value: value.to_string(),
            max: i64::MAX.to_string(),
        })
    }
}

fn float_to_biguint(v: f64, field: &'static str) -> Result<BigUint, VestingError> {
    if !v.is_finite() {
        return Err(VestingError::NonFinite { field });
    }
    if v < 0.0 {
        return Err(VestingError::Negative { field, value: v.to_string() });
    }
    if v.fract() != 0.0 {
        return Err(VestingError::Fractional { field, value: v.to_string() });
    }
    if v > MAX_EXACT_FLOAT {
        // pass big values as strings instead
        return Err(VestingError::OutOfRange {
            field,
            value: v.to_string(),
            max: MAX_EXACT_FLOAT.to_string(),
        });
    }
    Ok(BigUint::from(v as u64))
}

/// Parse a decimal or `0x`-prefixed hex integer string.
pub fn parse_biguint(text: &str, field: &'static str) -> Result<BigUint, VestingError> {
    let s = text.trim();
    if matches!(s, "NaN" | "nan" | "inf" | "-inf" | "Infinity" | "-Infinity") {
        return Err(VestingError::NonFinite { field });
    }
    if s.starts_with('-') && s.len() > 1 {
        return Err(VestingError::Negative { field, value: s.to_string() });
    }
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (s.strip_prefix('+').unwrap_or(s), 10),
    };
    let invalid = || VestingError::InvalidNumber { field, value: text.to_string() };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    let value = BigUint::parse_bytes(digits.as_bytes(), radix).ok_or_else(invalid)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_integer_shape() {
        let expected = BigUint::from(300_000u32);
        for raw in [
            RawQuantity::Unsigned(300_000),
            RawQuantity::Signed(300_000),
            RawQuantity::Float(300_000.0),
            RawQuantity::Text("300000".into()),
            RawQuantity::Text("0x493e0".into()),
            RawQuantity::Text(" 300000 ".into()),
        ] {
            assert_eq!(raw.to_biguint("purchased").unwrap(), expected, "{raw:?}");
        }
    }

    #[test]
    fn big_strings_exceed_u64() {
        let raw = RawQuantity::Text("340282366920938463463374607431768211456".into());
        let v = raw.to_biguint("purchased").unwrap();
        assert_eq!(v, BigUint::from(u128::MAX) + 1u32);
    }

    #[test]
    fn rejects_negative_inputs() {
        assert!(matches!(
            RawQuantity::Signed(-1).to_biguint("claimed"),
            Err(VestingError::Negative { field: "claimed", .. })
        ));
        assert!(matches!(
            RawQuantity::Text("-5".into()).to_biguint("claimed"),
            Err(VestingError::Negative { .. })
        ));
        assert!(matches!(
            RawQuantity::Float(-0.5).to_biguint("claimed"),
            Err(VestingError::Negative { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_and_fractional() {
        assert_eq!(
            RawQuantity::Float(f64::NAN).to_biguint("purchased"),
            Err(VestingError::NonFinite { field: "purchased" })
        );
        assert_eq!(
            RawQuantity::Float(f64::INFINITY).to_biguint("purchased"),
            Err(VestingError::NonFinite { field: "purchased" })
        );
        assert_eq!(
            RawQuantity::Text("NaN".into()).to_biguint("purchased"),
            Err(VestingError::NonFinite { field: "purchased" })
        );
        assert!(matches!(
            RawQuantity::Float(1.5).to_biguint("purchased"),
            Err(VestingError::Fractional { .. })
        ));
        assert!(matches!(
            RawQuantity::Text("1.5".into()).to_biguint("purchased"),
            Err(VestingError::InvalidNumber { .. })
        ));
        assert!(matches!(
            RawQuantity::Text("".into()).to_biguint("purchased"),
            Err(VestingError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn imprecise_floats_are_refused() {
        assert!(matches!(
            RawQuantity::Float(1e20).to_biguint("purchased"),
            Err(VestingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn to_i64_range_checked() {
        assert_eq!(RawQuantity::Text("1700000000".into()).to_i64("end_ts").unwrap(), 1_700_000_000);
        assert!(matches!(
            RawQuantity::Unsigned(u64::MAX).to_i64("end_ts"),
            Err(VestingError::OutOfRange { .. })
        ));
    }

    #[test]
    fn deserializes_from_json_shapes() {
        let v: Vec<RawQuantity> = serde_json::from_str(r#"[5, -5, 5.0, "5"]"#).unwrap();
        assert_eq!(
            v,
            vec![
                RawQuantity::Unsigned(5),
                RawQuantity::Signed(-5),
                RawQuantity::Float(5.0),
                RawQuantity::Text("5".into()),
            ]
        );
    }
}
