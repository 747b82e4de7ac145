use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::quantity::RawQuantity;
use crate::{VestingError, BPS_DENOMINATOR};

/// Unlock parameters of a presale, as stored by the program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PresaleSchedule {
    tge_bps: u16,
    cliff_seconds: i64,
    vesting_seconds: i64,
    end_ts: i64,
}

impl PresaleSchedule {
    pub fn new(
        tge_bps: u16,
        cliff_seconds: i64,
        vesting_seconds: i64,
        end_ts: i64,
    ) -> Result<Self, VestingError> {
        if u32::from(tge_bps) > BPS_DENOMINATOR {
            return Err(VestingError::OutOfRange {
                field: "tge_bps",
                value: tge_bps.to_string(),
                max: BPS_DENOMINATOR.to_string(),
            });
        }
        for (field, value) in [
            ("cliff_seconds", cliff_seconds),
            ("vesting_seconds", vesting_seconds),
            ("end_ts", end_ts),
        ] {
            if value < 0 {
                return Err(VestingError::Negative { field, value: value.to_string() });
            }
        }
        Ok(Self { tge_bps, cliff_seconds, vesting_seconds, end_ts })
    }

    pub fn tge_bps(&self) -> u16 { self.tge_bps }
    pub fn cliff_seconds(&self) -> i64 { self.cliff_seconds }
    pub fn vesting_seconds(&self) -> i64 { self.vesting_seconds }
    pub fn end_ts(&self) -> i64 { self.end_ts }

    /// First instant after which linear vesting accrues (`end_ts + cliff`).
    pub fn vesting_start(&self) -> i128 {
        i128::from(self.end_ts) + i128::from(self.cliff_seconds)
    }
}

/// A buyer's purchased and claimed totals in base token units.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub purchased: BigUint,
    pub claimed: BigUint,
    pub refunded: bool,
}

impl Position {
    pub fn new(purchased: impl Into<BigUint>, claimed: impl Into<BigUint>) -> Self {
        Self { purchased: purchased.into(), claimed: claimed.into(), refunded: false }
    }

    pub fn refunded(mut self) -> Self {
        self.refunded = true;
        self
    }
}

/// Schedule fields as found in a state dump, before validation.
///
/// Accepts both the program's snake_case and the client's camelCase names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSchedule {
    #[serde(alias = "tgeBps", default)]
    pub tge_bps: RawQuantity,
    #[serde(alias = "cliffSeconds", default)]
    pub cliff_seconds: RawQuantity,
    #[serde(alias = "vestingSeconds", default)]
    pub vesting_seconds: RawQuantity,
    #[serde(alias = "endTs")]
    pub end_ts: RawQuantity,
}

impl TryFrom<&RawSchedule> for PresaleSchedule {
    type Error = VestingError;

    fn try_from(raw: &RawSchedule) -> Result<Self, Self::Error> {
        let bps = raw.tge_bps.to_biguint("tge_bps")?;
        let tge_bps = u16::try_from(&bps).map_err(|_| VestingError::OutOfRange {
            field: "tge_bps",
            value: bps.to_string(),
            max: BPS_DENOMINATOR.to_string(),
        })?;
        PresaleSchedule::new(
            tge_bps,
            raw.cliff_seconds.to_i64("cliff_seconds")?,
            raw.vesting_seconds.to_i64("vesting_seconds")?,
            raw.end_ts.to_i64("end_ts")?,
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub purchased: RawQuantity,
    #[serde(default)]
    pub claimed: RawQuantity,
    #[serde(default)]
    pub refunded: bool,
}

impl TryFrom<&RawPosition> for Position {
    type Error = VestingError;

    fn try_from(raw: &RawPosition) -> Result<Self, Self::Error> {
        Ok(Position {
            purchased: raw.purchased.to_biguint("purchased")?,
            claimed: raw.claimed.to_biguint("claimed")?,
            refunded: raw.refunded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_validation() {
        assert!(PresaleSchedule::new(10_000, 0, 0, 0).is_ok());
        assert!(matches!(
            PresaleSchedule::new(10_001, 0, 0, 0),
            Err(VestingError::OutOfRange { field: "tge_bps", .. })
        ));
        assert!(matches!(
            PresaleSchedule::new(0, -1, 0, 0),
            Err(VestingError::Negative { field: "cliff_seconds", .. })
        ));
        assert!(matches!(
            PresaleSchedule::new(0, 0, -1, 0),
            Err(VestingError::Negative { field: "vesting_seconds", .. })
        ));
    }

    #[test]
    fn raw_schedule_accepts_camel_case_and_strings() {
        let raw: RawSchedule = serde_json::from_str(
            r#"{"tgeBps": 2000, "cliffSeconds": "2", "vestingSeconds": "0x6", "endTs": 1700000000}"#,
        )
        .unwrap();
        let s = PresaleSchedule::try_from(&raw).unwrap();
        assert_eq!(s, PresaleSchedule::new(2000, 2, 6, 1_700_000_000).unwrap());
    }

    #[test]
    fn raw_schedule_from_toml() {
        let raw: RawSchedule =
            toml::from_str("tge_bps = 1500\ncliff_seconds = 60\nvesting_seconds = 600\nend_ts = 10\n")
                .unwrap();
        assert_eq!(PresaleSchedule::try_from(&raw).unwrap().tge_bps(), 1500);
    }

    #[test]
    fn raw_schedule_rejects_oversized_bps() {
        let raw: RawSchedule =
            serde_json::from_str(r#"{"tge_bps": 70000, "end_ts": 0}"#).unwrap();
        assert!(matches!(
            PresaleSchedule::try_from(&raw),
            Err(VestingError::OutOfRange { field: "tge_bps", .. })
        ));
    }

    #[test]
    fn raw_position_rejects_negative_claim() {
        let raw: RawPosition =
            serde_json::from_str(r#"{"purchased": "100", "claimed": -3}"#).unwrap();
        assert!(matches!(
            Position::try_from(&raw),
            Err(VestingError::Negative { field: "claimed", .. })
        ));
    }

    #[test]
    fn raw_position_defaults() {
        let raw: RawPosition = serde_json::from_str(r#"{"purchased": 42}"#).unwrap();
        let p = Position::try_from(&raw).unwrap();
        assert_eq!(p, Position::new(42u32, 0u32));
    }
}
