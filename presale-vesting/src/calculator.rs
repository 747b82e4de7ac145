// File: presale-vesting/src/calculator.rs
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::{Position, PresaleSchedule, BPS_DENOMINATOR};

/// Where a position sits on the unlock curve at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VestingPhase {
    Refunded,
    /// Nothing was purchased.
    Empty,
    /// Zero vesting duration: everything unlocks at once.
    Immediate,
    /// Only the TGE share is unlocked.
    Cliff,
    Linear,
    Complete,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VestingBreakdown {
    pub phase: VestingPhase,
    #[serde(serialize_with = "decimal")]
    pub tge_unlocked: BigUint,
    #[serde(serialize_with = "decimal")]
    pub linear_unlocked: BigUint,
    #[serde(serialize_with = "decimal")]
    pub unlocked: BigUint,
    #[serde(serialize_with = "decimal")]
    pub claimed: BigUint,
    #[serde(serialize_with = "decimal")]
    pub claimable: BigUint,
    /// When linear accrual starts, while it has not yet started.
    pub next_unlock_ts: Option<i128>,
}

fn decimal<S: Serializer>(v: &BigUint, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(v)
}

/// TGE share of `purchased`, truncated.
pub fn tge_unlocked(schedule: &PresaleSchedule, purchased: &BigUint) -> BigUint {
    purchased * u32::from(schedule.tge_bps()) / BPS_DENOMINATOR
}

/// Full breakdown of what has unlocked for `position` at `now`.
pub fn breakdown(schedule: &PresaleSchedule, position: &Position, now: i64) -> VestingBreakdown {
    let zero = BigUint::zero();
    let empty = |phase| VestingBreakdown {
        phase,
        tge_unlocked: zero.clone(),
        linear_unlocked: zero.clone(),
        unlocked: zero.clone(),
        claimed: position.claimed.clone(),
        claimable: zero.clone(),
        next_unlock_ts: None,
    };
    if position.refunded {
        return empty(VestingPhase::Refunded);
    }
    let purchased = &position.purchased;
    if purchased.is_zero() {
        return empty(VestingPhase::Empty);
    }

    let tge = tge_unlocked(schedule, purchased);
    let vesting = schedule.vesting_seconds();
    let start = schedule.vesting_start();

    let (phase, linear, next_unlock_ts) = if vesting == 0 {
        (VestingPhase::Immediate, purchased - &tge, None)
    } else if i128::from(now) <= start {
        (VestingPhase::Cliff, BigUint::zero(), Some(start))
    } else {
        let elapsed = (i128::from(now) - start).min(i128::from(vesting));
        let remaining = purchased - &tge;
        // 0 < elapsed <= vesting <= i64::MAX
        let linear = remaining * elapsed as u64 / vesting as u64;
        let phase = if elapsed == i128::from(vesting) {
            VestingPhase::Complete
        } else {
            VestingPhase::Linear
        };
        (phase, linear, None)
    };

    let unlocked = &tge + &linear;
    let claimable = if unlocked > position.claimed {
        &unlocked - &position.claimed
    } else {
        BigUint::zero()
    };
    trace!(?phase, %unlocked, %claimable, now, "evaluated vesting");

    VestingBreakdown {
        phase,
        tge_unlocked: tge,
        linear_unlocked: linear,
        unlocked,
        claimed: position.claimed.clone(),
        claimable,
        next_unlock_ts,
    }
}

/// Amount unlocked so far, before subtracting what was already claimed.
pub fn unlocked(schedule: &PresaleSchedule, position: &Position, now: i64) -> BigUint {
    breakdown(schedule, position, now).unlocked
}

/// Amount the position may claim at `now`; never negative.
pub fn claimable(schedule: &PresaleSchedule, position: &Position, now: i64) -> BigUint {
    breakdown(schedule, position, now).claimable
}
