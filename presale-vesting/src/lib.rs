// File: presale-vesting/src/lib.rs
//! Claimable-amount calculator for presale positions.
//!
//! A position unlocks a TGE share (basis points of the purchase) once the
//! sale ends, waits out a cliff, then releases the remainder linearly over
//! the vesting window. All arithmetic is truncating big-integer arithmetic so
//! results match the program to the last base unit. The caller supplies
//! `now`; nothing here reads a clock.
mod calculator;
mod error;
mod quantity;
mod schedule;
mod units;

pub use calculator::{breakdown, claimable, tge_unlocked, unlocked, VestingBreakdown, VestingPhase};
pub use error::VestingError;
pub use quantity::{parse_biguint, RawQuantity};
pub use schedule::{Position, PresaleSchedule, RawPosition, RawSchedule};
pub use units::{format_units, parse_units};

pub use num_bigint::BigUint;

/// Basis points in one whole.
pub const BPS_DENOMINATOR: u32 = 10_000;
