use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VestingError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: String },

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },

    #[error("{field} must be a whole number (got {value})")]
    Fractional { field: &'static str, value: String },

    #[error("{field} is not a valid integer: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} = {value} exceeds the maximum of {max}")]
    OutOfRange { field: &'static str, value: String, max: String },

    #[error("invalid token amount {0:?}")]
    InvalidAmount(String),
}
