//! Error types for slot-engine operations.
//!
//! Only malformed top-level request parameters are errors. Bad individual
//! events are dropped during normalization and never surface here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid search start date: {0} (expected YYYY-MM-DD)")]
    InvalidSearchStart(String),

    #[error("Invalid meeting duration: {0} minutes (must be at least 1)")]
    InvalidDuration(u32),

    #[error("Invalid business window: {start_hour}:00-{end_hour}:00 (need start < end <= 24)")]
    InvalidBusinessWindow { start_hour: u32, end_hour: u32 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid event bundle: {0}")]
    InvalidBundle(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
