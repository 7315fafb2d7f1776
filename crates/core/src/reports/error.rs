//! Report error types.

use chrono::NaiveDate;
use lodgebook_shared::AppError;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The requested year has no calendar representation.
    #[error("Invalid report year: {0}")]
    InvalidYear(i32),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// A running total exceeded the decimal range.
    #[error("Amount overflow while aggregating report figures")]
    AmountOverflow,
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::InvalidYear(_) | ReportError::InvalidDateRange { .. } => {
                Self::InvalidRequest(err.to_string())
            }
            ReportError::AmountOverflow => Self::Unreportable(err.to_string()),
        }
    }
}
