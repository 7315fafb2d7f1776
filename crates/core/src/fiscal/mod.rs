//! Reporting period generation.

pub mod period;

pub use period::{PeriodGenerator, PeriodType, ReportPeriod};
