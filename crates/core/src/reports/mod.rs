//! Income statement generation.
//!
//! This module turns bookings and expenses into a period-bucketed income
//! statement:
//! - KPIs (nights booked, average nightly price, occupancy)
//! - Revenue, fixed costs and gross profit
//! - Operational costs by line, reconciled against total expenses
//! - Net income, prior-year comparison and year-to-date summary

mod aggregate;
mod comparison;
pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::IncomeStatementService;
pub use types::*;
