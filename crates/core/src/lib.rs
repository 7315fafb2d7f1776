//! Core business logic for Lodgebook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Records arrive already fetched; nothing here performs I/O.
//!
//! # Modules
//!
//! - `records` - Bookings, expenses, properties and property filtering
//! - `category` - Expense category catalog and cost-line routing
//! - `fiscal` - Report period generation
//! - `reports` - Income statement aggregation, comparison and year-to-date

pub mod category;
pub mod fiscal;
pub mod records;
pub mod reports;
