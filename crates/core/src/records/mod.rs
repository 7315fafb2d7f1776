//! Booking, expense and property records as fetched from the backend.
//!
//! The engine only reads these; it never creates or mutates them.

pub mod filter;
pub mod types;

pub use filter::PropertyFilter;
pub use types::{Booking, Expense, Property};
