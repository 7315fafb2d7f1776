//! Expense categories and how they map onto income statement lines.

pub mod catalog;
pub mod lines;

pub use catalog::{Classification, ExpenseCategory, classify};
pub use lines::{CostLine, UtilityKeywords, UtilityLine, matches_category_keyword, matches_keyword};
