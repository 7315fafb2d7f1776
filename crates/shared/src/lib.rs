//! Shared types, errors, and configuration for Lodgebook.
//!
//! This crate provides common types used across all other crates:
//! - Two-currency amounts with decimal precision
//! - Typed IDs for bookings, expenses and properties
//! - Lenient deserializers for hand-edited backend rows
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ReportingConfig, ServerConfig};
pub use error::{AppError, AppResult};
