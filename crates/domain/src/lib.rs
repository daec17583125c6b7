//! Domain layer for the screen time bridge.
//!
//! This crate contains:
//! - Domain models (TimeRange, RawUsageRecord, UsageSummary, AppOpsMode)
//! - Platform collaborator traits and a mock platform for tests
//! - The usage reporter and permission gate services
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::UsageError;
