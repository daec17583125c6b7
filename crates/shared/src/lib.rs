//! Shared utilities and common types for the screen time bridge.
//!
//! This crate provides common functionality used across all other crates:
//! - Duration breakdown of foreground time into hours, minutes and seconds
//! - Millisecond timestamp helpers for host-supplied numbers and day windows

pub mod duration;
pub mod time;
