//! Core type definitions for tirun
//!
//! This module contains the fundamental types used throughout the launcher:
//! the privilege whitelist, priority classes, and error types.

mod error;
mod priority;
mod privilege;

// Re-export all public types
pub use error::{last_error_code, LaunchError, LaunchResult, PathRejectReason};
pub use priority::PriorityClass;
pub use privilege::Privilege;

// Common type aliases
pub type ProcessId = u32;
