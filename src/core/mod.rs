//! Core module containing fundamental types for tirun
//!
//! This module provides the foundational building blocks used throughout
//! the launcher: privilege and priority identifiers and error types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{LaunchError, LaunchResult, PathRejectReason, PriorityClass, Privilege};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

// Platform verification at compile time
#[cfg(not(target_os = "windows"))]
compile_error!("tirun only supports the Windows platform");
