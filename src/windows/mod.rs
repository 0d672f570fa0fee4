//! Windows API layer for token and process plumbing
//!
//! Provides the dynamically resolved entry points plus owned wrappers
//! around handles and SIDs. All unsafe FFI calls sit behind small safe
//! surfaces with explicit error handling.

pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use bindings::{nt_success, DynamicApi};
pub use types::{Handle, Sid};
pub use utils::{string_to_wide, wide_to_string, ErrorCode};
