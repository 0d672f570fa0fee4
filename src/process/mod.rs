//! Process enumeration and creation
//!
//! This module provides the ToolHelp snapshot enumerator used by the
//! impersonation fallback and the launcher that starts the target under
//! a composed token.

pub mod enumerator;
pub mod launcher;

pub use enumerator::{find_process_by_name, ProcessEntry, ProcessEnumerator};
pub use launcher::{launch, spawn};
