//! tirun library for launching executables under the TrustedInstaller identity
//!
//! The pipeline is a chain of hard gates: validate the operator-supplied
//! path, enable the required privileges (with an impersonation fallback),
//! compose a token bearing the TrustedInstaller identity, and start the
//! target under it. A failure at any gate aborts the chain; every acquired
//! OS resource is released on every exit path.

#![allow(dead_code)]

pub mod core;
pub mod process;
pub mod token;
pub mod validate;
pub mod windows;

// Re-export main types from the core module
pub use crate::core::types::{
    LaunchError, LaunchResult, PathRejectReason, PriorityClass, Privilege, ProcessId,
};

// Re-export the pipeline entry points
pub use crate::process::launcher::{launch, spawn};
pub use crate::token::compose::{acquire_elevated_token, AcquiredToken, TRUSTED_INSTALLER_SID};
pub use crate::token::elevation::is_elevated;
pub use crate::validate::{sanitize, validate, ValidatedPath};
pub use crate::windows::bindings::DynamicApi;
