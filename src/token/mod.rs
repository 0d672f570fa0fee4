//! Token acquisition for the TrustedInstaller identity
//!
//! This module provides the privilege ladder, the impersonation fallback,
//! the group-list rewriting and the logon exchange that together yield a
//! token bearing the TrustedInstaller identity.

pub mod compose;
pub mod elevation;
pub mod groups;
pub mod impersonate;
pub mod privileges;

pub use compose::{acquire_elevated_token, open_current_token, AcquiredToken, TRUSTED_INSTALLER_SID};
pub use elevation::is_elevated;
pub use groups::TokenGroupSet;
pub use impersonate::{ImpersonationGuard, SYSTEM_CONTEXT_PROCESS};
pub use privileges::{enable_privilege, enable_privilege_value};
