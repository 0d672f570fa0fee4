//! Windows API bindings
//!
//! Dynamically resolved entry points to system libraries. The resolved
//! addresses are collected into an immutable [`DynamicApi`] capability set
//! populated once at program start; a missing entry is a first-class
//! failure at the call site, never a null-pointer hazard.

pub mod advapi32;
pub mod ntdll;

pub use advapi32::LogonUserExExWFn;
pub use ntdll::{nt_success, RtlAdjustPrivilegeFn};

/// The dynamically resolved entry points the launcher depends on
#[derive(Clone, Copy)]
pub struct DynamicApi {
    rtl_adjust_privilege: Option<RtlAdjustPrivilegeFn>,
    logon_user_ex_ex: Option<LogonUserExExWFn>,
}

impl DynamicApi {
    /// Resolve every entry point out of the already-loaded system images
    pub fn resolve() -> Self {
        DynamicApi {
            rtl_adjust_privilege: ntdll::resolve_rtl_adjust_privilege(),
            logon_user_ex_ex: advapi32::resolve_logon_user_ex_ex(),
        }
    }

    /// A capability set with nothing resolved, for failure-path tests
    pub fn unresolved() -> Self {
        DynamicApi {
            rtl_adjust_privilege: None,
            logon_user_ex_ex: None,
        }
    }

    /// The privilege-adjustment entry point, if it resolved
    pub fn rtl_adjust_privilege(&self) -> Option<RtlAdjustPrivilegeFn> {
        self.rtl_adjust_privilege
    }

    /// The extended logon entry point, if it resolved
    pub fn logon_user_ex_ex(&self) -> Option<LogonUserExExWFn> {
        self.logon_user_ex_ex
    }
}
