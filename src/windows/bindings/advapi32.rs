//! Advapi32.dll bindings resolved at runtime
//!
//! `LogonUserExExW` is exported but not declared in the SDK headers, so it
//! is resolved out of the loaded image instead of being linked statically.

use std::mem;
use winapi::shared::basetsd::INT_PTR;
use winapi::shared::minwindef::{BOOL, DWORD, LPDWORD, LPVOID};
use winapi::um::libloaderapi::{GetModuleHandleW, GetProcAddress};
use winapi::um::winnt::{LPWSTR, PHANDLE, PSID, PTOKEN_GROUPS, PQUOTA_LIMITS};

use crate::windows::utils::string_conv::string_to_wide;

/// Signature of `advapi32!LogonUserExExW`
///
/// The undocumented variant of `LogonUserExW` that accepts an additional
/// group list merged into the produced token.
pub type LogonUserExExWFn = unsafe extern "system" fn(
    LPWSTR,         // user name
    LPWSTR,         // domain
    LPWSTR,         // password
    DWORD,          // logon type
    DWORD,          // logon provider
    PTOKEN_GROUPS,  // additional token groups
    PHANDLE,        // out: token
    *mut PSID,      // out: logon SID
    *mut LPVOID,    // out: profile buffer
    LPDWORD,        // out: profile length
    PQUOTA_LIMITS,  // out: quota limits
) -> BOOL;

/// Resolve `LogonUserExExW` out of the already-loaded advapi32 image
pub fn resolve_logon_user_ex_ex() -> Option<LogonUserExExWFn> {
    unsafe {
        let module = GetModuleHandleW(string_to_wide("advapi32.dll").as_ptr());
        if module.is_null() {
            return None;
        }
        let entry = GetProcAddress(module, b"LogonUserExExW\0".as_ptr().cast())?;
        Some(mem::transmute::<
            unsafe extern "system" fn() -> INT_PTR,
            LogonUserExExWFn,
        >(entry))
    }
}
