//! NTDLL.dll bindings for low-level privilege adjustment

use std::mem;
use winapi::shared::basetsd::INT_PTR;
use winapi::shared::ntdef::{BOOLEAN, NTSTATUS};
use winapi::um::libloaderapi::{GetModuleHandleW, GetProcAddress};

use crate::windows::utils::string_conv::string_to_wide;

// NT Status codes
pub const STATUS_SUCCESS: NTSTATUS = 0x00000000;
pub const STATUS_ACCESS_DENIED: NTSTATUS = 0xC0000022_u32 as i32;
pub const STATUS_NO_SUCH_PRIVILEGE: NTSTATUS = 0xC0000060_u32 as i32;
pub const STATUS_PRIVILEGE_NOT_HELD: NTSTATUS = 0xC0000061_u32 as i32;

/// Signature of `ntdll!RtlAdjustPrivilege`
///
/// Arguments: privilege value, enable, adjust the current thread's
/// impersonation token instead of the process token, previous state out.
pub type RtlAdjustPrivilegeFn =
    unsafe extern "system" fn(u32, BOOLEAN, BOOLEAN, *mut BOOLEAN) -> NTSTATUS;

/// Check if NTSTATUS indicates success
pub fn nt_success(status: NTSTATUS) -> bool {
    status >= 0
}

/// Resolve `RtlAdjustPrivilege` out of the already-loaded ntdll image
pub fn resolve_rtl_adjust_privilege() -> Option<RtlAdjustPrivilegeFn> {
    unsafe {
        let module = GetModuleHandleW(string_to_wide("ntdll.dll").as_ptr());
        if module.is_null() {
            return None;
        }
        let entry = GetProcAddress(module, b"RtlAdjustPrivilege\0".as_ptr().cast())?;
        Some(mem::transmute::<
            unsafe extern "system" fn() -> INT_PTR,
            RtlAdjustPrivilegeFn,
        >(entry))
    }
}
