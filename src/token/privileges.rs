//! Privilege enablement through the NT adjustment call

use winapi::shared::ntdef::BOOLEAN;

use crate::core::types::Privilege;
use crate::windows::bindings::{nt_success, DynamicApi};

/// Enable a whitelisted privilege on the process or the calling thread.
///
/// `on_thread` targets the thread's impersonation token instead of the
/// process token; it is only meaningful while impersonating. Returns
/// whether the underlying status indicates success. A missing adjustment
/// binding is failure, never a crash.
pub fn enable_privilege(api: &DynamicApi, privilege: Privilege, on_thread: bool) -> bool {
    let adjust = match api.rtl_adjust_privilege() {
        Some(entry) => entry,
        None => return false,
    };

    let mut previous: BOOLEAN = 0;
    let status = unsafe { adjust(privilege.value(), 1, on_thread as BOOLEAN, &mut previous) };
    nt_success(status)
}

/// Raw-value entry point: values outside the whitelist never reach the OS
pub fn enable_privilege_value(api: &DynamicApi, value: u32, on_thread: bool) -> bool {
    match Privilege::from_value(value) {
        Some(privilege) => enable_privilege(api, privilege, on_thread),
        None => false,
    }
}
