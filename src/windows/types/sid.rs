//! Owned binary SID converted from string form

use std::ptr;
use winapi::shared::minwindef::FALSE;
use winapi::um::sddl::ConvertStringSidToSidW;
use winapi::um::winbase::LocalFree;
use winapi::um::winnt::PSID;

use crate::core::types::{LaunchError, LaunchResult};
use crate::windows::utils::string_conv::string_to_wide;

/// Binary SID allocated by the conversion call, freed on drop
pub struct Sid {
    sid: PSID,
}

impl Sid {
    /// Convert a string-form SID into its binary form
    pub fn from_string(value: &str) -> LaunchResult<Self> {
        let wide = string_to_wide(value);
        let mut sid: PSID = ptr::null_mut();
        let ok = unsafe { ConvertStringSidToSidW(wide.as_ptr(), &mut sid) };
        if ok == FALSE || sid.is_null() {
            return Err(LaunchError::composition("converting the identity SID"));
        }
        Ok(Sid { sid })
    }

    /// Get the raw SID pointer
    ///
    /// The pointer stays valid for the lifetime of this value only.
    pub fn raw(&self) -> PSID {
        self.sid
    }
}

impl Drop for Sid {
    fn drop(&mut self) {
        if !self.sid.is_null() {
            // The conversion call allocates with LocalAlloc
            unsafe {
                LocalFree(self.sid.cast());
            }
        }
    }
}
