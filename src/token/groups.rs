//! Token group-list capture and rewriting

use std::mem;
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::securitybaseapi::GetTokenInformation;
use winapi::um::winnt::{TokenGroups, SE_GROUP_ENABLED, SE_GROUP_OWNER, TOKEN_GROUPS};

use crate::core::types::{LaunchError, LaunchResult};
use crate::windows::types::{Handle, Sid};

/// Sanity ceiling for the reported group-list size. A well-formed token
/// carries at most a few kilobytes of groups; anything larger is treated
/// as a malformed response.
const MAX_GROUP_BUFFER: usize = 0x1_0000;

/// Owned copy of a token's group list, rewritten before the exchange call
/// consumes it.
pub struct TokenGroupSet {
    buffer: Vec<u8>,
}

impl TokenGroupSet {
    /// Capture the group list of `token` with the two-call size pattern.
    ///
    /// The reported size is bounds-checked before allocation: it must
    /// cover at least one group-list header and stay below the ceiling.
    pub fn capture(token: &Handle) -> LaunchResult<Self> {
        let mut size: DWORD = 0;
        unsafe {
            GetTokenInformation(token.raw(), TokenGroups, ptr::null_mut(), 0, &mut size);
        }

        let needed = size as usize;
        if needed < mem::size_of::<TOKEN_GROUPS>() || needed > MAX_GROUP_BUFFER {
            return Err(LaunchError::composition("sizing the token group list"));
        }

        let mut buffer = vec![0u8; needed];
        let ok = unsafe {
            GetTokenInformation(
                token.raw(),
                TokenGroups,
                buffer.as_mut_ptr().cast(),
                size,
                &mut size,
            )
        };
        if ok == FALSE {
            return Err(LaunchError::composition("fetching the token group list"));
        }

        Ok(TokenGroupSet { buffer })
    }

    /// Number of group entries in the captured list
    pub fn group_count(&self) -> u32 {
        unsafe { (*(self.buffer.as_ptr() as *const TOKEN_GROUPS)).GroupCount }
    }

    /// Overwrite the last group entry with `sid`, marked OWNER|ENABLED.
    ///
    /// The last slot is the fixed placement; the exchange call is
    /// sensitive to which entries carry the OWNER attribute. The stamped
    /// SID pointer must stay alive until the exchange consumes the list.
    pub fn stamp_owner(&mut self, sid: &Sid) -> LaunchResult<()> {
        unsafe {
            let groups = self.buffer.as_mut_ptr() as *mut TOKEN_GROUPS;
            let count = (*groups).GroupCount as usize;
            if count == 0 {
                return Err(LaunchError::composition("rewriting the token group list"));
            }
            let last = (*groups).Groups.as_mut_ptr().add(count - 1);
            (*last).Sid = sid.raw();
            (*last).Attributes = SE_GROUP_OWNER | SE_GROUP_ENABLED;
        }
        Ok(())
    }

    /// Raw pointer handed to the exchange call
    pub(crate) fn as_mut_ptr(&mut self) -> *mut TOKEN_GROUPS {
        self.buffer.as_mut_ptr().cast()
    }
}
