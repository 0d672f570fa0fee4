//! Borrowing a system-owned security context
//!
//! Fallback used when the TCB privilege cannot be enabled directly: the
//! calling thread impersonates the token of a system-owned process and
//! retries the enable against the thread token.

use std::ptr;
use winapi::shared::minwindef::FALSE;
use winapi::um::processthreadsapi::{OpenProcess, OpenProcessToken};
use winapi::um::securitybaseapi::{ImpersonateLoggedOnUser, RevertToSelf};
use winapi::um::winnt::{
    HANDLE, PROCESS_QUERY_INFORMATION, TOKEN_DUPLICATE, TOKEN_IMPERSONATE, TOKEN_QUERY,
};

use crate::core::types::{LaunchError, LaunchResult};
use crate::process::enumerator::find_process_by_name;
use crate::windows::types::Handle;

/// The system-owned process whose token is borrowed
pub const SYSTEM_CONTEXT_PROCESS: &str = "winlogon.exe";

/// Active thread impersonation, reverted exactly once on drop.
///
/// The thread's security context is per-thread OS state; whoever holds
/// this guard must treat the window until drop as a critical section with
/// respect to that thread's identity.
pub struct ImpersonationGuard {
    active: bool,
}

impl ImpersonationGuard {
    /// Impersonate the token of the first matching system process.
    ///
    /// On any failure the thread is left in its original,
    /// non-impersonating state.
    pub fn acquire_system_context() -> LaunchResult<Self> {
        let target = match find_process_by_name(SYSTEM_CONTEXT_PROCESS) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                return Err(LaunchError::impersonation(
                    "locating the system logon process",
                ))
            }
            Err(_) => {
                return Err(LaunchError::impersonation("creating the process snapshot"))
            }
        };

        let process = unsafe { OpenProcess(PROCESS_QUERY_INFORMATION, FALSE, target.pid) };
        if process.is_null() {
            return Err(LaunchError::impersonation(
                "opening the system logon process",
            ));
        }
        let process = Handle::new(process);

        let mut token: HANDLE = ptr::null_mut();
        let ok = unsafe {
            OpenProcessToken(
                process.raw(),
                TOKEN_QUERY | TOKEN_DUPLICATE | TOKEN_IMPERSONATE,
                &mut token,
            )
        };
        if ok == FALSE {
            return Err(LaunchError::impersonation(
                "extracting the logon process token",
            ));
        }
        let token = Handle::new(token);

        if unsafe { ImpersonateLoggedOnUser(token.raw()) } == FALSE {
            return Err(LaunchError::impersonation(
                "impersonating the extracted token",
            ));
        }

        Ok(ImpersonationGuard { active: true })
    }

    /// Whether this guard still holds the impersonated context
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for ImpersonationGuard {
    fn drop(&mut self) {
        if self.active {
            unsafe {
                RevertToSelf();
            }
            self.active = false;
        }
    }
}
