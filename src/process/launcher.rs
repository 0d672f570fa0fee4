//! Process creation under a composed token

use std::mem;
use std::ptr;
use tracing::debug;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::processthreadsapi::{PROCESS_INFORMATION, STARTUPINFOW};
use winapi::um::winbase::{CreateProcessWithTokenW, CREATE_NEW_CONSOLE};

use crate::core::types::{LaunchError, LaunchResult, PriorityClass, Privilege};
use crate::token::compose::{acquire_elevated_token, AcquiredToken};
use crate::token::privileges::enable_privilege;
use crate::validate::ValidatedPath;
use crate::windows::bindings::DynamicApi;
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::string_to_wide;

/// The interactive window station and desktop the target starts on
const DEFAULT_DESKTOP: &str = "winsta0\\default";

/// Validate privileges, acquire a TrustedInstaller token and start the
/// target under it.
///
/// SeImpersonatePrivilege must be enabled before a token is worth
/// acquiring; failing that aborts without touching the token machinery.
pub fn launch(api: &DynamicApi, path: &ValidatedPath, priority: PriorityClass) -> LaunchResult<()> {
    if !enable_privilege(api, Privilege::Impersonate, false) {
        return Err(LaunchError::PrivilegeDenied(Privilege::Impersonate.name()));
    }

    let token = acquire_elevated_token(api)?;
    spawn(token, path, priority)
}

/// Start `path` under `token` with the given priority class.
///
/// Consumes the token; it is closed when this returns, in the success and
/// the failure branch alike. The new process runs detached: its process
/// and thread handles are released immediately.
pub fn spawn(token: AcquiredToken, path: &ValidatedPath, priority: PriorityClass) -> LaunchResult<()> {
    let mut desktop = string_to_wide(DEFAULT_DESKTOP);
    let mut command = path.to_wide()?;

    let mut startup: STARTUPINFOW = unsafe { mem::zeroed() };
    startup.cb = mem::size_of::<STARTUPINFOW>() as DWORD;
    startup.lpDesktop = desktop.as_mut_ptr();

    let mut process_info: PROCESS_INFORMATION = unsafe { mem::zeroed() };
    let creation_flags = priority.creation_flag() | CREATE_NEW_CONSOLE;

    let ok = unsafe {
        CreateProcessWithTokenW(
            token.raw(),
            0,
            ptr::null(),
            command.as_mut_ptr(),
            creation_flags,
            ptr::null_mut(),
            ptr::null(),
            &mut startup,
            &mut process_info,
        )
    };

    if ok == FALSE {
        return Err(LaunchError::launch_failed());
        // token drops here; the handle never outlives the attempt
    }

    debug!(
        "process {} created, releasing its handles",
        process_info.dwProcessId
    );
    drop(Handle::new(process_info.hProcess));
    drop(Handle::new(process_info.hThread));

    Ok(())
    // token drops here as well
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    #[test]
    fn test_launch_with_unresolved_api_fails_before_acquisition() {
        // SeImpersonatePrivilege cannot be enabled without the adjustment
        // binding, so the failure must name it and nothing else runs.
        let api = DynamicApi::unresolved();
        let path = match validate("C:\\Windows\\System32\\cmd.exe") {
            Ok(path) => path,
            Err(_) => return, // environment without cmd.exe
        };
        let result = launch(&api, &path, PriorityClass::Normal);
        match result {
            Err(LaunchError::PrivilegeDenied(name)) => {
                assert_eq!(name, "SeImpersonatePrivilege");
            }
            other => panic!("expected PrivilegeDenied, got {:?}", other),
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_spawn_with_null_token_fails_and_consumes_token() {
        let path = match validate("C:\\Windows\\System32\\cmd.exe") {
            Ok(path) => path,
            Err(_) => return,
        };
        let token = AcquiredToken::new(ptr::null_mut());
        let result = spawn(token, &path, PriorityClass::Normal);
        // The token was moved in and dropped; the call itself must fail
        assert!(matches!(result, Err(LaunchError::LaunchFailed { .. })));
    }

    #[test]
    fn test_default_desktop_constant() {
        assert_eq!(DEFAULT_DESKTOP, "winsta0\\default");
    }
}
