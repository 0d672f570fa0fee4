//! Integration tests for token acquisition and cleanup

use std::ptr;
use winapi::shared::minwindef::FALSE;
use winapi::um::processthreadsapi::{GetCurrentThread, OpenThreadToken};
use winapi::um::winnt::{HANDLE, TOKEN_QUERY};

use tirun::token::{acquire_elevated_token, open_current_token, TokenGroupSet};
use tirun::windows::types::{Handle, Sid};
use tirun::windows::ErrorCode;
use tirun::{DynamicApi, LaunchError, TRUSTED_INSTALLER_SID};

/// Impersonation query: a clean thread holds no token
fn thread_is_impersonating() -> bool {
    let mut token: HANDLE = ptr::null_mut();
    let ok = unsafe { OpenThreadToken(GetCurrentThread(), TOKEN_QUERY, FALSE, &mut token) };
    if ok != FALSE {
        drop(Handle::new(token));
        return true;
    }
    false
}

#[test]
fn test_acquisition_without_bindings_is_privilege_denied() {
    let api = DynamicApi::unresolved();
    let result = acquire_elevated_token(&api);
    assert!(matches!(result, Err(LaunchError::PrivilegeDenied(_))));
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_thread_is_clean_after_acquisition_regardless_of_outcome() {
    let api = DynamicApi::resolve();

    let result = acquire_elevated_token(&api);
    let succeeded = result.is_ok();
    drop(result);

    // Whether the ladder climbed or collapsed, the thread must not be
    // left impersonating
    let mut token: HANDLE = ptr::null_mut();
    let ok = unsafe { OpenThreadToken(GetCurrentThread(), TOKEN_QUERY, FALSE, &mut token) };
    assert_eq!(ok, FALSE, "acquisition left the thread impersonating");
    assert_eq!(ErrorCode::last_error(), ErrorCode::NoToken);

    let _ = succeeded;
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_repeated_acquisition_is_stable() {
    let api = DynamicApi::resolve();

    for _ in 0..3 {
        let result = acquire_elevated_token(&api);
        drop(result);
        assert!(!thread_is_impersonating());
    }
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_trusted_installer_sid_converts_to_binary() {
    let sid = Sid::from_string(TRUSTED_INSTALLER_SID);
    assert!(sid.is_ok());
    assert!(!sid.unwrap().raw().is_null());
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_group_capture_and_rewrite_on_current_token() {
    let token = open_current_token(false).unwrap();
    let mut groups = TokenGroupSet::capture(&token).unwrap();
    assert!(groups.group_count() >= 1);

    let sid = Sid::from_string(TRUSTED_INSTALLER_SID).unwrap();
    groups.stamp_owner(&sid).unwrap();
    assert!(groups.group_count() >= 1);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_thread_token_open_requires_impersonation() {
    let result = open_current_token(true);
    assert!(result.is_err());
}
