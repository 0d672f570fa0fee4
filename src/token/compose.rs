//! TrustedInstaller token acquisition
//!
//! The central algorithm: enable a sufficient privilege (falling back to
//! an impersonated system context), capture the current token's group
//! list, stamp the TrustedInstaller SID into its last slot with the OWNER
//! attribute, and exchange the rewritten list through a service logon for
//! a token bearing the TrustedInstaller identity.

use std::ptr;
use tracing::debug;
use winapi::shared::minwindef::FALSE;
use winapi::um::processthreadsapi::{
    GetCurrentProcess, GetCurrentThread, OpenProcessToken, OpenThreadToken,
};
use winapi::um::winbase::{LOGON32_LOGON_SERVICE, LOGON32_PROVIDER_WINNT50};
use winapi::um::winnt::{HANDLE, TOKEN_QUERY};

use crate::core::types::{LaunchError, LaunchResult, Privilege};
use crate::token::groups::TokenGroupSet;
use crate::token::impersonate::ImpersonationGuard;
use crate::token::privileges::enable_privilege;
use crate::windows::bindings::DynamicApi;
use crate::windows::types::{Handle, Sid};
use crate::windows::utils::string_conv::string_to_wide;

/// Well-known SID of the TrustedInstaller service identity.
///
/// The exchange call grants the identity because this exact SID is
/// stamped into the group list; it is never parameterized.
pub const TRUSTED_INSTALLER_SID: &str =
    "S-1-5-80-956008885-3418522649-1831038044-1853292631-2271478464";

const LOGON_ACCOUNT: &str = "SYSTEM";
const LOGON_DOMAIN: &str = "NT AUTHORITY";

/// Primary token carrying the TrustedInstaller identity.
///
/// Exclusively owned by one launch attempt and closed exactly once on
/// drop, whether or not the launch succeeded.
pub struct AcquiredToken {
    handle: Handle,
}

impl AcquiredToken {
    pub(crate) fn new(handle: HANDLE) -> Self {
        AcquiredToken {
            handle: Handle::new(handle),
        }
    }

    /// Raw token handle for the process-creation call
    pub fn raw(&self) -> HANDLE {
        self.handle.raw()
    }
}

/// Acquire a token bearing the TrustedInstaller identity.
///
/// Privilege ladder: TCB on the process directly; otherwise Debug on the
/// process, then a borrowed system context, then TCB against the thread
/// token. Any rung failing aborts the attempt. Whatever the outcome, the
/// calling thread is non-impersonating and every intermediate resource is
/// released before this returns.
pub fn acquire_elevated_token(api: &DynamicApi) -> LaunchResult<AcquiredToken> {
    let mut impersonation: Option<ImpersonationGuard> = None;

    if !enable_privilege(api, Privilege::Tcb, false) {
        if !enable_privilege(api, Privilege::Debug, false) {
            return Err(LaunchError::PrivilegeDenied(Privilege::Tcb.name()));
        }

        debug!("direct TCB enable failed, borrowing a system context");
        let guard = ImpersonationGuard::acquire_system_context()?;
        if !enable_privilege(api, Privilege::Tcb, true) {
            // guard drops here and reverts before we return
            return Err(LaunchError::PrivilegeDenied(Privilege::Tcb.name()));
        }
        impersonation = Some(guard);
    }

    let sid = Sid::from_string(TRUSTED_INSTALLER_SID)?;

    let current = open_current_token(impersonation.is_some())?;

    let mut groups = TokenGroupSet::capture(&current)?;
    groups.stamp_owner(&sid)?;

    let token = exchange_for_token(api, groups)?;
    debug!("logon exchange produced a TrustedInstaller token");

    Ok(AcquiredToken::new(token))
    // Drop order: groups were consumed, `current` closes, `sid` frees,
    // `impersonation` reverts. Cleanup runs on this and every early
    // return above.
}

/// Open the thread token while impersonating, the process token otherwise
pub fn open_current_token(impersonating: bool) -> LaunchResult<Handle> {
    let mut token: HANDLE = ptr::null_mut();
    let ok = if impersonating {
        unsafe { OpenThreadToken(GetCurrentThread(), TOKEN_QUERY, FALSE, &mut token) }
    } else {
        unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) }
    };
    if ok == FALSE {
        return Err(LaunchError::composition("opening the current token"));
    }
    Ok(Handle::new(token))
}

/// Exchange the rewritten group list for a TrustedInstaller token.
///
/// The account, domain, service logon type and legacy provider are fixed;
/// the exchange only yields the elevated identity with these exact
/// parameters. Consumes the group list; it is never reused afterwards.
fn exchange_for_token(api: &DynamicApi, mut groups: TokenGroupSet) -> LaunchResult<HANDLE> {
    let logon = match api.logon_user_ex_ex() {
        Some(entry) => entry,
        None => {
            return Err(LaunchError::TokenComposition {
                stage: "resolving the logon exchange entry point",
                code: 0,
            })
        }
    };

    let mut account = string_to_wide(LOGON_ACCOUNT);
    let mut domain = string_to_wide(LOGON_DOMAIN);
    let mut token: HANDLE = ptr::null_mut();

    let ok = unsafe {
        logon(
            account.as_mut_ptr(),
            domain.as_mut_ptr(),
            ptr::null_mut(),
            LOGON32_LOGON_SERVICE,
            LOGON32_PROVIDER_WINNT50,
            groups.as_mut_ptr(),
            &mut token,
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
            ptr::null_mut(),
        )
    };
    if ok == FALSE || token.is_null() {
        return Err(LaunchError::composition("exchanging the logon session"));
    }

    Ok(token)
}
