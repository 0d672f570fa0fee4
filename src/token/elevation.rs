//! Elevation state of the current process

use std::mem;
use std::ptr;
use winapi::shared::minwindef::{BOOL, DWORD, FALSE};
use winapi::um::securitybaseapi::{
    AllocateAndInitializeSid, CheckTokenMembership, FreeSid, GetTokenInformation,
};
use winapi::um::winnt::{
    TokenElevation, DOMAIN_ALIAS_RID_ADMINS, PSID, SECURITY_BUILTIN_DOMAIN_RID,
    SID_IDENTIFIER_AUTHORITY, TOKEN_ELEVATION,
};

use crate::token::compose::open_current_token;

/// Whether the process runs as an elevated administrator.
///
/// Requires both membership in BUILTIN\Administrators and an elevated
/// token; the privilege ladder cannot climb without it.
pub fn is_elevated() -> bool {
    is_admin_member() && token_is_elevated()
}

fn is_admin_member() -> bool {
    unsafe {
        // SECURITY_NT_AUTHORITY
        let mut authority = SID_IDENTIFIER_AUTHORITY {
            Value: [0, 0, 0, 0, 0, 5],
        };
        let mut admins: PSID = ptr::null_mut();

        if AllocateAndInitializeSid(
            &mut authority,
            2,
            SECURITY_BUILTIN_DOMAIN_RID as DWORD,
            DOMAIN_ALIAS_RID_ADMINS as DWORD,
            0,
            0,
            0,
            0,
            0,
            0,
            &mut admins,
        ) == FALSE
        {
            return false;
        }

        let mut member: BOOL = FALSE;
        let checked = CheckTokenMembership(ptr::null_mut(), admins, &mut member);
        FreeSid(admins);

        checked != FALSE && member != FALSE
    }
}

fn token_is_elevated() -> bool {
    let token = match open_current_token(false) {
        Ok(token) => token,
        Err(_) => return false,
    };

    unsafe {
        let mut elevation: TOKEN_ELEVATION = mem::zeroed();
        let mut size: DWORD = 0;
        let ok = GetTokenInformation(
            token.raw(),
            TokenElevation,
            (&mut elevation as *mut TOKEN_ELEVATION).cast(),
            mem::size_of::<TOKEN_ELEVATION>() as DWORD,
            &mut size,
        );
        ok != FALSE && elevation.TokenIsElevated != 0
    }
}
