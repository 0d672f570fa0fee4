//! Whitelisted NT privilege identifiers

use std::fmt;

const SE_TCB_PRIVILEGE: u32 = 7;
const SE_DEBUG_PRIVILEGE: u32 = 20;
const SE_IMPERSONATE_PRIVILEGE: u32 = 29;

/// The closed set of privileges the launcher is allowed to enable.
///
/// Raw values reach the adjustment call only through [`Privilege::from_value`],
/// so anything outside this set is rejected before any OS call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Privilege {
    /// SeTcbPrivilege, act as part of the operating system
    Tcb,
    /// SeDebugPrivilege, open any process
    Debug,
    /// SeImpersonatePrivilege, impersonate a client after authentication
    Impersonate,
}

impl Privilege {
    /// The NT privilege value passed to the adjustment call
    pub const fn value(self) -> u32 {
        match self {
            Privilege::Tcb => SE_TCB_PRIVILEGE,
            Privilege::Debug => SE_DEBUG_PRIVILEGE,
            Privilege::Impersonate => SE_IMPERSONATE_PRIVILEGE,
        }
    }

    /// Whitelist gate for raw privilege values
    pub fn from_value(value: u32) -> Option<Self> {
        match value {
            SE_TCB_PRIVILEGE => Some(Privilege::Tcb),
            SE_DEBUG_PRIVILEGE => Some(Privilege::Debug),
            SE_IMPERSONATE_PRIVILEGE => Some(Privilege::Impersonate),
            _ => None,
        }
    }

    /// The privilege's canonical name
    pub const fn name(self) -> &'static str {
        match self {
            Privilege::Tcb => "SeTcbPrivilege",
            Privilege::Debug => "SeDebugPrivilege",
            Privilege::Impersonate => "SeImpersonatePrivilege",
        }
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
