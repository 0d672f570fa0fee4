//! Error types for the launch pipeline

use std::fmt;
use thiserror::Error;
use winapi::um::errhandlingapi::GetLastError;

/// Stage-tagged failure for one launch attempt
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("privilege {0} could not be enabled")]
    PrivilegeDenied(&'static str),

    #[error("impersonation failed while {stage} (error code: {code})")]
    ImpersonationFailed { stage: &'static str, code: u32 },

    #[error("token composition failed while {stage} (error code: {code})")]
    TokenComposition { stage: &'static str, code: u32 },

    #[error("path rejected: {0}")]
    PathRejected(PathRejectReason),

    #[error("process creation failed (error code: {code})")]
    LaunchFailed { code: u32 },

    #[error("Windows API error: {0}")]
    Os(#[from] windows::core::Error),
}

/// Result type alias for launch operations
pub type LaunchResult<T> = Result<T, LaunchError>;

impl LaunchError {
    /// Creates a Windows API error from the last error code
    pub fn last_os_error() -> Self {
        LaunchError::Os(windows::core::Error::from_win32())
    }

    /// Creates an impersonation error tagged with the failing stage
    pub fn impersonation(stage: &'static str) -> Self {
        LaunchError::ImpersonationFailed {
            stage,
            code: last_error_code(),
        }
    }

    /// Creates a token composition error tagged with the failing stage
    pub fn composition(stage: &'static str) -> Self {
        LaunchError::TokenComposition {
            stage,
            code: last_error_code(),
        }
    }

    /// Creates a launch failure carrying the last error code
    pub fn launch_failed() -> Self {
        LaunchError::LaunchFailed {
            code: last_error_code(),
        }
    }

    /// Creates a path rejection with the given sub-reason
    pub fn path(reason: PathRejectReason) -> Self {
        LaunchError::PathRejected(reason)
    }
}

/// Fetch the raw last-error value of the calling thread
pub fn last_error_code() -> u32 {
    unsafe { GetLastError() }
}

/// Why a candidate path was refused by the validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRejectReason {
    /// Input was empty or whitespace only
    Empty,
    /// Input exceeds the platform maximum path length
    TooLong,
    /// Input contains a parent-directory token or a forbidden character
    Traversal,
    /// The path could not be resolved to a canonical absolute form
    Canonicalization,
    /// No such file, in place or anywhere on the search path
    NotFound,
    /// Extension is not on the executable allow-list
    BadExtension,
    /// File could not be opened for read or carries no version resource
    Unreadable,
}

impl fmt::Display for PathRejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRejectReason::Empty => write!(f, "empty path"),
            PathRejectReason::TooLong => write!(f, "path exceeds the platform maximum length"),
            PathRejectReason::Traversal => {
                write!(f, "path contains a traversal token or forbidden character")
            }
            PathRejectReason::Canonicalization => write!(f, "path could not be canonicalized"),
            PathRejectReason::NotFound => write!(f, "no such executable"),
            PathRejectReason::BadExtension => {
                write!(f, "extension is not an allowed executable type")
            }
            PathRejectReason::Unreadable => {
                write!(f, "file is not a readable, versioned executable")
            }
        }
    }
}
