//! Windows error code handling utilities

use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Common Windows error codes seen by the launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    FileNotFound,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    InsufficientBuffer,
    NoToken,
    PrivilegeNotHeld,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            2 => ErrorCode::FileNotFound,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            122 => ErrorCode::InsufficientBuffer,
            1008 => ErrorCode::NoToken,
            1314 => ErrorCode::PrivilegeNotHeld,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error of the calling thread
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(GetLastError()) }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::FileNotFound => write!(f, "File not found"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::NoToken => write!(f, "No token on the thread"),
            ErrorCode::PrivilegeNotHeld => write!(f, "A required privilege is not held"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}
