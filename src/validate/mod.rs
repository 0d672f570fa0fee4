//! Defense-in-depth validation of operator-supplied paths
//!
//! Everything that may ever reach process creation funnels through
//! [`validate`]; each step narrows what the next step operates on, so the
//! order is part of the contract.

mod resolve;
mod rules;

pub use resolve::{canonical_path, file_exists, find_in_search_path, is_versioned_executable};
pub use rules::{has_allowed_extension, is_traversal_safe};

use std::env;
use std::fmt;
use winapi::shared::minwindef::MAX_PATH;

use crate::core::types::{LaunchError, LaunchResult, PathRejectReason};
use crate::windows::utils::string_conv::{extract_filename, normalize_path, string_to_wide};

/// A canonical, absolute path to an existing, allow-listed executable.
///
/// Only the full validation pipeline produces one; there is no partial or
/// unchecked constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(String);

impl ValidatedPath {
    /// The canonical path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-16 form for process creation, re-checked against the platform
    /// path bound
    pub fn to_wide(&self) -> LaunchResult<Vec<u16>> {
        let wide = string_to_wide(&self.0);
        if wide.len() > MAX_PATH {
            return Err(LaunchError::path(PathRejectReason::TooLong));
        }
        Ok(wide)
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim and normalize operator input before validation.
///
/// Bare names are left alone so validation can fall back to the search
/// path; relative inputs with separators are anchored to the current
/// directory. Returns nothing for input that trims to empty.
pub fn sanitize(raw: &str) -> Option<String> {
    let mut path = raw.trim().to_string();
    if path.is_empty() {
        return None;
    }

    let rooted = path.starts_with('\\') || path.starts_with('/');
    let has_drive = path.as_bytes().get(1) == Some(&b':');
    let has_separator = path.contains('\\') || path.contains('/');
    if !rooted && !has_drive && has_separator {
        if let Ok(cwd) = env::current_dir() {
            path = format!("{}\\{}", cwd.display(), path);
        }
    }

    path = normalize_path(&path);
    while path.contains("\\\\") {
        path = path.replace("\\\\", "\\");
    }

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

/// Apply the full validation pipeline to operator input.
///
/// Order: length bounds, traversal rules, canonicalization (re-checked),
/// existence with search-path fallback, extension allow-list, readable
/// versioned-executable check.
pub fn validate(raw: &str) -> LaunchResult<ValidatedPath> {
    if raw.trim().is_empty() {
        return Err(LaunchError::path(PathRejectReason::Empty));
    }
    if raw.len() > MAX_PATH {
        return Err(LaunchError::path(PathRejectReason::TooLong));
    }

    let path = sanitize(raw).ok_or(LaunchError::path(PathRejectReason::Empty))?;
    if !is_traversal_safe(&path) {
        return Err(LaunchError::path(PathRejectReason::Traversal));
    }

    let canonical =
        canonical_path(&path).ok_or(LaunchError::path(PathRejectReason::Canonicalization))?;
    // Canonicalization must not reintroduce a traversal pattern
    if !is_traversal_safe(&canonical) {
        return Err(LaunchError::path(PathRejectReason::Traversal));
    }

    let resolved = if file_exists(&canonical) {
        canonical
    } else {
        let name = extract_filename(&canonical);
        let found =
            find_in_search_path(&name).ok_or(LaunchError::path(PathRejectReason::NotFound))?;
        let found =
            canonical_path(&found).ok_or(LaunchError::path(PathRejectReason::Canonicalization))?;
        if !is_traversal_safe(&found) {
            return Err(LaunchError::path(PathRejectReason::Traversal));
        }
        found
    };

    if !has_allowed_extension(&resolved) {
        return Err(LaunchError::path(PathRejectReason::BadExtension));
    }
    if !is_versioned_executable(&resolved) {
        return Err(LaunchError::path(PathRejectReason::Unreadable));
    }

    Ok(ValidatedPath(resolved))
}
