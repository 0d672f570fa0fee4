//! Filesystem resolution for candidate paths

use std::env;
use std::path::Path;
use std::ptr;
use winapi::shared::minwindef::{DWORD, MAX_PATH};
use winapi::um::fileapi::{CreateFileW, GetFullPathNameW, OPEN_EXISTING};
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::winnt::{FILE_ATTRIBUTE_NORMAL, FILE_SHARE_READ, GENERIC_READ};
use winapi::um::winver::GetFileVersionInfoSizeW;

use crate::windows::types::Handle;
use crate::windows::utils::string_conv::{string_to_wide, wide_to_string};

/// Resolve `path` to an absolute, normalized form.
///
/// Relative and drive-relative forms resolve against the current working
/// directory. Empty input resolves to nothing, never to a default or the
/// current directory, and results that would exceed the platform path
/// bound are treated as failures.
pub fn canonical_path(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }

    let wide = string_to_wide(path);
    let mut buffer = vec![0u16; MAX_PATH as usize];
    let len = unsafe {
        GetFullPathNameW(
            wide.as_ptr(),
            buffer.len() as DWORD,
            buffer.as_mut_ptr(),
            ptr::null_mut(),
        )
    };

    if len == 0 || len as usize >= buffer.len() {
        return None;
    }
    Some(wide_to_string(&buffer[..len as usize]))
}

/// Whether the path refers to an existing regular file
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Search each directory of the search-path variable for `name`.
///
/// Bare names without an extension get the default executable extension
/// appended before the search. Returns the first hit, unresolved.
pub fn find_in_search_path(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let path_env = env::var_os("PATH")?;
    let search_name = if Path::new(name).extension().is_none() {
        format!("{}.exe", name)
    } else {
        name.to_string()
    };

    for dir in env::split_paths(&path_env) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(&search_name);
        if candidate.is_file() {
            return Some(candidate.to_string_lossy().into_owned());
        }
    }
    None
}

/// Cheap check that the file is a readable, versioned PE image.
///
/// A sanity heuristic against renamed arbitrary files, not a security
/// boundary.
pub fn is_versioned_executable(path: &str) -> bool {
    let wide = string_to_wide(path);

    let mut handle: DWORD = 0;
    let size = unsafe { GetFileVersionInfoSizeW(wide.as_ptr(), &mut handle) };
    if size == 0 {
        return false;
    }

    let file = unsafe {
        CreateFileW(
            wide.as_ptr(),
            GENERIC_READ,
            FILE_SHARE_READ,
            ptr::null_mut(),
            OPEN_EXISTING,
            FILE_ATTRIBUTE_NORMAL,
            ptr::null_mut(),
        )
    };
    if file == INVALID_HANDLE_VALUE {
        return false;
    }
    drop(Handle::new(file));
    true
}
