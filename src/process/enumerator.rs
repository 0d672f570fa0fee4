//! Process enumeration using Windows ToolHelp32 API

use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};

use crate::core::types::{LaunchError, LaunchResult, ProcessId};
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::wide_to_string;

/// One row of the process snapshot
#[derive(Debug, Clone)]
pub struct ProcessEntry {
    /// Process ID
    pub pid: ProcessId,
    /// Executable name as reported by the snapshot
    pub name: String,
}

impl ProcessEntry {
    /// Case-insensitive name comparison
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Process enumerator over a ToolHelp32 snapshot
pub struct ProcessEnumerator {
    snapshot: Handle,
    first_called: bool,
}

impl ProcessEnumerator {
    /// Create a new process enumerator
    ///
    /// Failing to create the snapshot is a hard error, distinct from an
    /// enumeration that simply runs out of entries.
    pub fn new() -> LaunchResult<Self> {
        let snapshot = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if snapshot.is_null() || snapshot == INVALID_HANDLE_VALUE {
            return Err(LaunchError::last_os_error());
        }
        Ok(ProcessEnumerator {
            snapshot: Handle::new(snapshot),
            first_called: false,
        })
    }

    /// Get the next process in the enumeration
    fn next_process(&mut self) -> Option<ProcessEntry> {
        unsafe {
            let mut entry: PROCESSENTRY32W = mem::zeroed();
            entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

            let success = if !self.first_called {
                self.first_called = true;
                Process32FirstW(self.snapshot.raw(), &mut entry)
            } else {
                Process32NextW(self.snapshot.raw(), &mut entry)
            };

            if success == FALSE {
                // No more entries; normal loop termination
                return None;
            }

            Some(ProcessEntry {
                pid: entry.th32ProcessID,
                name: wide_to_string(&entry.szExeFile),
            })
        }
    }
}

impl Iterator for ProcessEnumerator {
    type Item = ProcessEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_process()
    }
}

/// Find the first process with the given name (case-insensitive)
pub fn find_process_by_name(name: &str) -> LaunchResult<Option<ProcessEntry>> {
    let mut enumerator = ProcessEnumerator::new()?;
    Ok(enumerator.find(|p| p.name_matches(name)))
}
