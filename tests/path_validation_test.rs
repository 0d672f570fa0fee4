//! Integration tests for path validation

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;

use tirun::validate::{canonical_path, has_allowed_extension, is_traversal_safe, sanitize, validate};
use tirun::{LaunchError, PathRejectReason};

fn reject_reason(raw: &str) -> PathRejectReason {
    match validate(raw) {
        Err(LaunchError::PathRejected(reason)) => reason,
        other => panic!("expected rejection for '{}', got {:?}", raw, other),
    }
}

#[test]
fn test_traversal_rejected_in_any_position() {
    for raw in [
        "..\\cmd.exe",
        "..\\..\\Windows\\System32\\cmd.exe",
        "../cmd.exe",
        "C:\\Windows\\..\\System32\\cmd.exe",
        "C:/Windows/../System32/cmd.exe",
        "C:\\Windows\\System32\\..",
        "tools/../cmd.exe",
    ] {
        assert_eq!(reject_reason(raw), PathRejectReason::Traversal, "{}", raw);
    }
}

#[test]
fn test_forbidden_characters_rejected() {
    for raw in [
        "C:\\tool<.exe",
        "C:\\tool>.exe",
        "C:\\to\"ol.exe",
        "C:\\tool|.exe",
        "C:\\tool?.exe",
        "C:\\tool*.exe",
    ] {
        assert_eq!(reject_reason(raw), PathRejectReason::Traversal, "{}", raw);
    }
}

#[test]
fn test_empty_and_whitespace_rejected() {
    assert_eq!(reject_reason(""), PathRejectReason::Empty);
    assert_eq!(reject_reason("   "), PathRejectReason::Empty);
    assert_eq!(reject_reason("\t"), PathRejectReason::Empty);
}

#[test]
fn test_overlong_input_rejected() {
    let raw = "x".repeat(300);
    assert_eq!(reject_reason(&raw), PathRejectReason::TooLong);
}

#[test]
fn test_rule_helpers_standalone() {
    assert!(is_traversal_safe("C:\\Windows\\notepad.exe"));
    assert!(!is_traversal_safe("..\\notepad.exe"));

    assert!(has_allowed_extension("a.exe"));
    assert!(has_allowed_extension("a.bat"));
    assert!(has_allowed_extension("a.cmd"));
    assert!(has_allowed_extension("a.com"));
    assert!(!has_allowed_extension("a.dll"));
    assert!(!has_allowed_extension("a"));
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_canonicalization_idempotent_and_strict() {
    assert_eq!(canonical_path(""), None);

    let once = canonical_path("C:\\Windows\\System32").unwrap();
    let twice = canonical_path(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_sanitize_trims_whitespace() {
    assert_eq!(sanitize("  notepad.exe  ").unwrap(), "notepad.exe");
    assert_eq!(sanitize("\tcmd.exe\t").unwrap(), "cmd.exe");
}

#[test]
#[cfg_attr(miri, ignore = "filesystem access not supported in Miri")]
fn test_unrecognized_extension_rejected_even_when_file_exists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tool.dll");
    fs::write(&path, b"MZ fake library").unwrap();

    let raw = path.to_string_lossy().into_owned();
    assert_eq!(reject_reason(&raw), PathRejectReason::BadExtension);
}

#[test]
#[cfg_attr(miri, ignore = "filesystem access not supported in Miri")]
fn test_renamed_plain_file_rejected_as_unreadable() {
    // Right extension, exists, but carries no version resource
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.exe");
    fs::write(&path, b"just text, not a PE image").unwrap();

    let raw = path.to_string_lossy().into_owned();
    assert_eq!(reject_reason(&raw), PathRejectReason::Unreadable);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_search_path_fallback_for_bare_names() {
    match validate("  notepad.exe  ") {
        Ok(path) => {
            let lower = path.as_str().to_lowercase();
            assert!(lower.ends_with("\\notepad.exe"), "{}", path);
        }
        Err(LaunchError::PathRejected(PathRejectReason::NotFound)) => {
            // Acceptable on environments without notepad on the search path
        }
        Err(other) => panic!("unexpected rejection: {}", other),
    }
}

proptest! {
    #[test]
    fn prop_backslash_traversal_never_validates(
        prefix in "[A-Za-z0-9\\\\]{0,20}",
        suffix in "[A-Za-z0-9\\\\]{0,20}",
    ) {
        let raw = format!("{}..\\{}", prefix, suffix);
        prop_assert!(validate(&raw).is_err());
    }

    #[test]
    fn prop_forward_slash_traversal_never_validates(
        prefix in "[A-Za-z0-9/]{0,20}",
        suffix in "[A-Za-z0-9/]{0,20}",
    ) {
        let raw = format!("{}../{}", prefix, suffix);
        prop_assert!(validate(&raw).is_err());
    }

    #[test]
    fn prop_forbidden_characters_never_validate(
        name in "[A-Za-z0-9]{0,10}",
        bad in proptest::sample::select(vec!['<', '>', '"', '|', '?', '*']),
    ) {
        let raw = format!("C:\\{}{}tool.exe", name, bad);
        prop_assert!(validate(&raw).is_err());
    }
}
