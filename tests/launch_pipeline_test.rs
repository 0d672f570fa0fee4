//! End-to-end scenarios for the launch pipeline

use tirun::{
    is_elevated, launch, validate, DynamicApi, LaunchError, PathRejectReason, PriorityClass,
};

#[test]
fn test_traversal_input_dies_at_validation() {
    // The validator takes no capability set at all: a rejected path can
    // never cause privilege or token work.
    let result = validate("..\\..\\Windows\\System32\\cmd.exe");
    assert!(matches!(
        result,
        Err(LaunchError::PathRejected(PathRejectReason::Traversal))
    ));
}

#[test]
fn test_priority_level_three_is_normal() {
    let priority = PriorityClass::from_level(3).unwrap();
    assert_eq!(priority, PriorityClass::Normal);
    assert_eq!(priority.label(), "NORMAL");
}

#[test]
fn test_priority_level_nine_is_rejected() {
    assert_eq!(PriorityClass::from_level(9), None);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_bare_name_scenario_reaches_validation_outcome() {
    // "  notepad.exe  " trims, then resolves through the search path
    match validate("  notepad.exe  ") {
        Ok(path) => {
            assert!(path.as_str().to_lowercase().ends_with("\\notepad.exe"));
        }
        Err(LaunchError::PathRejected(PathRejectReason::NotFound)) => {}
        Err(other) => panic!("unexpected rejection: {}", other),
    }
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_launch_without_elevation_is_privilege_denied() {
    if is_elevated() {
        // On an elevated runner this would genuinely start a process;
        // the scenario under test is the unprivileged failure path.
        return;
    }

    let api = DynamicApi::resolve();
    let path = match validate("C:\\Windows\\System32\\cmd.exe") {
        Ok(path) => path,
        Err(_) => return,
    };

    let result = launch(&api, &path, PriorityClass::Normal);
    match result {
        Err(LaunchError::PrivilegeDenied(_)) => {}
        Err(LaunchError::ImpersonationFailed { .. }) => {
            // Some unprivileged contexts can still enable the first rung
            // and die at the fallback instead
        }
        Err(other) => panic!("expected a privilege-stage failure, got {}", other),
        Ok(()) => panic!("launch must not succeed without elevation"),
    }
}

#[test]
fn test_launch_with_no_bindings_never_reaches_token_work() {
    let api = DynamicApi::unresolved();
    let path = match validate("C:\\Windows\\System32\\cmd.exe") {
        Ok(path) => path,
        Err(_) => return,
    };

    let result = launch(&api, &path, PriorityClass::Normal);
    match result {
        Err(LaunchError::PrivilegeDenied(name)) => {
            assert_eq!(name, "SeImpersonatePrivilege");
        }
        other => panic!("expected PrivilegeDenied, got {:?}", other),
    }
}

#[test]
fn test_bad_extension_scenario() {
    // Resolvable, existing, versioned, and still refused on extension
    let result = validate("C:\\Windows\\System32\\kernel32.dll");
    if let Err(LaunchError::PathRejected(reason)) = result {
        assert_eq!(reason, PathRejectReason::BadExtension);
    } else {
        panic!("kernel32.dll must be rejected by the extension allow-list");
    }
}
