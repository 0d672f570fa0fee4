//! Static rejection rules applied before and after canonicalization

/// Characters that never belong in a launchable path
const FORBIDDEN_CHARS: &[char] = &['<', '>', '"', '|', '?', '*'];

/// Extensions accepted for launch
const ALLOWED_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com"];

/// Reject any parent-directory traversal token or forbidden character.
///
/// Applied to the raw input and again to the canonicalized result, so
/// canonicalization can never reintroduce a traversal pattern.
pub fn is_traversal_safe(path: &str) -> bool {
    if path.contains("..\\") || path.contains("../") {
        return false;
    }
    if path.contains("\\..") || path.contains("/..") {
        return false;
    }
    !path.chars().any(|c| FORBIDDEN_CHARS.contains(&c))
}

/// Whether the path ends in an allow-listed executable extension
pub fn has_allowed_extension(path: &str) -> bool {
    match std::path::Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => ALLOWED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)),
        None => false,
    }
}
