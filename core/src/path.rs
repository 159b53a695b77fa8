use crate::naming::{code_safe_name, StringCase};

/// Code-safe group segments of a raw token path.
///
/// Blank segments and segments that sanitize to nothing are dropped, and a
/// segment repeating its predecessor is collapsed into it.
pub fn group_segments(path: &[String], style: StringCase) -> Vec<String> {
    let mut segments: Vec<String> = Vec::with_capacity(path.len());
    for raw in path {
        if raw.trim().is_empty() {
            continue;
        }
        let segment = code_safe_name(raw, style);
        if segment.is_empty() || segments.last() == Some(&segment) {
            continue;
        }
        segments.push(segment);
    }
    segments
}

/// Group segments followed by the token's own name. The name is always the
/// last segment, even if it repeats the last group.
pub fn path_segments(path: &[String], name: &str, style: StringCase) -> Vec<String> {
    let mut segments = group_segments(path, style);
    let name = code_safe_name(name, style);
    if !name.is_empty() {
        segments.push(name);
    }
    segments
}
