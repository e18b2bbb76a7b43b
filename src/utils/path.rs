//! `/`-separated virtual path arithmetic.
//!
//! Paths handled here address the workspace tree, not the host filesystem:
//! they are rooted at `/` (the workspace root) and always use `/` as the
//! separator regardless of platform.

/// Join a child onto a base with exactly one separator between them.
pub fn join(base: &str, child: &str) -> String {
    let base = base.trim_end_matches('/');
    let child = child.trim_start_matches('/');

    if child.is_empty() {
        return base.to_string();
    }

    format!("{}/{}", base, child)
}

/// Root a workspace-relative path (`projects/baz/src` -> `/projects/baz/src`).
pub fn root(path: &str) -> String {
    format!("/{}", path.trim().trim_start_matches("./").trim_matches('/'))
}

/// Collapse duplicate separators and resolve `.` and `..` segments.
///
/// Returns `None` when a `..` would climb above the root.
pub fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    Some(format!("/{}", segments.join("/")))
}

/// Parent directory of a rooted path. The parent of a top-level entry is `/`.
pub fn dirname(path: &str) -> &str {
    let without_trailing = path.trim_end_matches('/');

    match without_trailing.rsplit_once('/') {
        Some(("", _)) | None => "/",
        Some((parent, _)) => parent,
    }
}

/// Relative path from directory `from` to `to`. Both must be normalized.
///
/// Returns an empty string when both point at the same location.
pub fn relative(from: &str, to: &str) -> String {
    let from: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from.len() - common + to.len() - common);
    parts.extend(std::iter::repeat("..").take(from.len() - common));
    parts.extend(&to[common..]);

    parts.join("/")
}
