//! Path normalization helpers.
//!
//! The build manifest and descriptor may have been produced on a different
//! platform than the one running the pipeline, so reference paths are always
//! compared in slash-separated form. Everything here is a pure string or
//! `Path` transformation: no filesystem access, no errors.

use std::path::{Path, PathBuf};

/// Converts backslash separators to forward slashes.
///
/// Applied unconditionally rather than only on Windows hosts, because the
/// manifest consumed by this pipeline may carry separators from the platform
/// that produced it.
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Renders a `Path` as a slash-separated string.
///
/// Used for bundle-relative artifact names and archive entry names, which are
/// slash-separated regardless of host platform.
pub fn slash_path(path: &Path) -> String {
    slash(&path.to_string_lossy())
}

/// Lexically normalizes a slash-separated path.
///
/// Collapses duplicate separators, drops `.` segments and resolves `x/..`
/// pairs without touching the filesystem. `..` segments that cannot be
/// resolved are preserved for relative inputs and discarded for absolute
/// ones. An input that normalizes to nothing becomes `.`.
///
/// Idempotent: `normalize(&normalize(p)) == normalize(p)`.
pub fn normalize(path: &str) -> String {
    let slashed = slash(path);
    let absolute = slashed.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in slashed.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // A leading ".." escapes a relative path but is meaningless
                // at the root of an absolute one.
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Anchors `path` under `root`, normalizing separators and dot segments.
///
/// The portion of `path` relative to `root` (or `path` itself when it is
/// already relative) is normalized and joined back onto `root`. An absolute
/// path outside `root` is returned normalized but not re-anchored.
///
/// Idempotent: resolving an already-resolved path returns the same value.
pub fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let cleaned = normalize(&relative.to_string_lossy());
    if Path::new(&cleaned).is_absolute() {
        return PathBuf::from(cleaned);
    }
    if cleaned == "." {
        return root.to_path_buf();
    }
    root.join(cleaned)
}
