use std::path::{Component, Path, PathBuf};

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
///
/// Uses shellexpand crate for robust expansion; unknown variables leave the
/// input unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Expand a configured path and anchor it at `base` when relative.
///
/// The result is lexically normalized, see [`normalize_path`].
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(expand_env_vars(&path.to_string_lossy()));
    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&base.join(expanded))
    }
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root stays at the root; leading `..` of a relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}
