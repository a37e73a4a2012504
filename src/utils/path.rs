use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a path when it exists, falling back to the path as given.
///
/// Canonicalization can fail on permission issues or broken symlinks; the
/// caller still gets a usable path in that case.
pub fn safe_resolve_path(path: &Path) -> PathBuf {
    if path.exists() {
        path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

/// Derive the sibling backup directory for a source root: `<source><suffix>`.
///
/// Trailing separators are dropped first so `photos/` maps to
/// `photos_backup` rather than a directory nested inside the source.
pub fn backup_root_for(source_root: &Path, suffix: &str) -> PathBuf {
    let trimmed = strip_trailing_separators(source_root);
    let mut name: OsString = trimmed.into_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

fn strip_trailing_separators(path: &Path) -> PathBuf {
    let components: Vec<Component> = path.components().collect();
    if components.is_empty() {
        return PathBuf::from(".");
    }
    components.iter().collect()
}

/// Path of `path`'s parent directory relative to `root`. Files directly in the
/// root get an empty relative directory.
pub fn relative_dir(root: &Path, path: &Path) -> Option<PathBuf> {
    let parent = path.parent()?;
    parent.strip_prefix(root).ok().map(Path::to_path_buf)
}
