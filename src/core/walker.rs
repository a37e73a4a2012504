use crate::utils::path::relative_dir;
use crate::utils::{ArchiverError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A regular file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Absolute source path.
    pub path: PathBuf,
    /// Directory of the file relative to the source root; empty for the root itself.
    pub relative_dir: PathBuf,
}

impl FileTask {
    /// `backup_root / relative_dir / file_name`.
    pub fn destination(&self, backup_root: &Path) -> Option<PathBuf> {
        let file_name = self.path.file_name()?;
        Some(backup_root.join(&self.relative_dir).join(file_name))
    }
}

/// Lazy, single-pass enumeration of the regular files below a root.
///
/// Entries are visited depth-first with siblings sorted by file name, so the
/// order is stable for a given snapshot of the tree. Symlinks are not followed
/// and are not reported. Failing to read the root yields `Walk`; failing to
/// read anything below it yields `Unreadable` and the walk goes on.
pub struct Walk {
    root: PathBuf,
    entries: walkdir::IntoIter,
}

impl Iterator for Walk {
    type Item = Result<FileTask>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(self.root.as_path()).to_path_buf();
                    if err.depth() == 0 {
                        return Some(Err(ArchiverError::walk(&path, err)));
                    }
                    return Some(Err(ArchiverError::unreadable(&path, err)));
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.into_path();
            let relative_dir = relative_dir(&self.root, &path).unwrap_or_default();
            return Some(Ok(FileTask { path, relative_dir }));
        }
    }
}

/// Start walking `root`. A root that is missing or not a directory is an error
/// rather than an empty walk.
pub fn walk(root: &Path) -> Result<Walk> {
    if !root.is_dir() {
        return Err(ArchiverError::not_found(root));
    }

    let entries = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    Ok(Walk {
        root: root.to_path_buf(),
        entries,
    })
}

/// Everything a full walk found.
#[derive(Debug, Default)]
pub struct Scan {
    pub tasks: Vec<FileTask>,
    /// Subtrees or entries that could not be read.
    pub skipped: Vec<ArchiverError>,
}

/// Materialize the full walk; the driver needs the total up front.
pub fn collect_tasks(root: &Path) -> Result<Scan> {
    let mut scan = Scan::default();
    for item in walk(root)? {
        match item {
            Ok(task) => scan.tasks.push(task),
            Err(e) if e.is_per_file() => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                scan.skipped.push(e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(scan)
}
