use crate::config::Config;
use crate::core::walker::FileTask;
use crate::utils::{ArchiverError, Result};
use chrono::{DateTime, Datelike, Local};
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocateOptions {
    pub relax_permissions: bool,
}

impl Default for RelocateOptions {
    fn default() -> Self {
        Self {
            relax_permissions: true,
        }
    }
}

impl RelocateOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            relax_permissions: config.should_relax_permissions(),
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Modified in or after the cutoff year; left in place.
    Current,
    WouldMove { from: PathBuf, to: PathBuf },
    Moved { from: PathBuf, to: PathBuf },
}

impl Outcome {
    pub fn qualified(&self) -> bool {
        !matches!(self, Outcome::Current)
    }

    pub fn log_line(&self) -> Option<String> {
        match self {
            Outcome::Current => None,
            Outcome::WouldMove { from, to } => Some(format!(
                "[Dry Run] Would move: {} to {}",
                from.display(),
                to.display()
            )),
            Outcome::Moved { from, to } => Some(format!(
                "Moved: {} to {}",
                from.display(),
                to.display()
            )),
        }
    }
}

/// Calendar year of the file's last modification, in local time.
pub fn modification_year(path: &Path) -> Result<i32> {
    let metadata = fs::metadata(path).map_err(|e| ArchiverError::stat(path, e))?;
    let modified = metadata
        .modified()
        .map_err(|e| ArchiverError::stat(path, e))?;
    Ok(DateTime::<Local>::from(modified).year())
}

/// Relocate one file if it predates `cutoff_year`.
pub fn relocate(
    task: &FileTask,
    backup_root: &Path,
    cutoff_year: i32,
    dry_run: bool,
    options: RelocateOptions,
) -> Result<Outcome> {
    let year = modification_year(&task.path)?;
    if year >= cutoff_year {
        return Ok(Outcome::Current);
    }

    let destination = task.destination(backup_root).ok_or_else(|| {
        ArchiverError::relocation(
            &task.path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;

    if dry_run {
        tracing::debug!(
            from = %task.path.display(),
            to = %destination.display(),
            year,
            "would move"
        );
        return Ok(Outcome::WouldMove {
            from: task.path.clone(),
            to: destination,
        });
    }

    move_file(&task.path, &destination, options)
        .map_err(|e| ArchiverError::relocation(&task.path, e))?;

    tracing::debug!(
        from = %task.path.display(),
        to = %destination.display(),
        year,
        "moved"
    );

    Ok(Outcome::Moved {
        from: task.path.clone(),
        to: destination,
    })
}

/// Copy content, permissions and timestamps, then delete the source.
fn move_file(from: &Path, to: &Path, options: RelocateOptions) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }

    let metadata = fs::metadata(from)?;
    if let Err(e) = copy_with_times(from, to, &metadata) {
        // Leave no half-written copy behind; the source is still intact.
        let _ = fs::remove_file(to);
        return Err(e);
    }

    if let Err(e) = remove_source(from, &metadata, options) {
        // Undo the copy so the file lives in exactly one place.
        let _ = fs::remove_file(to);
        if options.relax_permissions {
            let _ = fs::set_permissions(from, metadata.permissions());
        }
        return Err(e);
    }

    Ok(())
}

fn remove_source(
    from: &Path,
    metadata: &fs::Metadata,
    options: RelocateOptions,
) -> io::Result<()> {
    if options.relax_permissions {
        tracing::debug!(path = %from.display(), "relaxing permissions before delete");
        relax_permissions(from, metadata)?;
    }
    fs::remove_file(from)
}

fn copy_with_times(from: &Path, to: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    fs::copy(from, to)?;
    let atime = FileTime::from_last_access_time(metadata);
    let mtime = FileTime::from_last_modification_time(metadata);
    filetime::set_file_times(to, atime, mtime)
}

#[cfg(unix)]
fn relax_permissions(path: &Path, _metadata: &fs::Metadata) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o777))
}

#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn relax_permissions(path: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    let mut permissions = metadata.permissions();
    permissions.set_readonly(false);
    fs::set_permissions(path, permissions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_helpers::write_file_with_year;
    use tempfile::TempDir;

    fn task_for(root: &Path, path: &Path) -> FileTask {
        FileTask {
            path: path.to_path_buf(),
            relative_dir: crate::utils::path::relative_dir(root, path).unwrap(),
        }
    }

    #[test]
    fn test_modification_year() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_file_with_year(temp_dir.path(), "old.txt", 2015);
        assert_eq!(modification_year(&file).unwrap(), 2015);
    }

    #[test]
    fn test_current_file_left_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let backup = temp_dir.path().join("src_backup");
        let file = write_file_with_year(&source, "new.txt", 2023);

        let outcome = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Current);
        assert!(outcome.log_line().is_none());
        assert!(file.exists());
        assert!(!backup.exists());
    }

    #[test]
    fn test_cutoff_year_itself_is_current() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_file_with_year(temp_dir.path(), "edge.txt", 2022);
        let task = task_for(temp_dir.path(), &file);

        let outcome = relocate(
            &task,
            &temp_dir.path().join("b"),
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Current);
    }

    #[test]
    fn test_dry_run_reports_without_mutation() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let backup = temp_dir.path().join("src_backup");
        let file = write_file_with_year(&source, "docs/old.txt", 2010);

        let outcome = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            true,
            RelocateOptions::default(),
        )
        .unwrap();

        let expected_to = backup.join("docs").join("old.txt");
        assert_eq!(
            outcome,
            Outcome::WouldMove {
                from: file.clone(),
                to: expected_to.clone()
            }
        );
        assert!(outcome
            .log_line()
            .unwrap()
            .starts_with("[Dry Run] Would move: "));
        assert!(file.exists());
        assert!(!backup.exists());
    }

    #[test]
    fn test_real_run_moves_and_preserves_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let backup = temp_dir.path().join("src_backup");
        let file = write_file_with_year(&source, "a/b/old.txt", 2012);
        let original_mtime =
            FileTime::from_last_modification_time(&fs::metadata(&file).unwrap());

        let outcome = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap();

        let destination = backup.join("a/b/old.txt");
        assert!(matches!(outcome, Outcome::Moved { .. }));
        assert!(outcome.log_line().unwrap().starts_with("Moved: "));
        assert!(!file.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "content of a/b/old.txt");

        let copied_mtime =
            FileTime::from_last_modification_time(&fs::metadata(&destination).unwrap());
        assert_eq!(copied_mtime.unix_seconds(), original_mtime.unix_seconds());
        assert_eq!(modification_year(&destination).unwrap(), 2012);
    }

    #[cfg(unix)]
    #[test]
    fn test_read_only_file_is_relocated() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let backup = temp_dir.path().join("src_backup");
        let file = write_file_with_year(&source, "locked.txt", 2001);
        fs::set_permissions(&file, fs::Permissions::from_mode(0o444)).unwrap();

        let outcome = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::Moved { .. }));
        assert!(!file.exists());
        assert!(backup.join("locked.txt").exists());
    }

    #[test]
    fn test_vanished_file_is_stat_error() {
        let temp_dir = TempDir::new().unwrap();
        let task = FileTask {
            path: temp_dir.path().join("gone.txt"),
            relative_dir: PathBuf::new(),
        };

        let err = relocate(
            &task,
            &temp_dir.path().join("backup"),
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ArchiverError::Stat { .. }));
        assert!(err.is_per_file());
    }

    #[test]
    fn test_unwritable_destination_is_relocation_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let file = write_file_with_year(&source, "old.txt", 2005);

        // A regular file where the backup directory should be.
        let backup = temp_dir.path().join("src_backup");
        fs::write(&backup, "not a directory").unwrap();

        let err = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            false,
            RelocateOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ArchiverError::Relocation { .. }));
        assert!(err.to_string().contains("old.txt"));
        assert!(file.exists(), "source must survive a failed relocation");
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_delete_rolls_back_copy_and_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        let backup = temp_dir.path().join("src_backup");
        let file = write_file_with_year(&source, "old.txt", 2003);
        fs::set_permissions(&file, fs::Permissions::from_mode(0o600)).unwrap();
        // Entries of a read-only directory cannot be removed.
        fs::set_permissions(&source, fs::Permissions::from_mode(0o555)).unwrap();

        let write_check = source.join(".write-check");
        if fs::write(&write_check, "").is_ok() {
            fs::remove_file(&write_check).unwrap();
            fs::set_permissions(&source, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = relocate(
            &task_for(&source, &file),
            &backup,
            2022,
            false,
            RelocateOptions::default(),
        );
        fs::set_permissions(&source, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ArchiverError::Relocation { .. }));
        assert!(file.exists());
        assert!(!backup.join("old.txt").exists());
        let mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn test_options_follow_config() {
        let mut config = crate::config::defaults::default_config();
        assert!(RelocateOptions::from_config(&config).relax_permissions);

        config.safety.relax_permissions_before_delete = false;
        assert!(!RelocateOptions::from_config(&config).relax_permissions);
    }
}
