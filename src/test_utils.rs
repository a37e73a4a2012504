pub mod test_helpers {
    use chrono::{Local, TimeZone};
    use filetime::FileTime;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Midsummer noon, local time, so the year is unambiguous in every zone.
    pub fn mtime_in_year(year: i32) -> FileTime {
        let stamp = Local
            .with_ymd_and_hms(year, 6, 15, 12, 0, 0)
            .single()
            .expect("valid local timestamp");
        FileTime::from_unix_time(stamp.timestamp(), 0)
    }

    pub fn set_year(path: &Path, year: i32) {
        filetime::set_file_mtime(path, mtime_in_year(year)).expect("Failed to set mtime");
    }

    /// Write `root/relative` with predictable content, dated to `year`.
    pub fn write_file_with_year(root: &Path, relative: &str, year: i32) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, format!("content of {relative}")).expect("Failed to write file");
        set_year(&path, year);
        path
    }
}
