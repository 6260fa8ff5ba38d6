use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::report;

/// `<root>/YYYY/MM-MonthName` for a modification time.
pub fn month_folder(root: &Path, modified: &DateTime<Local>) -> PathBuf {
    root.join(modified.format("%Y").to_string())
        .join(modified.format("%m-%B").to_string())
}

/// `HH_<name>` with the hour on a 24h clock. `name` is kept byte-for-byte.
pub fn hour_file_name(modified: &DateTime<Local>, name: &OsStr) -> OsString {
    let mut out = OsString::from(modified.format("%H_").to_string());
    out.push(name);
    out
}

/// Copy every file under `src_root` into `dest_root/YYYY/MM-MonthName/HH_name`.
///
/// The first error stops the walk and is returned; files copied before it
/// stay in place. Returns the number of files copied.
pub fn organize(src_root: &Path, dest_root: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src_root) {
        let entry = entry.map_err(|e| Error::walk(src_root, e))?;
        if entry.file_type().is_dir() {
            continue;
        }

        let modified = report::modified_at(entry.path())?;
        let folder = month_folder(dest_root, &modified);
        fs::create_dir_all(&folder).map_err(|source| Error::FolderCreate {
            path: folder.clone(),
            source,
        })?;

        let dest = folder.join(hour_file_name(&modified, entry.file_name()));
        copy_file(entry.path(), &dest)?;

        info!(from = %entry.path().display(), to = %dest.display(), "Moved file");
        copied += 1;
    }

    Ok(copied)
}

fn copy_file(from: &Path, to: &Path) -> Result<u64> {
    let mut src = File::open(from).map_err(|source| Error::Open {
        path: from.to_path_buf(),
        source,
    })?;
    let mut dst = File::create(to).map_err(|source| Error::Write {
        path: to.to_path_buf(),
        source,
    })?;
    io::copy(&mut src, &mut dst).map_err(|source| Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::SystemTime;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).single().unwrap()
    }

    fn touch(path: &Path, body: &[u8], t: DateTime<Local>) {
        fs::write(path, body).unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::from(t))
            .unwrap();
    }

    #[test]
    fn destination_layout() {
        let t = local(2024, 3, 15, 14, 22);
        let root = Path::new("out");
        assert_eq!(month_folder(root, &t), Path::new("out/2024/03-March"));
        assert_eq!(hour_file_name(&t, OsStr::new("blog1.html")), "14_blog1.html");
        assert_eq!(hour_file_name(&local(2024, 3, 15, 7, 0), OsStr::new("a")), "07_a");
    }

    #[test]
    fn copies_nested_files_by_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("articles");
        let dst = dir.path().join("organized");
        fs::create_dir_all(src.join("old")).unwrap();
        touch(&src.join("blog1.html"), b"<p>one</p>", local(2024, 3, 15, 14, 22));
        touch(&src.join("old/blog0.html"), b"<p>zero</p>", local(2023, 12, 1, 0, 5));

        assert_eq!(organize(&src, &dst).unwrap(), 2);
        assert_eq!(
            fs::read(dst.join("2024/03-March/14_blog1.html")).unwrap(),
            b"<p>one</p>"
        );
        assert_eq!(
            fs::read(dst.join("2023/12-December/00_blog0.html")).unwrap(),
            b"<p>zero</p>"
        );
        assert!(!dst.join("2024/03-March/old").exists());
        assert!(src.join("blog1.html").exists());
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_name_is_kept_byte_for_byte() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.html");
        touch(&src.join(name), b"bytes", local(2024, 3, 15, 14, 22));

        assert_eq!(organize(&src, &dst).unwrap(), 1);
        let copied = dst
            .join("2024/03-March")
            .join(OsStr::from_bytes(b"14_caf\xe9.html"));
        assert_eq!(fs::read(copied).unwrap(), b"bytes");
    }

    #[test]
    fn existing_destination_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        let t = local(2022, 6, 30, 23, 59);
        touch(&src.join("a.txt"), b"new", t);
        fs::create_dir_all(dst.join("2022/06-June")).unwrap();
        fs::write(dst.join("2022/06-June/23_a.txt"), b"old contents").unwrap();

        organize(&src, &dst).unwrap();
        assert_eq!(fs::read(dst.join("2022/06-June/23_a.txt")).unwrap(), b"new");
    }

    #[test]
    fn folder_create_failure_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        touch(&src.join("a.txt"), b"a", local(2024, 1, 1, 10, 0));
        // A file where the year folder must go.
        let dst = dir.path().join("dst");
        fs::create_dir_all(&dst).unwrap();
        fs::write(dst.join("2024"), b"").unwrap();

        let err = organize(&src, &dst).unwrap_err();
        assert!(matches!(err, Error::FolderCreate { .. }));
    }

    #[test]
    fn missing_source_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = organize(&dir.path().join("nope"), &dir.path().join("dst")).unwrap_err();
        assert!(matches!(err, Error::Walk { .. }));
    }
}
