//! Writes report artifacts without ever overwriting an earlier one.
//!
//! Names are `<stem>_<YYYYmmdd_HHMMSS_ffffff>.<ext>`. If that name is taken,
//! `_1`, `_2`, ... is appended. Content goes to a temporary file in the
//! destination directory first and is moved into place only once fully
//! written, so a failed export leaves nothing behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::table::Table;

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Writes `table` as CSV into `dir` and returns the new file's path.
///
/// # Errors
///
/// Returns [`ExportError`] if `dir` cannot be created, the content cannot be
/// written, or no free name is found.
pub fn export(table: &Table, dir: &Path, stem: &str) -> Result<PathBuf, ExportError> {
    let path = write_unique(table.to_csv().as_bytes(), dir, stem, "csv", &timestamp())?;
    tracing::info!(path = %path.display(), rows = table.len(), "exported table");
    Ok(path)
}

/// Writes `value` as pretty-printed JSON into `dir`, named like [`export`].
///
/// # Errors
///
/// Returns [`ExportError`] on serialization or filesystem failure.
pub fn export_json<T: Serialize>(
    value: &T,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf, ExportError> {
    let mut body = serde_json::to_vec_pretty(value)?;
    body.push(b'\n');
    let path = write_unique(&body, dir, stem, "json", &timestamp())?;
    tracing::info!(path = %path.display(), "exported json");
    Ok(path)
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn candidate(dir: &Path, stem: &str, ext: &str, stamp: &str, attempt: usize) -> PathBuf {
    let name = if attempt == 0 {
        format!("{stem}_{stamp}.{ext}")
    } else {
        format!("{stem}_{stamp}_{attempt}.{ext}")
    };
    dir.join(name)
}

pub(crate) fn create_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|source| ExportError::CreateDir {
        path: dir.display().to_string(),
        source,
    })
}

/// Stages `bytes` in a temporary file inside `dir`.
pub(crate) fn stage(bytes: &[u8], dir: &Path) -> Result<NamedTempFile, ExportError> {
    let write_err = |source| ExportError::Write {
        path: dir.display().to_string(),
        source,
    };
    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(bytes).map_err(write_err)?;
    file.as_file().sync_all().map_err(write_err)?;
    Ok(file)
}

fn write_unique(
    bytes: &[u8],
    dir: &Path,
    stem: &str,
    ext: &str,
    stamp: &str,
) -> Result<PathBuf, ExportError> {
    create_dir(dir)?;
    let mut staged = stage(bytes, dir)?;

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = candidate(dir, stem, ext, stamp, attempt);
        match staged.persist_noclobber(&path) {
            Ok(_) => return Ok(path),
            Err(err) if err.error.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "export name taken, trying next");
                staged = err.file;
            }
            Err(err) => {
                return Err(ExportError::Persist {
                    path: path.display().to_string(),
                    source: err.error,
                });
            }
        }
    }

    Err(ExportError::NameExhausted {
        dir: dir.display().to_string(),
        stem: stem.to_string(),
        attempts: MAX_NAME_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut t = Table::new(["brand", "count"]);
        t.push_row(vec!["acme".to_string(), "2".to_string()]);
        t
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("readable dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn export_creates_missing_directory() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("reports").join("nested");
        let path = export(&table(), &dir, "top_brands").expect("export");
        assert_eq!(path.parent(), Some(dir.as_path()));
        assert_eq!(fs::read_to_string(&path).expect("read"), "brand,count\nacme,2\n");
    }

    #[test]
    fn file_name_embeds_stem_and_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = export(&table(), dir.path(), "recommendations").expect("export");
        let name = path.file_name().and_then(|n| n.to_str()).expect("utf-8 name");
        assert!(name.starts_with("recommendations_"), "{name}");
        assert!(name.ends_with(".csv"), "{name}");
        // recommendations_YYYYmmdd_HHMMSS_ffffff.csv
        assert_eq!(name.len(), "recommendations_".len() + 22 + ".csv".len());
    }

    #[test]
    fn same_timestamp_gets_sequence_suffix() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stamp = "20240101_120000_000000";
        let first = write_unique(b"one", dir.path(), "r", "csv", stamp).expect("first");
        let second = write_unique(b"two", dir.path(), "r", "csv", stamp).expect("second");
        let third = write_unique(b"three", dir.path(), "r", "csv", stamp).expect("third");

        assert_eq!(first, dir.path().join("r_20240101_120000_000000.csv"));
        assert_eq!(second, dir.path().join("r_20240101_120000_000000_1.csv"));
        assert_eq!(third, dir.path().join("r_20240101_120000_000000_2.csv"));
        assert_eq!(fs::read_to_string(&first).expect("read"), "one");
        assert_eq!(fs::read_to_string(&second).expect("read"), "two");
    }

    #[test]
    fn no_temporary_files_left_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stamp = "20240101_120000_000000";
        write_unique(b"a", dir.path(), "r", "csv", stamp).expect("first");
        write_unique(b"b", dir.path(), "r", "csv", stamp).expect("second");
        assert_eq!(
            file_names(dir.path()),
            vec![
                "r_20240101_120000_000000.csv".to_string(),
                "r_20240101_120000_000000_1.csv".to_string()
            ]
        );
    }

    #[test]
    fn export_json_is_pretty_and_named_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = export_json(&serde_json::json!({"total": 3}), dir.path(), "summary")
            .expect("export");
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
        let body = fs::read_to_string(&path).expect("read");
        assert_eq!(body, "{\n  \"total\": 3\n}\n");
    }

    #[test]
    fn unusable_directory_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").expect("write blocker");
        let err = export(&table(), &blocker, "r").expect_err("file in the way");
        assert!(matches!(err, ExportError::CreateDir { .. }), "{err:?}");
    }
}
