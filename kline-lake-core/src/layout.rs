//! Input/output tree layout.
//!
//! Input:  `{input_root}/{symbol}/{interval}/*.zip`
//! Output: `{output_root}/{symbol}/{interval}/{symbol}-{interval}-{date}.parquet`

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Date used for archives whose file name carries no `YYYY-MM-DD`.
pub const UNKNOWN_DATE: &str = "unknown_date";

/// Extension of the persisted partitions.
pub const OUTPUT_EXTENSION: &str = "parquet";

lazy_static! {
    static ref DATE_IN_NAME: Regex = Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap();
}

/// First `YYYY-MM-DD` substring of an archive name, or [`UNKNOWN_DATE`].
pub fn extract_date(file_name: &str) -> &str {
    DATE_IN_NAME
        .find(file_name)
        .map(|m| m.as_str())
        .unwrap_or(UNKNOWN_DATE)
}

/// `{symbol}-{interval}-{date}.parquet`
pub fn output_file_name(symbol: &str, interval: &str, date: &str) -> String {
    format!("{symbol}-{interval}-{date}.{OUTPUT_EXTENSION}")
}

/// Paths inside the output root.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Mirror of an input interval directory: `{root}/{symbol}/{interval}/`
    pub fn interval_dir(&self, symbol: &str, interval: &str) -> PathBuf {
        self.root.join(symbol).join(interval)
    }

    /// Partition file for one (symbol, interval, date).
    pub fn partition_path(&self, symbol: &str, interval: &str, date: &str) -> PathBuf {
        self.interval_dir(symbol, interval)
            .join(output_file_name(symbol, interval, date))
    }
}

/// Sub-directories of `dir` as `(name, path)`, sorted by name.
///
/// Files and other non-directory entries are skipped.
pub fn list_subdirs(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        dirs.push((entry.file_name().to_string_lossy().into_owned(), path));
    }
    dirs.sort();
    Ok(dirs)
}

/// `*.zip` files directly inside `dir`, sorted by name.
pub fn list_archives(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut archives = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("zip") {
            archives.push(path);
        }
    }
    archives.sort();
    Ok(archives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_date_from_binance_name() {
        assert_eq!(extract_date("BTCUSDT-1h-2024-03-15.zip"), "2024-03-15");
    }

    #[test]
    fn first_date_wins() {
        assert_eq!(
            extract_date("ETHUSDT-1d-2023-12-31-2024-01-01.zip"),
            "2023-12-31"
        );
    }

    #[test]
    fn missing_date_falls_back_to_placeholder() {
        assert_eq!(extract_date("BTCUSDT-1h-latest.zip"), UNKNOWN_DATE);
        assert_eq!(extract_date("BTCUSDT-1h-2024-3-15.zip"), UNKNOWN_DATE);
        assert_eq!(extract_date(""), UNKNOWN_DATE);
    }

    #[test]
    fn partition_path_mirrors_input_tree() {
        let layout = OutputLayout::new("/lake/processed");
        assert_eq!(
            layout.partition_path("BTCUSDT", "1h", "2024-03-15"),
            PathBuf::from("/lake/processed/BTCUSDT/1h/BTCUSDT-1h-2024-03-15.parquet")
        );
        assert_eq!(
            layout.interval_dir("ETHUSDT", "4h"),
            PathBuf::from("/lake/processed/ETHUSDT/4h")
        );
    }

    #[test]
    fn listings_skip_files_and_non_archives() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("ETHUSDT")).unwrap();
        fs::create_dir(dir.path().join("BTCUSDT")).unwrap();
        fs::write(dir.path().join("README.txt"), "notes").unwrap();
        fs::write(dir.path().join("b-2024-01-02.zip"), "").unwrap();
        fs::write(dir.path().join("a-2024-01-01.zip"), "").unwrap();
        fs::write(dir.path().join("a-2024-01-01.zip.md5"), "").unwrap();

        let names: Vec<String> = list_subdirs(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["BTCUSDT", "ETHUSDT"]);

        let archives = list_archives(dir.path()).unwrap();
        let archive_names: Vec<_> = archives
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(archive_names, vec!["a-2024-01-01.zip", "b-2024-01-02.zip"]);
    }
}
