//! The preview dataset and its durable artifact store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{GradesheetError, Result};

/// The shaped-but-untyped intermediate table. Every cell is a string;
/// typing happens only at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewTable {
    /// Column names: the four metadata columns followed by the
    /// canonical schema.
    pub columns: Vec<String>,
    /// Row-major string cells, one entry per column.
    pub rows: Vec<Vec<String>>,
}

impl PreviewTable {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Write the table as delimited text: a header row, then one line
    /// per data row, all values as strings.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .map_err(|e| GradesheetError::Persistence(format!("failed to flush preview: {e}")))?;
        Ok(())
    }

    /// Read a table back from its delimited form. Round-trips exactly:
    /// the preview stage has no types to lose.
    pub fn read_csv<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let columns: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
        if columns.is_empty() {
            return Err(GradesheetError::EmptyData("preview has no columns".to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }
        Ok(Self { columns, rows })
    }
}

/// Directory-backed store for preview artifacts.
///
/// A token is written once at shaping time and consumed at most once at
/// confirmation; `remove` deletes the backing file.
#[derive(Debug, Clone)]
pub struct PreviewStore {
    dir: PathBuf,
}

impl PreviewStore {
    /// Create a store rooted at `dir`. The directory is created lazily
    /// on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the artifacts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, token: &str) -> PathBuf {
        self.dir.join(format!("{token}.csv"))
    }

    /// Tokens stay within the store directory.
    fn valid_token(token: &str) -> bool {
        !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Persist a preview and return its fresh opaque token.
    pub fn save(&self, preview: &PreviewTable) -> Result<String> {
        fs::create_dir_all(&self.dir).map_err(|e| GradesheetError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let base = format!("preview_{}", Utc::now().format("%Y%m%d%H%M%S%3f"));
        let mut token = base.clone();
        let mut counter = 1;
        while self.path_for(&token).exists() {
            counter += 1;
            token = format!("{base}_{counter}");
        }
        let path = self.path_for(&token);
        let file = File::create(&path).map_err(|e| GradesheetError::Io {
            path: path.clone(),
            source: e,
        })?;
        preview.write_csv(BufWriter::new(file))?;
        Ok(token)
    }

    /// Load a previously saved preview.
    pub fn load(&self, token: &str) -> Result<PreviewTable> {
        if !Self::valid_token(token) {
            return Err(GradesheetError::PreviewNotFound(token.to_string()));
        }
        let path = self.path_for(token);
        if !path.exists() {
            return Err(GradesheetError::PreviewNotFound(token.to_string()));
        }
        let file = File::open(&path).map_err(|e| GradesheetError::Io {
            path: path.clone(),
            source: e,
        })?;
        PreviewTable::read_csv(BufReader::new(file))
    }

    /// Delete a consumed preview artifact. Removing a token that is
    /// already gone is not an error.
    pub fn remove(&self, token: &str) -> Result<()> {
        if !Self::valid_token(token) {
            return Ok(());
        }
        let path = self.path_for(token);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| GradesheetError::Io { path, source: e })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> PreviewTable {
        PreviewTable {
            columns: vec!["department".into(), "student_name".into(), "total_marks".into()],
            rows: vec![
                vec!["CS".into(), "Ali".into(), "90".into()],
                vec!["".into(), "".into(), "".into()],
                vec!["CS".into(), "comma, value".into(), "1,234.50".into()],
            ],
        }
    }

    #[test]
    fn test_csv_round_trip() {
        let preview = sample();
        let mut buffer = Vec::new();
        preview.write_csv(&mut buffer).unwrap();
        let restored = PreviewTable::read_csv(buffer.as_slice()).unwrap();
        assert_eq!(restored, preview);
    }

    #[test]
    fn test_store_save_load_remove() {
        let dir = tempdir().unwrap();
        let store = PreviewStore::new(dir.path());

        let token = store.save(&sample()).unwrap();
        assert!(token.starts_with("preview_"));

        let loaded = store.load(&token).unwrap();
        assert_eq!(loaded, sample());

        store.remove(&token).unwrap();
        assert!(matches!(
            store.load(&token),
            Err(GradesheetError::PreviewNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_token() {
        let dir = tempdir().unwrap();
        let store = PreviewStore::new(dir.path());
        assert!(matches!(
            store.load("preview_19700101000000000"),
            Err(GradesheetError::PreviewNotFound(_))
        ));
    }

    #[test]
    fn test_traversal_token_rejected() {
        let dir = tempdir().unwrap();
        let store = PreviewStore::new(dir.path());
        assert!(matches!(
            store.load("../etc/passwd"),
            Err(GradesheetError::PreviewNotFound(_))
        ));
    }
}
