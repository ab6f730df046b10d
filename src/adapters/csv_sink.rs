use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::domain::model::ProbeRecord;
use crate::domain::ports::ResultSink;
use crate::utils::error::Result;

/// Append-only CSV sink. The header row is written only when the file is
/// first created, so repeated runs keep extending one continuous series.
pub struct CsvFileSink {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl CsvFileSink {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let write_header = !path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            writer.write_record(["timestamp", "name", "duration"])?;
            writer.flush()?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvFileSink {
    fn append(&mut self, record: &ProbeRecord) -> Result<()> {
        self.writer.serialize(record)?;
        // 每列即時落盤，中斷時最多丟失進行中的那一筆
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(name: &str, duration: f64) -> ProbeRecord {
        ProbeRecord {
            timestamp: "2024-05-01T12:00:00.000".to_string(),
            name: name.to_string(),
            duration,
        }
    }

    #[test]
    fn test_header_written_once_on_creation() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("probe.csv");

        let mut sink = CsvFileSink::open(&path).unwrap();
        sink.append(&record("service.node.name-term", 0.42)).unwrap();
        drop(sink);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "timestamp,name,duration");
        assert_eq!(lines[1], "2024-05-01T12:00:00.000,service.node.name-term,0.42");
    }

    #[test]
    fn test_reopen_appends_without_second_header() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("probe.csv");

        {
            let mut sink = CsvFileSink::open(&path).unwrap();
            sink.append(&record("a", 0.1)).unwrap();
        }
        {
            let mut sink = CsvFileSink::open(&path).unwrap();
            sink.append(&record("b", 0.2)).unwrap();
        }

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content
            .lines()
            .filter(|l| *l == "timestamp,name,duration")
            .count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_rows_visible_after_each_append() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("probe.csv");
        let mut sink = CsvFileSink::open(&path).unwrap();

        sink.append(&record("a", 0.1)).unwrap();
        // 尚未 drop，資料就必須已在磁碟上
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains(",a,0.1"));
    }

    #[test]
    fn test_parent_directories_created() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("deeper").join("probe.csv");

        let mut sink = CsvFileSink::open(&path).unwrap();
        sink.append(&record("a", 0.1)).unwrap();

        assert!(path.exists());
    }
}
