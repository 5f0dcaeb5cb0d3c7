use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::contracts::types::serialize_total;
use crate::state::map_io_error;
use crate::{ClientError, ClientResult};

pub const LOG_TITLE: &str = "Calculation Results";
const TIMESTAMP_PREFIX: &str = "Timestamp: ";
const RESULT_LABEL_PREFIX: &str = "Result for ";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationLogEntry {
    pub label: String,
    #[serde(serialize_with = "serialize_total")]
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStatus {
    Created,
    Appending,
}

impl LogStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Appending => "appending",
        }
    }
}

/// Sink for the record an accumulator writes after every successful operation.
pub trait ResultLog {
    fn record(&mut self, entry: &CalculationLogEntry) -> ClientResult<()>;
}

impl ResultLog for Vec<CalculationLogEntry> {
    fn record(&mut self, entry: &CalculationLogEntry) -> ClientResult<()> {
        self.push(entry.clone());
        Ok(())
    }
}

/// Append-only CSV log. Each entry becomes two rows: the label, then the total.
#[derive(Debug, Clone)]
pub struct CsvResultLog {
    path: PathBuf,
    status: LogStatus,
}

impl CsvResultLog {
    /// Opens the log at `path`, writing the header block only when the file is
    /// new. An existing file is never truncated.
    pub fn open(path: &Path) -> ClientResult<Self> {
        let created = OpenOptions::new().write(true).create_new(true).open(path);
        let status = match created {
            Ok(file) => {
                discard_on_failure(path, write_header(path, file))?;
                info!(path = %path.display(), "created calculation log");
                LogStatus::Created
            }
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "calculation log exists, appending");
                LogStatus::Appending
            }
            Err(error) => return Err(map_io_error(path, &error)),
        };

        Ok(Self {
            path: path.to_path_buf(),
            status,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn status(&self) -> LogStatus {
        self.status
    }
}

impl ResultLog for CsvResultLog {
    fn record(&mut self, entry: &CalculationLogEntry) -> ClientResult<()> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|error| write_failed(&self.path, &error))?;
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(file);

        writer
            .write_record([entry.label.as_str()])
            .map_err(|error| write_failed(&self.path, &error))?;
        writer
            .write_record([entry.value.to_string()])
            .map_err(|error| write_failed(&self.path, &error))?;
        writer
            .flush()
            .map_err(|error| write_failed(&self.path, &error))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationHistory {
    pub title: Option<String>,
    pub created_at: Option<String>,
    pub entries: Vec<CalculationLogEntry>,
}

/// Reads a calculation log back for display. Rows that are neither part of
/// the header block nor a label/value pair are skipped.
pub fn read_history(path: &Path) -> ClientResult<CalculationHistory> {
    let file = File::open(path).map_err(|error| {
        if error.kind() == ErrorKind::NotFound {
            ClientError::calc_log_not_found(path)
        } else {
            map_io_error(path, &error)
        }
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut history = CalculationHistory {
        title: None,
        created_at: None,
        entries: Vec::new(),
    };
    let mut pending_label: Option<String> = None;

    for result_row in reader.records() {
        let record = result_row.map_err(|error| {
            ClientError::calc_log_init_failed(path, &format!("unreadable log row: {error}"))
        })?;
        let Some(first) = record.get(0).map(str::trim) else {
            continue;
        };
        if first.is_empty() {
            continue;
        }

        if first == LOG_TITLE {
            history.title = Some(first.to_string());
        } else if let Some(stamp) = first.strip_prefix(TIMESTAMP_PREFIX) {
            history.created_at = Some(stamp.trim().to_string());
        } else if first.starts_with(RESULT_LABEL_PREFIX) {
            pending_label = Some(first.to_string());
        } else if let Ok(value) = first.parse::<f64>()
            && let Some(label) = pending_label.take()
        {
            history.entries.push(CalculationLogEntry { label, value });
        }
    }

    Ok(history)
}

pub(crate) fn result_label(operation_name: &str) -> String {
    format!("{RESULT_LABEL_PREFIX}{operation_name}:")
}

fn write_header(path: &Path, file: File) -> ClientResult<()> {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(file);

    writer
        .write_record([LOG_TITLE])
        .map_err(|error| init_failed(path, &error))?;
    writer
        .write_record([format!("{TIMESTAMP_PREFIX}{timestamp}")])
        .map_err(|error| init_failed(path, &error))?;
    writer.flush().map_err(|error| init_failed(path, &error))?;

    // csv writes an empty record as `""`, so the separator row goes out raw.
    let mut file = writer
        .into_inner()
        .map_err(|error| init_failed(path, error.error()))?;
    file.write_all(b"\n")
        .and_then(|()| file.flush())
        .map_err(|error| init_failed(path, &error))
}

/// A log whose header could not be written is removed, so the next open
/// starts over instead of appending to a headerless file.
fn discard_on_failure(path: &Path, header: ClientResult<()>) -> ClientResult<()> {
    if header.is_err() {
        let _ = fs::remove_file(path);
    }
    header
}

fn init_failed(path: &Path, error: &dyn std::fmt::Display) -> ClientError {
    ClientError::calc_log_init_failed(path, &error.to_string())
}

fn write_failed(path: &Path, error: &dyn std::fmt::Display) -> ClientError {
    ClientError::calc_log_write_failed(path, &error.to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{
        CalculationLogEntry, CsvResultLog, LogStatus, ResultLog, discard_on_failure, read_history,
    };
    use crate::ClientError;

    #[test]
    fn new_log_starts_with_title_timestamp_and_blank_row() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let path = temp_dir.path().join("calculations.csv");
            let log = CsvResultLog::open(&path);
            assert!(log.is_ok());
            if let Ok(value) = log {
                assert_eq!(value.status(), LogStatus::Created);
            }

            let content = fs::read_to_string(&path).unwrap_or_default();
            let lines = content.lines().collect::<Vec<&str>>();
            assert_eq!(lines.len(), 3);
            assert_eq!(lines[0], "Calculation Results");
            assert!(lines[1].starts_with("Timestamp: "));
            assert_eq!(lines[2], "");
        }
    }

    #[test]
    fn reopening_keeps_prior_content() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let path = temp_dir.path().join("calculations.csv");
            let first = CsvResultLog::open(&path);
            assert!(first.is_ok());
            if let Ok(mut log) = first {
                let written = log.record(&CalculationLogEntry {
                    label: "Result for addition:".to_string(),
                    value: 6.0,
                });
                assert!(written.is_ok());
            }

            let second = CsvResultLog::open(&path);
            assert!(second.is_ok());
            if let Ok(log) = second {
                assert_eq!(log.status(), LogStatus::Appending);
            }

            let history = read_history(&path);
            assert!(history.is_ok());
            if let Ok(value) = history {
                assert_eq!(value.title.as_deref(), Some("Calculation Results"));
                assert!(value.created_at.is_some());
                assert_eq!(value.entries.len(), 1);
                assert_eq!(value.entries[0].label, "Result for addition:");
                assert_eq!(value.entries[0].value, 6.0);
            }
        }
    }

    #[test]
    fn history_tolerates_trailing_spaces_in_labels() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let path = temp_dir.path().join("calculations.csv");
            let seeded = fs::write(
                &path,
                "Calculation Results\nTimestamp: 2025-01-02 03:04:05\n\nResult for division: \n-280.0\n",
            );
            assert!(seeded.is_ok());

            let history = read_history(&path);
            assert!(history.is_ok());
            if let Ok(value) = history {
                assert_eq!(value.created_at.as_deref(), Some("2025-01-02 03:04:05"));
                assert_eq!(value.entries.len(), 1);
                assert_eq!(value.entries[0].label, "Result for division:");
                assert_eq!(value.entries[0].value, -280.0);
            }
        }
    }

    #[test]
    fn failed_header_leaves_no_file_behind() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let path = temp_dir.path().join("calculations.csv");
            let partial = fs::write(&path, "Calculation Results\n");
            assert!(partial.is_ok());

            let result = discard_on_failure(
                &path,
                Err(ClientError::calc_log_init_failed(&path, "disk full")),
            );
            assert!(result.is_err());
            assert!(!path.exists());

            let reopened = CsvResultLog::open(&path);
            assert!(reopened.is_ok());
            if let Ok(log) = reopened {
                assert_eq!(log.status(), LogStatus::Created);
            }
        }
    }

    #[test]
    fn successful_header_is_kept() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let path = temp_dir.path().join("calculations.csv");
            let seeded = fs::write(&path, "Calculation Results\n");
            assert!(seeded.is_ok());
            assert!(discard_on_failure(&path, Ok(())).is_ok());
            assert!(path.exists());
        }
    }

    #[test]
    fn missing_log_is_reported_as_not_found() {
        let temp = tempdir();
        assert!(temp.is_ok());
        if let Ok(temp_dir) = temp {
            let result = read_history(&temp_dir.path().join("absent.csv"));
            assert!(result.is_err());
            if let Err(error) = result {
                assert_eq!(error.code, "calc_log_not_found");
            }
        }
    }
}
