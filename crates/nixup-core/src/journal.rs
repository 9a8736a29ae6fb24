use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The update log could not be written. Callers treat this as fatal.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to open update log {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },
    #[error("failed to write update log {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl LogError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

pub fn format_log_record(timestamp: NaiveDateTime, body: &str) -> String {
    format!("\n[{}]\n{body}\n", timestamp.format(LOG_TIMESTAMP_FORMAT))
}

/// Append-only text log of update runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateLog {
    path: PathBuf,
}

impl UpdateLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, body: &str) -> Result<(), LogError> {
        self.append_at(body, Local::now().naive_local())
    }

    pub fn append_at(&self, body: &str, timestamp: NaiveDateTime) -> Result<(), LogError> {
        let mut file = self.open_for_append().map_err(|source| LogError::Open {
            path: self.path.clone(),
            source,
        })?;
        let record = format_log_record(timestamp, body);
        file.write_all(record.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| LogError::Write {
                path: self.path.clone(),
                source,
            })
    }

    fn open_for_append(&self) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o644);
        }
        options.open(&self.path)
    }
}
