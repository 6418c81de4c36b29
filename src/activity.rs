//! Append-only record of which nicknames went to whom.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;

/// File name of the activity log inside the log directory.
pub const ACTIVITY_LOG_FILE: &str = "machine_animale.log";

#[derive(Debug, thiserror::Error)]
#[error("failed to append to activity log {path}: {source}")]
pub struct ActivityError {
  path: PathBuf,
  #[source]
  source: std::io::Error,
}

/// Destination for sent-batch records.
pub trait ActivitySink {
  fn record(&self, at: NaiveDateTime, player: &str, nicknames: &[String]) -> Result<(), ActivityError>;
}

/// Activity log stored as one line per batch.
pub struct ActivityLog {
  path: PathBuf,
}

impl ActivityLog {
  pub fn new(log_dir: impl Into<PathBuf>) -> Self {
    Self {
      path: log_dir.into().join(ACTIVITY_LOG_FILE),
    }
  }

  fn append(&self, line: &str) -> std::io::Result<()> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new()
      .create(true)
      .append(true)
      .open(&self.path)?;
    file.write_all(line.as_bytes())
  }
}

impl ActivitySink for ActivityLog {
  fn record(&self, at: NaiveDateTime, player: &str, nicknames: &[String]) -> Result<(), ActivityError> {
    self
      .append(&format_entry(at, player, nicknames))
      .map_err(|source| ActivityError {
        path: self.path.clone(),
        source,
      })
  }
}

/// Sink that discards every record. Used for dry runs.
pub struct NoopActivity;

impl ActivitySink for NoopActivity {
  fn record(&self, _at: NaiveDateTime, _player: &str, _nicknames: &[String]) -> Result<(), ActivityError> {
    Ok(()) // Discard
  }
}

fn format_entry(at: NaiveDateTime, player: &str, nicknames: &[String]) -> String {
  format!(
    "type=animals, date={}, player={}, value={}\n",
    at.format("%Y-%m-%dT%H:%M:%S"),
    player,
    nicknames.join(";")
  )
}
