//! Durable result logging.
//!
//! The log target is probed for writability *before* the batch run starts,
//! so a multi-hour run is never lost to an unwritable destination
//! discovered only at the end. The written log is a deterministic text
//! block: header line, pretty-printed settings, a separator, then the
//! newline-joined available domains.

use crate::error::ZembuError;
use crate::types::{OptionsSnapshot, RunSummary};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The machine-readable settings block embedded in every log file.
///
/// Written as pretty-printed JSON between the header line and the `----`
/// separator; [`SettingsBlock::parse`] recovers it from a saved log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsBlock {
    /// Tool version that produced the run
    pub version: String,

    /// Wall-clock duration of the run in whole seconds
    pub duration: u64,

    /// Number of candidates checked
    pub checked: usize,

    /// Number of words in the source list
    pub words: usize,

    /// Number of available domains found
    pub available: usize,

    /// Number of lookups that could not be classified
    pub unknown: usize,

    /// The options the run was started with
    pub options: OptionsSnapshot,
}

impl SettingsBlock {
    /// Build the settings block for a finished run.
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            version: summary.version.clone(),
            duration: summary.duration_secs,
            checked: summary.checked,
            words: summary.words,
            available: summary.available.len(),
            unknown: summary.unknown,
            options: summary.options.clone(),
        }
    }

    /// Recover the settings block from a saved log's text.
    ///
    /// # Errors
    ///
    /// Returns `ZembuError::ParseError` if the log does not contain a
    /// settings block followed by the separator line.
    pub fn parse(log_text: &str) -> Result<Self, ZembuError> {
        let start = log_text.find('{').ok_or_else(|| ZembuError::ParseError {
            message: "log contains no settings block".to_string(),
        })?;
        let end = log_text.find("\n----").ok_or_else(|| ZembuError::ParseError {
            message: "log contains no separator".to_string(),
        })?;

        if end <= start {
            return Err(ZembuError::ParseError {
                message: "separator precedes settings block".to_string(),
            });
        }

        Ok(serde_json::from_str(&log_text[start..end])?)
    }
}

/// Writes a run's results to durable storage.
pub struct ResultLogger {
    path: PathBuf,
}

impl ResultLogger {
    /// Create a logger targeting the given path. Nothing is written until
    /// [`ResultLogger::write`] is called.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The log target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Probe the log target for writability.
    ///
    /// Must be called before the batch run starts. The probe opens the file
    /// for writing without truncating it, so an existing log survives until
    /// the run actually produces a summary.
    ///
    /// # Errors
    ///
    /// Returns `ZembuError::LogError` if the target cannot be opened for
    /// writing (e.g. it is a directory or sits in a read-only location).
    pub fn preflight(&self) -> Result<(), ZembuError> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map(drop)
            .map_err(|e| ZembuError::log_error(self.path.to_string_lossy(), e.to_string()))
    }

    /// Write the run summary to the log target.
    ///
    /// Called exactly once per run, after the batch returns, whether it
    /// completed or was cancelled. Output layout:
    ///
    /// ```text
    /// zembu v0.2.0: 2016-04-12 09:30:00 UTC:
    /// { ...settings block... }
    /// ----
    /// domain1.com
    /// domain2.com (annotation)
    /// ```
    pub fn write(&self, summary: &RunSummary) -> Result<(), ZembuError> {
        let settings = SettingsBlock::from_summary(summary);
        let now = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let mut body = String::new();
        body.push_str(&format!("zembu v{}: {}:\n", summary.version, now));
        body.push_str(&serde_json::to_string_pretty(&settings)?);
        body.push_str("\n----\n");
        for domain in &summary.available {
            body.push_str(&domain.to_string());
            body.push('\n');
        }

        let mut file = std::fs::File::create(&self.path)
            .map_err(|e| ZembuError::log_error(self.path.to_string_lossy(), e.to_string()))?;
        file.write_all(body.as_bytes())
            .map_err(|e| ZembuError::log_error(self.path.to_string_lossy(), e.to_string()))?;

        tracing::debug!(
            "saved {} available domains to {}",
            summary.available.len(),
            self.path.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AvailableDomain;
    use tempfile::tempdir;

    fn sample_summary() -> RunSummary {
        RunSummary {
            version: "0.2.0".to_string(),
            checked: 6,
            words: 3,
            unknown: 1,
            duration_secs: 42,
            cancelled: false,
            options: OptionsSnapshot {
                dict: "words.txt".to_string(),
                tlds: vec!["com".to_string(), "net".to_string()],
                log_file: "zembu_output.log".to_string(),
                verbose: false,
                rate_per_second: 1,
                timeout_secs: 15,
                retries: 0,
            },
            available: vec![
                AvailableDomain {
                    domain: "zephyr.com".to_string(),
                    annotations: vec![],
                },
                AvailableDomain {
                    domain: "zulu.net".to_string(),
                    annotations: vec!["high".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_write_produces_expected_structure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");
        let logger = ResultLogger::new(&path);

        logger.write(&sample_summary()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("zembu v0.2.0: "));
        assert!(header.contains("UTC"));

        assert!(text.contains("\n----\n"));
        assert!(text.contains("zephyr.com\n"));
        assert!(text.contains("zulu.net (high)\n"));
        assert!(text.ends_with('\n'));

        // Domain list comes after the separator
        let after_sep = text.split("\n----\n").nth(1).unwrap();
        assert_eq!(after_sep, "zephyr.com\nzulu.net (high)\n");
    }

    #[test]
    fn test_settings_block_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");
        let logger = ResultLogger::new(&path);

        let summary = sample_summary();
        logger.write(&summary).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed = SettingsBlock::parse(&text).unwrap();

        assert_eq!(parsed, SettingsBlock::from_summary(&summary));
        assert_eq!(parsed.checked, 6);
        assert_eq!(parsed.words, 3);
        assert_eq!(parsed.available, 2);
        assert_eq!(parsed.duration, 42);
        assert_eq!(parsed.options, summary.options);
    }

    #[test]
    fn test_preflight_rejects_directory_target() {
        let dir = tempdir().unwrap();
        let logger = ResultLogger::new(dir.path());

        let err = logger.preflight().unwrap_err();
        assert!(matches!(err, ZembuError::LogError { .. }));
    }

    #[test]
    fn test_preflight_rejects_missing_parent() {
        let dir = tempdir().unwrap();
        let logger = ResultLogger::new(dir.path().join("missing").join("out.log"));

        assert!(logger.preflight().is_err());
    }

    #[test]
    fn test_preflight_does_not_truncate_existing_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "previous run\n").unwrap();

        let logger = ResultLogger::new(&path);
        logger.preflight().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous run\n");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SettingsBlock::parse("not a log").is_err());
        assert!(SettingsBlock::parse("{}\nno separator").is_err());
    }
}
