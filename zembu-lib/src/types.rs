//! Core data types for the batch availability engine.
//!
//! This module defines all the main data structures used throughout the
//! library: word-list entries, candidate domains, availability states,
//! run summaries, and configuration options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One entry from the word list.
///
/// The word is lowercase, trimmed and non-empty; annotations preserve the
/// order they had in the source file and may be empty. Entries are created
/// once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// The candidate word (e.g. "zephyr")
    pub word: String,

    /// Extra metadata fields carried alongside the word (e.g. search-value
    /// hints from a curated list). Empty for bare word lists.
    pub annotations: Vec<String>,
}

impl WordEntry {
    /// Create an entry with no annotations.
    pub fn bare<W: Into<String>>(word: W) -> Self {
        Self {
            word: word.into(),
            annotations: Vec::new(),
        }
    }

    /// Create an entry carrying annotation fields.
    pub fn annotated<W: Into<String>>(word: W, annotations: Vec<String>) -> Self {
        Self {
            word: word.into(),
            annotations,
        }
    }
}

/// One word+TLD pairing to be checked as a domain.
///
/// Candidates are ephemeral: constructed per iteration of the cross product
/// and never shared across checks.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// The word-list entry this candidate was derived from
    pub entry: &'a WordEntry,

    /// TLD without a leading dot (e.g. "com")
    pub tld: &'a str,
}

impl Candidate<'_> {
    /// The full domain name for this candidate, always lowercase.
    pub fn domain(&self) -> String {
        format!("{}.{}", self.entry.word, self.tld).to_ascii_lowercase()
    }
}

/// Tri-state classification of whether a domain appears registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    /// The lookup response carried the "no match" marker
    #[serde(rename = "available")]
    Available,

    /// The lookup responded without the marker (domain appears taken)
    #[serde(rename = "unavailable")]
    Unavailable,

    /// The lookup failed, timed out, or produced no usable output
    #[serde(rename = "unknown")]
    Unknown,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Unavailable => write!(f, "unavailable"),
            Availability::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of checking a single candidate domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The domain name that was checked (e.g. "zephyr.com")
    pub domain: String,

    /// Availability classification for the domain
    pub availability: Availability,
}

/// An available domain together with the source annotations of its word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableDomain {
    /// The full domain name (e.g. "zephyr.com")
    pub domain: String,

    /// Annotations carried over from the word-list entry
    pub annotations: Vec<String>,
}

impl std::fmt::Display for AvailableDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.annotations.is_empty() {
            write!(f, "{}", self.domain)
        } else {
            write!(f, "{} ({})", self.domain, self.annotations.join(", "))
        }
    }
}

/// Snapshot of the effective options a run was started with.
///
/// Embedded in the [`RunSummary`] and persisted in the log's settings block
/// so a saved run records how it was produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsSnapshot {
    /// Path of the dictionary file
    pub dict: String,

    /// TLDs checked, in order
    pub tlds: Vec<String>,

    /// Path the results were written to
    pub log_file: String,

    /// Whether verbose per-check output was active
    pub verbose: bool,

    /// Maximum lookups per second
    pub rate_per_second: u32,

    /// Per-lookup timeout in seconds
    pub timeout_secs: u64,

    /// Bounded retries before a failed lookup is written off as unknown
    pub retries: u32,
}

/// Aggregate result of a batch run, built exactly once at run end.
///
/// A cancelled run still produces a summary covering the candidates that
/// were processed before the interrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tool version that produced this run
    pub version: String,

    /// Number of candidates actually checked
    pub checked: usize,

    /// Number of words in the source list
    pub words: usize,

    /// Number of lookups that could not be classified (warning count)
    pub unknown: usize,

    /// Wall-clock duration of the run in whole seconds
    pub duration_secs: u64,

    /// True when the run was interrupted by the user
    pub cancelled: bool,

    /// The options the run was started with
    pub options: OptionsSnapshot,

    /// Every domain found available, in discovery order
    pub available: Vec<AvailableDomain>,
}

/// Configuration options for the checking engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Maximum lookups per second
    /// Default: 1, minimum: 1
    pub rate_per_second: u32,

    /// Timeout for each individual lookup
    /// Default: 15 seconds
    #[serde(skip)] // Don't serialize Duration directly
    pub lookup_timeout: Duration,

    /// How many times a retryable lookup failure is retried before the
    /// candidate is classified as unknown
    /// Default: 0 (no retries)
    pub unknown_retries: u32,
}

impl Default for CheckConfig {
    /// Create a sensible default configuration.
    ///
    /// Conservative pacing: one lookup per second, no retries.
    fn default() -> Self {
        Self {
            rate_per_second: 1,
            lookup_timeout: Duration::from_secs(15),
            unknown_retries: 0,
        }
    }
}

impl CheckConfig {
    /// Set the maximum lookups per second. Values below 1 are clamped to 1.
    pub fn with_rate(mut self, rate_per_second: u32) -> Self {
        self.rate_per_second = rate_per_second.max(1);
        self
    }

    /// Set the per-lookup timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the bounded retry count for retryable lookup failures.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.unknown_retries = retries;
        self
    }
}
