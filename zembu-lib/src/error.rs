//! Error handling for the batch availability engine.
//!
//! This module defines a comprehensive error type that covers all the
//! different ways a run can fail, from unreadable word lists to failed
//! lookup subprocesses.

use std::fmt;

/// Main error type for zembu operations.
///
/// Only configuration and I/O setup errors are fatal to a run; per-domain
/// lookup failures are recovered locally and classified as
/// `Availability::Unknown` by the checker.
#[derive(Debug, Clone)]
pub enum ZembuError {
    /// Word-list file could not be read
    FileError { path: String, message: String },

    /// Word-list file contained no usable entries
    EmptyWordList { path: String },

    /// The log target could not be opened for writing
    LogError { path: String, message: String },

    /// The external whois invocation failed
    WhoisError { domain: String, message: String },

    /// A candidate domain failed charset validation
    InvalidDomain { domain: String, reason: String },

    /// An operation exceeded its wall-clock budget
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Configuration errors (invalid settings, unparseable config files)
    ConfigError { message: String },

    /// Failures parsing structured data (settings block, snapshots)
    ParseError { message: String },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl ZembuError {
    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new empty-word-list error.
    pub fn empty_word_list<P: Into<String>>(path: P) -> Self {
        Self::EmptyWordList { path: path.into() }
    }

    /// Create a new log-target error.
    pub fn log_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::LogError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new whois error.
    pub fn whois<D: Into<String>, M: Into<String>>(domain: D, message: M) -> Self {
        Self::WhoisError {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid-domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error suggests the lookup should be retried.
    ///
    /// Feeds the checker's bounded retry policy: only transient lookup
    /// failures qualify, never validation or configuration errors.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::WhoisError { .. } | Self::Timeout { .. })
    }
}

impl fmt::Display for ZembuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileError { path, message } => {
                write!(f, "cannot read '{}': {}", path, message)
            }
            Self::EmptyWordList { path } => {
                write!(f, "word list '{}' contains no words", path)
            }
            Self::LogError { path, message } => {
                write!(f, "log file '{}' is not available for writing: {}", path, message)
            }
            Self::WhoisError { domain, message } => {
                write!(f, "whois lookup for '{}' failed: {}", domain, message)
            }
            Self::InvalidDomain { domain, reason } => {
                write!(f, "invalid domain '{}': {}", domain, reason)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "timeout after {:?} during: {}", duration, operation)
            }
            Self::ConfigError { message } => {
                write!(f, "configuration error: {}", message)
            }
            Self::ParseError { message } => {
                write!(f, "parse error: {}", message)
            }
            Self::Internal { message } => {
                write!(f, "internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ZembuError {}

// Implement From conversions for common error types
impl From<std::io::Error> for ZembuError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<serde_json::Error> for ZembuError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
        }
    }
}
