//! # Zembu Library
//!
//! A library for bulk-checking whether dictionary words are available as
//! domain names, querying the system `whois` command at a bounded rate.
//!
//! The core is the rate-limited batch query engine: word-list loading,
//! per-domain availability classification via an external lookup, enforced
//! query pacing, progress reporting, cooperative cancellation, and durable
//! result logging.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zembu_lib::{BatchRunner, CancelFlag, CheckConfig, DomainChecker, OptionsSnapshot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let words = zembu_lib::load_word_list("words.txt")?;
//!     let tlds = vec!["com".to_string()];
//!
//!     let runner = BatchRunner::new(words, tlds, OptionsSnapshot::default());
//!     let checker = DomainChecker::with_config(CheckConfig::default());
//!
//!     let summary = runner.run(&checker, &CancelFlag::new(), |_event| Ok(())).await;
//!     println!("{} available domains", summary.available.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Bounded pacing**: lookups are serialized with an enforced minimum
//!   gap, measured from one call's completion to the next call's start
//! - **Partial-failure tolerance**: a failed lookup classifies as unknown
//!   and never aborts the batch
//! - **Cooperative cancellation**: an interrupted run still finalizes and
//!   persists the results gathered so far
//! - **Hardened invocation**: domains are charset-validated and passed to
//!   the lookup subprocess as a single literal argument

// Re-export main public API types and functions
// This makes them available as zembu_lib::TypeName
pub use checker::{DomainCheck, DomainChecker, Lookup};
pub use config::{load_env_config, ConfigManager, DefaultsConfig, EnvConfig, FileConfig};
pub use error::ZembuError;
pub use logger::{ResultLogger, SettingsBlock};
pub use ratelimit::RateLimiter;
pub use runner::{BatchRunner, CancelFlag, ProgressEvent};
pub use types::{
    Availability, AvailableDomain, Candidate, CheckConfig, CheckResult, OptionsSnapshot,
    RunSummary, WordEntry,
};
pub use utils::{normalize_tlds, validate_domain};
pub use whois::WhoisClient;
pub use wordlist::{load_word_list, ListLayout};

// Internal modules
mod checker;
mod config;
mod error;
mod logger;
mod ratelimit;
mod runner;
mod types;
mod utils;
mod whois;
mod wordlist;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, ZembuError>;

// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
