//! Batch driving of the availability checks.
//!
//! `BatchRunner` iterates the full cross product of words × TLDs in
//! word-major, TLD-minor order, drives the checker through the
//! [`DomainCheck`] seam, aggregates the available domains, and emits a
//! progress event after every candidate. A run can be cancelled
//! cooperatively at any candidate boundary; the partial results are
//! finalized into a summary rather than discarded.

use crate::checker::DomainCheck;
use crate::types::{Availability, AvailableDomain, Candidate, OptionsSnapshot, RunSummary, WordEntry};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared cancellation flag, set once by the interrupt handler and polled
/// by the runner before each candidate.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Progress notification emitted after every checked candidate.
#[derive(Debug, Clone)]
pub struct ProgressEvent<'a> {
    /// Number of candidates processed so far (1-based)
    pub index: usize,

    /// Total number of candidates in the run
    pub total: usize,

    /// The domain that was just checked
    pub domain: &'a str,

    /// Its classification
    pub availability: Availability,
}

/// Drives a full batch run over the word × TLD cross product.
///
/// The runner owns the word list for the run's lifetime; candidates are
/// constructed per iteration and never shared across checks.
pub struct BatchRunner {
    words: Vec<WordEntry>,
    tlds: Vec<String>,
    options: OptionsSnapshot,
}

impl BatchRunner {
    /// Create a runner over a loaded word list and TLD set.
    pub fn new(words: Vec<WordEntry>, tlds: Vec<String>, options: OptionsSnapshot) -> Self {
        Self {
            words,
            tlds,
            options,
        }
    }

    /// Total number of candidates this run will produce.
    pub fn total(&self) -> usize {
        self.words.len() * self.tlds.len()
    }

    /// Run the batch to completion or cancellation.
    ///
    /// For each candidate the checker is invoked synchronously (pacing is
    /// the checker's concern), the result is aggregated, and `on_progress`
    /// is called regardless of outcome. A failing progress callback is
    /// logged and swallowed; display problems must not abort the batch.
    ///
    /// Returns the [`RunSummary`], built exactly once, with `cancelled`
    /// set when the run was interrupted.
    pub async fn run<F>(
        &self,
        checker: &dyn DomainCheck,
        cancel: &CancelFlag,
        mut on_progress: F,
    ) -> RunSummary
    where
        F: FnMut(&ProgressEvent<'_>) -> std::io::Result<()>,
    {
        let total = self.total();
        let started = Instant::now();

        let mut available: Vec<AvailableDomain> = Vec::new();
        let mut unknown = 0usize;
        let mut checked = 0usize;
        let mut cancelled = false;

        'words: for entry in &self.words {
            for tld in &self.tlds {
                if cancel.is_cancelled() {
                    cancelled = true;
                    break 'words;
                }

                let candidate = Candidate { entry, tld };
                let domain = candidate.domain();

                let availability = checker.check(&domain).await;
                checked += 1;

                match availability {
                    Availability::Available => available.push(AvailableDomain {
                        domain: domain.clone(),
                        annotations: entry.annotations.clone(),
                    }),
                    Availability::Unknown => unknown += 1,
                    Availability::Unavailable => {}
                }

                let event = ProgressEvent {
                    index: checked,
                    total,
                    domain: &domain,
                    availability,
                };
                if let Err(e) = on_progress(&event) {
                    tracing::warn!("progress display failed: {}", e);
                }
            }
        }

        // A cancellation arriving after the last candidate changes nothing.
        if cancel.is_cancelled() {
            cancelled = checked < total;
        }

        RunSummary {
            version: crate::VERSION.to_string(),
            checked,
            words: self.words.len(),
            unknown,
            duration_secs: started.elapsed().as_secs(),
            cancelled,
            options: self.options.clone(),
            available,
        }
    }
}
