//! Terminal output for the zembu CLI.
//!
//! This module handles the overwritten progress line, the verbose
//! per-check output, and the final summary. The progress line writes to
//! stderr so stdout stays clean, and disappears entirely when stderr is
//! not a terminal. Uses only the `console` crate.

use console::{style, Term};
use std::io;
use zembu_lib::{Availability, ProgressEvent, RunSummary};

/// A single overwritten progress line on stderr.
///
/// Renders `[ 42.123%] domain` for the most recent check. Silently does
/// nothing when stderr is not a TTY.
pub struct ProgressLine {
    term: Term,
    enabled: bool,
}

impl ProgressLine {
    pub fn new() -> Self {
        let term = Term::stderr();
        let enabled = term.is_term();
        Self { term, enabled }
    }

    /// Redraw the line for the given progress event.
    pub fn update(&self, event: &ProgressEvent<'_>) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let percent = (event.index as f64 / event.total as f64) * 100.0;
        self.term.clear_line()?;
        self.term
            .write_str(&format!("[{:7.3}%] {}", percent, event.domain))
    }

    /// Clear the line once the run is over.
    pub fn finish(&self) {
        if self.enabled {
            let _ = self.term.clear_line();
        }
    }
}

impl Default for ProgressLine {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the banner shown before the batch starts.
pub fn print_intro(total: usize, log_file: &str) {
    println!(
        "Checking {} domain names. This might take a while.",
        total
    );
    println!("Upon completion, the results will be saved to {}.", log_file);
    println!("The escape sequence is ^C.");
}

/// Verbose mode: one line per check, showing the issued command and the
/// outcome, instead of the progress line.
pub fn print_verbose_check(event: &ProgressEvent<'_>) {
    let outcome = match event.availability {
        Availability::Available => style("available").green().bold(),
        Availability::Unavailable => style("taken").dim(),
        Availability::Unknown => style("unknown").yellow(),
    };
    println!("whois {}  {}", event.domain, outcome);
}

/// Print the list of discovered available domains.
pub fn print_available(summary: &RunSummary) {
    if summary.available.is_empty() {
        println!("No available domains were found.");
        return;
    }

    println!("The following domains are available:");
    for domain in &summary.available {
        println!("{}", style(domain).green());
    }
}

/// Print the final summary bar with colored counts.
pub fn print_summary(summary: &RunSummary) {
    let taken = summary.checked - summary.available.len() - summary.unknown;
    println!(
        "{} domain{} in {}s  {}  {}  {}  {}  {}  {}",
        style(summary.checked).bold(),
        if summary.checked == 1 { "" } else { "s" },
        summary.duration_secs,
        style("|").dim(),
        style(format!("{} available", summary.available.len())).green(),
        style("|").dim(),
        style(format!("{} taken", taken)).red(),
        style("|").dim(),
        style(format!("{} unknown", summary.unknown)).yellow(),
    );
}
