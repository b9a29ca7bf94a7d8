//! WHOIS lookup via the system's `whois` command.
//!
//! The lookup mechanism is deliberately opaque: a single external call per
//! domain, consuming only the response text and the exit status. The domain
//! is passed as a single literal argument, never interpolated into a shell
//! string, and is charset-validated before it gets here.

use crate::checker::Lookup;
use crate::error::ZembuError;
use crate::types::Availability;
use futures::future::BoxFuture;
use std::time::Duration;
use tokio::process::Command;

/// Case-insensitive marker that classifies a response as "available".
///
/// This single substring heuristic is the whole of the response grammar we
/// depend on.
const AVAILABLE_MARKER: &str = "no match for";

/// Classify a raw lookup response.
///
/// A response containing the marker (in any case) means the registry found
/// no record for the domain; anything else is treated as registered.
pub fn classify(output: &str) -> Availability {
    if output.to_lowercase().contains(AVAILABLE_MARKER) {
        Availability::Available
    } else {
        Availability::Unavailable
    }
}

/// WHOIS client invoking the system's `whois` command-line tool.
#[derive(Debug, Clone)]
pub struct WhoisClient {
    /// Timeout for a single lookup
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new WHOIS client with the default 15 second timeout.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }

    /// Create a new WHOIS client with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Look up a single domain and classify the response.
    ///
    /// # Errors
    ///
    /// Returns `ZembuError::WhoisError` if the `whois` command cannot be
    /// executed or exits non-zero without usable output, and
    /// `ZembuError::Timeout` if the lookup exceeds the configured budget.
    /// The checker maps both to `Availability::Unknown`.
    pub async fn check_domain(&self, domain: &str) -> Result<Availability, ZembuError> {
        match tokio::time::timeout(self.timeout, self.execute(domain)).await {
            Ok(result) => result,
            Err(_) => Err(ZembuError::timeout("whois lookup", self.timeout)),
        }
    }

    /// Execute the whois command and classify its output.
    async fn execute(&self, domain: &str) -> Result<Availability, ZembuError> {
        tracing::debug!("running: whois {}", domain);

        // Argument-vector invocation: the domain is one literal argv entry.
        let output = Command::new("whois")
            .arg(domain)
            .output()
            .await
            .map_err(|e| {
                ZembuError::whois(
                    domain,
                    format!(
                        "failed to execute whois command: {}. Make sure 'whois' is installed.",
                        e
                    ),
                )
            })?;

        let text = String::from_utf8_lossy(&output.stdout);

        // Some registries exit non-zero on a no-match response, so the exit
        // status only matters when there is no output to classify.
        if !output.status.success() && text.trim().is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ZembuError::whois(
                domain,
                format!(
                    "exited with {} and no output: {}",
                    output.status,
                    stderr.trim()
                ),
            ));
        }

        Ok(classify(&text))
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl Lookup for WhoisClient {
    fn lookup<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Availability, ZembuError>> {
        Box::pin(self.check_domain(domain))
    }
}
