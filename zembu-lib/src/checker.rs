//! Main domain checker implementation.
//!
//! `DomainChecker` ties the pieces together: charset validation, the rate
//! limiter, the raw lookup, and the bounded retry policy. Its public
//! contract is infallible: every lookup failure is absorbed into
//! `Availability::Unknown` so a single bad response can never abort a
//! multi-hour batch.

use crate::error::ZembuError;
use crate::ratelimit::RateLimiter;
use crate::types::{Availability, CheckConfig, CheckResult};
use crate::utils::validate_domain;
use crate::whois::WhoisClient;
use futures::future::BoxFuture;
use tokio::sync::Mutex;

/// The raw lookup seam: one external call, one classified response.
///
/// `WhoisClient` is the production implementation; tests substitute
/// scripted lookups to exercise pacing and the retry policy without a
/// network or a `whois` binary.
pub trait Lookup: Send + Sync {
    fn lookup<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Result<Availability, ZembuError>>;
}

/// What the batch runner consumes: an infallible availability check.
pub trait DomainCheck: Send + Sync {
    fn check<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Availability>;
}

/// Rate-limited, retrying availability checker.
///
/// Checks are serialized through the rate limiter, so consecutive lookups
/// are separated by at least `1 / rate_per_second` seconds measured from
/// the previous call's completion.
///
/// # Example
///
/// ```rust,no_run
/// use zembu_lib::DomainChecker;
///
/// #[tokio::main]
/// async fn main() {
///     let checker = DomainChecker::new();
///     let availability = checker.check_domain("example.com").await;
///     println!("example.com is {}", availability);
/// }
/// ```
pub struct DomainChecker<L: Lookup = WhoisClient> {
    /// Configuration settings for this checker instance
    config: CheckConfig,

    /// The raw lookup implementation
    lookup: L,

    /// Serializes lookups and owns the pacing timestamp
    limiter: Mutex<RateLimiter>,
}

impl DomainChecker<WhoisClient> {
    /// Create a checker with default configuration and the system whois
    /// lookup.
    ///
    /// Default settings: 1 lookup/second, 15s timeout, no retries.
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker with custom configuration and the system whois
    /// lookup.
    pub fn with_config(config: CheckConfig) -> Self {
        let lookup = WhoisClient::with_timeout(config.lookup_timeout);
        Self::with_lookup(lookup, config)
    }
}

impl Default for DomainChecker<WhoisClient> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lookup> DomainChecker<L> {
    /// Create a checker over an arbitrary lookup implementation.
    pub fn with_lookup(lookup: L, config: CheckConfig) -> Self {
        let limiter = Mutex::new(RateLimiter::new(config.rate_per_second));
        Self {
            config,
            lookup,
            limiter,
        }
    }

    /// Get the current configuration for this checker.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Check availability of a single domain.
    ///
    /// The checking process:
    /// 1. Validates the domain against the safe charset; a rejected
    ///    domain is classified `Unknown` without spawning a lookup.
    /// 2. Runs the lookup through the rate limiter.
    /// 3. Retries retryable failures up to `unknown_retries` times, each
    ///    attempt paced by the limiter.
    /// 4. Maps any remaining failure to `Unknown`.
    pub async fn check_domain(&self, domain: &str) -> Availability {
        if let Err(e) = validate_domain(domain) {
            tracing::warn!("skipping lookup: {}", e);
            return Availability::Unknown;
        }

        let mut attempt: u32 = 0;
        loop {
            let result = {
                let mut limiter = self.limiter.lock().await;
                limiter.throttle(self.lookup.lookup(domain)).await
            };

            match result {
                Ok(availability) => return availability,
                Err(e) if attempt < self.config.unknown_retries && e.is_retryable() => {
                    attempt += 1;
                    tracing::debug!(
                        "lookup for {} failed ({}), retry {}/{}",
                        domain,
                        e,
                        attempt,
                        self.config.unknown_retries
                    );
                }
                Err(e) => {
                    tracing::warn!("lookup for {} failed: {}", domain, e);
                    return Availability::Unknown;
                }
            }
        }
    }

    /// Check a domain and wrap the outcome in a [`CheckResult`].
    pub async fn check(&self, domain: &str) -> CheckResult {
        CheckResult {
            domain: domain.to_string(),
            availability: self.check_domain(domain).await,
        }
    }
}

impl<L: Lookup> DomainCheck for DomainChecker<L> {
    fn check<'a>(&'a self, domain: &'a str) -> BoxFuture<'a, Availability> {
        Box::pin(self.check_domain(domain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Lookup returning a scripted sequence of outcomes.
    struct ScriptedLookup {
        responses: StdMutex<VecDeque<Result<Availability, ZembuError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedLookup {
        fn new(responses: Vec<Result<Availability, ZembuError>>) -> Self {
            Self {
                responses: StdMutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Lookup for ScriptedLookup {
        fn lookup<'a>(
            &'a self,
            _domain: &'a str,
        ) -> BoxFuture<'a, Result<Availability, ZembuError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let response = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Availability::Unavailable));
            Box::pin(async move { response })
        }
    }

    fn fast_config() -> CheckConfig {
        // High rate keeps these tests off the pacing path.
        CheckConfig::default().with_rate(1000)
    }

    #[tokio::test]
    async fn test_successful_lookup_passes_through() {
        let lookup = ScriptedLookup::new(vec![Ok(Availability::Available)]);
        let checker = DomainChecker::with_lookup(lookup, fast_config());

        assert_eq!(
            checker.check_domain("example.com").await,
            Availability::Available
        );
        assert_eq!(checker.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_check_wraps_outcome_with_domain() {
        let lookup = ScriptedLookup::new(vec![Ok(Availability::Available)]);
        let checker = DomainChecker::with_lookup(lookup, fast_config());

        let result = checker.check("example.com").await;
        assert_eq!(result.domain, "example.com");
        assert_eq!(result.availability, Availability::Available);
    }

    #[tokio::test]
    async fn test_failure_maps_to_unknown_without_retry_by_default() {
        let lookup = ScriptedLookup::new(vec![
            Err(ZembuError::whois("example.com", "exec failed")),
            Ok(Availability::Available),
        ]);
        let checker = DomainChecker::with_lookup(lookup, fast_config());

        assert_eq!(
            checker.check_domain("example.com").await,
            Availability::Unknown
        );
        assert_eq!(checker.lookup.call_count(), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_transient_failure() {
        let lookup = ScriptedLookup::new(vec![
            Err(ZembuError::timeout(
                "whois lookup",
                Duration::from_secs(15),
            )),
            Ok(Availability::Unavailable),
        ]);
        let checker = DomainChecker::with_lookup(lookup, fast_config().with_retries(1));

        assert_eq!(
            checker.check_domain("example.com").await,
            Availability::Unavailable
        );
        assert_eq!(checker.lookup.call_count(), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let lookup = ScriptedLookup::new(vec![
            Err(ZembuError::whois("example.com", "fail 1")),
            Err(ZembuError::whois("example.com", "fail 2")),
            Err(ZembuError::whois("example.com", "fail 3")),
        ]);
        let checker = DomainChecker::with_lookup(lookup, fast_config().with_retries(2));

        assert_eq!(
            checker.check_domain("example.com").await,
            Availability::Unknown
        );
        assert_eq!(checker.lookup.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unsafe_domain_never_reaches_lookup() {
        let lookup = ScriptedLookup::new(vec![]);
        let checker = DomainChecker::with_lookup(lookup, fast_config());

        assert_eq!(
            checker.check_domain("example.com; rm -rf /").await,
            Availability::Unknown
        );
        assert_eq!(checker.lookup.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_checks_are_paced_by_rate_limit() {
        let lookup = ScriptedLookup::new(vec![
            Ok(Availability::Unavailable),
            Ok(Availability::Unavailable),
            Ok(Availability::Unavailable),
        ]);
        let checker = DomainChecker::with_lookup(lookup, CheckConfig::default().with_rate(1));

        let start = Instant::now();
        checker.check_domain("a.com").await;
        checker.check_domain("b.com").await;
        checker.check_domain("c.com").await;

        // First call free, then two enforced one-second gaps.
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
