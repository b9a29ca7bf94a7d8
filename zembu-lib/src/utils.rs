//! Utility functions for domain and TLD processing.
//!
//! This module contains the strict charset validation applied to candidate
//! domains before they reach the lookup subprocess, plus TLD list
//! normalization shared by the CLI and the config layer.

use crate::error::ZembuError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Word lists are untrusted input; anything outside this charset never
    // reaches the lookup subprocess.
    static ref DOMAIN_RE: Regex = Regex::new(r"^[a-z0-9.-]+$").expect("valid domain regex");
}

/// Validate a candidate domain against the safe charset `[a-z0-9.-]+`.
///
/// The lookup is an external subprocess, so domains are restricted to a
/// strict allow-list of characters even though invocation uses an argument
/// vector rather than a shell string.
///
/// # Returns
///
/// `Ok(())` if safe, `Err(ZembuError::InvalidDomain)` otherwise.
pub fn validate_domain(domain: &str) -> Result<(), ZembuError> {
    if domain.is_empty() {
        return Err(ZembuError::invalid_domain(domain, "domain is empty"));
    }

    if !DOMAIN_RE.is_match(domain) {
        return Err(ZembuError::invalid_domain(
            domain,
            "contains characters outside [a-z0-9.-]",
        ));
    }

    Ok(())
}

/// Normalize a comma-separated TLD list into clean suffixes.
///
/// Trims whitespace, lowercases, strips leading dots, and drops empty
/// fields. `"COM, .net,,"` becomes `["com", "net"]`.
pub fn normalize_tlds(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|tld| tld.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|tld| !tld.is_empty())
        .collect()
}
