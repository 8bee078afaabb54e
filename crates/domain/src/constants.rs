//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use chrono::{DateTime, Utc};

// Ticket search configuration
pub const DEFAULT_PER_PAGE: usize = 100;
pub const MAX_SEARCH_RESULTS: usize = 500;
pub const PAGE_COURTESY_DELAY_MS: u64 = 500;
pub const WIDEN_SEARCH_LOOKBACK_HOURS: i64 = 24;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Probe dispatch configuration
pub const PROBE_SEND_DELAY_MS: u64 = 500;

/// Timestamp format accepted by the help-desk search API.
pub const API_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Render a timestamp in the help-desk API filter format.
pub fn format_api_timestamp(at: &DateTime<Utc>) -> String {
    at.format(API_TIMESTAMP_FORMAT).to_string()
}

/// The subject tag correlating a probe email to the ticket it produced.
///
/// This exact bracketed form is the sole contract between the dispatch
/// step and ticket verification; it may appear anywhere in the subject.
pub fn subject_tag(sequence_number: u64) -> String {
    format!("[TEST-TKT-{sequence_number}]")
}
