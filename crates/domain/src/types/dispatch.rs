//! Probe dispatch types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::verification::{Expectation, SentEmailRecord};

/// One probe email to be dispatched: pre-generated text plus the metadata
/// the resulting ticket is expected to carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeSpec {
    /// Subject line before the sequence tag is prepended
    pub subject: String,
    pub body: String,
    pub expectation: Expectation,
}

/// A probe whose delivery failed; the batch continues without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedProbe {
    /// Full tagged subject that failed to send
    pub subject: String,
    pub reason: String,
}

/// Result of dispatching one probe batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Records for probes that were delivered, in send order
    pub records: Vec<SentEmailRecord>,
    pub failed: Vec<FailedProbe>,
    /// When the batch began; verification uses this as its search window
    pub started_at: DateTime<Utc>,
    pub recipient: String,
}
