//! Verification result types
//!
//! Everything a verification run produces: per-field comparisons, per-ticket
//! results and the batch summary. These values live for one run plus
//! whatever the caller does with them (reports, UI tables); nothing here is
//! persisted by the core.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::subject_tag;
use crate::types::ticket::TicketKind;

/// Sentinel recorded as the expected value when no expectation exists.
pub const DISCOVERY_EXPECTED: &str = "Discovery Mode";

/// What the caller expected the resulting ticket to look like.
///
/// A record either carries the full expectation or none of it; the
/// comparator branches on this as a unit, never per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Expectation {
    /// No expectations recorded; actual values are reported without
    /// judgment. Used for manually-selected historical tickets.
    Discovery,
    /// Fully specified expectation for normal comparison.
    Expected {
        /// Human priority label, e.g. "Priority 2"
        priority: String,
        /// Expected ticket kind
        kind: TicketKind,
        /// `>`-delimited category hierarchy of 1-3 levels,
        /// e.g. "Network>VPN>Down"
        category_path: String,
    },
}

impl Expectation {
    pub fn is_discovery(&self) -> bool {
        matches!(self, Self::Discovery)
    }
}

/// One test email that was dispatched and awaits verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentEmailRecord {
    /// Unique probe sequence number, embedded in the subject tag
    pub sequence_number: u64,
    /// Full subject line as sent (contains the tag)
    pub subject: String,
    /// Expected ticket metadata, or discovery mode
    pub expectation: Expectation,
}

impl SentEmailRecord {
    /// The bracketed tag this record's ticket must carry in its subject.
    pub fn subject_tag(&self) -> String {
        subject_tag(self.sequence_number)
    }
}

/// Fields compared between an expectation and a ticket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Priority,
    Urgency,
    Impact,
    Type,
    Category,
    SubCategory,
    Item,
    Group,
}

impl FieldName {
    /// Every field, in reporting order.
    pub const ALL: [Self; 8] = [
        Self::Priority,
        Self::Urgency,
        Self::Impact,
        Self::Type,
        Self::Category,
        Self::SubCategory,
        Self::Item,
        Self::Group,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Urgency => "urgency",
            Self::Impact => "impact",
            Self::Type => "type",
            Self::Category => "category",
            Self::SubCategory => "sub_category",
            Self::Item => "item",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a single field of a matched ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldComparison {
    /// Rendered expected value, or [`DISCOVERY_EXPECTED`]
    pub expected: String,
    /// Rendered actual value from the ticket
    pub actual: String,
    /// `Some(bool)` for an evaluated comparison, `None` when the field is
    /// informational only (discovery mode)
    pub matched: Option<bool>,
}

impl FieldComparison {
    /// An evaluated comparison.
    pub fn evaluated(expected: impl Into<String>, actual: impl Into<String>, matched: bool) -> Self {
        Self { expected: expected.into(), actual: actual.into(), matched: Some(matched) }
    }

    /// A discovery-mode report of the actual value only.
    pub fn informational(actual: impl Into<String>) -> Self {
        Self { expected: DISCOVERY_EXPECTED.to_string(), actual: actual.into(), matched: None }
    }
}

/// Whether a sent record could be resolved to a ticket at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Found,
    NotFound,
}

/// Aggregate verdict for one found ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallResult {
    Pass,
    Fail,
    Discovery,
}

/// Verification outcome for one sent record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketVerificationResult {
    pub sequence_number: u64,
    /// Subject of the sent email (not the ticket)
    pub subject: String,
    pub status: VerificationStatus,
    /// Help-desk ticket id when found
    pub ticket_id: Option<u64>,
    /// Per-field verdicts; empty when the ticket was not found
    pub comparisons: BTreeMap<FieldName, FieldComparison>,
    /// Aggregate verdict; `None` when the ticket was not found
    pub overall: Option<OverallResult>,
    pub match_count: u32,
    pub mismatch_count: u32,
}

impl TicketVerificationResult {
    /// Result for a record whose ticket never appeared in the search.
    /// Absence is a routine outcome, not an error.
    pub fn not_found(record: &SentEmailRecord) -> Self {
        Self {
            sequence_number: record.sequence_number,
            subject: record.subject.clone(),
            status: VerificationStatus::NotFound,
            ticket_id: None,
            comparisons: BTreeMap::new(),
            overall: None,
            match_count: 0,
            mismatch_count: 0,
        }
    }
}

/// Accuracy tally for one field across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAccuracy {
    /// Evaluations where the field matched
    pub correct: u32,
    /// Evaluations counted (discovery-mode comparisons are excluded)
    pub evaluated: u32,
}

impl FieldAccuracy {
    pub fn percentage(self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            f64::from(self.correct) / f64::from(self.evaluated) * 100.0
        }
    }
}

/// Aggregate statistics over one verification batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub found: usize,
    pub not_found: usize,
    pub passed: usize,
    pub failed: usize,
    /// passed / found, as a percentage; 0 when nothing was found. Never
    /// computed over the total, so a high not-found rate stays visible.
    pub pass_rate: f64,
    pub field_accuracy: BTreeMap<FieldName, FieldAccuracy>,
    /// Tickets per actual assignment-group name, across both modes.
    /// Purely informational: shows where tickets landed even when
    /// verification was not possible.
    pub group_distribution: BTreeMap<String, usize>,
}

/// Everything one verification run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchVerification {
    pub results: Vec<TicketVerificationResult>,
    pub summary: BatchSummary,
    pub batch_start_time: DateTime<Utc>,
    pub verified_at: DateTime<Utc>,
}
