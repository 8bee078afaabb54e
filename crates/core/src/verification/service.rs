//! Verification service - core business logic

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ticketprobe_domain::{BatchVerification, Result, SentEmailRecord, TicketVerificationResult};
use tracing::{debug, info};

use super::comparator::compare_ticket;
use super::matcher::{bind_records, ConsumedTickets, TicketMatcher};
use super::ports::TicketSource;
use super::summary::summarize;
use crate::groups::GroupRegistry;

/// Drives matcher, comparator and summary across one probe batch.
pub struct VerificationService {
    matcher: TicketMatcher,
    groups: GroupRegistry,
}

impl VerificationService {
    /// Create a new verification service.
    pub fn new(source: Arc<dyn TicketSource>, groups: GroupRegistry) -> Self {
        Self { matcher: TicketMatcher::new(source), groups }
    }

    /// Verify a batch of sent records against the ticket store.
    ///
    /// Resolves each record in input order, compares found pairs and
    /// aggregates the summary. Individual tickets that never appeared
    /// become NOT_FOUND results; only a fully failed candidate search
    /// aborts the batch.
    ///
    /// # Errors
    /// Returns an error when every step of the candidate search failed;
    /// a half-run verification would be worse than none.
    pub async fn verify_batch(
        &self,
        records: &[SentEmailRecord],
        batch_start: DateTime<Utc>,
        sender_email: Option<&str>,
    ) -> Result<BatchVerification> {
        info!(total = records.len(), sender = sender_email.unwrap_or("<any>"), "verifying batch");

        let candidates = self.matcher.fetch_candidates(sender_email, batch_start).await?;
        debug!(candidates = candidates.len(), "candidate tickets fetched");

        let mut consumed = ConsumedTickets::default();
        let bound = bind_records(records, &candidates, &mut consumed);

        let results: Vec<TicketVerificationResult> = records
            .iter()
            .zip(bound)
            .map(|(record, ticket)| match ticket {
                Some(ticket) => compare_ticket(record, ticket, &self.groups),
                None => TicketVerificationResult::not_found(record),
            })
            .collect();

        let summary = summarize(&results);
        info!(
            found = summary.found,
            not_found = summary.not_found,
            passed = summary.passed,
            failed = summary.failed,
            "batch verification complete"
        );

        Ok(BatchVerification {
            results,
            summary,
            batch_start_time: batch_start,
            verified_at: Utc::now(),
        })
    }
}
