//! Ticket matching
//!
//! Resolves each sent record to at most one help-desk ticket. Candidate
//! retrieval widens the search window in explicit steps when the batch
//! window comes back empty; binding consumes each ticket at most once per
//! run.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use ticketprobe_domain::constants::WIDEN_SEARCH_LOOKBACK_HOURS;
use ticketprobe_domain::{HelpDeskTicket, Result, SentEmailRecord, TicketProbeError};
use tracing::{info, warn};

use super::ports::TicketSource;

/// Ticket ids already bound to a record within one verification run.
///
/// Scoped to a single batch: concurrent runs each hold their own arena, so
/// consumption state is never shared.
#[derive(Debug, Default)]
pub struct ConsumedTickets {
    ids: HashSet<u64>,
}

impl ConsumedTickets {
    pub fn is_claimed(&self, ticket_id: u64) -> bool {
        self.ids.contains(&ticket_id)
    }

    /// Claim a ticket for the current record. Returns `false` when it was
    /// already claimed earlier in the batch.
    pub fn claim(&mut self, ticket_id: u64) -> bool {
        self.ids.insert(ticket_id)
    }
}

/// Resolves sent records against the help-desk ticket store.
pub struct TicketMatcher {
    source: Arc<dyn TicketSource>,
}

impl TicketMatcher {
    pub fn new(source: Arc<dyn TicketSource>) -> Self {
        Self { source }
    }

    /// Fetch candidate tickets for a batch.
    ///
    /// Three explicit steps, each logged: the batch window, the window
    /// widened back 24 hours, then no time filter at all (bounded by the
    /// source's result cap). A step that fails with a transport error
    /// degrades to "no candidates" so the next step still runs; only a
    /// chain in which every step errored propagates a failure.
    ///
    /// # Errors
    /// Returns the last transport error when all three steps failed.
    pub async fn fetch_candidates(
        &self,
        requester_email: Option<&str>,
        batch_start: DateTime<Utc>,
    ) -> Result<Vec<HelpDeskTicket>> {
        let mut any_step_succeeded = false;

        match self.source.search_tickets(requester_email, Some(batch_start)).await {
            Ok(tickets) if !tickets.is_empty() => {
                info!(count = tickets.len(), "found tickets in batch window");
                return Ok(tickets);
            }
            Ok(_) => {
                any_step_succeeded = true;
                info!("no tickets in batch window, widening search to last 24 hours");
            }
            Err(err) => {
                warn!(error = %err, "batch-window search failed, widening search to last 24 hours");
            }
        }

        let lookback = batch_start - Duration::hours(WIDEN_SEARCH_LOOKBACK_HOURS);
        match self.source.search_tickets(requester_email, Some(lookback)).await {
            Ok(tickets) if !tickets.is_empty() => {
                info!(count = tickets.len(), "found tickets in 24-hour window");
                return Ok(tickets);
            }
            Ok(_) => {
                any_step_succeeded = true;
                info!("no tickets in 24-hour window, retrying without a time filter");
            }
            Err(err) => {
                warn!(error = %err, "24-hour search failed, retrying without a time filter");
            }
        }

        match self.source.search_tickets(requester_email, None).await {
            Ok(tickets) => {
                info!(count = tickets.len(), "unfiltered search complete");
                Ok(tickets)
            }
            Err(err) if any_step_succeeded => {
                // At least one step answered; treat the failed tail as
                // empty and let the batch report NOT_FOUND.
                warn!(error = %err, "unfiltered search failed, proceeding with no candidates");
                Ok(Vec::new())
            }
            Err(err) => {
                warn!(error = %err, "all search steps failed");
                Err(err)
            }
        }
    }
}

/// Bind each record to the first unconsumed candidate whose subject
/// contains the record's tag.
///
/// First-match and order-dependent: records are scanned in input order and
/// a ticket satisfies at most one record, even when several records would
/// match it. Absence is a normal outcome; the slot stays `None`.
pub fn bind_records<'a>(
    records: &[SentEmailRecord],
    candidates: &'a [HelpDeskTicket],
    consumed: &mut ConsumedTickets,
) -> Vec<Option<&'a HelpDeskTicket>> {
    let mut bound = Vec::with_capacity(records.len());
    for record in records {
        let tag = record.subject_tag();
        let hit = candidates
            .iter()
            .find(|ticket| ticket.subject.contains(&tag) && !consumed.is_claimed(ticket.id));
        if let Some(ticket) = hit {
            consumed.claim(ticket.id);
        }
        bound.push(hit);
    }
    bound
}

// Kept for parity with the search contract: callers occasionally
// re-inspect a single ticket (discovery workflows).
impl TicketMatcher {
    /// Fetch one ticket by id through the underlying source.
    ///
    /// # Errors
    /// Propagates transport errors from the source.
    pub async fn lookup(&self, ticket_id: u64) -> Result<Option<HelpDeskTicket>> {
        match self.source.get_ticket(ticket_id).await {
            Ok(ticket) => Ok(ticket),
            Err(TicketProbeError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}
