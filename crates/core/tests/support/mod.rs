//! Shared test helpers for `ticketprobe-core` integration tests.
//!
//! Provides a scripted in-memory ticket source and ticket builders so the
//! verification flow tests can focus on behaviour instead of boilerplate.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ticketprobe_core::TicketSource;
use ticketprobe_domain::{
    Expectation, HelpDeskTicket, Result as DomainResult, SentEmailRecord, TicketKind,
};

/// Arguments of one recorded `search_tickets` call.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub requester_email: Option<String>,
    pub updated_since: Option<DateTime<Utc>>,
}

/// Scripted mock for [`TicketSource`].
///
/// Pops one pre-programmed response per `search_tickets` call and records
/// the call arguments, so tests can assert on the widen-search ladder.
/// Calls beyond the script return an empty page.
pub struct MockTicketSource {
    responses: Mutex<VecDeque<DomainResult<Vec<HelpDeskTicket>>>>,
    lookup: Mutex<Option<HelpDeskTicket>>,
    calls: Mutex<Vec<RecordedSearch>>,
}

impl MockTicketSource {
    pub fn new(responses: Vec<DomainResult<Vec<HelpDeskTicket>>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            lookup: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make one ticket resolvable through `get_ticket`.
    pub fn with_lookup(self, ticket: HelpDeskTicket) -> Self {
        *self.lookup.lock().unwrap() = Some(ticket);
        self
    }

    /// All `search_tickets` calls seen so far, in order.
    pub fn calls(&self) -> Vec<RecordedSearch> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketSource for MockTicketSource {
    async fn search_tickets(
        &self,
        requester_email: Option<&str>,
        updated_since: Option<DateTime<Utc>>,
    ) -> DomainResult<Vec<HelpDeskTicket>> {
        self.calls.lock().unwrap().push(RecordedSearch {
            requester_email: requester_email.map(str::to_string),
            updated_since,
        });
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_ticket(&self, ticket_id: u64) -> DomainResult<Option<HelpDeskTicket>> {
        Ok(self.lookup.lock().unwrap().clone().filter(|t| t.id == ticket_id))
    }
}

/// A well-categorized incident ticket matching `expected_record(42, ..)`.
pub fn vpn_ticket(id: u64) -> HelpDeskTicket {
    HelpDeskTicket {
        id,
        subject: "[TEST-TKT-42] VPN down".to_string(),
        priority: 4,
        urgency: Some(3),
        impact: Some(3),
        ticket_type: Some("Incident".to_string()),
        category: Some("Network".to_string()),
        sub_category: Some("VPN".to_string()),
        item: Some("Down".to_string()),
        group_id: Some(76000128925),
        description: Some("cannot reach the VPN gateway".to_string()),
        updated_at: None,
    }
}

/// A fully specified record expecting the `vpn_ticket` categorization.
pub fn vpn_record(sequence: u64) -> SentEmailRecord {
    SentEmailRecord {
        sequence_number: sequence,
        subject: format!("[TEST-TKT-{sequence}] VPN down"),
        expectation: Expectation::Expected {
            priority: "Priority 1".to_string(),
            kind: TicketKind::Incident,
            category_path: "Network>VPN>Down".to_string(),
        },
    }
}

/// A record with no recorded expectations.
pub fn discovery_record(sequence: u64) -> SentEmailRecord {
    SentEmailRecord {
        sequence_number: sequence,
        subject: format!("[TEST-TKT-{sequence}] historical ticket"),
        expectation: Expectation::Discovery,
    }
}
