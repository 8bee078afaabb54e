//! Port interfaces for ticket verification

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ticketprobe_domain::{HelpDeskTicket, Result};

/// Read-only access to the help-desk ticket store.
///
/// Implementations own pagination: a search call returns the full
/// accumulated result set for its filters, bounded by the adapter's hard
/// result cap.
#[async_trait]
pub trait TicketSource: Send + Sync {
    /// Search tickets, optionally filtered by requester email and by an
    /// "updated since" lower bound.
    async fn search_tickets(
        &self,
        requester_email: Option<&str>,
        updated_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<HelpDeskTicket>>;

    /// Fetch one ticket by id. `Ok(None)` when the ticket does not exist.
    async fn get_ticket(&self, ticket_id: u64) -> Result<Option<HelpDeskTicket>>;
}
