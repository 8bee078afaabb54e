//! Wire envelopes for the help-desk ticket API

use serde::Deserialize;
use ticketprobe_domain::HelpDeskTicket;

/// Envelope returned by the ticket search endpoint.
#[derive(Debug, Deserialize)]
pub struct TicketsEnvelope {
    pub tickets: Vec<HelpDeskTicket>,
}

/// Envelope returned by the ticket-by-id endpoint.
#[derive(Debug, Deserialize)]
pub struct TicketEnvelope {
    pub ticket: HelpDeskTicket,
}
