//! Port interfaces for probe dispatch

use async_trait::async_trait;
use ticketprobe_domain::Result;

/// Delivers one probe email to the help-desk intake address.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send a message. Returns once the transport has accepted it for
    /// delivery.
    async fn send_mail(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

/// Allocates probe sequence numbers.
///
/// Numbers must be unique across runs: the sequence is what correlates an
/// email to its ticket, and a reused number could bind a fresh record to a
/// stale ticket.
#[async_trait]
pub trait SequenceProvider: Send + Sync {
    /// Allocate the next sequence number.
    async fn next_sequence(&self) -> Result<u64>;
}
