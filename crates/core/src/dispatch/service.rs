//! Probe dispatch service - core business logic

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ticketprobe_domain::constants::{subject_tag, PROBE_SEND_DELAY_MS};
use ticketprobe_domain::{DispatchOutcome, FailedProbe, ProbeSpec, Result, SentEmailRecord};
use tracing::{info, warn};

use super::ports::{MailTransport, SequenceProvider};

/// Sends a batch of probe emails and records what was sent.
pub struct DispatchService {
    transport: Arc<dyn MailTransport>,
    sequences: Arc<dyn SequenceProvider>,
    send_delay: Duration,
}

impl DispatchService {
    /// Create a new dispatch service with the default inter-send delay.
    pub fn new(transport: Arc<dyn MailTransport>, sequences: Arc<dyn SequenceProvider>) -> Self {
        Self { transport, sequences, send_delay: Duration::from_millis(PROBE_SEND_DELAY_MS) }
    }

    /// Override the courtesy delay between sends. Tests opt out with zero.
    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    /// Dispatch one probe batch.
    ///
    /// Each probe gets a fresh sequence number, the subject tag is
    /// prepended, and the message is sent through the transport. A probe
    /// whose delivery fails is recorded and skipped; the batch continues.
    ///
    /// # Errors
    /// Returns an error only when a sequence number cannot be allocated -
    /// without one the probe could never be verified, and a counter
    /// failure will not fix itself mid-batch.
    pub async fn dispatch_batch(
        &self,
        recipient: &str,
        probes: Vec<ProbeSpec>,
    ) -> Result<DispatchOutcome> {
        let started_at = Utc::now();
        let total = probes.len();
        info!(total, recipient, "dispatching probe batch");

        let mut records = Vec::with_capacity(total);
        let mut failed = Vec::new();

        for (index, probe) in probes.into_iter().enumerate() {
            let sequence = self.sequences.next_sequence().await?;
            let subject = format!("{} {}", subject_tag(sequence), probe.subject);

            match self.transport.send_mail(recipient, &subject, &probe.body).await {
                Ok(()) => {
                    info!(sequence, "probe email sent");
                    records.push(SentEmailRecord {
                        sequence_number: sequence,
                        subject,
                        expectation: probe.expectation,
                    });
                }
                Err(err) => {
                    warn!(sequence, error = %err, "probe email failed to send");
                    failed.push(FailedProbe { subject, reason: err.to_string() });
                }
            }

            if index + 1 < total && !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }
        }

        info!(sent = records.len(), failed = failed.len(), "probe batch dispatched");
        Ok(DispatchOutcome { records, failed, started_at, recipient: recipient.to_string() })
    }
}
