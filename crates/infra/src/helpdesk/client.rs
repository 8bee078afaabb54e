//! Help-desk ticket API client
//!
//! Paginated, rate-limit-respecting reqwest client for the ticket read API.
//! Implements the [`TicketSource`] port consumed by the verification engine.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use ticketprobe_core::TicketSource;
use ticketprobe_domain::constants::format_api_timestamp;
use ticketprobe_domain::{HelpDeskConfig, HelpDeskTicket, Result, TicketProbeError};
use tracing::{debug, warn};

use super::types::{TicketEnvelope, TicketsEnvelope};
use crate::errors::InfraError;

/// The API rejects page sizes above this regardless of configuration.
const API_MAX_PER_PAGE: usize = 100;

/// Client for the help-desk ticket read API.
///
/// TLS verification is controlled per client through the configuration's
/// `insecure_tls` flag; it is never process-wide state. The flag defaults to
/// secure and only loosens certificate checks on this client's requests.
pub struct HelpDeskClient {
    client: Client,
    base_url: String,
    api_key: String,
    per_page: usize,
    max_results: usize,
    page_delay: Duration,
}

impl HelpDeskClient {
    /// Build a client from validated configuration.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` when the credentials fail
    /// structural validation or the underlying HTTP client cannot be built.
    pub fn new(config: &HelpDeskConfig) -> Result<Self> {
        config.validate()?;
        Self::with_base_url(config, config.base_url())
    }

    /// Build a client against an explicit base URL.
    ///
    /// Used by tests to point the client at a local mock server; production
    /// callers go through [`HelpDeskClient::new`].
    pub fn with_base_url(config: &HelpDeskConfig, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .danger_accept_invalid_certs(config.insecure_tls)
            .build()
            .map_err(|e| TicketProbeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: config.api_key.clone(),
            per_page: config.per_page.clamp(1, API_MAX_PER_PAGE),
            max_results: config.max_results,
            page_delay: Duration::from_millis(config.page_delay_ms),
        })
    }

    /// Fetch one page of the ticket search.
    async fn fetch_page(
        &self,
        requester_email: Option<&str>,
        updated_since: Option<DateTime<Utc>>,
        page: usize,
    ) -> Result<Vec<HelpDeskTicket>> {
        let mut request = self
            .client
            .get(format!("{}/tickets", self.base_url))
            .basic_auth(&self.api_key, Some("X"))
            .query(&[("page", page.to_string()), ("per_page", self.per_page.to_string())]);

        if let Some(email) = requester_email {
            request = request.query(&[("email", email)]);
        }
        if let Some(since) = updated_since {
            request = request.query(&[("updated_since", format_api_timestamp(&since))]);
        }

        let response = request.send().await.map_err(InfraError::from)?;
        let response = response.error_for_status().map_err(InfraError::from)?;

        let envelope: TicketsEnvelope = response.json().await.map_err(|e| {
            TicketProbeError::Network(format!("failed to parse ticket search response: {e}"))
        })?;
        Ok(envelope.tickets)
    }

    /// Cheap credential probe: one ticket, one page.
    ///
    /// Returns `false` on an auth rejection instead of erroring so callers
    /// can report "credentials invalid" without unwinding.
    ///
    /// # Errors
    /// Propagates transport failures other than auth rejections.
    pub async fn test_connection(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/tickets", self.base_url))
            .basic_auth(&self.api_key, Some("X"))
            .query(&[("page", "1"), ("per_page", "1")])
            .send()
            .await
            .map_err(InfraError::from)?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(false),
            status => Err(TicketProbeError::Network(format!(
                "connection test failed with HTTP {status}"
            ))),
        }
    }
}

#[async_trait]
impl TicketSource for HelpDeskClient {
    /// Search tickets, accumulating pages until a short page or the hard
    /// result cap. A courtesy delay runs between page fetches to respect
    /// the API's rate limits; it is a throttle, not a retry mechanism.
    async fn search_tickets(
        &self,
        requester_email: Option<&str>,
        updated_since: Option<DateTime<Utc>>,
    ) -> Result<Vec<HelpDeskTicket>> {
        let mut tickets = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(requester_email, updated_since, page).await?;
            let batch_len = batch.len();
            debug!(page, count = batch_len, "fetched ticket search page");
            tickets.extend(batch);

            if batch_len < self.per_page {
                break;
            }
            if tickets.len() >= self.max_results {
                warn!(cap = self.max_results, "ticket search hit the result cap, stopping");
                tickets.truncate(self.max_results);
                break;
            }

            page += 1;
            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        Ok(tickets)
    }

    async fn get_ticket(&self, ticket_id: u64) -> Result<Option<HelpDeskTicket>> {
        let response = self
            .client
            .get(format!("{}/tickets/{ticket_id}", self.base_url))
            .basic_auth(&self.api_key, Some("X"))
            .send()
            .await
            .map_err(InfraError::from)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = response.error_for_status().map_err(InfraError::from)?;

        let envelope: TicketEnvelope = response.json().await.map_err(|e| {
            TicketProbeError::Network(format!("failed to parse ticket response: {e}"))
        })?;
        Ok(Some(envelope.ticket))
    }
}
