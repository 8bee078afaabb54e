//! Graph mail client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use ticketprobe_core::MailTransport;
use ticketprobe_domain::{Result, TicketProbeError};
use tracing::debug;

use crate::errors::InfraError;

const GRAPH_API_BASE: &str = "https://graph.microsoft.com/v1.0";
const SEND_TIMEOUT_SECS: u64 = 30;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// This method should handle token refresh if needed.
    async fn access_token(&self) -> Result<String>;
}

/// Sends probe emails through the Graph `sendMail` endpoint.
pub struct GraphMailClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GraphMailClient {
    /// Build a client against the production Graph endpoint.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` when the HTTP client cannot be
    /// built.
    pub fn new(tokens: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        Self::with_base_url(tokens, GRAPH_API_BASE)
    }

    /// Build a client against an explicit base URL.
    ///
    /// Used by tests to point the client at a local mock server.
    pub fn with_base_url(
        tokens: Arc<dyn AccessTokenProvider>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .no_proxy()
            .build()
            .map_err(|e| TicketProbeError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url: base_url.into(), tokens })
    }
}

#[async_trait]
impl MailTransport for GraphMailClient {
    async fn send_mail(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let token = self.tokens.access_token().await?;

        let payload = json!({
            "message": {
                "subject": subject,
                "body": {
                    "contentType": "Text",
                    "content": body,
                },
                "toRecipients": [
                    { "emailAddress": { "address": recipient } }
                ],
            },
            "saveToSentItems": true,
        });

        let response = self
            .client
            .post(format!("{}/me/sendMail", self.base_url))
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(InfraError::from)?;

        // Graph acknowledges an accepted message with 202 and no body.
        response.error_for_status().map_err(InfraError::from)?;
        debug!(recipient, "probe email accepted for delivery");
        Ok(())
    }
}
