//! Configuration structures

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_SEARCH_RESULTS, PAGE_COURTESY_DELAY_MS,
    PROBE_SEND_DELAY_MS,
};
use crate::errors::{Result, TicketProbeError};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Help-desk read API settings
    pub helpdesk: HelpDeskConfig,
    /// Probe mail delivery settings
    pub mail: MailConfig,
    /// Verification run settings
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Help-desk API connection and search tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpDeskConfig {
    /// Help-desk tenant domain (e.g. "yourcompany.helpdesk.example")
    pub domain: String,
    /// API key; sent as the basic-auth username
    pub api_key: String,
    /// Disable TLS verification for this client only. Defaults to secure.
    #[serde(default)]
    pub insecure_tls: bool,
    /// Results per search page (API maximum is 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,
    /// Hard cap on accumulated search results
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Courtesy delay between page fetches, in milliseconds
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HelpDeskConfig {
    /// Base URL of the ticket read API for this tenant.
    ///
    /// Accepts domains with or without an explicit scheme prefix.
    pub fn base_url(&self) -> String {
        let domain = self
            .domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        format!("https://{domain}/api/v2")
    }

    /// Structural validation of the credentials before a client is built.
    ///
    /// # Errors
    /// Returns `TicketProbeError::Config` when the domain is empty or the
    /// API key is too short to be plausible.
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(TicketProbeError::Config("help-desk domain is empty".to_string()));
        }
        // Relaxed check: real keys vary by tenant, but anything shorter
        // than 10 characters is certainly not one.
        if self.api_key.len() < 10 {
            return Err(TicketProbeError::Config(
                "help-desk API key is missing or too short".to_string(),
            ));
        }
        Ok(())
    }
}

/// Probe mail delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Address the probe emails are sent to (the help-desk intake address)
    pub recipient: String,
    /// Address the probe emails are sent from; also the requester identity
    /// used when filtering ticket searches
    #[serde(default)]
    pub sender: Option<String>,
    /// Courtesy delay between probe sends, in milliseconds
    #[serde(default = "default_send_delay_ms")]
    pub send_delay_ms: u64,
}

/// Verification run settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Optional external assignment-group registry; the built-in registry
    /// is used when unset
    #[serde(default)]
    pub groups_file: Option<PathBuf>,
    /// Directory for verification run reports
    #[serde(default)]
    pub report_dir: Option<PathBuf>,
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_max_results() -> usize {
    MAX_SEARCH_RESULTS
}

fn default_page_delay_ms() -> u64 {
    PAGE_COURTESY_DELAY_MS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_send_delay_ms() -> u64 {
    PROBE_SEND_DELAY_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helpdesk(domain: &str, api_key: &str) -> HelpDeskConfig {
        HelpDeskConfig {
            domain: domain.to_string(),
            api_key: api_key.to_string(),
            insecure_tls: false,
            per_page: DEFAULT_PER_PAGE,
            max_results: MAX_SEARCH_RESULTS,
            page_delay_ms: PAGE_COURTESY_DELAY_MS,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    #[test]
    fn base_url_strips_scheme_and_trailing_slash() {
        let config = helpdesk("https://acme.helpdesk.example/", "0123456789abc");
        assert_eq!(config.base_url(), "https://acme.helpdesk.example/api/v2");

        let config = helpdesk("acme.helpdesk.example", "0123456789abc");
        assert_eq!(config.base_url(), "https://acme.helpdesk.example/api/v2");
    }

    #[test]
    fn validate_rejects_empty_domain_and_short_key() {
        assert!(helpdesk("", "0123456789abc").validate().is_err());
        assert!(helpdesk("acme.helpdesk.example", "short").validate().is_err());
        assert!(helpdesk("acme.helpdesk.example", "0123456789abc").validate().is_ok());
    }

    #[test]
    fn tuning_fields_default_from_constants() {
        let config: HelpDeskConfig = serde_json::from_str(
            r#"{"domain": "acme.helpdesk.example", "api_key": "0123456789abc"}"#,
        )
        .unwrap();
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert_eq!(config.max_results, MAX_SEARCH_RESULTS);
        assert_eq!(config.page_delay_ms, PAGE_COURTESY_DELAY_MS);
        assert!(!config.insecure_tls);
    }
}
