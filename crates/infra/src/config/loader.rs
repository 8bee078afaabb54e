//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `TICKETPROBE_HELPDESK_DOMAIN`: Help-desk tenant domain
//! - `TICKETPROBE_HELPDESK_API_KEY`: Help-desk API key
//! - `TICKETPROBE_INSECURE_TLS`: Disable TLS verification for the help-desk
//!   client only (true/false, default false)
//! - `TICKETPROBE_MAIL_RECIPIENT`: Help-desk intake address probes are sent to
//! - `TICKETPROBE_MAIL_SENDER`: Sender / requester identity (optional)
//! - `TICKETPROBE_GROUPS_FILE`: External assignment-group registry (optional)
//! - `TICKETPROBE_REPORT_DIR`: Directory for verification reports (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./ticketprobe.json` or `./ticketprobe.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use ticketprobe_domain::constants::{
    DEFAULT_PER_PAGE, DEFAULT_REQUEST_TIMEOUT_SECS, MAX_SEARCH_RESULTS, PAGE_COURTESY_DELAY_MS,
    PROBE_SEND_DELAY_MS,
};
use ticketprobe_domain::{
    Config, HelpDeskConfig, MailConfig, Result, TicketProbeError, VerifierConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TicketProbeError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The help-desk domain, API key and mail recipient must be present; search
/// tuning falls back to domain defaults.
///
/// # Errors
/// Returns `TicketProbeError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let domain = env_var("TICKETPROBE_HELPDESK_DOMAIN")?;
    let api_key = env_var("TICKETPROBE_HELPDESK_API_KEY")?;
    let insecure_tls = env_bool("TICKETPROBE_INSECURE_TLS", false);

    let recipient = env_var("TICKETPROBE_MAIL_RECIPIENT")?;
    let sender = std::env::var("TICKETPROBE_MAIL_SENDER").ok();

    let groups_file = std::env::var("TICKETPROBE_GROUPS_FILE").ok().map(PathBuf::from);
    let report_dir = std::env::var("TICKETPROBE_REPORT_DIR").ok().map(PathBuf::from);

    let config = Config {
        helpdesk: HelpDeskConfig {
            domain,
            api_key,
            insecure_tls,
            per_page: DEFAULT_PER_PAGE,
            max_results: MAX_SEARCH_RESULTS,
            page_delay_ms: PAGE_COURTESY_DELAY_MS,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        },
        mail: MailConfig { recipient, sender, send_delay_ms: PROBE_SEND_DELAY_MS },
        verifier: VerifierConfig { groups_file, report_dir },
    };
    config.helpdesk.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `TicketProbeError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TicketProbeError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TicketProbeError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TicketProbeError::Config(format!("Failed to read config file: {}", e)))?;

    let config = parse_config(&contents, &config_path)?;
    config.helpdesk.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `TicketProbeError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TicketProbeError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TicketProbeError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(TicketProbeError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./ticketprobe.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("ticketprobe.json"),
            cwd.join("ticketprobe.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("ticketprobe.json"),
                exe_dir.join("ticketprobe.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `TicketProbeError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        TicketProbeError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Arguments
/// * `key` - Environment variable name
/// * `default` - Default value if variable is not set
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
