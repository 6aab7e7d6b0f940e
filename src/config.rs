//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file in the working directory is honoured (see `main.rs`).
//!
//! ## Required Variables
//!
//! Endpoints and credentials have no defaults; startup fails without them.
//!
//! ```bash
//! export POSTAL_CODE_BASE_URL="https://api.easyship.com/api/v1/countries/14/postal_codes/"
//! export ITEM_CATEGORIES_URL="https://public-api.easyship.com/2024-09/item_categories"
//! export EASYSHIP_API_KEY="..."
//! export FORWARDING_API_URL="https://example.com/webhooks/shipping/result"
//! export DISCORD_WEBHOOK_URL="https://discord.com/api/webhooks/..."
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`)
//! - `PORT` - Port used when `LISTEN` is not set (default: `3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `CACHE_ENABLED` - Cache postal code lookups (default: `true`)
//! - `CACHE_TTL_SECONDS` - Cache entry lifetime (default: 600)
//! - `CACHE_SWEEP_INTERVAL_SECONDS` - Expired entry sweep period (default: 120)
//! - `CACHE_ITEM_CATEGORIES` - Also cache the item-category listing (default: `false`)
//! - `HTTP_TIMEOUT_SECONDS` - Timeout for every outbound call (default: 5)
//! - `UPSTREAM_RATE_LIMIT_PER_SECOND` - Outbound upstream budget (default: unlimited)
//! - `UPSTREAM_RATE_LIMIT_MAX_WAIT_MS` - Max wait for outbound budget (default: 1000)
//! - `RATE_LIMIT_PER_SECOND` / `RATE_LIMIT_BURST` - Inbound per-IP limit (default: 10 / 50)
//! - `BEHIND_PROXY` - Key inbound limits on forwarding headers (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use url::Url;

/// Longest accepted cache TTL (30 days).
const MAX_CACHE_TTL_SECONDS: u64 = 30 * 24 * 60 * 60;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── Upstream and sinks ──────────────────────────────────────────────────
    /// Postal code endpoint; the numeric ID is appended as the last path segment.
    pub postal_code_base_url: String,
    pub item_categories_url: String,
    /// Bearer token for the item-category endpoint.
    pub easyship_api_key: String,
    /// Downstream endpoint receiving raw webhook bodies.
    pub forwarding_url: String,
    /// Chat channel receiving webhook notifications.
    pub discord_webhook_url: String,

    // ── Cache ───────────────────────────────────────────────────────────────
    pub cache_enabled: bool,
    pub cache_ttl_seconds: u64,
    pub cache_sweep_interval_seconds: u64,
    pub cache_item_categories: bool,

    // ── Outbound HTTP ───────────────────────────────────────────────────────
    pub http_timeout_seconds: u64,
    /// `None` disables outbound throttling.
    pub upstream_rate_limit_per_second: Option<u32>,
    pub upstream_rate_limit_max_wait_ms: u64,

    // ── Inbound rate limiting ───────────────────────────────────────────────
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required endpoint or credential is missing.
    pub fn from_env() -> Result<Self> {
        let postal_code_base_url = required("POSTAL_CODE_BASE_URL")?;
        let item_categories_url = required("ITEM_CATEGORIES_URL")?;
        let easyship_api_key = required("EASYSHIP_API_KEY")?;
        let forwarding_url = required("FORWARDING_API_URL")?;
        let discord_webhook_url = required("DISCORD_WEBHOOK_URL")?;

        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let upstream_rate_limit_per_second = env::var("UPSTREAM_RATE_LIMIT_PER_SECOND")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| {
                v.trim()
                    .parse()
                    .with_context(|| format!("UPSTREAM_RATE_LIMIT_PER_SECOND is not a number: '{}'", v))
            })
            .transpose()?;

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            postal_code_base_url,
            item_categories_url,
            easyship_api_key,
            forwarding_url,
            discord_webhook_url,
            cache_enabled: flag("CACHE_ENABLED", true),
            cache_ttl_seconds: number("CACHE_TTL_SECONDS", 600),
            cache_sweep_interval_seconds: number("CACHE_SWEEP_INTERVAL_SECONDS", 120),
            cache_item_categories: flag("CACHE_ITEM_CATEGORIES", false),
            http_timeout_seconds: number("HTTP_TIMEOUT_SECONDS", 5),
            upstream_rate_limit_per_second,
            upstream_rate_limit_max_wait_ms: number("UPSTREAM_RATE_LIMIT_MAX_WAIT_MS", 1000),
            rate_limit_per_second: number("RATE_LIMIT_PER_SECOND", 10),
            rate_limit_burst: number("RATE_LIMIT_BURST", 50),
            behind_proxy: flag("BEHIND_PROXY", false),
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT`
    /// 3. `0.0.0.0:3000`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - an endpoint is not an absolute `http(s)` URL
    /// - the API key is blank
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not a socket address
    /// - a TTL, interval, timeout or rate limit is zero or out of range
    pub fn validate(&self) -> Result<()> {
        validate_url("POSTAL_CODE_BASE_URL", &self.postal_code_base_url)?;
        validate_url("ITEM_CATEGORIES_URL", &self.item_categories_url)?;
        validate_url("FORWARDING_API_URL", &self.forwarding_url)?;
        validate_url("DISCORD_WEBHOOK_URL", &self.discord_webhook_url)?;

        if self.easyship_api_key.trim().is_empty() {
            anyhow::bail!("EASYSHIP_API_KEY must not be empty");
        }

        // Validate log format
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        // Validate listen address format
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        // Validate cache settings
        if self.cache_ttl_seconds == 0 || self.cache_ttl_seconds > MAX_CACHE_TTL_SECONDS {
            anyhow::bail!(
                "CACHE_TTL_SECONDS must be between 1 and {}, got {}",
                MAX_CACHE_TTL_SECONDS,
                self.cache_ttl_seconds
            );
        }
        if self.cache_sweep_interval_seconds == 0 {
            anyhow::bail!("CACHE_SWEEP_INTERVAL_SECONDS must be greater than 0");
        }

        // Validate outbound settings
        if self.http_timeout_seconds == 0 || self.http_timeout_seconds > 300 {
            anyhow::bail!(
                "HTTP_TIMEOUT_SECONDS must be between 1 and 300, got {}",
                self.http_timeout_seconds
            );
        }
        if self.upstream_rate_limit_per_second == Some(0) {
            anyhow::bail!("UPSTREAM_RATE_LIMIT_PER_SECOND must be greater than 0 when set");
        }

        // Validate inbound rate limit
        if self.rate_limit_per_second == 0 || self.rate_limit_per_second > 10_000 {
            anyhow::bail!(
                "RATE_LIMIT_PER_SECOND must be between 1 and 10000, got {}",
                self.rate_limit_per_second
            );
        }
        if self.rate_limit_burst == 0 {
            anyhow::bail!("RATE_LIMIT_BURST must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Postal codes: {}", mask_url(&self.postal_code_base_url));
        tracing::info!("  Item categories: {}", mask_url(&self.item_categories_url));
        tracing::info!("  Forwarding: {}", mask_url(&self.forwarding_url));
        tracing::info!("  Notifications: {}", mask_url(&self.discord_webhook_url));

        if self.cache_enabled {
            tracing::info!(
                "  Cache: enabled (TTL {}s, sweep every {}s, item categories {})",
                self.cache_ttl_seconds,
                self.cache_sweep_interval_seconds,
                if self.cache_item_categories {
                    "cached"
                } else {
                    "uncached"
                }
            );
        } else {
            tracing::info!("  Cache: disabled");
        }

        tracing::info!("  Outbound timeout: {}s", self.http_timeout_seconds);
        match self.upstream_rate_limit_per_second {
            Some(limit) => tracing::info!(
                "  Upstream rate limit: {}/s (max wait {}ms)",
                limit,
                self.upstream_rate_limit_max_wait_ms
            ),
            None => tracing::info!("  Upstream rate limit: disabled"),
        }
        tracing::info!(
            "  Inbound rate limit: {}/s, burst {}{}",
            self.rate_limit_per_second,
            self.rate_limit_burst,
            if self.behind_proxy {
                " (behind proxy)"
            } else {
                ""
            }
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a required, non-blank variable.
fn required(key: &str) -> Result<String> {
    let value = env::var(key).with_context(|| format!("{} must be set", key))?;
    if value.trim().is_empty() {
        anyhow::bail!("{} must not be empty", key);
    }
    Ok(value)
}

fn number<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL", key))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("{} must use http or https, got '{}'", key, url.scheme());
    }
    Ok(())
}

/// Masks everything after the host in a URL for logging.
///
/// Webhook URLs carry their credentials in the path:
/// - `https://discord.com/api/webhooks/1/abc` → `https://discord.com/***`
/// - `http://localhost:8080/` → `http://localhost:8080/***`
fn mask_url(value: &str) -> String {
    match Url::parse(value) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}://{}:{}/***", url.scheme(), host, port),
            (Some(host), None) => format!("{}://{}/***", url.scheme(), host),
            _ => "***".to_string(),
        },
        Err(_) => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
