//! Configuration module for environment variable parsing.
//!
//! Everything is read once at process start and shared read-only afterwards.

use std::env;

use anyhow::{anyhow, Context, Result};
use tracing::warn;
use url::Url;

/// Environment variable holding the Feishu custom bot webhook address.
pub const FEISHU_WEBHOOK_URL_VAR: &str = "FEISHU_WEBHOOK_URL";

/// Port used when `PORT` is unset or unparsable.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Feishu bot webhook that receives the status cards
    pub feishu_webhook_url: Url,

    /// Port for the web server to listen on
    pub port: u16,

    /// Whether `port` is the fallback rather than a value from `PORT`
    pub port_defaulted: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when `FEISHU_WEBHOOK_URL` is missing or not an absolute http(s) URL.
    pub fn from_env() -> Result<Self> {
        let raw_url = env::var(FEISHU_WEBHOOK_URL_VAR)
            .with_context(|| format!("{FEISHU_WEBHOOK_URL_VAR} must be set"))?;

        let port = parse_port("PORT");

        Ok(Config {
            feishu_webhook_url: parse_webhook_url(&raw_url)?,
            port: port.unwrap_or(DEFAULT_PORT),
            port_defaulted: port.is_none(),
        })
    }
}

/// Parse and sanity-check the outbound webhook address.
fn parse_webhook_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .with_context(|| format!("{FEISHU_WEBHOOK_URL_VAR} is not a valid URL"))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!(
            "{FEISHU_WEBHOOK_URL_VAR} must use http or https, got {other}"
        )),
    }
}

/// Parse a port number; `None` when the variable is absent or garbage.
fn parse_port(name: &str) -> Option<u16> {
    let raw = env::var(name).ok()?;

    match raw.trim().parse() {
        Ok(port) => Some(port),
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid port, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_webhook_url_valid() {
        let url = parse_webhook_url(" https://open.feishu.cn/open-apis/bot/v2/hook/abc ").unwrap();
        assert_eq!(url.host_str(), Some("open.feishu.cn"));
        assert_eq!(url.path(), "/open-apis/bot/v2/hook/abc");
    }

    #[test]
    fn test_parse_webhook_url_rejects_garbage() {
        assert!(parse_webhook_url("not a url").is_err());
        assert!(parse_webhook_url("ftp://example.com/hook").is_err());
    }

    #[test]
    fn test_parse_port() {
        env::set_var("TEST_RELAY_PORT", "9090");
        assert_eq!(parse_port("TEST_RELAY_PORT"), Some(9090));
        env::remove_var("TEST_RELAY_PORT");
    }

    #[test]
    fn test_parse_port_invalid() {
        env::set_var("TEST_RELAY_PORT_BAD", "eighty");
        assert_eq!(parse_port("TEST_RELAY_PORT_BAD"), None);
        env::remove_var("TEST_RELAY_PORT_BAD");
    }

    #[test]
    fn test_parse_port_absent() {
        assert_eq!(parse_port("NONEXISTENT_PORT_VAR"), None);
    }

    // The only test touching FEISHU_WEBHOOK_URL, so no other test races it.
    #[test]
    fn test_from_env_requires_webhook_url() {
        env::remove_var(FEISHU_WEBHOOK_URL_VAR);
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("FEISHU_WEBHOOK_URL must be set"));

        env::set_var(FEISHU_WEBHOOK_URL_VAR, "mailto:bot@example.com");
        assert!(Config::from_env().is_err());

        env::set_var(FEISHU_WEBHOOK_URL_VAR, "https://open.feishu.cn/open-apis/bot/v2/hook/abc");
        let config = Config::from_env().unwrap();
        assert_eq!(config.feishu_webhook_url.host_str(), Some("open.feishu.cn"));

        env::remove_var(FEISHU_WEBHOOK_URL_VAR);
    }
}
