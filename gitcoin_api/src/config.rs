//! Client configuration with environment overrides.

use std::time::Duration;

/// Default URL of the bounties list endpoint.
pub const DEFAULT_BOUNTIES_URL: &str = "https://gitcoin.co/api/v0.1/bounties/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by the facade and the default transport.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// URL of the bounties endpoint. Primary keys are appended to it verbatim.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BOUNTIES_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("gitcoin-api-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Reads `GITCOIN_API_URL` and `GITCOIN_TIMEOUT_SECS`, falling back to the
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("GITCOIN_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout: Duration::from_secs(env_u64("GITCOIN_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            user_agent: defaults.user_agent,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(v) => v.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", key, v, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "https://gitcoin.co/api/v0.1/bounties/");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert!(cfg.user_agent.starts_with("gitcoin-api-rs/"));
    }

    #[test]
    fn builder_overrides() {
        let cfg = ClientConfig::default()
            .with_base_url("http://localhost:8000/bounties/")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(cfg.base_url, "http://localhost:8000/bounties/");
        assert_eq!(cfg.timeout, Duration::from_secs(5));
    }

    #[test]
    fn env_u64_falls_back_on_missing_key() {
        assert_eq!(env_u64("GITCOIN_TEST_SURELY_UNSET_KEY", 7), 7);
    }
}
