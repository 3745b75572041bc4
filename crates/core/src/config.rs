//! Client runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the transport. Nothing
//! in the session reads environment variables while handling a user action.

use crate::constants::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::{ExpertError, ExpertResult};
use std::time::Duration;

/// Client configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a new `ClientConfig`.
    ///
    /// The base URL must use http or https. A trailing slash is added when missing so that
    /// relative endpoint paths join beneath it rather than replacing its last segment.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ExpertResult<Self> {
        let mut base_url = base_url.into().trim().to_string();
        if base_url.is_empty() {
            return Err(ExpertError::InvalidInput("api url cannot be empty".into()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ExpertError::InvalidInput(format!(
                "api url must start with http:// or https://, got '{base_url}'"
            )));
        }
        if timeout.is_zero() {
            return Err(ExpertError::InvalidInput(
                "timeout must be greater than zero".into(),
            ));
        }
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self { base_url, timeout })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Build a `ClientConfig` from optional raw values (typically `PEX_API_URL` and
/// `PEX_TIMEOUT_SECS`).
///
/// Missing or blank values fall back to the defaults.
pub fn client_config_from_env_values(
    api_url: Option<String>,
    timeout_secs: Option<String>,
) -> ExpertResult<ClientConfig> {
    let api_url = api_url
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    let timeout_secs = timeout_secs
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>().map_err(|_| {
                ExpertError::InvalidInput(format!("timeout must be a whole number of seconds, got '{v}'"))
            })
        })
        .transpose()?
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ClientConfig::new(api_url, Duration::from_secs(timeout_secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_values_missing() {
        let cfg = client_config_from_env_values(None, Some("  ".into())).expect("valid config");
        assert_eq!(cfg.base_url(), DEFAULT_API_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let cfg = ClientConfig::new("https://pakar.example.org/app", Duration::from_secs(5))
            .expect("valid config");
        assert_eq!(cfg.base_url(), "https://pakar.example.org/app/");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://pakar.example.org", Duration::from_secs(5))
            .expect_err("should reject ftp");
        assert!(matches!(err, ExpertError::InvalidInput(msg) if msg.contains("http://")));
    }

    #[test]
    fn rejects_unparsable_timeout() {
        let err = client_config_from_env_values(None, Some("soon".into()))
            .expect_err("should reject timeout");
        assert!(matches!(err, ExpertError::InvalidInput(msg) if msg.contains("whole number")));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = client_config_from_env_values(Some("http://localhost".into()), Some("0".into()))
            .expect_err("should reject zero");
        assert!(matches!(err, ExpertError::InvalidInput(msg) if msg.contains("greater than zero")));
    }
}
