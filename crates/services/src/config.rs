use std::env;
use std::time::Duration;

use crate::api::DEFAULT_DOMAIN;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Backend connection settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortalConfig {
    pub api_domain: String,
    pub http_timeout: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_domain: DEFAULT_DOMAIN.to_owned(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl PortalConfig {
    /// Reads `PORTAL_API_DOMAIN` and `PORTAL_HTTP_TIMEOUT_SECS`, falling back
    /// to the defaults for unset, blank or unparsable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    #[must_use]
    pub fn with_api_domain(mut self, domain: impl Into<String>) -> Self {
        self.api_domain = domain.into();
        self
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let api_domain = lookup("PORTAL_API_DOMAIN")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.api_domain);
        let http_timeout = lookup("PORTAL_HTTP_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(defaults.http_timeout, Duration::from_secs);
        Self {
            api_domain,
            http_timeout,
        }
    }
}
