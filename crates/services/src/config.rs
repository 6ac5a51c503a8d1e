use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://ielts-backend-0u1s.onrender.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the practice backend lives and how long a request may take.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// API root without a trailing slash, e.g. `https://host/api`.
    pub base_url: String,
    pub request_timeout: Duration,
}

impl BackendConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Read `IELTS_API_URL` and `IELTS_HTTP_TIMEOUT_SECS`, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("IELTS_API_URL").ok(),
            env::var("IELTS_HTTP_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(api_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let base_url = api_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        let mut config = Self::new(base_url);
        if let Some(raw) = timeout_secs {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => log::warn!("ignoring invalid IELTS_HTTP_TIMEOUT_SECS value {raw:?}"),
            }
        }
        config
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL of `path` under the API root.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
