use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_API_VERSION: &str = "2019-12-03";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable client configuration, passed to [`crate::StripeClient::new`].
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_version: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads `STRIPE_API_KEY`, `STRIPE_API_VERSION`, `STRIPE_API_BASE` and
    /// `STRIPE_TIMEOUT_SECS` from the environment.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("api_version", DEFAULT_API_VERSION)?
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
            .add_source(config::Environment::with_prefix("STRIPE").try_parsing(true))
            .build()?;

        let api_key = config.get_string("api_key")?;
        if api_key.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "STRIPE_API_KEY must not be empty".to_string(),
            ));
        }

        let timeout_secs = config.get_int("timeout_secs")?;
        let timeout_secs = u64::try_from(timeout_secs).map_err(|_| {
            config::ConfigError::Message(format!("Invalid timeout: {}", timeout_secs))
        })?;

        Ok(ClientConfig::new(api_key)
            .api_version(config.get_string("api_version")?)
            .base_url(config.get_string("api_base")?)
            .timeout(Duration::from_secs(timeout_secs)))
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn redact(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}
