use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_CSRF_HEADER: &str = "X-CSRF-Header";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    /// Base URL of the REST host, e.g. `https://host/Relativity.REST/api`.
    pub base_url: String,
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub username: Option<String>,
    pub password: Option<String>,
    pub csrf_header: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost/Relativity.REST/api".to_string(),
            timeout: Duration::from_secs(60),
            username: None,
            password: None,
            csrf_header: DEFAULT_CSRF_HEADER.to_string(),
        }
    }
}

impl RestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Reads `RTF_BASE_URL`, `RTF_USERNAME`, `RTF_PASSWORD` and
    /// `RTF_TIMEOUT_SECS` on top of the defaults.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("RTF_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(username) = std::env::var("RTF_USERNAME") {
            config.username = Some(username);
        }
        if let Ok(password) = std::env::var("RTF_PASSWORD") {
            config.password = Some(password);
        }
        if let Ok(timeout) = std::env::var("RTF_TIMEOUT_SECS") {
            let secs: u64 = timeout
                .parse()
                .map_err(|_| format!("RTF_TIMEOUT_SECS is not a number: {}", timeout))?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Base URL must start with http:// or https://".to_string());
        }

        if self.timeout.is_zero() {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.username.is_some() != self.password.is_some() {
            return Err("Username and password must be set together".to_string());
        }

        if self.csrf_header.is_empty() {
            return Err("CSRF header name cannot be empty".to_string());
        }

        Ok(())
    }

    /// Joins an endpoint onto the base URL with exactly one slash between them.
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
