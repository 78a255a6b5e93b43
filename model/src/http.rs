use crate::config::RestConfig;
use crate::rest::{HttpMethod, RestError, RestRequest, RestResult, RestService};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde_json::Value;
use tracing::{debug, warn};

/// [`RestService`] over a pooled reqwest client.
pub struct HttpRestService {
    client: reqwest::Client,
    config: RestConfig,
}

impl HttpRestService {
    pub fn new(config: RestConfig) -> RestResult<Self> {
        config
            .validate()
            .map_err(|message| RestError::InvalidConfig { message })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let csrf = HeaderName::from_bytes(config.csrf_header.as_bytes()).map_err(|e| {
            RestError::InvalidConfig {
                message: format!("Invalid CSRF header name: {}", e),
            }
        })?;
        headers.insert(csrf, HeaderValue::from_static("-"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| RestError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    pub fn with_default_config() -> RestResult<Self> {
        Self::new(RestConfig::default())
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn build(&self, request: &RestRequest) -> reqwest::RequestBuilder {
        let url = self.config.endpoint_url(&request.endpoint);
        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        let builder = if request.params.is_empty() {
            builder
        } else {
            builder.query(&request.params)
        };

        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        match (&self.config.username, &self.config.password) {
            (Some(username), password) => builder.basic_auth(username, password.as_ref()),
            _ => builder,
        }
    }

    fn handle_http_error(err: reqwest::Error) -> RestError {
        if err.is_timeout() {
            RestError::Timeout
        } else if let Some(status) = err.status() {
            RestError::http(status.as_u16(), err.to_string())
        } else {
            RestError::Network(err)
        }
    }
}

#[async_trait]
impl RestService for HttpRestService {
    async fn execute(&self, request: RestRequest) -> RestResult<Value> {
        debug!("{} {}", request.method, request.endpoint);

        let response = self
            .build(&request)
            .send()
            .await
            .map_err(Self::handle_http_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(
                "{} {} failed with status {}",
                request.method, request.endpoint, status
            );
            return Err(RestError::http(status.as_u16(), error_text));
        }

        let body = response.text().await.map_err(Self::handle_http_error)?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn service_name(&self) -> &'static str {
        "http"
    }
}
