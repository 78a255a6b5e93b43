use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Request timed out")]
    Timeout,
}

impl RestError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type RestResult<T> = Result<T, RestError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(verb)
    }
}

/// A single call against a named endpoint, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RestRequest {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Transport adapter: performs one HTTP call and returns the JSON payload.
///
/// An empty response body comes back as `Value::Null`.
#[async_trait]
pub trait RestService: Send + Sync {
    async fn execute(&self, request: RestRequest) -> RestResult<Value>;

    fn service_name(&self) -> &'static str;
}

/// Typed helpers over [`RestService::execute`].
#[async_trait]
pub trait RestServiceExt: RestService {
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let mut request = RestRequest::new(HttpMethod::Get, endpoint);
        for (key, value) in params {
            request = request.with_param(*key, value);
        }
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> RestResult<T> {
        let request = RestRequest::new(HttpMethod::Post, endpoint).with_body(serde_json::to_value(body)?);
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST whose response body is ignored.
    async fn post_unit<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> RestResult<()> {
        let request = RestRequest::new(HttpMethod::Post, endpoint).with_body(serde_json::to_value(body)?);
        self.execute(request).await?;
        Ok(())
    }

    async fn put<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> RestResult<()> {
        let request = RestRequest::new(HttpMethod::Put, endpoint).with_body(serde_json::to_value(body)?);
        self.execute(request).await?;
        Ok(())
    }

    async fn delete(&self, endpoint: &str, params: &[(&str, String)]) -> RestResult<()> {
        let mut request = RestRequest::new(HttpMethod::Delete, endpoint);
        for (key, value) in params {
            request = request.with_param(*key, value);
        }
        self.execute(request).await?;
        Ok(())
    }
}

impl<R: RestService + ?Sized> RestServiceExt for R {}

/// Turns a 404 into `Ok(None)`; every other failure passes through.
pub trait OptionalResponse<T> {
    fn optional(self) -> RestResult<Option<T>>;
}

impl<T> OptionalResponse<T> for RestResult<T> {
    fn optional(self) -> RestResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct EchoService {
        seen: Mutex<Vec<RestRequest>>,
    }

    #[async_trait]
    impl RestService for EchoService {
        async fn execute(&self, request: RestRequest) -> RestResult<Value> {
            self.seen.lock().unwrap().push(request.clone());
            match request.method {
                HttpMethod::Get if request.endpoint == "missing" => {
                    Err(RestError::http(404, "not here"))
                }
                HttpMethod::Get => Ok(json!({ "Name": "echo", "params": request.params.len() })),
                HttpMethod::Post => Ok(request.body.unwrap_or(Value::Null)),
                HttpMethod::Put | HttpMethod::Delete => Ok(Value::Null),
            }
        }

        fn service_name(&self) -> &'static str {
            "echo"
        }
    }

    fn service() -> EchoService {
        EchoService {
            seen: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let service = service();

        let value: Value = service
            .get("tabs", &[("workspaceId", "5".to_string())])
            .await
            .unwrap();
        assert_eq!(value["params"], 1);

        let id: i32 = service.post("create", &json!(1017)).await.unwrap();
        assert_eq!(id, 1017);

        service.put("update", &json!({ "Name": "x" })).await.unwrap();
        service.delete("delete", &[]).await.unwrap();

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[0].method, HttpMethod::Get);
        assert_eq!(seen[0].params[0], ("workspaceId".to_string(), "5".to_string()));
        assert_eq!(seen[2].method, HttpMethod::Put);
        assert_eq!(seen[3].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_helpers_work_through_trait_objects() {
        let service: Box<dyn RestService> = Box::new(service());
        let echoed: String = service.post("echo", &"hello").await.unwrap();
        assert_eq!(echoed, "hello");
        assert_eq!(service.service_name(), "echo");
    }

    #[tokio::test]
    async fn test_optional_maps_not_found() {
        let service = service();
        let missing: Option<Value> = service.get("missing", &[]).await.optional().unwrap();
        assert!(missing.is_none());

        let failed: RestResult<Value> = Err(RestError::http(500, "boom"));
        assert!(failed.optional().is_err());
    }

    #[test]
    fn test_error_status() {
        assert_eq!(RestError::http(503, "down").status(), Some(503));
        assert!(RestError::http(404, "gone").is_not_found());
        assert!(RestError::Timeout.status().is_none());
        assert_eq!(
            RestError::http(400, "bad request").to_string(),
            "HTTP 400: bad request"
        );
    }
}
