//! In-memory transport for tests and development.
//!
//! Routes are matched in registration order against method and endpoint; the
//! first match answers. Every call is recorded, including unmatched ones,
//! which fail with HTTP 404.

use crate::rest::{HttpMethod, RestError, RestRequest, RestResult, RestService};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

type Handler = Box<dyn Fn(&RestRequest) -> RestResult<Value> + Send + Sync>;

struct Route {
    method: HttpMethod,
    endpoint: String,
    prefix: bool,
    handler: Handler,
}

impl Route {
    fn matches(&self, request: &RestRequest) -> bool {
        self.method == request.method
            && if self.prefix {
                request.endpoint.starts_with(&self.endpoint)
            } else {
                request.endpoint == self.endpoint
            }
    }
}

#[derive(Default)]
pub struct ScriptedRestService {
    routes: Vec<Route>,
    calls: Mutex<Vec<RestRequest>>,
}

impl ScriptedRestService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers calls to exactly `endpoint`.
    pub fn on<F>(mut self, method: HttpMethod, endpoint: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RestRequest) -> RestResult<Value> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            endpoint: endpoint.into(),
            prefix: false,
            handler: Box::new(handler),
        });
        self
    }

    /// Answers calls to any endpoint starting with `prefix`.
    pub fn on_prefix<F>(mut self, method: HttpMethod, prefix: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RestRequest) -> RestResult<Value> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            endpoint: prefix.into(),
            prefix: true,
            handler: Box::new(handler),
        });
        self
    }

    /// Answers with a fixed payload.
    pub fn respond(self, method: HttpMethod, endpoint: impl Into<String>, payload: Value) -> Self {
        self.on(method, endpoint, move |_| Ok(payload.clone()))
    }

    pub fn calls(&self) -> Vec<RestRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Number of recorded calls whose endpoint contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.endpoint.contains(fragment))
            .count()
    }
}

#[async_trait]
impl RestService for ScriptedRestService {
    async fn execute(&self, request: RestRequest) -> RestResult<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request.clone());
        }

        match self.routes.iter().find(|route| route.matches(&request)) {
            Some(route) => (route.handler)(&request),
            None => Err(RestError::http(
                404,
                format!("No route for {} {}", request.method, request.endpoint),
            )),
        }
    }

    fn service_name(&self) -> &'static str {
        "scripted"
    }
}
