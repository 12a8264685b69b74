//! HTTP transport abstraction.
//!
//! The client never talks to the network directly; it hands a fully built
//! [`HttpRequest`] to an [`HttpExecutor`]. Tests substitute a mock so no
//! network calls are made.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::types::{HttpRequest, HttpResponse};

/// Trait for executing HTTP requests.
pub trait HttpExecutor: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// Returns `Err` with a message if no response could be obtained.
    /// Non-2xx statuses are still `Ok`.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String>;
}

/// Production HTTP executor using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Create a new executor; `timeout` bounds both connecting and reading.
    pub fn new(timeout: Duration) -> Result<Self, String> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| e.to_string())?;

        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, String> {
        Self::new(crate::config::DEFAULT_TIMEOUT)
    }
}

impl HttpExecutor for ReqwestExecutor {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, String> {
        let method: http::Method = request.method.into();

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let header_name = HeaderName::try_from(name.as_str()).map_err(|e| e.to_string())?;
            let header_value = HeaderValue::try_from(value.as_str()).map_err(|e| e.to_string())?;
            headers.insert(header_name, header_value);
        }

        let mut req_builder = self.client.request(method, &request.url).headers(headers);

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| e.to_string())?;
            req_builder = req_builder.body(bytes);
        }

        let response = req_builder.send().map_err(|e| e.to_string())?;

        let status = response.status().as_u16();

        let mut resp_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                resp_headers.insert(name.to_string(), v.to_string());
            }
        }

        let body = response.text().map_err(|e| e.to_string())?;

        Ok(HttpResponse {
            status,
            headers: resp_headers,
            body,
        })
    }
}
