use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::config::{self, Configuration};
use crate::error::Error;
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::resources::{
    Conversations, Documents, Guardrails, Objectives, Personas, Replicas, Videos,
};
use crate::response::classify;
use crate::types::{HttpRequest, Method, Params};

const API_KEY_HEADER: &str = "x-api-key";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Turns a method, path, query and body into an HTTP round-trip.
///
/// Shared by the client and every resource facade. Holds no mutable state.
pub(crate) struct Dispatcher {
    config: Configuration,
    api_key: String,
    base_url: Url,
    executor: Box<dyn HttpExecutor>,
}

impl Dispatcher {
    fn new(config: Configuration, executor: Box<dyn HttpExecutor>) -> Result<Self, Error> {
        let api_key = match config.api_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(Error::configuration("API key is required")),
        };
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::configuration(format!("Invalid base URL '{}': {}", config.base_url, e))
        })?;

        Ok(Self {
            config,
            api_key,
            base_url,
            executor,
        })
    }

    /// `path` replaces the base URL's path; it can never change the host.
    fn build_url(&self, path: &str, params: &Params) -> Result<Url, Error> {
        let is_plain_path = path.starts_with('/')
            && !path.starts_with("//")
            && !path.contains(|c: char| matches!(c, '?' | '#' | '\\'));
        if !is_plain_path {
            return Err(Error::argument(format!(
                "Request path must be an absolute path on the API host, got '{}'",
                path
            )));
        }

        let mut url = self.base_url.clone();
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        Ok(url)
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<Value>,
    ) -> Result<HttpRequest, Error> {
        let url = self.build_url(path, params)?;

        let mut request = HttpRequest::new(method, url.as_str())
            .with_header(API_KEY_HEADER, self.api_key.as_str())
            .with_header("Content-Type", JSON_CONTENT_TYPE)
            .with_header("Accept", JSON_CONTENT_TYPE);

        if method.allows_body() {
            if let Some(body) = body.filter(|b| !is_empty_body(b)) {
                request = request.with_json_body(body);
            }
        }

        Ok(request)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        body: Option<Value>,
    ) -> Result<Value, Error> {
        let request = self.build_request(method, path, params, body)?;

        tracing::debug!(method = %method, url = %request.url, "dispatching request");

        let response = self.executor.execute(&request).map_err(|cause| {
            tracing::warn!(method = %method, url = %request.url, error = %cause, "transport failure");
            Error::transport(cause)
        })?;

        tracing::debug!(status = response.status, url = %request.url, "received response");

        classify(&response).inspect_err(|err| {
            tracing::warn!(status = response.status, url = %request.url, error = %err, "request rejected");
        })
    }
}

/// Null, `{}` and `[]` are never sent.
fn is_empty_body(body: &Value) -> bool {
    match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Client for the Tavus API.
///
/// Resource facades are created together with the client and borrowed from
/// it, so `client.personas()` always returns the same instance.
///
/// # Example
///
/// ```ignore
/// use tavus::{Client, resources::CreatePersona};
///
/// let client = Client::new("my-api-key")?;
/// let persona = client
///     .personas()
///     .create(CreatePersona::new().system_prompt("You are a helpful tutor."))?;
/// ```
pub struct Client {
    dispatcher: Arc<Dispatcher>,
    conversations: Conversations,
    personas: Personas,
    replicas: Replicas,
    objectives: Objectives,
    guardrails: Guardrails,
    documents: Documents,
    videos: Videos,
}

impl Client {
    /// Create a client with the given API key and default settings for the rest.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        let dispatcher = Arc::new(dispatcher);
        Self {
            conversations: Conversations::new(Arc::clone(&dispatcher)),
            personas: Personas::new(Arc::clone(&dispatcher)),
            replicas: Replicas::new(Arc::clone(&dispatcher)),
            objectives: Objectives::new(Arc::clone(&dispatcher)),
            guardrails: Guardrails::new(Arc::clone(&dispatcher)),
            documents: Documents::new(Arc::clone(&dispatcher)),
            videos: Videos::new(Arc::clone(&dispatcher)),
            dispatcher,
        }
    }

    /// The resolved configuration this client was built with.
    pub fn configuration(&self) -> &Configuration {
        &self.dispatcher.config
    }

    pub fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    pub fn personas(&self) -> &Personas {
        &self.personas
    }

    pub fn replicas(&self) -> &Replicas {
        &self.replicas
    }

    pub fn objectives(&self) -> &Objectives {
        &self.objectives
    }

    pub fn guardrails(&self) -> &Guardrails {
        &self.guardrails
    }

    pub fn documents(&self) -> &Documents {
        &self.documents
    }

    pub fn videos(&self) -> &Videos {
        &self.videos
    }

    /// `GET {path}` for endpoints without a facade method.
    pub fn get(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.dispatcher.request(Method::GET, path, params, None)
    }

    pub fn post(&self, path: &str, body: Value, params: &Params) -> Result<Value, Error> {
        self.dispatcher.request(Method::POST, path, params, Some(body))
    }

    pub fn patch(&self, path: &str, body: Value, params: &Params) -> Result<Value, Error> {
        self.dispatcher.request(Method::PATCH, path, params, Some(body))
    }

    pub fn delete(&self, path: &str, params: &Params) -> Result<Value, Error> {
        self.dispatcher.request(Method::DELETE, path, params, None)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.dispatcher.config.base_url)
            .field("timeout", &self.dispatcher.config.timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Client`].
///
/// Anything left unset is taken from the process-wide default
/// ([`configure`](crate::configure)).
#[derive(Default)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    executor: Option<Box<dyn HttpExecutor>>,
}

impl ClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom transport instead of the reqwest-backed default.
    pub fn executor(mut self, executor: impl HttpExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    /// Resolve the configuration and create the client.
    ///
    /// Fails with [`Error::Configuration`] when no API key is available or the
    /// base URL is not a valid URL. No request is made.
    pub fn build(self) -> Result<Client, Error> {
        let defaults = config::configuration();
        let config = Configuration {
            api_key: self.api_key.or(defaults.api_key),
            base_url: self.base_url.unwrap_or(defaults.base_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        };

        if !config.is_valid() {
            return Err(Error::configuration("API key is required"));
        }

        let executor = match self.executor {
            Some(executor) => executor,
            None => Box::new(ReqwestExecutor::new(config.timeout).map_err(|e| {
                Error::configuration(format!("Failed to create HTTP client: {}", e))
            })?),
        };

        let dispatcher = Dispatcher::new(config, executor)?;
        Ok(Client::from_dispatcher(dispatcher))
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("custom_executor", &self.executor.is_some())
            .finish_non_exhaustive()
    }
}
