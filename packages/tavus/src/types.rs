use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP methods used by the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PATCH,
    DELETE,
}

impl Method {
    /// Only POST and PATCH requests ever carry a body.
    pub fn allows_body(self) -> bool {
        matches!(self, Method::POST | Method::PATCH)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PATCH => http::Method::PATCH,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

/// Query parameters, passed through to the API verbatim.
///
/// ```ignore
/// let params = Params::new().limit(10).page(2).param("status", "active");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    /// Adds `name=true` when `enabled`, nothing otherwise.
    pub fn flag(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.param(name, true)
        } else {
            self
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Params::new(), |params, (k, v)| params.param(k, v))
    }
}

/// A fully resolved request, ready to hand to an [`HttpExecutor`](crate::HttpExecutor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL, query string included.
    pub url: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// JSON body, only ever set for POST and PATCH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw HTTP response as returned by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Undecoded body; empty when the server sent none.
    #[serde(default)]
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Check if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body parsed as JSON, or `None` when it is empty or malformed.
    pub fn json(&self) -> Option<serde_json::Value> {
        if self.body.trim().is_empty() {
            return None;
        }
        serde_json::from_str(&self.body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn params_render_scalars() {
        let params = Params::new().limit(10).page(2).param("verbose", true);
        assert_eq!(params.get("limit"), Some("10"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("verbose"), Some("true"));
    }

    #[test]
    fn params_flag_only_when_enabled() {
        assert!(Params::new().flag("hard", false).is_empty());
        assert_eq!(Params::new().flag("hard", true).get("hard"), Some("true"));
    }

    #[test]
    fn params_from_iterator() {
        let params: Params = [("status", "ended"), ("limit", "5")].into_iter().collect();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("limit", "5"), ("status", "ended")]);
    }

    #[test]
    fn only_post_and_patch_allow_bodies() {
        assert!(Method::POST.allows_body());
        assert!(Method::PATCH.allows_body());
        assert!(!Method::GET.allows_body());
        assert!(!Method::DELETE.allows_body());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let request = HttpRequest::new(Method::GET, "https://example.com")
            .with_header("Content-Type", "application/json");
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn response_json_tolerates_empty_and_malformed() {
        assert_eq!(HttpResponse::new(200, "").json(), None);
        assert_eq!(HttpResponse::new(200, "not json").json(), None);
        assert_eq!(
            HttpResponse::new(200, r#"{"a":1}"#).json(),
            Some(json!({"a": 1}))
        );
    }
}
