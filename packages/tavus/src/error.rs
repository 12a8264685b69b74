use std::fmt;

/// Details of a failed API call.
///
/// `status` is `None` when the request never produced an HTTP response
/// (connection refused, timeout, unreadable body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
    /// Raw response body, when one was received and was non-empty.
    pub body: Option<String>,
}

impl ApiFailure {
    pub fn new(status: Option<u16>, message: impl Into<String>, body: Option<String>) -> Self {
        Self {
            status,
            message: message.into(),
            body,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The client could not be configured (missing API key, bad base URL).
    #[error("{message}")]
    Configuration { message: String },

    /// A caller-supplied argument was rejected before any request was sent.
    #[error("{message}")]
    Argument { message: String },

    /// HTTP 400.
    #[error("{0}")]
    BadRequest(ApiFailure),

    /// HTTP 401.
    #[error("{0}")]
    Authentication(ApiFailure),

    /// HTTP 404.
    #[error("{0}")]
    NotFound(ApiFailure),

    /// HTTP 422.
    #[error("{0}")]
    Validation(ApiFailure),

    /// HTTP 429.
    #[error("{0}")]
    RateLimit(ApiFailure),

    /// HTTP 5xx.
    #[error("{0}")]
    Server(ApiFailure),

    /// Any other status, and every transport failure.
    #[error("{0}")]
    Api(ApiFailure),
}

/// Discriminant of [`Error`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Argument,
    BadRequest,
    Authentication,
    NotFound,
    Validation,
    RateLimit,
    Server,
    Api,
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Error::Argument {
            message: message.into(),
        }
    }

    /// A transport-level failure, surfaced as a generic API error.
    pub fn transport(cause: impl fmt::Display) -> Self {
        Error::Api(ApiFailure::new(
            None,
            format!("Request failed: {}", cause),
            None,
        ))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Argument { .. } => ErrorKind::Argument,
            Error::BadRequest(_) => ErrorKind::BadRequest,
            Error::Authentication(_) => ErrorKind::Authentication,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Validation(_) => ErrorKind::Validation,
            Error::RateLimit(_) => ErrorKind::RateLimit,
            Error::Server(_) => ErrorKind::Server,
            Error::Api(_) => ErrorKind::Api,
        }
    }

    /// The failure details for errors raised after a network round-trip.
    pub fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            Error::Configuration { .. } | Error::Argument { .. } => None,
            Error::BadRequest(f)
            | Error::Authentication(f)
            | Error::NotFound(f)
            | Error::Validation(f)
            | Error::RateLimit(f)
            | Error::Server(f)
            | Error::Api(f) => Some(f),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Error::Configuration { message } | Error::Argument { message } => message,
            _ => self
                .api_failure()
                .map(|f| f.message.as_str())
                .unwrap_or_default(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.api_failure().and_then(|f| f.status)
    }

    pub fn body(&self) -> Option<&str> {
        self.api_failure().and_then(|f| f.body.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = Error::RateLimit(ApiFailure::new(Some(429), "Rate limit exceeded", None));
        assert_eq!(err.to_string(), "Rate limit exceeded");

        let err = Error::configuration("API key is required");
        assert_eq!(err.to_string(), "API key is required");
    }

    #[test]
    fn accessors_expose_status_and_body() {
        let err = Error::Validation(ApiFailure::new(
            Some(422),
            "bad field",
            Some(r#"{"error":"bad field"}"#.to_string()),
        ));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.message(), "bad field");
        assert_eq!(err.body(), Some(r#"{"error":"bad field"}"#));
    }

    #[test]
    fn local_errors_have_no_status() {
        let err = Error::argument("data cannot be empty");
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert_eq!(err.status(), None);
        assert!(err.api_failure().is_none());
        assert_eq!(err.message(), "data cannot be empty");
    }

    #[test]
    fn transport_errors_are_generic() {
        let err = Error::transport("connection refused");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Request failed: connection refused");
    }
}
