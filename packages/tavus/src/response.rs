//! Maps a raw HTTP response onto a JSON result or a typed [`Error`].

use serde_json::{json, Map, Value};

use crate::error::{ApiFailure, Error};
use crate::types::HttpResponse;

/// Classify a response by status code.
///
/// Success bodies that are empty or not valid JSON become an empty object.
/// Error bodies are only consulted for the `error`/`message` fields; when
/// they cannot be parsed the fixed default message is used.
pub fn classify(response: &HttpResponse) -> Result<Value, Error> {
    let status = response.status;

    match status {
        200 | 201 => Ok(response.json().unwrap_or_else(empty_object)),
        204 => Ok(json!({ "success": true })),
        400 => Err(Error::BadRequest(failure(
            response,
            error_or_message(response).unwrap_or_else(|| "Bad request".to_string()),
        ))),
        401 => Err(Error::Authentication(failure(
            response,
            string_field(response, "message").unwrap_or_else(|| "Invalid access token".to_string()),
        ))),
        404 => Err(Error::NotFound(failure(response, "Resource not found"))),
        422 => Err(Error::Validation(failure(
            response,
            error_or_message(response).unwrap_or_else(|| "Validation failed".to_string()),
        ))),
        429 => Err(Error::RateLimit(failure(response, "Rate limit exceeded"))),
        500..=599 => Err(Error::Server(failure(
            response,
            format!("Server error: {}", status),
        ))),
        _ => Err(Error::Api(failure(
            response,
            format!("Unexpected response: {}", status),
        ))),
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn failure(response: &HttpResponse, message: impl Into<String>) -> ApiFailure {
    let body = if response.body.is_empty() {
        None
    } else {
        Some(response.body.clone())
    };
    ApiFailure::new(Some(response.status), message, body)
}

fn error_or_message(response: &HttpResponse) -> Option<String> {
    string_field(response, "error").or_else(|| string_field(response, "message"))
}

/// A non-empty string field of the JSON body, if there is one.
fn string_field(response: &HttpResponse, field: &str) -> Option<String> {
    match response.json()?.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn respond(status: u16, body: &str) -> Result<Value, Error> {
        classify(&HttpResponse::new(status, body))
    }

    #[test]
    fn ok_and_created_return_parsed_body() {
        assert_eq!(respond(200, r#"{"persona_id":"p1"}"#), Ok(json!({"persona_id": "p1"})));
        assert_eq!(respond(201, r#"[1,2]"#), Ok(json!([1, 2])));
    }

    #[test]
    fn empty_or_malformed_success_body_is_empty_object() {
        assert_eq!(respond(200, ""), Ok(json!({})));
        assert_eq!(respond(200, "<html>"), Ok(json!({})));
        assert_eq!(respond(201, "{truncated"), Ok(json!({})));
    }

    #[test]
    fn no_content_is_success_marker_regardless_of_body() {
        assert_eq!(respond(204, ""), Ok(json!({"success": true})));
        assert_eq!(respond(204, r#"{"other":1}"#), Ok(json!({"success": true})));
    }

    #[test]
    fn bad_request_prefers_error_then_message() {
        let err = respond(400, r#"{"error":"x","message":"y"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.message(), "x");

        let err = respond(400, r#"{"message":"y"}"#).unwrap_err();
        assert_eq!(err.message(), "y");

        let err = respond(400, r#"{}"#).unwrap_err();
        assert_eq!(err.message(), "Bad request");

        let err = respond(400, "garbage").unwrap_err();
        assert_eq!(err.message(), "Bad request");
        assert_eq!(err.body(), Some("garbage"));
    }

    #[test]
    fn authentication_uses_message_only() {
        let err = respond(401, r#"{"message":"expired key"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "expired key");

        let err = respond(401, r#"{"error":"ignored"}"#).unwrap_err();
        assert_eq!(err.message(), "Invalid access token");
    }

    #[test]
    fn not_found_ignores_body() {
        let err = respond(404, r#"{"error":"no such persona"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Resource not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn validation_prefers_error_then_message() {
        let err = respond(422, r#"{"error":"x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "x");

        let err = respond(422, r#"{"message":"y"}"#).unwrap_err();
        assert_eq!(err.message(), "y");

        let err = respond(422, "").unwrap_err();
        assert_eq!(err.message(), "Validation failed");
        assert_eq!(err.body(), None);
    }

    #[test]
    fn rate_limit_ignores_body() {
        let err = respond(429, r#"{"error":"slow down"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimit);
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    #[test]
    fn server_errors_cover_the_5xx_range() {
        for status in [500, 502, 503, 599] {
            let err = respond(status, "").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Server);
            assert_eq!(err.message(), format!("Server error: {}", status));
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn anything_else_is_unexpected() {
        for status in [202, 301, 403, 409, 600] {
            let err = respond(status, "").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Api);
            assert_eq!(err.message(), format!("Unexpected response: {}", status));
        }
    }
}
