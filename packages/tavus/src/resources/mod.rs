//! Resource facades, one per API collection.
//!
//! Each facade translates calls into requests against `/v2/{collection}`.
//! Required fields are checked locally; an [`Error::Argument`] is returned
//! before any request is sent when they are missing.

mod conversations;
mod documents;
mod guardrails;
mod objectives;
mod personas;
mod replicas;
mod videos;

pub use conversations::{Conversations, CreateConversation};
pub use documents::{CreateDocument, Documents};
pub use guardrails::{CreateGuardrails, Guardrails};
pub use objectives::Objectives;
pub use personas::{CreatePersona, Personas};
pub use replicas::{CreateReplica, Replicas};
pub use videos::{CreateVideo, Videos};

use serde_json::{Map, Value};

use crate::error::Error;

/// Path of a single resource.
///
/// Ids are used as a single path segment, so anything that would change the
/// segment structure or add a query is rejected.
fn member_path(collection: &str, id: &str) -> Result<String, Error> {
    let singular = collection.trim_end_matches('s');
    if id.trim().is_empty() {
        return Err(Error::argument(format!("{} id cannot be empty", singular)));
    }
    let leaves_segment = id == "."
        || id == ".."
        || id.contains(|c: char| matches!(c, '/' | '?' | '#' | '%' | '\\'));
    if leaves_segment {
        return Err(Error::argument(format!("Invalid {} id '{}'", singular, id)));
    }
    Ok(format!("/v2/{}/{}", collection, id))
}

/// Typed fields must be set through their setters, never through `extra`.
fn reject_shadowed(extra: &Map<String, Value>, typed: &[&str]) -> Result<(), Error> {
    match typed.iter().find(|field| extra.contains_key(**field)) {
        Some(field) => Err(Error::argument(format!(
            "'{}' must be set through its typed field, not extra",
            field
        ))),
        None => Ok(()),
    }
}

fn collection_path(collection: &str) -> String {
    format!("/v2/{}", collection)
}

/// Serialize a request body type into a JSON value.
fn to_body<T: serde::Serialize>(body: &T) -> Result<Value, Error> {
    serde_json::to_value(body).map_err(|e| Error::argument(e.to_string()))
}
