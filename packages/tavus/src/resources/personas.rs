use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{collection_path, member_path, reject_shadowed, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::patch::{self, JsonPatch, PatchOperation};
use crate::types::{Method, Params};

const COLLECTION: &str = "personas";

/// Body of `POST /v2/personas`.
///
/// `persona_name`, `pipeline_mode`, `context`, `default_replica_id`,
/// `document_ids`, `layers` and the like go in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreatePersona {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreatePersona {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Personas: system prompt, context and pipeline layers for a replica.
pub struct Personas {
    dispatcher: Arc<Dispatcher>,
}

impl Personas {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: CreatePersona) -> Result<Value, Error> {
        reject_shadowed(&request.extra, &["system_prompt"])?;
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    pub fn get(&self, persona_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, persona_id)?;
        self.dispatcher.request(Method::GET, &path, &Params::new(), None)
    }

    /// Supports `limit`, `page` and `persona_type` (`user`, `system`).
    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    pub fn delete(&self, persona_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, persona_id)?;
        self.dispatcher.request(Method::DELETE, &path, &Params::new(), None)
    }
}

impl JsonPatch for Personas {
    fn patch(&self, persona_id: &str, operations: &[PatchOperation]) -> Result<Value, Error> {
        let path = member_path(COLLECTION, persona_id)?;
        patch::dispatch(&self.dispatcher, &path, operations)
    }
}
