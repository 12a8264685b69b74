use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{collection_path, member_path, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::patch::{self, JsonPatch, PatchOperation};
use crate::types::{Method, Params};

const COLLECTION: &str = "guardrails";

/// Body of `POST /v2/guardrails`. `data` is left out when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateGuardrails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<Value>,
}

impl CreateGuardrails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn guardrail(mut self, guardrail: Value) -> Self {
        self.data.push(guardrail);
        self
    }
}

/// Behavioral guardrails attached to personas.
pub struct Guardrails {
    dispatcher: Arc<Dispatcher>,
}

impl Guardrails {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: CreateGuardrails) -> Result<Value, Error> {
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    pub fn get(&self, guardrails_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, guardrails_id)?;
        self.dispatcher.request(Method::GET, &path, &Params::new(), None)
    }

    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    pub fn delete(&self, guardrails_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, guardrails_id)?;
        self.dispatcher.request(Method::DELETE, &path, &Params::new(), None)
    }
}

impl JsonPatch for Guardrails {
    fn patch(&self, guardrails_id: &str, operations: &[PatchOperation]) -> Result<Value, Error> {
        let path = member_path(COLLECTION, guardrails_id)?;
        patch::dispatch(&self.dispatcher, &path, operations)
    }
}
