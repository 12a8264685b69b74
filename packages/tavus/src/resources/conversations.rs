use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{collection_path, member_path, reject_shadowed, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::types::{Method, Params};

const COLLECTION: &str = "conversations";

/// Body of `POST /v2/conversations`.
///
/// Options the API accepts beyond the replica and persona (`callback_url`,
/// `conversational_context`, `custom_greeting`, `properties`, ...) go in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateConversation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replica_id(mut self, replica_id: impl Into<String>) -> Self {
        self.replica_id = Some(replica_id.into());
        self
    }

    pub fn persona_id(mut self, persona_id: impl Into<String>) -> Self {
        self.persona_id = Some(persona_id.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Real-time conversations with a replica.
pub struct Conversations {
    dispatcher: Arc<Dispatcher>,
}

impl Conversations {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: CreateConversation) -> Result<Value, Error> {
        reject_shadowed(&request.extra, &["replica_id", "persona_id"])?;
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    pub fn get(&self, conversation_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, conversation_id)?;
        self.dispatcher.request(Method::GET, &path, &Params::new(), None)
    }

    /// Supports `limit`, `page` and `status` (`active`, `ended`).
    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    /// End an active conversation.
    pub fn end(&self, conversation_id: &str) -> Result<Value, Error> {
        let path = format!("{}/end", member_path(COLLECTION, conversation_id)?);
        self.dispatcher.request(Method::POST, &path, &Params::new(), None)
    }

    pub fn delete(&self, conversation_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, conversation_id)?;
        self.dispatcher.request(Method::DELETE, &path, &Params::new(), None)
    }
}
