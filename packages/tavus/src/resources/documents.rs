use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::{collection_path, member_path, reject_shadowed, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::types::{Method, Params};

const COLLECTION: &str = "documents";

/// Body of `POST /v2/documents`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateDocument {
    pub document_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// `callback_url`, `properties`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateDocument {
    pub fn new(document_url: impl Into<String>) -> Self {
        Self {
            document_url: document_url.into(),
            document_name: None,
            tags: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = Some(name.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Knowledge-base documents.
pub struct Documents {
    dispatcher: Arc<Dispatcher>,
}

impl Documents {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: CreateDocument) -> Result<Value, Error> {
        reject_shadowed(&request.extra, &["document_url", "document_name", "tags"])?;
        if request.document_url.trim().is_empty() {
            return Err(Error::argument("document_url is required"));
        }
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    pub fn get(&self, document_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, document_id)?;
        self.dispatcher.request(Method::GET, &path, &Params::new(), None)
    }

    /// Supports `limit`, `page`, `sort`, `status`, `name_or_uuid` and `tags`.
    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    /// Update metadata (`document_name`, `tags`). Sends the fields as an object.
    pub fn update(&self, document_id: &str, fields: Map<String, Value>) -> Result<Value, Error> {
        if fields.is_empty() {
            return Err(Error::argument("No fields to update"));
        }
        let path = member_path(COLLECTION, document_id)?;
        self.dispatcher
            .request(Method::PATCH, &path, &Params::new(), Some(Value::Object(fields)))
    }

    pub fn delete(&self, document_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, document_id)?;
        self.dispatcher.request(Method::DELETE, &path, &Params::new(), None)
    }
}
