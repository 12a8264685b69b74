use std::sync::Arc;

use serde_json::{json, Value};

use super::{collection_path, member_path};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::patch::{self, JsonPatch, PatchOperation};
use crate::types::{Method, Params};

const COLLECTION: &str = "objectives";

/// Objectives that steer a conversation towards goals.
pub struct Objectives {
    dispatcher: Arc<Dispatcher>,
}

impl Objectives {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Create objectives from a non-empty list of objective definitions.
    pub fn create(&self, data: Vec<Value>) -> Result<Value, Error> {
        if data.is_empty() {
            return Err(Error::argument("data cannot be empty"));
        }
        self.dispatcher.request(
            Method::POST,
            &collection_path(COLLECTION),
            &Params::new(),
            Some(json!({ "data": data })),
        )
    }

    pub fn get(&self, objectives_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, objectives_id)?;
        self.dispatcher.request(Method::GET, &path, &Params::new(), None)
    }

    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    pub fn delete(&self, objectives_id: &str) -> Result<Value, Error> {
        let path = member_path(COLLECTION, objectives_id)?;
        self.dispatcher.request(Method::DELETE, &path, &Params::new(), None)
    }
}

impl JsonPatch for Objectives {
    fn patch(&self, objectives_id: &str, operations: &[PatchOperation]) -> Result<Value, Error> {
        let path = member_path(COLLECTION, objectives_id)?;
        patch::dispatch(&self.dispatcher, &path, operations)
    }
}
