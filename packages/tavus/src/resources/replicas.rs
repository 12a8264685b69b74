use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{collection_path, member_path, reject_shadowed, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::types::{Method, Params};

const COLLECTION: &str = "replicas";

/// Body of `POST /v2/replicas`.
///
/// `consent_video_url`, `callback_url`, `model_name` and `properties` go in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateReplica {
    pub train_video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replica_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateReplica {
    pub fn new(train_video_url: impl Into<String>) -> Self {
        Self {
            train_video_url: train_video_url.into(),
            replica_name: None,
            extra: Map::new(),
        }
    }

    pub fn replica_name(mut self, name: impl Into<String>) -> Self {
        self.replica_name = Some(name.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// Replicas: trained digital likenesses.
pub struct Replicas {
    dispatcher: Arc<Dispatcher>,
}

impl Replicas {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Start training a replica from a video.
    pub fn create(&self, request: CreateReplica) -> Result<Value, Error> {
        reject_shadowed(&request.extra, &["train_video_url", "replica_name"])?;
        if request.train_video_url.trim().is_empty() {
            return Err(Error::argument("train_video_url is required"));
        }
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    /// `verbose` includes additional replica data.
    pub fn get(&self, replica_id: &str, verbose: bool) -> Result<Value, Error> {
        let path = member_path(COLLECTION, replica_id)?;
        let params = Params::new().flag("verbose", verbose);
        self.dispatcher.request(Method::GET, &path, &params, None)
    }

    /// Supports `limit`, `page`, `verbose`, `replica_type` and `replica_ids`.
    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    /// `hard` also deletes the replica's assets, irreversibly.
    pub fn delete(&self, replica_id: &str, hard: bool) -> Result<Value, Error> {
        let path = member_path(COLLECTION, replica_id)?;
        let params = Params::new().flag("hard", hard);
        self.dispatcher.request(Method::DELETE, &path, &params, None)
    }

    pub fn rename(&self, replica_id: &str, replica_name: &str) -> Result<Value, Error> {
        let path = format!("{}/name", member_path(COLLECTION, replica_id)?);
        self.dispatcher.request(
            Method::PATCH,
            &path,
            &Params::new(),
            Some(json!({ "replica_name": replica_name })),
        )
    }
}
