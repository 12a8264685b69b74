use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};

use super::{collection_path, member_path, reject_shadowed, to_body};
use crate::client::Dispatcher;
use crate::error::Error;
use crate::types::{Method, Params};

const COLLECTION: &str = "videos";

/// Body of `POST /v2/videos`. Either `script` or `audio_url` must be set.
///
/// `video_name`, `background_url`, `callback_url`, `fast`,
/// `transparent_background`, `watermark_image_url` and `properties` go in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVideo {
    pub replica_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CreateVideo {
    pub fn new(replica_id: impl Into<String>) -> Self {
        Self {
            replica_id: replica_id.into(),
            script: None,
            audio_url: None,
            extra: Map::new(),
        }
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    pub fn audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    fn has_source(&self) -> bool {
        self.script.is_some() || self.audio_url.is_some()
    }
}

/// Generated videos.
pub struct Videos {
    dispatcher: Arc<Dispatcher>,
}

impl Videos {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: CreateVideo) -> Result<Value, Error> {
        reject_shadowed(&request.extra, &["replica_id", "script", "audio_url"])?;
        if request.replica_id.trim().is_empty() {
            return Err(Error::argument("replica_id is required"));
        }
        if !request.has_source() {
            return Err(Error::argument("Either script or audio_url must be provided"));
        }
        let body = to_body(&request)?;
        self.dispatcher
            .request(Method::POST, &collection_path(COLLECTION), &Params::new(), Some(body))
    }

    /// Generate a video from a text script.
    pub fn generate_from_text(
        &self,
        replica_id: &str,
        script: &str,
        extra: Map<String, Value>,
    ) -> Result<Value, Error> {
        let mut request = CreateVideo::new(replica_id).script(script);
        request.extra = extra;
        self.create(request)
    }

    /// Generate a video from a recorded audio file.
    pub fn generate_from_audio(
        &self,
        replica_id: &str,
        audio_url: &str,
        extra: Map<String, Value>,
    ) -> Result<Value, Error> {
        let mut request = CreateVideo::new(replica_id).audio_url(audio_url);
        request.extra = extra;
        self.create(request)
    }

    /// `verbose` includes thumbnails and other extra data.
    pub fn get(&self, video_id: &str, verbose: bool) -> Result<Value, Error> {
        let path = member_path(COLLECTION, video_id)?;
        let params = Params::new().flag("verbose", verbose);
        self.dispatcher.request(Method::GET, &path, &params, None)
    }

    pub fn list(&self, params: &Params) -> Result<Value, Error> {
        self.dispatcher
            .request(Method::GET, &collection_path(COLLECTION), params, None)
    }

    /// `hard` also deletes the video's assets, irreversibly.
    pub fn delete(&self, video_id: &str, hard: bool) -> Result<Value, Error> {
        let path = member_path(COLLECTION, video_id)?;
        let params = Params::new().flag("hard", hard);
        self.dispatcher.request(Method::DELETE, &path, &params, None)
    }

    pub fn rename(&self, video_id: &str, video_name: &str) -> Result<Value, Error> {
        let path = format!("{}/name", member_path(COLLECTION, video_id)?);
        self.dispatcher.request(
            Method::PATCH,
            &path,
            &Params::new(),
            Some(json!({ "video_name": video_name })),
        )
    }
}
