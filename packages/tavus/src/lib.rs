//! # tavus
//!
//! Blocking client for the Tavus API: conversations, personas, replicas,
//! objectives, guardrails, documents and videos.
//!
//! Every call is a single HTTP round-trip. Responses come back as
//! `serde_json::Value`; failures as a typed [`Error`] whose
//! [`kind`](Error::kind) tells apart authentication, validation, not-found,
//! rate-limit and server failures.
//!
//! ## Example
//!
//! ```ignore
//! use tavus::{Client, Params};
//! use tavus::JsonPatch;
//! use tavus::resources::{CreateConversation, CreatePersona};
//!
//! let client = Client::new(std::env::var("TAVUS_API_KEY")?)?;
//!
//! let persona = client
//!     .personas()
//!     .create(CreatePersona::new().system_prompt("You are a friendly tutor."))?;
//! let persona_id = persona["persona_id"].as_str().unwrap_or_default();
//!
//! client.personas().update_field(persona_id, "/persona_name", "Tutor")?;
//!
//! let conversation = client.conversations().create(
//!     CreateConversation::new()
//!         .persona_id(persona_id)
//!         .replica_id("r79e1c033f"),
//! )?;
//!
//! let recent = client.videos().list(&Params::new().limit(10))?;
//! ```
//!
//! ## Transport
//!
//! Requests go through an [`HttpExecutor`]. The default is
//! [`ReqwestExecutor`]; a custom one can be supplied with
//! [`ClientBuilder::executor`].

pub mod config;
pub mod error;
pub mod executor;
pub mod patch;
pub mod resources;
pub mod response;
pub mod types;

mod client;

pub use client::{Client, ClientBuilder};
pub use config::{configuration, configure, reset_configuration, Configuration};
pub use error::{ApiFailure, Error, ErrorKind};
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use patch::{JsonPatch, PatchOp, PatchOperation};
pub use types::{HttpRequest, HttpResponse, Method, Params};
